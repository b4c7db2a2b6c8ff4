use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
};
use crate::errors::AppError;

// Converts AppError into the HTTP response the client sees.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::UsernameTaken(_) => (
                StatusCode::BAD_REQUEST,
                "Username already exists!"
            ).into_response(),

            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid credentials"
            ).into_response(),

            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                format!("Bad request: {}", msg)
            ).into_response(),

            AppError::IdsExhausted => {
                tracing::error!("Task id space exhausted");
                (StatusCode::INTERNAL_SERVER_ERROR, "No task ids left").into_response()
            }

            AppError::Session(msg) => {
                tracing::error!("Session error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session error").into_response()
            }

            // Missing or unreadable templates
            AppError::File(e) => {
                tracing::error!("File error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("File error: {}", e)
                ).into_response()
            }

            AppError::Store(e) => {
                tracing::error!("Storage error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Storage error: {}", e)
                ).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_and_unauthorized_statuses() {
        let taken = AppError::UsernameTaken("alice".into()).into_response();
        assert_eq!(taken.status(), StatusCode::BAD_REQUEST);

        let denied = AppError::InvalidCredentials.into_response();
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn storage_failures_are_server_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let response = AppError::Store(io.into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
