use axum::{
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
    extract::{Request, State},
    body::Body,
};
use tower_sessions::Session;
use crate::errors::AppError;
use crate::state::AppState;

pub const SESSION_USER_KEY: &str = "user_session";

// Per-user routes carry the username as their first path segment
const OWNED_PREFIXES: [&str; 3] = ["dashboard", "add", "delete"];

/// When sessions are required, per-user routes only serve the user logged in on
/// this session. Everything else passes through untouched.
pub async fn require_owner(
    State(state): State<AppState>,
    session: Session,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !state.config.session.required {
        return next.run(req).await;
    }

    let Some(owner) = owner_of(req.uri().path()) else {
        return next.run(req).await;
    };

    match session.get::<String>(SESSION_USER_KEY).await {
        Ok(Some(user)) if user == owner => next.run(req).await,
        Ok(_) => {
            tracing::warn!("Rejected request for {} without a matching session", req.uri().path());
            Redirect::to("/login").into_response()
        }
        Err(e) => AppError::Session(e.to_string()).into_response(),
    }
}

fn owner_of(path: &str) -> Option<String> {
    let mut segments = path.trim_start_matches('/').split('/');
    let prefix = segments.next()?;
    if !OWNED_PREFIXES.contains(&prefix) {
        return None;
    }

    let raw = segments.next().filter(|s| !s.is_empty())?;
    urlencoding::decode(raw).ok().map(|name| name.into_owned())
}
