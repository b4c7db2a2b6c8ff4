use axum::{
    extract::{rejection::FormRejection, Form, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_sessions::Session;
use crate::errors::{AppError, AppResult};
use crate::middleware::SESSION_USER_KEY;
use crate::models::{LoginForm, RegisterForm};
use crate::state::AppState;
use super::{dashboard_url, found, render};

pub async fn serve_home() -> Html<&'static str> {
    Html(r#"Welcome! <a href="/login">Login</a> or <a href="/register">Register</a>"#)
}

pub async fn serve_register_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, "register.html", &[])
}

pub async fn serve_login_page(State(state): State<AppState>) -> AppResult<Html<String>> {
    render(&state, "login.html", &[])
}

pub async fn handle_register(
    State(state): State<AppState>,
    form: Result<Form<RegisterForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(register_form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    register_form.validate()?;

    tracing::info!("Registration attempt for user: {}", register_form.username);
    state.service.register(register_form.into_user()).await?;

    Ok(found("/login"))
}

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> AppResult<Response> {
    let Form(login_form) = form.map_err(|e| AppError::BadRequest(e.body_text()))?;
    tracing::info!("Login attempt for user: {}", login_form.username);

    if !state
        .service
        .authenticate(&login_form.username, &login_form.password)
        .await
    {
        tracing::info!("Invalid credentials for user: {}", login_form.username);
        return Err(AppError::InvalidCredentials);
    }

    session
        .insert(SESSION_USER_KEY, &login_form.username)
        .await
        .map_err(|e| AppError::Session(e.to_string()))?;

    Ok(found(&dashboard_url(&login_form.username)))
}

pub async fn handle_logout(session: Session) -> Response {
    if let Err(e) = session.remove::<String>(SESSION_USER_KEY).await {
        tracing::warn!("Session removal error: {}", e);
    }
    Redirect::to("/").into_response()
}
