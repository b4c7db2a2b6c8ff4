use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    services::ServeDir,
    trace::TraceLayer,
};
use tower_sessions::{MemoryStore, SessionManagerLayer};
use tower_sessions::cookie::SameSite;
use crate::{handlers, middleware, state::AppState};

pub fn build_router(state: AppState) -> Router {
    // Session store setup
    let session_layer = SessionManagerLayer::new(MemoryStore::default())
        .with_secure(false)
        .with_same_site(SameSite::Lax)
        .with_name("session");

    let max_body_size = state.config.server.max_body_size;
    let static_dir = state.config.server.static_dir.clone();

    Router::new()
        // Auth routes
        .route("/", get(handlers::serve_home))
        .route("/register", get(handlers::serve_register_page).post(handlers::handle_register))
        .route("/login", get(handlers::serve_login_page).post(handlers::handle_login))
        .route("/logout", get(handlers::handle_logout))

        // Task routes
        .route("/dashboard/:username", get(handlers::serve_dashboard))
        .route("/add/:username", post(handlers::add_task))
        .route("/delete/:username/:task_id", get(handlers::delete_task))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))

        // Session check runs inside the session layer
        .layer(from_fn_with_state(state.clone(), middleware::require_owner))
        .layer(session_layer)

        .layer(RequestBodyLimitLayer::new(max_body_size))
        .layer(TraceLayer::new_for_http())

        .with_state(state)
}
