use axum::{
    extract::{rejection::FormRejection, Form, Path, State},
    response::Response,
};
use crate::errors::AppResult;
use crate::models::TaskForm;
use crate::state::AppState;
use super::{dashboard_url, found};

// Invalid input is dropped silently; the caller always lands back on the dashboard
pub async fn add_task(
    State(state): State<AppState>,
    Path(username): Path<String>,
    form: Result<Form<TaskForm>, FormRejection>,
) -> AppResult<Response> {
    let task_form = match form {
        Ok(Form(task_form)) => task_form,
        Err(e) => {
            tracing::debug!("Unreadable add-task form for {}: {}", username, e);
            TaskForm::default()
        }
    };

    if let Some((name, date)) = task_form.fields() {
        state.service.add_task(&username, name, date).await?;
    }

    Ok(found(&dashboard_url(&username)))
}

pub async fn delete_task(
    State(state): State<AppState>,
    Path((username, task_id)): Path<(String, i64)>,
) -> AppResult<Response> {
    state.service.delete_task(&username, task_id).await?;
    Ok(found(&dashboard_url(&username)))
}
