use axum::{
    extract::{Path, State},
    response::Html,
};
use crate::errors::AppResult;
use crate::state::AppState;
use super::{escape_html, render};

pub async fn serve_dashboard(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Html<String>> {
    tracing::debug!("Rendering dashboard for user: {}", username);

    // Unknown users get an empty list rather than an error
    let tasks = state.service.tasks_for(&username).await;
    let user_path = urlencoding::encode(&username).into_owned();

    let tasks_html = tasks.iter().map(|task| {
        format!(
            r#"<li class="task">
                <span class="task-name">{}</span>
                <span class="task-date">{}</span>
                <a href="/delete/{}/{}" class="delete-btn">Delete</a>
            </li>"#,
            escape_html(&task.name),
            escape_html(&task.date),
            user_path,
            task.id
        )
    }).collect::<Vec<_>>().join("\n");

    let username_html = escape_html(&username);
    let task_count = tasks.len().to_string();

    render(&state, "dashboard.html", &[
        ("username", username_html.as_str()),
        ("user_path", user_path.as_str()),
        ("tasks", tasks_html.as_str()),
        ("task_count", task_count.as_str()),
    ])
}
