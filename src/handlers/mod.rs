mod auth;
mod task;
mod dashboard;

pub use auth::{serve_home, serve_register_page, handle_register, serve_login_page, handle_login, handle_logout};
pub use task::{add_task, delete_task};
pub use dashboard::serve_dashboard;

use axum::{
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

// Reads a template from the configured directory and fills in {{key}} placeholders
fn render(state: &AppState, name: &str, vars: &[(&str, &str)]) -> AppResult<Html<String>> {
    let path = state.config.templates.dir.join(name);
    let template = std::fs::read_to_string(&path).map_err(|e| {
        tracing::error!("Failed to read template {}: {}", path.display(), e);
        AppError::File(e)
    })?;

    Ok(Html(fill_template(&template, vars)))
}

// Single pass: substituted values are copied through and never rescanned.
// Unknown placeholders are left as they are.
fn fill_template(template: &str, vars: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        filled.push_str(&rest[..start]);
        let after = &rest[start + 2..];

        let Some(end) = after.find("}}") else {
            filled.push_str(&rest[start..]);
            return filled;
        };

        let key = &after[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => filled.push_str(value),
            None => filled.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }

    filled.push_str(rest);
    filled
}

// 302 Found, the status browsers and the legacy clients expect after a form post
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

fn dashboard_url(username: &str) -> String {
    format!("/dashboard/{}", urlencoding::encode(username))
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dashboard_url_encodes_username() {
        assert_eq!(dashboard_url("alice"), "/dashboard/alice");
        assert_eq!(dashboard_url("a b/c"), "/dashboard/a%20b%2Fc");
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"milk\" & 'eggs'</b>"), "&lt;b&gt;&quot;milk&quot; &amp; &#x27;eggs&#x27;&lt;/b&gt;");
    }

    #[test]
    fn fills_each_placeholder_once() {
        let filled = fill_template(
            "<h1>{{username}}</h1><ul>{{tasks}}</ul><p>{{task_count}}</p>",
            &[("username", "{{tasks}}"), ("tasks", "<li>{{task_count}}</li>"), ("task_count", "1")],
        );
        assert_eq!(filled, "<h1>{{tasks}}</h1><ul><li>{{task_count}}</li></ul><p>1</p>");
    }

    #[test]
    fn leaves_unknown_and_unclosed_placeholders() {
        assert_eq!(fill_template("a {{missing}} b", &[]), "a {{missing}} b");
        assert_eq!(fill_template("a {{open", &[("open", "x")]), "a {{open");
        assert_eq!(fill_template("no placeholders", &[("x", "y")]), "no placeholders");
    }

    #[test]
    fn found_sets_location() {
        let response = found("/login");
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }
}
