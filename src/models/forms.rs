use serde::Deserialize;
use crate::errors::{AppError, AppResult};
use super::User;

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub username: String,
    pub password: String,
}

// Both fields optional: a missing one turns add-task into a no-op, not an error
#[derive(Debug, Deserialize, Default)]
pub struct TaskForm {
    pub task_name: Option<String>,
    pub task_date: Option<String>,
}

impl RegisterForm {
    pub fn validate(&self) -> AppResult<()> {
        require_present(&self.username, &self.password)
    }

    pub fn into_user(self) -> User {
        User::new(self.username, self.password)
    }
}

impl TaskForm {
    /// Name and date, if both were sent and neither is empty.
    pub fn fields(&self) -> Option<(&str, &str)> {
        let name = self.task_name.as_deref().filter(|s| !s.is_empty())?;
        let date = self.task_date.as_deref().filter(|s| !s.is_empty())?;
        Some((name, date))
    }
}

fn require_present(username: &str, password: &str) -> AppResult<()> {
    if username.is_empty() {
        return Err(AppError::BadRequest("username is required".into()));
    }
    if password.is_empty() {
        return Err(AppError::BadRequest("password is required".into()));
    }
    Ok(())
}
