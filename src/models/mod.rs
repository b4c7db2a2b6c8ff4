mod user;
mod forms;
mod task;

pub use user::User;
pub use forms::{LoginForm, RegisterForm, TaskForm};
pub use task::Task;
