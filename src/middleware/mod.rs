mod auth;

pub use auth::{require_owner, SESSION_USER_KEY};
