// Error types for the storage layer and the HTTP layer, built on thiserror.
use thiserror::Error;

pub mod response;
pub mod store;

pub use store::{StoreError, StoreResult};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already exists: {0}")]
    UsernameTaken(String),

    // Unknown user and wrong password are reported identically
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("No task ids left to allocate")]
    IdsExhausted,

    #[error("Session error: {0}")]
    Session(String),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

pub type AppResult<T> = Result<T, AppError>;
