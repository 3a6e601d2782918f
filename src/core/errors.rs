use serde::Serialize;
use thiserror::Error;

pub const MISSING_FIELDS: &str = "Name and email are required";
pub const INVALID_EMAIL: &str = "Invalid email format";
pub const EMAIL_EXISTS: &str = "User with this email already exists";
pub const MISSING_USER_ID: &str = "User ID is required";

/// Failures reported by a `UserStore` backend.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum StoreError {
    /// Conditional put rejected: a record already exists for this id.
    #[error("User {0} already exists")]
    AlreadyExists(String),
    /// Network, throttling or backend fault.
    #[error("{0}")]
    Backend(String),
}

#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum UserServiceError {
    /// Caller-supplied input is malformed or incomplete
    #[error("{0}")]
    Validation(String),
    /// A uniqueness invariant would be violated
    #[error("{0}")]
    Conflict(String),
    /// The backing store failed
    #[error("{0}")]
    Store(String),
}

impl UserServiceError {
    pub fn validation(msg: impl Into<String>) -> Self {
        UserServiceError::Validation(msg.into())
    }
}

impl From<StoreError> for UserServiceError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::AlreadyExists(_) => UserServiceError::Conflict(err.to_string()),
            StoreError::Backend(msg) => UserServiceError::Store(msg),
        }
    }
}
