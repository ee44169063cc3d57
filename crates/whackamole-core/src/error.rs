use thiserror::Error;

use crate::storage::OwnerId;

/// Why a sign-in attempt was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AuthFailure {
    #[error("user not found")]
    NotFound,

    #[error("wrong password")]
    WrongSecret,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Display name already registered: {0}")]
    DuplicateName(String),

    #[error("Authentication failed: {0}")]
    Auth(#[from] AuthFailure),

    #[error("Owner {owner_id} does not exist")]
    ForeignKeyViolation { owner_id: OwnerId },

    #[error("Username and password must not be empty")]
    EmptyCredentials,

    #[error("Invalid engine config: {0}")]
    InvalidConfig(String),

    #[error("Session engine is not running")]
    EngineUnavailable,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
