use thiserror::Error;
use crate::actor_framework::StoreError;

/// Errors that can occur during user operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum UserError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
