use thiserror::Error;
use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CategoryError {
    #[error("Category already exists: {0}")]
    AlreadyExists(String),
    #[error("Category name {0:?} has no letters or digits")]
    Unsluggable(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
