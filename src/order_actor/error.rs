use thiserror::Error;
use crate::actor_framework::StoreError;
use crate::product_actor::ProductError;
use crate::user_actor::UserError;
use super::TransitionError;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    #[error("Invalid user: {0}")]
    InvalidUser(String),
    #[error("Invalid product: {0}")]
    InvalidProduct(String),
    #[error("Order has no items")]
    EmptyOrder,
    #[error(transparent)]
    Stock(ProductError),
    #[error(transparent)]
    Transition(#[from] TransitionError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<UserError> for OrderError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::Store(e) => Self::Store(e),
            other => Self::InvalidUser(other.to_string()),
        }
    }
}
