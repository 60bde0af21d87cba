use thiserror::Error;
use crate::actor_framework::StoreError;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ProductError {
    #[error("A product with slug {0} already exists")]
    SlugTaken(String),
    #[error("Product name {0:?} has no letters or digits")]
    Unsluggable(String),
    #[error("Insufficient stock for {product}: requested {requested}, available {available}")]
    InsufficientStock { product: String, requested: u32, available: u32 },
    #[error(transparent)]
    Store(#[from] StoreError),
}
