//! User records: registration and email uniqueness.

pub mod entity;
pub mod error;

pub use error::*;
