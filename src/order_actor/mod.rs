//! Orders and their status lifecycle.

mod actions;
pub mod entity;
pub mod error;
pub mod lifecycle;

pub use actions::*;
pub use error::*;
pub use lifecycle::*;
