//! Sessions, password hashing and the role guards every handler runs first.

pub mod account;
pub mod guard;
pub mod password;
pub mod session;

pub use account::{register_customer, verify_login};
pub use guard::*;
pub use password::{PasswordError, Passwords};
pub use session::{RequestContext, SessionSettings};
