//! Typed handles over the record stores. These are the only way the web
//! layer reads or writes data.

#[macro_use]
mod macros;
mod category_client;
mod order_client;
mod product_client;
mod user_client;

pub use category_client::CategoryClient;
pub use order_client::OrderClient;
pub use product_client::ProductClient;
pub use user_client::UserClient;
