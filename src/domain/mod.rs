pub mod category;
pub mod order;
pub mod product;
pub mod slug;
pub mod user;

pub use category::*;
pub use order::*;
pub use product::*;
pub use slug::slugify;
pub use user::*;
