mod admin;
mod product;

pub use admin::*;
pub use product::*;
