mod blog;
mod category;

pub use blog::*;
pub use category::*;
