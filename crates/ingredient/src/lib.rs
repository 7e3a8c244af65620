mod query;
mod repository;
mod root;

pub use query::*;
pub use root::*;
