mod list;
mod stat;

pub use list::*;
pub use stat::*;

#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);
