pub use crate::repository::UserRow;
use crate::repository::{self, FindType};

/// Users are written through the repository table synchronously, so reads
/// go straight to it instead of a projected read model.
#[derive(Clone)]
pub struct Query(pub sqlx::SqlitePool);

impl Query {
    pub async fn list(&self) -> larder_shared::Result<Vec<UserRow>> {
        repository::list(&self.0).await
    }

    pub async fn find(&self, id: impl Into<String>) -> larder_shared::Result<Option<UserRow>> {
        repository::find(&self.0, FindType::Id(id.into())).await
    }

    pub async fn find_by_email(
        &self,
        email: impl Into<String>,
    ) -> larder_shared::Result<Option<UserRow>> {
        repository::find(&self.0, FindType::Email(email.into())).await
    }
}
