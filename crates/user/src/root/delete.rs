use evento::{Executor, ProjectionAggregator};
use larder_shared::user::Deleted;

use crate::repository;

impl<E: Executor + Clone> super::Command<E> {
    pub async fn delete(&self, id: impl Into<String>) -> larder_shared::Result<()> {
        let id = id.into();

        let Some(user) = self.load(&id).await? else {
            larder_shared::not_found!("user {id}");
        };

        user.aggregator()?
            .event(&Deleted)
            .commit(&self.executor)
            .await?;

        repository::delete(&self.write_db, &id).await?;

        Ok(())
    }
}
