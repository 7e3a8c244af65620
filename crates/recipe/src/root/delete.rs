use evento::{Executor, ProjectionAggregator};
use larder_shared::recipe::Deleted;

impl<E: Executor + Clone> super::Command<E> {
    pub async fn delete(&self, id: impl Into<String>) -> larder_shared::Result<()> {
        let id = id.into();

        let Some(recipe) = self.load(&id).await? else {
            larder_shared::not_found!("recipe {id}");
        };

        recipe
            .aggregator()?
            .event(&Deleted)
            .commit(&self.executor)
            .await?;

        Ok(())
    }
}
