use evento::{Executor, ProjectionAggregator};
use larder_shared::ingredient::Deleted;

use crate::repository;

impl<E: Executor + Clone> super::Command<E> {
    /// Removes an ingredient from the catalog. Rejected while any recipe
    /// line or stock lot still references it.
    pub async fn delete(&self, id: impl Into<String>) -> larder_shared::Result<()> {
        let id = id.into();

        let Some(ingredient) = self.load(&id).await? else {
            larder_shared::not_found!("ingredient {id}");
        };

        let usage = crate::Query(self.read_db.clone()).find_usage(&id).await?;

        if usage.recipe_count > 0 || usage.stock_count > 0 {
            larder_shared::conflict!(
                "ingredient {} is still referenced by {} recipe(s) and {} stock lot(s)",
                ingredient.name,
                usage.recipe_count,
                usage.stock_count
            );
        }

        ingredient
            .aggregator()?
            .event(&Deleted)
            .commit(&self.executor)
            .await?;

        repository::delete(&self.write_db, &id).await?;

        Ok(())
    }
}
