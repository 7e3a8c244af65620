use evento::{Executor, ProjectionAggregator};
use larder_shared::stock::LotAdded;
use time::Date;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct AddInput {
    pub user_id: String,
    pub ingredient_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    pub expires_on: Date,
}

impl<E: Executor + Clone> super::Command<E> {
    /// Adds a quantity to the user's stock. A lot with the same expiration
    /// date absorbs it; a different date starts a new lot.
    pub async fn add(&self, input: AddInput) -> larder_shared::Result<()> {
        input.validate()?;

        if !repository::user_exists(&self.read_db, &input.user_id).await? {
            larder_shared::not_found!("user {}", input.user_id);
        }

        if !repository::ingredient_exists(&self.read_db, &input.ingredient_id).await? {
            larder_shared::not_found!("ingredient {}", input.ingredient_id);
        }

        let pantry = self.load_or_open(&input.user_id).await?;

        pantry
            .aggregator()?
            .event(&LotAdded {
                ingredient_id: input.ingredient_id,
                quantity: input.quantity,
                expires_on: input.expires_on.to_julian_day(),
            })
            .requested_by(input.user_id.as_str())
            .commit(&self.executor)
            .await?;

        Ok(())
    }
}
