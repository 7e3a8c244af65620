use evento::{Executor, ProjectionAggregator};
use larder_shared::stock::LotAdjusted;
use time::Date;
use validator::Validate;

#[derive(Validate)]
pub struct AdjustInput {
    pub user_id: String,
    pub ingredient_id: String,
    /// Which lot, by its current expiration date.
    pub expires_on: Date,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
    /// Moves the lot to another date; merged into an existing lot there.
    pub new_expires_on: Option<Date>,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn adjust(&self, input: AdjustInput) -> larder_shared::Result<()> {
        input.validate()?;

        let Some(pantry) = self.load_for_user(&input.user_id).await? else {
            larder_shared::not_found!("stock of user {}", input.user_id);
        };

        let expires_on = input.expires_on.to_julian_day();

        if !pantry
            .lots
            .iter()
            .any(|lot| lot.ingredient_id == input.ingredient_id && lot.expires_on == expires_on)
        {
            larder_shared::not_found!("stock lot of ingredient {}", input.ingredient_id);
        }

        pantry
            .aggregator()?
            .event(&LotAdjusted {
                ingredient_id: input.ingredient_id,
                expires_on,
                quantity: input.quantity,
                new_expires_on: input
                    .new_expires_on
                    .unwrap_or(input.expires_on)
                    .to_julian_day(),
            })
            .requested_by(input.user_id.as_str())
            .commit(&self.executor)
            .await?;

        Ok(())
    }
}
