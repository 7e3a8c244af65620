use evento::{Executor, ProjectionAggregator};
use larder_shared::stock::LotRemoved;
use time::Date;

pub struct RemoveInput {
    pub user_id: String,
    pub ingredient_id: String,
    /// Removes one lot when given, every lot of the ingredient otherwise.
    pub expires_on: Option<Date>,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn remove(&self, input: RemoveInput) -> larder_shared::Result<()> {
        let Some(pantry) = self.load_for_user(&input.user_id).await? else {
            larder_shared::not_found!("stock of user {}", input.user_id);
        };

        let expires_on = input.expires_on.map(|date| date.to_julian_day());
        let removed = pantry
            .lots
            .iter()
            .filter(|lot| {
                lot.ingredient_id == input.ingredient_id
                    && expires_on.is_none_or(|day| lot.expires_on == day)
            })
            .map(|lot| lot.expires_on)
            .collect::<Vec<_>>();

        if removed.is_empty() {
            larder_shared::not_found!("stock lot of ingredient {}", input.ingredient_id);
        }

        let mut builder = pantry.aggregator()?;

        for expires_on in removed {
            builder.event(&LotRemoved {
                ingredient_id: input.ingredient_id.to_owned(),
                expires_on,
            });
        }

        builder
            .requested_by(input.user_id.as_str())
            .commit(&self.executor)
            .await?;

        Ok(())
    }
}
