use evento::{Executor, ProjectionAggregator};
use larder_shared::stock::{Consumed, LotDrain};
use validator::Validate;

use super::Lot;

#[derive(Validate, Clone)]
pub struct ConsumeLine {
    pub ingredient_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
}

impl<E: Executor + Clone> super::Command<E> {
    /// Atomic consumption: every line is validated against the same
    /// event-store snapshot, then applied as one event. Either the whole
    /// group goes through or stock stays untouched; evento's version check
    /// on the pantry aggregate serializes concurrent consumptions.
    pub async fn consume(
        &self,
        user_id: impl Into<String>,
        lines: Vec<ConsumeLine>,
    ) -> larder_shared::Result<()> {
        let user_id = user_id.into();

        for line in &lines {
            line.validate()?;
        }

        let Some(pantry) = self.load_for_user(&user_id).await? else {
            larder_shared::not_found!("stock of user {user_id}");
        };

        let drains = plan_drains(&pantry.lots, &lines)?;

        if drains.is_empty() {
            return Ok(());
        }

        pantry
            .aggregator()?
            .event(&Consumed { drains })
            .requested_by(user_id.as_str())
            .commit(&self.executor)
            .await?;

        Ok(())
    }
}

/// Oldest-expiration-first drain plan. Fails without side effects when any
/// line exceeds the summed availability of its ingredient.
pub(crate) fn plan_drains(
    lots: &[Lot],
    lines: &[ConsumeLine],
) -> larder_shared::Result<Vec<LotDrain>> {
    let mut merged: Vec<ConsumeLine> = Vec::new();

    for line in lines {
        match merged
            .iter_mut()
            .find(|existing| existing.ingredient_id == line.ingredient_id)
        {
            Some(existing) => existing.quantity += line.quantity,
            None => merged.push(line.clone()),
        }
    }

    let mut drains = Vec::new();

    for line in merged {
        let mut available = lots
            .iter()
            .filter(|lot| lot.ingredient_id == line.ingredient_id)
            .collect::<Vec<_>>();
        available.sort_by_key(|lot| lot.expires_on);

        let total = available.iter().map(|lot| lot.quantity).sum::<f64>();

        if total < line.quantity {
            return Err(larder_shared::Error::InsufficientStock {
                ingredient_id: line.ingredient_id,
                available: total,
                requested: line.quantity,
            });
        }

        let mut remaining = line.quantity;

        for lot in available {
            if remaining <= 0.0 {
                break;
            }

            let take = remaining.min(lot.quantity);
            drains.push(LotDrain {
                ingredient_id: lot.ingredient_id.to_owned(),
                expires_on: lot.expires_on,
                quantity: take,
            });
            remaining -= take;
        }
    }

    Ok(drains)
}
