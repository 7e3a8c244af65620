use bitcode::{Decode, Encode};
use evento::{Executor, Projection, ProjectionAggregator, Snapshot, metadata::Event};
use larder_shared::stock::{self, Consumed, LotAdded, LotAdjusted, LotRemoved, Opened};
use std::ops::Deref;

use crate::repository;

mod add;
mod adjust;
mod consume;
mod make_recipe;
mod remove;

pub use add::AddInput;
pub use adjust::AdjustInput;
pub use consume::ConsumeLine;
pub use make_recipe::MakeRecipeInput;
pub use remove::RemoveInput;

#[derive(Clone)]
pub struct Command<E: Executor>(larder_shared::State<E>);

impl<E: Executor> Deref for Command<E> {
    type Target = larder_shared::State<E>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<E: Executor> Command<E> {
    pub fn new(state: larder_shared::State<E>) -> Self {
        Self(state)
    }

    pub async fn load(&self, id: impl Into<String>) -> anyhow::Result<Option<Pantry>> {
        create_projection(id).execute(&self.executor).await
    }

    pub async fn load_for_user(
        &self,
        user_id: impl Into<String>,
    ) -> larder_shared::Result<Option<Pantry>> {
        let Some(row) = repository::find_by_user(&self.read_db, user_id).await? else {
            return Ok(None);
        };

        Ok(self.load(row.id).await?)
    }
}

impl<E: Executor + Clone> Command<E> {
    /// The first stock write for a user opens their pantry.
    pub(crate) async fn load_or_open(&self, user_id: &str) -> larder_shared::Result<Pantry> {
        if let Some(pantry) = self.load_for_user(user_id).await? {
            return Ok(pantry);
        }

        let id = evento::create()
            .event(&Opened {
                user_id: user_id.to_owned(),
            })
            .requested_by(user_id)
            .commit(&self.executor)
            .await?;

        repository::create(&self.write_db, id.to_owned(), user_id.to_owned()).await?;

        let Some(pantry) = self.load(id).await? else {
            larder_shared::bail!("pantry of user {user_id} missing right after open");
        };

        Ok(pantry)
    }
}

/// One dated quantity of an ingredient. At most one lot exists per
/// (ingredient, expiration date) pair; `expires_on` is a julian day number.
#[derive(Debug, Clone, PartialEq, Encode, Decode)]
pub struct Lot {
    pub ingredient_id: String,
    pub expires_on: i32,
    pub quantity: f64,
}

#[evento::projection]
pub struct Pantry {
    pub id: String,
    pub user_id: String,
    pub lots: Vec<Lot>,
}

impl ProjectionAggregator for Pantry {
    fn aggregator_id(&self) -> String {
        self.id.to_owned()
    }
}

impl Snapshot for Pantry {}

pub fn create_projection(id: impl Into<String>) -> Projection<Pantry> {
    Projection::new::<stock::Pantry>(id)
        .handler(handle_opened())
        .handler(handle_lot_added())
        .handler(handle_lot_adjusted())
        .handler(handle_lot_removed())
        .handler(handle_consumed())
        .safety_check()
}

#[evento::handler]
async fn handle_opened(event: Event<Opened>, row: &mut Pantry) -> anyhow::Result<()> {
    row.id = event.aggregator_id.to_owned();
    row.user_id = event.data.user_id;

    Ok(())
}

#[evento::handler]
async fn handle_lot_added(event: Event<LotAdded>, row: &mut Pantry) -> anyhow::Result<()> {
    let existing = row.lots.iter_mut().find(|lot| {
        lot.ingredient_id == event.data.ingredient_id && lot.expires_on == event.data.expires_on
    });

    match existing {
        Some(lot) => lot.quantity += event.data.quantity,
        None => row.lots.push(Lot {
            ingredient_id: event.data.ingredient_id,
            expires_on: event.data.expires_on,
            quantity: event.data.quantity,
        }),
    }

    Ok(())
}

#[evento::handler]
async fn handle_lot_adjusted(event: Event<LotAdjusted>, row: &mut Pantry) -> anyhow::Result<()> {
    let Some(position) = row.lots.iter().position(|lot| {
        lot.ingredient_id == event.data.ingredient_id && lot.expires_on == event.data.expires_on
    }) else {
        return Ok(());
    };

    let mut lot = row.lots.remove(position);
    lot.quantity = event.data.quantity;
    lot.expires_on = event.data.new_expires_on;

    let target = row.lots.iter_mut().find(|existing| {
        existing.ingredient_id == lot.ingredient_id && existing.expires_on == lot.expires_on
    });

    match target {
        Some(existing) => existing.quantity += lot.quantity,
        None => row.lots.push(lot),
    }

    Ok(())
}

#[evento::handler]
async fn handle_lot_removed(event: Event<LotRemoved>, row: &mut Pantry) -> anyhow::Result<()> {
    row.lots.retain(|lot| {
        lot.ingredient_id != event.data.ingredient_id || lot.expires_on != event.data.expires_on
    });

    Ok(())
}

#[evento::handler]
async fn handle_consumed(event: Event<Consumed>, row: &mut Pantry) -> anyhow::Result<()> {
    for drain in &event.data.drains {
        if let Some(lot) = row.lots.iter_mut().find(|lot| {
            lot.ingredient_id == drain.ingredient_id && lot.expires_on == drain.expires_on
        }) {
            lot.quantity -= drain.quantity;
        }
    }

    // fully drained lots disappear instead of lingering at zero
    row.lots.retain(|lot| lot.quantity > 0.0);

    Ok(())
}
