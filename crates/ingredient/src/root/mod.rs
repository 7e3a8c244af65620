use evento::{Executor, Projection, ProjectionAggregator, Snapshot, metadata::Event};
use larder_shared::ingredient::{self, Deleted, Registered, Renamed, Unit, UnitChanged};
use std::ops::Deref;

mod delete;
mod register;
mod update;

pub use register::RegisterInput;
pub use update::UpdateInput;

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

    pub async fn load(&self, id: impl Into<String>) -> anyhow::Result<Option<Ingredient>> {
        let Some(ingredient) = create_projection(id).execute(&self.executor).await? else {
            return Ok(None);
        };

        if ingredient.is_deleted {
            return Ok(None);
        }

        Ok(Some(ingredient))
    }
}

#[evento::projection]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub unit: Unit,
    pub is_deleted: bool,
}

impl ProjectionAggregator for Ingredient {
    fn aggregator_id(&self) -> String {
        self.id.to_owned()
    }
}

impl Snapshot for Ingredient {}

pub fn create_projection(id: impl Into<String>) -> Projection<Ingredient> {
    Projection::new::<ingredient::Ingredient>(id)
        .handler(handle_registered())
        .handler(handle_renamed())
        .handler(handle_unit_changed())
        .handler(handle_deleted())
        .safety_check()
}

#[evento::handler]
async fn handle_registered(event: Event<Registered>, row: &mut Ingredient) -> anyhow::Result<()> {
    row.id = event.aggregator_id.to_owned();
    row.name = event.data.name;
    row.unit = event.data.unit;

    Ok(())
}

#[evento::handler]
async fn handle_renamed(event: Event<Renamed>, row: &mut Ingredient) -> anyhow::Result<()> {
    row.name = event.data.name;

    Ok(())
}

#[evento::handler]
async fn handle_unit_changed(
    event: Event<UnitChanged>,
    row: &mut Ingredient,
) -> anyhow::Result<()> {
    row.unit = event.data.unit;

    Ok(())
}

#[evento::handler]
async fn handle_deleted(_event: Event<Deleted>, row: &mut Ingredient) -> anyhow::Result<()> {
    row.is_deleted = true;

    Ok(())
}
