use evento::{Executor, Projection, ProjectionAggregator, Snapshot, metadata::Event};
use larder_shared::user::{self, Deleted, ProfileChanged, Registered};
use std::ops::Deref;

mod delete;
mod register;
mod update_profile;

pub use register::RegisterInput;
pub use update_profile::UpdateProfileInput;

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

    pub async fn load(&self, id: impl Into<String>) -> anyhow::Result<Option<User>> {
        let Some(user) = create_projection(id).execute(&self.executor).await? else {
            return Ok(None);
        };

        if user.is_deleted {
            return Ok(None);
        }

        Ok(Some(user))
    }
}

#[evento::projection]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub is_deleted: bool,
}

impl ProjectionAggregator for User {
    fn aggregator_id(&self) -> String {
        self.id.to_owned()
    }
}

impl Snapshot for User {}

pub fn create_projection(id: impl Into<String>) -> Projection<User> {
    Projection::new::<user::User>(id)
        .handler(handle_registered())
        .handler(handle_profile_changed())
        .handler(handle_deleted())
        .safety_check()
}

#[evento::handler]
async fn handle_registered(event: Event<Registered>, row: &mut User) -> anyhow::Result<()> {
    row.id = event.aggregator_id.to_owned();
    row.name = event.data.name;
    row.email = event.data.email;

    Ok(())
}

#[evento::handler]
async fn handle_profile_changed(
    event: Event<ProfileChanged>,
    row: &mut User,
) -> anyhow::Result<()> {
    row.name = event.data.name;
    row.email = event.data.email;

    Ok(())
}

#[evento::handler]
async fn handle_deleted(_event: Event<Deleted>, row: &mut User) -> anyhow::Result<()> {
    row.is_deleted = true;

    Ok(())
}
