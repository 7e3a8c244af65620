use evento::{Executor, ProjectionAggregator};
use larder_shared::user::ProfileChanged;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct UpdateProfileInput {
    pub id: String,
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn update_profile(&self, input: UpdateProfileInput) -> larder_shared::Result<()> {
        input.validate()?;

        let Some(user) = self.load(&input.id).await? else {
            larder_shared::not_found!("user {}", input.id);
        };

        if user.name == input.name && user.email == input.email {
            return Ok(());
        }

        if user.email != input.email {
            if let Some(existing) = repository::find(
                &self.read_db,
                repository::FindType::Email(input.email.to_owned()),
            )
            .await?
            {
                if existing.id != user.id {
                    larder_shared::conflict!("email already in use: {}", input.email);
                }
            }
        }

        user.aggregator()?
            .event(&ProfileChanged {
                name: input.name.to_owned(),
                email: input.email.to_owned(),
            })
            .requested_by(input.id.as_str())
            .commit(&self.executor)
            .await?;

        repository::update(&self.write_db, &input.id, input.name, input.email).await?;

        Ok(())
    }
}
