use evento::Executor;
use larder_shared::user::Registered;
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    #[validate(email)]
    pub email: String,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn register(&self, input: RegisterInput) -> larder_shared::Result<String> {
        input.validate()?;

        if repository::find(
            &self.read_db,
            repository::FindType::Email(input.email.to_owned()),
        )
        .await?
        .is_some()
        {
            larder_shared::conflict!("email already in use: {}", input.email);
        }

        let id = evento::create()
            .event(&Registered {
                name: input.name.to_owned(),
                email: input.email.to_owned(),
            })
            .commit(&self.executor)
            .await?;

        repository::create(&self.write_db, id.to_owned(), input.name, input.email).await?;

        Ok(id)
    }
}
