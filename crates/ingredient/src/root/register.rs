use evento::Executor;
use larder_shared::ingredient::{Registered, Unit, name_key};
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct RegisterInput {
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub unit: Unit,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn register(&self, input: RegisterInput) -> larder_shared::Result<String> {
        input.validate()?;

        let key = name_key(&input.name);

        if repository::find_by_name_key(&self.read_db, &key)
            .await?
            .is_some()
        {
            larder_shared::conflict!("ingredient name already in use: {}", input.name);
        }

        let id = evento::create()
            .event(&Registered {
                name: input.name.trim().to_owned(),
                unit: input.unit,
            })
            .commit(&self.executor)
            .await?;

        repository::create(&self.write_db, id.to_owned(), key).await?;

        Ok(id)
    }
}
