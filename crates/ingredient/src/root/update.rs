use evento::{Executor, ProjectionAggregator};
use larder_shared::ingredient::{Renamed, Unit, UnitChanged, name_key};
use validator::Validate;

use crate::repository;

#[derive(Validate)]
pub struct UpdateInput {
    pub id: String,
    #[validate(length(min = 2, max = 100))]
    pub name: String,
    pub unit: Unit,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn update(&self, input: UpdateInput) -> larder_shared::Result<()> {
        input.validate()?;

        let Some(ingredient) = self.load(&input.id).await? else {
            larder_shared::not_found!("ingredient {}", input.id);
        };

        let name = input.name.trim().to_owned();
        let renamed = name != ingredient.name;
        let unit_changed = input.unit != ingredient.unit;

        if !renamed && !unit_changed {
            return Ok(());
        }

        if renamed {
            let key = name_key(&name);

            if let Some(existing) = repository::find_by_name_key(&self.read_db, &key).await? {
                if existing.id != ingredient.id {
                    larder_shared::conflict!("ingredient name already in use: {name}");
                }
            }
        }

        let mut builder = ingredient.aggregator()?;

        if renamed {
            builder.event(&Renamed {
                name: name.to_owned(),
            });
        }

        if unit_changed {
            builder.event(&UnitChanged { unit: input.unit });
        }

        builder.commit(&self.executor).await?;

        if renamed {
            repository::update(&self.write_db, &input.id, name_key(&name)).await?;
        }

        Ok(())
    }
}
