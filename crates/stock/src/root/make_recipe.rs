use evento::Executor;
use validator::Validate;

use super::ConsumeLine;
use crate::repository;

#[derive(Validate)]
pub struct MakeRecipeInput {
    #[validate(length(min = 1))]
    pub user_id: String,
    #[validate(length(min = 1))]
    pub recipe_id: String,
}

impl<E: Executor + Clone> super::Command<E> {
    /// Making a recipe consumes every one of its lines from the user's
    /// stock in a single atomic group.
    pub async fn make_recipe(&self, input: MakeRecipeInput) -> larder_shared::Result<()> {
        input.validate()?;

        let Some(lines) = repository::recipe_lines(&self.read_db, &input.recipe_id).await? else {
            larder_shared::not_found!("recipe {}", input.recipe_id);
        };

        if !repository::user_exists(&self.read_db, &input.user_id).await? {
            larder_shared::not_found!("user {}", input.user_id);
        }

        let lines = lines
            .into_iter()
            .map(|(ingredient_id, quantity)| ConsumeLine {
                ingredient_id,
                quantity,
            })
            .collect::<Vec<_>>();

        if lines.is_empty() {
            return Ok(());
        }

        self.consume(input.user_id, lines).await
    }
}
