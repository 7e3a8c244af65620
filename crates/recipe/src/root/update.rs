use evento::{Executor, ProjectionAggregator};
use larder_shared::recipe::{BasicInformationChanged, Category, IngredientsReplaced};
use validator::Validate;

use super::{RecipeLineInput, basic_information_hash, ingredients_hash};

#[derive(Validate)]
pub struct UpdateInput {
    pub id: String,
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 5000))]
    pub instructions: String,
    pub category: Category,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<RecipeLineInput>,
}

impl<E: Executor + Clone> super::Command<E> {
    /// The ingredient line set is always replaced as a whole, never patched.
    pub async fn update(&self, input: UpdateInput) -> larder_shared::Result<()> {
        input.validate()?;

        let Some(recipe) = self.load(&input.id).await? else {
            larder_shared::not_found!("recipe {}", input.id);
        };

        let name = input.name.trim().to_owned();
        let instructions = input.instructions.trim().to_owned();
        let ingredients = self.check_lines(&input.ingredients).await?;

        let mut builder = recipe.aggregator()?;
        let mut has_data = false;

        if recipe.basic_information_hash
            != basic_information_hash(&name, &instructions, &input.category)
        {
            has_data = true;
            builder.event(&BasicInformationChanged {
                name,
                instructions,
                category: input.category,
            });
        }

        if recipe.ingredients_hash != ingredients_hash(&ingredients) {
            has_data = true;
            builder.event(&IngredientsReplaced { ingredients });
        }

        if !has_data {
            return Ok(());
        }

        builder.commit(&self.executor).await?;

        Ok(())
    }
}
