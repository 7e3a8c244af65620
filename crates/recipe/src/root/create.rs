use evento::Executor;
use larder_shared::recipe::{Category, Created};
use validator::Validate;

#[derive(Validate, Clone)]
pub struct RecipeLineInput {
    pub ingredient_id: String,
    #[validate(range(exclusive_min = 0.0))]
    pub quantity: f64,
}

#[derive(Validate)]
pub struct CreateInput {
    #[validate(length(min = 3, max = 100))]
    pub name: String,
    #[validate(length(min = 3, max = 5000))]
    pub instructions: String,
    pub category: Category,
    #[validate(length(min = 1), nested)]
    pub ingredients: Vec<RecipeLineInput>,
}

impl<E: Executor + Clone> super::Command<E> {
    pub async fn create(
        &self,
        input: CreateInput,
        author_id: impl Into<String>,
    ) -> larder_shared::Result<String> {
        input.validate()?;

        let ingredients = self.check_lines(&input.ingredients).await?;

        Ok(evento::create()
            .event(&Created {
                name: input.name.trim().to_owned(),
                instructions: input.instructions.trim().to_owned(),
                category: input.category,
                ingredients,
            })
            .requested_by(author_id)
            .commit(&self.executor)
            .await?)
    }
}
