use std::collections::HashSet;

use evento::{Executor, Projection, ProjectionAggregator, Snapshot, metadata::Event};
use larder_db::table::IngredientName;
use larder_shared::recipe::{
    self, BasicInformationChanged, Category, Created, Deleted, IngredientsReplaced, RecipeLine,
};
use sea_query::{Expr, ExprTrait, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sha3::{Digest, Sha3_224};
use std::ops::Deref;

mod create;
mod delete;
mod update;

pub use create::{CreateInput, RecipeLineInput};
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

    pub async fn load(&self, id: impl Into<String>) -> anyhow::Result<Option<Recipe>> {
        let Some(recipe) = create_projection(id).execute(&self.executor).await? else {
            return Ok(None);
        };

        if recipe.is_deleted {
            return Ok(None);
        }

        Ok(Some(recipe))
    }

    /// Resolves line inputs against the live catalog: every referenced
    /// ingredient must exist, each at most once per recipe.
    pub(crate) async fn check_lines(
        &self,
        inputs: &[RecipeLineInput],
    ) -> larder_shared::Result<Vec<RecipeLine>> {
        let mut seen = HashSet::new();

        for input in inputs {
            if !seen.insert(input.ingredient_id.as_str()) {
                larder_shared::conflict!("duplicate ingredient line: {}", input.ingredient_id);
            }
        }

        let ids = inputs
            .iter()
            .map(|input| input.ingredient_id.to_owned())
            .collect::<Vec<_>>();

        let statement = sea_query::Query::select()
            .column(IngredientName::Id)
            .from(IngredientName::Table)
            .and_where(Expr::col(IngredientName::Id).is_in(ids))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let known = sqlx::query_as_with::<_, (String,), _>(&sql, values)
            .fetch_all(&self.read_db)
            .await?
            .into_iter()
            .collect::<HashSet<_>>();

        for input in inputs {
            if !known.contains(&input.ingredient_id) {
                larder_shared::not_found!("ingredient {}", input.ingredient_id);
            }
        }

        Ok(inputs
            .iter()
            .map(|input| RecipeLine {
                ingredient_id: input.ingredient_id.to_owned(),
                quantity: input.quantity,
            })
            .collect())
    }
}

#[evento::projection]
pub struct Recipe {
    pub id: String,
    pub author_id: String,
    pub basic_information_hash: Vec<u8>,
    pub ingredients_hash: Vec<u8>,
    pub is_deleted: bool,
}

impl ProjectionAggregator for Recipe {
    fn aggregator_id(&self) -> String {
        self.id.to_owned()
    }
}

impl Snapshot for Recipe {}

pub fn create_projection(id: impl Into<String>) -> Projection<Recipe> {
    Projection::new::<recipe::Recipe>(id)
        .handler(handle_created())
        .handler(handle_basic_information_changed())
        .handler(handle_ingredients_replaced())
        .handler(handle_deleted())
        .safety_check()
}

fn basic_information_hash(name: &str, instructions: &str, category: &Category) -> Vec<u8> {
    let mut hasher = Sha3_224::default();
    hasher.update(name);
    hasher.update(instructions);
    hasher.update(category.to_string());

    hasher.finalize()[..].to_vec()
}

fn ingredients_hash(lines: &[RecipeLine]) -> Vec<u8> {
    let mut hasher = Sha3_224::default();

    for line in lines {
        hasher.update(&line.ingredient_id);
        hasher.update(line.quantity.to_string());
    }

    hasher.finalize()[..].to_vec()
}

#[evento::handler]
async fn handle_created(event: Event<Created>, row: &mut Recipe) -> anyhow::Result<()> {
    row.id = event.aggregator_id.to_owned();
    row.author_id = event.metadata.requested_by()?;
    row.basic_information_hash = basic_information_hash(
        &event.data.name,
        &event.data.instructions,
        &event.data.category,
    );
    row.ingredients_hash = ingredients_hash(&event.data.ingredients);

    Ok(())
}

#[evento::handler]
async fn handle_basic_information_changed(
    event: Event<BasicInformationChanged>,
    row: &mut Recipe,
) -> anyhow::Result<()> {
    row.basic_information_hash = basic_information_hash(
        &event.data.name,
        &event.data.instructions,
        &event.data.category,
    );

    Ok(())
}

#[evento::handler]
async fn handle_ingredients_replaced(
    event: Event<IngredientsReplaced>,
    row: &mut Recipe,
) -> anyhow::Result<()> {
    row.ingredients_hash = ingredients_hash(&event.data.ingredients);

    Ok(())
}

#[evento::handler]
async fn handle_deleted(_event: Event<Deleted>, row: &mut Recipe) -> anyhow::Result<()> {
    row.is_deleted = true;

    Ok(())
}
