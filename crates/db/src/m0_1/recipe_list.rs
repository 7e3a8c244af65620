use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::RecipeList;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(RecipeList::Table)
        .col(
            ColumnDef::new(RecipeList::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(RecipeList::AuthorId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(RecipeList::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(RecipeList::Category)
                .string()
                .not_null()
                .string_len(25),
        )
        .col(
            ColumnDef::new(RecipeList::Instructions)
                .string()
                .not_null()
                .string_len(5000)
                .default(""),
        )
        .col(
            ColumnDef::new(RecipeList::IngredientCount)
                .integer()
                .not_null()
                .default(0),
        )
        .col(
            ColumnDef::new(RecipeList::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(ColumnDef::new(RecipeList::UpdatedAt).big_integer().null())
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(RecipeList::Table).to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateTable {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_table().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateAuthorIdx;

fn create_author_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_list_author")
        .table(RecipeList::Table)
        .col(RecipeList::AuthorId)
        .to_owned()
}

fn drop_author_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_list_author")
        .table(RecipeList::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateAuthorIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_author_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_author_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}

pub struct CreateCategoryIdx;

fn create_category_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_recipe_list_category")
        .table(RecipeList::Table)
        .col(RecipeList::Category)
        .to_owned()
}

fn drop_category_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_recipe_list_category")
        .table(RecipeList::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateCategoryIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_category_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_category_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
