use sea_query::{ColumnDef, Table, TableCreateStatement, TableDropStatement};

use crate::table::IngredientList;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(IngredientList::Table)
        .col(
            ColumnDef::new(IngredientList::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(IngredientList::Name)
                .string()
                .not_null()
                .string_len(100),
        )
        .col(
            ColumnDef::new(IngredientList::Unit)
                .string()
                .not_null()
                .string_len(10),
        )
        .col(
            ColumnDef::new(IngredientList::CreatedAt)
                .big_integer()
                .not_null(),
        )
        .col(
            ColumnDef::new(IngredientList::UpdatedAt)
                .big_integer()
                .null(),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(IngredientList::Table).to_owned()
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
