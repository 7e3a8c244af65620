use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::IngredientName;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(IngredientName::Table)
        .col(
            ColumnDef::new(IngredientName::Id)
                .string()
                .not_null()
                .string_len(26)
                .primary_key(),
        )
        .col(
            ColumnDef::new(IngredientName::NameKey)
                .string()
                .not_null()
                .string_len(100),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(IngredientName::Table).to_owned()
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

pub struct CreateNameKeyIdx;

fn create_name_key_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_ingredient_name_key")
        .table(IngredientName::Table)
        .col(IngredientName::NameKey)
        .unique()
        .to_owned()
}

fn drop_name_key_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_ingredient_name_key")
        .table(IngredientName::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateNameKeyIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_name_key_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_name_key_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
