use sea_query::{
    ColumnDef, Index, IndexCreateStatement, IndexDropStatement, Table, TableCreateStatement,
    TableDropStatement,
};

use crate::table::StockLot;

pub struct CreateTable;

fn create_table() -> TableCreateStatement {
    Table::create()
        .table(StockLot::Table)
        .col(
            ColumnDef::new(StockLot::PantryId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(
            ColumnDef::new(StockLot::IngredientId)
                .string()
                .not_null()
                .string_len(26),
        )
        .col(ColumnDef::new(StockLot::ExpiresOn).integer().not_null())
        .col(ColumnDef::new(StockLot::Quantity).double().not_null())
        .col(ColumnDef::new(StockLot::CreatedAt).big_integer().not_null())
        .col(ColumnDef::new(StockLot::UpdatedAt).big_integer().null())
        .primary_key(
            Index::create()
                .col(StockLot::PantryId)
                .col(StockLot::IngredientId)
                .col(StockLot::ExpiresOn),
        )
        .to_owned()
}

fn drop_table() -> TableDropStatement {
    Table::drop().table(StockLot::Table).to_owned()
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

pub struct CreateIngredientIdx;

fn create_ingredient_idx() -> IndexCreateStatement {
    Index::create()
        .name("idx_stock_lot_ingredient")
        .table(StockLot::Table)
        .col(StockLot::IngredientId)
        .to_owned()
}

fn drop_ingredient_idx() -> IndexDropStatement {
    Index::drop()
        .name("idx_stock_lot_ingredient")
        .table(StockLot::Table)
        .to_owned()
}

#[async_trait::async_trait]
impl sqlx_migrator::Operation<sqlx::Sqlite> for CreateIngredientIdx {
    async fn up(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = create_ingredient_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }

    async fn down(
        &self,
        connection: &mut sqlx::SqliteConnection,
    ) -> Result<(), sqlx_migrator::Error> {
        let statment = drop_ingredient_idx().to_string(sea_query::SqliteQueryBuilder);
        sqlx::query(&statment).execute(connection).await?;

        Ok(())
    }
}
