use std::collections::HashMap;

use larder_db::table::{IngredientList, RecipeIngredient, StockLot};
use larder_shared::ingredient::Unit;
use sea_query::{Asterisk, Expr, ExprTrait, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::prelude::FromRow;

/// Reference counts guarding ingredient deletion.
#[derive(Debug, Default)]
pub struct IngredientUsage {
    pub recipe_count: i64,
    pub stock_count: i64,
}

#[derive(Debug, Default, FromRow)]
pub struct IngredientStat {
    pub id: String,
    pub name: String,
    pub unit: sqlx::types::Text<Unit>,
    pub recipe_count: i64,
    pub stock_count: i64,
}

impl super::Query {
    pub async fn find_usage(
        &self,
        ingredient_id: impl Into<String>,
    ) -> anyhow::Result<IngredientUsage> {
        let ingredient_id = ingredient_id.into();

        let statement = Query::select()
            .expr(Expr::col(Asterisk).count())
            .from(RecipeIngredient::Table)
            .and_where(Expr::col(RecipeIngredient::IngredientId).eq(&ingredient_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (recipe_count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        let statement = Query::select()
            .expr(Expr::col(Asterisk).count())
            .from(StockLot::Table)
            .and_where(Expr::col(StockLot::IngredientId).eq(&ingredient_id))
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let (stock_count,) = sqlx::query_as_with::<_, (i64,), _>(&sql, values)
            .fetch_one(&self.0)
            .await?;

        Ok(IngredientUsage {
            recipe_count,
            stock_count,
        })
    }

    pub async fn stats(&self) -> anyhow::Result<Vec<IngredientStat>> {
        let statement = Query::select()
            .columns([
                IngredientList::Id,
                IngredientList::Name,
                IngredientList::Unit,
            ])
            .from(IngredientList::Table)
            .order_by(IngredientList::Name, sea_query::Order::Asc)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let rows = sqlx::query_as_with::<_, (String, String, sqlx::types::Text<Unit>), _>(
            &sql, values,
        )
        .fetch_all(&self.0)
        .await?;

        let statement = Query::select()
            .column(RecipeIngredient::IngredientId)
            .expr(Expr::col(Asterisk).count())
            .from(RecipeIngredient::Table)
            .group_by_col(RecipeIngredient::IngredientId)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let recipe_counts: HashMap<String, i64> =
            sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
                .fetch_all(&self.0)
                .await?
                .into_iter()
                .collect();

        let statement = Query::select()
            .column(StockLot::IngredientId)
            .expr(Expr::col(Asterisk).count())
            .from(StockLot::Table)
            .group_by_col(StockLot::IngredientId)
            .to_owned();

        let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
        let stock_counts: HashMap<String, i64> =
            sqlx::query_as_with::<_, (String, i64), _>(&sql, values)
                .fetch_all(&self.0)
                .await?
                .into_iter()
                .collect();

        Ok(rows
            .into_iter()
            .map(|(id, name, unit)| IngredientStat {
                recipe_count: recipe_counts.get(&id).copied().unwrap_or(0),
                stock_count: stock_counts.get(&id).copied().unwrap_or(0),
                id,
                name,
                unit,
            })
            .collect())
    }
}
