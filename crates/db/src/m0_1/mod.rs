mod ingredient_list;
mod ingredient_name;
mod pantry;
mod recipe_ingredient;
mod recipe_list;
mod stock_lot;
mod user;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "main",
    "m0_1",
    vec_box![],
    vec_box![
        user::CreateTable,
        user::CreateEmailIdx,
        ingredient_name::CreateTable,
        ingredient_name::CreateNameKeyIdx,
        ingredient_list::CreateTable,
        recipe_list::CreateTable,
        recipe_list::CreateAuthorIdx,
        recipe_list::CreateCategoryIdx,
        recipe_ingredient::CreateTable,
        recipe_ingredient::CreateIngredientIdx,
        pantry::CreateTable,
        pantry::CreateUserIdx,
        stock_lot::CreateTable,
        stock_lot::CreateIngredientIdx,
    ]
);
