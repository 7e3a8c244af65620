use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum User {
    Table,
    Id,
    Name,
    Email,
    CreatedAt,
}

/// Write-side lookup table backing the case-insensitive ingredient
/// name uniqueness check.
#[derive(Iden, Clone)]
pub enum IngredientName {
    Table,
    Id,
    NameKey,
}

#[derive(Iden, Clone)]
pub enum IngredientList {
    Table,
    Id,
    Name,
    Unit,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeList {
    Table,
    Id,
    AuthorId,
    Name,
    Category,
    Instructions,
    IngredientCount,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden, Clone)]
pub enum RecipeIngredient {
    Table,
    RecipeId,
    IngredientId,
    Quantity,
}

/// Write-side mapping from a user to their pantry aggregate.
#[derive(Iden, Clone)]
pub enum Pantry {
    Table,
    Id,
    UserId,
    CreatedAt,
}

#[derive(Iden, Clone)]
pub enum StockLot {
    Table,
    PantryId,
    IngredientId,
    ExpiresOn,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
