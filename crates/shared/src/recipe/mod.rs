use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantArray};

#[derive(
    Encode,
    Decode,
    EnumString,
    Display,
    VariantArray,
    Default,
    Clone,
    Debug,
    PartialEq,
    Serialize,
    Deserialize,
    AsRefStr,
)]
pub enum Category {
    Breakfast,
    #[default]
    MainCourse,
    Dessert,
    Snack,
    Drink,
    Salad,
    Soup,
}

#[derive(Encode, Decode, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub ingredient_id: String,
    pub quantity: f64,
}

#[evento::aggregator]
pub enum Recipe {
    Created {
        name: String,
        instructions: String,
        category: Category,
        ingredients: Vec<RecipeLine>,
    },

    BasicInformationChanged {
        name: String,
        instructions: String,
        category: Category,
    },

    IngredientsReplaced {
        ingredients: Vec<RecipeLine>,
    },

    Deleted,
}
