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
pub enum Unit {
    #[default]
    G,
    Kg,
    Ml,
    L,
    Un,
}

#[evento::aggregator]
pub enum Ingredient {
    Registered { name: String, unit: Unit },
    Renamed { name: String },
    UnitChanged { unit: Unit },
    Deleted,
}

/// Case-insensitive key under which an ingredient name is unique.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}
