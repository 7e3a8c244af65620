use bitcode::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// One lot-level decrement inside an atomic consumption.
///
/// `expires_on` is a julian day number, the storage form of a calendar date.
#[derive(Encode, Decode, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LotDrain {
    pub ingredient_id: String,
    pub expires_on: i32,
    pub quantity: f64,
}

#[evento::aggregator]
pub enum Pantry {
    Opened {
        user_id: String,
    },

    LotAdded {
        ingredient_id: String,
        quantity: f64,
        expires_on: i32,
    },

    LotAdjusted {
        ingredient_id: String,
        expires_on: i32,
        quantity: f64,
        new_expires_on: i32,
    },

    LotRemoved {
        ingredient_id: String,
        expires_on: i32,
    },

    /// All lines of one consumption, committed as a single event so a
    /// multi-ingredient consumption is applied entirely or not at all.
    Consumed {
        drains: Vec<LotDrain>,
    },
}
