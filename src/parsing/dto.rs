use serde::{Deserialize, Serialize};

use crate::nutrition::FoodItem;

#[derive(Debug, Deserialize)]
pub struct ParseMealRequest {
    #[serde(default)]
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ParseMealResponse {
    pub items: Vec<FoodItem>,
}
