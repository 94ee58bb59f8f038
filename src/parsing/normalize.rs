use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

use super::ParseError;
use crate::nutrition::FoodItem;

const UNKNOWN_FOOD: &str = "Unknown food";

/// Item as the model returns it; every field may be missing.
#[derive(Debug, Deserialize)]
struct RawItem {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    calories: Option<Value>,
    #[serde(default)]
    protein: Option<Value>,
    #[serde(default)]
    fiber: Option<Value>,
    #[serde(default)]
    quantity: Option<Value>,
}

/// Removes Markdown code fences the model sometimes wraps its answer in.
pub fn unfence(content: &str) -> String {
    lazy_static! {
        static ref FENCE_RE: Regex = Regex::new(r"```(?:json)?\n?|\n?```").expect("fence pattern is valid");
    }
    FENCE_RE.replace_all(content, "").trim().to_string()
}

/// Accepts numbers and numeric strings ("120", " 4.5 "); anything else is 0.
fn whole(value: Option<Value>) -> f64 {
    let number = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    match number {
        Some(v) if v.is_finite() && v > 0.0 => v.round(),
        _ => 0.0,
    }
}

fn quantity(value: Option<Value>) -> Option<String> {
    match value? {
        Value::String(s) if !s.trim().is_empty() => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Turns the raw completion text into food items with fresh ids.
pub fn normalize_items(content: &str) -> Result<Vec<FoodItem>, ParseError> {
    let json = unfence(content);
    let raw: Vec<RawItem> =
        serde_json::from_str(&json).map_err(|e| ParseError::InvalidResponse(e.to_string()))?;

    Ok(raw
        .into_iter()
        .map(|r| FoodItem {
            id: Uuid::new_v4(),
            name: r
                .name
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty())
                .unwrap_or_else(|| UNKNOWN_FOOD.to_string()),
            calories: whole(r.calories),
            protein: whole(r.protein),
            fiber: whole(r.fiber),
            quantity: quantity(r.quantity),
        })
        .collect())
}
