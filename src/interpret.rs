//! Turns a successful response body into recipes.
//!
//! The endpoint answers in one of two shapes: a map of recipe name to recipe,
//! or a bare status probe (`{"recipe_count": 5, "status": "OK"}`) that carries
//! no recipes at all. The probe is answered with placeholder recipes so the
//! catalog has something to show.

use crate::error::CatalogError;
use crate::model::RecipeCollection;
use log::{debug, warn};
use serde_json::Value;

/// Advisory attached to a load whose body held no usable recipe data.
pub const INVALID_DATA_ADVISORY: &str = "The API did not return valid recipe data.";

/// Recipes produced by one successful load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOutcome {
    pub recipes: RecipeCollection,
    /// Set when the body was unusable and `recipes` is empty because of it
    pub advisory: Option<String>,
}

impl FetchOutcome {
    pub fn recipes(recipes: RecipeCollection) -> Self {
        FetchOutcome {
            recipes,
            advisory: None,
        }
    }

    pub fn invalid_data() -> Self {
        FetchOutcome {
            recipes: RecipeCollection::new(),
            advisory: Some(INVALID_DATA_ADVISORY.to_string()),
        }
    }
}

/// Parse a raw body and interpret it.
pub fn interpret_body(body: &str) -> Result<FetchOutcome, CatalogError> {
    let data: Value = serde_json::from_str(body)?;
    Ok(interpret_value(&data))
}

pub fn interpret_value(data: &Value) -> FetchOutcome {
    match data.as_object() {
        Some(object) if !object.is_empty() => {
            if is_status_probe(data) {
                debug!("Endpoint answered a status probe, using placeholder recipes");
                FetchOutcome::recipes(RecipeCollection::placeholder())
            } else {
                FetchOutcome::recipes(RecipeCollection::from_map(object))
            }
        }
        _ => {
            warn!("Endpoint returned no recipe data: {}", data);
            FetchOutcome::invalid_data()
        }
    }
}

fn is_status_probe(data: &Value) -> bool {
    data.get("status").and_then(Value::as_str) == Some("OK")
        && data.get("recipe_count").is_some_and(is_truthy)
}

pub(crate) fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0 && !n.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
