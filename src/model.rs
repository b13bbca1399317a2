use crate::interpret::is_truthy;
use serde_json::{Map, Value};

/// A named dish as served by the recipe endpoint.
///
/// Every field is optional: the endpoint is not trusted to send a complete
/// record, and a field of the wrong JSON shape is treated as missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    pub title: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub instructions: Option<String>,
}

impl Recipe {
    pub fn new(
        title: impl Into<String>,
        ingredients: impl IntoIterator<Item = impl Into<String>>,
        instructions: impl Into<String>,
    ) -> Self {
        Recipe {
            title: Some(title.into()),
            ingredients: Some(ingredients.into_iter().map(Into::into).collect()),
            instructions: Some(instructions.into()),
        }
    }

    /// Decode a recipe from an arbitrary JSON value without failing.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Recipe::default();
        };

        Recipe {
            // A falsy title (0, "", false) is treated as absent
            title: object
                .get("title")
                .filter(|value| is_truthy(value))
                .and_then(text_field),
            ingredients: object.get("ingredients").and_then(|value| {
                value
                    .as_array()
                    .map(|items| items.iter().map(item_text).collect())
            }),
            instructions: object.get("instructions").and_then(text_field),
        }
    }

    /// Title to show on a card, falling back to the collection key.
    pub fn display_title<'a>(&'a self, key: &'a str) -> &'a str {
        match self.title.as_deref() {
            Some(title) if !title.is_empty() => title,
            _ => key,
        }
    }
}

fn text_field(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn item_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Recipes keyed by name, in the order the endpoint listed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeCollection {
    entries: Vec<(String, Recipe)>,
}

impl RecipeCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_map(map: &Map<String, Value>) -> Self {
        map.iter()
            .map(|(name, value)| (name.clone(), Recipe::from_value(value)))
            .collect()
    }

    /// Fixed sample data shown when the endpoint only answers a status probe.
    pub fn placeholder() -> Self {
        [
            Recipe::new(
                "Caprese Salad",
                ["Tomatoes", "Mozzarella", "Basil"],
                "Arrange them.",
            ),
            Recipe::new(
                "Chicken Curry",
                ["Chicken", "Curry paste", "Coconut milk"],
                "Cook.",
            ),
        ]
        .into_iter()
        .map(|recipe| (recipe.title.clone().unwrap_or_default(), recipe))
        .collect()
    }

    /// Inserts a recipe, replacing an existing entry with the same name in place.
    pub fn insert(&mut self, name: impl Into<String>, recipe: Recipe) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, existing)) => *existing = recipe,
            None => self.entries.push((name, recipe)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Recipe> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, recipe)| recipe)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Recipe)> {
        self.entries
            .iter()
            .map(|(name, recipe)| (name.as_str(), recipe))
    }
}

impl FromIterator<(String, Recipe)> for RecipeCollection {
    fn from_iter<I: IntoIterator<Item = (String, Recipe)>>(iter: I) -> Self {
        let mut collection = RecipeCollection::new();
        for (name, recipe) in iter {
            collection.insert(name, recipe);
        }
        collection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_value_complete_recipe() {
        let value = json!({
            "title": "Tea",
            "ingredients": ["Water", "Leaves"],
            "instructions": "Boil."
        });

        let recipe = Recipe::from_value(&value);
        assert_eq!(recipe, Recipe::new("Tea", ["Water", "Leaves"], "Boil."));
    }

    #[test]
    fn test_from_value_wrong_shapes_become_missing() {
        let value = json!({
            "title": null,
            "ingredients": "Water, Leaves",
            "instructions": ["Boil."]
        });

        let recipe = Recipe::from_value(&value);
        assert_eq!(recipe, Recipe::default());
    }

    #[test]
    fn test_from_value_non_object() {
        assert_eq!(Recipe::from_value(&json!(5)), Recipe::default());
        assert_eq!(Recipe::from_value(&json!("OK")), Recipe::default());
    }

    #[test]
    fn test_non_string_ingredients_keep_their_json_text() {
        let recipe = Recipe::from_value(&json!({ "ingredients": ["Eggs", 2, true] }));
        assert_eq!(
            recipe.ingredients,
            Some(vec!["Eggs".to_string(), "2".to_string(), "true".to_string()])
        );
    }

    #[test]
    fn test_display_title_falls_back_to_key() {
        let untitled = Recipe::default();
        assert_eq!(untitled.display_title("Soup"), "Soup");

        let blank = Recipe {
            title: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(blank.display_title("Soup"), "Soup");

        let titled = Recipe::new("Tomato Soup", ["Tomatoes"], "Simmer.");
        assert_eq!(titled.display_title("Soup"), "Tomato Soup");
    }

    #[test]
    fn test_falsy_title_falls_back_to_key() {
        for title in [json!(0), json!(0.0), json!(""), json!(false)] {
            let recipe = Recipe::from_value(&json!({ "title": title }));
            assert_eq!(recipe.title, None, "title {title}");
            assert_eq!(recipe.display_title("Soup"), "Soup");
        }

        let numbered = Recipe::from_value(&json!({ "title": 42 }));
        assert_eq!(numbered.display_title("Soup"), "42");
    }

    #[test]
    fn test_from_map_preserves_endpoint_order() {
        let body = json!({
            "Zucchini Bread": {},
            "Apple Pie": {},
            "Mango Lassi": {}
        });

        let collection = RecipeCollection::from_map(body.as_object().unwrap());
        let names: Vec<_> = collection.names().collect();
        assert_eq!(names, ["Zucchini Bread", "Apple Pie", "Mango Lassi"]);
    }

    #[test]
    fn test_placeholder_has_two_entries() {
        let placeholder = RecipeCollection::placeholder();
        assert_eq!(placeholder.len(), 2);

        let salad = placeholder.get("Caprese Salad").unwrap();
        assert_eq!(
            salad.ingredients.as_deref(),
            Some(
                &[
                    "Tomatoes".to_string(),
                    "Mozzarella".to_string(),
                    "Basil".to_string()
                ][..]
            )
        );
        assert!(placeholder.get("Chicken Curry").is_some());
    }

    #[test]
    fn test_insert_replaces_in_place() {
        let mut collection = RecipeCollection::new();
        collection.insert("a", Recipe::default());
        collection.insert("b", Recipe::default());
        collection.insert("a", Recipe::new("A", ["x"], "y"));

        assert_eq!(collection.len(), 2);
        assert_eq!(collection.names().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(collection.get("a").unwrap().title.as_deref(), Some("A"));
    }
}
