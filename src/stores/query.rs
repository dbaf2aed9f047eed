// ABOUTME: Composable recipe query combining text search with a dietary filter
// ABOUTME: Both criteria are optional and combine with logical AND
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::models::Recipe;
use serde::{Deserialize, Serialize};

/// Search text AND dietary label
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeQuery {
    /// Case-insensitive substring of the title or any ingredient
    #[serde(default)]
    pub text: String,
    /// Exact dietary label
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
}

impl RecipeQuery {
    /// Query matching every recipe
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Set the search text
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Set the dietary label; an empty label clears the filter
    #[must_use]
    pub fn with_diet(mut self, diet: impl Into<String>) -> Self {
        let diet = diet.into();
        self.diet = (!diet.is_empty()).then_some(diet);
        self
    }

    /// Whether neither criterion is set
    #[must_use]
    pub fn is_unfiltered(&self) -> bool {
        self.text.is_empty() && self.diet.as_deref().is_none_or(str::is_empty)
    }

    /// Build a reusable matcher with the text lowercased once
    #[must_use]
    pub fn matcher(&self) -> impl Fn(&Recipe) -> bool + '_ {
        let lowered = self.text.to_lowercase();
        move |recipe| {
            recipe.matches_text(&lowered)
                && self
                    .diet
                    .as_deref()
                    .filter(|d| !d.is_empty())
                    .is_none_or(|d| recipe.has_dietary_label(d))
        }
    }

    /// Whether `recipe` satisfies both criteria
    #[must_use]
    pub fn matches(&self, recipe: &Recipe) -> bool {
        (self.matcher())(recipe)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorRef, NewRecipe};
    use chrono::Utc;

    fn recipe(title: &str, ingredient: &str, diet: &str) -> Recipe {
        NewRecipe::new(title, "d", "i.jpg", AuthorRef::new("u1", "n"))
            .with_ingredient(ingredient)
            .with_instruction("cook")
            .with_dietary_label(diet)
            .into_recipe(title.to_lowercase(), Utc::now())
    }

    #[test]
    fn test_text_and_diet_combine() {
        let curry = recipe("Thai Curry", "Coconut milk", "Vegan");
        let pizza = recipe("Margherita Pizza", "Mozzarella", "Vegetarian");

        let query = RecipeQuery::all().with_text("COCONUT").with_diet("Vegan");
        assert!(query.matches(&curry));
        assert!(!query.matches(&pizza));

        let query = RecipeQuery::all().with_text("pizza").with_diet("Vegan");
        assert!(!query.matches(&pizza));
    }

    #[test]
    fn test_empty_query_is_unfiltered() {
        let query = RecipeQuery::all().with_text("").with_diet("");
        assert!(query.is_unfiltered());
        assert!(query.diet.is_none());
        assert!(query.matches(&recipe("Anything", "x", "Keto")));
    }

    #[test]
    fn test_whitespace_text_is_matched_literally() {
        let query = RecipeQuery::all().with_text("  ");
        assert!(!query.is_unfiltered());
        assert!(!query.matches(&recipe("Anything", "x", "Keto")));
        assert!(query.matches(&recipe("Pad  Thai", "noodles", "Vegan")));
    }
}
