// ABOUTME: Data models for shared recipes with creation drafts and partial updates
// ABOUTME: Defines Recipe, NewRecipe, RecipePatch, Difficulty, AuthorRef, and Substitution
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

use crate::constants::recipes::{
    DEFAULT_COOKING_TIME_MINS, DEFAULT_SERVINGS, MAX_RATING, RATING_STEP,
};
use crate::errors::{AppError, AppResult, ErrorCode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Cooking difficulty shown on recipe cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// Simple recipes, basic techniques
    Easy,
    /// Moderate complexity
    #[default]
    Medium,
    /// Advanced techniques required
    Hard,
}

impl Difficulty {
    /// Convert to the serialized string representation
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Self::Easy),
            "medium" => Ok(Self::Medium),
            "hard" => Ok(Self::Hard),
            other => Err(AppError::new(
                ErrorCode::InvalidFormat,
                format!("Unknown difficulty '{other}', expected easy, medium, or hard"),
            )),
        }
    }
}

/// Alternative ingredients for one original ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Substitution {
    /// Ingredient being replaced
    pub original: String,
    /// Suggested replacements
    pub alternatives: Vec<String>,
}

impl Substitution {
    /// Create a substitution entry
    #[must_use]
    pub fn new(original: impl Into<String>, alternatives: Vec<String>) -> Self {
        Self {
            original: original.into(),
            alternatives,
        }
    }
}

/// Author snapshot captured when a recipe is created
///
/// Never re-resolved against later identity changes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthorRef {
    /// Author identity ID
    pub id: String,
    /// Username at creation time
    pub username: String,
}

impl AuthorRef {
    /// Create an author snapshot
    #[must_use]
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
        }
    }
}

/// A shared recipe record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    /// Unique, immutable identifier
    pub id: String,
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: String,
    /// Image URL
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Number of servings
    pub servings: u32,
    /// Difficulty level
    pub difficulty: Difficulty,
    /// Ordered ingredient lines
    pub ingredients: Vec<String>,
    /// Ingredient substitutions
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub substitutions: Vec<Substitution>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Author snapshot, immutable
    pub author: AuthorRef,
    /// Creation timestamp, immutable
    pub created_at: DateTime<Utc>,
    /// Rating between 0 and 5
    pub rating: f64,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Dietary labels
    #[serde(default)]
    pub dietary_info: Vec<String>,
}

impl Recipe {
    /// Case-insensitive match of an already lowercased query against the title
    /// or any ingredient line
    #[must_use]
    pub fn matches_text(&self, lowered_query: &str) -> bool {
        if lowered_query.is_empty() {
            return true;
        }
        self.title.to_lowercase().contains(lowered_query)
            || self
                .ingredients
                .iter()
                .any(|ingredient| ingredient.to_lowercase().contains(lowered_query))
    }

    /// Exact dietary label membership
    #[must_use]
    pub fn has_dietary_label(&self, label: &str) -> bool {
        self.dietary_info.iter().any(|d| d == label)
    }

    /// Whether the recipe was created by the given identity
    #[must_use]
    pub fn is_authored_by(&self, author_id: &str) -> bool {
        self.author.id == author_id
    }

    /// Rating rounded to the nearest half star
    #[must_use]
    pub fn display_rating(&self) -> f64 {
        ((self.rating / RATING_STEP).round() * RATING_STEP).clamp(0.0, MAX_RATING)
    }
}

/// Recipe payload without `id` and `created_at`, as submitted by the create form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRecipe {
    /// Recipe title
    pub title: String,
    /// Short description
    pub description: String,
    /// Image URL
    pub image: String,
    /// Cooking time in minutes
    pub cooking_time: u32,
    /// Number of servings
    pub servings: u32,
    /// Difficulty level
    #[serde(default)]
    pub difficulty: Difficulty,
    /// Ordered ingredient lines
    pub ingredients: Vec<String>,
    /// Ordered instruction steps
    pub instructions: Vec<String>,
    /// Ingredient substitutions
    #[serde(default)]
    pub substitutions: Vec<Substitution>,
    /// Author snapshot
    pub author: AuthorRef,
    /// Initial rating
    #[serde(default)]
    pub rating: f64,
    /// Free-form tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Dietary labels
    #[serde(default)]
    pub dietary_info: Vec<String>,
}

impl NewRecipe {
    /// Start a draft with the create form's defaults
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
        author: AuthorRef,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
            cooking_time: DEFAULT_COOKING_TIME_MINS,
            servings: DEFAULT_SERVINGS,
            difficulty: Difficulty::default(),
            ingredients: Vec::new(),
            instructions: Vec::new(),
            substitutions: Vec::new(),
            author,
            rating: 0.0,
            tags: Vec::new(),
            dietary_info: Vec::new(),
        }
    }

    /// Set cooking time in minutes
    #[must_use]
    pub const fn with_cooking_time(mut self, mins: u32) -> Self {
        self.cooking_time = mins;
        self
    }

    /// Set number of servings
    #[must_use]
    pub const fn with_servings(mut self, servings: u32) -> Self {
        self.servings = servings;
        self
    }

    /// Set difficulty
    #[must_use]
    pub const fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }

    /// Add an ingredient line
    #[must_use]
    pub fn with_ingredient(mut self, ingredient: impl Into<String>) -> Self {
        self.ingredients.push(ingredient.into());
        self
    }

    /// Add an instruction step
    #[must_use]
    pub fn with_instruction(mut self, step: impl Into<String>) -> Self {
        self.instructions.push(step.into());
        self
    }

    /// Add a substitution
    #[must_use]
    pub fn with_substitution(mut self, substitution: Substitution) -> Self {
        self.substitutions.push(substitution);
        self
    }

    /// Add a tag
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Add a dietary label
    #[must_use]
    pub fn with_dietary_label(mut self, label: impl Into<String>) -> Self {
        self.dietary_info.push(label.into());
        self
    }

    /// Set initial rating
    #[must_use]
    pub const fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Validate required fields
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty title, description, image, or
    /// author ID, an empty ingredient or instruction list, any empty entry,
    /// a zero cooking time or serving count, or an out-of-range rating
    pub fn validate(&self) -> AppResult<()> {
        require_text("title", &self.title)?;
        require_text("description", &self.description)?;
        require_text("image", &self.image)?;
        require_text("author.id", &self.author.id)?;
        require_entries("ingredients", &self.ingredients)?;
        require_entries("instructions", &self.instructions)?;
        require_positive("cookingTime", self.cooking_time)?;
        require_positive("servings", self.servings)?;
        validate_rating(self.rating)
    }

    /// Materialize the record with its assigned identity and timestamp
    #[must_use]
    pub fn into_recipe(self, id: String, created_at: DateTime<Utc>) -> Recipe {
        Recipe {
            id,
            title: self.title,
            description: self.description,
            image: self.image,
            cooking_time: self.cooking_time,
            servings: self.servings,
            difficulty: self.difficulty,
            ingredients: self.ingredients,
            substitutions: self.substitutions,
            instructions: self.instructions,
            author: self.author,
            created_at,
            rating: self.rating,
            tags: dedup_preserving_order(self.tags),
            dietary_info: dedup_preserving_order(self.dietary_info),
        }
    }
}

/// Partial update; `None` fields are retained from the stored record
///
/// `id`, `author`, and `created_at` are deliberately absent: they never change
/// after creation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecipePatch {
    /// New title
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// New cooking time
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cooking_time: Option<u32>,
    /// New servings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servings: Option<u32>,
    /// New difficulty
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
    /// Replacement ingredient list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,
    /// Replacement instruction list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instructions: Option<Vec<String>>,
    /// Replacement substitutions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substitutions: Option<Vec<Substitution>>,
    /// New rating
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    /// Replacement tags
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Replacement dietary labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dietary_info: Option<Vec<String>>,
}

impl RecipePatch {
    /// Patch that only replaces the title
    #[must_use]
    pub fn title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// True when no field would change
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.cooking_time.is_none()
            && self.servings.is_none()
            && self.difficulty.is_none()
            && self.ingredients.is_none()
            && self.instructions.is_none()
            && self.substitutions.is_none()
            && self.rating.is_none()
            && self.tags.is_none()
            && self.dietary_info.is_none()
    }

    /// Validate the fields that are present
    ///
    /// # Errors
    ///
    /// Returns a validation error under the same rules as [`NewRecipe::validate`]
    pub fn validate(&self) -> AppResult<()> {
        if let Some(title) = &self.title {
            require_text("title", title)?;
        }
        if let Some(description) = &self.description {
            require_text("description", description)?;
        }
        if let Some(image) = &self.image {
            require_text("image", image)?;
        }
        if let Some(ingredients) = &self.ingredients {
            require_entries("ingredients", ingredients)?;
        }
        if let Some(instructions) = &self.instructions {
            require_entries("instructions", instructions)?;
        }
        if let Some(mins) = self.cooking_time {
            require_positive("cookingTime", mins)?;
        }
        if let Some(servings) = self.servings {
            require_positive("servings", servings)?;
        }
        if let Some(rating) = self.rating {
            validate_rating(rating)?;
        }
        Ok(())
    }

    /// Field-wise overwrite of `recipe` with the present fields
    pub fn apply_to(self, recipe: &mut Recipe) {
        if let Some(title) = self.title {
            recipe.title = title;
        }
        if let Some(description) = self.description {
            recipe.description = description;
        }
        if let Some(image) = self.image {
            recipe.image = image;
        }
        if let Some(mins) = self.cooking_time {
            recipe.cooking_time = mins;
        }
        if let Some(servings) = self.servings {
            recipe.servings = servings;
        }
        if let Some(difficulty) = self.difficulty {
            recipe.difficulty = difficulty;
        }
        if let Some(ingredients) = self.ingredients {
            recipe.ingredients = ingredients;
        }
        if let Some(instructions) = self.instructions {
            recipe.instructions = instructions;
        }
        if let Some(substitutions) = self.substitutions {
            recipe.substitutions = substitutions;
        }
        if let Some(rating) = self.rating {
            recipe.rating = rating;
        }
        if let Some(tags) = self.tags {
            recipe.tags = dedup_preserving_order(tags);
        }
        if let Some(dietary_info) = self.dietary_info {
            recipe.dietary_info = dedup_preserving_order(dietary_info);
        }
    }
}

fn require_text(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

fn require_entries(field: &str, entries: &[String]) -> AppResult<()> {
    if entries.is_empty() {
        return Err(AppError::missing_field(field));
    }
    if let Some(position) = entries.iter().position(|e| e.trim().is_empty()) {
        return Err(AppError::new(
            ErrorCode::MissingRequiredField,
            format!("Please fill in all {field} (entry {} is empty)", position + 1),
        )
        .with_details(serde_json::json!({ "field": field, "index": position })));
    }
    Ok(())
}

fn require_positive(field: &str, value: u32) -> AppResult<()> {
    if value == 0 {
        return Err(AppError::out_of_range(
            field,
            format!("Field '{field}' must be a positive number"),
        ));
    }
    Ok(())
}

fn validate_rating(rating: f64) -> AppResult<()> {
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(AppError::out_of_range(
            "rating",
            format!("Rating must be between 0 and {MAX_RATING}, got {rating}"),
        ));
    }
    Ok(())
}

/// Drop repeated labels while keeping first-seen order
fn dedup_preserving_order(values: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::with_capacity(values.len());
    values
        .into_iter()
        .filter(|value| seen.insert(value.clone()))
        .collect()
}
