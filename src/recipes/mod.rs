pub(crate) mod client;
pub(crate) mod filter;

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Numbered ingredient/measure slots in an API meal record.
const INGREDIENT_SLOTS: usize = 20;

pub const DEFAULT_COOKING_MINUTES: u32 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub name: String,
    pub measure: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "MealRecord")]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub instructions: Option<String>,
    pub youtube: Option<String>,
    pub tags: Option<String>,
    pub ingredients: Vec<Ingredient>,
}

impl Recipe {
    pub fn summary(&self) -> RecipeSummary {
        RecipeSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            thumbnail: self.thumbnail.clone(),
            category: self.category.clone(),
            area: self.area.clone(),
        }
    }

    pub fn tags(&self) -> Vec<&str> {
        self.tags
            .iter()
            .flat_map(|tags| tags.split(','))
            .map(str::trim)
            .filter(|tag| !tag.is_empty())
            .collect()
    }
}

/// Meal record as the API sends it.
#[derive(Deserialize)]
struct MealRecord {
    #[serde(rename = "idMeal")]
    id: String,
    #[serde(rename = "strMeal")]
    name: String,
    #[serde(rename = "strMealThumb", default)]
    thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    category: Option<String>,
    #[serde(rename = "strArea", default)]
    area: Option<String>,
    #[serde(rename = "strInstructions", default)]
    instructions: Option<String>,
    #[serde(rename = "strYoutube", default)]
    youtube: Option<String>,
    #[serde(rename = "strTags", default)]
    tags: Option<String>,
    #[serde(flatten)]
    rest: HashMap<String, serde_json::Value>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

impl From<MealRecord> for Recipe {
    fn from(mut record: MealRecord) -> Self {
        let mut slot = |key: String| match record.rest.remove(&key) {
            Some(serde_json::Value::String(value)) => value.trim().to_owned(),
            _ => String::new(),
        };

        let ingredients = (1..=INGREDIENT_SLOTS)
            .filter_map(|index| {
                let name = slot(format!("strIngredient{index}"));
                let measure = slot(format!("strMeasure{index}"));
                (!name.is_empty()).then_some(Ingredient { name, measure })
            })
            .collect();

        Self {
            id: record.id,
            name: record.name,
            thumbnail: non_blank(record.thumbnail),
            category: non_blank(record.category),
            area: non_blank(record.area),
            instructions: non_blank(record.instructions),
            youtube: non_blank(record.youtube),
            tags: non_blank(record.tags),
            ingredients,
        }
    }
}

/// The reduced record that the filter endpoints return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeSummary {
    #[serde(rename = "idMeal")]
    pub id: String,
    #[serde(rename = "strMeal")]
    pub name: String,
    #[serde(rename = "strMealThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategory", default)]
    pub category: Option<String>,
    #[serde(rename = "strArea", default)]
    pub area: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Category {
    #[serde(rename = "idCategory")]
    pub id: String,
    #[serde(rename = "strCategory")]
    pub name: String,
    #[serde(rename = "strCategoryThumb", default)]
    pub thumbnail: Option<String>,
    #[serde(rename = "strCategoryDescription", default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Area {
    #[serde(rename = "strArea")]
    pub name: String,
}

/// Rough preparation time in minutes, from category and recipe size.
pub fn estimate_cooking_time(recipe: Option<&Recipe>) -> u32 {
    let Some(recipe) = recipe else {
        return DEFAULT_COOKING_MINUTES;
    };

    let category = recipe
        .category
        .as_deref()
        .unwrap_or_default()
        .to_lowercase();
    let ingredient_count = recipe.ingredients.len();
    let instructions_length = recipe
        .instructions
        .as_deref()
        .map_or(0, |text| text.chars().count());

    let mut minutes = DEFAULT_COOKING_MINUTES;
    // Later category checks override earlier ones.
    if category.contains("dessert") || category.contains("pasta") {
        minutes = 45;
    }
    if category.contains("starter") || category.contains("breakfast") {
        minutes = 20;
    }
    if category.contains("beef") || category.contains("pork") {
        minutes = 60;
    }

    if ingredient_count > 15 || instructions_length > 1000 {
        minutes += 15;
    }
    if ingredient_count > 10 || instructions_length > 500 {
        minutes += 10;
    }

    minutes
}

static SENTENCE_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\.\s+[A-Z]").expect("sentence break pattern is valid"));

/// Splits free-form instructions into steps.
///
/// Line breaks separate steps. Text without line breaks is split into
/// sentences instead, at a full stop followed by whitespace and a capital.
pub fn instruction_steps(instructions: &str) -> Vec<String> {
    let lines: Vec<String> = instructions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect();
    if lines.len() > 1 {
        return lines;
    }

    let mut steps = Vec::new();
    let mut start = 0;
    for found in SENTENCE_BREAK.find_iter(instructions) {
        push_sentence(&mut steps, &instructions[start..found.start()]);
        // The capital is a single byte, and begins the next sentence.
        start = found.end() - 1;
    }
    push_sentence(&mut steps, &instructions[start..]);
    steps
}

fn push_sentence(steps: &mut Vec<String>, sentence: &str) {
    let sentence = sentence.trim();
    if sentence.is_empty() {
        return;
    }
    if sentence.ends_with('.') {
        steps.push(sentence.to_owned());
    } else {
        steps.push(format!("{sentence}."));
    }
}
