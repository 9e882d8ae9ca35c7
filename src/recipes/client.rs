use anyhow::{Context, Result};
use futures_util::{StreamExt, stream};
use itertools::Itertools;
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use super::{Area, Category, Recipe, RecipeSummary};
use crate::cache::{ResponseCache, ResponseCacheKey};

pub const DEFAULT_API_BASE: &str = "https://www.themealdb.com/api/json/v1/1";

const CONCURRENT_REQUESTS: usize = 4;

#[derive(Deserialize)]
struct Meals<T> {
    meals: Option<Vec<T>>,
}

#[derive(Deserialize)]
struct Categories {
    categories: Option<Vec<Category>>,
}

/// Specific API ingredient names to query for a generic pantry ingredient.
pub fn search_terms(ingredient: &str) -> Vec<String> {
    let variants: &[&str] = match ingredient.trim().to_lowercase().as_str() {
        "pasta" => &[
            "Spaghetti",
            "Penne",
            "Rigatoni",
            "Linguine",
            "Fettuccine",
            "Tagliatelle",
            "Pasta",
            "Lasagne",
            "Macaroni",
        ],
        "noodles" => &["Rice Noodles", "Egg Noodles", "Noodles"],
        "cheese" => &["Parmesan", "Cheddar", "Mozzarella", "Feta", "Cheese"],
        "peppers" => &[
            "Red Pepper",
            "Green Pepper",
            "Bell Pepper",
            "Red Chile",
            "Green Chile",
        ],
        "mushrooms" => &["Mushroom", "Mushrooms"],
        "tomatoes" => &["Tomato", "Cherry Tomatoes", "Tomatoes"],
        "potatoes" => &["Potato", "Sweet Potato", "Potatoes"],
        "onions" => &["Onion", "Red Onion", "Spring Onions", "Onions"],
        _ => return vec![ingredient.trim().to_owned()],
    };
    variants.iter().map(|variant| (*variant).to_owned()).collect()
}

/// Flattens result batches, keeping the first record seen for each id.
pub fn merge_unique(batches: Vec<Vec<RecipeSummary>>) -> Vec<RecipeSummary> {
    batches
        .into_iter()
        .flatten()
        .unique_by(|recipe| recipe.id.clone())
        .collect()
}

/// Client for TheMealDB.
///
/// Failed requests are logged and come back as empty results, so callers
/// never see a transport or decoding error.
pub struct MealDbClient {
    http: reqwest::Client,
    base_url: String,
    cache: Option<ResponseCache>,
}

impl MealDbClient {
    pub fn new(base_url: impl Into<String>, cache: Option<ResponseCache>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            cache,
        }
    }

    pub fn endpoint_url(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Url> {
        let base = self.base_url.trim_end_matches('/');
        let mut url = Url::parse(&format!("{base}/{endpoint}"))
            .with_context(|| format!("Invalid recipe API URL for `{endpoint}`"))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        cacheable: bool,
    ) -> Result<T> {
        let url = self.endpoint_url(endpoint, query)?;
        let key = ResponseCacheKey::for_url(url.as_str());
        let cache = self.cache.as_ref().filter(|_| cacheable);

        if let Some(cache) = cache {
            if let Some(body) = cache.get(&key).await {
                if let Ok(value) = serde_json::from_slice(&body) {
                    tracing::debug!(%url, "Using cached response");
                    return Ok(value);
                }
            }
        }

        let body = self
            .http
            .get(url.clone())
            .send()
            .await
            .context("Failed to send request to recipe API")?
            .error_for_status()
            .context("Recipe API error")?
            .bytes()
            .await
            .context("Failed to read recipe API response")?;

        let value = serde_json::from_slice(&body)
            .with_context(|| format!("Failed to parse recipe API response from {url}"))?;

        if let Some(cache) = cache {
            cache.insert(key, &body).await;
        }
        Ok(value)
    }

    async fn meals<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
        cacheable: bool,
    ) -> Vec<T> {
        match self.fetch::<Meals<T>>(endpoint, query, cacheable).await {
            Ok(response) => response.meals.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(endpoint, error = %format!("{error:#}"), "Recipe API request failed");
                Vec::new()
            }
        }
    }

    pub async fn categories(&self) -> Vec<Category> {
        match self.fetch::<Categories>("categories.php", &[], true).await {
            Ok(response) => response.categories.unwrap_or_default(),
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "Failed to fetch categories");
                Vec::new()
            }
        }
    }

    pub async fn areas(&self) -> Vec<Area> {
        self.meals("list.php", &[("a", "list")], true).await
    }

    pub async fn search(&self, name: &str) -> Vec<Recipe> {
        self.meals("search.php", &[("s", name)], true).await
    }

    pub async fn random(&self) -> Option<Recipe> {
        self.meals("random.php", &[], false).await.into_iter().next()
    }

    /// Up to `count` random recipes, without repeats.
    pub async fn random_selection(&self, count: usize) -> Vec<Recipe> {
        let picks: Vec<Option<Recipe>> = stream::iter(0..count)
            .map(|_| self.random())
            .buffered(CONCURRENT_REQUESTS)
            .collect()
            .await;

        picks
            .into_iter()
            .flatten()
            .unique_by(|recipe| recipe.id.clone())
            .collect()
    }

    pub async fn lookup(&self, id: &str) -> Option<Recipe> {
        self.meals("lookup.php", &[("i", id)], true)
            .await
            .into_iter()
            .next()
    }

    pub async fn filter_by_category(&self, category: &str) -> Vec<RecipeSummary> {
        let mut recipes: Vec<RecipeSummary> =
            self.meals("filter.php", &[("c", category)], true).await;
        for recipe in &mut recipes {
            recipe.category.get_or_insert_with(|| category.to_owned());
        }
        recipes
    }

    pub async fn filter_by_area(&self, area: &str) -> Vec<RecipeSummary> {
        let mut recipes: Vec<RecipeSummary> = self.meals("filter.php", &[("a", area)], true).await;
        for recipe in &mut recipes {
            recipe.area.get_or_insert_with(|| area.to_owned());
        }
        recipes
    }

    pub async fn filter_by_ingredient(&self, ingredient: &str) -> Vec<RecipeSummary> {
        self.meals("filter.php", &[("i", ingredient)], true).await
    }

    /// Recipes using any of the ingredients, generic names expanded to
    /// their specific variants.
    pub async fn filter_by_ingredients(&self, ingredients: &[String]) -> Vec<RecipeSummary> {
        let terms: Vec<String> = ingredients
            .iter()
            .flat_map(|ingredient| search_terms(ingredient))
            .unique()
            .collect();
        tracing::debug!(?terms, "Searching recipes by ingredient");

        let batches: Vec<Vec<RecipeSummary>> = stream::iter(&terms)
            .map(|term| self.filter_by_ingredient(term))
            .buffered(CONCURRENT_REQUESTS)
            .collect()
            .await;

        merge_unique(batches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(id: &str, name: &str) -> RecipeSummary {
        RecipeSummary {
            id: id.to_owned(),
            name: name.to_owned(),
            thumbnail: None,
            category: None,
            area: None,
        }
    }

    #[test]
    fn generic_ingredients_expand() {
        assert_eq!(search_terms("Mushrooms"), ["Mushroom", "Mushrooms"]);
        assert_eq!(search_terms("pasta").len(), 9);
        assert_eq!(search_terms(" Chicken "), ["Chicken"]);
    }

    #[test]
    fn merge_keeps_first_seen() {
        let merged = merge_unique(vec![
            vec![summary("1", "Carbonara"), summary("2", "Lasagne")],
            vec![summary("2", "Lasagne again"), summary("3", "Pesto")],
        ]);
        let names: Vec<_> = merged.iter().map(|recipe| recipe.name.as_str()).collect();
        assert_eq!(names, ["Carbonara", "Lasagne", "Pesto"]);
    }

    #[test]
    fn builds_encoded_urls() {
        let client = MealDbClient::new("https://api.test/json/v1/1/", None);
        let url = client
            .endpoint_url("filter.php", &[("i", "Chicken Breast")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.test/json/v1/1/filter.php?i=Chicken+Breast"
        );

        let url = client.endpoint_url("random.php", &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.test/json/v1/1/random.php");
    }

    #[test]
    fn null_meals_is_empty() {
        let response: Meals<RecipeSummary> = serde_json::from_str(r#"{"meals":null}"#).unwrap();
        assert!(response.meals.unwrap_or_default().is_empty());
    }

    #[tokio::test]
    async fn unreachable_api_yields_empty_results() {
        let client = MealDbClient::new("http://127.0.0.1:9", None);
        assert!(client.categories().await.is_empty());
        assert!(client.lookup("52772").await.is_none());
        assert!(
            client
                .filter_by_ingredients(&["onions".to_owned()])
                .await
                .is_empty()
        );
    }
}
