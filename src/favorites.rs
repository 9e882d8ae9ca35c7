use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::recipes::Recipe;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Favorite {
    pub id: String,
    pub name: String,
    pub thumbnail: Option<String>,
    pub added_at: DateTime<Utc>,
}

impl From<&Recipe> for Favorite {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id.clone(),
            name: recipe.name.clone(),
            thumbnail: recipe.thumbnail.clone(),
            added_at: Utc::now(),
        }
    }
}

/// Favorite recipes, in the order they were added, saved to a JSON file
/// after every change.
#[derive(Debug)]
pub struct FavoritesStore {
    path: PathBuf,
    favorites: Vec<Favorite>,
}

pub fn default_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().context("Failed to determine data directory")?;
    Ok(data_dir
        .join(env!("CARGO_CRATE_NAME"))
        .join("favorites.json"))
}

impl FavoritesStore {
    pub async fn load(path: PathBuf) -> Result<Self> {
        let favorites = match tokio::fs::read(&path).await {
            Ok(data) => serde_json::from_slice(&data)
                .with_context(|| format!("Failed to parse favorites file {}", path.display()))?,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(error) => {
                return Err(error)
                    .with_context(|| format!("Failed to read favorites file {}", path.display()));
            }
        };

        Ok(Self { path, favorites })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn list(&self) -> &[Favorite] {
        &self.favorites
    }

    pub fn contains(&self, id: &str) -> bool {
        self.favorites.iter().any(|favorite| favorite.id == id)
    }

    /// Returns false when the recipe was already a favorite.
    pub async fn add(&mut self, favorite: Favorite) -> Result<bool> {
        if self.contains(&favorite.id) {
            return Ok(false);
        }
        self.favorites.push(favorite);
        self.save().await?;
        Ok(true)
    }

    /// Returns false when the recipe was not a favorite.
    pub async fn remove(&mut self, id: &str) -> Result<bool> {
        let before = self.favorites.len();
        self.favorites.retain(|favorite| favorite.id != id);
        if self.favorites.len() == before {
            return Ok(false);
        }
        self.save().await?;
        Ok(true)
    }

    /// Flips the favorite state of a recipe, returning the new state.
    pub async fn toggle(&mut self, recipe: &Recipe) -> Result<bool> {
        if self.contains(&recipe.id) {
            self.remove(&recipe.id).await?;
            Ok(false)
        } else {
            self.add(Favorite::from(recipe)).await?;
            Ok(true)
        }
    }

    async fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .context("Failed to create favorites directory")?;
        }
        let serialized = serde_json::to_vec_pretty(&self.favorites)?;
        tokio::fs::write(&self.path, serialized)
            .await
            .with_context(|| format!("Failed to write favorites file {}", self.path.display()))?;

        tracing::debug!(count = self.favorites.len(), path = %self.path.display(), "Saved favorites");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(id: &str, name: &str) -> Recipe {
        Recipe {
            id: id.to_owned(),
            name: name.to_owned(),
            thumbnail: Some(format!("https://img.test/{id}.jpg")),
            category: None,
            area: None,
            instructions: None,
            youtube: None,
            tags: None,
            ingredients: Vec::new(),
        }
    }

    fn ids(store: &FavoritesStore) -> Vec<&str> {
        store.list().iter().map(|favorite| favorite.id.as_str()).collect()
    }

    #[tokio::test]
    async fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FavoritesStore::load(dir.path().join("favorites.json"))
            .await
            .unwrap();
        assert!(store.list().is_empty());
        assert!(!store.contains("52772"));
    }

    #[tokio::test]
    async fn changes_survive_reload_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("favorites.json");

        let mut store = FavoritesStore::load(path.clone()).await.unwrap();
        assert!(store.add(Favorite::from(&recipe("2", "Pesto"))).await.unwrap());
        assert!(store.add(Favorite::from(&recipe("1", "Ramen"))).await.unwrap());
        assert!(!store.add(Favorite::from(&recipe("2", "Pesto"))).await.unwrap());
        assert!(store.add(Favorite::from(&recipe("3", "Tacos"))).await.unwrap());
        assert!(store.remove("1").await.unwrap());
        assert!(!store.remove("1").await.unwrap());

        let reloaded = FavoritesStore::load(path).await.unwrap();
        assert_eq!(ids(&reloaded), ["2", "3"]);
        assert_eq!(reloaded.list()[0].name, "Pesto");
        assert_eq!(reloaded.list(), store.list());
    }

    #[tokio::test]
    async fn toggle_flips_state() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FavoritesStore::load(dir.path().join("favorites.json"))
            .await
            .unwrap();
        let pie = recipe("7", "Apple Pie");

        assert!(store.toggle(&pie).await.unwrap());
        assert!(store.contains("7"));
        assert!(!store.toggle(&pie).await.unwrap());
        assert!(!store.contains("7"));
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("favorites.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let error = FavoritesStore::load(path).await.unwrap_err();
        assert!(error.to_string().contains("favorites.json"));
    }
}
