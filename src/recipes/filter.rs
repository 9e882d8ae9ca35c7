use strum::{Display, EnumString};

use super::RecipeSummary;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, EnumString, Display)]
pub enum SortOrder {
    #[default]
    #[strum(serialize = "name-asc")]
    NameAsc,
    #[strum(serialize = "name-desc")]
    NameDesc,
}

#[derive(Debug, Clone, Default)]
pub struct RecipeFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub area: Option<String>,
    pub sort: SortOrder,
}

impl RecipeFilter {
    pub fn is_active(&self) -> bool {
        self.search.is_some() || self.category.is_some() || self.area.is_some()
    }

    fn accepts(&self, recipe: &RecipeSummary) -> bool {
        let matches_search = self.search.as_deref().is_none_or(|search| {
            let search = search.to_lowercase();
            [Some(&recipe.name), recipe.category.as_ref(), recipe.area.as_ref()]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&search))
        });
        let matches_category = self
            .category
            .as_ref()
            .is_none_or(|category| recipe.category.as_ref() == Some(category));
        let matches_area = self
            .area
            .as_ref()
            .is_none_or(|area| recipe.area.as_ref() == Some(area));

        matches_search && matches_category && matches_area
    }

    pub fn apply(&self, recipes: &[RecipeSummary]) -> Vec<RecipeSummary> {
        let mut filtered: Vec<RecipeSummary> = recipes
            .iter()
            .filter(|recipe| self.accepts(recipe))
            .cloned()
            .collect();

        filtered.sort_by(|a, b| {
            let order = a.name.to_lowercase().cmp(&b.name.to_lowercase());
            match self.sort {
                SortOrder::NameAsc => order,
                SortOrder::NameDesc => order.reverse(),
            }
        });
        filtered
    }

    pub fn status_line(&self, filtered: usize, total: usize) -> String {
        if self.is_active() {
            format!("Showing {filtered} of {total} recipes")
        } else {
            format!("Showing all {total} recipes")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str, category: &str, area: &str) -> RecipeSummary {
        RecipeSummary {
            id: name.to_owned(),
            name: name.to_owned(),
            thumbnail: None,
            category: Some(category.to_owned()),
            area: Some(area.to_owned()),
        }
    }

    fn names(recipes: &[RecipeSummary]) -> Vec<&str> {
        recipes.iter().map(|recipe| recipe.name.as_str()).collect()
    }

    fn sample() -> Vec<RecipeSummary> {
        vec![
            recipe("Tiramisu", "Dessert", "Italian"),
            recipe("beef wellington", "Beef", "British"),
            recipe("Carbonara", "Pasta", "Italian"),
            recipe("Pad Thai", "Chicken", "Thai"),
        ]
    }

    #[test]
    fn no_filter_sorts_by_name() {
        let filter = RecipeFilter::default();
        let filtered = filter.apply(&sample());
        assert_eq!(
            names(&filtered),
            ["beef wellington", "Carbonara", "Pad Thai", "Tiramisu"]
        );
        assert_eq!(filter.status_line(filtered.len(), 4), "Showing all 4 recipes");
    }

    #[test]
    fn search_looks_at_name_category_and_area() {
        let filter = RecipeFilter {
            search: Some("ITAL".to_owned()),
            sort: SortOrder::NameDesc,
            ..RecipeFilter::default()
        };
        let filtered = filter.apply(&sample());
        assert_eq!(names(&filtered), ["Tiramisu", "Carbonara"]);
        assert_eq!(filter.status_line(filtered.len(), 4), "Showing 2 of 4 recipes");

        let filter = RecipeFilter {
            search: Some("thai".to_owned()),
            ..RecipeFilter::default()
        };
        assert_eq!(names(&filter.apply(&sample())), ["Pad Thai"]);
    }

    #[test]
    fn category_and_area_match_exactly() {
        let filter = RecipeFilter {
            category: Some("Pasta".to_owned()),
            area: Some("Italian".to_owned()),
            ..RecipeFilter::default()
        };
        assert_eq!(names(&filter.apply(&sample())), ["Carbonara"]);

        let filter = RecipeFilter {
            category: Some("pasta".to_owned()),
            ..RecipeFilter::default()
        };
        assert!(filter.apply(&sample()).is_empty());
    }

    #[test]
    fn sort_order_parses() {
        assert_eq!("name-desc".parse::<SortOrder>().unwrap(), SortOrder::NameDesc);
        assert_eq!(SortOrder::NameAsc.to_string(), "name-asc");
        assert!("newest".parse::<SortOrder>().is_err());
    }
}
