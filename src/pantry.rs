use anyhow::{Context, Result};
use itertools::Itertools;
use reqwest::Url;

/// Ingredients shown in each pantry category before the rest are collapsed.
pub const VISIBLE_PER_CATEGORY: usize = 6;

const QUERY_KEY: &str = "ingredients";

pub static CATALOG: &[(&str, &[&str])] = &[
    (
        "Proteins",
        &[
            "Chicken", "Beef", "Pork", "Salmon", "Tuna", "Eggs", "Bacon", "Lamb", "Turkey",
            "Prawns", "Cod", "Shrimp", "Sausages", "Ham", "Duck", "Chorizo", "Prosciutto",
            "Mussels", "Clams", "Crab", "Lobster", "Anchovies", "Tofu",
        ],
    ),
    (
        "Dairy",
        &[
            "Milk", "Cheese", "Butter", "Cream", "Yogurt", "Mozzarella", "Parmesan",
            "Cheddar Cheese", "Feta", "Cream Cheese", "Sour Cream", "Ricotta", "Gouda", "Brie",
            "Blue Cheese", "Gruyere", "Condensed Milk", "Coconut Milk",
        ],
    ),
    (
        "Vegetables",
        &[
            "Tomatoes", "Onions", "Garlic", "Potatoes", "Carrots", "Mushrooms", "Peppers",
            "Spinach", "Broccoli", "Celery", "Cabbage", "Lettuce", "Cucumber", "Zucchini", "Peas",
            "Green Beans", "Corn", "Aubergine", "Sweet Potato", "Asparagus", "Kale", "Leeks",
            "Beetroot", "Squash", "Pumpkin", "Bean Sprouts", "Bok Choy", "Red Onion",
            "Spring Onions", "Shallots",
        ],
    ),
    (
        "Grains & Pasta",
        &[
            "Rice", "Pasta", "Flour", "Bread", "Spaghetti", "Noodles", "Couscous", "Quinoa",
            "Oats", "Penne", "Macaroni", "Lasagne", "Rigatoni", "Barley", "Bulgur", "Polenta",
            "Fettuccine", "Tagliatelle",
        ],
    ),
    (
        "Fruits",
        &[
            "Lemon", "Apple", "Banana", "Strawberries", "Blueberries", "Orange", "Lime", "Peach",
            "Pear", "Mango", "Pineapple", "Grapes", "Raspberries", "Avocado", "Watermelon",
            "Cherries", "Cranberries", "Apricot", "Plum", "Kiwi", "Pomegranate", "Coconut",
        ],
    ),
    (
        "Herbs & Spices",
        &[
            "Salt", "Pepper", "Basil", "Oregano", "Thyme", "Paprika", "Cumin", "Parsley",
            "Rosemary", "Cinnamon", "Ginger", "Nutmeg", "Chili Powder", "Coriander", "Turmeric",
            "Cayenne Pepper", "Bay Leaves", "Mint", "Dill", "Chives", "Tarragon", "Sage",
            "Fennel Seeds", "Cardamom", "Cloves", "Allspice", "Garlic Powder", "Onion Powder",
        ],
    ),
    (
        "Oils & Sauces",
        &[
            "Olive Oil", "Vegetable Oil", "Soy Sauce", "Tomato Sauce", "Vinegar", "Sesame Oil",
            "Coconut Oil", "Worcestershire Sauce", "Hot Sauce", "Mustard", "Ketchup",
            "Mayonnaise", "BBQ Sauce", "Fish Sauce", "Oyster Sauce", "Hoisin Sauce",
            "Teriyaki Sauce", "Pesto", "Balsamic Vinegar", "Apple Cider Vinegar", "Rice Vinegar",
        ],
    ),
    (
        "Baking",
        &[
            "Sugar", "Baking Powder", "Vanilla", "Cocoa", "Chocolate", "Honey", "Brown Sugar",
            "Icing Sugar", "Baking Soda", "Vanilla Extract", "Yeast", "Maple Syrup",
            "Corn Starch", "Cornflour", "Golden Syrup", "Treacle", "Almond Extract",
            "Chocolate Chips",
        ],
    ),
    (
        "Nuts & Seeds",
        &[
            "Almonds", "Walnuts", "Peanuts", "Cashews", "Sesame Seeds", "Sunflower Seeds",
            "Pine Nuts", "Pistachios", "Pecans", "Hazelnuts", "Peanut Butter", "Almond Butter",
            "Tahini", "Chia Seeds", "Flax Seeds", "Pumpkin Seeds",
        ],
    ),
    (
        "Legumes",
        &[
            "Chickpeas", "Lentils", "Black Beans", "Kidney Beans", "White Beans",
            "Cannellini Beans", "Pinto Beans", "Navy Beans", "Lima Beans", "Split Peas",
        ],
    ),
    (
        "Condiments",
        &[
            "Olives", "Pickles", "Capers", "Relish", "Horseradish", "Chutney", "Jam", "Marmalade",
            "Salsa", "Tabasco", "Sriracha",
        ],
    ),
    (
        "Stock & Broth",
        &[
            "Chicken Stock", "Beef Stock", "Vegetable Stock", "Fish Stock", "Chicken Broth",
            "Beef Broth",
        ],
    ),
    (
        "Asian",
        &[
            "Curry Paste", "Mirin", "Rice Wine", "Sake", "Miso", "Nori", "Wasabi", "Sushi Rice",
            "Rice Noodles", "Gochujang", "Kimchi",
        ],
    ),
    (
        "Alcohol",
        &[
            "Red Wine", "White Wine", "Beer", "Brandy", "Rum", "Vodka", "Sherry", "Vermouth",
            "Marsala",
        ],
    ),
];

/// Catalog entries whose name contains `term`, grouped by category.
/// Categories without a match are left out; a blank term matches everything.
pub fn search(term: &str) -> Vec<(&'static str, Vec<&'static str>)> {
    let term = term.trim().to_lowercase();
    CATALOG
        .iter()
        .map(|(category, ingredients)| {
            let matching = ingredients
                .iter()
                .copied()
                .filter(|ingredient| ingredient.to_lowercase().contains(&term))
                .collect::<Vec<_>>();
            (*category, matching)
        })
        .filter(|(_, matching)| !matching.is_empty())
        .collect()
}

/// Splits a comma-separated ingredient list, dropping blanks.
pub fn parse_ingredient_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ingredient| !ingredient.is_empty())
        .map(str::to_owned)
        .collect()
}

/// The ingredients the user has on hand, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pantry {
    selected: Vec<String>,
}

impl Pantry {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, ingredient: &str) -> Option<usize> {
        let wanted = ingredient.trim().to_lowercase();
        self.selected
            .iter()
            .position(|selected| selected.to_lowercase() == wanted)
    }

    pub fn is_selected(&self, ingredient: &str) -> bool {
        self.position(ingredient).is_some()
    }

    pub fn select(&mut self, ingredient: &str) {
        let ingredient = ingredient.trim();
        if !ingredient.is_empty() && !self.is_selected(ingredient) {
            self.selected.push(ingredient.to_owned());
        }
    }

    pub fn deselect(&mut self, ingredient: &str) {
        if let Some(index) = self.position(ingredient) {
            self.selected.remove(index);
        }
    }

    /// Returns whether the ingredient is selected afterwards.
    pub fn toggle(&mut self, ingredient: &str) -> bool {
        if self.is_selected(ingredient) {
            self.deselect(ingredient);
            false
        } else {
            self.select(ingredient);
            self.is_selected(ingredient)
        }
    }

    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn status(&self) -> String {
        match self.selected.len() {
            0 => "No ingredients selected".to_owned(),
            1 => "1 ingredient selected".to_owned(),
            count => format!("{count} ingredients selected"),
        }
    }

    /// `ingredients=` followed by the URL-encoded, comma-joined selection.
    pub fn to_query_string(&self) -> Result<String> {
        let mut url = placeholder_url()?;
        url.query_pairs_mut()
            .append_pair(QUERY_KEY, &self.selected.iter().join(","));
        Ok(url.query().unwrap_or_default().to_owned())
    }

    pub fn from_query_string(query: &str) -> Result<Self> {
        let mut url = placeholder_url()?;
        url.set_query(Some(query.trim_start_matches('?')));

        let mut pantry = Self::new();
        for (key, value) in url.query_pairs() {
            if key == QUERY_KEY {
                for ingredient in parse_ingredient_list(&value) {
                    pantry.select(&ingredient);
                }
            }
        }
        Ok(pantry)
    }
}

fn placeholder_url() -> Result<Url> {
    Url::parse("http://localhost/recipes").context("Failed to build pantry URL")
}
