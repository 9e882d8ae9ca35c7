mod assistant;
mod cache;
mod chat;
mod config;
mod favorites;
mod logging;
mod pantry;
mod recipes;

use anyhow::Context;
use assistant::IntentMatcher;
use favorites::FavoritesStore;
use pantry::Pantry;
use recipes::client::MealDbClient;
use recipes::filter::{RecipeFilter, SortOrder};
use recipes::{Recipe, RecipeSummary};
use std::path::{Path, PathBuf};
use structopt::StructOpt;

#[derive(StructOpt, Debug)]
#[structopt(
    name = "bakematch",
    about = "Browse recipes, keep a pantry and favorites, and chat with a cooking assistant"
)]
struct Args {
    /// Path to a TOML rule table replacing the built-in assistant rules
    #[structopt(short = "r", long)]
    rules: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Command,
}

#[derive(StructOpt, Debug)]
enum Command {
    /// Chat with the recipe assistant
    Chat,
    /// Ask the recipe assistant a single question
    Ask {
        /// Also print which rule produced the answer
        #[structopt(long)]
        explain: bool,
        #[structopt(required = true)]
        text: Vec<String>,
    },
    /// Print the assistant's rule table as TOML
    Rules,
    /// List recipe categories
    Categories,
    /// List cuisines
    Areas,
    /// Search recipes by name
    Search {
        name: String,
        #[structopt(long)]
        category: Option<String>,
        #[structopt(long)]
        area: Option<String>,
        /// name-asc or name-desc
        #[structopt(long, default_value = "name-asc")]
        sort: SortOrder,
    },
    /// Show random recipes
    Random {
        #[structopt(short = "n", long, default_value = "1")]
        count: usize,
    },
    /// Show a recipe with ingredients and steps
    Show { id: String },
    /// Browse recipes by category, cuisine or ingredients
    Browse {
        #[structopt(long, conflicts_with_all = &["area", "ingredients"])]
        category: Option<String>,
        #[structopt(long, conflicts_with = "ingredients")]
        area: Option<String>,
        /// Comma-separated ingredient list
        #[structopt(long)]
        ingredients: Option<String>,
        /// Only keep recipes whose name, category or cuisine contains this
        #[structopt(short, long)]
        search: Option<String>,
        /// name-asc or name-desc
        #[structopt(long, default_value = "name-asc")]
        sort: SortOrder,
    },
    /// Pick pantry ingredients and find recipes that use them
    Pantry {
        /// Ingredient to toggle into the selection (repeatable)
        #[structopt(short = "s", long = "select")]
        select: Vec<String>,
        /// Start from a selection saved as `ingredients=...`
        #[structopt(long)]
        query: Option<String>,
        /// Only list catalog ingredients containing this text
        #[structopt(long)]
        search: Option<String>,
        /// List every ingredient instead of the first few per category
        #[structopt(long)]
        all: bool,
        /// Look up recipes for the selected ingredients
        #[structopt(long)]
        show_recipes: bool,
    },
    /// Manage favorite recipes
    Favorites {
        #[structopt(subcommand)]
        action: FavoritesCommand,
    },
}

#[derive(StructOpt, Debug)]
enum FavoritesCommand {
    /// List favorite recipes
    List,
    /// Add a recipe to favorites
    Add { id: String },
    /// Remove a recipe from favorites
    Remove { id: String },
    /// Add or remove a recipe
    Toggle { id: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::from_args();
    logging::init_tracing();
    let environment = config::Environment::load()?;

    match args.command {
        Command::Chat => {
            let matcher = load_matcher(args.rules.as_deref()).await?;
            let input = tokio::io::BufReader::new(tokio::io::stdin());
            chat::run(&matcher, environment.reply_delay(), input, tokio::io::stdout()).await?;
        }
        Command::Ask { explain, text } => {
            let matcher = load_matcher(args.rules.as_deref()).await?;
            let text = text.join(" ");
            if text.trim().is_empty() {
                return Ok(());
            }
            if explain {
                match matcher.explain(&text) {
                    Some(rule) => println!("[rule: {}]", rule.name),
                    None => println!("[default response]"),
                }
            }
            println!("{}", matcher.respond(&text));
        }
        Command::Rules => {
            let matcher = load_matcher(args.rules.as_deref()).await?;
            print!("{}", matcher.to_table().to_toml()?);
        }
        Command::Categories => {
            let client = recipe_client(&environment).await;
            for category in client.categories().await {
                println!("{}", category.name);
            }
        }
        Command::Areas => {
            let client = recipe_client(&environment).await;
            for area in client.areas().await {
                println!("{}", area.name);
            }
        }
        Command::Search {
            name,
            category,
            area,
            sort,
        } => {
            let client = recipe_client(&environment).await;
            let recipes: Vec<RecipeSummary> = client
                .search(&name)
                .await
                .iter()
                .map(Recipe::summary)
                .collect();
            let filter = RecipeFilter {
                search: None,
                category,
                area,
                sort,
            };
            print_listing(&filter, &recipes);
        }
        Command::Random { count } => {
            let client = recipe_client(&environment).await;
            let picks = client.random_selection(count).await;
            if picks.is_empty() {
                println!("No recipes found.");
            }
            for recipe in &picks {
                println!(
                    "{:>6}  {} ({}, ~{} min)",
                    recipe.id,
                    recipe.name,
                    describe_origin(recipe.category.as_deref(), recipe.area.as_deref()),
                    recipes::estimate_cooking_time(Some(recipe))
                );
            }
        }
        Command::Show { id } => {
            let client = recipe_client(&environment).await;
            let recipe = client
                .lookup(&id)
                .await
                .ok_or_else(|| anyhow::anyhow!("No recipe found with id {id}"))?;
            let store = load_favorites(&environment).await?;
            print_recipe(&recipe, store.contains(&recipe.id));
        }
        Command::Browse {
            category,
            area,
            ingredients,
            search,
            sort,
        } => {
            let client = recipe_client(&environment).await;
            let recipes = if let Some(ingredients) = &ingredients {
                client
                    .filter_by_ingredients(&pantry::parse_ingredient_list(ingredients))
                    .await
            } else if let Some(category) = &category {
                client.filter_by_category(category).await
            } else if let Some(area) = &area {
                client.filter_by_area(area).await
            } else {
                client
                    .random_selection(20)
                    .await
                    .iter()
                    .map(Recipe::summary)
                    .collect()
            };
            let filter = RecipeFilter {
                search,
                category,
                area,
                sort,
            };
            print_listing(&filter, &recipes);
        }
        Command::Pantry {
            select,
            query,
            search,
            all,
            show_recipes,
        } => {
            if select.is_empty() && query.is_none() {
                print_catalog(search.as_deref(), all);
                return Ok(());
            }

            let mut pantry = match &query {
                Some(query) => Pantry::from_query_string(query)?,
                None => Pantry::new(),
            };
            for ingredient in &select {
                pantry.toggle(ingredient);
            }
            println!("{}", pantry.status());
            if pantry.is_empty() {
                println!("Please select at least one ingredient");
                return Ok(());
            }
            println!("Selected: {}", pantry.selected().join(", "));
            println!("Query: ?{}", pantry.to_query_string()?);

            if show_recipes {
                let client = recipe_client(&environment).await;
                let recipes = client.filter_by_ingredients(pantry.selected()).await;
                print_listing(&RecipeFilter::default(), &recipes);
            }
        }
        Command::Favorites { action } => {
            let mut store = load_favorites(&environment).await?;
            match action {
                FavoritesCommand::List => {
                    if store.list().is_empty() {
                        println!("No favorites yet ({}).", store.path().display());
                    }
                    for favorite in store.list() {
                        println!(
                            "{:>6}  {} (added {})",
                            favorite.id,
                            favorite.name,
                            favorite.added_at.format("%Y-%m-%d")
                        );
                    }
                }
                FavoritesCommand::Add { id } => {
                    let client = recipe_client(&environment).await;
                    let recipe = client
                        .lookup(&id)
                        .await
                        .ok_or_else(|| anyhow::anyhow!("No recipe found with id {id}"))?;
                    if store.add(favorites::Favorite::from(&recipe)).await? {
                        println!("Added {} to favorites.", recipe.name);
                    } else {
                        println!("{} is already a favorite.", recipe.name);
                    }
                }
                FavoritesCommand::Remove { id } => {
                    if store.remove(&id).await? {
                        println!("Removed {id} from favorites.");
                    } else {
                        println!("{id} is not a favorite.");
                    }
                }
                FavoritesCommand::Toggle { id } => {
                    let client = recipe_client(&environment).await;
                    match client.lookup(&id).await {
                        Some(recipe) => {
                            if store.toggle(&recipe).await? {
                                println!("Added {} to favorites.", recipe.name);
                            } else {
                                println!("Removed {} from favorites.", recipe.name);
                            }
                        }
                        None if store.remove(&id).await? => {
                            println!("Removed {id} from favorites.");
                        }
                        None => anyhow::bail!("No recipe found with id {id}"),
                    }
                }
            }
        }
    }

    Ok(())
}

async fn load_matcher(rules: Option<&Path>) -> anyhow::Result<IntentMatcher> {
    match rules {
        Some(path) => IntentMatcher::from_file(path).await,
        None => Ok(IntentMatcher::default()),
    }
}

async fn recipe_client(environment: &config::Environment) -> MealDbClient {
    let cache = if environment.cache {
        match cache::ResponseCache::new().await {
            Ok(cache) => Some(cache.with_ttl(environment.cache_ttl())),
            Err(error) => {
                tracing::warn!(error = %format!("{error:#}"), "Response cache unavailable");
                None
            }
        }
    } else {
        None
    };

    MealDbClient::new(environment.api_base.clone(), cache)
}

async fn load_favorites(environment: &config::Environment) -> anyhow::Result<FavoritesStore> {
    let path = match &environment.favorites_path {
        Some(path) => path.clone(),
        None => favorites::default_path()?,
    };
    FavoritesStore::load(path)
        .await
        .context("Failed to load favorites")
}

fn describe_origin(category: Option<&str>, area: Option<&str>) -> String {
    match (category, area) {
        (Some(category), Some(area)) => format!("{category}, {area}"),
        (Some(only), None) | (None, Some(only)) => only.to_owned(),
        (None, None) => "uncategorised".to_owned(),
    }
}

fn print_listing(filter: &RecipeFilter, recipes: &[RecipeSummary]) {
    let filtered = filter.apply(recipes);
    println!("{}", filter.status_line(filtered.len(), recipes.len()));
    for recipe in &filtered {
        println!(
            "{:>6}  {} ({})",
            recipe.id,
            recipe.name,
            describe_origin(recipe.category.as_deref(), recipe.area.as_deref())
        );
    }
}

fn print_catalog(search: Option<&str>, all: bool) {
    let groups = pantry::search(search.unwrap_or_default());
    if groups.is_empty() {
        println!("No ingredients match.");
    }
    for (category, ingredients) in groups {
        let shown = if all || search.is_some() {
            ingredients.len()
        } else {
            ingredients.len().min(pantry::VISIBLE_PER_CATEGORY)
        };
        let hidden = ingredients.len() - shown;

        print!("{category}: {}", ingredients[..shown].join(", "));
        if hidden > 0 {
            print!(" (+{hidden} more)");
        }
        println!();
    }
}

fn print_recipe(recipe: &Recipe, favorited: bool) {
    let heart = if favorited { " ♥" } else { "" };
    println!("{}{heart}", recipe.name);
    println!(
        "{} · ~{} min",
        describe_origin(recipe.category.as_deref(), recipe.area.as_deref()),
        recipes::estimate_cooking_time(Some(recipe))
    );
    let tags = recipe.tags();
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }

    println!("\nIngredients:");
    for ingredient in &recipe.ingredients {
        if ingredient.measure.is_empty() {
            println!("  • {}", ingredient.name);
        } else {
            println!("  • {} {}", ingredient.measure, ingredient.name);
        }
    }

    let steps = recipes::instruction_steps(recipe.instructions.as_deref().unwrap_or_default());
    if !steps.is_empty() {
        println!("\nInstructions:");
        for (index, step) in steps.iter().enumerate() {
            println!("  {}. {step}", index + 1);
        }
    }

    if let Some(youtube) = &recipe.youtube {
        println!("\nVideo: {youtube}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use structopt::clap::ErrorKind;

    #[test]
    fn help_needs_only_the_command_line() {
        let error = Args::from_iter_safe(["bakematch", "--help"]).unwrap_err();
        assert_eq!(error.kind, ErrorKind::HelpDisplayed);
    }

    #[test]
    fn pantry_selection_is_repeatable() {
        let args =
            Args::from_iter_safe(["bakematch", "pantry", "-s", "Chicken", "--select", "Rice"])
                .unwrap();
        match args.command {
            Command::Pantry { select, .. } => assert_eq!(select, ["Chicken", "Rice"]),
            other => panic!("unexpected command {other:?}"),
        }
    }
}
