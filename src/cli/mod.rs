pub mod author;
pub mod browse;
pub mod cook;
pub mod cookbook;
pub mod profile;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use gastroguru::cookbook::{MealSlot, Weekday};
use gastroguru::{Config, Cuisine, DietType, Difficulty, RecipeCatalog};

#[derive(Parser)]
#[command(
    name = "gastroguru",
    about = "Browse, cook and plan recipes from the terminal",
    long_about = "Recipe discovery in the terminal: filter and search the catalog, cook with step timers and read-aloud, keep a cookbook and a weekly meal plan."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Recipe catalog JSON to use instead of the configured one
    #[arg(long, global = true)]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List recipes matching filters
    Browse(BrowseArgs),

    /// Show a recipe with scaled ingredients and similar recipes
    Show {
        id: String,
        /// Serving multiplier
        #[arg(short = 'x', long, default_value_t = 1.0)]
        servings: f64,
    },

    /// Cook a recipe interactively with step timers
    Cook {
        id: String,
        /// Send notices to the log instead of the terminal
        #[arg(long)]
        quiet: bool,
    },

    /// List every tag in the catalog
    Tags,

    /// Show the highest rated recipe
    Featured,

    /// Manage saved recipes
    #[command(subcommand)]
    Cookbook(CookbookCommand),

    /// Manage the weekly meal plan
    #[command(subcommand)]
    Plan(PlanCommand),

    /// Write a new recipe
    Create(CreateArgs),

    /// Show or edit your profile
    #[command(subcommand)]
    Profile(ProfileCommand),

    /// Show the last recipe opened
    LastViewed,
}

#[derive(Args, Default)]
pub struct BrowseArgs {
    #[arg(long = "cuisine")]
    pub cuisines: Vec<Cuisine>,

    #[arg(long = "diet")]
    pub diet_types: Vec<DietType>,

    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Maximum cook time in minutes
    #[arg(long)]
    pub max_cook_time: Option<u32>,

    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// Text to find in titles, descriptions and ingredients
    #[arg(short, long)]
    pub search: Option<String>,

    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Pick one matching recipe at random
    #[arg(long)]
    pub surprise: bool,
}

#[derive(Subcommand)]
pub enum CookbookCommand {
    List {
        #[arg(short, long)]
        search: Option<String>,
    },
    Save {
        id: String,
    },
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum PlanCommand {
    Show,
    Set {
        day: Weekday,
        meal: MealSlot,
        id: String,
    },
    Clear {
        day: Weekday,
        meal: MealSlot,
    },
}

#[derive(Args)]
pub struct CreateArgs {
    #[arg(long)]
    pub title: String,

    #[arg(long, default_value = "")]
    pub description: String,

    #[arg(long, default_value = "American")]
    pub cuisine: Cuisine,

    #[arg(long, default_value = "Medium")]
    pub difficulty: Difficulty,

    /// Prep time in minutes
    #[arg(long, default_value_t = 0)]
    pub prep: u32,

    /// Cook time in minutes
    #[arg(long, default_value_t = 0)]
    pub cook: u32,

    #[arg(long, default_value_t = 1)]
    pub servings: u32,

    #[arg(long = "diet")]
    pub diet_types: Vec<DietType>,

    #[arg(long = "tag")]
    pub tags: Vec<String>,

    /// "quantity|unit|name", e.g. "1/2|cup|White wine"
    #[arg(long = "ingredient")]
    pub ingredients: Vec<String>,

    /// "description" or "description|minutes"
    #[arg(long = "step")]
    pub steps: Vec<String>,

    /// Id for the new recipe
    #[arg(long)]
    pub id: Option<String>,

    /// Catalog file to add the recipe to; prints JSON when omitted
    #[arg(long)]
    pub out: Option<PathBuf>,

    /// Check the recipe and keep it as a draft instead of publishing
    #[arg(long)]
    pub draft: bool,
}

#[derive(Subcommand)]
pub enum ProfileCommand {
    Show,
    Edit {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        avatar: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        instagram: Option<String>,
        #[arg(long)]
        twitter: Option<String>,
    },
    /// Add or remove a favourite recipe
    Favorite {
        id: String,
    },
}

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

fn load_catalog(
    cli_path: Option<PathBuf>,
    config: &Config,
) -> Result<RecipeCatalog, Box<dyn std::error::Error>> {
    match cli_path.or_else(|| config.catalog_path.clone()) {
        Some(path) => Ok(RecipeCatalog::load(&path)?),
        None => Ok(RecipeCatalog::builtin()?),
    }
}

pub async fn run(cli: Cli) -> CliResult {
    let config = Config::load();
    let catalog = load_catalog(cli.catalog, &config)?;

    match cli.command {
        Command::Browse(args) => browse::browse(&catalog, &config, &args),
        Command::Show { id, servings } => browse::show(&catalog, &config, &id, servings),
        Command::Cook { id, quiet } => cook::cook(&catalog, &config, &id, quiet).await,
        Command::Tags => browse::tags(&catalog),
        Command::Featured => browse::featured(&catalog),
        Command::Cookbook(cmd) => cookbook::cookbook(&catalog, cmd),
        Command::Plan(cmd) => cookbook::plan(&catalog, cmd),
        Command::Create(args) => author::create(&catalog, args),
        Command::Profile(cmd) => profile::profile(&catalog, cmd),
        Command::LastViewed => profile::last_viewed(),
    }
}
