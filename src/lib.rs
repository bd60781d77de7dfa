pub mod authoring;
pub mod catalog;
pub mod config;
pub mod cookbook;
pub mod error;
pub mod history;
pub mod model;
pub mod notify;
pub mod profile;
pub mod quantity;
pub mod schedule;
pub mod search;
pub mod session;
pub mod speech;
pub mod store;
pub mod timer;

pub use catalog::RecipeCatalog;
pub use config::Config;
pub use error::{CatalogError, DraftError};
pub use model::{Cuisine, DietType, Difficulty, Ingredient, Recipe, Step};
