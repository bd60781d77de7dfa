mod filter;
mod similar;

pub use filter::{
    filter_recipes, random_pick, FilterCriteria, FilterState, DEFAULT_MAX_COOK_TIME,
};
pub use similar::{similar_recipes, similarity};
