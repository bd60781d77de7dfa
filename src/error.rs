use std::path::PathBuf;

/// Errors raised while loading a recipe catalog.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// Catalog file could not be read
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Catalog JSON is malformed
    #[error("Invalid catalog JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two recipes share the same id
    #[error("Duplicate recipe id: {0}")]
    DuplicateId(String),

    /// A step timer is zero, negative or not a number
    #[error("Recipe {recipe_id} step {step_id} has a non-positive timer")]
    InvalidTimer { recipe_id: String, step_id: String },
}

/// Reasons a recipe draft cannot be published.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DraftError {
    #[error("Missing title: please add a title for your recipe")]
    MissingTitle,

    #[error("Missing ingredients: please add at least one ingredient")]
    MissingIngredients,

    #[error("Missing instructions: please add at least one instruction step")]
    MissingSteps,

    #[error("Ingredient name must not be empty")]
    EmptyIngredientName,

    #[error("Step description must not be empty")]
    EmptyStepDescription,

    #[error("Step timer must be a positive number of minutes, got {0}")]
    InvalidTimer(f64),
}

/// A string did not name any variant of a categorical attribute.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}
