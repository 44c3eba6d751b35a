//! Error types for Party Planner
//!
//! The store and the data access functions never fail: a missing record is
//! `None` and a refused operation is `false`. These errors belong to the
//! layers around them (configuration, form validation, command-line tools).

use thiserror::Error;

use crate::service::validation::FieldErrors;

pub type Result<T> = std::result::Result<T, PartyPlanError>;

#[derive(Error, Debug)]
pub enum PartyPlanError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Please fix the errors in the form: {0}")]
    Validation(FieldErrors),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: u32 },

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl PartyPlanError {
    /// Returns the appropriate exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            PartyPlanError::InvalidInput(_) => 3,
            PartyPlanError::Validation(_) => 3,
            PartyPlanError::NotFound { .. } => 2,
            PartyPlanError::Config(_) => 1,
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing required field: {0}")]
    MissingField(String),
}
