use std::io;
use thiserror::Error;

use crate::alphabet::Role;

/// Errors raised while turning a configuration into an alphabet and rule set
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("InvalidRoleName: \"{0}\"")]
    InvalidRoleName(String),

    #[error("InvalidRuleFormat: \"{0}\"")]
    InvalidRuleFormat(String),

    #[error("Alphabet entry for role \"{0}\" has no characters")]
    EmptyAlphabetEntry(String),

    #[error("Rule token pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Custom error types for the password generator
#[derive(Error, Debug)]
pub enum PassgenError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("No rule matches role history [{history}]")]
    NoMatchingRule { history: String },

    #[error("No characters defined for role \"{0}\"")]
    NoCharsForRole(Role),

    #[error("Invalid length range: min {min} is greater than max {max}")]
    InvalidLengthRange { min: usize, max: usize },
}

/// Result type for password generator operations
pub type Result<T> = std::result::Result<T, PassgenError>;
