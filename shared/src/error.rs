//! Error types for the course platform services.

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the endpoints, the Supabase client and the lookup script.
#[derive(Error, Debug)]
pub enum Error {
    /// Required configuration is missing or malformed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A single-row query matched nothing
    #[error("Not found: no row in {table} matched the filter")]
    NotFound { table: String },

    /// A single-row query matched more than one row
    #[error("Multiple rows: more than one row in {table} matched the filter")]
    MultipleRows { table: String },

    /// The API key was rejected
    #[error("Unauthorized ({status}): {message}")]
    Unauthorized { status: u16, message: String },

    /// Any other non-success answer from the database API
    #[error("Database API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The HTTP client could not be set up
    #[error("Client setup error: {0}")]
    ClientSetup(String),

    /// The request never got an answer
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
