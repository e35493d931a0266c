use thiserror::Error;

/// Errors surfaced by the admin client
#[derive(Debug, Error)]
pub enum AdminError {
    /// The request never produced a usable HTTP response
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The GraphQL layer answered with an `errors` array
    #[error("GraphQL error: {0}")]
    Graphql(String),

    /// The backend accepted the request but reported `status: false`
    #[error("{0}")]
    Backend(String),

    /// Input rejected locally, nothing was sent
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Generic failure from the search index; the cause is only logged
    #[error("Error fetching cars")]
    SearchFailed,

    /// An index upsert failed during a sync run
    #[error("Failed to add car {name} to the search index")]
    SyncFailed { name: String },

    #[error("Session expired, please log in again")]
    SessionExpired,

    #[error("No admin session found, please log in")]
    NotLoggedIn,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        AdminError::Decode(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdminError>;
