use crate::error::{AdminError, Result};
use std::{env, fmt::Display, path::PathBuf, str::FromStr, time::Duration};
use tracing::{info, warn};
use url::Url;

/// How listings are written into the search index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriterKind {
    /// Through the backend's passthrough mutation
    Graphql,
    /// Directly against the index with an admin key
    Typesense,
}

impl FromStr for WriterKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "graphql" => Ok(WriterKind::Graphql),
            "typesense" => Ok(WriterKind::Typesense),
            other => Err(format!("unknown index writer `{other}`")),
        }
    }
}

pub struct Config {
    pub graphql_url: Url,
    pub typesense_url: Url,
    pub typesense_api_key: String,
    pub typesense_collection: String,
    pub index_writer: WriterKind,
    pub session_file: PathBuf,
    pub http_timeout: Duration,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup, env vars in production
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("RENTAL_TYPESENSE_API_KEY").unwrap_or_else(|| {
            warn!("RENTAL_TYPESENSE_API_KEY not set, search requests will be unauthenticated");
            String::new()
        });

        Ok(Self {
            graphql_url: try_load(&lookup, "RENTAL_GRAPHQL_URL", "http://localhost:4000/graphql")?,
            typesense_url: try_load(&lookup, "RENTAL_TYPESENSE_URL", "http://localhost:8108")?,
            typesense_api_key: api_key,
            typesense_collection: try_load(&lookup, "RENTAL_TYPESENSE_COLLECTION", "cars")?,
            index_writer: try_load(&lookup, "RENTAL_INDEX_WRITER", "graphql")?,
            session_file: try_load(&lookup, "RENTAL_SESSION_FILE", ".rental-admin-session.json")?,
            http_timeout: Duration::from_secs(try_load(&lookup, "RENTAL_HTTP_TIMEOUT_SECS", "30")?),
        })
    }
}

fn try_load<T, F>(lookup: &F, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .unwrap_or_else(|| {
            info!("{key} not set, using default: {default}");
            default.to_string()
        })
        .parse()
        .map_err(|e| {
            warn!("Invalid {key} value: {e}");
            AdminError::Config(format!("invalid {key}: {e}"))
        })
}
