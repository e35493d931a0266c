use crate::error::{AdminError, Result};
use crate::models::Admin;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Lifetime of an admin token once issued
pub const SESSION_TTL_HOURS: i64 = 2;

/// Admin session handed to every privileged request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Session {
    token: String,
    pub admin: Option<Admin>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, admin: Option<Admin>, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: token.into(),
            admin,
            expires_at: issued_at + Duration::hours(SESSION_TTL_HOURS),
        }
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    /// Token to put in the `Authorization` header, if still valid at `now`
    pub fn bearer_at(&self, now: DateTime<Utc>) -> Result<&str> {
        if self.is_expired_at(now) {
            return Err(AdminError::SessionExpired);
        }
        Ok(&self.token)
    }

    pub fn bearer(&self) -> Result<&str> {
        self.bearer_at(Utc::now())
    }
}

/// Client-side persistence of the session, the CLI's equivalent of a cookie
pub struct SessionStore {
    path: PathBuf,
}

impl SessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn save(&self, session: &Session) -> Result<()> {
        let json = serde_json::to_string_pretty(session)?;
        tokio::fs::write(&self.path, json).await?;
        info!("Saved admin session to {}", self.path.display());
        Ok(())
    }

    /// Load a stored session, dropping it when it has already expired
    pub async fn load(&self) -> Result<Session> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(AdminError::NotLoggedIn);
            }
            Err(e) => return Err(e.into()),
        };

        let session: Session = serde_json::from_str(&raw)?;
        if session.is_expired_at(Utc::now()) {
            warn!("Stored session expired at {}", session.expires_at);
            self.clear().await?;
            return Err(AdminError::SessionExpired);
        }

        debug!("Loaded admin session valid until {}", session.expires_at);
        Ok(session)
    }

    pub async fn clear(&self) -> Result<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_usable_until_two_hours_after_issue() {
        let issued = Utc::now();
        let session = Session::new("abc", None, issued);

        assert_eq!(session.bearer_at(issued).unwrap(), "abc");
        assert_eq!(
            session.bearer_at(issued + Duration::minutes(119)).unwrap(),
            "abc"
        );
        assert!(matches!(
            session.bearer_at(issued + Duration::hours(2)),
            Err(AdminError::SessionExpired)
        ));
    }

    #[tokio::test]
    async fn store_round_trips_a_live_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let session = Session::new("tok", None, Utc::now());

        store.save(&session).await.unwrap();
        let loaded = store.load().await.unwrap();
        assert_eq!(loaded, session);
    }

    #[tokio::test]
    async fn store_discards_expired_session() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("session.json"));
        let stale = Session::new("tok", None, Utc::now() - Duration::hours(3));

        store.save(&stale).await.unwrap();
        assert!(matches!(store.load().await, Err(AdminError::SessionExpired)));
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn missing_file_means_not_logged_in() {
        let dir = tempfile::tempdir().unwrap();
        let store = SessionStore::new(dir.path().join("none.json"));
        assert!(matches!(store.load().await, Err(AdminError::NotLoggedIn)));
        store.clear().await.unwrap();
    }
}
