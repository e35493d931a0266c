use super::AdminApi;
use crate::error::{AdminError, Result};
use crate::graphql::{decode_field, documents};
use crate::models::Admin;
use crate::session::Session;
use chrono::Utc;
use serde::Deserialize;
use serde_json::json;
use tracing::info;

#[derive(Debug, Deserialize)]
struct LoginPayload {
    token: String,
    admin: Admin,
}

impl AdminApi {
    /// Exchange admin credentials for a session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(AdminError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        let data = self
            .execute(
                documents::ADMIN_LOGIN,
                json!({ "email": email.trim(), "password": password }),
            )
            .await?;
        let payload: LoginPayload = decode_field(data, "adminLogin")?;

        info!("Logged in as {}", payload.admin.email);
        Ok(Session::new(payload.token, Some(payload.admin), Utc::now()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graphql::fake::FakeTransport;
    use std::sync::Arc;

    #[tokio::test]
    async fn login_returns_two_hour_session() {
        let transport = Arc::new(FakeTransport::default().respond(json!({
            "adminLogin": {
                "token": "jwt-token",
                "admin": { "id": "a1", "name": "Ops", "email": "ops@example.com" }
            }
        })));
        let api = AdminApi::new(transport.clone());

        let before = Utc::now();
        let session = api.login(" ops@example.com ", "secret").await.unwrap();

        assert_eq!(session.bearer().unwrap(), "jwt-token");
        assert_eq!(session.admin.as_ref().unwrap().id, "a1");
        assert!(session.expires_at >= before + chrono::Duration::hours(2));
        assert_eq!(transport.sent()[0].variables["email"], "ops@example.com");
    }

    #[tokio::test]
    async fn empty_credentials_are_not_sent() {
        let transport = Arc::new(FakeTransport::default());
        let api = AdminApi::new(transport.clone());

        assert!(matches!(
            api.login("", "secret").await,
            Err(AdminError::Validation(_))
        ));
        assert!(transport.sent().is_empty());
    }

    #[tokio::test]
    async fn backend_rejection_is_propagated() {
        let transport = Arc::new(
            FakeTransport::default().fail(AdminError::Graphql("Invalid credentials".to_string())),
        );
        let api = AdminApi::new(transport);

        match api.login("ops@example.com", "wrong").await {
            Err(AdminError::Graphql(msg)) => assert_eq!(msg, "Invalid credentials"),
            other => panic!("unexpected: {other:?}"),
        }
    }
}
