//! Auth endpoints: login, registration, and user lookups.
//!
//! This is the toy username/password flow the backend exposes; the client
//! only moves credentials and tokens, it adds no security of its own.

use serde::{Deserialize, Serialize};
use toolkit_core::ResourceId;
use tracing::{debug, warn};

use crate::client::RestClient;
use crate::error::{ClientError, Result};
use crate::types::UserRecord;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct AuthSession {
    pub token: String,
    pub user_id: Option<ResourceId>,
}

#[derive(Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(rename = "authToken")]
    auth_token: Option<String>,
    #[serde(default)]
    id: Option<ResourceId>,
}

#[derive(Serialize)]
struct RegisterPayload<'a> {
    username: &'a str,
    password: &'a str,
    #[serde(rename = "linkedIn")]
    linked_in: &'a str,
    toolkit_id: Vec<ResourceId>,
}

#[derive(Serialize)]
struct AssociatePayload {
    toolkit_id: Vec<ResourceId>,
}

impl RestClient {
    /// Log in and store the returned bearer token on the client.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthSession> {
        let response: LoginResponse = self
            .post_json("/auth/login", &LoginPayload { username, password })
            .await?;

        let Some(token) = response.auth_token else {
            return Err(ClientError::AuthRejected);
        };

        self.set_token(token.clone());
        debug!(username, "logged in");
        Ok(AuthSession {
            token,
            user_id: response.id,
        })
    }

    /// Register a new user. Fails fast when the username is already taken.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        linked_in: Option<&str>,
    ) -> Result<UserRecord> {
        if self.check_username_exists(username).await {
            return Err(ClientError::UsernameTaken(username.to_string()));
        }

        self.post_json(
            "/auth_tech",
            &RegisterPayload {
                username,
                password,
                linked_in: linked_in.unwrap_or(""),
                toolkit_id: Vec::new(),
            },
        )
        .await
    }

    /// Whether a username is already registered. Results are cached on the
    /// client; a failed lookup reports the name as available rather than
    /// blocking registration.
    pub async fn check_username_exists(&self, username: &str) -> bool {
        let username = username.trim();
        if username.is_empty() {
            return false;
        }

        if let Some(exists) = self.cached_username(username) {
            debug!(username, exists, "username check served from cache");
            return exists;
        }

        let exists = match self.lookup_username(username).await {
            Ok(exists) => exists,
            Err(error) => {
                warn!(username, %error, "username check failed, assuming available");
                return false;
            }
        };

        self.cache_username(username, exists);
        exists
    }

    async fn lookup_username(&self, username: &str) -> Result<bool> {
        let url = self.url("/auth_tech");
        let filter = format!("username='{username}'");
        let response = self
            .execute(&url, || self.http().get(&url).query(&[("filter", &filter)]))
            .await?;

        let users: Vec<UserRecord> = crate::client::decode(&url, response).await?;
        Ok(users
            .iter()
            .any(|user| user.username.eq_ignore_ascii_case(username)))
    }

    /// Replace the set of toolkits associated with a user. Requires a stored
    /// token from a prior [`login`](Self::login).
    pub async fn associate_toolkits(
        &self,
        user_id: ResourceId,
        toolkit_ids: Vec<ResourceId>,
    ) -> Result<UserRecord> {
        let url = self.url(&format!("/auth_tech/{user_id}"));
        let payload = AssociatePayload {
            toolkit_id: toolkit_ids,
        };
        let token = self.token().ok_or(ClientError::NotAuthenticated)?;
        let response = self
            .execute(&url, || {
                self.http()
                    .put(&url)
                    .bearer_auth(token.clone())
                    .json(&payload)
            })
            .await?;
        crate::client::decode(&url, response).await
    }

    pub async fn get_user(&self, user_id: ResourceId) -> Result<UserRecord> {
        self.get_json(&format!("/auth_tech/{user_id}")).await
    }
}
