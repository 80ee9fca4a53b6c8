//! Login gate for the dashboard.
//!
//! Credentials come from a closed, hardcoded table behind the
//! [`Authenticator`] trait. There is no hashing, expiry or rate limiting;
//! the gate only decides which advisor is at the desk.

use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;
use tokio::sync::RwLock;

use super::commands::auth::LoginCommand;
use super::models::user::{Credential, User};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Invalid username or password")]
    InvalidCredentials,
    #[error("No user is logged in")]
    NotLoggedIn,
}

/// Source of truth for who may log in
pub trait Authenticator: Send + Sync {
    /// Users offered in the login dropdown
    fn users(&self) -> Vec<User>;

    /// Exact match on id and password
    fn authenticate(&self, user_id: &str, password: &str) -> Result<User, AuthError>;
}

/// (id, display name, password)
const DEFAULT_CREDENTIALS: [(&str, &str, &str); 5] = [
    ("manager", "Manager", "33"),
    ("advisor34", "Service Advisor 34", "34"),
    ("advisor12", "Service Advisor 12", "12"),
    ("advisor13", "Service Advisor 13", "13"),
    ("advisor39", "Service Advisor 39", "39"),
];

pub struct StaticAuthenticator {
    credentials: Vec<Credential>,
}

impl StaticAuthenticator {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self { credentials }
    }
}

impl Default for StaticAuthenticator {
    fn default() -> Self {
        Self::new(
            DEFAULT_CREDENTIALS
                .iter()
                .map(|(id, name, password)| Credential::new(id, name, password))
                .collect(),
        )
    }
}

impl Authenticator for StaticAuthenticator {
    fn users(&self) -> Vec<User> {
        self.credentials.iter().map(|c| c.user.clone()).collect()
    }

    fn authenticate(&self, user_id: &str, password: &str) -> Result<User, AuthError> {
        if user_id.is_empty() || password.is_empty() {
            return Err(AuthError::MissingFields);
        }

        self.credentials
            .iter()
            .find(|c| c.user.id == user_id && c.password == password)
            .map(|c| c.user.clone())
            .ok_or(AuthError::InvalidCredentials)
    }
}

/// Authentication plus the single logged-in session
#[derive(Clone)]
pub struct AuthService {
    authenticator: Arc<dyn Authenticator>,
    current_user: Arc<RwLock<Option<User>>>,
}

impl AuthService {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self {
            authenticator,
            current_user: Arc::new(RwLock::new(None)),
        }
    }

    pub fn list_users(&self) -> Vec<User> {
        self.authenticator.users()
    }

    pub async fn login(&self, command: LoginCommand) -> Result<User> {
        match self.authenticator.authenticate(&command.user_id, &command.password) {
            Ok(user) => {
                info!("User {} logged in", user.id);
                *self.current_user.write().await = Some(user.clone());
                Ok(user)
            }
            Err(e) => {
                warn!("Login rejected for '{}': {}", command.user_id, e);
                Err(e.into())
            }
        }
    }

    /// Ends the session, returning who was logged in
    pub async fn logout(&self) -> Option<User> {
        let previous = self.current_user.write().await.take();
        if let Some(user) = &previous {
            info!("User {} logged out", user.id);
        }
        previous
    }

    pub async fn current_user(&self) -> Option<User> {
        self.current_user.read().await.clone()
    }

    pub async fn require_user(&self) -> Result<User> {
        self.current_user()
            .await
            .ok_or_else(|| AuthError::NotLoggedIn.into())
    }
}
