// web-server/src/credentials.rs
use std::collections::HashMap;

use bcrypt::{hash, verify, BcryptError, DEFAULT_COST};
use common::models::session::SessionUser;

/// Accounts known to the portal, loaded at process start
pub const DEFAULT_USERS: &[(&str, &str)] = &[
    ("usuario1", "contrasena1"),
    ("usuario2", "contrasena2"),
];

/// Checks a username/password pair and returns the matching user
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, username: &str, password: &str) -> Option<SessionUser>;
}

/// Fixed in-memory credential list holding bcrypt hashes
pub struct StaticCredentialStore {
    password_hashes: HashMap<String, String>,
}

impl StaticCredentialStore {
    pub fn new(users: &[(&str, &str)]) -> Result<Self, BcryptError> {
        Self::with_cost(users, DEFAULT_COST)
    }

    /// Usernames are unique: a repeated username keeps its first password.
    pub fn with_cost(users: &[(&str, &str)], cost: u32) -> Result<Self, BcryptError> {
        let mut password_hashes = HashMap::with_capacity(users.len());
        for (username, password) in users {
            if password_hashes.contains_key(*username) {
                tracing::warn!("Ignoring duplicate credential for {}", username);
                continue;
            }
            password_hashes.insert(username.to_string(), hash(*password, cost)?);
        }

        tracing::info!("Credential store loaded with {} users", password_hashes.len());
        Ok(Self { password_hashes })
    }
}

impl CredentialVerifier for StaticCredentialStore {
    fn verify(&self, username: &str, password: &str) -> Option<SessionUser> {
        let stored = self.password_hashes.get(username)?;
        match verify(password, stored) {
            Ok(true) => Some(SessionUser {
                username: username.to_string(),
            }),
            Ok(false) => None,
            Err(e) => {
                tracing::error!("Failed to verify password for {}: {}", username, e);
                None
            }
        }
    }
}
