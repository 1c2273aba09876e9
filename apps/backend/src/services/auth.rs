//! Bearer token authentication.

use std::collections::HashMap;

use thiserror::Error;

use crate::db::UserKey;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingCredentials,

    #[error("invalid Authorization format")]
    MalformedCredentials,

    #[error("unknown token")]
    UnknownToken,
}

/// Signed-in user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    pub fn user_key(&self) -> UserKey {
        UserKey::for_email(&self.email)
    }
}

/// Resolves a bearer token to the user it belongs to.
pub trait AuthProvider: Send + Sync {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError>;
}

/// Fixed token table, loaded from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, String>,
}

impl StaticTokenAuth {
    pub fn new<I, T, E>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (T, E)>,
        T: Into<String>,
        E: Into<String>,
    {
        Self {
            tokens: pairs
                .into_iter()
                .map(|(token, email)| (token.into(), email.into()))
                .collect(),
        }
    }
}

impl AuthProvider for StaticTokenAuth {
    fn authenticate(&self, token: &str) -> Result<Identity, AuthError> {
        self.tokens
            .get(token)
            .map(|email| Identity {
                email: email.clone(),
            })
            .ok_or(AuthError::UnknownToken)
    }
}

/// Extract the token from an `Authorization: Bearer <token>` value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AuthError::MalformedCredentials)
}
