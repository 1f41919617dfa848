//! Access gate
//!
//! Entry is granted only to a username/password pair the injected
//! `CredentialProvider` accepts. A refusal is terminal for the session.

mod static_credentials;

use crate::error::AppError;

pub(crate) use static_credentials::StaticCredentials;

/// Anything that can vouch for a username/password pair
pub(crate) trait CredentialProvider {
    fn validate(&self, username: &str, password: &str) -> bool;
}

/// The authenticated user a session belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Principal {
    pub(crate) username: String,
}

pub(crate) struct AccessGate<P> {
    provider: P,
}

impl<P: CredentialProvider> AccessGate<P> {
    pub(crate) fn new(provider: P) -> Self {
        Self { provider }
    }

    pub(crate) fn authenticate(&self, username: &str, password: &str) -> bool {
        self.provider.validate(username, password)
    }

    /// Admit a session or block it. Missing credentials are a refusal.
    pub(crate) fn admit(
        &self,
        username: Option<&str>,
        password: Option<&str>,
    ) -> Result<Principal, AppError> {
        let (Some(username), Some(password)) = (username, password) else {
            tracing::debug!("no credentials supplied");
            return Err(AppError::AccessDenied);
        };
        if self.authenticate(username, password) {
            tracing::debug!(user = username, "access granted");
            Ok(Principal {
                username: username.to_string(),
            })
        } else {
            tracing::debug!(user = username, "access denied");
            Err(AppError::AccessDenied)
        }
    }
}
