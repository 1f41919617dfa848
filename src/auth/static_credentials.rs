use std::collections::BTreeMap;

use super::CredentialProvider;

const BUILTIN_USERS: &[(&str, &str)] = &[("usuario1", "senha123"), ("usuario2", "segredo456")];

/// Fixed in-memory username → password table. Exact, case-sensitive match.
#[derive(Debug, Clone)]
pub(crate) struct StaticCredentials {
    users: BTreeMap<String, String>,
}

impl StaticCredentials {
    pub(crate) fn builtin() -> Self {
        Self {
            users: BUILTIN_USERS
                .iter()
                .map(|(u, p)| ((*u).to_string(), (*p).to_string()))
                .collect(),
        }
    }

    /// Config-supplied users replace the built-in accounts entirely
    pub(crate) fn from_config(users: Option<&BTreeMap<String, String>>) -> Self {
        match users {
            Some(users) => Self {
                users: users.clone(),
            },
            None => Self::builtin(),
        }
    }
}

impl CredentialProvider for StaticCredentials {
    fn validate(&self, username: &str, password: &str) -> bool {
        self.users
            .get(username)
            .is_some_and(|expected| expected == password)
    }
}
