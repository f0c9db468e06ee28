//! User directory over dataset accounts.

use crate::traits::UserDirectory;
use crate::AuthError;
use async_trait::async_trait;
use srat_types::{Dataset, User, UserAccount};

/// Authenticates against a fixed list of accounts.
///
/// Passwords are compared as opaque strings.
#[derive(Clone, Debug, Default)]
pub struct AccountDirectory {
    accounts: Vec<UserAccount>,
}

impl AccountDirectory {
    pub fn new(accounts: Vec<UserAccount>) -> Self {
        Self { accounts }
    }

    pub fn from_dataset(dataset: &Dataset) -> Self {
        Self::new(dataset.users.clone())
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

#[async_trait]
impl UserDirectory for AccountDirectory {
    async fn authenticate(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let username = username.trim();
        match self
            .accounts
            .iter()
            .find(|a| a.user.username == username && a.password == password)
        {
            Some(account) => {
                tracing::debug!(username, role = %account.user.role, "Authenticated");
                Ok(account.user.clone())
            }
            None => {
                tracing::debug!(username, "Authentication failed");
                Err(AuthError::AuthFailed)
            }
        }
    }
}
