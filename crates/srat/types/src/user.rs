//! Users and the accounts that back them

use crate::{Role, UserId, ValidationError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Password assigned when an administrator creates a user without one
pub const DEFAULT_PASSWORD: &str = "changeme";

/// An authenticated identity acting on requests.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub username: String,
    /// Display name, recorded in history entries
    pub name: String,
    pub role: Role,
    /// Funders this user may act on. Only consulted for coordinators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fund_sources: Option<BTreeSet<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        name: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            name: name.into(),
            role,
            fund_sources: None,
            email: None,
            phone: None,
        }
    }

    pub fn with_fund_sources<I, S>(mut self, funders: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fund_sources = Some(funders.into_iter().map(Into::into).collect());
        self
    }

    /// Whether `funder` is inside this user's fund-source scope.
    /// A user without fund sources covers nothing.
    pub fn covers_funder(&self, funder: &str) -> bool {
        self.fund_sources
            .as_ref()
            .map(|sources| sources.contains(funder))
            .unwrap_or(false)
    }
}

impl From<String> for UserId {
    fn from(s: String) -> Self {
        UserId(s)
    }
}

/// A stored user record: the identity plus credentials and identity documents.
///
/// The password is an opaque string; only the user directory compares it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserAccount {
    #[serde(flatten)]
    pub user: User,
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub national_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub driver_license: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport: Option<String>,
}

impl UserAccount {
    pub fn new(user: User, password: impl Into<String>) -> Self {
        Self {
            user,
            password: password.into(),
            national_id: None,
            driver_license: None,
            passport: None,
        }
    }
}

/// Administrator input for creating a user.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub username: String,
    pub password: Option<String>,
    pub name: Option<String>,
    pub role: Option<Role>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub national_id: Option<String>,
    pub driver_license: Option<String>,
    pub passport: Option<String>,
    #[serde(default)]
    pub fund_sources: Vec<String>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl NewUser {
    /// Validate the input and turn it into a stored account.
    ///
    /// Role defaults to Field Staff, name to the username and password to
    /// [`DEFAULT_PASSWORD`]. Fund sources survive only for coordinators.
    pub fn into_account(self, id: UserId) -> Result<UserAccount, ValidationError> {
        let username = self.username.trim().to_string();
        if username.is_empty() {
            return Err(ValidationError::EmptyUsername);
        }

        let national_id = non_blank(self.national_id);
        let driver_license = non_blank(self.driver_license);
        let passport = non_blank(self.passport);
        if national_id.is_none() && driver_license.is_none() && passport.is_none() {
            return Err(ValidationError::MissingIdentityDocument);
        }

        let role = self.role.unwrap_or(Role::FieldStaff);
        let name = non_blank(self.name).unwrap_or_else(|| username.clone());
        let password = self
            .password
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| DEFAULT_PASSWORD.to_string());

        let mut user = User::new(id, username, name, role);
        user.email = non_blank(self.email);
        user.phone = non_blank(self.phone);
        if role == Role::Coordinator {
            user = user.with_fund_sources(
                self.fund_sources
                    .iter()
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect::<Vec<_>>(),
            );
        }

        Ok(UserAccount {
            user,
            password,
            national_id,
            driver_license,
            passport,
        })
    }
}
