//! Dataset: the whole-snapshot unit exchanged with persistent storage

use crate::{Request, RequestId, TemplateCatalog, UserAccount, UserId};
use serde::{Deserialize, Serialize};

/// Everything the application persists: accounts, templates and requests.
///
/// Requests are kept newest-first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    /// Whether demo data has been loaded into this dataset
    #[serde(rename = "_seeded", default)]
    pub seeded: bool,
    #[serde(default)]
    pub users: Vec<UserAccount>,
    #[serde(default)]
    pub templates: TemplateCatalog,
    #[serde(default)]
    pub requests: Vec<Request>,
}

/// Outcome of resolving a possibly abbreviated request id
#[derive(Debug, PartialEq)]
pub enum RequestLookup<'a> {
    Found(&'a Request),
    NotFound,
    Ambiguous(Vec<&'a RequestId>),
}

impl<'a> RequestLookup<'a> {
    /// Resolve a full id or an unambiguous id prefix among `candidates` only
    pub fn among<I>(candidates: I, id_or_prefix: &str) -> Self
    where
        I: IntoIterator<Item = &'a Request>,
    {
        let candidates: Vec<&'a Request> = candidates.into_iter().collect();
        if let Some(exact) = candidates.iter().copied().find(|r| r.id.as_str() == id_or_prefix) {
            return RequestLookup::Found(exact);
        }
        if id_or_prefix.is_empty() {
            return RequestLookup::NotFound;
        }

        let mut matches: Vec<&'a Request> = candidates
            .into_iter()
            .filter(|r| r.id.as_str().starts_with(id_or_prefix))
            .collect();
        match matches.len() {
            0 => RequestLookup::NotFound,
            1 => RequestLookup::Found(matches.remove(0)),
            _ => RequestLookup::Ambiguous(matches.into_iter().map(|r| &r.id).collect()),
        }
    }
}

impl Dataset {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn request(&self, id: &RequestId) -> Option<&Request> {
        self.requests.iter().find(|r| &r.id == id)
    }

    pub fn request_mut(&mut self, id: &RequestId) -> Option<&mut Request> {
        self.requests.iter_mut().find(|r| &r.id == id)
    }

    /// Resolve a full id or an unambiguous id prefix
    pub fn lookup_request(&self, id_or_prefix: &str) -> RequestLookup<'_> {
        RequestLookup::among(&self.requests, id_or_prefix)
    }

    pub fn account_by_username(&self, username: &str) -> Option<&UserAccount> {
        self.users.iter().find(|a| a.user.username == username)
    }

    pub fn account(&self, id: &UserId) -> Option<&UserAccount> {
        self.users.iter().find(|a| &a.user.id == id)
    }
}
