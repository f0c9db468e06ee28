//! A CLI session: the dataset loaded from disk, the desk over it, and the
//! stores around it. Every mutating command ends with [`Session::save`].

use crate::config::Settings;
use crate::error::{CliError, CliResult};
use srat_engine::{ReimbursementDesk, RequestFilter};
use srat_storage::seed::demo_dataset;
use srat_storage::{AccountDirectory, DatasetStore, FsAttachmentStore, JsonFileStore, UserDirectory};
use srat_types::{RequestId, RequestLookup, User};

pub struct Session {
    store: JsonFileStore,
    attachments: FsAttachmentStore,
    desk: ReimbursementDesk,
}

impl Session {
    /// Load the dataset, seeding demo accounts and templates on first use
    pub async fn open(settings: &Settings) -> CliResult<Self> {
        let store = JsonFileStore::new(&settings.data_file);
        let dataset = store.load_all().await?;
        let mut desk = ReimbursementDesk::with_funders(dataset, settings.funders.clone());

        if desk.seed_if_empty(demo_dataset()) {
            store.save_all(desk.dataset()).await?;
        }

        Ok(Self {
            store,
            attachments: FsAttachmentStore::new(&settings.attachments_dir),
            desk,
        })
    }

    pub async fn login(&self, username: Option<&str>, password: Option<&str>) -> CliResult<User> {
        let (Some(username), Some(password)) = (username, password) else {
            return Err(CliError::NotLoggedIn);
        };
        let directory = AccountDirectory::from_dataset(self.desk.dataset());
        Ok(directory.authenticate(username, password).await?)
    }

    pub fn desk(&self) -> &ReimbursementDesk {
        &self.desk
    }

    pub fn desk_mut(&mut self) -> &mut ReimbursementDesk {
        &mut self.desk
    }

    pub fn attachments(&self) -> &FsAttachmentStore {
        &self.attachments
    }

    pub async fn save(&self) -> CliResult<()> {
        self.store.save_all(self.desk.dataset()).await?;
        Ok(())
    }

    /// Resolve a full request id or a unique prefix of one, among the
    /// requests `actor` can see
    pub fn resolve(&self, actor: &User, id_or_prefix: &str) -> CliResult<RequestId> {
        let visible = self.desk.visible_requests(actor, &RequestFilter::default());
        match RequestLookup::among(visible, id_or_prefix) {
            RequestLookup::Found(request) => Ok(request.id.clone()),
            RequestLookup::NotFound => Err(CliError::NotFound(format!("request {id_or_prefix}"))),
            RequestLookup::Ambiguous(ids) => Err(CliError::InvalidInput(format!(
                "{} requests match '{}', use a longer id",
                ids.len(),
                id_or_prefix
            ))),
        }
    }
}
