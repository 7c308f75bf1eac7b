pub mod apply;
pub mod init;
pub mod set;
pub mod show;
pub mod types;

pub use apply::{apply, ApplyArgs};
pub use init::{init, InitArgs};
pub use set::{set, SetArgs};
pub use show::{show, ShowArgs};
pub use types::{types, TypesArgs};

use crate::config::Config;
use anyhow::{Context, Result};
use sitekit_editor::{EditSession, FileGateway, RetryingGateway};
use std::path::Path;

pub type Store = RetryingGateway<FileGateway>;

/// File-backed project store for the working directory
pub fn open_store(cwd: &Path) -> Result<Store> {
    let config = Config::load(cwd)?;
    let root = config.store_dir(cwd);
    tracing::debug!(store = %root.display(), retries = config.save_retries, "opening project store");

    Ok(RetryingGateway::new(FileGateway::new(root), config.save_retries))
}

pub fn load_session(store: &Store, project_id: &str) -> Result<EditSession> {
    EditSession::load(store, project_id)
        .with_context(|| format!("cannot open project {:?}", project_id))
}
