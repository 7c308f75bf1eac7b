//! # Persistence Gateway
//!
//! The narrow contract between the editor and whatever stores projects:
//!
//! - `save(project_id, content)`: last writer wins
//! - `load(project_id)`: the stored content, or `GatewayError::NotFound`
//!
//! Implementations here: an in-memory store for tests and embedding, a
//! JSON-file store on top of [`FileSystem`], and a retrying wrapper.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sitekit_common::{CommonError, FileSystem, RealFileSystem};
use sitekit_model::ProjectContent;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Project not found: {0}")]
    NotFound(String),

    #[error("Conflicting write for project: {0}")]
    Conflict(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Not authorized to access project: {0}")]
    Unauthorized(String),

    #[error("Invalid project id: {0:?}")]
    InvalidProjectId(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl GatewayError {
    /// Whether trying the same call again may succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, GatewayError::Transport(_))
    }
}

/// Save/load contract for project content
pub trait PersistenceGateway {
    fn save(&self, project_id: &str, content: &ProjectContent) -> Result<(), GatewayError>;

    fn load(&self, project_id: &str) -> Result<ProjectContent, GatewayError>;
}

impl<G: PersistenceGateway + ?Sized> PersistenceGateway for &G {
    fn save(&self, project_id: &str, content: &ProjectContent) -> Result<(), GatewayError> {
        (**self).save(project_id, content)
    }

    fn load(&self, project_id: &str) -> Result<ProjectContent, GatewayError> {
        (**self).load(project_id)
    }
}

/// On-disk envelope around project content
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredProject {
    project_id: String,
    saved_at: DateTime<Utc>,
    content: ProjectContent,
}

/// Keeps serialized projects in memory
#[derive(Debug, Default)]
pub struct MemoryGateway {
    store: Mutex<HashMap<String, String>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, project_id: &str) -> bool {
        self.lock().contains_key(project_id)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.store.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl PersistenceGateway for MemoryGateway {
    fn save(&self, project_id: &str, content: &ProjectContent) -> Result<(), GatewayError> {
        let json = serde_json::to_string(content)?;
        self.lock().insert(project_id.to_string(), json);
        Ok(())
    }

    fn load(&self, project_id: &str) -> Result<ProjectContent, GatewayError> {
        let json = self
            .lock()
            .get(project_id)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound(project_id.to_string()))?;

        Ok(serde_json::from_str(&json)?)
    }
}

/// Stores each project as `<root>/<project_id>.json`
pub struct FileGateway<F: FileSystem = RealFileSystem> {
    root: PathBuf,
    fs: F,
}

impl FileGateway<RealFileSystem> {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self::with_fs(root, RealFileSystem)
    }
}

impl<F: FileSystem> FileGateway<F> {
    pub fn with_fs(root: impl Into<PathBuf>, fs: F) -> Self {
        Self {
            root: root.into(),
            fs,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Path a project is stored at
    pub fn path_for(&self, project_id: &str) -> Result<PathBuf, GatewayError> {
        let valid = !project_id.is_empty()
            && project_id
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');

        if !valid {
            return Err(GatewayError::InvalidProjectId(project_id.to_string()));
        }

        Ok(self.root.join(format!("{}.json", project_id)))
    }
}

impl<F: FileSystem> PersistenceGateway for FileGateway<F> {
    fn save(&self, project_id: &str, content: &ProjectContent) -> Result<(), GatewayError> {
        let path = self.path_for(project_id)?;

        let stored = StoredProject {
            project_id: project_id.to_string(),
            saved_at: Utc::now(),
            content: content.clone(),
        };
        let json = serde_json::to_string_pretty(&stored)?;

        self.fs
            .create_dir_all(&self.root)
            .map_err(|e| transport(project_id, e))?;
        self.fs
            .write(&path, &json)
            .map_err(|e| transport(project_id, e))?;

        tracing::info!(project = project_id, path = %path.display(), "project saved");
        Ok(())
    }

    fn load(&self, project_id: &str) -> Result<ProjectContent, GatewayError> {
        let path = self.path_for(project_id)?;

        if !self.fs.exists(&path) {
            return Err(GatewayError::NotFound(project_id.to_string()));
        }

        let json = self
            .fs
            .read_to_string(&path)
            .map_err(|e| transport(project_id, e))?;
        let stored: StoredProject = serde_json::from_str(&json)?;

        tracing::info!(
            project = project_id,
            saved_at = %stored.saved_at,
            "project loaded"
        );
        Ok(stored.content)
    }
}

fn transport(project_id: &str, error: CommonError) -> GatewayError {
    match error {
        CommonError::Io(io) if io.kind() == std::io::ErrorKind::NotFound => {
            GatewayError::NotFound(project_id.to_string())
        }
        CommonError::Io(io) if io.kind() == std::io::ErrorKind::PermissionDenied => {
            GatewayError::Unauthorized(project_id.to_string())
        }
        other => GatewayError::Transport(other.to_string()),
    }
}

/// Retries transport failures of the wrapped gateway
pub struct RetryingGateway<G> {
    inner: G,
    attempts: u32,
}

impl<G: PersistenceGateway> RetryingGateway<G> {
    /// `attempts` is the total number of calls, at least one
    pub fn new(inner: G, attempts: u32) -> Self {
        Self {
            inner,
            attempts: attempts.max(1),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    fn run<T>(
        &self,
        op: &str,
        project_id: &str,
        mut call: impl FnMut() -> Result<T, GatewayError>,
    ) -> Result<T, GatewayError> {
        let mut attempt = 1;
        loop {
            match call() {
                Err(error) if error.is_retryable() && attempt < self.attempts => {
                    tracing::warn!(
                        op,
                        project = project_id,
                        attempt,
                        %error,
                        "persistence call failed, retrying"
                    );
                    attempt += 1;
                }
                result => return result,
            }
        }
    }
}

impl<G: PersistenceGateway> PersistenceGateway for RetryingGateway<G> {
    fn save(&self, project_id: &str, content: &ProjectContent) -> Result<(), GatewayError> {
        self.run("save", project_id, || self.inner.save(project_id, content))
    }

    fn load(&self, project_id: &str) -> Result<ProjectContent, GatewayError> {
        self.run("load", project_id, || self.inner.load(project_id))
    }
}
