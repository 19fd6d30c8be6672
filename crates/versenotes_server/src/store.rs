//! Request-scoped access to the SQLite database.
//!
//! # Responsibility
//! - Bootstrap the schema once at startup.
//! - Give every request its own connection on the blocking pool.
//!
//! # Invariants
//! - `Store` is cheap to clone and holds no open connection.
//! - Request jobs never run on async worker threads.

use log::error;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::task::{self, JoinError};
use versenotes_core::db::{connect_db, open_db, DbResult};
use versenotes_core::{RepoError, RepoResult};

/// Failure of one request job.
#[derive(Debug)]
pub enum StoreError {
    Repo(RepoError),
    /// The blocking job panicked or was cancelled.
    Worker(JoinError),
}

impl StoreError {
    /// Returns whether this failure was caused by caller input.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Repo(err) if err.is_validation())
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Worker(err) => write!(f, "request worker failed: {err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Worker(err) => Some(err),
        }
    }
}

impl From<RepoError> for StoreError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<JoinError> for StoreError {
    fn from(value: JoinError) -> Self {
        Self::Worker(value)
    }
}

/// Handle to the database file, injected into every handler.
#[derive(Debug, Clone)]
pub struct Store {
    path: Arc<PathBuf>,
}

impl Store {
    /// Opens the database at `path`, creating the schema when absent.
    pub fn open(path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        drop(open_db(&path)?);
        Ok(Self {
            path: Arc::new(path),
        })
    }

    pub fn path(&self) -> &Path {
        self.path.as_path()
    }

    /// Runs `job` against a fresh connection on the blocking pool.
    pub async fn run<T, F>(&self, job: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut Connection) -> RepoResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let path = Arc::clone(&self.path);
        let outcome = task::spawn_blocking(move || -> RepoResult<T> {
            let mut conn = connect_db(path.as_path())?;
            job(&mut conn)
        })
        .await
        .map_err(|err| {
            error!("event=store_job module=store status=error error={err}");
            StoreError::from(err)
        })?;

        Ok(outcome?)
    }
}
