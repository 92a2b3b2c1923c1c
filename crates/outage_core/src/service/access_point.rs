//! Process-wide access point for outage storage.
//!
//! # Responsibility
//! - Hold the single per-process outage store location.
//! - Hand out short-lived services bound to a freshly opened connection.
//!
//! # Invariants
//! - At most one access point exists per process; it is never torn down.
//! - It cannot be constructed, cloned or deserialized by callers.
//! - Re-initialization with a different database path is rejected.

use crate::audit::ActorProvider;
use crate::db::open_db;
use crate::repo::outage_repo::{RepoResult, SqliteOutageRepository};
use crate::service::outage_service::OutageService;
use log::info;
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

static ACCESS_POINT: OnceCell<OutageAccessPoint> = OnceCell::new();

/// The single shared entry point to outage storage.
#[derive(Debug)]
pub struct OutageAccessPoint {
    db_path: PathBuf,
}

impl OutageAccessPoint {
    /// Creates the access point on first call and returns it.
    ///
    /// # Errors
    /// - Returns an error when `db_path` is empty.
    /// - Returns an error when already initialized with a different path.
    pub fn init(db_path: impl AsRef<Path>) -> Result<&'static Self, String> {
        let db_path = db_path.as_ref();
        if db_path.as_os_str().is_empty() {
            return Err("db_path cannot be empty".to_string());
        }

        let access_point = ACCESS_POINT.get_or_init(|| {
            info!(
                "event=access_point_init module=service status=ok db_path={}",
                db_path.display()
            );
            Self {
                db_path: db_path.to_path_buf(),
            }
        });

        if access_point.db_path != db_path {
            return Err(format!(
                "outage access point already initialized at `{}`; refusing to switch to `{}`",
                access_point.db_path.display(),
                db_path.display()
            ));
        }

        Ok(access_point)
    }

    /// Returns the access point, or `None` before [`OutageAccessPoint::init`].
    pub fn get() -> Option<&'static Self> {
        ACCESS_POINT.get()
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `f` against a service bound to a new migrated connection.
    ///
    /// The connection is closed before this returns, on success and on error.
    pub fn with_service<T>(
        &self,
        actor: &dyn ActorProvider,
        f: impl FnOnce(&OutageService<SqliteOutageRepository<'_>>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.db_path)?;
        let repo = SqliteOutageRepository::try_new(&conn, actor)?;
        let service = OutageService::new(repo);
        f(&service)
    }
}
