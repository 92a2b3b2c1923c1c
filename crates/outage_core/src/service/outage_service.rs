//! Outage use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for outage scheduling workflows.
//! - Delegate persistence to repository implementations.
//!
//! # Invariants
//! - Service APIs never bypass repository validation/persistence contracts.
//! - Service layer remains storage-agnostic.

use crate::model::outage::{Outage, OutageId};
use crate::repo::outage_repo::{parse_outage_id, OutageRepository, RepoResult};

/// Use-case service wrapper for outage operations.
pub struct OutageService<R: OutageRepository> {
    repo: R,
}

/// Request model for scheduling a new outage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleOutageRequest {
    pub title: String,
    pub description: String,
    /// Outage start in unix epoch seconds.
    pub start_time: i64,
    /// Outage end in unix epoch seconds.
    pub stop_time: i64,
    /// How long before `start_time` users get warned. `None` means no warning.
    pub warn_before_secs: Option<i64>,
}

impl<R: OutageRepository> OutageService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Lists all outages in schedule order.
    pub fn list_outages(&self) -> RepoResult<Vec<Outage>> {
        self.repo.get_all()
    }

    /// Gets one outage by id.
    pub fn get_outage(&self, id: OutageId) -> RepoResult<Option<Outage>> {
        self.repo.get_by_id(id)
    }

    /// Gets one outage by an untyped id such as a CLI argument.
    pub fn get_outage_by_raw_id(&self, raw_id: &str) -> RepoResult<Option<Outage>> {
        self.repo.get_by_id(parse_outage_id(raw_id)?)
    }

    /// Inserts or updates an outage and returns its id.
    pub fn save_outage(&self, outage: &Outage) -> RepoResult<OutageId> {
        self.repo.save(outage)
    }

    /// Creates a new outage from a scheduling request.
    ///
    /// # Contract
    /// - Title and description are trimmed.
    /// - `warn_time = start_time - warn_before_secs` (saturating).
    /// - Returns the newly assigned id.
    pub fn schedule_outage(&self, request: &ScheduleOutageRequest) -> RepoResult<OutageId> {
        let mut outage = Outage::new(
            request.start_time,
            request.stop_time,
            request.title.trim(),
        );
        outage.description = request.description.trim().to_string();
        if let Some(warn_before) = request.warn_before_secs {
            outage.warn_time = request.start_time.saturating_sub(warn_before.max(0));
        }
        self.repo.save(&outage)
    }

    /// Deletes an outage by id. Missing ids are a no-op.
    pub fn delete_outage(&self, id: OutageId) -> RepoResult<()> {
        self.repo.delete(id)
    }

    /// Deletes an outage by an untyped id such as a CLI argument.
    pub fn delete_outage_by_raw_id(&self, raw_id: &str) -> RepoResult<()> {
        self.repo.delete(parse_outage_id(raw_id)?)
    }
}
