//! Core persistence for scheduled outages (maintenance windows).
//! This crate is the single source of truth for outage record invariants.

pub mod audit;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use audit::{ActorId, ActorProvider, Clock, FixedActor, FixedClock, SystemClock};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::outage::{Outage, OutageId, OutageStatus, OutageValidationError};
pub use repo::outage_repo::{
    parse_outage_id, OutageRepository, RepoError, RepoResult, SqliteOutageRepository,
};
pub use service::access_point::OutageAccessPoint;
pub use service::outage_service::{OutageService, ScheduleOutageRequest};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
