//! Domain model for scheduled outages.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//!
//! # Invariants
//! - Every persisted outage is identified by a positive integer `OutageId`.
//! - Deletion is permanent; there are no soft-delete tombstones.

pub mod outage;
