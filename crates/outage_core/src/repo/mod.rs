//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `Outage::validate()` before persistence.
//! - Malformed ids, missing rows and transport failures stay distinct:
//!   `InvalidArgument`, `Ok(None)`/`Ok(())`, and `Db` respectively.

pub mod outage_repo;
