//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Own the process-wide access point for callers that need global reach.

pub mod access_point;
pub mod outage_service;
