//! Audit stamping collaborators.
//!
//! # Responsibility
//! - Supply the acting user identity for `createdby`/`modifiedby`.
//! - Supply wall-clock time for `lastmodified`.
//!
//! Both are passed into repositories explicitly so callers and tests can
//! substitute them.

use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of whoever performs a write.
pub type ActorId = i64;

/// Source of the current actor identity.
pub trait ActorProvider {
    fn current_actor(&self) -> ActorId;
}

/// Actor provider that always reports the same identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedActor(pub ActorId);

impl ActorProvider for FixedActor {
    fn current_actor(&self) -> ActorId {
        self.0
    }
}

impl<F> ActorProvider for F
where
    F: Fn() -> ActorId,
{
    fn current_actor(&self) -> ActorId {
        self()
    }
}

/// Source of wall-clock time in unix epoch seconds.
pub trait Clock {
    fn now_secs(&self) -> i64;
}

/// Clock backed by the operating system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_secs(&self) -> i64 {
        // Clocks set before 1970 are treated as the epoch itself.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| i64::try_from(elapsed.as_secs()).unwrap_or(i64::MAX))
            .unwrap_or(0)
    }
}

/// Clock frozen at one instant. Used by import paths and tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_secs(&self) -> i64 {
        self.0
    }
}

pub(crate) static SYSTEM_CLOCK: SystemClock = SystemClock;
