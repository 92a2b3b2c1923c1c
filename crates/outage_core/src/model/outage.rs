//! Outage domain model.
//!
//! # Responsibility
//! - Define the scheduled maintenance window record persisted in `auth_outage`.
//! - Own field-level validation for outage values.
//!
//! # Invariants
//! - `id` is `None` until the first save and never changes afterwards.
//! - `stop_time` is strictly after `start_time`.
//! - `warn_time` is not later than `start_time`.
//! - Audit fields are stamped by the repository, never by callers.

use crate::audit::ActorId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of one `auth_outage` row. Always positive once assigned.
pub type OutageId = i64;

/// Scheduled maintenance/downtime window.
///
/// Timestamps are unix epoch seconds. Serialized names follow the
/// `auth_outage` column names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outage {
    /// `None` signals "not yet persisted".
    pub id: Option<OutageId>,
    #[serde(rename = "starttime")]
    pub start_time: i64,
    #[serde(rename = "stoptime")]
    pub stop_time: i64,
    /// When users start seeing the upcoming-outage warning.
    #[serde(rename = "warntime")]
    pub warn_time: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "createdby")]
    pub created_by: Option<ActorId>,
    #[serde(rename = "modifiedby")]
    pub modified_by: Option<ActorId>,
    #[serde(rename = "lastmodified")]
    pub last_modified: Option<i64>,
}

impl Outage {
    /// Creates a transient outage with no identity and no audit fields.
    ///
    /// `warn_time` starts equal to `start_time` (no advance warning).
    pub fn new(start_time: i64, stop_time: i64, title: impl Into<String>) -> Self {
        Self {
            id: None,
            start_time,
            stop_time,
            warn_time: start_time,
            title: title.into(),
            description: String::new(),
            created_by: None,
            modified_by: None,
            last_modified: None,
        }
    }

    /// Validates field-level invariants.
    ///
    /// # Errors
    /// - `NonPositiveId` when an assigned id is zero or negative.
    /// - `EmptyTitle` when the title is blank.
    /// - `InvalidTimeRange` when `stop_time <= start_time`.
    /// - `WarnAfterStart` when `warn_time > start_time`.
    pub fn validate(&self) -> Result<(), OutageValidationError> {
        if let Some(id) = self.id {
            if id <= 0 {
                return Err(OutageValidationError::NonPositiveId(id));
            }
        }

        if self.title.trim().is_empty() {
            return Err(OutageValidationError::EmptyTitle);
        }

        if self.stop_time <= self.start_time {
            return Err(OutageValidationError::InvalidTimeRange {
                start_time: self.start_time,
                stop_time: self.stop_time,
            });
        }

        if self.warn_time > self.start_time {
            return Err(OutageValidationError::WarnAfterStart {
                warn_time: self.warn_time,
                start_time: self.start_time,
            });
        }

        Ok(())
    }

    /// Length of the outage window in seconds, clamped to `i64::MAX`.
    pub fn duration_secs(&self) -> i64 {
        self.stop_time.saturating_sub(self.start_time)
    }

    /// Returns whether `at` falls inside `[start_time, stop_time)`.
    pub fn is_active_at(&self, at: i64) -> bool {
        self.start_time <= at && at < self.stop_time
    }

    /// Returns whether `at` falls inside the warning period `[warn_time, start_time)`.
    pub fn is_warning_at(&self, at: i64) -> bool {
        self.warn_time <= at && at < self.start_time
    }

    /// Classifies the outage relative to instant `at`.
    pub fn status_at(&self, at: i64) -> OutageStatus {
        if self.is_active_at(at) {
            OutageStatus::Active
        } else if self.is_warning_at(at) {
            OutageStatus::Warning
        } else if at < self.start_time {
            OutageStatus::Upcoming
        } else {
            OutageStatus::Ended
        }
    }
}

/// Where an outage window stands relative to a given instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutageStatus {
    /// Before `warn_time`.
    Upcoming,
    /// Inside `[warn_time, start_time)`.
    Warning,
    Active,
    /// At or after `stop_time`.
    Ended,
}

impl OutageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upcoming => "upcoming",
            Self::Warning => "warning",
            Self::Active => "active",
            Self::Ended => "ended",
        }
    }
}

impl Display for OutageStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field-level validation failures for [`Outage`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutageValidationError {
    NonPositiveId(OutageId),
    EmptyTitle,
    InvalidTimeRange { start_time: i64, stop_time: i64 },
    WarnAfterStart { warn_time: i64, start_time: i64 },
}

impl Display for OutageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NonPositiveId(id) => write!(f, "outage id must be positive, got {id}"),
            Self::EmptyTitle => write!(f, "outage title cannot be empty"),
            Self::InvalidTimeRange {
                start_time,
                stop_time,
            } => write!(
                f,
                "stoptime ({stop_time}) must be after starttime ({start_time})"
            ),
            Self::WarnAfterStart {
                warn_time,
                start_time,
            } => write!(
                f,
                "warntime ({warn_time}) cannot be after starttime ({start_time})"
            ),
        }
    }
}

impl Error for OutageValidationError {}
