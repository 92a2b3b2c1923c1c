//! Outage repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist and retrieve outages in the `auth_outage` table.
//! - Stamp audit fields (`createdby`, `modifiedby`, `lastmodified`) on write.
//! - Keep SQL details inside core persistence boundary.
//!
//! # Invariants
//! - Id arguments are checked before any statement is prepared.
//! - `save` never mutates the caller's outage.
//! - `createdby` is written on insert only; the update shape has no such field.
//! - Lookup misses are `Ok(None)` and delete misses are `Ok(())`.

use crate::audit::{ActorId, ActorProvider, Clock, SYSTEM_CLOCK};
use crate::db::{ensure_table, DbError};
use crate::model::outage::{Outage, OutageId, OutageValidationError};
use log::{debug, info};
use rusqlite::{named_params, Connection, OptionalExtension, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

const OUTAGE_TABLE: &str = "auth_outage";

const OUTAGE_SELECT_SQL: &str = "SELECT
    id,
    starttime,
    stoptime,
    warntime,
    title,
    description,
    createdby,
    modifiedby,
    lastmodified
FROM auth_outage";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for outage persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Malformed identifier supplied by the caller. Nothing was sent to storage.
    InvalidArgument(String),
    Validation(OutageValidationError),
    /// `save` targeted an id with no stored row.
    NotFound(OutageId),
    InvalidData(String),
    Db(DbError),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "outage not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted outage data: {message}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidArgument(_) | Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<OutageValidationError> for RepoError {
    fn from(value: OutageValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for outage records.
pub trait OutageRepository {
    /// Returns every outage ordered by `starttime`, `stoptime`, `title`.
    fn get_all(&self) -> RepoResult<Vec<Outage>>;
    /// Returns the outage with `id`, or `None` when no row matches.
    fn get_by_id(&self, id: OutageId) -> RepoResult<Option<Outage>>;
    /// Inserts or updates `outage` and returns its id.
    fn save(&self, outage: &Outage) -> RepoResult<OutageId>;
    /// Deletes the outage with `id`. Missing rows are not an error.
    fn delete(&self, id: OutageId) -> RepoResult<()>;
}

/// Parses an untyped identifier (CLI argument, form value).
///
/// # Errors
/// - `InvalidArgument` when `raw` is not an integer or is not positive.
pub fn parse_outage_id(raw: &str) -> RepoResult<OutageId> {
    let trimmed = raw.trim();
    let id = trimmed.parse::<OutageId>().map_err(|_| {
        RepoError::InvalidArgument(format!("outage id must be an integer, got `{trimmed}`"))
    })?;
    ensure_valid_id(id)?;
    Ok(id)
}

fn ensure_valid_id(id: OutageId) -> RepoResult<()> {
    if id <= 0 {
        return Err(RepoError::InvalidArgument(format!(
            "outage id must be positive, got {id}"
        )));
    }
    Ok(())
}

/// Write shape for first persistence. Carries the creator.
struct NewOutageRow<'a> {
    start_time: i64,
    stop_time: i64,
    warn_time: i64,
    title: &'a str,
    description: &'a str,
    created_by: ActorId,
    modified_by: ActorId,
    last_modified: i64,
}

/// Write shape for updates. Has no creator field, so `createdby` is never touched.
struct OutageUpdateRow<'a> {
    id: OutageId,
    start_time: i64,
    stop_time: i64,
    warn_time: i64,
    title: &'a str,
    description: &'a str,
    modified_by: ActorId,
    last_modified: i64,
}

/// SQLite-backed outage repository.
///
/// Borrows the connection and the audit collaborators; it owns no state.
pub struct SqliteOutageRepository<'conn> {
    conn: &'conn Connection,
    actor: &'conn dyn ActorProvider,
    clock: &'conn dyn Clock,
}

impl<'conn> SqliteOutageRepository<'conn> {
    /// Constructs a repository stamping wall-clock time from the system clock.
    ///
    /// # Errors
    /// - `Db(MissingTable)` when `conn` has not been migrated.
    pub fn try_new(conn: &'conn Connection, actor: &'conn dyn ActorProvider) -> RepoResult<Self> {
        Self::with_clock(conn, actor, &SYSTEM_CLOCK)
    }

    /// Constructs a repository with an explicit clock.
    pub fn with_clock(
        conn: &'conn Connection,
        actor: &'conn dyn ActorProvider,
        clock: &'conn dyn Clock,
    ) -> RepoResult<Self> {
        ensure_table(conn, OUTAGE_TABLE)?;
        Ok(Self { conn, actor, clock })
    }

    fn insert_row(&self, row: &NewOutageRow<'_>) -> RepoResult<OutageId> {
        self.conn.execute(
            "INSERT INTO auth_outage (
                starttime,
                stoptime,
                warntime,
                title,
                description,
                createdby,
                modifiedby,
                lastmodified
            ) VALUES (
                :starttime,
                :stoptime,
                :warntime,
                :title,
                :description,
                :createdby,
                :modifiedby,
                :lastmodified
            );",
            named_params! {
                ":starttime": row.start_time,
                ":stoptime": row.stop_time,
                ":warntime": row.warn_time,
                ":title": row.title,
                ":description": row.description,
                ":createdby": row.created_by,
                ":modifiedby": row.modified_by,
                ":lastmodified": row.last_modified,
            },
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_row(&self, row: &OutageUpdateRow<'_>) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE auth_outage
             SET
                starttime = :starttime,
                stoptime = :stoptime,
                warntime = :warntime,
                title = :title,
                description = :description,
                modifiedby = :modifiedby,
                lastmodified = :lastmodified
             WHERE id = :id;",
            named_params! {
                ":id": row.id,
                ":starttime": row.start_time,
                ":stoptime": row.stop_time,
                ":warntime": row.warn_time,
                ":title": row.title,
                ":description": row.description,
                ":modifiedby": row.modified_by,
                ":lastmodified": row.last_modified,
            },
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(row.id));
        }

        Ok(())
    }
}

impl OutageRepository for SqliteOutageRepository<'_> {
    fn get_all(&self) -> RepoResult<Vec<Outage>> {
        let started_at = Instant::now();
        let mut stmt = self.conn.prepare(&format!(
            "{OUTAGE_SELECT_SQL}
             ORDER BY starttime ASC, stoptime ASC, title ASC, id ASC;"
        ))?;

        let mut rows = stmt.query([])?;
        let mut outages = Vec::new();
        while let Some(row) = rows.next()? {
            outages.push(parse_outage_row(row)?);
        }

        debug!(
            "event=outage_list module=repo status=ok count={} duration_ms={}",
            outages.len(),
            started_at.elapsed().as_millis()
        );
        Ok(outages)
    }

    fn get_by_id(&self, id: OutageId) -> RepoResult<Option<Outage>> {
        ensure_valid_id(id)?;

        let mut stmt = self
            .conn
            .prepare(&format!("{OUTAGE_SELECT_SQL} WHERE id = ?1;"))?;
        let outage = stmt
            .query_row([id], |row| Ok(parse_outage_row(row)))
            .optional()?
            .transpose()?;

        Ok(outage)
    }

    fn save(&self, outage: &Outage) -> RepoResult<OutageId> {
        if let Some(id) = outage.id {
            ensure_valid_id(id)?;
        }
        outage.validate()?;

        // Audit fields live only in the write shapes; the caller's value is
        // borrowed immutably.
        let actor = self.actor.current_actor();
        let now = self.clock.now_secs();

        let (id, mode) = match outage.id {
            None => {
                let id = self.insert_row(&NewOutageRow {
                    start_time: outage.start_time,
                    stop_time: outage.stop_time,
                    warn_time: outage.warn_time,
                    title: outage.title.as_str(),
                    description: outage.description.as_str(),
                    created_by: actor,
                    modified_by: actor,
                    last_modified: now,
                })?;
                (id, "insert")
            }
            Some(id) => {
                self.update_row(&OutageUpdateRow {
                    id,
                    start_time: outage.start_time,
                    stop_time: outage.stop_time,
                    warn_time: outage.warn_time,
                    title: outage.title.as_str(),
                    description: outage.description.as_str(),
                    modified_by: actor,
                    last_modified: now,
                })?;
                (id, "update")
            }
        };

        info!(
            "event=outage_save module=repo status=ok mode={} id={} actor={}",
            mode, id, actor
        );
        Ok(id)
    }

    fn delete(&self, id: OutageId) -> RepoResult<()> {
        ensure_valid_id(id)?;

        let deleted = self
            .conn
            .execute("DELETE FROM auth_outage WHERE id = ?1;", [id])?;
        info!(
            "event=outage_delete module=repo status=ok id={} deleted={}",
            id, deleted
        );

        Ok(())
    }
}

fn parse_outage_row(row: &Row<'_>) -> RepoResult<Outage> {
    let id: OutageId = row.get("id")?;
    if id <= 0 {
        return Err(RepoError::InvalidData(format!(
            "invalid id value `{id}` in auth_outage.id"
        )));
    }

    let outage = Outage {
        id: Some(id),
        start_time: row.get("starttime")?,
        stop_time: row.get("stoptime")?,
        warn_time: row.get("warntime")?,
        title: row.get("title")?,
        description: row.get("description")?,
        created_by: Some(row.get("createdby")?),
        modified_by: Some(row.get("modifiedby")?),
        last_modified: Some(row.get("lastmodified")?),
    };
    outage
        .validate()
        .map_err(|err| RepoError::InvalidData(format!("auth_outage row {id}: {err}")))?;

    Ok(outage)
}
