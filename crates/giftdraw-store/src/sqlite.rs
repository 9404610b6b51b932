//! SQLite implementation of the Store trait.
//!
//! Uses rusqlite with bundled SQLite, wrapped in async via
//! `tokio::task::spawn_blocking`. Exclusive sections run inside a single
//! `BEGIN IMMEDIATE` transaction, so the read of the roster and the
//! conditional rewrite are atomic even across processes sharing the file.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use rusqlite::{params, Connection, TransactionBehavior};
use tracing::debug;

use giftdraw_core::{validate_roster, CoreError, Participant, ParticipantId, Roster};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::seed::SeedSource;
use crate::traits::{Access, Store};

/// How long a writer waits for another process's transaction to finish.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist. An empty
    /// participants table is filled from `seed`.
    pub fn open(path: impl AsRef<Path>, seed: &SeedSource) -> Result<Self> {
        let conn = Connection::open(path)?;
        Self::init(conn, seed)
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory(seed: &SeedSource) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init(conn, seed)
    }

    fn init(mut conn: Connection, seed: &SeedSource) -> Result<Self> {
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migration::migrate(&mut conn)?;

        let count: i64 = conn.query_row("SELECT COUNT(*) FROM participants", [], |row| row.get(0))?;
        if count == 0 {
            let roster = seed.load()?;
            let tx = conn.transaction()?;
            write_roster(&tx, &roster)?;
            tx.commit()?;
            debug!(participants = roster.len(), "Seeded participants table");
        }

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Execute a blocking operation on the connection off the async runtime.
    async fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);

        tokio::task::spawn_blocking(move || {
            let mut conn = lock(&conn)?;
            f(&mut conn)
        })
        .await
        .map_err(|e| StoreError::Task(format!("spawn_blocking failed: {}", e)))?
    }
}

fn lock(conn: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>> {
    conn.lock()
        .map_err(|e| StoreError::LockPoisoned(format!("connection mutex poisoned: {}", e)))
}

// Helper to convert a row to Participant
fn row_to_participant(row: &rusqlite::Row<'_>) -> rusqlite::Result<Participant> {
    Ok(Participant {
        id: ParticipantId::new(row.get::<_, String>("id")?),
        display_name: row.get("display_name")?,
        has_drawn: row.get("has_drawn")?,
        drawn_target: row.get::<_, Option<String>>("drawn_target")?.map(ParticipantId::new),
        is_assigned_as_target: row.get("is_assigned_as_target")?,
        assigned_by: row.get::<_, Option<String>>("assigned_by")?.map(ParticipantId::new),
    })
}

fn read_roster(conn: &Connection) -> Result<Roster> {
    let participants = conn
        .prepare(
            "SELECT id, display_name, has_drawn, drawn_target, is_assigned_as_target, assigned_by
             FROM participants ORDER BY position",
        )?
        .query_map([], row_to_participant)?
        .collect::<rusqlite::Result<Vec<_>>>()?;

    let roster = Roster::new(participants);
    validate_roster(&roster).map_err(CoreError::from)?;
    Ok(roster)
}

fn write_roster(conn: &Connection, roster: &Roster) -> Result<()> {
    validate_roster(roster).map_err(CoreError::from)?;

    conn.execute("DELETE FROM participants", [])?;
    let mut stmt = conn.prepare(
        "INSERT INTO participants (
            position, id, display_name, has_drawn, drawn_target, is_assigned_as_target, assigned_by
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;

    for (position, p) in roster.iter().enumerate() {
        stmt.execute(params![
            position as i64,
            p.id.as_str(),
            p.display_name,
            p.has_drawn,
            p.drawn_target.as_ref().map(ParticipantId::as_str),
            p.is_assigned_as_target,
            p.assigned_by.as_ref().map(ParticipantId::as_str),
        ])?;
    }

    Ok(())
}

#[async_trait]
impl Store for SqliteStore {
    async fn load(&self) -> Result<Roster> {
        self.with_conn(|conn| read_roster(conn)).await
    }

    async fn save(&self, roster: &Roster) -> Result<()> {
        let roster = roster.clone();

        self.with_conn(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            write_roster(&tx, &roster)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    async fn with_exclusive_access<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Roster) -> Access<T> + Send + 'static,
        T: Send + 'static,
    {
        self.with_conn(move |conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let mut roster = read_roster(&tx)?;

            match f(&mut roster) {
                Access::Commit(value) => {
                    write_roster(&tx, &roster)?;
                    tx.commit()?;
                    Ok(value)
                }
                // Dropping the transaction rolls it back.
                Access::Abort(value) => Ok(value),
            }
        })
        .await
    }
}
