//! Database schema migration management and versioning.
//!
//! Keeps the SQLite schema evolving in lockstep with releases. Every change
//! is a numbered migration applied inside a transaction and recorded in the
//! `migrations` table, so any database can be brought forward from any
//! version it was left at.

use crate::libs::messages::Message;
use crate::{msg_debug, msg_info};
use anyhow::Result;
use rusqlite::{params, Connection, Transaction};

/// Tracking table: one row per applied migration.
const MIGRATIONS_TABLE: &str = "
CREATE TABLE IF NOT EXISTS migrations (
    id INTEGER PRIMARY KEY,
    version INTEGER NOT NULL UNIQUE,
    name TEXT NOT NULL,
    applied_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

/// A single schema change: version, descriptive name and the transformation
/// applied within a transaction.
#[derive(Debug, Clone)]
struct Migration {
    version: u32,
    name: &'static str,
    up: fn(&Transaction) -> Result<()>,
}

/// Registry of all migrations in version order.
pub struct MigrationManager {
    migrations: Vec<Migration>,
}

impl MigrationManager {
    pub fn new() -> Self {
        let mut manager = Self { migrations: Vec::new() };
        manager.register_migrations();
        manager
    }

    fn register_migrations(&mut self) {
        // Version 1: focus tracking tables and their indices
        self.add_migration(1, "create_focus_tables", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS focus_sessions (
        id INTEGER NOT NULL PRIMARY KEY,
        date DATE NOT NULL,
        session_number INTEGER NOT NULL,
        goal TEXT NOT NULL DEFAULT '',
        captured_thoughts TEXT NOT NULL DEFAULT '',
        reflection TEXT NOT NULL DEFAULT '',
        procrastination INTEGER NOT NULL DEFAULT 0,
        distraction INTEGER NOT NULL DEFAULT 0,
        burnout INTEGER NOT NULL DEFAULT 0,
        perfectionism INTEGER NOT NULL DEFAULT 0,
        toolkit_usage TEXT NOT NULL DEFAULT '{}',
        recharge_usage TEXT NOT NULL DEFAULT '{}',
        planned_minutes INTEGER NOT NULL DEFAULT 0,
        actual_minutes INTEGER NOT NULL DEFAULT 0,
        started_at TIMESTAMP,
        ended_at TIMESTAMP,
        total_pause_seconds INTEGER NOT NULL DEFAULT 0,
        completed BOOLEAN NOT NULL DEFAULT FALSE,
        is_early_exit BOOLEAN NOT NULL DEFAULT FALSE,
        UNIQUE(date, session_number)
    )",
                [],
            )?;

            tx.execute(
                "CREATE TABLE IF NOT EXISTS focus_log (
        id INTEGER NOT NULL PRIMARY KEY,
        date DATE NOT NULL UNIQUE,
        minutes INTEGER NOT NULL DEFAULT 0
    )",
                [],
            )?;

            tx.execute("CREATE INDEX IF NOT EXISTS idx_focus_sessions_date ON focus_sessions(date)", [])?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_focus_log_date ON focus_log(date)", [])?;

            Ok(())
        });

        // Version 2: quarterly quests
        self.add_migration(2, "add_quests", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS quests (
                    id INTEGER PRIMARY KEY,
                    title TEXT NOT NULL,
                    note TEXT,
                    quarter INTEGER NOT NULL,
                    year INTEGER NOT NULL,
                    done BOOLEAN NOT NULL DEFAULT FALSE,
                    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            tx.execute("CREATE INDEX IF NOT EXISTS idx_quests_year_quarter ON quests(year, quarter)", [])?;
            Ok(())
        });

        // Version 3: daily plans with JSON items
        self.add_migration(3, "add_daily_plans", |tx| {
            tx.execute(
                "CREATE TABLE IF NOT EXISTS daily_plans (
                    id INTEGER PRIMARY KEY,
                    date DATE NOT NULL UNIQUE,
                    items TEXT NOT NULL DEFAULT '[]',
                    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
                )",
                [],
            )?;
            Ok(())
        });
    }

    fn add_migration(&mut self, version: u32, name: &'static str, up: fn(&Transaction) -> Result<()>) {
        self.migrations.push(Migration { version, name, up });
    }

    /// Applies all pending migrations in order, each recorded on success.
    pub fn run_migrations(&self, conn: &mut Connection) -> Result<()> {
        conn.execute(MIGRATIONS_TABLE, [])?;

        let current_version = self.get_current_version(conn)?;
        let pending: Vec<&Migration> = self.migrations.iter().filter(|m| m.version > current_version).collect();

        if pending.is_empty() {
            msg_debug!("Database is up to date");
            return Ok(());
        }

        msg_info!(Message::MigrationsFound(pending.len()));

        let tx = conn.transaction()?;
        for migration in pending {
            msg_debug!(format!("Applying migration v{}: {}", migration.version, migration.name));
            (migration.up)(&tx)?;
            tx.execute(
                "INSERT INTO migrations (version, name) VALUES (?1, ?2)",
                params![migration.version, migration.name],
            )?;
        }
        tx.commit()?;

        Ok(())
    }

    fn get_current_version(&self, conn: &Connection) -> Result<u32> {
        let version: Option<u32> = conn.query_row("SELECT MAX(version) FROM migrations", [], |row| row.get(0)).unwrap_or(Some(0));

        Ok(version.unwrap_or(0))
    }

    pub fn get_migration_history(&self, conn: &Connection) -> Result<Vec<(u32, String, String)>> {
        let mut stmt = conn.prepare("SELECT version, name, applied_at FROM migrations ORDER BY version")?;

        let history = stmt
            .query_map([], |row| Ok((row.get::<_, u32>(0)?, row.get::<_, String>(1)?, row.get::<_, String>(2)?)))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(history)
    }

    fn latest_version(&self) -> u32 {
        self.migrations.last().map(|m| m.version).unwrap_or(0)
    }
}

impl Default for MigrationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// Brings a connection up to the latest schema version.
pub fn init_with_migrations(conn: &mut Connection) -> Result<()> {
    let manager = MigrationManager::new();
    manager.run_migrations(conn)?;
    Ok(())
}

/// Current schema version, 0 for a fresh database.
pub fn get_db_version(conn: &Connection) -> Result<u32> {
    let manager = MigrationManager::new();
    manager.get_current_version(conn)
}

/// Whether pending migrations exist for this connection.
pub fn needs_migration(conn: &Connection) -> Result<bool> {
    let manager = MigrationManager::new();
    let current = manager.get_current_version(conn)?;
    Ok(current < manager.latest_version())
}
