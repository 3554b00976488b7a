//! Database layer for the lifeos application.
//!
//! A local SQLite persistence layer with one module per entity. The core
//! `Db` manager opens the connection and applies migrations; each
//! repository wraps its own connection and owns the SQL for its table.

/// Core database connection and initialization.
pub mod db;

/// Versioned schema migration runner.
pub mod migrations;

/// Focus session records, upserted by (date, session_number).
pub mod sessions;

/// Daily focus-minutes log with atomic additive updates.
pub mod activity_log;

/// Quarterly quest storage.
pub mod quests;

/// Daily plan storage (ordered items as JSON).
pub mod plans;
