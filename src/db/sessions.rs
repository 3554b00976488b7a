//! Database operations for focus session records.
//!
//! One row per (date, session_number). Records are written by upsert so the
//! end-of-Focus write and the end-of-Reflect write land on the same row,
//! and a retried final save after a failure cannot duplicate anything.
//!
//! Session numbers are allocated here, at the moment Plan ends: 1 plus the
//! highest number already stored for the day. A session abandoned during
//! Plan never reaches the database and therefore never reserves a number.

use crate::db::db::Db;
use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::Arc;

const SCHEMA_SESSIONS: &str = "CREATE TABLE IF NOT EXISTS focus_sessions (
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
)";

/// Upsert keyed by (date, session_number); every mutable column is replaced.
const UPSERT_SESSION: &str = "INSERT INTO focus_sessions (
    date, session_number, goal, captured_thoughts, reflection,
    procrastination, distraction, burnout, perfectionism,
    toolkit_usage, recharge_usage, planned_minutes, actual_minutes,
    started_at, ended_at, total_pause_seconds, completed, is_early_exit
) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
ON CONFLICT(date, session_number) DO UPDATE SET
    goal = excluded.goal,
    captured_thoughts = excluded.captured_thoughts,
    reflection = excluded.reflection,
    procrastination = excluded.procrastination,
    distraction = excluded.distraction,
    burnout = excluded.burnout,
    perfectionism = excluded.perfectionism,
    toolkit_usage = excluded.toolkit_usage,
    recharge_usage = excluded.recharge_usage,
    planned_minutes = excluded.planned_minutes,
    actual_minutes = excluded.actual_minutes,
    started_at = excluded.started_at,
    ended_at = excluded.ended_at,
    total_pause_seconds = excluded.total_pause_seconds,
    completed = excluded.completed,
    is_early_exit = excluded.is_early_exit";

const SELECT_MAX_NUMBER: &str = "SELECT MAX(session_number) FROM focus_sessions WHERE date = ?1";
const SELECT_BY_DATE: &str = "SELECT date, session_number, goal, captured_thoughts, reflection,
    procrastination, distraction, burnout, perfectionism, toolkit_usage, recharge_usage,
    planned_minutes, actual_minutes, started_at, ended_at, total_pause_seconds, completed, is_early_exit
    FROM focus_sessions WHERE date = ?1 ORDER BY session_number";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One persisted focus session.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSessionRecord {
    pub date: NaiveDate,
    pub session_number: u32,
    pub goal: String,
    pub captured_thoughts: String,
    pub reflection: String,
    pub procrastination: u32,
    pub distraction: u32,
    pub burnout: u32,
    pub perfectionism: u32,
    pub toolkit_usage: BTreeMap<String, u32>,
    pub recharge_usage: BTreeMap<String, u32>,
    pub planned_minutes: i64,
    pub actual_minutes: i64,
    pub started_at: Option<NaiveDateTime>,
    pub ended_at: Option<NaiveDateTime>,
    pub total_pause_seconds: i64,
    pub completed: bool,
    pub is_early_exit: bool,
}

impl FocusSessionRecord {
    pub fn disruptor_total(&self) -> u32 {
        self.procrastination + self.distraction + self.burnout + self.perfectionism
    }
}

/// Repository for focus session records.
///
/// The connection is shared behind a mutex so the session controller and
/// views can hold the same handle across await points.
pub struct Sessions {
    pub conn: Arc<Mutex<Connection>>,
}

impl Sessions {
    pub fn new() -> Result<Sessions> {
        let db_conn = Db::new()?.conn;
        db_conn.execute(SCHEMA_SESSIONS, [])?;

        Ok(Sessions {
            conn: Arc::new(Mutex::new(db_conn)),
        })
    }

    /// Allocates the next session number for a day: 1 + highest persisted.
    pub fn next_session_number(&self, date: NaiveDate) -> Result<u32> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        let max: Option<u32> = conn_guard
            .query_row(SELECT_MAX_NUMBER, [&date_str], |row| row.get(0))
            .optional()?
            .flatten();
        Ok(max.unwrap_or(0) + 1)
    }

    /// Inserts or replaces the record for (date, session_number).
    pub fn upsert(&self, record: &FocusSessionRecord) -> Result<()> {
        let conn_guard = self.conn.lock();
        conn_guard.execute(
            UPSERT_SESSION,
            params![
                record.date.format("%Y-%m-%d").to_string(),
                record.session_number,
                record.goal,
                record.captured_thoughts,
                record.reflection,
                record.procrastination,
                record.distraction,
                record.burnout,
                record.perfectionism,
                serde_json::to_string(&record.toolkit_usage)?,
                serde_json::to_string(&record.recharge_usage)?,
                record.planned_minutes,
                record.actual_minutes,
                record.started_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
                record.ended_at.map(|t| t.format(TIMESTAMP_FORMAT).to_string()),
                record.total_pause_seconds,
                record.completed,
                record.is_early_exit,
            ],
        )?;
        Ok(())
    }

    pub fn fetch_date(&self, date: NaiveDate) -> Result<Vec<FocusSessionRecord>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        let mut stmt = conn_guard.prepare(SELECT_BY_DATE)?;
        let record_iter = stmt.query_map([&date_str], |row| {
            let toolkit_str: String = row.get(9)?;
            let recharge_str: String = row.get(10)?;
            Ok(FocusSessionRecord {
                date: NaiveDate::parse_from_str(&row.get::<_, String>(0)?, "%Y-%m-%d").unwrap(),
                session_number: row.get(1)?,
                goal: row.get(2)?,
                captured_thoughts: row.get(3)?,
                reflection: row.get(4)?,
                procrastination: row.get(5)?,
                distraction: row.get(6)?,
                burnout: row.get(7)?,
                perfectionism: row.get(8)?,
                toolkit_usage: serde_json::from_str(&toolkit_str).unwrap_or_default(),
                recharge_usage: serde_json::from_str(&recharge_str).unwrap_or_default(),
                planned_minutes: row.get(11)?,
                actual_minutes: row.get(12)?,
                started_at: row
                    .get::<_, Option<String>>(13)?
                    .map(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).unwrap()),
                ended_at: row
                    .get::<_, Option<String>>(14)?
                    .map(|s| NaiveDateTime::parse_from_str(&s, TIMESTAMP_FORMAT).unwrap()),
                total_pause_seconds: row.get(15)?,
                completed: row.get(16)?,
                is_early_exit: row.get(17)?,
            })
        })?;

        let mut records = Vec::new();
        for record in record_iter {
            records.push(record?);
        }
        Ok(records)
    }
}
