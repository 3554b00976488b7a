//! Daily focus-minutes activity log.
//!
//! One row per calendar day, accumulated additively every time a Focus
//! phase ends. The increment happens inside the upsert itself, so two
//! sessions ending at nearly the same instant can never lose each other's
//! minutes to a read-modify-write race.

use crate::db::db::Db;
use anyhow::Result;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

const SCHEMA_LOG: &str = "CREATE TABLE IF NOT EXISTS focus_log (
    id INTEGER NOT NULL PRIMARY KEY,
    date DATE NOT NULL UNIQUE,
    minutes INTEGER NOT NULL DEFAULT 0
)";

/// Atomic additive upsert.
const ADD_MINUTES: &str = "INSERT INTO focus_log (date, minutes) VALUES (?1, ?2)
ON CONFLICT(date) DO UPDATE SET minutes = minutes + excluded.minutes";

const SELECT_BY_DATE: &str = "SELECT minutes FROM focus_log WHERE date = ?1";
const SELECT_BY_MONTH: &str =
    "SELECT date, minutes FROM focus_log WHERE strftime('%Y-%m', date) = strftime('%Y-%m', ?1) ORDER BY date";

pub struct ActivityLog {
    pub conn: Arc<Mutex<Connection>>,
}

impl ActivityLog {
    pub fn new() -> Result<ActivityLog> {
        let db_conn = Db::new()?.conn;
        db_conn.execute(SCHEMA_LOG, [])?;

        Ok(ActivityLog {
            conn: Arc::new(Mutex::new(db_conn)),
        })
    }

    /// Adds focus minutes to a day's total, creating the row if needed.
    pub fn add_minutes(&self, date: NaiveDate, minutes: i64) -> Result<()> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        conn_guard.execute(ADD_MINUTES, params![date_str, minutes])?;
        Ok(())
    }

    pub fn fetch(&self, date: NaiveDate) -> Result<Option<i64>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        let minutes = conn_guard.query_row(SELECT_BY_DATE, [&date_str], |row| row.get(0)).optional()?;
        Ok(minutes)
    }

    /// All logged days in the month containing `date`, in date order.
    pub fn fetch_month(&self, date: NaiveDate) -> Result<Vec<(NaiveDate, i64)>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        let mut stmt = conn_guard.prepare(SELECT_BY_MONTH)?;
        let day_iter = stmt.query_map([&date_str], |row| {
            Ok((
                NaiveDate::parse_from_str(&row.get::<_, String>(0)?, "%Y-%m-%d").unwrap(),
                row.get::<_, i64>(1)?,
            ))
        })?;

        let mut days = Vec::new();
        for day in day_iter {
            days.push(day?);
        }
        Ok(days)
    }
}
