use crate::db::db::Db;
use crate::libs::plan::DailyPlan;
use anyhow::Result;
use chrono::NaiveDate;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

const SCHEMA_PLANS: &str = "CREATE TABLE IF NOT EXISTS daily_plans (
    id INTEGER PRIMARY KEY,
    date DATE NOT NULL UNIQUE,
    items TEXT NOT NULL DEFAULT '[]',
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const UPSERT_PLAN: &str = "INSERT INTO daily_plans (date, items, updated_at)
VALUES (?1, ?2, datetime(CURRENT_TIMESTAMP, 'localtime'))
ON CONFLICT(date) DO UPDATE SET items = excluded.items, updated_at = excluded.updated_at";

const SELECT_BY_DATE: &str = "SELECT items FROM daily_plans WHERE date = ?1";

pub struct Plans {
    pub conn: Arc<Mutex<Connection>>,
}

impl Plans {
    pub fn new() -> Result<Plans> {
        let db_conn = Db::new()?.conn;
        db_conn.execute(SCHEMA_PLANS, [])?;

        Ok(Plans {
            conn: Arc::new(Mutex::new(db_conn)),
        })
    }

    pub fn upsert(&self, date: NaiveDate, plan: &DailyPlan) -> Result<()> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        conn_guard.execute(UPSERT_PLAN, params![date_str, serde_json::to_string(&plan.items)?])?;
        Ok(())
    }

    pub fn fetch(&self, date: NaiveDate) -> Result<Option<DailyPlan>> {
        let date_str = date.format("%Y-%m-%d").to_string();
        let conn_guard = self.conn.lock();
        let items_str: Option<String> = conn_guard.query_row(SELECT_BY_DATE, [&date_str], |row| row.get(0)).optional()?;
        match items_str {
            Some(items_str) => Ok(Some(DailyPlan {
                items: serde_json::from_str(&items_str)?,
            })),
            None => Ok(None),
        }
    }
}
