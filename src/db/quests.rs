use crate::db::db::Db;
use crate::libs::quest::{Quarter, Quest};
use anyhow::Result;
use chrono::NaiveDateTime;
use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::Arc;

const SCHEMA_QUESTS: &str = "CREATE TABLE IF NOT EXISTS quests (
    id INTEGER PRIMARY KEY,
    title TEXT NOT NULL,
    note TEXT,
    quarter INTEGER NOT NULL,
    year INTEGER NOT NULL,
    done BOOLEAN NOT NULL DEFAULT FALSE,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

const INSERT_QUEST: &str = "INSERT INTO quests (title, note, quarter, year) VALUES (?1, ?2, ?3, ?4)";
const SELECT_BY_QUARTER: &str =
    "SELECT id, title, note, quarter, year, done, created_at FROM quests WHERE year = ?1 AND quarter = ?2 ORDER BY id";
const SELECT_BY_ID: &str = "SELECT id, title, note, quarter, year, done, created_at FROM quests WHERE id = ?1";
const UPDATE_DONE: &str = "UPDATE quests SET done = TRUE WHERE id = ?1";

pub struct Quests {
    pub conn: Arc<Mutex<Connection>>,
}

impl Quests {
    pub fn new() -> Result<Quests> {
        let db_conn = Db::new()?.conn;
        db_conn.execute(SCHEMA_QUESTS, [])?;

        Ok(Quests {
            conn: Arc::new(Mutex::new(db_conn)),
        })
    }

    pub fn insert(&self, quest: &Quest) -> Result<i64> {
        let conn_guard = self.conn.lock();
        conn_guard.execute(
            INSERT_QUEST,
            params![quest.title, quest.note, quest.quarter.number(), quest.year],
        )?;
        Ok(conn_guard.last_insert_rowid())
    }

    pub fn fetch_quarter(&self, year: i32, quarter: Quarter) -> Result<Vec<Quest>> {
        let conn_guard = self.conn.lock();
        let mut stmt = conn_guard.prepare(SELECT_BY_QUARTER)?;
        let quest_iter = stmt.query_map(params![year, quarter.number()], map_quest)?;

        let mut quests = Vec::new();
        for quest in quest_iter {
            quests.push(quest?);
        }
        Ok(quests)
    }

    pub fn fetch_by_id(&self, id: i64) -> Result<Option<Quest>> {
        let conn_guard = self.conn.lock();
        let quest = conn_guard.query_row(SELECT_BY_ID, params![id], map_quest).optional()?;
        Ok(quest)
    }

    /// Marks a quest done. Returns false when the id does not exist.
    pub fn set_done(&self, id: i64) -> Result<bool> {
        let conn_guard = self.conn.lock();
        let updated = conn_guard.execute(UPDATE_DONE, params![id])?;
        Ok(updated > 0)
    }
}

fn map_quest(row: &rusqlite::Row<'_>) -> rusqlite::Result<Quest> {
    let quarter_num: u8 = row.get(3)?;
    Ok(Quest {
        id: Some(row.get(0)?),
        title: row.get(1)?,
        note: row.get(2)?,
        quarter: Quarter::from_number(quarter_num).unwrap_or(Quarter::Q1),
        year: row.get(4)?,
        done: row.get(5)?,
        created_at: row
            .get::<_, Option<String>>(6)?
            .map(|s| NaiveDateTime::parse_from_str(&s, "%Y-%m-%d %H:%M:%S").unwrap()),
    })
}
