use chrono::{Datelike, NaiveDate, NaiveDateTime};
use std::fmt;

/// A calendar quarter. Always computed from a date, never stored opaque.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    pub fn from_date(date: NaiveDate) -> Self {
        match date.month() {
            1..=3 => Quarter::Q1,
            4..=6 => Quarter::Q2,
            7..=9 => Quarter::Q3,
            _ => Quarter::Q4,
        }
    }

    pub fn number(&self) -> u8 {
        match self {
            Quarter::Q1 => 1,
            Quarter::Q2 => 2,
            Quarter::Q3 => 3,
            Quarter::Q4 => 4,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Quarter::Q1),
            2 => Some(Quarter::Q2),
            3 => Some(Quarter::Q3),
            4 => Some(Quarter::Q4),
            _ => None,
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}", self.number())
    }
}

/// A quarterly quest: one concrete goal for a three-month bucket.
#[derive(Debug, Clone)]
pub struct Quest {
    pub id: Option<i64>,
    pub title: String,
    pub note: Option<String>,
    pub quarter: Quarter,
    pub year: i32,
    pub done: bool,
    pub created_at: Option<NaiveDateTime>,
}

impl Quest {
    pub fn new(title: &str, note: Option<String>, date: NaiveDate) -> Self {
        Quest {
            id: None,
            title: title.to_string(),
            note,
            quarter: Quarter::from_date(date),
            year: date.year(),
            done: false,
            created_at: None,
        }
    }
}
