//! Export focus sessions to CSV or JSON.

use crate::db::sessions::{FocusSessionRecord, Sessions};
use crate::libs::messages::Message;
use crate::{msg_print, msg_success};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Date to export sessions for (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,

    /// Output format
    #[arg(long, short, value_enum, default_value_t = ExportFormat::Csv)]
    format: ExportFormat,

    /// Output file (defaults to sessions_<date>.<ext>)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

/// Flat row shape shared by both formats.
#[derive(Debug, Serialize)]
struct ExportRow {
    date: String,
    session_number: u32,
    goal: String,
    planned_minutes: i64,
    actual_minutes: i64,
    total_pause_seconds: i64,
    procrastination: u32,
    distraction: u32,
    burnout: u32,
    perfectionism: u32,
    completed: bool,
    is_early_exit: bool,
}

impl From<&FocusSessionRecord> for ExportRow {
    fn from(record: &FocusSessionRecord) -> Self {
        ExportRow {
            date: record.date.format("%Y-%m-%d").to_string(),
            session_number: record.session_number,
            goal: record.goal.clone(),
            planned_minutes: record.planned_minutes,
            actual_minutes: record.actual_minutes,
            total_pause_seconds: record.total_pause_seconds,
            procrastination: record.procrastination,
            distraction: record.distraction,
            burnout: record.burnout,
            perfectionism: record.perfectionism,
            completed: record.completed,
            is_early_exit: record.is_early_exit,
        }
    }
}

pub async fn cmd(args: ExportArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let records = Sessions::new()?.fetch_date(date)?;

    if records.is_empty() {
        msg_print!(Message::NoSessionsToExport(date.format("%Y-%m-%d").to_string()));
        return Ok(());
    }

    let extension = match args.format {
        ExportFormat::Csv => "csv",
        ExportFormat::Json => "json",
    };
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("sessions_{}.{}", date.format("%Y-%m-%d"), extension)));

    let rows: Vec<ExportRow> = records.iter().map(ExportRow::from).collect();
    match args.format {
        ExportFormat::Csv => {
            let mut wtr = csv::Writer::from_path(&output)?;
            for row in &rows {
                wtr.serialize(row)?;
            }
            wtr.flush()?;
        }
        ExportFormat::Json => {
            serde_json::to_writer_pretty(File::create(&output)?, &rows)?;
        }
    }

    msg_success!(Message::ExportCompleted(output.display().to_string()));
    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
