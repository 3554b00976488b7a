//! Monthly view of the focus-minutes activity log.

use crate::db::activity_log::ActivityLog;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Any date inside the month to show (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,
}

pub async fn cmd(args: LogArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let month_label = date.format("%B %Y").to_string();

    let days = ActivityLog::new()?.fetch_month(date)?;
    if days.is_empty() {
        msg_print!(Message::NoActivityForMonth(month_label));
        return Ok(());
    }

    let total: i64 = days.iter().map(|(_, minutes)| minutes).sum();

    msg_print!(Message::ActivityLogTitle(month_label), true);
    View::activity(&days, total)?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
