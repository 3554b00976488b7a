//! Display persisted focus sessions for a date.

use crate::db::sessions::Sessions;
use crate::libs::messages::Message;
use crate::libs::view::View;
use crate::msg_print;
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;

#[derive(Debug, Args)]
pub struct SessionsArgs {
    /// Date to fetch sessions for (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,
}

pub async fn cmd(args: SessionsArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let records = Sessions::new()?.fetch_date(date)?;

    if records.is_empty() {
        msg_print!(Message::NoSessionsForDate(date.format("%B %-d, %Y").to_string()));
        return Ok(());
    }

    msg_print!(Message::SessionsTitle(date.format("%B %-d, %Y").to_string()), true);
    View::sessions(&records)?;

    Ok(())
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
