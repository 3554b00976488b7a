//! Quarterly quest management.

use crate::db::quests::Quests;
use crate::libs::messages::Message;
use crate::libs::quest::{Quarter, Quest};
use crate::libs::view::View;
use crate::{msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Datelike, Local};
use clap::{Args, Subcommand};

#[derive(Debug, Args)]
pub struct QuestArgs {
    #[command(subcommand)]
    command: QuestCommand,
}

#[derive(Debug, Subcommand)]
enum QuestCommand {
    /// Add a quest to the current quarter
    Add {
        title: String,
        /// Optional free-form note
        #[arg(long, short)]
        note: Option<String>,
    },
    /// List quests for a quarter (defaults to the current one)
    List {
        #[arg(long, short)]
        quarter: Option<u8>,
        #[arg(long, short)]
        year: Option<i32>,
    },
    /// Mark a quest done
    Done { id: i64 },
}

pub async fn cmd(args: QuestArgs) -> Result<()> {
    let quests = Quests::new()?;
    let today = Local::now().date_naive();

    match args.command {
        QuestCommand::Add { title, note } => {
            let quest = Quest::new(&title, note, today);
            quests.insert(&quest)?;
            msg_success!(Message::QuestAdded(title));
        }
        QuestCommand::List { quarter, year } => {
            let quarter = quarter
                .and_then(Quarter::from_number)
                .unwrap_or_else(|| Quarter::from_date(today));
            let year = year.unwrap_or_else(|| today.year());
            let label = format!("{} {}", quarter, year);

            let found = quests.fetch_quarter(year, quarter)?;
            if found.is_empty() {
                msg_print!(Message::NoQuestsForQuarter(label));
                return Ok(());
            }
            msg_print!(Message::QuestsTitle(label), true);
            View::quests(&found)?;
        }
        QuestCommand::Done { id } => match quests.fetch_by_id(id)? {
            Some(quest) => {
                quests.set_done(id)?;
                msg_success!(Message::QuestCompleted(quest.title));
            }
            None => msg_warning!(Message::QuestNotFound(id)),
        },
    }

    Ok(())
}
