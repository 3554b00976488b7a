//! Daily plan editor.
//!
//! An interactive loop over the day's plan items. Every edit is observed by
//! the debounced autosave, which flushes the draft to the local cache once
//! the plan has been stable for the configured delay; finishing the loop
//! persists to the database and clears the draft. If a previous edit was
//! interrupted, the cached draft is restored in preference to the saved
//! plan.

use crate::db::plans::Plans;
use crate::libs::autosave::Autosave;
use crate::libs::config::Config;
use crate::libs::draft::DraftCache;
use crate::libs::messages::Message;
use crate::libs::plan::{DailyPlan, PlanItem};
use crate::libs::view::View;
use crate::{msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::Args;
use std::io::{self, BufRead, Write};
use std::time::{Duration, Instant};

const DRAFT_KIND: &str = "plan";

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Date to plan for (YYYY-MM-DD or 'today')
    #[arg(long, short, default_value = "today")]
    date: String,

    /// Show the plan without entering the editor
    #[arg(long, short)]
    show: bool,
}

pub async fn cmd(args: PlanArgs) -> Result<()> {
    let date = parse_date(&args.date)?;
    let plans = Plans::new()?;
    let drafts = DraftCache::new();

    if args.show {
        let plan = plans.fetch(date)?.unwrap_or_default();
        msg_print!(Message::PlanTitle(date.format("%B %-d, %Y").to_string()), true);
        View::plan(&plan)?;
        return Ok(());
    }

    // An unsaved draft beats the persisted plan: it is the newer edit.
    let mut plan = match drafts.load::<DailyPlan>(DRAFT_KIND, date)? {
        Some(draft) => {
            msg_info!(Message::DraftRestored(date.format("%Y-%m-%d").to_string()));
            draft
        }
        None => plans.fetch(date)?.unwrap_or_default(),
    };

    let autosave_config = Config::read()?.autosave.unwrap_or_default();
    let draft_writer = DraftCache::new();
    let mut autosave = Autosave::new(Duration::from_millis(autosave_config.delay_ms), move |value: &DailyPlan| {
        draft_writer.store(DRAFT_KIND, date, value)
    });
    autosave.set_enabled(autosave_config.enabled);
    autosave.observe(&plan, Instant::now());

    msg_print!(Message::PlanTitle(date.format("%B %-d, %Y").to_string()), true);
    View::plan(&plan)?;
    msg_print!(Message::Custom(
        "Commands: add <text> | done <#> | rm <#> | show | q (save and quit)".into()
    ));

    let stdin = io::stdin();
    loop {
        print!("plan> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let line = line.trim();
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "" => {}
            "q" | "quit" => break,
            "show" => View::plan(&plan)?,
            "add" => {
                if rest.is_empty() {
                    msg_warning!(Message::Custom("Nothing to add".into()));
                } else {
                    plan.items.push(PlanItem::new(rest));
                }
            }
            "done" => match parse_index(rest, &plan) {
                Some(idx) => plan.items[idx].done = true,
                None => msg_warning!(Message::PlanItemMissing(rest.parse().unwrap_or(0))),
            },
            "rm" => match parse_index(rest, &plan) {
                Some(idx) => {
                    plan.items.remove(idx);
                }
                None => msg_warning!(Message::PlanItemMissing(rest.parse().unwrap_or(0))),
            },
            other => msg_warning!(Message::UnknownCommand(other.to_string())),
        }

        let now = Instant::now();
        autosave.observe(&plan, now);
        autosave.poll(now);
    }

    // The database copy is authoritative once the editor closes; the draft
    // has served its purpose.
    autosave.cancel();
    plans.upsert(date, &plan)?;
    drafts.clear(DRAFT_KIND, date)?;
    msg_success!(Message::PlanSaved(date.format("%Y-%m-%d").to_string()));

    Ok(())
}

/// 1-based item index from user input.
fn parse_index(s: &str, plan: &DailyPlan) -> Option<usize> {
    let n: usize = s.parse().ok()?;
    if n >= 1 && n <= plan.items.len() {
        Some(n - 1)
    } else {
        None
    }
}

fn parse_date(date_str: &str) -> Result<NaiveDate> {
    if date_str.to_lowercase() == "today" {
        Ok(Local::now().date_naive())
    } else {
        Ok(NaiveDate::parse_from_str(date_str, "%Y-%m-%d")?)
    }
}
