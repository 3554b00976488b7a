use crate::db::sessions::FocusSessionRecord;
use crate::libs::plan::DailyPlan;
use crate::libs::quest::Quest;
use anyhow::Result;
use chrono::NaiveDate;
use prettytable::{row, Table};
use std::collections::BTreeMap;

pub struct View {}

impl View {
    pub fn sessions(records: &[FocusSessionRecord]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "GOAL", "MINUTES", "PAUSED", "DISRUPTORS", "EARLY EXIT", "COMPLETED"]);
        for record in records {
            table.add_row(row![
                record.session_number,
                record.goal,
                format!("{}/{}", record.actual_minutes, record.planned_minutes),
                format!("{}s", record.total_pause_seconds),
                record.disruptor_total(),
                if record.is_early_exit { "yes" } else { "" },
                if record.completed { "yes" } else { "" },
            ]);
        }
        table.printstd();

        Ok(())
    }

    /// Monthly activity log: one row per day with recorded focus minutes.
    pub fn activity(days: &[(NaiveDate, i64)], total_minutes: i64) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["DATE", "FOCUS MINUTES"]);
        for (date, minutes) in days {
            table.add_row(row![date.format("%Y-%m-%d"), minutes]);
        }
        table.add_row(row!["TOTAL", total_minutes]);
        table.printstd();

        Ok(())
    }

    pub fn quests(quests: &[Quest]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "NOTE", "QUARTER", "STATUS"]);
        for quest in quests {
            table.add_row(row![
                quest.id.unwrap_or(0),
                quest.title,
                quest.note.clone().unwrap_or_default(),
                format!("{} {}", quest.quarter, quest.year),
                if quest.done { "done" } else { "active" },
            ]);
        }
        table.printstd();

        Ok(())
    }

    pub fn plan(plan: &DailyPlan) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["#", "ITEM", "DONE"]);
        for (idx, item) in plan.items.iter().enumerate() {
            table.add_row(row![idx + 1, item.text, if item.done { "x" } else { "" }]);
        }
        table.printstd();

        Ok(())
    }

    /// Completion summary shown when a session finishes.
    pub fn session_summary(record: &FocusSessionRecord) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["Session", record.session_number]);
        table.add_row(row!["Goal", record.goal]);
        table.add_row(row!["Focus minutes", format!("{} of {}", record.actual_minutes, record.planned_minutes)]);
        table.add_row(row!["Paused", format!("{}s", record.total_pause_seconds)]);
        table.add_row(row!["Procrastination", record.procrastination]);
        table.add_row(row!["Distraction", record.distraction]);
        table.add_row(row!["Burnout", record.burnout]);
        table.add_row(row!["Perfectionism", record.perfectionism]);
        table.add_row(row!["Tools", format_tally(&record.toolkit_usage)]);
        table.add_row(row!["Recharge", format_tally(&record.recharge_usage)]);
        if !record.reflection.is_empty() {
            table.add_row(row!["Reflection", record.reflection]);
        }
        table.printstd();

        Ok(())
    }
}

fn format_tally(tally: &BTreeMap<String, u32>) -> String {
    tally
        .iter()
        .map(|(name, count)| format!("{} x{}", name, count))
        .collect::<Vec<_>>()
        .join(", ")
}
