//! Display implementation for lifeos application messages.
//!
//! All user-facing text lives here, next to the `Message` variants it
//! renders. Keeping it in one place makes the wording easy to review and
//! leaves the call sites free of string formatting.

use super::types::Message;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigParseError => "Failed to parse configuration file".to_string(),

            // === FOCUS SESSION MESSAGES ===
            Message::SessionStarted => "Focus session started in the Plan phase".to_string(),
            Message::PhaseEntered(phase, secs) => {
                format!("Entering {} phase ({} min {} s on the clock)", phase, secs / 60, secs % 60)
            }
            Message::SessionNumberAssigned(n) => format!("This is focus session #{} for today", n),
            Message::SessionPaused => "Paused".to_string(),
            Message::SessionResumed => "Resumed".to_string(),
            Message::SessionReset => "Session reset to the Plan phase; nothing was saved".to_string(),
            Message::ReflectionRequired => "Write a reflection first ('reflect <text>') before ending the session".to_string(),
            Message::SessionCompleted(n) => format!("Focus session #{} recorded", n),
            Message::SessionSaveFailed(err) => format!("Could not save the session record: {}. The session stays open so you can retry with 'end'", err),
            Message::ActivityLogFailed(err) => format!("Could not update the activity log: {}", err),
            Message::FocusMinutesLogged(minutes, date) => format!("Logged {} focus minutes for {}", minutes, date),
            Message::EarlyExit(actual, planned) => format!("Early exit: {} of {} planned minutes", actual, planned),
            Message::UnknownCommand(cmd) => format!("Unknown command '{}'. Type 'help' for the list", cmd),
            Message::UnknownDisruptor(name) => format!(
                "Unknown disruptor '{}'. Recognized: procrastination, distraction, burnout, perfectionism",
                name
            ),
            Message::SessionSummaryTitle => "Session summary".to_string(),
            Message::FocusCommandsHint => {
                "Commands: goal <text> | note <text> | reflect <text> | d <disruptor> | tool <name> | recharge <name> | pause | skip | end | reset | status | quit".to_string()
            }

            // === SESSION LIST MESSAGES ===
            Message::SessionsTitle(date) => format!("Focus sessions for {}", date),
            Message::NoSessionsForDate(date) => format!("No focus sessions recorded for {}", date),

            // === ACTIVITY LOG MESSAGES ===
            Message::ActivityLogTitle(month) => format!("Focus activity for {}", month),
            Message::NoActivityForMonth(month) => format!("No focus activity recorded in {}", month),

            // === DAILY PLAN MESSAGES ===
            Message::PlanTitle(date) => format!("Daily plan for {}", date),
            Message::PlanSaved(date) => format!("Plan for {} saved", date),
            Message::DraftRestored(date) => format!("Restored an unsaved draft for {}", date),
            Message::PlanItemMissing(idx) => format!("No plan item #{}", idx),

            // === QUEST MESSAGES ===
            Message::QuestAdded(title) => format!("Quest '{}' added", title),
            Message::QuestCompleted(title) => format!("Quest '{}' marked done", title),
            Message::QuestNotFound(id) => format!("No quest with id {}", id),
            Message::QuestsTitle(quarter) => format!("Quests for {}", quarter),
            Message::NoQuestsForQuarter(quarter) => format!("No quests for {}", quarter),

            // === EXPORT MESSAGES ===
            Message::ExportCompleted(path) => format!("Exported to {}", path),
            Message::NoSessionsToExport(date) => format!("Nothing to export for {}", date),

            // === MIGRATION MESSAGES ===
            Message::DatabaseVersion(v) => format!("Database schema version: {}", v),
            Message::DatabaseUpToDate => "Database schema is up to date".to_string(),
            Message::DatabaseNeedsUpdate => "Database schema needs migration".to_string(),
            Message::MigrationHistory => "Migration history:".to_string(),
            Message::MigrationsFound(n) => format!("Applying {} pending migration(s)", n),

            // === GENERIC ===
            Message::Custom(text) => text.clone(),
        };
        write!(f, "{}", text)
    }
}
