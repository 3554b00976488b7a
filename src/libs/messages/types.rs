#[derive(Debug, Clone)]
pub enum Message {
    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigParseError,

    // === FOCUS SESSION MESSAGES ===
    SessionStarted,
    PhaseEntered(String, i64),      // phase name, seconds
    SessionNumberAssigned(u32),
    SessionPaused,
    SessionResumed,
    SessionReset,
    ReflectionRequired,
    SessionCompleted(u32),          // session number
    SessionSaveFailed(String),      // error text; last chance to record, shown blocking
    ActivityLogFailed(String),      // error text; non-fatal
    FocusMinutesLogged(i64, String), // minutes, date
    EarlyExit(i64, i64),            // actual, planned minutes
    UnknownCommand(String),
    UnknownDisruptor(String),
    SessionSummaryTitle,
    FocusCommandsHint,

    // === SESSION LIST MESSAGES ===
    SessionsTitle(String), // date
    NoSessionsForDate(String),

    // === ACTIVITY LOG MESSAGES ===
    ActivityLogTitle(String), // month
    NoActivityForMonth(String),

    // === DAILY PLAN MESSAGES ===
    PlanTitle(String), // date
    PlanSaved(String),
    DraftRestored(String), // date
    PlanItemMissing(usize),

    // === QUEST MESSAGES ===
    QuestAdded(String),
    QuestCompleted(String),
    QuestNotFound(i64),
    QuestsTitle(String), // quarter label
    NoQuestsForQuarter(String),

    // === EXPORT MESSAGES ===
    ExportCompleted(String), // path
    NoSessionsToExport(String),

    // === MIGRATION MESSAGES ===
    DatabaseVersion(u32),
    DatabaseUpToDate,
    DatabaseNeedsUpdate,
    MigrationHistory,
    MigrationsFound(usize),

    // === GENERIC ===
    Custom(String),
}
