//! Focus session state machine.
//!
//! A focus session walks through three phases: **Plan** (decide what to do),
//! **Focus** (the actual deep-work block) and **Reflect** (write down how it
//! went). Each phase has its own countdown; the countdown going *negative*
//! (not hitting exactly zero, tick drift happens) triggers the next phase.
//!
//! The machine is deliberately free of timers, sound and persistence: the
//! caller owns the one-second tick, allocates session numbers from the
//! database and persists records at the transitions. All methods that depend
//! on wall time take an explicit `now`, so tests drive the clock by hand.

use chrono::{DateTime, Local};
use std::collections::BTreeMap;

/// Default phase lengths in seconds: 5 minute plan, 50 minute focus block,
/// 5 minute reflection.
pub const DEFAULT_PLAN_SECS: i64 = 300;
pub const DEFAULT_FOCUS_SECS: i64 = 3000;
pub const DEFAULT_REFLECT_SECS: i64 = 300;

/// The three steps of a focus session, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Plan,
    Focus,
    Reflect,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Plan => "Plan",
            Phase::Focus => "Focus",
            Phase::Reflect => "Reflect",
        }
    }
}

/// The four recognized kinds of focus disruption.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disruptor {
    Procrastination,
    Distraction,
    Burnout,
    Perfectionism,
}

impl Disruptor {
    /// Parses a user-typed disruptor name. Unrecognized names are rejected,
    /// these four categories are fixed.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "procrastination" => Some(Disruptor::Procrastination),
            "distraction" => Some(Disruptor::Distraction),
            "burnout" => Some(Disruptor::Burnout),
            "perfectionism" => Some(Disruptor::Perfectionism),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Disruptor::Procrastination => "procrastination",
            Disruptor::Distraction => "distraction",
            Disruptor::Burnout => "burnout",
            Disruptor::Perfectionism => "perfectionism",
        }
    }
}

/// Counters gathered during the Focus phase.
///
/// Disruptors are fixed categories; the tool and recharge tallies accept
/// arbitrary user-defined names. `BTreeMap` keeps the tallies ordered by
/// name so views and persisted JSON are stable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    pub procrastination: u32,
    pub distraction: u32,
    pub burnout: u32,
    pub perfectionism: u32,
    pub toolkit_usage: BTreeMap<String, u32>,
    pub recharge_usage: BTreeMap<String, u32>,
}

impl SessionStats {
    pub fn disruptor_total(&self) -> u32 {
        self.procrastination + self.distraction + self.burnout + self.perfectionism
    }
}

/// Configured phase lengths for a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseDurations {
    pub plan_secs: i64,
    pub focus_secs: i64,
    pub reflect_secs: i64,
}

impl Default for PhaseDurations {
    fn default() -> Self {
        Self {
            plan_secs: DEFAULT_PLAN_SECS,
            focus_secs: DEFAULT_FOCUS_SECS,
            reflect_secs: DEFAULT_REFLECT_SECS,
        }
    }
}

impl PhaseDurations {
    fn secs_for(&self, phase: Phase) -> i64 {
        match phase {
            Phase::Plan => self.plan_secs,
            Phase::Focus => self.focus_secs,
            Phase::Reflect => self.reflect_secs,
        }
    }

    /// Planned focus length in whole minutes, the threshold for the
    /// early-exit label.
    pub fn planned_focus_minutes(&self) -> i64 {
        (self.focus_secs as f64 / 60.0).round() as i64
    }
}

/// Derived result of ending the Focus phase, fed into the activity log and
/// the persisted session record.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FocusOutcome {
    /// Wall-clock focus time minus accumulated pauses, rounded to minutes.
    pub actual_minutes: i64,
    /// True when the focus block fell short of its planned length. A label
    /// only, it never blocks persistence.
    pub is_early_exit: bool,
    pub ended_at: DateTime<Local>,
}

/// A running focus session.
///
/// Created in the Plan phase with the plan countdown armed. The session
/// number stays `0` (unassigned) until Plan ends, so a session abandoned
/// during Plan never reserves a number.
#[derive(Debug, Clone, PartialEq)]
pub struct FocusSession {
    pub phase: Phase,
    pub seconds_remaining: i64,
    pub is_active: bool,
    /// Assigned when Plan ends; 0 means not yet assigned.
    pub session_number: u32,
    pub goal: String,
    pub captured_thoughts: String,
    pub reflection: String,
    pub stats: SessionStats,
    pub focus_started_at: Option<DateTime<Local>>,
    pub total_pause_seconds: i64,
    pub pause_started_at: Option<DateTime<Local>>,
    pub outcome: Option<FocusOutcome>,
    pub completed: bool,
    durations: PhaseDurations,
}

impl FocusSession {
    pub fn new(durations: PhaseDurations) -> Self {
        Self {
            phase: Phase::Plan,
            seconds_remaining: durations.secs_for(Phase::Plan),
            is_active: true,
            session_number: 0,
            goal: String::new(),
            captured_thoughts: String::new(),
            reflection: String::new(),
            stats: SessionStats::default(),
            focus_started_at: None,
            total_pause_seconds: 0,
            pause_started_at: None,
            outcome: None,
            completed: false,
            durations,
        }
    }

    pub fn durations(&self) -> PhaseDurations {
        self.durations
    }

    /// Advances the countdown by one second.
    ///
    /// Returns the phase whose countdown just expired, if any. The check is
    /// `< 0` rather than `== 0` so a missed or duplicated tick can never
    /// leave the countdown stuck.
    pub fn tick(&mut self) -> Option<Phase> {
        if !self.is_active || self.completed {
            return None;
        }
        self.seconds_remaining -= 1;
        if self.seconds_remaining < 0 {
            Some(self.phase)
        } else {
            None
        }
    }

    /// Toggles between running and suspended.
    ///
    /// During Focus this is a real pause: the interval between pause and
    /// resume accumulates into `total_pause_seconds` and is later excluded
    /// from the actual duration. Plan and Reflect just flip activity with
    /// no accounting.
    pub fn toggle_pause(&mut self, now: DateTime<Local>) {
        if self.completed {
            return;
        }
        if self.phase == Phase::Focus {
            match self.pause_started_at.take() {
                Some(paused_at) => {
                    self.total_pause_seconds += (now - paused_at).num_seconds().max(0);
                    self.is_active = true;
                }
                None => {
                    self.pause_started_at = Some(now);
                    self.is_active = false;
                }
            }
        } else {
            self.is_active = !self.is_active;
        }
    }

    pub fn is_paused(&self) -> bool {
        !self.is_active && !self.completed
    }

    /// Enters the Focus phase with a freshly allocated session number.
    ///
    /// The number is queried by the caller at this very moment (1 + highest
    /// existing number for today), never at session creation, so two
    /// back-to-back sessions on the same day cannot collide.
    pub fn begin_focus(&mut self, session_number: u32, now: DateTime<Local>) {
        self.phase = Phase::Focus;
        self.session_number = session_number;
        self.seconds_remaining = self.durations.secs_for(Phase::Focus);
        self.focus_started_at = Some(now);
        self.total_pause_seconds = 0;
        self.pause_started_at = None;
        self.is_active = true;
    }

    /// Ends the Focus phase and enters Reflect, deriving the actual focus
    /// duration.
    ///
    /// `skipped` marks the explicit-skip path: elapsed wall time is then
    /// capped at `planned - seconds_remaining`, so a skip pressed after a
    /// long real-world delay cannot over-count. An open pause is closed
    /// first so its interval still counts as paused time.
    pub fn finish_focus(&mut self, now: DateTime<Local>, skipped: bool) -> FocusOutcome {
        if let Some(paused_at) = self.pause_started_at.take() {
            self.total_pause_seconds += (now - paused_at).num_seconds().max(0);
        }

        let started = self.focus_started_at.unwrap_or(now);
        let mut elapsed = (now - started).num_seconds();
        if skipped {
            let counted = self.durations.secs_for(Phase::Focus) - self.seconds_remaining.max(0);
            elapsed = elapsed.min(counted);
        }

        let net = (elapsed - self.total_pause_seconds).max(0);
        let actual_minutes = (net as f64 / 60.0).round() as i64;
        let outcome = FocusOutcome {
            actual_minutes,
            is_early_exit: actual_minutes < self.durations.planned_focus_minutes(),
            ended_at: now,
        };
        self.outcome = Some(outcome);

        self.phase = Phase::Reflect;
        self.seconds_remaining = self.durations.secs_for(Phase::Reflect);
        self.is_active = true;
        outcome
    }

    /// Ends the Reflect phase, completing the session.
    ///
    /// A manual end with an empty reflection is refused and returns `false`
    /// (the call is a no-op); natural countdown expiry passes `manual =
    /// false` and bypasses the guard.
    pub fn try_complete(&mut self, manual: bool) -> bool {
        if manual && self.reflection.trim().is_empty() {
            return false;
        }
        self.completed = true;
        self.is_active = false;
        true
    }

    /// Returns the session to its initial Plan state, discarding every
    /// field. Resetting during Plan silently drops entered data; that is
    /// the intended way to abandon a session without persisting anything.
    pub fn reset(&mut self) {
        *self = Self::new(self.durations);
    }

    pub fn track_disruptor(&mut self, kind: Disruptor) {
        match kind {
            Disruptor::Procrastination => self.stats.procrastination += 1,
            Disruptor::Distraction => self.stats.distraction += 1,
            Disruptor::Burnout => self.stats.burnout += 1,
            Disruptor::Perfectionism => self.stats.perfectionism += 1,
        }
    }

    pub fn track_tool_usage(&mut self, name: &str) {
        *self.stats.toolkit_usage.entry(name.to_string()).or_insert(0) += 1;
    }

    pub fn track_recharge_usage(&mut self, name: &str) {
        *self.stats.recharge_usage.entry(name.to_string()).or_insert(0) += 1;
    }
}
