//! Interactive focus session command.
//!
//! Owns the running `FocusSession` and drives it from two event sources: a
//! one-second ticker for the countdown and stdin lines for user commands.
//! Persistence happens at the phase boundaries: the session number is
//! allocated when Plan ends, focus minutes are appended to the activity log
//! when Focus ends, and the full record is upserted when the session
//! completes. Persistence failures are logged and never kill the session;
//! only the final save surfaces as a blocking error, since it is the last
//! chance to record the session.

use crate::db::activity_log::ActivityLog;
use crate::db::sessions::{FocusSessionRecord, Sessions};
use crate::libs::clock::{Clock, SystemClock};
use crate::libs::config::Config;
use crate::libs::messages::Message;
use crate::libs::session::{Disruptor, FocusSession, Phase};
use crate::libs::sound::{Silent, SoundCue, TerminalBell};
use crate::libs::view::View;
use crate::{msg_error, msg_info, msg_print, msg_success, msg_warning};
use anyhow::Result;
use chrono::NaiveDate;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{self, Duration};

#[derive(Debug, Args)]
pub struct FocusArgs {
    /// Suppress the phase-end bell
    #[arg(long, short)]
    quiet: bool,
}

#[derive(Debug, PartialEq)]
enum Flow {
    Continue,
    Quit,
}

/// Ties the state machine to its collaborators for one command invocation.
struct SessionController {
    session: FocusSession,
    sessions: Sessions,
    activity_log: ActivityLog,
    clock: Box<dyn Clock>,
    cue: Box<dyn SoundCue>,
    date: NaiveDate,
}

impl SessionController {
    fn new(sessions: Sessions, activity_log: ActivityLog, clock: Box<dyn Clock>, cue: Box<dyn SoundCue>) -> Result<Self> {
        let config = Config::read()?;
        let durations = config.focus.unwrap_or_default().durations();
        let date = clock.now().date_naive();
        Ok(Self {
            session: FocusSession::new(durations),
            sessions,
            activity_log,
            clock,
            cue,
            date,
        })
    }

    /// Countdown expiry for `phase`: run the corresponding transition.
    fn advance(&mut self, phase: Phase, skipped: bool) {
        match phase {
            Phase::Plan => self.enter_focus(),
            Phase::Focus => self.enter_reflect(skipped),
            Phase::Reflect => self.complete(false),
        }
    }

    fn enter_focus(&mut self) {
        let number = match self.sessions.next_session_number(self.date) {
            Ok(n) => n,
            Err(err) => {
                // Numbering needs the database; without it the session
                // cannot proceed past Plan. Park the countdown, 'skip'
                // retries.
                msg_error!(Message::Custom(format!("Could not allocate a session number: {err:#}")));
                self.session.seconds_remaining = 0;
                self.session.is_active = false;
                return;
            }
        };
        let now = self.clock.now();
        self.session.begin_focus(number, now);
        self.cue.phase_end();
        msg_info!(Message::SessionNumberAssigned(number));
        msg_print!(Message::PhaseEntered("Focus".into(), self.session.seconds_remaining));
    }

    fn enter_reflect(&mut self, skipped: bool) {
        let now = self.clock.now();
        let outcome = self.session.finish_focus(now, skipped);
        self.cue.phase_end();

        // Append to the daily log before Reflect starts; a failure here is
        // logged but the session carries on.
        if let Err(err) = self.activity_log.add_minutes(self.date, outcome.actual_minutes) {
            msg_error!(Message::ActivityLogFailed(format!("{err:#}")));
        } else {
            msg_info!(Message::FocusMinutesLogged(
                outcome.actual_minutes,
                self.date.format("%Y-%m-%d").to_string()
            ));
        }
        if outcome.is_early_exit {
            msg_info!(Message::EarlyExit(outcome.actual_minutes, self.session.durations().planned_focus_minutes()));
        }

        // Intermediate record so the focus block survives even if the user
        // never finishes Reflect.
        if let Err(err) = self.sessions.upsert(&self.build_record(false)) {
            msg_error!(Message::ActivityLogFailed(format!("{err:#}")));
        }

        msg_print!(Message::PhaseEntered("Reflect".into(), self.session.seconds_remaining));
    }

    /// Ends the session from Reflect. Manual calls with an empty reflection
    /// are refused; natural expiry proceeds regardless.
    fn complete(&mut self, manual: bool) {
        if manual && self.session.reflection.trim().is_empty() {
            msg_warning!(Message::ReflectionRequired);
            return;
        }

        // Park the countdown so a failed save is not retried every tick;
        // the user retries with 'end'.
        self.session.is_active = false;

        let record = self.build_record(true);
        match self.sessions.upsert(&record) {
            Ok(()) => {
                self.session.try_complete(manual);
                self.cue.phase_end();
                msg_success!(Message::SessionCompleted(record.session_number), true);
                msg_print!(Message::SessionSummaryTitle);
                if let Err(err) = View::session_summary(&record) {
                    msg_error!(Message::Custom(format!("{err:#}")));
                }
            }
            Err(err) => {
                msg_error!(Message::SessionSaveFailed(format!("{err:#}")), true);
            }
        }
    }

    fn build_record(&self, completed: bool) -> FocusSessionRecord {
        let session = &self.session;
        let durations = session.durations();
        let outcome = session.outcome;
        FocusSessionRecord {
            date: self.date,
            session_number: session.session_number,
            goal: session.goal.clone(),
            captured_thoughts: session.captured_thoughts.clone(),
            reflection: session.reflection.clone(),
            procrastination: session.stats.procrastination,
            distraction: session.stats.distraction,
            burnout: session.stats.burnout,
            perfectionism: session.stats.perfectionism,
            toolkit_usage: session.stats.toolkit_usage.clone(),
            recharge_usage: session.stats.recharge_usage.clone(),
            planned_minutes: durations.planned_focus_minutes(),
            actual_minutes: outcome.map(|o| o.actual_minutes).unwrap_or(0),
            started_at: session.focus_started_at.map(|t| t.naive_local()),
            ended_at: outcome.map(|o| o.ended_at.naive_local()),
            total_pause_seconds: session.total_pause_seconds,
            completed,
            is_early_exit: outcome.map(|o| o.is_early_exit).unwrap_or(false),
        }
    }

    fn handle(&mut self, line: &str) -> Flow {
        let line = line.trim();
        if line.is_empty() {
            return Flow::Continue;
        }
        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "q" | "quit" => return Flow::Quit,
            "help" => msg_print!(Message::FocusCommandsHint),
            "status" => self.print_status(),
            "p" | "pause" => {
                let now = self.clock.now();
                self.session.toggle_pause(now);
                if self.session.is_paused() {
                    msg_info!(Message::SessionPaused);
                } else {
                    msg_info!(Message::SessionResumed);
                }
            }
            "s" | "skip" => match self.session.phase {
                // Skipping out of Reflect is a manual end, so the
                // reflection guard still applies.
                Phase::Reflect => self.complete(true),
                phase => {
                    if !self.session.completed {
                        self.advance(phase, true);
                    }
                }
            },
            "e" | "end" => match self.session.phase {
                // 'end' is a shortcut out of Focus, and the guarded way
                // out of Reflect.
                Phase::Focus => self.enter_reflect(true),
                Phase::Reflect => self.complete(true),
                Phase::Plan => msg_warning!(Message::Custom("Nothing to end yet; 'skip' starts the focus block".into())),
            },
            "r" | "reset" => {
                self.session.reset();
                msg_info!(Message::SessionReset);
            }
            "goal" => self.session.goal = rest.to_string(),
            "note" => {
                if !self.session.captured_thoughts.is_empty() {
                    self.session.captured_thoughts.push('\n');
                }
                self.session.captured_thoughts.push_str(rest);
            }
            "reflect" => self.session.reflection = rest.to_string(),
            "d" => match Disruptor::parse(rest) {
                Some(kind) => self.session.track_disruptor(kind),
                None => msg_warning!(Message::UnknownDisruptor(rest.to_string())),
            },
            "tool" => self.session.track_tool_usage(rest),
            "recharge" => self.session.track_recharge_usage(rest),
            other => msg_warning!(Message::UnknownCommand(other.to_string())),
        }
        Flow::Continue
    }

    fn print_status(&self) {
        let session = &self.session;
        let remaining = session.seconds_remaining.max(0);
        msg_print!(Message::Custom(format!(
            "{} | {:02}:{:02} remaining{}{} | disruptors: {}",
            session.phase.as_str(),
            remaining / 60,
            remaining % 60,
            if session.is_paused() { " | paused" } else { "" },
            if session.session_number > 0 {
                format!(" | session #{}", session.session_number)
            } else {
                String::new()
            },
            session.stats.disruptor_total(),
        )));
    }
}

/// Runs an interactive focus session until it completes or the user quits.
pub async fn cmd(args: FocusArgs) -> Result<()> {
    let cue: Box<dyn SoundCue> = if args.quiet { Box::new(Silent) } else { Box::new(TerminalBell) };
    let mut controller = SessionController::new(Sessions::new()?, ActivityLog::new()?, Box::new(SystemClock), cue)?;

    msg_print!(Message::SessionStarted);
    msg_print!(Message::PhaseEntered("Plan".into(), controller.session.seconds_remaining));
    msg_print!(Message::FocusCommandsHint);

    let mut interval = time::interval(Duration::from_secs(1));
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            _ = interval.tick() => {
                if let Some(expired) = controller.session.tick() {
                    controller.advance(expired, false);
                }
                if controller.session.completed {
                    break;
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if controller.handle(&line) == Flow::Quit {
                            break;
                        }
                        if controller.session.completed {
                            break;
                        }
                    }
                    // stdin closed
                    None => break,
                }
            }
        }
    }

    Ok(())
}
