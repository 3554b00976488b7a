//! Phase-end cue.
//!
//! In a terminal the BEL character does the job. The trait exists so tests
//! (and `--quiet` runs) plug in a silent sink.

use std::io::{self, Write};

pub trait SoundCue: Send {
    /// Emitted once whenever a phase countdown expires or is skipped.
    fn phase_end(&self);
}

/// Rings the terminal bell.
#[derive(Debug, Default)]
pub struct TerminalBell;

impl SoundCue for TerminalBell {
    fn phase_end(&self) {
        print!("\x07");
        let _ = io::stdout().flush();
    }
}

/// Swallows cues. Used by tests and `focus --quiet`.
#[derive(Debug, Default)]
pub struct Silent;

impl SoundCue for Silent {
    fn phase_end(&self) {}
}
