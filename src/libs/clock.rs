//! Clock abstraction for the session controller.
//!
//! The state machine takes explicit timestamps; the controller obtains them
//! from a `Clock` so tests can substitute a scripted one instead of waiting
//! on wall time.

use chrono::{DateTime, Local};

pub trait Clock: Send {
    fn now(&self) -> DateTime<Local>;
}

/// The real thing.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
