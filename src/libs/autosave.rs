//! Debounced autosave for draft values.
//!
//! Watches a value for changes and invokes a save callback only after the
//! value has been stable for a configurable delay, coalescing rapid edits
//! into a single write. The first observation becomes the baseline without
//! scheduling anything, so loading a draft never triggers an immediate save.
//!
//! The caller drives it with two calls: `observe()` whenever the value may
//! have changed and `poll()` on its own cadence (the plan editor polls once
//! per loop iteration, the focus controller once per tick). Time is passed
//! in explicitly so tests never sleep.

use anyhow::Result;
use std::time::{Duration, Instant};

/// Debounced writer for a single draft value.
///
/// `T` needs structural equality; models stored here use `BTreeMap`/`Vec`
/// fields so comparison is order-insensitive where it should be.
pub struct Autosave<T: Clone + PartialEq> {
    delay: Duration,
    enabled: bool,
    /// Last successfully saved value. `None` until the first observation.
    baseline: Option<T>,
    /// Armed save: the value to write and its due time.
    pending: Option<(T, Instant)>,
    /// Prevents a second dispatch while a save callback has not returned.
    in_flight: bool,
    save: Box<dyn FnMut(&T) -> Result<()> + Send>,
}

impl<T: Clone + PartialEq> Autosave<T> {
    pub fn new<F>(delay: Duration, save: F) -> Self
    where
        F: FnMut(&T) -> Result<()> + Send + 'static,
    {
        Self {
            delay,
            enabled: true,
            baseline: None,
            pending: None,
            in_flight: false,
            save: Box::new(save),
        }
    }

    /// Notes the current value.
    ///
    /// The first value seen becomes the baseline and schedules nothing.
    /// A later value differing from the baseline re-arms the delay timer,
    /// cancelling any save already scheduled. Disabling suppresses new
    /// scheduling but deliberately leaves an already-armed timer alone.
    pub fn observe(&mut self, value: &T, now: Instant) {
        let Some(baseline) = &self.baseline else {
            self.baseline = Some(value.clone());
            return;
        };

        if value == baseline {
            // Edited back to the saved state: nothing new to write.
            self.pending = None;
            return;
        }

        if self.enabled {
            self.pending = Some((value.clone(), now + self.delay));
        }
    }

    /// Fires a due save, if any. Returns `true` when a save was written.
    ///
    /// A failed callback is logged and the baseline left stale, so the next
    /// stability window retries the same value. Errors never propagate.
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.in_flight {
            return false;
        }
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => {}
            _ => return false,
        }
        let Some((value, _)) = self.pending.take() else {
            return false;
        };

        // Redundant-save skip: the value may have drifted back to baseline
        // between scheduling and firing.
        if self.baseline.as_ref() == Some(&value) {
            return false;
        }

        self.in_flight = true;
        let result = (self.save)(&value);
        self.in_flight = false;

        match result {
            Ok(()) => {
                self.baseline = Some(value);
                true
            }
            Err(err) => {
                tracing::error!("autosave failed, will retry: {err:#}");
                self.pending = Some((value, now + self.delay));
                false
            }
        }
    }

    /// True while a save is scheduled but has not fired.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Teardown: drops any armed save so nothing fires after the owner is
    /// gone.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
