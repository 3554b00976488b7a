#[cfg(test)]
mod tests {
    use anyhow::anyhow;
    use lifeos::libs::autosave::Autosave;
    use std::sync::{Arc, Mutex};
    use std::time::{Duration, Instant};

    const DELAY: Duration = Duration::from_millis(2000);

    /// Autosave wired to a vector capturing every saved value.
    fn capturing() -> (Autosave<String>, Arc<Mutex<Vec<String>>>) {
        let saved = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let autosave = Autosave::new(DELAY, move |value: &String| {
            sink.lock().unwrap().push(value.clone());
            Ok(())
        });
        (autosave, saved)
    }

    #[test]
    fn test_first_observation_sets_baseline_without_saving() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"loaded draft".to_string(), t0);
        assert!(!autosave.has_pending());
        assert!(!autosave.poll(t0 + DELAY * 2));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_change_saves_once_after_delay() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0 + Duration::from_millis(100));
        assert!(autosave.has_pending());

        // Not due yet.
        assert!(!autosave.poll(t0 + Duration::from_millis(2000)));
        assert!(autosave.poll(t0 + Duration::from_millis(2100)));
        assert_eq!(*saved.lock().unwrap(), vec!["ab".to_string()]);
        assert!(!autosave.has_pending());
    }

    #[test]
    fn test_rapid_edits_coalesce_into_one_save() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        for (i, value) in ["ab", "abc", "abcd", "abcde", "abcdef"].iter().enumerate() {
            let now = t0 + Duration::from_millis(200 * (i as u64 + 1));
            autosave.observe(&value.to_string(), now);
            assert!(!autosave.poll(now));
        }

        // Last edit at t0+1000ms, so the timer is due at t0+3000ms.
        assert!(!autosave.poll(t0 + Duration::from_millis(2900)));
        assert!(autosave.poll(t0 + Duration::from_millis(3000)));
        assert_eq!(*saved.lock().unwrap(), vec!["abcdef".to_string()]);
    }

    #[test]
    fn test_unchanged_value_after_save_schedules_nothing() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0);
        assert!(autosave.poll(t0 + DELAY));

        // Same value observed again: baseline matches, no re-arm.
        autosave.observe(&"ab".to_string(), t0 + DELAY);
        assert!(!autosave.has_pending());
        assert!(!autosave.poll(t0 + DELAY * 3));
        assert_eq!(saved.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_revert_to_baseline_cancels_armed_save() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0);
        assert!(autosave.has_pending());

        // Edited back before the timer fired.
        autosave.observe(&"a".to_string(), t0 + Duration::from_millis(500));
        assert!(!autosave.has_pending());
        assert!(!autosave.poll(t0 + DELAY * 2));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_failed_save_keeps_baseline_and_retries() {
        let attempts = Arc::new(Mutex::new(0u32));
        let saved = Arc::new(Mutex::new(Vec::new()));
        let attempts_in = Arc::clone(&attempts);
        let sink = Arc::clone(&saved);
        let mut autosave = Autosave::new(DELAY, move |value: &String| {
            let mut n = attempts_in.lock().unwrap();
            *n += 1;
            if *n == 1 {
                Err(anyhow!("disk full"))
            } else {
                sink.lock().unwrap().push(value.clone());
                Ok(())
            }
        });
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0);

        // First attempt fails; the value stays armed for a new delay window.
        assert!(!autosave.poll(t0 + DELAY));
        assert!(autosave.has_pending());
        assert!(saved.lock().unwrap().is_empty());

        // Retry after another full delay succeeds.
        assert!(!autosave.poll(t0 + DELAY + Duration::from_millis(100)));
        assert!(autosave.poll(t0 + DELAY * 2));
        assert_eq!(*attempts.lock().unwrap(), 2);
        assert_eq!(*saved.lock().unwrap(), vec!["ab".to_string()]);
    }

    #[test]
    fn test_disable_blocks_new_scheduling_but_not_armed_timer() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0);
        autosave.set_enabled(false);

        // The already-armed save still fires.
        assert!(autosave.poll(t0 + DELAY));
        assert_eq!(saved.lock().unwrap().len(), 1);

        // But a change observed while disabled schedules nothing.
        autosave.observe(&"abc".to_string(), t0 + DELAY);
        assert!(!autosave.has_pending());
        assert!(!autosave.poll(t0 + DELAY * 3));
        assert_eq!(saved.lock().unwrap().len(), 1);

        // Re-enabling picks changes up again.
        autosave.set_enabled(true);
        autosave.observe(&"abc".to_string(), t0 + DELAY * 3);
        assert!(autosave.poll(t0 + DELAY * 4));
        assert_eq!(*saved.lock().unwrap(), vec!["ab".to_string(), "abc".to_string()]);
    }

    #[test]
    fn test_cancel_drops_armed_save() {
        let (mut autosave, saved) = capturing();
        let t0 = Instant::now();

        autosave.observe(&"a".to_string(), t0);
        autosave.observe(&"ab".to_string(), t0);
        autosave.cancel();

        assert!(!autosave.has_pending());
        assert!(!autosave.poll(t0 + DELAY * 2));
        assert!(saved.lock().unwrap().is_empty());
    }

    #[test]
    fn test_works_with_structured_values() {
        let saved: Arc<Mutex<Vec<Vec<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&saved);
        let mut autosave = Autosave::new(DELAY, move |value: &Vec<String>| {
            sink.lock().unwrap().push(value.clone());
            Ok(())
        });
        let t0 = Instant::now();

        autosave.observe(&vec![], t0);
        autosave.observe(&vec!["write tests".to_string()], t0);
        assert!(autosave.poll(t0 + DELAY));
        assert_eq!(*saved.lock().unwrap(), vec![vec!["write tests".to_string()]]);
    }
}
