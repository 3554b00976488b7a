#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Local, TimeZone};
    use lifeos::libs::session::{Disruptor, FocusSession, Phase, PhaseDurations};

    fn t0() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap()
    }

    fn new_session() -> FocusSession {
        FocusSession::new(PhaseDurations::default())
    }

    /// Enters the Focus phase directly, as the controller would after Plan.
    fn focus_session(number: u32) -> FocusSession {
        let mut session = new_session();
        session.begin_focus(number, t0());
        session
    }

    #[test]
    fn test_countdown_decrements_once_per_tick() {
        let mut session = new_session();
        assert_eq!(session.seconds_remaining, 300);

        for elapsed in 1..=300 {
            assert_eq!(session.tick(), None);
            assert_eq!(session.seconds_remaining, 300 - elapsed);
        }
    }

    #[test]
    fn test_plan_expires_when_countdown_goes_negative() {
        let mut session = new_session();
        for _ in 0..300 {
            assert_eq!(session.tick(), None);
        }
        // The transition fires on going negative, not on reaching zero.
        assert_eq!(session.seconds_remaining, 0);
        assert_eq!(session.tick(), Some(Phase::Plan));
    }

    #[test]
    fn test_begin_focus_arms_focus_countdown() {
        let mut session = new_session();
        session.goal = "write the report".to_string();
        session.begin_focus(1, t0());

        assert_eq!(session.phase, Phase::Focus);
        assert_eq!(session.session_number, 1);
        assert_eq!(session.seconds_remaining, 3000);
        assert_eq!(session.focus_started_at, Some(t0()));
        assert_eq!(session.total_pause_seconds, 0);
        assert!(session.is_active);
        // Plan-phase input survives the transition.
        assert_eq!(session.goal, "write the report");
    }

    #[test]
    fn test_paused_session_does_not_tick() {
        let mut session = focus_session(1);
        session.toggle_pause(t0() + Duration::seconds(100));

        assert!(session.is_paused());
        let before = session.seconds_remaining;
        for _ in 0..50 {
            assert_eq!(session.tick(), None);
        }
        assert_eq!(session.seconds_remaining, before);
    }

    #[test]
    fn test_pause_accounting_excludes_paused_time() {
        let mut session = focus_session(1);

        // Two non-overlapping pauses: 30 s and 15 s.
        session.toggle_pause(t0() + Duration::seconds(100));
        session.toggle_pause(t0() + Duration::seconds(130));
        session.toggle_pause(t0() + Duration::seconds(500));
        session.toggle_pause(t0() + Duration::seconds(515));
        assert_eq!(session.total_pause_seconds, 45);
        assert!(!session.is_paused());

        // Natural expiry after the full 3000 s of focus plus 45 s paused.
        let outcome = session.finish_focus(t0() + Duration::seconds(3045), false);
        assert_eq!(outcome.actual_minutes, 50);
        assert!(!outcome.is_early_exit);
    }

    #[test]
    fn test_pause_still_open_at_focus_end_is_counted() {
        let mut session = focus_session(1);
        session.toggle_pause(t0() + Duration::seconds(100));

        let outcome = session.finish_focus(t0() + Duration::seconds(200), false);
        assert_eq!(session.total_pause_seconds, 100);
        // 200 s wall, 100 s paused -> 100 s net -> 2 minutes.
        assert_eq!(outcome.actual_minutes, 2);
    }

    #[test]
    fn test_skip_caps_elapsed_at_counted_seconds() {
        let mut session = focus_session(1);
        for _ in 0..1000 {
            session.tick();
        }
        assert_eq!(session.seconds_remaining, 2000);

        // The skip arrives after a long real-world delay; only the counted
        // 1000 s may contribute.
        let outcome = session.finish_focus(t0() + Duration::seconds(5000), true);
        assert_eq!(outcome.actual_minutes, 17);
        assert!(outcome.is_early_exit);
        assert_eq!(session.phase, Phase::Reflect);
        assert_eq!(session.seconds_remaining, 300);
    }

    #[test]
    fn test_early_exit_boundary() {
        // 49 minutes is early, a full 50 is not.
        let mut short = focus_session(1);
        let outcome = short.finish_focus(t0() + Duration::seconds(49 * 60), false);
        assert_eq!(outcome.actual_minutes, 49);
        assert!(outcome.is_early_exit);

        let mut full = focus_session(2);
        let outcome = full.finish_focus(t0() + Duration::seconds(50 * 60), false);
        assert_eq!(outcome.actual_minutes, 50);
        assert!(!outcome.is_early_exit);
    }

    #[test]
    fn test_focus_end_before_start_clamps_to_zero() {
        let mut session = focus_session(1);
        let outcome = session.finish_focus(t0() - Duration::seconds(10), false);
        assert_eq!(outcome.actual_minutes, 0);
    }

    #[test]
    fn test_manual_reflect_end_requires_reflection() {
        let mut session = focus_session(1);
        session.finish_focus(t0() + Duration::seconds(3000), false);

        assert!(!session.try_complete(true));
        assert!(!session.completed);
        assert_eq!(session.phase, Phase::Reflect);

        session.reflection = "went well".to_string();
        assert!(session.try_complete(true));
        assert!(session.completed);
        assert!(!session.is_active);
    }

    #[test]
    fn test_natural_reflect_expiry_bypasses_reflection_guard() {
        let mut session = focus_session(1);
        session.finish_focus(t0() + Duration::seconds(3000), false);

        assert!(session.reflection.is_empty());
        assert!(session.try_complete(false));
        assert!(session.completed);
    }

    #[test]
    fn test_whitespace_reflection_does_not_satisfy_guard() {
        let mut session = focus_session(1);
        session.finish_focus(t0() + Duration::seconds(3000), false);
        session.reflection = "   ".to_string();
        assert!(!session.try_complete(true));
    }

    #[test]
    fn test_toggle_outside_focus_flips_activity_without_accounting() {
        let mut session = new_session();
        session.toggle_pause(t0());
        assert!(!session.is_active);
        assert_eq!(session.pause_started_at, None);
        assert_eq!(session.total_pause_seconds, 0);

        session.toggle_pause(t0() + Duration::seconds(60));
        assert!(session.is_active);
        assert_eq!(session.total_pause_seconds, 0);
    }

    #[test]
    fn test_stat_tracking() {
        let mut session = focus_session(1);
        session.track_disruptor(Disruptor::Distraction);
        session.track_disruptor(Disruptor::Distraction);
        session.track_disruptor(Disruptor::Distraction);
        session.track_disruptor(Disruptor::Burnout);
        session.track_tool_usage("Listen to music");
        session.track_tool_usage("Listen to music");
        session.track_recharge_usage("Stretch");

        assert_eq!(session.stats.distraction, 3);
        assert_eq!(session.stats.burnout, 1);
        assert_eq!(session.stats.procrastination, 0);
        assert_eq!(session.stats.toolkit_usage.get("Listen to music"), Some(&2));
        assert_eq!(session.stats.recharge_usage.get("Stretch"), Some(&1));
        assert_eq!(session.stats.disruptor_total(), 4);
    }

    #[test]
    fn test_disruptor_parsing() {
        assert_eq!(Disruptor::parse("distraction"), Some(Disruptor::Distraction));
        assert_eq!(Disruptor::parse("Perfectionism"), Some(Disruptor::Perfectionism));
        assert_eq!(Disruptor::parse("boredom"), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = focus_session(3);
        session.goal = "goal".to_string();
        session.captured_thoughts = "notes".to_string();
        session.track_disruptor(Disruptor::Procrastination);
        session.toggle_pause(t0() + Duration::seconds(10));

        session.reset();

        assert_eq!(session.phase, Phase::Plan);
        assert_eq!(session.seconds_remaining, 300);
        assert_eq!(session.session_number, 0);
        assert!(session.goal.is_empty());
        assert!(session.captured_thoughts.is_empty());
        assert_eq!(session.stats.disruptor_total(), 0);
        assert_eq!(session.total_pause_seconds, 0);
        assert_eq!(session.outcome, None);
        assert!(session.is_active);
        assert!(!session.completed);
    }

    #[test]
    fn test_custom_durations_drive_countdowns_and_early_exit() {
        let durations = PhaseDurations {
            plan_secs: 60,
            focus_secs: 1500,
            reflect_secs: 120,
        };
        let mut session = FocusSession::new(durations);
        assert_eq!(session.seconds_remaining, 60);
        assert_eq!(durations.planned_focus_minutes(), 25);

        session.begin_focus(1, t0());
        assert_eq!(session.seconds_remaining, 1500);

        let outcome = session.finish_focus(t0() + Duration::seconds(1440), false);
        assert_eq!(outcome.actual_minutes, 24);
        assert!(outcome.is_early_exit);
        assert_eq!(session.seconds_remaining, 120);
    }

    #[test]
    fn test_completed_session_ignores_ticks_and_pauses() {
        let mut session = focus_session(1);
        session.finish_focus(t0() + Duration::seconds(3000), false);
        session.reflection = "done".to_string();
        assert!(session.try_complete(true));

        assert_eq!(session.tick(), None);
        let remaining = session.seconds_remaining;
        session.toggle_pause(t0() + Duration::seconds(4000));
        assert_eq!(session.seconds_remaining, remaining);
        assert!(!session.is_active);
    }
}
