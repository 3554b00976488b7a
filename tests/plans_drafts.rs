#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lifeos::db::plans::Plans;
    use lifeos::libs::draft::DraftCache;
    use lifeos::libs::plan::{DailyPlan, PlanItem};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct PlanTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for PlanTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            PlanTestContext { _temp_dir: temp_dir }
        }
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn sample_plan() -> DailyPlan {
        DailyPlan {
            items: vec![
                PlanItem { text: "Write the report".to_string(), done: false },
                PlanItem { text: "Review PRs".to_string(), done: true },
            ],
        }
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_plan_upsert_and_fetch(_ctx: &mut PlanTestContext) {
        let plans = Plans::new().unwrap();

        assert!(plans.fetch(day(10)).unwrap().is_none());
        plans.upsert(day(10), &sample_plan()).unwrap();
        assert_eq!(plans.fetch(day(10)).unwrap(), Some(sample_plan()));
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_plan_upsert_replaces_existing_day(_ctx: &mut PlanTestContext) {
        let plans = Plans::new().unwrap();

        plans.upsert(day(10), &sample_plan()).unwrap();

        let mut updated = sample_plan();
        updated.items[0].done = true;
        updated.items.push(PlanItem { text: "Inbox zero".to_string(), done: false });
        plans.upsert(day(10), &updated).unwrap();

        let stored = plans.fetch(day(10)).unwrap().unwrap();
        assert_eq!(stored.items.len(), 3);
        assert!(stored.items[0].done);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_plans_keyed_by_date(_ctx: &mut PlanTestContext) {
        let plans = Plans::new().unwrap();

        plans.upsert(day(10), &sample_plan()).unwrap();
        assert!(plans.fetch(day(11)).unwrap().is_none());
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_draft_store_load_clear(_ctx: &mut PlanTestContext) {
        let drafts = DraftCache::new();

        assert_eq!(drafts.load::<DailyPlan>("plan", day(10)).unwrap(), None);

        drafts.store("plan", day(10), &sample_plan()).unwrap();
        assert_eq!(drafts.load::<DailyPlan>("plan", day(10)).unwrap(), Some(sample_plan()));

        drafts.clear("plan", day(10)).unwrap();
        assert_eq!(drafts.load::<DailyPlan>("plan", day(10)).unwrap(), None);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_drafts_keyed_by_kind_and_date(_ctx: &mut PlanTestContext) {
        let drafts = DraftCache::new();

        drafts.store("plan", day(10), &sample_plan()).unwrap();
        assert_eq!(drafts.load::<DailyPlan>("plan", day(11)).unwrap(), None);
        assert_eq!(drafts.load::<DailyPlan>("notes", day(10)).unwrap(), None);
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_clear_missing_draft_is_a_no_op(_ctx: &mut PlanTestContext) {
        let drafts = DraftCache::new();
        drafts.clear("plan", day(10)).unwrap();
    }

    #[test_context(PlanTestContext)]
    #[test]
    fn test_draft_overwrite_keeps_latest(_ctx: &mut PlanTestContext) {
        let drafts = DraftCache::new();

        drafts.store("plan", day(10), &sample_plan()).unwrap();
        let mut updated = sample_plan();
        updated.items[1].done = false;
        drafts.store("plan", day(10), &updated).unwrap();

        assert_eq!(drafts.load::<DailyPlan>("plan", day(10)).unwrap(), Some(updated));
    }
}
