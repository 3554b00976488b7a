#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use lifeos::db::quests::Quests;
    use lifeos::libs::quest::{Quarter, Quest};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct QuestTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for QuestTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            QuestTestContext { _temp_dir: temp_dir }
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_quarter_from_date() {
        assert_eq!(Quarter::from_date(date(2025, 1, 1)), Quarter::Q1);
        assert_eq!(Quarter::from_date(date(2025, 3, 31)), Quarter::Q1);
        assert_eq!(Quarter::from_date(date(2025, 4, 1)), Quarter::Q2);
        assert_eq!(Quarter::from_date(date(2025, 9, 30)), Quarter::Q3);
        assert_eq!(Quarter::from_date(date(2025, 12, 31)), Quarter::Q4);
    }

    #[test]
    fn test_quarter_display() {
        assert_eq!(Quarter::Q2.to_string(), "Q2");
    }

    #[test_context(QuestTestContext)]
    #[test]
    fn test_insert_and_fetch_by_quarter(_ctx: &mut QuestTestContext) {
        let quests = Quests::new().unwrap();

        let quest = Quest::new("Ship the side project", None, date(2025, 5, 12));
        let id = quests.insert(&quest).unwrap();
        assert!(id > 0);

        let stored = quests.fetch_quarter(2025, Quarter::Q2).unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Ship the side project");
        assert_eq!(stored[0].quarter, Quarter::Q2);
        assert_eq!(stored[0].year, 2025);
        assert!(!stored[0].done);
    }

    #[test_context(QuestTestContext)]
    #[test]
    fn test_quarters_and_years_are_separate_buckets(_ctx: &mut QuestTestContext) {
        let quests = Quests::new().unwrap();

        quests.insert(&Quest::new("Q1 goal", None, date(2025, 2, 1))).unwrap();
        quests.insert(&Quest::new("Q2 goal", None, date(2025, 5, 1))).unwrap();
        quests.insert(&Quest::new("Last year", None, date(2024, 2, 1))).unwrap();

        let q1 = quests.fetch_quarter(2025, Quarter::Q1).unwrap();
        assert_eq!(q1.len(), 1);
        assert_eq!(q1[0].title, "Q1 goal");
        assert!(quests.fetch_quarter(2025, Quarter::Q3).unwrap().is_empty());
    }

    #[test_context(QuestTestContext)]
    #[test]
    fn test_note_round_trips(_ctx: &mut QuestTestContext) {
        let quests = Quests::new().unwrap();

        let quest = Quest::new("Read 6 books", Some("one every two weeks".to_string()), date(2025, 1, 3));
        let id = quests.insert(&quest).unwrap();

        let stored = quests.fetch_by_id(id).unwrap().unwrap();
        assert_eq!(stored.note.as_deref(), Some("one every two weeks"));
    }

    #[test_context(QuestTestContext)]
    #[test]
    fn test_set_done(_ctx: &mut QuestTestContext) {
        let quests = Quests::new().unwrap();

        let id = quests.insert(&Quest::new("Run a 10k", None, date(2025, 7, 1))).unwrap();
        assert!(quests.set_done(id).unwrap());

        let stored = quests.fetch_by_id(id).unwrap().unwrap();
        assert!(stored.done);
    }

    #[test_context(QuestTestContext)]
    #[test]
    fn test_set_done_unknown_id(_ctx: &mut QuestTestContext) {
        let quests = Quests::new().unwrap();
        assert!(!quests.set_done(9999).unwrap());
        assert!(quests.fetch_by_id(9999).unwrap().is_none());
    }
}
