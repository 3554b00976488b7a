use serde::{Deserialize, Serialize};

/// One line of the daily plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanItem {
    pub text: String,
    pub done: bool,
}

impl PlanItem {
    pub fn new(text: &str) -> Self {
        PlanItem {
            text: text.to_string(),
            done: false,
        }
    }
}

/// The ordered items planned for one day. Structural equality drives the
/// autosave change detection.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DailyPlan {
    pub items: Vec<PlanItem>,
}

impl DailyPlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
