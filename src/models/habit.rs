use serde::{Deserialize, Serialize};

use super::record::{Category, Identified, Record};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Habit {
    /// Client-generated; uniqueness is the caller's responsibility.
    pub id: String,
    pub name: String,
    /// Calendar dates in the viewer's zone, formatted like `"Fri Oct 16 2026"`.
    #[serde(default)]
    pub completed_dates: Vec<String>,
    pub created_at: i64,
}

impl Habit {
    pub fn total_completions(&self) -> usize {
        self.completed_dates.len()
    }
}

impl Record for Habit {
    const CATEGORY: Category = Category::Habits;
    const SINGULAR: &'static str = "habit";
    const LABEL: &'static str = "Habit";
}

impl Identified for Habit {
    fn id(&self) -> &str {
        &self.id
    }
}
