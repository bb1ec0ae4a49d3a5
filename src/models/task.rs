use serde::{Deserialize, Serialize};

use super::record::{Category, Identified, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Default for Priority {
    fn default() -> Self {
        Self::Medium
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Client-generated; uniqueness is the caller's responsibility.
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub priority: Priority,
    pub created_at: i64,
}

impl Record for Task {
    const CATEGORY: Category = Category::Tasks;
    const SINGULAR: &'static str = "task";
    const LABEL: &'static str = "Task";
}

impl Identified for Task {
    fn id(&self) -> &str {
        &self.id
    }
}
