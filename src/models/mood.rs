use serde::{Deserialize, Serialize};

use super::record::{Category, Record};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum MoodLabel {
    Great,
    Good,
    Okay,
    #[serde(rename = "Not Great")]
    NotGreat,
    Struggling,
}

/// A single check-in. Entries are never updated or deleted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MoodEntry {
    pub mood: MoodLabel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Epoch milliseconds.
    pub timestamp: i64,
}

impl Record for MoodEntry {
    const CATEGORY: Category = Category::Moods;
    const SINGULAR: &'static str = "mood";
    const LABEL: &'static str = "Mood";
}
