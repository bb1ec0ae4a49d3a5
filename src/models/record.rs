//! The contract shared by the three per-user collections.

use serde::{de::DeserializeOwned, Serialize};
use std::fmt;

/// A per-user record collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Moods,
    Tasks,
    Habits,
}

/// Where a newly created record lands in its sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Most recent first.
    Prepend,
    /// Creation order.
    Append,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Moods => "moods",
            Category::Tasks => "tasks",
            Category::Habits => "habits",
        }
    }

    /// Storage key holding `user_id`'s sequence for this category.
    pub fn storage_key(&self, user_id: &str) -> String {
        format!("{}:{}", self.as_str(), user_id)
    }

    pub fn placement(&self) -> Placement {
        match self {
            Category::Moods => Placement::Prepend,
            Category::Tasks | Category::Habits => Placement::Append,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const CATEGORY: Category;
    /// Response key for a single record, e.g. `{"task": ...}`.
    const SINGULAR: &'static str;
    /// Human-readable name used in error messages.
    const LABEL: &'static str;
}

/// Records that can be addressed by their caller-supplied id.
pub trait Identified: Record {
    fn id(&self) -> &str;
}
