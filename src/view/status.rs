use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::todo::Task;

/// Narrowing by completion state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Complete,
}

impl StatusFilter {
    pub fn matches(self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::InProgress => !task.completed,
            StatusFilter::Complete => task.completed,
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::InProgress => write!(f, "in-progress"),
            StatusFilter::Complete => write!(f, "complete"),
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "in-progress" | "inprogress" | "open" => Ok(StatusFilter::InProgress),
            "complete" | "completed" | "done" => Ok(StatusFilter::Complete),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}
