//! Domain models for the todo store.
//!
//! These models are storage-agnostic. Enumerated fields are stored and
//! exchanged using their upper-case wire names ("TO DO", "HIGH", "WORK").

use serde::{Deserialize, Serialize};

/// Client-chosen integer id of a todo.
pub type TodoId = i64;

/// A single task record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub todo: String,
    pub priority: Priority,
    pub status: Status,
    pub category: Category,
    /// Canonical `yyyy-MM-dd`, or empty when created without a due date.
    pub due_date: String,
}

/// Progress of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Status {
    #[default]
    #[serde(rename = "TO DO")]
    ToDo,
    #[serde(rename = "IN PROGRESS")]
    InProgress,
    #[serde(rename = "DONE")]
    Done,
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Status::ToDo => write!(f, "TO DO"),
            Status::InProgress => write!(f, "IN PROGRESS"),
            Status::Done => write!(f, "DONE"),
        }
    }
}

impl std::str::FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TO DO" => Ok(Status::ToDo),
            "IN PROGRESS" => Ok(Status::InProgress),
            "DONE" => Ok(Status::Done),
            _ => Err(format!("Invalid Status: {}", s)),
        }
    }
}

/// Urgency of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Priority::High => "HIGH",
            Priority::Medium => "MEDIUM",
            Priority::Low => "LOW",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "HIGH" => Ok(Priority::High),
            "MEDIUM" => Ok(Priority::Medium),
            "LOW" => Ok(Priority::Low),
            _ => Err(format!("Invalid Priority: {}", s)),
        }
    }
}

/// Area of life a todo belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum Category {
    #[default]
    Work,
    Home,
    Learning,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Category::Work => "WORK",
            Category::Home => "HOME",
            Category::Learning => "LEARNING",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "WORK" => Ok(Category::Work),
            "HOME" => Ok(Category::Home),
            "LEARNING" => Ok(Category::Learning),
            _ => Err(format!("Invalid Category: {}", s)),
        }
    }
}

// =============================================================================
// Query Types
// =============================================================================

/// Filter for listing todos.
///
/// Every present field is a substring match against its column; all
/// present fields must match. An absent field matches every row.
#[derive(Debug, Clone, Default)]
pub struct TodoQuery {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub category: Option<Category>,
    /// Due date text, already normalized to `yyyy-MM-dd` by the caller.
    pub due_date: Option<String>,
    /// Free text matched against the todo description.
    pub search: Option<String>,
}

impl TodoQuery {
    /// Todos whose due date matches `date` (empty matches everything).
    pub fn due_on(date: impl Into<String>) -> Self {
        Self {
            due_date: Some(date.into()),
            ..Self::default()
        }
    }
}
