use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::{non_empty, ParseEnumError};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "l" | "low" => Ok(Priority::Low),
            "m" | "med" | "medium" => Ok(Priority::Medium),
            "h" | "high" => Ok(Priority::High),
            _ => Err(ParseEnumError::new("priority", s)),
        }
    }
}

/// View predicate over the task list. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Active, Filter::Completed];

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !task.completed,
            Filter::Completed => task.completed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        }
    }

    /// Cycles all -> active -> completed -> all.
    pub fn next(&self) -> Filter {
        match self {
            Filter::All => Filter::Active,
            Filter::Active => Filter::Completed,
            Filter::Completed => Filter::All,
        }
    }

    /// Headline shown when nothing passes the filter.
    pub fn empty_message(&self) -> &'static str {
        match self {
            Filter::All => "No tasks found",
            Filter::Active => "No active tasks found",
            Filter::Completed => "No completed tasks yet",
        }
    }

    pub fn empty_hint(&self) -> &'static str {
        match self {
            Filter::Completed => "Start completing tasks to see them here.",
            _ => "Add a new task to get started.",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Filter {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" | "done" => Ok(Filter::Completed),
            _ => Err(ParseEnumError::new("filter", s)),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub priority: Priority,
    /// Category id. Not checked against the category list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl Task {
    pub fn new(title: impl Into<String>) -> Self {
        Self::from_draft(TaskDraft::new(title))
    }

    pub fn from_draft(draft: TaskDraft) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: draft.title,
            description: non_empty(draft.description),
            completed: false,
            created_at: Utc::now(),
            priority: draft.priority,
            category: non_empty(draft.category),
        }
    }

    /// Merges the patch. `id` and `created_at` have no patch field and are
    /// never touched.
    pub fn apply(&mut self, patch: TaskPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(description) = patch.description {
            self.description = non_empty(description);
        }
        if let Some(priority) = patch.priority {
            self.priority = priority;
        }
        if let Some(category) = patch.category {
            self.category = non_empty(category);
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
    }
}

/// Caller-supplied fields for a new task.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskDraft {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
    pub category: Option<String>,
}

impl TaskDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn category(mut self, category_id: impl Into<String>) -> Self {
        self.category = Some(category_id.into());
        self
    }
}

/// Partial update for a task. `None` leaves a field alone; for the optional
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub category: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn is_empty(&self) -> bool {
        self == &TaskPatch::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn category(mut self, category_id: Option<String>) -> Self {
        self.category = Some(category_id);
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_defaults() {
        let task = Task::from_draft(TaskDraft::new("Write report"));
        assert_eq!(task.title, "Write report");
        assert_eq!(task.priority, Priority::Medium);
        assert!(!task.completed);
        assert!(task.description.is_none());
        assert!(task.category.is_none());
        assert!(Uuid::parse_str(&task.id).is_ok());
    }

    #[test]
    fn test_empty_optional_fields_become_absent() {
        let task = Task::from_draft(TaskDraft::new("x").description("").category(""));
        assert!(task.description.is_none());
        assert!(task.category.is_none());
    }

    #[test]
    fn test_apply_keeps_identity() {
        let mut task = Task::new("Old");
        let before = task.clone();
        task.apply(
            TaskPatch::default()
                .title("New")
                .priority(Priority::High)
                .completed(true)
                .description(Some("details".to_string())),
        );
        assert_eq!(task.id, before.id);
        assert_eq!(task.created_at, before.created_at);
        assert_eq!(task.title, "New");
        assert_eq!(task.priority, Priority::High);
        assert!(task.completed);
        assert_eq!(task.description.as_deref(), Some("details"));

        task.apply(TaskPatch::default().description(None).category(Some("2".to_string())));
        assert!(task.description.is_none());
        assert_eq!(task.category.as_deref(), Some("2"));
    }

    #[test]
    fn test_parse_priority() {
        assert_eq!("h".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Med".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!("low".parse::<Priority>().unwrap(), Priority::Low);
        assert!("urgent".parse::<Priority>().is_err());
    }

    #[test]
    fn test_filter_predicates() {
        let mut task = Task::new("x");
        assert!(Filter::All.matches(&task));
        assert!(Filter::Active.matches(&task));
        assert!(!Filter::Completed.matches(&task));
        task.completed = true;
        assert!(Filter::All.matches(&task));
        assert!(!Filter::Active.matches(&task));
        assert!(Filter::Completed.matches(&task));
    }

    #[test]
    fn test_filter_cycle() {
        assert_eq!(Filter::All.next(), Filter::Active);
        assert_eq!(Filter::Active.next(), Filter::Completed);
        assert_eq!(Filter::Completed.next(), Filter::All);
    }

    #[test]
    fn test_serialized_shape() {
        let mut task = Task::from_draft(TaskDraft::new("Buy milk").priority(Priority::Low));
        task.id = "abc".to_string();
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["title"], "Buy milk");
        assert_eq!(value["priority"], "low");
        assert_eq!(value["completed"], false);
        assert!(value["createdAt"].is_string());
        assert!(value.get("description").is_none());
        assert!(value.get("category").is_none());
    }
}
