use minimalist_todo_core::{
    normalize_metadata, parse_args, CategoryService, KeyValueStore, Priority, TaskDraft,
    TaskPatch, TASK_KEYS,
};

/// Task fields typed by the user, checked before they reach the store.
#[derive(Debug, Default, PartialEq)]
pub struct TaskForm {
    pub title: String,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    /// `Some(None)` clears the category.
    pub category: Option<Option<String>>,
    pub warnings: Vec<String>,
}

impl TaskForm {
    /// Parses words like `Buy milk pri:low cat:Shopping desc:"2 litres"`.
    /// Category values resolve against the category list by id or name.
    pub fn parse<S: KeyValueStore>(words: &[String], categories: &CategoryService<S>) -> Self {
        let parsed = parse_args(words);
        let (metadata, mut warnings) = normalize_metadata(parsed.metadata, &TASK_KEYS);

        let description = metadata.get("description").map(|d| d.trim().to_string());

        let priority = metadata.get("priority").and_then(|p| match p.parse::<Priority>() {
            Ok(priority) => Some(priority),
            Err(e) => {
                warnings.push(e.to_string());
                None
            }
        });

        let category = metadata.get("category").and_then(|value| {
            let value = value.trim();
            if value.is_empty() || value.eq_ignore_ascii_case("none") {
                return Some(None);
            }
            match categories.find(value) {
                Ok(category) => Some(Some(category.id.clone())),
                Err(e) => {
                    warnings.push(e.to_string());
                    None
                }
            }
        });

        Self {
            title: parsed.title,
            description,
            priority,
            category,
            warnings,
        }
    }

    /// `None` when the title is empty.
    pub fn into_draft(self) -> Option<TaskDraft> {
        if self.title.is_empty() {
            return None;
        }
        let mut draft = TaskDraft::new(self.title);
        draft.description = self.description;
        draft.priority = self.priority.unwrap_or_default();
        draft.category = self.category.flatten();
        Some(draft)
    }

    /// An empty title keeps the current one.
    pub fn into_patch(self) -> TaskPatch {
        TaskPatch {
            title: Some(self.title).filter(|t| !t.is_empty()),
            description: self.description.map(Some),
            priority: self.priority,
            category: self.category,
            completed: None,
        }
    }
}
