use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, error, warn};

use crate::model::category::Category;
use crate::model::task::Task;
use crate::model::theme::Theme;
use crate::repository::traits::KeyValueStore;

pub const TASKS_KEY: &str = "minimalist-todo-tasks";
pub const CATEGORIES_KEY: &str = "minimalist-todo-categories";
pub const THEME_KEY: &str = "minimalist-todo-theme";

/// Reads and writes the three records over a key-value medium.
///
/// Loads never fail: missing records yield defaults and unreadable ones are
/// logged and replaced by an empty collection. Saves overwrite the whole
/// record and report medium failures to the caller.
#[derive(Clone, Debug)]
pub struct Persistence<S: KeyValueStore> {
    store: S,
    ambient_theme: Option<Theme>,
}

impl<S: KeyValueStore> Persistence<S> {
    /// Uses the host's ambient color scheme for the theme fallback.
    pub fn new(store: S) -> Self {
        Self {
            store,
            ambient_theme: detect_ambient_theme(),
        }
    }

    /// Overrides the ambient color scheme, `None` meaning "not detectable".
    pub fn with_ambient_theme(mut self, theme: Option<Theme>) -> Self {
        self.ambient_theme = theme;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// An empty record reads as absent, same as a missing one.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let raw = self
            .store
            .get(key)
            .with_context(|| format!("Failed to read '{}'", key))?;
        match raw {
            None => Ok(None),
            Some(raw) if raw.is_empty() => Ok(None),
            Some(raw) => serde_json::from_str(&raw)
                .map(Some)
                .with_context(|| format!("Failed to parse '{}'", key)),
        }
    }

    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let json = serde_json::to_string(value)
            .with_context(|| format!("Failed to serialize '{}'", key))?;
        self.store
            .set(key, &json)
            .with_context(|| format!("Failed to write '{}'", key))?;
        debug!(key, bytes = json.len(), "record saved");
        Ok(())
    }

    pub fn load_tasks(&self) -> Vec<Task> {
        match self.load::<Vec<Task>>(TASKS_KEY) {
            Ok(Some(tasks)) => tasks,
            Ok(None) => Vec::new(),
            Err(err) => {
                error!(key = TASKS_KEY, "Failed to load tasks, starting empty: {:#}", err);
                Vec::new()
            }
        }
    }

    pub fn save_tasks(&self, tasks: &[Task]) -> Result<()> {
        self.save(TASKS_KEY, tasks)
    }

    /// First run seeds the default categories and persists them.
    pub fn load_categories(&self) -> Vec<Category> {
        match self.load::<Vec<Category>>(CATEGORIES_KEY) {
            Ok(Some(categories)) => categories,
            Ok(None) => {
                let defaults = Category::defaults();
                if let Err(err) = self.save_categories(&defaults) {
                    warn!(key = CATEGORIES_KEY, "Failed to persist default categories: {:#}", err);
                }
                defaults
            }
            Err(err) => {
                error!(key = CATEGORIES_KEY, "Failed to load categories, starting empty: {:#}", err);
                Vec::new()
            }
        }
    }

    pub fn save_categories(&self, categories: &[Category]) -> Result<()> {
        self.save(CATEGORIES_KEY, categories)
    }

    /// Stored value if it is exactly `light` or `dark`, else the ambient
    /// preference, else light.
    pub fn load_theme(&self) -> Theme {
        match self.store.get(THEME_KEY) {
            Ok(Some(raw)) => match raw.parse::<Theme>() {
                Ok(theme) => return theme,
                Err(err) => debug!(key = THEME_KEY, "Ignoring stored theme: {}", err),
            },
            Ok(None) => {}
            Err(err) => warn!(key = THEME_KEY, "Failed to read theme: {}", err),
        }
        self.ambient_theme.unwrap_or_default()
    }

    /// Stored as the bare word, not as JSON.
    pub fn save_theme(&self, theme: Theme) -> Result<()> {
        self.store
            .set(THEME_KEY, theme.as_str())
            .with_context(|| format!("Failed to write '{}'", THEME_KEY))?;
        debug!(key = THEME_KEY, theme = theme.as_str(), "record saved");
        Ok(())
    }
}

/// The terminal's color scheme, from the `COLORFGBG` convention.
pub fn detect_ambient_theme() -> Option<Theme> {
    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| Theme::from_colorfgbg(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::{Priority, TaskDraft};
    use crate::repository::memory::MemoryStore;
    use pretty_assertions::assert_eq;

    fn persistence() -> Persistence<MemoryStore> {
        Persistence::new(MemoryStore::new()).with_ambient_theme(None)
    }

    #[test]
    fn test_missing_tasks_is_empty() {
        assert!(persistence().load_tasks().is_empty());
    }

    #[test]
    fn test_tasks_round_trip() {
        let persistence = persistence();
        let tasks = vec![
            Task::from_draft(TaskDraft::new("Buy milk").priority(Priority::Low)),
            Task::from_draft(TaskDraft::new("Call mom").description("Sunday").category("2")),
        ];
        persistence.save_tasks(&tasks).unwrap();
        assert_eq!(persistence.load_tasks(), tasks);
    }

    #[test]
    fn test_created_at_is_iso_string() {
        let persistence = persistence();
        let task = Task::new("x");
        persistence.save_tasks(std::slice::from_ref(&task)).unwrap();

        let raw = persistence.store().get(TASKS_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let stamp = value[0]["createdAt"].as_str().unwrap();
        let parsed = chrono::DateTime::parse_from_rfc3339(stamp).unwrap();
        assert_eq!(parsed, task.created_at);
    }

    #[test]
    fn test_reads_browser_shaped_record() {
        let persistence = persistence();
        persistence
            .store()
            .set(
                TASKS_KEY,
                r#"[{"id":"a1","title":"Old","completed":true,"createdAt":"2024-03-01T09:30:00.000Z","priority":"high","category":"1"}]"#,
            )
            .unwrap();

        let tasks = persistence.load_tasks();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].id, "a1");
        assert!(tasks[0].completed);
        assert_eq!(tasks[0].priority, Priority::High);
        assert_eq!(tasks[0].created_at.to_rfc3339(), "2024-03-01T09:30:00+00:00");
    }

    #[test]
    fn test_malformed_tasks_recover_empty() {
        let persistence = persistence();
        persistence
            .store()
            .set(TASKS_KEY, r#"[{"id":"a1","title":"Trunc"#)
            .unwrap();
        assert!(persistence.load_tasks().is_empty());
    }

    #[test]
    fn test_first_run_seeds_categories() {
        let persistence = persistence();
        let categories = persistence.load_categories();
        assert_eq!(categories, Category::defaults());

        let stored: Vec<Category> = persistence.load(CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(stored, categories);
    }

    #[test]
    fn test_empty_string_records_read_as_absent() {
        let persistence = persistence();
        persistence.store().set(CATEGORIES_KEY, "").unwrap();
        persistence.store().set(TASKS_KEY, "").unwrap();

        assert_eq!(persistence.load_categories(), Category::defaults());
        assert!(persistence.load_tasks().is_empty());
        let stored: Vec<Category> = persistence.load(CATEGORIES_KEY).unwrap().unwrap();
        assert_eq!(stored, Category::defaults());
    }

    #[test]
    fn test_stored_empty_categories_are_not_reseeded() {
        let persistence = persistence();
        persistence.save_categories(&[]).unwrap();
        assert!(persistence.load_categories().is_empty());
    }

    #[test]
    fn test_malformed_categories_recover_empty() {
        let persistence = persistence();
        persistence.store().set(CATEGORIES_KEY, "{not json").unwrap();
        assert!(persistence.load_categories().is_empty());
    }

    #[test]
    fn test_theme_fallbacks() {
        let store = MemoryStore::new();
        let plain = Persistence::new(store.clone()).with_ambient_theme(None);
        let dark_host = Persistence::new(store.clone()).with_ambient_theme(Some(Theme::Dark));

        assert_eq!(plain.load_theme(), Theme::Light);
        assert_eq!(dark_host.load_theme(), Theme::Dark);

        store.set(THEME_KEY, "purple").unwrap();
        assert_eq!(plain.load_theme(), Theme::Light);
        assert_eq!(dark_host.load_theme(), Theme::Dark);

        plain.save_theme(Theme::Light).unwrap();
        assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        assert_eq!(dark_host.load_theme(), Theme::Light);
    }
}
