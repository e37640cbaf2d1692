use anyhow::Result;
use tracing::debug;

use crate::model::task::{Filter, Task, TaskDraft, TaskPatch};
use crate::repository::{KeyValueStore, Persistence};
use crate::service::{resolve_prefix, Outcome};

/// Aggregate counts over the whole collection, ignoring the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskCounts {
    pub total: usize,
    pub completed: usize,
    pub active: usize,
}

impl TaskCounts {
    /// Rounded to the nearest whole percent; 0 for an empty list.
    pub fn completion_percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        (self.completed as f64 * 100.0 / self.total as f64).round() as u8
    }
}

/// Owns the task list. Every applied mutation writes the full list back.
pub struct TaskService<S: KeyValueStore> {
    persistence: Persistence<S>,
    tasks: Vec<Task>,
    filter: Filter,
}

impl<S: KeyValueStore> TaskService<S> {
    pub fn load(persistence: Persistence<S>) -> Self {
        let tasks = persistence.load_tasks();
        debug!(count = tasks.len(), "tasks loaded");
        Self {
            persistence,
            tasks,
            filter: Filter::default(),
        }
    }

    /// Newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn find_by_prefix(&self, prefix: &str) -> Result<&Task> {
        resolve_prefix(&self.tasks, prefix, |t| t.id.as_str(), "task")
    }

    pub fn filter(&self) -> Filter {
        self.filter
    }

    /// View state only; not persisted.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
    }

    pub fn visible_tasks(&self) -> Vec<&Task> {
        self.tasks.iter().filter(|t| self.filter.matches(t)).collect()
    }

    pub fn counts(&self) -> TaskCounts {
        let total = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        TaskCounts {
            total,
            completed,
            active: total - completed,
        }
    }

    pub fn add(&mut self, draft: TaskDraft) -> Result<Task> {
        let task = Task::from_draft(draft);
        self.tasks.insert(0, task.clone());
        self.persist()?;
        debug!(id = %task.id, "task added");
        Ok(task)
    }

    pub fn toggle(&mut self, id: &str) -> Result<Outcome> {
        self.modify(id, |task| task.completed = !task.completed)
    }

    pub fn update(&mut self, id: &str, patch: TaskPatch) -> Result<Outcome> {
        self.modify(id, |task| task.apply(patch))
    }

    pub fn remove(&mut self, id: &str) -> Result<Outcome> {
        let Some(pos) = self.tasks.iter().position(|t| t.id == id) else {
            debug!(id, "remove: task not found");
            return Ok(Outcome::NotFound);
        };
        self.tasks.remove(pos);
        self.persist()?;
        Ok(Outcome::Applied)
    }

    fn modify(&mut self, id: &str, change: impl FnOnce(&mut Task)) -> Result<Outcome> {
        let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) else {
            debug!(id, "task not found");
            return Ok(Outcome::NotFound);
        };
        change(task);
        self.persist()?;
        Ok(Outcome::Applied)
    }

    fn persist(&self) -> Result<()> {
        self.persistence.save_tasks(&self.tasks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::task::Priority;
    use crate::repository::MemoryStore;
    use pretty_assertions::assert_eq;

    fn service() -> TaskService<MemoryStore> {
        TaskService::load(Persistence::new(MemoryStore::new()))
    }

    #[test]
    fn test_add_prepends() {
        let mut service = service();
        let first = service.add(TaskDraft::new("first")).unwrap();
        let second = service.add(TaskDraft::new("second")).unwrap();
        let third = service.add(TaskDraft::new("third")).unwrap();

        let ids: Vec<&str> = service.tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec![third.id.as_str(), second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn test_toggle_twice_restores() {
        let mut service = service();
        let task = service.add(TaskDraft::new("x")).unwrap();

        assert_eq!(service.toggle(&task.id).unwrap(), Outcome::Applied);
        assert!(service.get(&task.id).unwrap().completed);
        assert_eq!(service.toggle(&task.id).unwrap(), Outcome::Applied);
        assert!(!service.get(&task.id).unwrap().completed);
    }

    #[test]
    fn test_unknown_id_is_not_found() {
        let mut service = service();
        service.add(TaskDraft::new("x")).unwrap();
        let before = service.tasks().to_vec();

        assert_eq!(service.toggle("missing").unwrap(), Outcome::NotFound);
        assert_eq!(service.update("missing", TaskPatch::default().title("y")).unwrap(), Outcome::NotFound);
        assert_eq!(service.remove("missing").unwrap(), Outcome::NotFound);
        assert_eq!(service.tasks(), before.as_slice());
    }

    #[test]
    fn test_empty_patch_changes_nothing() {
        let mut service = service();
        let task = service
            .add(TaskDraft::new("x").priority(Priority::High).description("d"))
            .unwrap();
        assert_eq!(service.update(&task.id, TaskPatch::default()).unwrap(), Outcome::Applied);
        assert_eq!(service.get(&task.id).unwrap(), &task);
    }

    #[test]
    fn test_counts() {
        let mut service = service();
        assert_eq!(service.counts().completion_percent(), 0);
        let a = service.add(TaskDraft::new("a")).unwrap();
        service.add(TaskDraft::new("b")).unwrap();
        service.add(TaskDraft::new("c")).unwrap();
        service.toggle(&a.id).unwrap();

        let counts = service.counts();
        assert_eq!(counts, TaskCounts { total: 3, completed: 1, active: 2 });
        assert_eq!(counts.completion_percent(), 33);
    }

    #[test]
    fn test_filter_keeps_order_and_is_not_persisted() {
        let store = MemoryStore::new();
        let mut service = TaskService::load(Persistence::new(store.clone()));
        let a = service.add(TaskDraft::new("a")).unwrap();
        let b = service.add(TaskDraft::new("b")).unwrap();
        let c = service.add(TaskDraft::new("c")).unwrap();
        service.toggle(&b.id).unwrap();

        service.set_filter(Filter::Active);
        let visible: Vec<&str> = service.visible_tasks().iter().map(|t| t.id.as_str()).collect();
        assert_eq!(visible, vec![c.id.as_str(), a.id.as_str()]);

        let reloaded = TaskService::load(Persistence::new(store));
        assert_eq!(reloaded.filter(), Filter::All);
        assert_eq!(reloaded.visible_tasks().len(), 3);
    }

    #[test]
    fn test_find_by_prefix() {
        let mut service = service();
        let task = service.add(TaskDraft::new("x")).unwrap();
        assert_eq!(service.find_by_prefix(&task.id[..8]).unwrap().id, task.id);
        assert!(service.find_by_prefix("zzzz-not-a-uuid").is_err());
        assert!(service.find_by_prefix("").is_err());
    }
}
