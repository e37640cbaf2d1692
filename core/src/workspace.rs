use crate::model::category::Category;
use crate::model::task::Task;
use crate::repository::{KeyValueStore, Persistence};
use crate::service::category_service::CategoryService;
use crate::service::task_service::TaskService;
use crate::service::theme_service::{DarkModeFlag, ThemeService};

/// The three stores over one medium, owned together and handed to the
/// presentation layer by reference.
pub struct Workspace<S: KeyValueStore + Clone> {
    pub tasks: TaskService<S>,
    pub categories: CategoryService<S>,
    pub theme: ThemeService<S>,
}

impl<S: KeyValueStore + Clone> Workspace<S> {
    pub fn open(persistence: Persistence<S>) -> Self {
        Self {
            tasks: TaskService::load(persistence.clone()),
            categories: CategoryService::load(persistence.clone()),
            theme: ThemeService::load(persistence, DarkModeFlag::default()),
        }
    }

    /// The flag the renderer reads to pick its palette.
    pub fn dark_mode(&self) -> DarkModeFlag {
        self.theme.applier().clone()
    }

    /// `None` when the task has no category or points at a deleted one.
    pub fn resolve_category(&self, task: &Task) -> Option<&Category> {
        self.categories.lookup(task.category.as_deref())
    }
}
