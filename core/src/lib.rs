pub mod input;
pub mod model;
pub mod repository;
pub mod service;
pub mod workspace;

pub use input::{expand_key, normalize_metadata, parse_args, split_line, ParsedInput, TASK_KEYS};
pub use model::category::{is_hex_color, Category, CategoryPatch, DEFAULT_COLOR, PRESET_COLORS};
pub use model::task::{Filter, Priority, Task, TaskDraft, TaskPatch};
pub use model::theme::Theme;
pub use model::ParseEnumError;
pub use repository::{FileStore, KeyValueStore, MemoryStore, Persistence, StorageError};
pub use service::category_service::CategoryService;
pub use service::task_service::{TaskCounts, TaskService};
pub use service::theme_service::{DarkModeFlag, ThemeApplier, ThemeService};
pub use service::Outcome;
pub use workspace::Workspace;
