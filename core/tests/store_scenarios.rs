use minimalist_todo_core::repository::persistence::TASKS_KEY;
use minimalist_todo_core::{
    Category, Filter, KeyValueStore, MemoryStore, Outcome, Persistence, Priority, TaskDraft,
    TaskPatch, Theme, Workspace,
};
use pretty_assertions::assert_eq;

fn open(store: &MemoryStore) -> Workspace<MemoryStore> {
    Workspace::open(Persistence::new(store.clone()).with_ambient_theme(None))
}

#[test]
fn adds_are_counted_and_newest_first() {
    let store = MemoryStore::new();
    let mut ws = open(&store);

    let titles = ["one", "two", "three", "four", "five"];
    for title in titles {
        ws.tasks.add(TaskDraft::new(title)).unwrap();
    }

    assert_eq!(ws.tasks.tasks().len(), titles.len());
    let stored: Vec<&str> = ws.tasks.tasks().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(stored, vec!["five", "four", "three", "two", "one"]);
}

#[test]
fn buy_milk_moves_between_filters() {
    let store = MemoryStore::new();
    let mut ws = open(&store);
    let milk = ws
        .tasks
        .add(TaskDraft::new("Buy milk").priority(Priority::Low))
        .unwrap();

    ws.tasks.set_filter(Filter::Active);
    assert!(ws.tasks.visible_tasks().iter().any(|t| t.id == milk.id));
    ws.tasks.set_filter(Filter::Completed);
    assert!(!ws.tasks.visible_tasks().iter().any(|t| t.id == milk.id));

    assert_eq!(ws.tasks.toggle(&milk.id).unwrap(), Outcome::Applied);

    assert!(ws.tasks.visible_tasks().iter().any(|t| t.id == milk.id));
    ws.tasks.set_filter(Filter::Active);
    assert!(!ws.tasks.visible_tasks().iter().any(|t| t.id == milk.id));
}

#[test]
fn second_remove_is_a_no_op() {
    let store = MemoryStore::new();
    let mut ws = open(&store);
    let a = ws.tasks.add(TaskDraft::new("a")).unwrap();
    ws.tasks.add(TaskDraft::new("b")).unwrap();

    assert_eq!(ws.tasks.remove(&a.id).unwrap(), Outcome::Applied);
    assert_eq!(ws.tasks.tasks().len(), 1);
    assert_eq!(ws.tasks.remove(&a.id).unwrap(), Outcome::NotFound);
    assert_eq!(ws.tasks.tasks().len(), 1);
}

#[test]
fn mutations_survive_reopen() {
    let store = MemoryStore::new();
    let (kept, edited) = {
        let mut ws = open(&store);
        let kept = ws.tasks.add(TaskDraft::new("kept").category("1")).unwrap();
        let edited = ws.tasks.add(TaskDraft::new("draft")).unwrap();
        let gone = ws.tasks.add(TaskDraft::new("gone")).unwrap();
        ws.tasks
            .update(
                &edited.id,
                TaskPatch::default()
                    .title("final")
                    .priority(Priority::High)
                    .completed(true),
            )
            .unwrap();
        ws.tasks.remove(&gone.id).unwrap();
        (kept, edited)
    };

    let ws = open(&store);
    let tasks = ws.tasks.tasks();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0].id, edited.id);
    assert_eq!(tasks[0].title, "final");
    assert_eq!(tasks[0].created_at, edited.created_at);
    assert!(tasks[0].completed);
    assert_eq!(tasks[1], kept);
}

#[test]
fn deleted_category_leaves_dangling_reference() {
    let store = MemoryStore::new();
    let mut ws = open(&store);
    let task = ws.tasks.add(TaskDraft::new("Quarterly report").category("1")).unwrap();
    assert_eq!(ws.resolve_category(&task).map(|c| c.name.as_str()), Some("Work"));

    assert_eq!(ws.categories.remove("1").unwrap(), Outcome::Applied);

    let task = ws.tasks.get(&task.id).unwrap();
    assert_eq!(task.category.as_deref(), Some("1"));
    assert!(ws.categories.lookup(Some("1")).is_none());
    assert!(ws.resolve_category(task).is_none());

    // Still dangling after a reload.
    let ws = open(&store);
    let task = ws.tasks.get(&task.id).unwrap();
    assert_eq!(task.category.as_deref(), Some("1"));
    assert!(ws.resolve_category(task).is_none());
}

#[test]
fn first_run_seeds_exact_categories() {
    let store = MemoryStore::new();
    let ws = open(&store);

    let seeded: Vec<(&str, &str)> = ws
        .categories
        .categories()
        .iter()
        .map(|c| (c.name.as_str(), c.color.as_str()))
        .collect();
    assert_eq!(
        seeded,
        vec![("Work", "#3B82F6"), ("Personal", "#10B981"), ("Shopping", "#F59E0B")]
    );

    let persisted: Vec<Category> = Persistence::new(store.clone())
        .load("minimalist-todo-categories")
        .unwrap()
        .unwrap();
    assert_eq!(persisted, ws.categories.categories());
}

#[test]
fn truncated_tasks_record_loads_empty() {
    let store = MemoryStore::new();
    store
        .set(TASKS_KEY, r#"[{"id":"1","title":"Buy mi"#)
        .unwrap();

    let mut ws = open(&store);
    assert!(ws.tasks.tasks().is_empty());

    // The store stays usable and the next write replaces the bad record.
    ws.tasks.add(TaskDraft::new("fresh")).unwrap();
    let ws = open(&store);
    assert_eq!(ws.tasks.tasks().len(), 1);
}

#[test]
fn theme_toggle_round_trips_through_storage() {
    let store = MemoryStore::new();
    let mut ws = open(&store);
    let dark_mode = ws.dark_mode();
    assert_eq!(ws.theme.theme(), Theme::Light);

    ws.theme.toggle().unwrap();
    assert!(dark_mode.is_dark());

    let ws = open(&store);
    assert_eq!(ws.theme.theme(), Theme::Dark);
    assert!(ws.dark_mode().is_dark());
}
