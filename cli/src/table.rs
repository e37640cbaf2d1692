use minimalist_todo_core::{Category, Filter, KeyValueStore, Task, TaskCounts, Workspace};
use tabled::settings::object::Rows;
use tabled::settings::{Color, Modify, Style};
use tabled::{Table, Tabled};
use unicode_width::UnicodeWidthChar;

const TITLE_WIDTH: usize = 48;

#[derive(Tabled)]
struct TaskRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "")]
    done: &'static str,
    #[tabled(rename = "Priority")]
    priority: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Title")]
    title: String,
    #[tabled(rename = "Created")]
    created: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Tasks")]
    tasks: usize,
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

pub fn show_tasks<S: KeyValueStore + Clone>(ws: &Workspace<S>) {
    let filter = ws.tasks.filter();
    let visible = ws.tasks.visible_tasks();
    if visible.is_empty() {
        println!("{}", filter.empty_message());
        println!("{}", filter.empty_hint());
        return;
    }

    let rows: Vec<TaskRow> = visible.iter().map(|task| task_row(ws, task)).collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);

    if filter != Filter::All {
        println!("Showing {} of {} tasks ({})", visible.len(), ws.tasks.counts().total, filter);
    }
}

fn task_row<S: KeyValueStore + Clone>(ws: &Workspace<S>, task: &Task) -> TaskRow {
    let category = ws
        .resolve_category(task)
        .map(|c| c.name.clone())
        .unwrap_or_else(|| "-".to_string());
    TaskRow {
        id: short_id(&task.id).to_string(),
        done: if task.completed { "✔" } else { "☐" },
        priority: task.priority.to_string(),
        category,
        title: truncate(&task.title, TITLE_WIDTH),
        created: task
            .created_at
            .with_timezone(&chrono::Local)
            .format("%Y-%m-%d %H:%M")
            .to_string(),
    }
}

pub fn show_categories<S: KeyValueStore + Clone>(ws: &Workspace<S>) {
    let categories = ws.categories.categories();
    if categories.is_empty() {
        println!("No categories yet.");
        return;
    }
    let rows: Vec<CategoryRow> = categories
        .iter()
        .map(|category| category_row(category, ws.tasks.tasks()))
        .collect();

    let mut table = Table::new(rows);
    table
        .with(Style::modern())
        .with(Modify::new(Rows::first()).with(Color::FG_CYAN));
    println!("{}", table);
}

fn category_row(category: &Category, tasks: &[Task]) -> CategoryRow {
    CategoryRow {
        id: short_id(&category.id).to_string(),
        name: category.name.clone(),
        color: category.color.clone(),
        tasks: tasks
            .iter()
            .filter(|t| t.category.as_deref() == Some(category.id.as_str()))
            .count(),
    }
}

pub fn show_stats(counts: &TaskCounts) {
    println!("Total tasks: {}", counts.total);
    println!("Completed:   {}", counts.completed);
    println!("Active:      {}", counts.active);
    println!("Progress:    {}%", counts.completion_percent());
}

/// Cuts `text` to at most `max` display columns, ending with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    let mut width = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w > max.saturating_sub(1) {
            let rest: usize = text.chars().map(|c| c.width().unwrap_or(0)).sum();
            if rest <= max {
                return text.to_string();
            }
            out.push('…');
            return out;
        }
        width += w;
        out.push(c);
    }
    out
}
