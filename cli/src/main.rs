mod config;
mod form;
mod logging;
mod table;
mod tui;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use minimalist_todo_core::{
    is_hex_color, CategoryPatch, FileStore, Filter, KeyValueStore, MemoryStore, Outcome,
    Persistence, TaskPatch, Theme, Workspace, DEFAULT_COLOR,
};

use crate::config::Config;
use crate::form::TaskForm;
use crate::table::short_id;

#[derive(Parser)]
#[command(name = "mtodo")]
#[command(about = "A minimalist to-do list for the terminal", long_about = None)]
struct Cli {
    /// Directory holding the task, category and theme records
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Keep everything in memory for this run; nothing is written
    #[arg(long, global = true)]
    ephemeral: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a new task (usage: add Buy milk pri:low cat:Shopping "desc:2 litres")
    Add {
        /// Title words plus optional description:, priority:, category: pairs
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// List tasks
    List {
        /// all, active or completed
        #[arg(short, long, default_value = "all")]
        filter: Filter,
    },
    /// Show task counts
    Stats,
    /// Mark a task completed, or active again
    Toggle {
        /// Task id or unique id prefix
        id: String,
    },
    /// Change a task (usage: edit <id> New title pri:high cat:none)
    Edit {
        /// Task id or unique id prefix
        id: String,
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Delete a task
    Rm {
        /// Task id or unique id prefix
        id: String,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: Option<CategoryCommands>,
    },
    /// Show or change the color theme
    Theme {
        #[arg(value_enum, default_value_t = ThemeAction::Show)]
        action: ThemeAction,
    },
    /// Open the Terminal User Interface
    Tui,
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List categories
    List,
    /// Add a category
    Add {
        name: String,
        /// Display color as #RRGGBB
        #[arg(long, default_value = DEFAULT_COLOR)]
        color: String,
    },
    /// Rename or recolor a category
    Edit {
        /// Category id, id prefix or name
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        color: Option<String>,
    },
    /// Delete a category. Tasks keep pointing at it.
    Rm {
        /// Category id, id prefix or name
        id: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeAction {
    Show,
    Toggle,
    Light,
    Dark,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::resolve(cli.data_dir, cli.ephemeral)?;
    let owns_screen = matches!(cli.command, None | Some(Commands::Tui));
    let _logging = logging::init_logging(config.data_dir.as_deref(), owns_screen)?;

    match &config.data_dir {
        Some(dir) => {
            let store = FileStore::open(dir)?;
            let mut ws = Workspace::open(Persistence::new(store));
            run(&mut ws, cli.command)
        }
        None => {
            let mut ws = Workspace::open(Persistence::new(MemoryStore::new()));
            run(&mut ws, cli.command)
        }
    }
}

fn run<S: KeyValueStore + Clone>(ws: &mut Workspace<S>, command: Option<Commands>) -> Result<()> {
    match command {
        Some(Commands::Add { args }) => add_task(ws, &args),
        Some(Commands::List { filter }) => {
            ws.tasks.set_filter(filter);
            table::show_tasks(ws);
            Ok(())
        }
        Some(Commands::Stats) => {
            table::show_stats(&ws.tasks.counts());
            Ok(())
        }
        Some(Commands::Toggle { id }) => {
            let id = ws.tasks.find_by_prefix(&id)?.id.clone();
            let outcome = ws.tasks.toggle(&id)?;
            if let Some(task) = ws.tasks.get(&id) {
                let state = if task.completed { "completed" } else { "active" };
                println!("Task {} is now {}: {}", short_id(&id), state, task.title);
            }
            report_missing(outcome, "task", &id);
            Ok(())
        }
        Some(Commands::Edit { id, args }) => edit_task(ws, &id, &args),
        Some(Commands::Rm { id }) => {
            let task = ws.tasks.find_by_prefix(&id)?.clone();
            let outcome = ws.tasks.remove(&task.id)?;
            if outcome.is_applied() {
                println!("Task deleted: {} (ID: {})", task.title, short_id(&task.id));
            }
            report_missing(outcome, "task", &task.id);
            Ok(())
        }
        Some(Commands::Category { command }) => run_category(ws, command),
        Some(Commands::Theme { action }) => run_theme(ws, action),
        Some(Commands::Tui) | None => tui::run(ws),
    }
}

fn add_task<S: KeyValueStore + Clone>(ws: &mut Workspace<S>, args: &[String]) -> Result<()> {
    let form = TaskForm::parse(args, &ws.categories);
    for warning in &form.warnings {
        println!("Warning: {}", warning);
    }
    let Some(draft) = form.into_draft() else {
        println!("Error: Task title is required.");
        return Ok(());
    };

    let created = ws.tasks.add(draft)?;
    println!("Task added: {} (ID: {})", created.title, short_id(&created.id));
    println!("  Priority: {}", created.priority);
    if let Some(category) = ws.resolve_category(&created) {
        println!("  Category: {}", category.name);
    }
    if let Some(description) = &created.description {
        println!("  Description: {}", description);
    }
    Ok(())
}

fn edit_task<S: KeyValueStore + Clone>(
    ws: &mut Workspace<S>,
    id: &str,
    args: &[String],
) -> Result<()> {
    let id = ws.tasks.find_by_prefix(id)?.id.clone();
    let form = TaskForm::parse(args, &ws.categories);
    for warning in &form.warnings {
        println!("Warning: {}", warning);
    }
    let patch: TaskPatch = form.into_patch();
    if patch.is_empty() {
        println!("Nothing to change.");
        return Ok(());
    }

    let outcome = ws.tasks.update(&id, patch)?;
    if let Some(task) = ws.tasks.get(&id) {
        println!("Task updated: {} (ID: {})", task.title, short_id(&id));
    }
    report_missing(outcome, "task", &id);
    Ok(())
}

fn run_category<S: KeyValueStore + Clone>(
    ws: &mut Workspace<S>,
    command: Option<CategoryCommands>,
) -> Result<()> {
    match command.unwrap_or(CategoryCommands::List) {
        CategoryCommands::List => table::show_categories(ws),
        CategoryCommands::Add { name, color } => {
            let name = name.trim();
            if name.is_empty() {
                println!("Error: Category name is required.");
                return Ok(());
            }
            if !is_hex_color(&color) {
                println!("Error: Color must look like #RRGGBB, got '{}'.", color);
                return Ok(());
            }
            let category = ws.categories.add(name, color)?;
            println!("Category added: {} {} (ID: {})", category.name, category.color, short_id(&category.id));
        }
        CategoryCommands::Edit { id, name, color } => {
            let id = ws.categories.find(&id)?.id.clone();
            let mut patch = CategoryPatch::default();
            if let Some(name) = name.map(|n| n.trim().to_string()) {
                if name.is_empty() {
                    println!("Error: Category name cannot be empty.");
                    return Ok(());
                }
                patch = patch.name(name);
            }
            if let Some(color) = color {
                if !is_hex_color(&color) {
                    println!("Error: Color must look like #RRGGBB, got '{}'.", color);
                    return Ok(());
                }
                patch = patch.color(color);
            }
            let outcome = ws.categories.update(&id, patch)?;
            if let Some(category) = ws.categories.lookup(Some(&id)) {
                println!("Category updated: {} {}", category.name, category.color);
            }
            report_missing(outcome, "category", &id);
        }
        CategoryCommands::Rm { id } => {
            let category = ws.categories.find(&id)?.clone();
            let outcome = ws.categories.remove(&category.id)?;
            if outcome.is_applied() {
                let orphaned = ws
                    .tasks
                    .tasks()
                    .iter()
                    .filter(|t| t.category.as_deref() == Some(category.id.as_str()))
                    .count();
                println!("Category deleted: {}", category.name);
                if orphaned > 0 {
                    println!("  {} task(s) still reference it and now show no category.", orphaned);
                }
            }
            report_missing(outcome, "category", &category.id);
        }
    }
    Ok(())
}

fn run_theme<S: KeyValueStore + Clone>(ws: &mut Workspace<S>, action: ThemeAction) -> Result<()> {
    match action {
        ThemeAction::Show => {}
        ThemeAction::Toggle => {
            ws.theme.toggle()?;
        }
        ThemeAction::Light => ws.theme.set(Theme::Light)?,
        ThemeAction::Dark => ws.theme.set(Theme::Dark)?,
    }
    println!("Theme: {}", ws.theme.theme());
    Ok(())
}

fn report_missing(outcome: Outcome, kind: &str, id: &str) {
    if outcome == Outcome::NotFound {
        println!("No {} with ID {} (nothing changed).", kind, short_id(id));
    }
}
