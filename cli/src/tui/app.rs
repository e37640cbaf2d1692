use anyhow::Result;
use minimalist_todo_core::{
    is_hex_color, split_line, DarkModeFlag, Filter, KeyValueStore, Outcome, Task, Workspace,
    PRESET_COLORS,
};
use ratatui::widgets::TableState;

use crate::form::TaskForm;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputMode {
    Normal,
    Adding,
    Modifying,
    AddingCategory,
}

pub struct App<'a, S: KeyValueStore + Clone> {
    pub ws: &'a mut Workspace<S>,
    pub dark_mode: DarkModeFlag,
    pub state: TableState,
    pub input: String,
    pub input_mode: InputMode,
    pub cursor_position: usize,
    pub status: Option<String>,
}

impl<'a, S: KeyValueStore + Clone> App<'a, S> {
    pub fn new(ws: &'a mut Workspace<S>) -> Self {
        let dark_mode = ws.dark_mode();
        let mut state = TableState::default();
        if !ws.tasks.visible_tasks().is_empty() {
            state.select(Some(0));
        }
        App {
            ws,
            dark_mode,
            state,
            input: String::new(),
            input_mode: InputMode::Normal,
            cursor_position: 0,
            status: None,
        }
    }

    pub fn visible_len(&self) -> usize {
        self.ws.tasks.visible_tasks().len()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let i = self.state.selected()?;
        self.ws.tasks.visible_tasks().get(i).copied()
    }

    fn selected_id(&self) -> Option<String> {
        self.selected_task().map(|t| t.id.clone())
    }

    pub fn next(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i >= len - 1 {
                    0
                } else {
                    i + 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        let len = self.visible_len();
        if len == 0 {
            return;
        }

        let i = match self.state.selected() {
            Some(i) => {
                if i == 0 {
                    len - 1
                } else {
                    i - 1
                }
            }
            None => 0,
        };
        self.state.select(Some(i));
    }

    pub fn toggle_status(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.ws.tasks.toggle(&id);
            self.finish(result, "Task not found");
            self.clamp_selection();
        }
    }

    pub fn delete_task(&mut self) {
        if let Some(id) = self.selected_id() {
            let result = self.ws.tasks.remove(&id);
            self.finish(result, "Task not found");
            self.clamp_selection();
        }
    }

    pub fn set_filter(&mut self, filter: Filter) {
        self.ws.tasks.set_filter(filter);
        self.state.select(if self.visible_len() == 0 { None } else { Some(0) });
    }

    pub fn cycle_filter(&mut self) {
        let next = self.ws.tasks.filter().next();
        self.set_filter(next);
    }

    pub fn toggle_theme(&mut self) {
        if let Err(err) = self.ws.theme.toggle() {
            self.report_error(err);
        }
    }

    /// Keeps the selection inside the visible list after it shrinks.
    fn clamp_selection(&mut self) {
        let len = self.visible_len();
        match self.state.selected() {
            _ if len == 0 => self.state.select(None),
            Some(i) if i >= len => self.state.select(Some(len - 1)),
            None => self.state.select(Some(0)),
            _ => {}
        }
    }

    fn finish(&mut self, result: Result<Outcome>, not_found: &str) {
        match result {
            Ok(Outcome::Applied) => self.status = None,
            Ok(Outcome::NotFound) => self.status = Some(not_found.to_string()),
            Err(err) => self.report_error(err),
        }
    }

    fn report_error(&mut self, err: anyhow::Error) {
        tracing::error!("{:#}", err);
        self.status = Some(format!("Error: {:#}", err));
    }

    pub fn enter_add_mode(&mut self) {
        self.enter_input(InputMode::Adding);
    }

    /// Opens the input prefilled with the selected task's current values.
    pub fn enter_modify_mode(&mut self) {
        let Some(current) = self.selected_task().map(|task| self.describe(task)) else {
            return;
        };
        self.enter_input(InputMode::Modifying);
        self.cursor_position = current.chars().count();
        self.input = current;
    }

    fn describe(&self, task: &Task) -> String {
        let mut line = format!("{} pri:{}", task.title, task.priority);
        if let Some(category) = self.ws.resolve_category(task) {
            line.push_str(&format!(" cat:{}", category.name));
        }
        if let Some(description) = &task.description {
            line.push_str(&format!(" desc:{}", description));
        }
        line
    }

    pub fn enter_category_mode(&mut self) {
        self.enter_input(InputMode::AddingCategory);
    }

    fn enter_input(&mut self, mode: InputMode) {
        self.input_mode = mode;
        self.input.clear();
        self.cursor_position = 0;
        self.status = None;
    }

    pub fn exit_input_mode(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn input_char(&mut self, c: char) {
        let byte_index = self
            .input
            .chars()
            .take(self.cursor_position)
            .map(|c| c.len_utf8())
            .sum();
        self.input.insert(byte_index, c);
        self.cursor_position += 1;
    }

    pub fn delete_char(&mut self) {
        if self.cursor_position > 0 {
            let byte_index: usize = self
                .input
                .chars()
                .take(self.cursor_position - 1)
                .map(|c| c.len_utf8())
                .sum();
            self.input.remove(byte_index);
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_left(&mut self) {
        if self.cursor_position > 0 {
            self.cursor_position -= 1;
        }
    }

    pub fn move_cursor_right(&mut self) {
        if self.cursor_position < self.input.chars().count() {
            self.cursor_position += 1;
        }
    }

    pub fn submit_command(&mut self) {
        if self.input.trim().is_empty() {
            self.exit_input_mode();
            return;
        }

        match self.input_mode {
            InputMode::Adding => self.submit_add(),
            InputMode::Modifying => self.submit_modify(),
            InputMode::AddingCategory => self.submit_category(),
            InputMode::Normal => {}
        }

        self.input.clear();
        self.cursor_position = 0;
        self.exit_input_mode();
    }

    fn input_words(&self) -> Vec<String> {
        split_line(&self.input)
    }

    fn submit_add(&mut self) {
        let form = TaskForm::parse(&self.input_words(), &self.ws.categories);
        let warnings = form.warnings.join("; ");
        let Some(draft) = form.into_draft() else {
            self.status = Some("Task title is required".to_string());
            return;
        };

        match self.ws.tasks.add(draft) {
            Ok(_) => {
                self.status = (!warnings.is_empty()).then_some(warnings);
                // New tasks are prepended, so they show at the top of any
                // filter that includes them.
                self.state.select(if self.visible_len() == 0 { None } else { Some(0) });
            }
            Err(err) => self.report_error(err),
        }
    }

    fn submit_modify(&mut self) {
        let Some(id) = self.selected_id() else {
            return;
        };
        let form = TaskForm::parse(&self.input_words(), &self.ws.categories);
        let warnings = form.warnings.join("; ");
        let result = self.ws.tasks.update(&id, form.into_patch());
        self.finish(result, "Task not found");
        if self.status.is_none() && !warnings.is_empty() {
            self.status = Some(warnings);
        }
    }

    /// `Name words [#RRGGBB]`; without a color the next preset is used.
    fn submit_category(&mut self) {
        let mut words: Vec<String> = self.input.split_whitespace().map(|s| s.to_string()).collect();
        let color = match words.last() {
            Some(last) if is_hex_color(last) => words.pop().unwrap_or_default(),
            _ => {
                let count = self.ws.categories.categories().len();
                PRESET_COLORS[count % PRESET_COLORS.len()].to_string()
            }
        };
        let name = words.join(" ");
        if name.is_empty() {
            self.status = Some("Category name is required".to_string());
            return;
        }
        match self.ws.categories.add(name, color) {
            Ok(category) => self.status = Some(format!("Category added: {}", category.name)),
            Err(err) => self.report_error(err),
        }
    }
}
