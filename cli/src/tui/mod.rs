pub mod app;
pub mod palette;
pub mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use minimalist_todo_core::{Filter, KeyValueStore, Workspace};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};

use crate::tui::app::{App, InputMode};

pub fn run<S: KeyValueStore + Clone>(ws: &mut Workspace<S>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(ws);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    loop_outcome(res)
}

/// Reported after the terminal is restored so the message stays visible.
fn loop_outcome(res: io::Result<()>) -> Result<()> {
    if let Err(err) = &res {
        tracing::error!("TUI loop failed: {}", err);
    }
    res.map_err(Into::into)
}

fn run_app<B: Backend, S: KeyValueStore + Clone>(
    terminal: &mut Terminal<B>,
    app: &mut App<'_, S>,
) -> io::Result<()> {
    loop {
        terminal
            .draw(|f| ui::draw(f, app))
            .map_err(|e| io::Error::other(e.to_string()))?;

        if !event::poll(Duration::from_millis(250))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next(),
                KeyCode::Up | KeyCode::Char('k') => app.previous(),
                KeyCode::Char(' ') | KeyCode::Enter => app.toggle_status(),
                KeyCode::Char('d') | KeyCode::Delete => app.delete_task(),
                KeyCode::Char('a') => app.enter_add_mode(),
                KeyCode::Char('m') => app.enter_modify_mode(),
                KeyCode::Char('c') => app.enter_category_mode(),
                KeyCode::Char('f') | KeyCode::Tab => app.cycle_filter(),
                KeyCode::Char('1') => app.set_filter(Filter::All),
                KeyCode::Char('2') => app.set_filter(Filter::Active),
                KeyCode::Char('3') => app.set_filter(Filter::Completed),
                KeyCode::Char('t') => app.toggle_theme(),
                _ => {}
            },
            InputMode::Adding | InputMode::Modifying | InputMode::AddingCategory => {
                match key.code {
                    KeyCode::Enter => app.submit_command(),
                    KeyCode::Esc => app.exit_input_mode(),
                    KeyCode::Char(c) => app.input_char(c),
                    KeyCode::Backspace => app.delete_char(),
                    KeyCode::Left => app.move_cursor_left(),
                    KeyCode::Right => app.move_cursor_right(),
                    _ => {}
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_failure_is_returned() {
        assert!(loop_outcome(Ok(())).is_ok());

        let err = loop_outcome(Err(io::Error::other("terminal went away"))).unwrap_err();
        assert_eq!(err.to_string(), "terminal went away");
    }
}
