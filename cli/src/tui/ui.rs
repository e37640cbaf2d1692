use minimalist_todo_core::{Filter, KeyValueStore, Task, TaskCounts};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table, Tabs, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use crate::tui::app::{App, InputMode};
use crate::tui::palette::Palette;

pub fn draw<S: KeyValueStore + Clone>(f: &mut Frame, app: &mut App<'_, S>) {
    let size = f.area();
    let palette = Palette::for_dark_mode(app.dark_mode.is_dark());

    f.render_widget(
        Block::default().style(Style::default().bg(palette.background).fg(palette.text)),
        size,
    );

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(3), // Stats
            Constraint::Length(3), // Filter tabs
            Constraint::Min(1),    // Content
            Constraint::Length(3), // Input / status
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    draw_header(f, palette, app.dark_mode.is_dark(), main_chunks[0]);
    draw_stats(f, palette, &app.ws.tasks.counts(), main_chunks[1]);
    draw_filter_tabs(f, palette, app.ws.tasks.filter(), main_chunks[2]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(main_chunks[3]);

    draw_task_list(f, app, palette, content_chunks[0]);
    draw_detail_view(f, app, palette, content_chunks[1]);
    draw_input(f, app, palette, main_chunks[4]);

    let help = match app.input_mode {
        InputMode::Normal => {
            "j/k: Navigate | Space: Toggle | a: Add | m: Modify | d: Delete | c: Category | f/1-3: Filter | t: Theme | q: Quit"
        }
        _ => "Enter: Save | Esc: Cancel | pri:high cat:Work desc:text",
    };
    let footer = Paragraph::new(help)
        .style(Style::default().fg(palette.muted))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[5]);
}

fn rounded(title: &str, palette: &Palette) -> Block<'static> {
    Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(palette.muted))
}

fn draw_header(f: &mut Frame, palette: &Palette, dark: bool, area: Rect) {
    let indicator = if dark { "☾ dark" } else { "☀ light" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "MINIMALIST TODO",
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", indicator), Style::default().fg(palette.muted)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(palette.muted)),
    );
    f.render_widget(header, area);
}

fn draw_stats(f: &mut Frame, palette: &Palette, counts: &TaskCounts, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let cards = [
        ("Total", counts.total, palette.primary),
        ("Completed", counts.completed, palette.done),
        ("Active", counts.active, palette.active),
    ];
    for (i, (label, value, color)) in cards.into_iter().enumerate() {
        let card = Paragraph::new(Span::styled(
            value.to_string(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center)
        .block(rounded(label, palette));
        f.render_widget(card, chunks[i]);
    }

    let percent = counts.completion_percent();
    let gauge = Gauge::default()
        .block(rounded("Progress", palette))
        .gauge_style(Style::default().fg(palette.done).bg(palette.highlight))
        .label(format!("{}%", percent))
        .percent(u16::from(percent));
    f.render_widget(gauge, chunks[3]);
}

fn draw_filter_tabs(f: &mut Frame, palette: &Palette, current: Filter, area: Rect) {
    let titles: Vec<Line> = Filter::ALL
        .iter()
        .enumerate()
        .map(|(i, filter)| Line::from(format!("{} {}", i + 1, filter)))
        .collect();
    let selected = Filter::ALL.iter().position(|f| *f == current).unwrap_or(0);

    let tabs = Tabs::new(titles)
        .block(rounded("Filter", palette))
        .style(Style::default().fg(palette.muted))
        .highlight_style(
            Style::default().fg(palette.primary).add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .select(selected);
    f.render_widget(tabs, area);
}

fn draw_task_list<S: KeyValueStore + Clone>(
    f: &mut Frame,
    app: &mut App<'_, S>,
    palette: &Palette,
    area: Rect,
) {
    let filter = app.ws.tasks.filter();
    let visible = app.ws.tasks.visible_tasks();

    if visible.is_empty() {
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                filter.empty_message(),
                Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(filter.empty_hint(), Style::default().fg(palette.muted))),
        ])
        .alignment(Alignment::Center)
        .block(rounded("Tasks", palette));
        f.render_widget(empty, area);
        return;
    }

    let rows: Vec<Row> = visible
        .iter()
        .map(|task| {
            let (status_icon, status_color) = if task.completed {
                ("✔", palette.done)
            } else {
                ("☐", palette.muted)
            };

            let category = app.ws.resolve_category(task);
            let category_span = match category {
                Some(c) => Span::styled(format!("● {}", c.name), Style::default().fg(palette.category(c))),
                None => Span::raw(""),
            };

            let mut title_style = Style::default().fg(palette.text);
            if task.completed {
                title_style = title_style.fg(palette.muted).add_modifier(Modifier::CROSSED_OUT);
            }

            Row::new(vec![
                Line::from(Span::styled(status_icon, Style::default().fg(status_color))),
                Line::from(Span::styled(
                    task.priority.as_str(),
                    Style::default().fg(palette.priority(task.priority)),
                )),
                Line::from(category_span),
                Line::from(Span::styled(task.title.clone(), title_style)),
            ])
        })
        .collect();

    let title = format!("Tasks ({} of {})", visible.len(), app.ws.tasks.counts().total);
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),  // Status
            Constraint::Length(7),  // Priority
            Constraint::Length(14), // Category
            Constraint::Min(10),    // Title
        ],
    )
    .header(
        Row::new(vec!["St", "Pri", "Category", "Task"])
            .style(Style::default().fg(palette.primary).add_modifier(Modifier::BOLD)),
    )
    .block(rounded(&title, palette))
    .row_highlight_style(Style::default().bg(palette.highlight).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_detail_view<S: KeyValueStore + Clone>(
    f: &mut Frame,
    app: &App<'_, S>,
    palette: &Palette,
    area: Rect,
) {
    let Some(task) = app.selected_task() else {
        f.render_widget(rounded("Detail", palette), area);
        return;
    };

    let label = Style::default().fg(palette.primary);
    let mut detail_text = vec![
        Line::from(vec![
            Span::styled("Title: ", label),
            Span::styled(task.title.as_str(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled("ID: ", Style::default().fg(palette.muted)),
            Span::raw(task.id.as_str()),
        ]),
        Line::from(vec![
            Span::styled("Status: ", label),
            Span::raw(if task.completed { "completed" } else { "active" }),
        ]),
        Line::from(vec![
            Span::styled("Priority: ", label),
            Span::styled(task.priority.as_str(), Style::default().fg(palette.priority(task.priority))),
        ]),
        category_line(app, task, palette),
        Line::from(vec![
            Span::styled("Created: ", label),
            Span::raw(
                task.created_at
                    .with_timezone(&chrono::Local)
                    .format("%Y-%m-%d %H:%M")
                    .to_string(),
            ),
        ]),
        Line::from(""),
    ];

    if let Some(desc) = &task.description {
        detail_text.push(Line::from(Span::styled("Description:", label)));
        detail_text.push(Line::from(desc.as_str()));
    }

    let detail_block = Paragraph::new(detail_text)
        .block(rounded("Detail", palette))
        .wrap(Wrap { trim: true });
    f.render_widget(detail_block, area);
}

fn category_line<'t, S: KeyValueStore + Clone>(
    app: &'t App<'_, S>,
    task: &Task,
    palette: &Palette,
) -> Line<'t> {
    let value = match app.ws.resolve_category(task) {
        Some(c) => Span::styled(c.name.as_str(), Style::default().fg(palette.category(c))),
        None => Span::styled("None", Style::default().fg(palette.muted)),
    };
    Line::from(vec![Span::styled("Category: ", Style::default().fg(palette.primary)), value])
}

fn draw_input<S: KeyValueStore + Clone>(
    f: &mut Frame,
    app: &App<'_, S>,
    palette: &Palette,
    area: Rect,
) {
    let prompt = match app.input_mode {
        InputMode::Normal => {
            let status = app.status.as_deref().unwrap_or("");
            let para = Paragraph::new(Span::styled(status, Style::default().fg(palette.active)))
                .block(rounded("Status", palette));
            f.render_widget(para, area);
            return;
        }
        InputMode::Adding => "New task",
        InputMode::Modifying => "Modify task",
        InputMode::AddingCategory => "New category (Name #RRGGBB)",
    };

    let para = Paragraph::new(app.input.as_str())
        .style(Style::default().fg(palette.text))
        .block(
            rounded(prompt, palette).border_style(Style::default().fg(palette.primary)),
        );
    f.render_widget(para, area);

    let before: String = app.input.chars().take(app.cursor_position).collect();
    let x = area.x + 1 + before.width() as u16;
    f.set_cursor_position((x.min(area.right().saturating_sub(2)), area.y + 1));
}
