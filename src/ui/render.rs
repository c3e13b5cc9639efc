use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use super::app::{App, InputMode, Screen};
use super::commands;
use super::theme;

const NAV_KEYS: &[(&str, &str)] = &[
    ("j/k, Up/Down", "Move cursor"),
    ("g/G", "First/last row"),
    ("1/2, Tab", "Switch view"),
    ("Esc", "Clear status"),
    ("Ctrl-q", "Quit"),
];

const ENTRY_KEYS: &[(&str, &str)] = &[
    ("+/-, h/l", "Step value by 10, cycle month/year"),
    ("Enter", "Type an amount or the comment"),
    ("x", "Zero the selected amount"),
    ("S, Ctrl-s", "Save the period"),
];

const VISUALIZE_KEYS: &[(&str, &str)] = &[
    ("Enter", "Plot the selected period"),
    ("z", "Show/hide zero-value flows"),
    ("r", "Reload saved periods"),
];

pub(crate) fn render(f: &mut Frame, app: &App) {
    let [tabs, body, status, command] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(5),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(f.area());

    render_tab_bar(f, tabs, app);
    match app.screen {
        Screen::Entry => super::screens::entry::render(f, body, app),
        Screen::Visualization => super::screens::visualize::render(f, body, app),
    }
    render_status_bar(f, status, app);
    render_command_bar(f, command, app);

    if app.show_help {
        render_help_overlay(f, f.area());
    }
}

fn render_tab_bar(f: &mut Frame, area: Rect, app: &App) {
    let selected = Screen::all()
        .iter()
        .position(|s| *s == app.screen)
        .unwrap_or(0);
    let titles = Screen::all()
        .iter()
        .enumerate()
        .map(|(i, s)| format!("{}:{s}", i + 1));

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(theme::TEXT_DIM).bg(theme::HEADER_BG))
        .highlight_style(
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
        .divider(Span::styled("|", Style::default().fg(theme::OVERLAY)));
    f.render_widget(tabs, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mode_bg = match app.input_mode {
        InputMode::Normal => theme::ACCENT,
        InputMode::Command | InputMode::Editing => theme::GREEN,
        InputMode::Confirm => theme::RED,
    };
    let mode = Span::styled(
        format!(" {} ", app.input_mode),
        Style::default()
            .fg(theme::HEADER_BG)
            .bg(mode_bg)
            .add_modifier(Modifier::BOLD),
    );

    let (info, hints) = match app.screen {
        Screen::Entry => (
            format!(" {} | {} ", app.screen, app.form.period()),
            " +/- adjust | Enter edit | S save | ? help ",
        ),
        Screen::Visualization => (
            format!(
                " {} | {} periods | {} ",
                app.screen,
                app.periods.len(),
                app.zero_amounts
            ),
            " Enter plot | z zeros | r reload | ? help ",
        ),
    };

    let [left, right] = Layout::horizontal([
        Constraint::Min(0),
        Constraint::Length(hints.chars().count() as u16),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Line::from(vec![mode, Span::raw(info)])).style(theme::status_bar_style()),
        left,
    );
    f.render_widget(
        Paragraph::new(hints).style(theme::status_bar_style()),
        right,
    );
}

fn render_command_bar(f: &mut Frame, area: Rect, app: &App) {
    let (content, cursor) = match app.input_mode {
        InputMode::Command => typed_line(":".into(), theme::ACCENT, &app.command_input),
        InputMode::Editing => typed_line(
            format!("{}> ", app.form.label(app.current_field())),
            theme::GREEN,
            &app.command_input,
        ),
        InputMode::Confirm => (
            Line::from(vec![
                Span::styled(
                    app.confirm_message.as_str(),
                    Style::default().fg(theme::YELLOW),
                ),
                Span::styled(" [y/N] ", Style::default().fg(theme::RED)),
            ]),
            None,
        ),
        InputMode::Normal if app.status_message.is_empty() => (
            Line::from(Span::styled(
                " Press : for commands, ? for help",
                theme::dim_style(),
            )),
            None,
        ),
        InputMode::Normal => (
            Line::from(Span::styled(
                app.status_message.as_str(),
                theme::command_bar_style(),
            )),
            None,
        ),
    };

    f.render_widget(
        Paragraph::new(content).style(Style::default().bg(theme::COMMAND_BG)),
        area,
    );
    if let Some(offset) = cursor {
        f.set_cursor_position((area.x + offset, area.y));
    }
}

/// Prompt plus typed text, and the cursor column just past the text.
fn typed_line(prompt: String, color: Color, input: &str) -> (Line<'_>, Option<u16>) {
    let offset = (prompt.chars().count() + input.chars().count()) as u16;
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(color)),
        Span::styled(input, theme::command_bar_style()),
    ]);
    (line, Some(offset))
}

fn key_section<'a>(lines: &mut Vec<Line<'a>>, title: &'a str, keys: &[(&'a str, &'a str)]) {
    lines.push(Line::from(Span::styled(format!(" {title}"), theme::section_style())));
    for (key, action) in keys {
        lines.push(Line::from(vec![
            Span::styled(format!("  {key:<16}"), Style::default().fg(theme::ACCENT)),
            Span::styled(*action, theme::normal_style()),
        ]));
    }
    lines.push(Line::from(""));
}

fn render_help_overlay(f: &mut Frame, area: Rect) {
    let mut lines = Vec::new();
    key_section(&mut lines, "Navigation", NAV_KEYS);
    key_section(&mut lines, "Data Entry", ENTRY_KEYS);
    key_section(&mut lines, "Data Visualization", VISUALIZE_KEYS);

    lines.push(Line::from(Span::styled(" Commands", theme::section_style())));
    for (names, desc) in commands::help_entries() {
        lines.push(Line::from(vec![
            Span::styled(format!("  {names:<16}"), Style::default().fg(theme::ACCENT)),
            Span::styled(desc, theme::normal_style()),
        ]));
    }

    let height = (lines.len() as u16 + 2).min(area.height);
    let width = 72.min(area.width);
    let [popup] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    let [popup] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(popup);

    f.render_widget(Clear, popup);
    f.render_widget(
        Paragraph::new(lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::ACCENT))
                .title(Span::styled(" monthflow help ", theme::title_style()))
                .title_bottom(Span::styled(" any key closes ", theme::dim_style()))
                .style(Style::default().bg(theme::HEADER_BG)),
        ),
        popup,
    );
}
