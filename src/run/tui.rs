use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Database;
use crate::ui::app::{App, InputMode, PendingAction, Screen};
use crate::ui::commands;
use crate::ui::form::{EntryForm, Field};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(db: &mut Database, currency: &str) -> Result<()> {
    let mut app = App::new(currency.to_string());
    app.refresh_periods(db);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("tui started");
    let result = run_app(&mut terminal, &mut app, db);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &mut Database,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(5) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, db)?,
                InputMode::Command => handle_command_input(key, app, db)?,
                InputMode::Editing => handle_editing_input(key, app),
                InputMode::Confirm => handle_confirm_input(key, app, db),
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('c') if ctrl => {
            app.running = false;
        }
        KeyCode::Char('s') if ctrl => save_form(app, db),
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Char('1') => switch_screen(app, db, Screen::Entry),
        KeyCode::Char('2') => switch_screen(app, db, Screen::Visualization),
        KeyCode::Tab | KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = if key.code == KeyCode::Tab {
                (idx + 1) % screens.len()
            } else {
                (idx + screens.len() - 1) % screens.len()
            };
            switch_screen(app, db, screens[next]);
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Enter => handle_enter(app, db),
        KeyCode::Esc => app.status_message.clear(),
        _ => match app.screen {
            Screen::Entry => handle_entry_key(key.code, app, db),
            Screen::Visualization => handle_visualization_key(key.code, app, db),
        },
    }
    Ok(())
}

fn handle_entry_key(code: KeyCode, app: &mut App, db: &mut Database) {
    let field = app.current_field();
    match code {
        KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Char('l') | KeyCode::Right => {
            app.form.adjust(field, 1);
        }
        KeyCode::Char('-') | KeyCode::Char('h') | KeyCode::Left => {
            app.form.adjust(field, -1);
        }
        KeyCode::Char('x') if field.is_amount() => {
            if app.form.commit_input(field, "0").is_ok() {
                app.set_status(format!("{} = 0", app.form.label(field)));
            }
        }
        KeyCode::Char('S') => save_form(app, db),
        _ => {}
    }
}

fn handle_visualization_key(code: KeyCode, app: &mut App, db: &mut Database) {
    match code {
        KeyCode::Char('z') => app.toggle_zero_amounts(),
        KeyCode::Char('r') => {
            app.refresh_periods(db);
            let n = app.periods.len();
            app.set_status(format!("{n} saved period{}", if n == 1 { "" } else { "s" }));
        }
        _ => {}
    }
}

fn handle_command_input(key: event::KeyEvent, app: &mut App, db: &mut Database) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, db)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

fn handle_editing_input(key: event::KeyEvent, app: &mut App) {
    let field = app.current_field();
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            match app.form.commit_input(field, &input) {
                Ok(()) => {
                    let label = app.form.label(field);
                    app.set_status(format!("{label} = {}", app.form.value_text(field)));
                }
                Err(msg) => app.set_status(msg),
            }
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Esc => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
            app.set_status("Edit cancelled");
        }
        KeyCode::Backspace => {
            app.command_input.pop();
        }
        KeyCode::Char(c) if field.is_amount() && !c.is_ascii_digit() => {}
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
}

fn handle_confirm_input(key: event::KeyEvent, app: &mut App, db: &mut Database) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            if let Some(PendingAction::OverwritePeriod { key }) = app.pending_action.take() {
                tracing::debug!(key = %key, "overwrite confirmed");
                app.save_entry(db);
            }
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.pending_action = None;
            app.input_mode = InputMode::Normal;
            app.confirm_message.clear();
            app.set_status("Cancelled");
        }
        _ => {}
    }
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, db: &mut Database, screen: Screen) {
    app.screen = screen;
    if screen == Screen::Visualization {
        app.refresh_periods(db);
    }
}

fn save_form(app: &mut App, db: &mut Database) {
    app.screen = Screen::Entry;
    app.request_save(db);
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Entry => {
            if app.field_index + 1 < EntryForm::fields().len() {
                app.field_index += 1;
            }
        }
        Screen::Visualization => scroll_down(
            &mut app.period_index,
            &mut app.period_scroll,
            app.periods.len(),
            app.visible_rows,
        ),
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Entry => app.field_index = app.field_index.saturating_sub(1),
        Screen::Visualization => scroll_up(&mut app.period_index, &mut app.period_scroll),
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Entry => app.field_index = 0,
        Screen::Visualization => scroll_to_top(&mut app.period_index, &mut app.period_scroll),
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Entry => app.field_index = EntryForm::fields().len() - 1,
        Screen::Visualization => scroll_to_bottom(
            &mut app.period_index,
            &mut app.period_scroll,
            app.periods.len(),
            app.visible_rows,
        ),
    }
}

fn handle_enter(app: &mut App, db: &mut Database) {
    match app.screen {
        Screen::Entry => {
            let field = app.current_field();
            if field.is_typed() {
                app.command_input = match field {
                    Field::Comment => app.form.comment.clone(),
                    _ => String::new(),
                };
                app.input_mode = InputMode::Editing;
            } else {
                app.form.adjust(field, 1);
            }
        }
        Screen::Visualization => app.plot_selected(db),
    }
}
