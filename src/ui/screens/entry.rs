use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::flow::Totals;
use crate::models::EntryKind;
use crate::ui::app::App;
use crate::ui::form::{EntryForm, Field};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_total, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_form(f, chunks[0], app);
    render_preview(f, chunks[1], app);
}

fn section_for(field: Field) -> Option<String> {
    match field {
        Field::Month => Some("Period".into()),
        Field::Amount(EntryKind::Income, 0) => Some("Income".into()),
        Field::Amount(EntryKind::Expense, 0) => Some("Expenses".into()),
        Field::Comment => Some("Comment".into()),
        _ => None,
    }
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.form;
    let selected = app.current_field();
    let label_width = 18;
    let value_width = (area.width as usize).saturating_sub(label_width + 8).max(4);

    let mut lines: Vec<Line> = Vec::new();
    let mut selected_line = 0;
    for field in EntryForm::fields() {
        if let Some(section) = section_for(field) {
            let title = match field {
                Field::Amount(..) => format!(" {section} ({})", app.currency),
                Field::Month => {
                    let years = form.years();
                    format!(" {section} ({}-{})", years[0], years[2])
                }
                _ => format!(" {section}"),
            };
            lines.push(Line::from(Span::styled(title, theme::section_style())));
        }

        let value = match field {
            Field::Amount(..) => {
                format_total(form.amount(field).unwrap_or(0), "")
            }
            Field::Comment if form.comment.is_empty() => "Enter a comment here ...".into(),
            _ => form.value_text(field),
        };
        let value = truncate(&value, value_width);

        let is_selected = field == selected;
        if is_selected {
            selected_line = lines.len();
        }
        let marker = match field {
            Field::Month | Field::Year => "◂ ▸",
            _ => "",
        };
        let text = format!(
            "   {:<label_width$} {value} {marker}",
            truncate(&form.label(field), label_width)
        );

        let style = if is_selected {
            theme::selected_style()
        } else if field == Field::Comment && form.comment.is_empty() {
            theme::dim_style()
        } else {
            match field {
                Field::Amount(EntryKind::Income, _) => theme::income_style(),
                Field::Amount(EntryKind::Expense, _) => theme::expense_style(),
                _ => theme::normal_style(),
            }
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    // Keep the selected row on screen
    let inner_height = area.height.saturating_sub(2) as usize;
    let offset = (selected_line + 1).saturating_sub(inner_height);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Data Entry in {} ", app.currency),
            theme::title_style(),
        ));
    let para = Paragraph::new(lines)
        .block(block)
        .scroll((offset as u16, 0));
    f.render_widget(para, area);
}

fn render_preview(f: &mut Frame, area: Rect, app: &App) {
    let record = app.form.to_record();
    let totals = Totals::of(&record);
    let remaining_style = if totals.remaining < 0 {
        theme::expense_style()
    } else {
        theme::income_style()
    };

    let mut lines = vec![
        Line::from(vec![
            Span::styled(" Period:           ", theme::dim_style()),
            Span::styled(
                record.key.clone(),
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::styled(" Total Income:     ", theme::dim_style()),
            Span::styled(format_total(totals.income, &app.currency), theme::income_style()),
        ]),
        Line::from(vec![
            Span::styled(" Total Expense:    ", theme::dim_style()),
            Span::styled(format_total(totals.expense, &app.currency), theme::expense_style()),
        ]),
        Line::from(vec![
            Span::styled(" Remaining Budget: ", theme::dim_style()),
            Span::styled(format_amount(totals.remaining, &app.currency), remaining_style),
        ]),
    ];

    if let Some(saved) = &app.last_saved {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!(" Last saved: {}", saved.key),
            theme::section_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!(" incomes: {}", saved.incomes),
            theme::normal_style(),
        )));
        lines.push(Line::from(Span::styled(
            format!(" expenses: {}", saved.expenses),
            theme::normal_style(),
        )));
        lines.push(Line::from(Span::styled(" Data saved", theme::income_style())));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(" Preview ", theme::title_style()));
    let para = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });
    f.render_widget(para, area);
}
