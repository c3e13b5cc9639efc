use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::flow::{FlowDiagram, FlowLink, PeriodView};
use crate::ui::app::{App, Plot};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_total, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(24), Constraint::Min(30)])
        .split(area);

    render_period_list(f, chunks[0], app);

    match &app.plot {
        Plot::Shown(view) => render_view(f, chunks[1], app, view),
        Plot::Missing(key) => render_placeholder(f, chunks[1], &format!("No data for {key}")),
        Plot::Nothing if app.periods.is_empty() => render_placeholder(
            f,
            chunks[1],
            "No saved periods yet. Save one from Data Entry (1)",
        ),
        Plot::Nothing => render_placeholder(f, chunks[1], "Select a period and press Enter to plot"),
    }
}

fn panel(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {title} "), theme::title_style()))
}

fn render_period_list(f: &mut Frame, area: Rect, app: &App) {
    let plotted = app.shown_view().map(|v| v.record.key.as_str());
    let items: Vec<ListItem> = app
        .periods
        .iter()
        .enumerate()
        .skip(app.period_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, key)| {
            let marker = if Some(key.as_str()) == plotted { "●" } else { " " };
            let text = format!("{marker} {}", truncate(key, 19));
            let style = if i == app.period_index {
                theme::selected_style()
            } else {
                theme::normal_style()
            };
            ListItem::new(Line::from(Span::styled(text, style)))
        })
        .collect();

    f.render_widget(List::new(items).block(panel("Select Period")), area);
}

fn render_placeholder(f: &mut Frame, area: Rect, msg: &str) {
    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(msg.to_string(), theme::dim_style())),
    ])
    .centered()
    .block(panel("Data Visualization"));
    f.render_widget(para, area);
}

fn render_view(f: &mut Frame, area: Rect, app: &App, view: &PeriodView) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Metrics
            Constraint::Min(8),    // Flow diagram
            Constraint::Length(3), // Comment
        ])
        .split(area);

    render_metrics(f, chunks[0], app, view);
    render_flow(f, chunks[1], app, view);

    let comment = Paragraph::new(Line::from(vec![
        Span::styled("Comment: ", theme::dim_style()),
        Span::styled(view.record.comment.clone(), theme::normal_style()),
    ]))
    .wrap(Wrap { trim: true })
    .block(panel(&view.record.key));
    f.render_widget(comment, chunks[2]);
}

fn render_metrics(f: &mut Frame, area: Rect, app: &App, view: &PeriodView) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(area);

    let totals = view.totals;
    render_card(
        f,
        cards[0],
        "Total Income",
        format_total(totals.income, &app.currency),
        theme::GREEN,
    );
    render_card(
        f,
        cards[1],
        "Total Expense",
        format_total(totals.expense, &app.currency),
        theme::RED,
    );
    render_card(
        f,
        cards[2],
        "Remaining Budget",
        format_amount(totals.remaining, &app.currency),
        if totals.remaining >= 0 {
            theme::GREEN
        } else {
            theme::RED
        },
    );
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));
    f.render_widget(text, area);
}

/// Sources on the left, the total node in the middle, uses on the right.
fn render_flow(f: &mut Frame, area: Rect, app: &App, view: &PeriodView) {
    let diagram = &view.diagram;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(20),
            Constraint::Percentage(40),
        ])
        .split(area);

    let inflows: Vec<&FlowLink> = diagram.inflows().collect();
    let outflows: Vec<&FlowLink> = diagram.outflows().collect();

    render_link_bars(
        f,
        columns[0],
        "Income",
        flow_bars(diagram, &inflows, |l| l.source, theme::GREEN, &app.currency),
    );
    render_hub(f, columns[1], app, view, inflows.len(), outflows.len());
    render_link_bars(
        f,
        columns[2],
        "Expenses",
        flow_bars(diagram, &outflows, |l| l.target, theme::RED, &app.currency),
    );
}

fn flow_bars<'a>(
    diagram: &'a FlowDiagram,
    links: &[&FlowLink],
    endpoint: fn(&FlowLink) -> usize,
    color: Color,
    currency: &str,
) -> Vec<Bar<'a>> {
    links
        .iter()
        .map(|link| {
            Bar::default()
                .value(link.value)
                .label(Line::from(truncate(diagram.label(endpoint(link)), 14)))
                .text_value(format_total(link.value, currency))
                .style(Style::default().fg(color))
                .value_style(
                    Style::default()
                        .fg(theme::HEADER_BG)
                        .bg(color)
                        .add_modifier(Modifier::BOLD),
                )
        })
        .collect()
}

fn render_link_bars(f: &mut Frame, area: Rect, title: &str, bars: Vec<Bar>) {
    if bars.is_empty() {
        let para = Paragraph::new(Line::from(Span::styled("No flows", theme::dim_style())))
            .centered()
            .block(panel(title));
        f.render_widget(para, area);
        return;
    }

    let chart = BarChart::default()
        .block(panel(title))
        .direction(Direction::Horizontal)
        .data(BarGroup::default().bars(&bars))
        .bar_width(1)
        .bar_gap(1);
    f.render_widget(chart, area);
}

fn render_hub(
    f: &mut Frame,
    area: Rect,
    app: &App,
    view: &PeriodView,
    sources: usize,
    uses: usize,
) {
    let node_style = Style::default()
        .fg(theme::NODE)
        .add_modifier(Modifier::BOLD);
    let label = view.diagram.label(view.diagram.hub).to_string();
    let para = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("━━▶ {sources} in"), theme::income_style())),
        Line::from(""),
        Line::from(Span::styled(label, node_style)),
        Line::from(Span::styled(
            format_total(view.totals.income, &app.currency),
            node_style,
        )),
        Line::from(""),
        Line::from(Span::styled(format!("{uses} out ━━▶"), theme::expense_style())),
    ])
    .centered()
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::NODE)),
    );
    f.render_widget(para, area);
}
