//! Results table widget: header, body, and pagination footer.
//!
//! The widget is a pure function of controller state: it receives rows,
//! total, loading flag, and page facts, and computes the rest through
//! [`crate::view_state`]. It never mutates anything; intents flow back
//! through the key handler.

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, Widget},
};

use crate::query::SortDirection;
use crate::state::AppState;
use crate::view::rows::TableRow;
use crate::view_state::{PageInfo, TableContent};

/// The scan-results table for resource `R`.
pub struct ResultsTable<'a, R: TableRow> {
    app: &'a AppState<R>,
}

impl<'a, R: TableRow> ResultsTable<'a, R> {
    /// Wrap the current app state for rendering.
    pub fn new(app: &'a AppState<R>) -> Self {
        Self { app }
    }

    fn page_info(&self) -> PageInfo {
        PageInfo {
            page: self.app.query.display_page(),
            page_size: self.app.query.spec().per_page(),
            total: self.app.query.total(),
        }
    }

    /// Header row with a direction marker on the sorted column.
    fn header(&self) -> Row<'static> {
        let sort = self.app.current_sort();
        let cells = R::COLUMNS.iter().map(|column| {
            let marker = match (column.field, sort) {
                (Some(field), Some((sorted, direction))) if field == sorted => {
                    match direction {
                        SortDirection::Asc => " ▲",
                        SortDirection::Desc => " ▼",
                    }
                }
                _ => "",
            };
            Cell::from(format!("{}{}", column.title, marker)).style(
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )
        });
        Row::new(cells)
    }

    fn body(&self) -> Vec<Row<'static>> {
        let content = TableContent::select(self.app.query.loading(), self.app.query.rows().len());
        match content {
            TableContent::Loading => vec![placeholder_row("Loading...", R::COLUMNS.len())],
            TableContent::Empty => vec![placeholder_row("No data found", R::COLUMNS.len())],
            TableContent::Rows => self
                .app
                .query
                .rows()
                .iter()
                .map(|record| Row::new(record.cells()))
                .collect(),
        }
    }

    fn footer(&self, info: PageInfo) -> Line<'static> {
        let mut spans = Vec::new();

        match info.shown_range() {
            Some((from, to)) => spans.push(Span::styled(
                format!("Showing {from} to {to} of {} entries  ", info.total),
                Style::default().fg(Color::DarkGray),
            )),
            None => spans.push(Span::styled(
                "No entries  ".to_string(),
                Style::default().fg(Color::DarkGray),
            )),
        }

        spans.push(Span::styled(
            if info.has_previous() { "‹ " } else { "  " }.to_string(),
            Style::default().fg(Color::White),
        ));

        let window = info.window();
        for page in &window.pages {
            let style = if *page == info.page {
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::White)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            spans.push(Span::styled(format!(" {page} "), style));
        }
        if window.ellipsis {
            spans.push(Span::styled(
                " … ".to_string(),
                Style::default().fg(Color::DarkGray),
            ));
        }

        spans.push(Span::styled(
            if info.has_next() { " ›" } else { "  " }.to_string(),
            Style::default().fg(Color::White),
        ));

        Line::from(spans)
    }
}

fn placeholder_row(label: &str, columns: usize) -> Row<'static> {
    // One centered-ish message cell, the rest blank.
    let mut cells = vec![Cell::from(label.to_string()).style(Style::default().fg(Color::DarkGray))];
    cells.resize(columns, Cell::from(""));
    Row::new(cells)
}

impl<R: TableRow> Widget for ResultsTable<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(format!(" Last scanned {} ", R::NAME))
            .borders(Borders::ALL);
        let inner = block.inner(area);
        block.render(area, buf);

        let [table_area, footer_area] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let column_count = R::COLUMNS.len() as u32;
        let widths = vec![Constraint::Ratio(1, column_count); R::COLUMNS.len()];
        let table = Table::new(self.body(), widths)
            .header(self.header())
            .column_spacing(2);
        table.render(table_area, buf);

        let info = self.page_info();
        Paragraph::new(self.footer(info)).render(footer_area, buf);
    }
}
