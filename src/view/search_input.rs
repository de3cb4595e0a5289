//! Search bar widget.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

use crate::state::{AppState, Focus};
use crate::view::rows::TableRow;

/// The filter input box above the table.
///
/// Shows the current input with a block cursor while focused; dimmed with a
/// key hint otherwise.
pub struct SearchBar<'a, R: TableRow> {
    app: &'a AppState<R>,
}

impl<'a, R: TableRow> SearchBar<'a, R> {
    /// Wrap the current app state for rendering.
    pub fn new(app: &'a AppState<R>) -> Self {
        Self { app }
    }
}

impl<R: TableRow> Widget for SearchBar<'_, R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let focused = self.app.focus() == Focus::SearchInput;
        let title = format!(" Search by {} ", R::FILTER_FIELD);

        let line = if focused {
            Line::from(vec![
                Span::raw(self.app.input().to_string()),
                Span::styled(
                    " ",
                    Style::default()
                        .bg(Color::White)
                        .fg(Color::Black)
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        } else if self.app.input().is_empty() {
            Line::from(Span::styled(
                "press / to search",
                Style::default().fg(Color::DarkGray),
            ))
        } else {
            Line::from(Span::raw(self.app.input().to_string()))
        };

        let border_style = if focused {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        Paragraph::new(line)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(border_style),
            )
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::HostRecord;
    use crate::query::QuerySpec;
    use crate::state::{QueryState, UiAction};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn app() -> AppState<HostRecord> {
        AppState::new(
            QueryState::new(QuerySpec::new(10).unwrap()),
            HostRecord::FILTER_FIELD,
            HostRecord::SORTABLE,
        )
    }

    fn rendered(app: &AppState<HostRecord>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(50, 3)).unwrap();
        terminal
            .draw(|frame| frame.render_widget(SearchBar::new(app), frame.area()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn unfocused_empty_bar_shows_hint() {
        let text = rendered(&app());
        assert!(text.contains("press / to search"));
        assert!(text.contains("Search by host"));
    }

    #[test]
    fn focused_bar_shows_typed_input() {
        let mut app = app();
        app.dispatch(UiAction::FocusSearch);
        app.dispatch(UiAction::InputChar('1'));
        app.dispatch(UiAction::InputChar('0'));
        let text = rendered(&app);
        assert!(text.contains("10"));
        assert!(!text.contains("press / to search"));
    }
}
