//! # TitleBar Component
//!
//! Top status bar showing the active view, theme, and status messages.
//!
//! TitleBar is purely presentational: it receives all data as props and has
//! no internal state.
//!
//! ```text
//! Element Explorer [Table] | 2 matching "ne"            Tab: quiz  Ctrl+T: light
//! ```
//!
//! The key hints are right-aligned and dropped first on narrow terminals.

use crate::View;
use crate::tui::component::Component;
use crate::tui::theme::Theme;
use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct TitleBar {
    pub view: View,
    pub status_message: String,
    pub theme: Theme,
}

impl TitleBar {
    pub fn new(view: View, status_message: String, theme: Theme) -> Self {
        Self {
            view,
            status_message,
            theme,
        }
    }

    fn title_text(&self) -> String {
        let view = match self.view {
            View::Table => "Table",
            View::Quiz => "Quiz",
        };
        if self.status_message.is_empty() {
            format!("Element Explorer [{view}]")
        } else {
            format!("Element Explorer [{view}] | {}", self.status_message)
        }
    }

    fn hint_text(&self) -> String {
        let other = match self.view {
            View::Table => "quiz",
            View::Quiz => "table",
        };
        format!("Tab: {other}  Ctrl+T: {}", self.theme.toggle().label())
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title = self.title_text();
        let hint = self.hint_text();
        let style = self.theme.base();

        let title_width = title.chars().count() as u16;
        let hint_width = hint.chars().count() as u16;
        if title_width + hint_width + 2 > area.width {
            frame.render_widget(Paragraph::new(Span::styled(title, self.theme.accent())).style(style), area);
            return;
        }

        let [left, right] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(hint_width)]).areas(area);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(title, self.theme.accent()))).style(style),
            left,
        );
        frame.render_widget(Paragraph::new(Span::styled(hint, self.theme.muted())).style(style), right);
    }
}
