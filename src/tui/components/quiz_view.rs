//! # QuizView Component
//!
//! Renders the current quiz session: header with score, progress gauge,
//! prompt, four numbered options, and feedback once an answer is locked.
//! After the last round it shows the final score instead.
//!
//! Option colors after an answer is locked: the correct option turns green,
//! a wrong pick turns red, the rest are dimmed.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Wrap};

use crate::core::session::{QuizSession, SessionPhase};
use crate::tui::component::Component;
use crate::tui::theme::Theme;

pub const LOADING_TEXT: &str = "Loading quiz...";
pub const RESTART_HINT: &str = "Press Enter to restart";

/// Highlighted option, moved with the arrow keys. Resets on each new question.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizCursor {
    pub index: usize,
}

impl QuizCursor {
    pub fn up(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    pub fn down(&mut self, option_count: usize) {
        if self.index + 1 < option_count {
            self.index += 1;
        }
    }
}

pub struct QuizView<'a> {
    pub session: Option<&'a QuizSession>,
    pub error: Option<&'a str>,
    pub cursor: QuizCursor,
    pub theme: Theme,
}

impl QuizView<'_> {
    fn option_style(&self, session: &QuizSession, index: usize, option: &str) -> Style {
        let Some(question) = &session.current_question else {
            return Style::default();
        };
        match session.locked_answer.as_deref() {
            Some(_) if option == question.correct_answer => {
                Style::default().fg(Color::Black).bg(Color::Green)
            }
            Some(locked) if option == locked => Style::default().fg(Color::White).bg(Color::Red),
            Some(_) => self.theme.muted().add_modifier(Modifier::DIM),
            None if index == self.cursor.index => self.theme.accent().add_modifier(Modifier::REVERSED),
            None => self.theme.base(),
        }
    }

    fn render_over(&self, frame: &mut Frame, area: Rect, session: &QuizSession) {
        let lines = vec![
            Line::styled("Quiz Complete!", self.theme.accent()),
            Line::from(""),
            Line::from("Your final score is:"),
            Line::styled(session.final_score_label(), self.theme.accent()),
            Line::from(""),
            Line::styled("Press Enter to play again", self.theme.muted()),
        ];
        let [_, middle, _] = Layout::vertical([
            Constraint::Min(0),
            Constraint::Length(lines.len() as u16),
            Constraint::Min(0),
        ])
        .areas(area);
        frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), middle);
    }

    fn render_round(&self, frame: &mut Frame, area: Rect, session: &QuizSession) {
        let Some(question) = &session.current_question else {
            let mut lines = vec![Line::from(self.error.unwrap_or(LOADING_TEXT).to_string())];
            if session.is_stalled() {
                lines.push(Line::styled(RESTART_HINT, self.theme.muted()));
            }
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
                area,
            );
            return;
        };

        let [header, gauge_area, prompt_area, options_area, feedback_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(question.options.len() as u16 * 2),
            Constraint::Min(0),
        ])
        .areas(area);

        let [title, score] =
            Layout::horizontal([Constraint::Min(0), Constraint::Length(12)]).areas(header);
        frame.render_widget(Paragraph::new(Line::styled("Quiz Mode", self.theme.accent())), title);
        frame.render_widget(
            Paragraph::new(format!("Score: {}", session.score)).alignment(Alignment::Right),
            score,
        );

        let gauge = Gauge::default()
            .gauge_style(self.theme.accent())
            .ratio(session.progress().clamp(0.0, 1.0))
            .label(session.question_label());
        frame.render_widget(gauge, gauge_area);

        let mut prompt = vec![Line::from(""), Line::from(question.prompt.clone())];
        if let Some(config) = question.display_configuration() {
            prompt.push(Line::styled(config, self.theme.accent()));
        }
        frame.render_widget(
            Paragraph::new(prompt)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            prompt_area,
        );

        let rows = Layout::vertical(vec![Constraint::Length(2); question.options.len()]).split(options_area);
        for (index, (option, row)) in question.options.iter().zip(rows.iter()).enumerate() {
            let style = self.option_style(session, index, option);
            frame.render_widget(
                Paragraph::new(format!("{}. {}", index + 1, option)).style(style),
                Rect { height: 1, ..*row },
            );
        }

        if session.is_stalled() {
            let lines = vec![
                Line::styled(self.error.unwrap_or(LOADING_TEXT).to_string(), Style::default().fg(Color::LightRed)),
                Line::styled(RESTART_HINT, self.theme.muted()),
            ];
            frame.render_widget(
                Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true }),
                feedback_area,
            );
        } else if let Some(feedback) = session.feedback() {
            let color = match session.locked_answer.as_deref() {
                Some(locked) if question.is_correct(locked) => Color::LightGreen,
                _ => Color::LightRed,
            };
            frame.render_widget(
                Paragraph::new(feedback)
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
                feedback_area,
            );
        }
    }
}

impl Component for QuizView<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .style(self.theme.base());
        let inner = block.inner(area);
        frame.render_widget(block, area);

        match self.session {
            Some(session) if session.phase() == SessionPhase::Over => {
                self.render_over(frame, inner, session)
            }
            Some(session) => self.render_round(frame, inner, session),
            None => frame.render_widget(
                Paragraph::new(self.error.unwrap_or(LOADING_TEXT)).alignment(Alignment::Center),
                inner,
            ),
        }
    }
}
