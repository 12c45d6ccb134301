//! # ElementDetail Overlay
//!
//! Centered panel over the table for the selected element.
//!
//! ```text
//! ┌ 26. Iron (Fe) ───────────────────────────── Esc Close ┐
//! │ Image                    │ Details                    │
//! │  Generated image (png)   │  Atomic Mass   55.845 u    │
//! │ Atom                     │  Category      transition… │
//! │      ( ( ( • ) ) )       │  Electron Config [Fe] 2,8… │
//! │                          │  Shell 1 (K): 2 electrons  │
//! │                          │ Fun Fact                   │
//! │                          │  Iron is ...               │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! Fact and image arrive independently; each shows a loading line until its
//! lookup finishes. Electron rings spin while the overlay is open.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols::Marker;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Points};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::shells::{AtomDiagram, format_shells, shell_breakdown};
use crate::core::state::{DetailView, Lookup};
use crate::tui::component::Component;
use crate::tui::theme::{Theme, state_color};

pub const FUN_FACT_LOADING: &str = "Loading fun fact...";
pub const IMAGE_LOADING: &str = "Generating image...";

/// One-line description of an image reference. Terminals cannot show the
/// bytes of a `data:` URI, so only its type and size are listed.
pub fn describe_image(uri: &str) -> String {
    match uri.strip_prefix("data:") {
        Some(rest) => {
            let (mime, payload) = rest.split_once(";base64,").unwrap_or((rest, ""));
            let kb = (payload.len() * 3 / 4).div_ceil(1024);
            format!("Generated image ({mime}, {kb} KB)")
        }
        None => format!("Placeholder: {uri}"),
    }
}

pub struct ElementDetail<'a> {
    pub detail: &'a DetailView,
    pub theme: Theme,
    /// Seconds since the UI started; drives the ring rotation.
    pub spin_elapsed: f64,
}

impl ElementDetail<'_> {
    fn detail_lines(&self) -> Vec<Line<'static>> {
        let element = &self.detail.element;
        let label = self.theme.muted();
        let value = Style::default().add_modifier(Modifier::BOLD);
        let row = |name: &str, v: String, style: Style| {
            Line::from(vec![Span::styled(format!("{name:<18}"), label), Span::styled(v, style)])
        };

        let mut lines = vec![
            Line::styled("Details", self.theme.accent()),
            row("Atomic Mass", format!("{} u", element.atomic_mass), value),
            row("Category", element.category.clone(), value),
            row(
                "Electron Config",
                format_shells(&element.electron_configuration, Some(&element.symbol)),
                value,
            ),
            row("Configuration", element.electron_configuration.clone(), label),
            row(
                "State at 20°C",
                element.state.to_string(),
                value.fg(state_color(element.state)),
            ),
            Line::from(""),
            Line::styled("Shell Breakdown", label),
        ];
        lines.extend(
            shell_breakdown(&element.electron_configuration)
                .into_iter()
                .map(|shell| Line::from(format!("  {shell}"))),
        );
        lines
    }

    fn fun_fact_lines(&self, width: u16) -> Vec<Line<'static>> {
        let fact = self.detail.fun_fact.ready().unwrap_or(FUN_FACT_LOADING);
        let options = textwrap::Options::new((width as usize).max(1))
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let mut lines = vec![Line::styled("Fun Fact", self.theme.accent())];
        lines.extend(
            textwrap::wrap(fact, options)
                .into_iter()
                .map(|l| Line::from(l.into_owned())),
        );
        lines
    }

    fn image_line(&self) -> Line<'static> {
        match &self.detail.image {
            Lookup::Loading => Line::styled(IMAGE_LOADING, self.theme.muted()),
            Lookup::Ready(uri) => Line::from(describe_image(uri)),
        }
    }

    fn render_atom(&self, frame: &mut Frame, area: Rect) {
        let diagram = AtomDiagram::from_config(&self.detail.element.electron_configuration);
        let bound = diagram.extent().max(10.0) + 8.0;
        let elapsed = self.spin_elapsed;
        // Terminal cells are about twice as tall as wide
        let aspect = if area.height > 0 {
            (f64::from(area.width) / (2.0 * f64::from(area.height))).max(1.0)
        } else {
            1.0
        };
        let canvas = Canvas::default()
            .block(Block::default().title(" Atom "))
            .marker(Marker::Braille)
            .x_bounds([-bound * aspect, bound * aspect])
            .y_bounds([-bound, bound])
            .paint(move |ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 6.0,
                    color: Color::Red,
                });
                for ring in &diagram.rings {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: ring.radius(),
                        color: Color::DarkGray,
                    });
                    let positions = ring.electron_positions_at(elapsed);
                    ctx.draw(&Points {
                        coords: &positions,
                        color: Color::Cyan,
                    });
                }
            });
        frame.render_widget(canvas, area);
    }
}

impl Component for ElementDetail<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = overlay_area(area);
        frame.render_widget(Clear, overlay);

        let element = &self.detail.element;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.theme.border())
            .title(format!(" {}. {} ({}) ", element.atomic_number, element.name, element.symbol))
            .title_bottom(Line::from(" Esc Close ").right_aligned())
            .style(self.theme.base());
        let inner = block.inner(overlay);
        frame.render_widget(block, overlay);

        let [left, right] =
            Layout::horizontal([Constraint::Percentage(45), Constraint::Percentage(55)]).areas(inner);

        let [image_area, atom_area] =
            Layout::vertical([Constraint::Length(2), Constraint::Min(0)]).areas(left);
        frame.render_widget(
            Paragraph::new(vec![Line::styled("Image", self.theme.accent()), self.image_line()]),
            image_area,
        );
        self.render_atom(frame, atom_area);

        let details = self.detail_lines();
        let [details_area, fact_area] = Layout::vertical([
            Constraint::Length(details.len() as u16 + 1),
            Constraint::Min(0),
        ])
        .areas(right);
        frame.render_widget(Paragraph::new(details), details_area);
        frame.render_widget(Paragraph::new(self.fun_fact_lines(fact_area.width)), fact_area);
    }
}

/// Screen area the overlay covers when drawn over `area`.
pub fn overlay_area(area: Rect) -> Rect {
    centered_rect(90, 90, area)
}

fn centered_rect(percent_x: u16, percent_y: u16, outer: Rect) -> Rect {
    let [_, center_v, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(center_v);
    center
}
