//! # PeriodicTable Component
//!
//! The 18-column grid with the f-block split off below it.
//!
//! ```text
//! row  1  H                                   He
//! row  2  Li Be                 B  C  N  O  F Ne
//!  ...
//! row  6  Cs Ba 57-71 Hf ...
//! row  7  Fr Ra 89-103 Rf ...
//! row  8  (spacer)
//! row  9        La Ce Pr ...                  Lu
//! row 10        Ac Th Pa ...                  Lr
//! ```
//!
//! Tiles that do not match the search term are dimmed and cannot be selected.
//! The cursor is an atomic number; arrow keys move to the nearest tile in
//! that direction.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::Paragraph;

use crate::core::element::{ElementRecord, TABLE_COLUMNS, TABLE_ROWS, TablePosition};
use crate::tui::component::Component;
use crate::tui::theme::{Theme, category_color};

/// Series placeholders drawn in group 3 of periods 6 and 7.
pub const SERIES_PLACEHOLDERS: [(TablePosition, &str); 2] = [
    (TablePosition { row: 6, column: 3 }, "57-71"),
    (TablePosition { row: 7, column: 3 }, "89-103"),
];

const SPACER_ROW: u8 = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

// ============================================================================
// Geometry
// ============================================================================

/// Cell geometry for a grid drawn into `area`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableLayout {
    pub area: Rect,
    pub cell_width: u16,
    pub cell_height: u16,
}

impl TableLayout {
    pub fn new(area: Rect) -> Self {
        Self {
            area,
            cell_width: (area.width / u16::from(TABLE_COLUMNS)).max(3),
            cell_height: (area.height / u16::from(TABLE_ROWS)).max(1),
        }
    }

    /// Screen rect of a cell, or `None` if it falls outside the area.
    pub fn cell_rect(&self, pos: TablePosition) -> Option<Rect> {
        let x = self.area.x + u16::from(pos.column.checked_sub(1)?) * self.cell_width;
        let y = self.area.y + u16::from(pos.row.checked_sub(1)?) * self.cell_height;
        let rect = Rect::new(x, y, self.cell_width, self.cell_height);
        (rect.right() <= self.area.right() && rect.bottom() <= self.area.bottom()).then_some(rect)
    }

    pub fn hit(&self, column: u16, row: u16) -> Option<TablePosition> {
        if column < self.area.x || row < self.area.y {
            return None;
        }
        let col = (column - self.area.x) / self.cell_width + 1;
        let r = (row - self.area.y) / self.cell_height + 1;
        if col > u16::from(TABLE_COLUMNS) || r > u16::from(TABLE_ROWS) {
            return None;
        }
        Some(TablePosition {
            row: r as u8,
            column: col as u8,
        })
    }
}

pub fn element_at(elements: &[ElementRecord], pos: TablePosition) -> Option<&ElementRecord> {
    elements.iter().find(|e| e.table_position() == pos)
}

// ============================================================================
// Navigation
// ============================================================================

/// Nearest element from `from` in `direction`, skipping the spacer row.
/// Column ties on vertical moves go to the lower column.
pub fn neighbor(elements: &[ElementRecord], from: u32, direction: Direction) -> Option<u32> {
    let origin = elements.iter().find(|e| e.atomic_number == from)?.table_position();
    let column_distance = |e: &&ElementRecord| {
        let c = e.table_position().column;
        (c.abs_diff(origin.column), c)
    };

    match direction {
        Direction::Left | Direction::Right => elements
            .iter()
            .filter(|e| {
                let p = e.table_position();
                p.row == origin.row
                    && match direction {
                        Direction::Left => p.column < origin.column,
                        _ => p.column > origin.column,
                    }
            })
            .min_by_key(column_distance)
            .map(|e| e.atomic_number),
        Direction::Up | Direction::Down => {
            let rows: Vec<u8> = match direction {
                Direction::Up => (1..origin.row).rev().collect(),
                _ => (origin.row + 1..=TABLE_ROWS).collect(),
            };
            rows.into_iter()
                .filter(|r| *r != SPACER_ROW)
                .find_map(|r| {
                    elements
                        .iter()
                        .filter(|e| e.table_position().row == r)
                        .min_by_key(column_distance)
                })
                .map(|e| e.atomic_number)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodicTableState {
    pub selected: u32,
}

impl Default for PeriodicTableState {
    fn default() -> Self {
        Self { selected: 1 }
    }
}

impl PeriodicTableState {
    pub fn move_cursor(&mut self, elements: &[ElementRecord], direction: Direction) {
        if let Some(next) = neighbor(elements, self.selected, direction) {
            self.selected = next;
        }
    }
}

// ============================================================================
// Rendering
// ============================================================================

pub struct PeriodicTable<'a> {
    pub elements: &'a [ElementRecord],
    pub search_term: &'a str,
    pub selected: Option<u32>,
    pub theme: Theme,
}

impl PeriodicTable<'_> {
    fn tile_lines(element: &ElementRecord, height: u16, width: u16) -> Vec<Line<'static>> {
        let name: String = element.name.chars().take(width as usize).collect();
        match height {
            0 | 1 => vec![Line::from(element.symbol.clone())],
            2 => vec![
                Line::from(element.atomic_number.to_string()).alignment(Alignment::Left),
                Line::from(element.symbol.clone()),
            ],
            _ => vec![
                Line::from(element.atomic_number.to_string()).alignment(Alignment::Left),
                Line::from(element.symbol.clone()),
                Line::from(name),
            ],
        }
    }
}

impl Component for PeriodicTable<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let layout = TableLayout::new(area);

        for element in self.elements {
            let Some(rect) = layout.cell_rect(element.table_position()) else {
                continue;
            };
            let dimmed = !element.matches_search(self.search_term);
            let mut style = if dimmed {
                self.theme.muted().add_modifier(Modifier::DIM)
            } else {
                Style::default()
                    .fg(Color::Black)
                    .bg(category_color(&element.category))
            };
            if self.selected == Some(element.atomic_number) {
                style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
            }
            let tile = Paragraph::new(Self::tile_lines(element, rect.height, rect.width))
                .alignment(Alignment::Center)
                .style(style);
            frame.render_widget(tile, rect);
        }

        for (pos, label) in SERIES_PLACEHOLDERS {
            if let Some(rect) = layout.cell_rect(pos) {
                let style = Style::default().fg(Color::Black).bg(Color::Yellow);
                frame.render_widget(
                    Paragraph::new(label).alignment(Alignment::Center).style(style),
                    rect,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::element;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn by_symbol(elements: &[ElementRecord], symbol: &str) -> u32 {
        elements.iter().find(|e| e.symbol == symbol).unwrap().atomic_number
    }

    #[test]
    fn test_layout_cells_and_hits_agree() {
        let layout = TableLayout::new(Rect::new(2, 3, 90, 30));
        assert_eq!(layout.cell_width, 5);
        assert_eq!(layout.cell_height, 3);
        let pos = TablePosition { row: 4, column: 7 };
        let rect = layout.cell_rect(pos).unwrap();
        assert_eq!(layout.hit(rect.x, rect.y), Some(pos));
        assert_eq!(layout.hit(rect.x + rect.width - 1, rect.y + rect.height - 1), Some(pos));
        assert_eq!(layout.hit(0, 0), None);
        assert_eq!(layout.hit(2 + 90, 3), None);
    }

    #[test]
    fn test_tiny_area_clips_cells() {
        let layout = TableLayout::new(Rect::new(0, 0, 20, 5));
        assert_eq!(layout.cell_width, 3);
        assert!(layout.cell_rect(TablePosition { row: 1, column: 18 }).is_none());
        assert!(layout.cell_rect(TablePosition { row: 1, column: 1 }).is_some());
    }

    #[test]
    fn test_horizontal_navigation_skips_gaps() {
        let elements = element::bundled().unwrap();
        let h = by_symbol(&elements, "H");
        assert_eq!(neighbor(&elements, h, Direction::Right), Some(by_symbol(&elements, "He")));
        assert_eq!(neighbor(&elements, h, Direction::Left), None);
        let be = by_symbol(&elements, "Be");
        assert_eq!(neighbor(&elements, be, Direction::Right), Some(by_symbol(&elements, "B")));
    }

    #[test]
    fn test_vertical_navigation() {
        let elements = element::bundled().unwrap();
        let he = by_symbol(&elements, "He");
        assert_eq!(neighbor(&elements, he, Direction::Down), Some(by_symbol(&elements, "Ne")));
        assert_eq!(neighbor(&elements, he, Direction::Up), None);

        // Period 7 drops over the spacer row into the lanthanides
        let ra = by_symbol(&elements, "Ra");
        let below = neighbor(&elements, ra, Direction::Down).unwrap();
        assert_eq!(elements.iter().find(|e| e.atomic_number == below).unwrap().table_position().row, 9);

        let la = by_symbol(&elements, "La");
        let ac = by_symbol(&elements, "Ac");
        assert_eq!(neighbor(&elements, la, Direction::Down), Some(ac));
        assert_eq!(neighbor(&elements, ac, Direction::Down), None);
    }

    #[test]
    fn test_state_ignores_dead_ends() {
        let elements = element::bundled().unwrap();
        let mut state = PeriodicTableState::default();
        state.move_cursor(&elements, Direction::Up);
        assert_eq!(state.selected, 1);
        state.move_cursor(&elements, Direction::Down);
        assert_eq!(state.selected, by_symbol(&elements, "Li"));
    }

    #[test]
    fn test_render_shows_symbols_and_placeholders() {
        let elements = element::bundled().unwrap();
        let backend = TestBackend::new(108, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                PeriodicTable {
                    elements: &elements,
                    search_term: "",
                    selected: Some(1),
                    theme: Theme::Dark,
                }
                .render(f, f.area());
            })
            .unwrap();
        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("Og"));
        assert!(text.contains("57-71"));
        assert!(text.contains("89-103"));
    }
}
