use crate::View;
use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::element_detail::overlay_area;
use crate::tui::components::periodic_table::element_at;
use crate::tui::components::{ElementDetail, PeriodicTable, QuizView, TableLayout, TitleBar};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::text::Span;
use ratatui::widgets::{Block, Borders, Paragraph};

pub const SEARCH_PLACEHOLDER: &str = "Search by name or symbol...";

struct Areas {
    title: Rect,
    search: Rect,
    grid: Rect,
    main: Rect,
}

fn areas(frame_area: Rect) -> Areas {
    use Constraint::{Length, Min};
    let [title, main] = Layout::vertical([Length(1), Min(0)]).areas(frame_area);
    let [search, grid] = Layout::vertical([Length(3), Min(0)]).areas(main);
    Areas {
        title,
        search,
        grid,
        main,
    }
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &TuiState) {
    let areas = areas(frame.area());
    frame.render_widget(Block::default().style(tui.theme.base()), frame.area());

    TitleBar::new(app.view, app.status_message.clone(), tui.theme).render(frame, areas.title);

    match app.view {
        View::Table => {
            draw_search_box(frame, areas.search, app, tui);
            PeriodicTable {
                elements: &app.elements,
                search_term: &app.search_term,
                selected: (!app.scrolling_suspended()).then_some(tui.table.selected),
                theme: tui.theme,
            }
            .render(frame, areas.grid);

            if let Some(detail) = &app.detail {
                ElementDetail {
                    detail,
                    theme: tui.theme,
                    spin_elapsed: tui.started.elapsed().as_secs_f64(),
                }
                .render(frame, areas.main);
            }
        }
        View::Quiz => {
            QuizView {
                session: app.quiz.as_ref(),
                error: app.error.as_deref(),
                cursor: tui.quiz_cursor,
                theme: tui.theme,
            }
            .render(frame, areas.main);
        }
    }
}

fn draw_search_box(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState) {
    let content = if app.search_term.is_empty() {
        Span::styled(SEARCH_PLACEHOLDER, tui.theme.muted())
    } else {
        Span::raw(app.search_term.clone())
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(tui.theme.border())
        .title(" Search ");
    frame.render_widget(Paragraph::new(content).block(block), area);
}

/// Hit test: given a screen position, find the table element drawn there.
pub fn hit_test_element(column: u16, row: u16, frame_area: Rect, app: &App) -> Option<u32> {
    let layout = TableLayout::new(areas(frame_area).grid);
    let pos = layout.hit(column, row)?;
    element_at(&app.elements, pos).map(|e| e.atomic_number)
}

/// Where the detail overlay sits for a given frame size.
pub fn detail_overlay_area(frame_area: Rect) -> Rect {
    overlay_area(areas(frame_area).main)
}
