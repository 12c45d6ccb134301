//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ## Component Architecture
//!
//! Every component is props-based: it receives the data it draws as struct
//! fields (borrowed from `App` or `TuiState`) and implements `Component`.
//! Components never read global state.
//!
//! ```rust,ignore
//! // Dependencies are explicit
//! TitleBar::new(app.view, app.status_message.clone(), tui.theme).render(frame, area);
//! ```
//!
//! Presentation-only state that outlives a frame (table cursor, highlighted
//! quiz option) lives next to its component as a small `*State`/`*Cursor`
//! type owned by `TuiState`.
//!
//! ## Module Structure
//!
//! ```text
//! components/
//! ├── mod.rs             (this file)
//! ├── title_bar.rs       (Top status bar)
//! ├── periodic_table.rs  (Grid, cursor navigation, hit testing)
//! ├── element_detail.rs  (Detail overlay with atom diagram)
//! └── quiz_view.rs       (Quiz rounds and final score)
//! ```

pub mod element_detail;
pub mod periodic_table;
pub mod quiz_view;
mod title_bar;

pub use element_detail::ElementDetail;
pub use periodic_table::{Direction, PeriodicTable, PeriodicTableState, TableLayout};
pub use quiz_view::{QuizCursor, QuizView};
pub use title_bar::TitleBar;
