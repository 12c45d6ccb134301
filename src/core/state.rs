//! # Application State
//!
//! Core business state for Element Explorer. This module contains domain
//! logic only, no TUI-specific types. Presentation state (table cursor,
//! theme, highlighted quiz option) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── elements: Arc<[ElementRecord]>        // immutable dataset
//! ├── lookups: Arc<dyn LookupProvider>      // fact/image backend
//! ├── view: View                            // table or quiz
//! ├── search_term: String                   // table filter
//! ├── detail: Option<DetailView>            // open overlay + lookup results
//! ├── quiz: Option<QuizSession>             // alive only in the quiz view
//! ├── scroll_lock: ScrollLock               // held while an overlay is open
//! ├── status_message: String                // status bar text
//! └── error: Option<String>                 // last surfaced error
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::View;
use crate::core::config::ResolvedConfig;
use crate::core::element::ElementRecord;
use crate::core::scroll_lock::{ScrollGuard, ScrollLock};
use crate::core::session::QuizSession;
use crate::lookup::LookupProvider;

pub const WELCOME_MESSAGE: &str = "Welcome to Element Explorer!";

/// Progress of one asynchronous lookup shown in the detail overlay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Loading,
    Ready(String),
}

impl Lookup {
    pub fn ready(&self) -> Option<&str> {
        match self {
            Lookup::Loading => None,
            Lookup::Ready(value) => Some(value),
        }
    }
}

/// The element detail overlay. Holds the scroll guard for as long as it is open.
#[derive(Debug)]
pub struct DetailView {
    pub element: ElementRecord,
    pub fun_fact: Lookup,
    pub image: Lookup,
    _scroll: ScrollGuard,
}

impl DetailView {
    pub fn open(element: ElementRecord, lock: &ScrollLock) -> Self {
        Self {
            element,
            fun_fact: Lookup::Loading,
            image: Lookup::Loading,
            _scroll: lock.acquire(),
        }
    }

    pub fn atomic_number(&self) -> u32 {
        self.element.atomic_number
    }
}

pub struct App {
    pub elements: Arc<[ElementRecord]>,
    pub lookups: Arc<dyn LookupProvider>,
    pub view: View,
    pub search_term: String,
    pub detail: Option<DetailView>,
    pub quiz: Option<QuizSession>,
    pub scroll_lock: ScrollLock,
    pub status_message: String,
    pub error: Option<String>,
}

impl App {
    pub fn new(elements: Arc<[ElementRecord]>, lookups: Arc<dyn LookupProvider>) -> Self {
        Self {
            elements,
            lookups,
            view: View::Table,
            search_term: String::new(),
            detail: None,
            quiz: None,
            scroll_lock: ScrollLock::new(),
            status_message: String::from(WELCOME_MESSAGE),
            error: None,
        }
    }

    /// Resolved settings are applied by the adapter through actions
    /// (`ShowView(config.start_view)`), so this only records provenance.
    pub fn from_config(
        elements: Arc<[ElementRecord]>,
        lookups: Arc<dyn LookupProvider>,
        config: &ResolvedConfig,
    ) -> Self {
        let mut app = Self::new(elements, lookups);
        if config.offline {
            app.status_message = format!("{WELCOME_MESSAGE} (offline)");
        }
        app
    }

    pub fn element(&self, atomic_number: u32) -> Option<&ElementRecord> {
        self.elements.iter().find(|e| e.atomic_number == atomic_number)
    }

    /// True when no search is active or the element matches it.
    pub fn is_highlighted(&self, element: &ElementRecord) -> bool {
        self.search_term.is_empty() || element.matches_search(&self.search_term)
    }

    pub fn match_count(&self) -> usize {
        self.elements.iter().filter(|e| self.is_highlighted(e)).count()
    }

    pub fn scrolling_suspended(&self) -> bool {
        self.scroll_lock.is_locked()
    }
}
