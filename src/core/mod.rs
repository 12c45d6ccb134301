//! # Core Application Logic
//!
//! This module contains Element Explorer's business logic.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • element (dataset)    │
//!                    │  • shells (parser)      │
//!                    │  • quiz / session       │
//!                    │  • State + Action       │
//!                    │  • update() (reducer)   │
//!                    └───────────┬─────────────┘
//!                                │ Effect
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │ ── spawn lookups ──────► │   lookup   │
//!     │  Adapter   │ ◄── Action::*Ready ───── │  (Gemini)  │
//!     │ (ratatui)  │                          └────────────┘
//!     └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`element`]: `ElementRecord`, the bundled dataset and its loader
//! - [`shells`]: electron configuration parsing, formatting, atom geometry
//! - [`quiz`]: question generation with pool-based distractors
//! - [`session`]: the round-by-round quiz state machine
//! - [`state`]: The `App` struct, all application state in one place
//! - [`action`]: The `Action` enum and the `update()` reducer
//! - [`config`]: layered configuration
//! - [`timer`], [`scroll_lock`]: scoped resources the adapter holds

pub mod action;
pub mod config;
pub mod element;
pub mod quiz;
pub mod scroll_lock;
pub mod session;
pub mod shells;
pub mod state;
pub mod timer;
