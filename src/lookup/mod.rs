//! # Lookups
//!
//! Fun facts and element images come from a generative backend behind the
//! `LookupProvider` trait. Callers go through `service`, which never fails:
//! every error is absorbed into a fixed fallback string.

pub mod provider;
pub mod providers;
pub mod service;

pub use provider::{LookupError, LookupProvider};
pub use providers::{GeminiProvider, UnconfiguredProvider};
pub use service::{get_element_image, get_fun_fact};
