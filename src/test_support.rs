//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::core::element::{ElementRecord, PhysicalState};
use crate::core::session::QuizSession;
use crate::core::state::App;
use crate::lookup::{LookupError, LookupProvider};

/// Builds a record with placeholder table metadata.
pub fn element_fixture(
    atomic_number: u32,
    name: &str,
    symbol: &str,
    configuration: &str,
    state: PhysicalState,
) -> ElementRecord {
    ElementRecord {
        name: name.to_string(),
        symbol: symbol.to_string(),
        atomic_number,
        atomic_mass: format!("{}.000", atomic_number * 2),
        category: "test".to_string(),
        electron_configuration: configuration.to_string(),
        group: 1,
        period: 1,
        state,
    }
}

/// Twelve elements covering every physical state (5 gases, 2 liquids, 5 solids).
pub fn sample_elements() -> Vec<ElementRecord> {
    use PhysicalState::*;
    vec![
        element_fixture(1, "Hydrogen", "H", "1s1", Gas),
        element_fixture(2, "Helium", "He", "1s2", Gas),
        element_fixture(3, "Lithium", "Li", "[He] 2s1", Solid),
        element_fixture(6, "Carbon", "C", "[He] 2s2 2p2", Solid),
        element_fixture(7, "Nitrogen", "N", "[He] 2s2 2p3", Gas),
        element_fixture(8, "Oxygen", "O", "[He] 2s2 2p4", Gas),
        element_fixture(10, "Neon", "Ne", "[He] 2s2 2p6", Gas),
        element_fixture(11, "Sodium", "Na", "[Ne] 3s1", Solid),
        element_fixture(26, "Iron", "Fe", "[Ar] 3d6 4s2", Solid),
        element_fixture(35, "Bromine", "Br", "[Ar] 3d10 4s2 4p5", Liquid),
        element_fixture(79, "Gold", "Au", "[Xe] 4f14 5d10 6s1", Solid),
        element_fixture(80, "Mercury", "Hg", "[Xe] 4f14 5d10 6s2", Liquid),
    ]
}

pub fn sample_elements_arc() -> Arc<[ElementRecord]> {
    sample_elements().into()
}

/// A session over `sample_elements()` with a seeded rng. Not started.
pub fn seeded_session(seed: u64) -> QuizSession {
    QuizSession::with_rng(sample_elements_arc(), StdRng::seed_from_u64(seed))
}

/// A provider returning canned results without any I/O.
pub struct FixedProvider {
    fact: Result<String, LookupError>,
    image: Result<String, LookupError>,
}

impl FixedProvider {
    pub fn ok(fact: &str, image: &str) -> Self {
        Self {
            fact: Ok(fact.to_string()),
            image: Ok(image.to_string()),
        }
    }

    pub fn failing(error: LookupError) -> Self {
        Self {
            fact: Err(error.clone()),
            image: Err(error),
        }
    }
}

#[async_trait]
impl LookupProvider for FixedProvider {
    fn name(&self) -> &str {
        "fixed"
    }

    async fn fun_fact(&self, _element: &ElementRecord) -> Result<String, LookupError> {
        self.fact.clone()
    }

    async fn element_image(&self, _element: &ElementRecord) -> Result<String, LookupError> {
        self.image.clone()
    }
}

/// Creates a test App over `sample_elements()` with a fixed provider.
pub fn test_app() -> App {
    App::new(
        sample_elements_arc(),
        Arc::new(FixedProvider::ok("A fun fact.", "https://example.com/image.png")),
    )
}
