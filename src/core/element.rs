//! # Element Dataset
//!
//! The immutable list of `ElementRecord`s the rest of the app reads from.
//! A full 118-element table ships inside the binary (`assets/elements.json`);
//! an external JSON file with the same shape can replace it at startup.
//!
//! The dataset is validated once on load (non-empty, unique atomic numbers)
//! and never mutated afterwards.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

const BUNDLED_DATASET: &str = include_str!("../../assets/elements.json");

/// Physical state at 20°C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhysicalState {
    Gas,
    Liquid,
    Solid,
}

impl PhysicalState {
    pub const ALL: [PhysicalState; 3] = [PhysicalState::Gas, PhysicalState::Liquid, PhysicalState::Solid];

    pub fn label(self) -> &'static str {
        match self {
            PhysicalState::Gas => "Gas",
            PhysicalState::Liquid => "Liquid",
            PhysicalState::Solid => "Solid",
        }
    }
}

impl fmt::Display for PhysicalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementRecord {
    pub name: String,
    pub symbol: String,
    pub atomic_number: u32,
    /// Kept as text: unstable isotopes are written in parentheses, e.g. `(98)`.
    pub atomic_mass: String,
    pub category: String,
    pub electron_configuration: String,
    /// 1..=18, or 0 for the lanthanide and actinide series.
    pub group: u8,
    pub period: u8,
    pub state: PhysicalState,
}

/// Grid cell of an element in the rendered table (1-based).
///
/// Rows 1..=7 are the main periods. Row 8 is left empty as a spacer,
/// rows 9 and 10 hold the lanthanides and actinides.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TablePosition {
    pub row: u8,
    pub column: u8,
}

pub const LANTHANIDES: std::ops::RangeInclusive<u32> = 57..=71;
pub const ACTINIDES: std::ops::RangeInclusive<u32> = 89..=103;
pub const TABLE_ROWS: u8 = 10;
pub const TABLE_COLUMNS: u8 = 18;

impl ElementRecord {
    /// Case-insensitive substring match on name or symbol. An empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&term) || self.symbol.to_lowercase().contains(&term)
    }

    pub fn table_position(&self) -> TablePosition {
        let z = self.atomic_number;
        if LANTHANIDES.contains(&z) {
            TablePosition {
                row: 9,
                column: (z - LANTHANIDES.start() + 3) as u8,
            }
        } else if ACTINIDES.contains(&z) {
            TablePosition {
                row: 10,
                column: (z - ACTINIDES.start() + 3) as u8,
            }
        } else {
            TablePosition {
                row: self.period,
                column: self.group.max(1),
            }
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum DatasetError {
    Io(std::io::Error),
    Parse(serde_json::Error),
    Empty,
    DuplicateAtomicNumber(u32),
}

impl fmt::Display for DatasetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DatasetError::Io(e) => write!(f, "dataset I/O error: {e}"),
            DatasetError::Parse(e) => write!(f, "dataset parse error: {e}"),
            DatasetError::Empty => write!(f, "dataset contains no elements"),
            DatasetError::DuplicateAtomicNumber(z) => {
                write!(f, "dataset lists atomic number {z} more than once")
            }
        }
    }
}

impl std::error::Error for DatasetError {}

// ============================================================================
// Loading
// ============================================================================

/// The 118-element table compiled into the binary.
pub fn bundled() -> Result<Vec<ElementRecord>, DatasetError> {
    from_json(BUNDLED_DATASET)
}

pub fn from_json(json: &str) -> Result<Vec<ElementRecord>, DatasetError> {
    let elements: Vec<ElementRecord> = serde_json::from_str(json).map_err(DatasetError::Parse)?;
    validate(&elements)?;
    debug!("Parsed dataset with {} elements", elements.len());
    Ok(elements)
}

pub fn load_file(path: &Path) -> Result<Vec<ElementRecord>, DatasetError> {
    let contents = fs::read_to_string(path).map_err(DatasetError::Io)?;
    let elements = from_json(&contents)?;
    info!("Loaded {} elements from {}", elements.len(), path.display());
    Ok(elements)
}

/// Loads `path` when given, otherwise the bundled table.
pub fn load(path: Option<&Path>) -> Result<Vec<ElementRecord>, DatasetError> {
    match path {
        Some(p) => load_file(p),
        None => bundled(),
    }
}

fn validate(elements: &[ElementRecord]) -> Result<(), DatasetError> {
    if elements.is_empty() {
        return Err(DatasetError::Empty);
    }
    let mut seen = HashSet::with_capacity(elements.len());
    for el in elements {
        if !seen.insert(el.atomic_number) {
            return Err(DatasetError::DuplicateAtomicNumber(el.atomic_number));
        }
    }
    Ok(())
}
