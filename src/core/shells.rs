//! # Electron Shells
//!
//! Turns a textual electron configuration (`"[Ar] 3d10 4s2 4p6"`) into
//! per-shell electron counts, and derives everything the detail view shows
//! from those counts: the compact `"[Kr] 2,8,18,8"` string, the shell
//! breakdown list, and the ring geometry for the atom diagram.
//!
//! ```text
//! "[Ar] 4s2 3d10 4p6"
//!    │
//!    ├─ core  [Ar]  → [2, 8, 8]
//!    ├─ 4s2         → [2, 8, 8, 2]
//!    ├─ 3d10        → [2, 8, 18, 2]
//!    └─ 4p6         → [2, 8, 18, 8]
//! ```
//!
//! Parsing is lenient: tokens that are not orbital terms are skipped and an
//! unknown bracketed core counts as no core. Configuration strings in the
//! wild carry annotations and odd spacing, and the table must still render.

use std::f64::consts::TAU;
use std::fmt;

/// Electron count per principal shell, index 0 = K.
pub type ShellCounts = Vec<u32>;

const NOBLE_GAS_CORES: [(&str, &[u32]); 6] = [
    ("He", &[2]),
    ("Ne", &[2, 8]),
    ("Ar", &[2, 8, 8]),
    ("Kr", &[2, 8, 18, 8]),
    ("Xe", &[2, 8, 18, 18, 8]),
    ("Rn", &[2, 8, 18, 32, 18, 8]),
];

pub const SHELL_LETTERS: [&str; 7] = ["K", "L", "M", "N", "O", "P", "Q"];

/// Highest shell number accepted; larger numbers make the token malformed.
pub const MAX_SHELL_NUMBER: u32 = 10;

/// Known shell occupancy of a noble-gas core symbol.
pub fn noble_gas_core(symbol: &str) -> Option<&'static [u32]> {
    NOBLE_GAS_CORES
        .iter()
        .find(|(sym, _)| *sym == symbol)
        .map(|(_, shells)| *shells)
}

pub fn parse_shells(config: &str) -> ShellCounts {
    let (core, rest) = split_core(config);
    let mut shells: ShellCounts = core.and_then(noble_gas_core).map(<[u32]>::to_vec).unwrap_or_default();

    for token in rest.split_whitespace() {
        let Some((shell, electrons)) = parse_orbital(token) else {
            continue;
        };
        let idx = shell as usize - 1;
        let current = shells.get(idx).copied().unwrap_or(0);
        let Some(total) = current.checked_add(electrons) else {
            continue;
        };
        if shells.len() <= idx {
            shells.resize(idx + 1, 0);
        }
        shells[idx] = total;
    }

    while shells.last() == Some(&0) {
        shells.pop();
    }
    shells
}

/// Splits off the first `[...]` token. Returns the bracket contents (if any)
/// and the text with that token and the whitespace after it removed.
fn split_core(config: &str) -> (Option<&str>, String) {
    let Some(open) = config.find('[') else {
        return (None, config.to_string());
    };
    let Some(close_rel) = config[open + 1..].find(']') else {
        return (None, config.to_string());
    };
    let close = open + 1 + close_rel;
    let core = &config[open + 1..close];
    let after = config[close + 1..].trim_start();
    (Some(core), format!("{}{}", &config[..open], after))
}

/// Finds the leftmost `<digits><s|p|d|f><digits>` run inside `token`.
/// Returns `(shell, electrons)`, or `None` when the token holds no such run,
/// the shell number is 0 or above `MAX_SHELL_NUMBER`, or a number does not
/// fit in `u32`.
fn parse_orbital(token: &str) -> Option<(u32, u32)> {
    let bytes = token.as_bytes();
    for start in 0..bytes.len() {
        let shell_end = digit_run_end(bytes, start);
        if shell_end == start {
            continue;
        }
        if !matches!(bytes.get(shell_end), Some(b's' | b'p' | b'd' | b'f')) {
            continue;
        }
        let count_start = shell_end + 1;
        let count_end = digit_run_end(bytes, count_start);
        if count_end == count_start {
            continue;
        }
        let shell: u32 = token[start..shell_end].parse().ok()?;
        let electrons: u32 = token[count_start..count_end].parse().ok()?;
        if shell == 0 || shell > MAX_SHELL_NUMBER {
            return None;
        }
        return Some((shell, electrons));
    }
    None
}

fn digit_run_end(bytes: &[u8], start: usize) -> usize {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    end
}

/// `"2,8,18,8"`, or `"[Kr] 2,8,18,8"` when a symbol is given.
pub fn format_shells(config: &str, symbol: Option<&str>) -> String {
    let joined = parse_shells(config)
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(",");
    match symbol {
        Some(sym) => format!("[{sym}] {joined}"),
        None => joined,
    }
}

// ============================================================================
// Shell Breakdown
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellLine {
    /// 1-based shell number.
    pub number: usize,
    pub letter: &'static str,
    pub electrons: u32,
}

impl fmt::Display for ShellLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = if self.electrons == 1 { "" } else { "s" };
        write!(
            f,
            "Shell {} ({}): {} electron{}",
            self.number, self.letter, self.electrons, plural
        )
    }
}

pub fn shell_breakdown(config: &str) -> Vec<ShellLine> {
    parse_shells(config)
        .into_iter()
        .enumerate()
        .map(|(i, electrons)| ShellLine {
            number: i + 1,
            letter: SHELL_LETTERS.get(i).copied().unwrap_or("?"),
            electrons,
        })
        .collect()
}

// ============================================================================
// Atom Diagram
// ============================================================================

/// Rings draw at most this many electrons; fuller shells are shown as a full ring.
pub const MAX_DRAWN_ELECTRONS: u32 = 18;
const INNER_RING_DIAMETER: f64 = 60.0;
const RING_SPACING: f64 = 35.0;
const INNER_SPIN_SECS: f64 = 5.0;
const SPIN_STEP_SECS: f64 = 2.5;

#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    pub shell_index: usize,
    pub electrons: u32,
    pub diameter: f64,
    /// Angles in radians of the drawn electrons, evenly spaced from 0.
    pub electron_angles: Vec<f64>,
    /// Seconds per full revolution.
    pub spin_period: f64,
    /// Even rings turn clockwise, odd rings counter-clockwise.
    pub clockwise: bool,
}

impl Ring {
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    /// Electron centers relative to the nucleus, y pointing up.
    pub fn electron_positions(&self) -> Vec<(f64, f64)> {
        self.electron_positions_at(0.0)
    }

    /// Electron centers after the ring has spun for `elapsed` seconds.
    pub fn electron_positions_at(&self, elapsed: f64) -> Vec<(f64, f64)> {
        let r = self.radius();
        let turn = (elapsed / self.spin_period).fract() * TAU;
        let offset = if self.clockwise { -turn } else { turn };
        self.electron_angles
            .iter()
            .map(|a| (r * (a + offset).cos(), r * (a + offset).sin()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AtomDiagram {
    pub rings: Vec<Ring>,
}

impl AtomDiagram {
    pub fn from_config(config: &str) -> Self {
        let rings = parse_shells(config)
            .into_iter()
            .enumerate()
            .map(|(i, electrons)| {
                let drawn = electrons.min(MAX_DRAWN_ELECTRONS);
                let electron_angles = (0..drawn)
                    .map(|k| k as f64 / drawn as f64 * TAU)
                    .collect();
                Ring {
                    shell_index: i,
                    electrons,
                    diameter: INNER_RING_DIAMETER + i as f64 * RING_SPACING,
                    electron_angles,
                    spin_period: INNER_SPIN_SECS + i as f64 * SPIN_STEP_SECS,
                    clockwise: i % 2 == 0,
                }
            })
            .collect();
        Self { rings }
    }

    /// Radius of the outermost ring, 0 for an empty diagram.
    pub fn extent(&self) -> f64 {
        self.rings.last().map(Ring::radius).unwrap_or(0.0)
    }
}
