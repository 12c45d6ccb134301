//! # Quiz Question Generator
//!
//! Builds one multiple-choice question from the element list.
//!
//! Distractors are drawn from an explicit pool: collect every eligible value,
//! drop duplicates and the correct answer, shuffle, take three. A pool that
//! is too small is reported as `GenerationError` instead of looping.

use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::fmt;

use crate::core::element::{ElementRecord, PhysicalState};
use crate::core::shells::format_shells;

pub const OPTION_COUNT: usize = 4;

/// Redraws allowed by `generate_question_with_retry` before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKind {
    Symbol,
    AtomicNumber,
    Name,
    State,
    ElectronConfiguration,
}

impl QuestionKind {
    pub const ALL: [QuestionKind; 5] = [
        QuestionKind::Symbol,
        QuestionKind::AtomicNumber,
        QuestionKind::Name,
        QuestionKind::State,
        QuestionKind::ElectronConfiguration,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuizQuestion {
    /// The element the question is about. For `State` questions this is the
    /// element holding the correct answer.
    pub source_element: ElementRecord,
    pub prompt: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub kind: QuestionKind,
    /// Raw configuration text shown under `ElectronConfiguration` prompts.
    pub aux_configuration: Option<String>,
    pub target_state: Option<PhysicalState>,
}

impl QuizQuestion {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.correct_answer
    }

    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }

    /// Shell counts of the displayed configuration, e.g. `"2,8,18,8"`.
    pub fn display_configuration(&self) -> Option<String> {
        self.aux_configuration
            .as_deref()
            .map(|config| format_shells(config, None))
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum GenerationError {
    EmptyDataset,
    /// No element in the dataset is in the drawn target state.
    NoElementsInState(PhysicalState),
    /// Fewer distinct distractor values than needed.
    PoolExhausted {
        kind: QuestionKind,
        needed: usize,
        available: usize,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::EmptyDataset => write!(f, "cannot build a question from an empty dataset"),
            GenerationError::NoElementsInState(state) => {
                write!(f, "no element in the dataset is a {state}")
            }
            GenerationError::PoolExhausted {
                kind,
                needed,
                available,
            } => write!(
                f,
                "{kind:?} question needs {needed} distractors but only {available} distinct values exist"
            ),
        }
    }
}

impl std::error::Error for GenerationError {}

// ============================================================================
// Generation
// ============================================================================

pub fn generate_question<R: Rng + ?Sized>(
    elements: &[ElementRecord],
    rng: &mut R,
) -> Result<QuizQuestion, GenerationError> {
    let kind = *QuestionKind::ALL.choose(rng).ok_or(GenerationError::EmptyDataset)?;
    let subject = elements.choose(rng).ok_or(GenerationError::EmptyDataset)?;
    build_question(kind, subject, elements, rng)
}

/// `generate_question`, redrawn up to `MAX_GENERATION_ATTEMPTS` times.
/// Only an empty dataset fails fast.
pub fn generate_question_with_retry<R: Rng + ?Sized>(
    elements: &[ElementRecord],
    rng: &mut R,
) -> Result<QuizQuestion, GenerationError> {
    let mut last_err = GenerationError::EmptyDataset;
    for attempt in 1..=MAX_GENERATION_ATTEMPTS {
        match generate_question(elements, rng) {
            Ok(question) => return Ok(question),
            Err(GenerationError::EmptyDataset) => return Err(GenerationError::EmptyDataset),
            Err(e) => {
                debug!("Question generation attempt {attempt} failed: {e}");
                last_err = e;
            }
        }
    }
    Err(last_err)
}

/// Builds a question of a fixed kind. `subject` is ignored for `State`,
/// which picks its own element from the drawn target state.
pub fn build_question<R: Rng + ?Sized>(
    kind: QuestionKind,
    subject: &ElementRecord,
    elements: &[ElementRecord],
    rng: &mut R,
) -> Result<QuizQuestion, GenerationError> {
    let mut aux_configuration = None;
    let mut target_state = None;
    let mut source_element = subject;

    let (prompt, correct_answer, pool): (String, String, Vec<String>) = match kind {
        QuestionKind::Symbol => (
            format!("What is the symbol for {}?", subject.name),
            subject.symbol.clone(),
            elements.iter().map(|e| e.symbol.clone()).collect(),
        ),
        QuestionKind::AtomicNumber => (
            format!("What is the atomic number of {}?", subject.name),
            subject.atomic_number.to_string(),
            elements.iter().map(|e| e.atomic_number.to_string()).collect(),
        ),
        QuestionKind::Name => (
            format!("Which element has the symbol {}?", subject.symbol),
            subject.name.clone(),
            elements.iter().map(|e| e.name.clone()).collect(),
        ),
        QuestionKind::State => {
            let state = *PhysicalState::ALL.choose(rng).ok_or(GenerationError::EmptyDataset)?;
            let in_state: Vec<&ElementRecord> =
                elements.iter().filter(|e| e.state == state).collect();
            let correct = *in_state
                .choose(rng)
                .ok_or(GenerationError::NoElementsInState(state))?;
            source_element = correct;
            target_state = Some(state);
            (
                format!("Which of these elements is a {state} at 20°C?"),
                correct.name.clone(),
                elements
                    .iter()
                    .filter(|e| e.state != state)
                    .map(|e| e.name.clone())
                    .collect(),
            )
        }
        QuestionKind::ElectronConfiguration => {
            aux_configuration = Some(subject.electron_configuration.clone());
            (
                "Which element has this electron configuration?".to_string(),
                subject.name.clone(),
                elements.iter().map(|e| e.name.clone()).collect(),
            )
        }
    };

    let mut options = pick_distractors(kind, pool, &correct_answer, rng)?;
    options.push(correct_answer.clone());
    options.shuffle(rng);

    Ok(QuizQuestion {
        source_element: source_element.clone(),
        prompt,
        options,
        correct_answer,
        kind,
        aux_configuration,
        target_state,
    })
}

fn pick_distractors<R: Rng + ?Sized>(
    kind: QuestionKind,
    pool: Vec<String>,
    correct_answer: &str,
    rng: &mut R,
) -> Result<Vec<String>, GenerationError> {
    let needed = OPTION_COUNT - 1;
    let mut seen = HashSet::new();
    let mut eligible: Vec<String> = pool
        .into_iter()
        .filter(|v| v != correct_answer && seen.insert(v.clone()))
        .collect();

    if eligible.len() < needed {
        return Err(GenerationError::PoolExhausted {
            kind,
            needed,
            available: eligible.len(),
        });
    }

    eligible.shuffle(rng);
    eligible.truncate(needed);
    Ok(eligible)
}
