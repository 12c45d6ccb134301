//! # Quiz Session
//!
//! Sequences a fixed number of rounds: question shown, one answer locked,
//! feedback window, next question. Ends in `Over` until restarted.
//!
//! ```text
//!            start()                submit_answer()
//!   ──────────────► InProgress ─────────────────► AwaitingFeedback
//!                      ▲                                │
//!                      │   advance(), rounds < total    │
//!                      └────────────────────────────────┤
//!                                                       │ advance(), rounds == total
//!         restart()                                     ▼
//!   InProgress ◄──────────────────────────────────────  Over
//! ```
//!
//! `advance()` is driven by a timer that fires `FEEDBACK_DELAY` after the
//! answer. Every `start()`/`restart()` draws a fresh epoch from a process-wide
//! counter; the timer carries the epoch it was scheduled under and the
//! reducer drops fires whose epoch no longer matches.

use log::{debug, info, warn};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::core::element::ElementRecord;
use crate::core::quiz::{GenerationError, QuizQuestion, generate_question_with_retry};

pub const TOTAL_ROUNDS: u32 = 10;
pub const FEEDBACK_DELAY: Duration = Duration::from_millis(1500);

static NEXT_EPOCH: AtomicU64 = AtomicU64::new(1);

fn next_epoch() -> u64 {
    NEXT_EPOCH.fetch_add(1, Ordering::Relaxed)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    InProgress,
    AwaitingFeedback,
    Over,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Correct,
    Incorrect,
    /// Already locked, wrong phase, or not one of the options.
    Ignored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    NextQuestion,
    Finished,
    Ignored,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionError {
    Generation(GenerationError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::Generation(e) => write!(f, "could not generate question: {e}"),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<GenerationError> for SessionError {
    fn from(err: GenerationError) -> Self {
        SessionError::Generation(err)
    }
}

pub struct QuizSession {
    elements: Arc<[ElementRecord]>,
    rng: StdRng,
    pub score: u32,
    pub rounds_completed: u32,
    pub total_rounds: u32,
    pub current_question: Option<QuizQuestion>,
    pub locked_answer: Option<String>,
    pub is_over: bool,
    epoch: u64,
    /// Set when the last question generation failed.
    stalled: bool,
}

impl QuizSession {
    pub fn new(elements: Arc<[ElementRecord]>) -> Self {
        Self::with_rng(elements, StdRng::from_entropy())
    }

    pub fn with_rng(elements: Arc<[ElementRecord]>, rng: StdRng) -> Self {
        Self {
            elements,
            rng,
            score: 0,
            rounds_completed: 0,
            total_rounds: TOTAL_ROUNDS,
            current_question: None,
            locked_answer: None,
            is_over: false,
            epoch: next_epoch(),
            stalled: false,
        }
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// True when the last question could not be generated. A stalled
    /// session can always be restarted.
    pub fn is_stalled(&self) -> bool {
        self.stalled
    }

    pub fn phase(&self) -> SessionPhase {
        if self.is_over {
            SessionPhase::Over
        } else if self.locked_answer.is_some() {
            SessionPhase::AwaitingFeedback
        } else {
            SessionPhase::InProgress
        }
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        self.score = 0;
        self.rounds_completed = 0;
        self.is_over = false;
        self.locked_answer = None;
        self.current_question = None;
        self.epoch = next_epoch();
        info!("Quiz started ({} rounds, epoch {})", self.total_rounds, self.epoch);
        self.current_question = Some(self.next_question()?);
        Ok(())
    }

    pub fn submit_answer(&mut self, choice: &str) -> SubmitOutcome {
        if self.phase() != SessionPhase::InProgress {
            debug!("Answer {choice:?} ignored in phase {:?}", self.phase());
            return SubmitOutcome::Ignored;
        }
        let Some(question) = &self.current_question else {
            return SubmitOutcome::Ignored;
        };
        if !question.has_option(choice) {
            debug!("Answer {choice:?} is not one of the options");
            return SubmitOutcome::Ignored;
        }

        let correct = question.is_correct(choice);
        self.locked_answer = Some(choice.to_string());
        if correct {
            self.score += 1;
            SubmitOutcome::Correct
        } else {
            SubmitOutcome::Incorrect
        }
    }

    pub fn advance(&mut self) -> Result<AdvanceOutcome, SessionError> {
        if self.phase() != SessionPhase::AwaitingFeedback {
            debug!("advance() ignored in phase {:?}", self.phase());
            return Ok(AdvanceOutcome::Ignored);
        }
        let completed = self.rounds_completed + 1;
        if completed >= self.total_rounds {
            self.rounds_completed = completed;
            self.is_over = true;
            info!("Quiz over: {}/{}", self.score, self.total_rounds);
            return Ok(AdvanceOutcome::Finished);
        }
        // Nothing is committed until the next question exists
        let question = self.next_question()?;
        self.rounds_completed = completed;
        self.locked_answer = None;
        self.current_question = Some(question);
        Ok(AdvanceOutcome::NextQuestion)
    }

    /// Returns `Ok(false)` unless the session is `Over` or stalled.
    pub fn restart(&mut self) -> Result<bool, SessionError> {
        if self.phase() != SessionPhase::Over && !self.stalled {
            debug!("restart() ignored in phase {:?}", self.phase());
            return Ok(false);
        }
        self.start()?;
        Ok(true)
    }

    fn next_question(&mut self) -> Result<QuizQuestion, SessionError> {
        let result = generate_question_with_retry(&self.elements, &mut self.rng);
        self.stalled = result.is_err();
        match result {
            Ok(question) => {
                debug!("{:?} question generated", question.kind);
                Ok(question)
            }
            Err(e) => {
                warn!("Question generation failed: {e}");
                Err(e.into())
            }
        }
    }

    // ------------------------------------------------------------------
    // Presentation helpers
    // ------------------------------------------------------------------

    /// `"Correct!"` / `"Incorrect! The answer was X."` once an answer is locked.
    pub fn feedback(&self) -> Option<String> {
        let locked = self.locked_answer.as_deref()?;
        let question = self.current_question.as_ref()?;
        if question.is_correct(locked) {
            Some("Correct!".to_string())
        } else {
            Some(format!("Incorrect! The answer was {}.", question.correct_answer))
        }
    }

    pub fn progress(&self) -> f64 {
        if self.total_rounds == 0 {
            return 1.0;
        }
        f64::from(self.rounds_completed) / f64::from(self.total_rounds)
    }

    pub fn question_label(&self) -> String {
        format!(
            "Question {} of {}",
            (self.rounds_completed + 1).min(self.total_rounds),
            self.total_rounds
        )
    }

    pub fn final_score_label(&self) -> String {
        format!("{} / {}", self.score, self.total_rounds)
    }
}
