//! # Actions
//!
//! Everything that can happen in Element Explorer becomes an `Action`.
//! User clicks an element tile? That's `Action::OpenDetail(26)`.
//! A lookup task finishes? That's `Action::FunFactReady { .. }`.
//!
//! `update()` takes the current state and an action, mutates the state,
//! and returns an `Effect` naming the I/O the adapter has to perform.
//! No side effects here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Late results are dropped here rather than in the adapter: a fun fact for
//! an element whose overlay was closed, or an advance scheduled by a quiz
//! session that has since been restarted or left, never touches state.

use std::time::Duration;

use log::{debug, info, warn};

use crate::View;
use crate::core::element::ElementRecord;
use crate::core::session::{AdvanceOutcome, FEEDBACK_DELAY, QuizSession, SubmitOutcome};
use crate::core::state::{App, DetailView, Lookup};

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch between the table and the quiz.
    ToggleView,
    ShowView(View),
    OpenDetail(u32),
    CloseDetail,
    FunFactReady { atomic_number: u32, fact: String },
    ImageReady { atomic_number: u32, uri: String },
    SearchInput(char),
    SearchBackspace,
    SearchClear,
    SubmitAnswer(String),
    /// Fired by the feedback timer; carries the epoch it was scheduled under.
    AdvanceQuiz { epoch: u64 },
    RestartQuiz,
    Quit,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Start fact and image lookups for the element now shown.
    SpawnLookups(ElementRecord),
    /// Abort in-flight lookups; their results are no longer wanted.
    CancelLookups,
    /// Fire `Action::AdvanceQuiz { epoch }` after `delay`.
    ScheduleAdvance { epoch: u64, delay: Duration },
    CancelAdvance,
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::ToggleView => {
            let next = match app.view {
                View::Table => View::Quiz,
                View::Quiz => View::Table,
            };
            show_view(app, next)
        }
        Action::ShowView(view) => show_view(app, view),
        Action::OpenDetail(atomic_number) => {
            if app.view != View::Table {
                return Effect::None;
            }
            let Some(element) = app.element(atomic_number).cloned() else {
                warn!("OpenDetail for unknown atomic number {atomic_number}");
                return Effect::None;
            };
            info!("Opening detail for {} ({})", element.name, element.symbol);
            // Replacing an open overlay drops its guard before the new one is counted
            app.detail = None;
            app.detail = Some(DetailView::open(element.clone(), &app.scroll_lock));
            app.status_message = format!("{} selected", element.name);
            Effect::SpawnLookups(element)
        }
        Action::CloseDetail => match app.detail.take() {
            Some(detail) => {
                debug!("Closing detail for {}", detail.element.symbol);
                app.status_message = String::new();
                Effect::CancelLookups
            }
            None => Effect::None,
        },
        Action::FunFactReady { atomic_number, fact } => {
            match app.detail.as_mut() {
                Some(detail) if detail.atomic_number() == atomic_number => {
                    detail.fun_fact = Lookup::Ready(fact);
                }
                _ => debug!("Dropping fun fact for element {atomic_number}: no longer shown"),
            }
            Effect::None
        }
        Action::ImageReady { atomic_number, uri } => {
            match app.detail.as_mut() {
                Some(detail) if detail.atomic_number() == atomic_number => {
                    detail.image = Lookup::Ready(uri);
                }
                _ => debug!("Dropping image for element {atomic_number}: no longer shown"),
            }
            Effect::None
        }
        Action::SearchInput(c) => {
            if app.view == View::Table {
                app.search_term.push(c);
                update_search_status(app);
            }
            Effect::None
        }
        Action::SearchBackspace => {
            if app.view == View::Table && app.search_term.pop().is_some() {
                update_search_status(app);
            }
            Effect::None
        }
        Action::SearchClear => {
            app.search_term.clear();
            app.status_message = String::new();
            Effect::None
        }
        Action::SubmitAnswer(choice) => {
            let Some(quiz) = app.quiz.as_mut() else {
                return Effect::None;
            };
            match quiz.submit_answer(&choice) {
                SubmitOutcome::Ignored => Effect::None,
                outcome => {
                    info!("Answer {choice:?}: {outcome:?}");
                    app.status_message = quiz.feedback().unwrap_or_default();
                    Effect::ScheduleAdvance {
                        epoch: quiz.epoch(),
                        delay: FEEDBACK_DELAY,
                    }
                }
            }
        }
        Action::AdvanceQuiz { epoch } => {
            let Some(quiz) = app.quiz.as_mut() else {
                debug!("Dropping advance for epoch {epoch}: quiz not running");
                return Effect::None;
            };
            if quiz.epoch() != epoch {
                debug!("Dropping stale advance (epoch {epoch}, current {})", quiz.epoch());
                return Effect::None;
            }
            match quiz.advance() {
                Ok(AdvanceOutcome::Finished) => {
                    app.status_message = format!("Quiz complete! Score: {}", quiz.final_score_label());
                }
                Ok(AdvanceOutcome::NextQuestion) => app.status_message = quiz.question_label(),
                Ok(AdvanceOutcome::Ignored) => {}
                Err(e) => surface_error(app, e.to_string()),
            }
            Effect::None
        }
        Action::RestartQuiz => {
            let Some(quiz) = app.quiz.as_mut() else {
                return Effect::None;
            };
            match quiz.restart() {
                Ok(true) => {
                    app.error = None;
                    app.status_message = quiz.question_label();
                    Effect::CancelAdvance
                }
                Ok(false) => Effect::None,
                Err(e) => {
                    surface_error(app, e.to_string());
                    Effect::CancelAdvance
                }
            }
        }
        Action::Quit => Effect::Quit,
    }
}

fn show_view(app: &mut App, view: View) -> Effect {
    if app.view == view && (view == View::Table || app.quiz.is_some()) {
        return Effect::None;
    }
    info!("Switching to {view:?} view");
    app.view = view;
    app.error = None;
    match view {
        View::Quiz => {
            let had_detail = app.detail.take().is_some();
            let mut quiz = QuizSession::new(app.elements.clone());
            match quiz.start() {
                Ok(()) => app.status_message = quiz.question_label(),
                Err(e) => surface_error(app, e.to_string()),
            }
            app.quiz = Some(quiz);
            if had_detail {
                Effect::CancelLookups
            } else {
                Effect::None
            }
        }
        View::Table => {
            // Dropping the session retires its epoch
            app.quiz = None;
            app.status_message = String::new();
            Effect::CancelAdvance
        }
    }
}

fn update_search_status(app: &mut App) {
    app.status_message = if app.search_term.is_empty() {
        String::new()
    } else {
        format!("{} matching \"{}\"", app.match_count(), app.search_term)
    };
}

fn surface_error(app: &mut App, message: String) {
    warn!("{message}");
    app.status_message = format!("Error: {message}");
    app.error = Some(message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::session::{SessionPhase, TOTAL_ROUNDS};
    use crate::test_support::test_app;

    fn quiz_app() -> App {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::ShowView(View::Quiz)), Effect::None);
        app
    }

    fn correct_answer(app: &App) -> String {
        app.quiz
            .as_ref()
            .and_then(|q| q.current_question.as_ref())
            .map(|q| q.correct_answer.clone())
            .unwrap()
    }

    fn epoch(app: &App) -> u64 {
        app.quiz.as_ref().unwrap().epoch()
    }

    #[test]
    fn test_quit() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }

    #[test]
    fn test_open_detail_spawns_lookups() {
        let mut app = test_app();
        let effect = update(&mut app, Action::OpenDetail(26));
        let iron = app.element(26).unwrap().clone();
        assert_eq!(effect, Effect::SpawnLookups(iron));
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.fun_fact, Lookup::Loading);
        assert_eq!(detail.image, Lookup::Loading);
        assert!(app.scrolling_suspended());
    }

    #[test]
    fn test_open_unknown_element_is_noop() {
        let mut app = test_app();
        assert_eq!(update(&mut app, Action::OpenDetail(999)), Effect::None);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_close_detail_releases_lock() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail(1));
        assert_eq!(update(&mut app, Action::CloseDetail), Effect::CancelLookups);
        assert!(app.detail.is_none());
        assert!(!app.scrolling_suspended());
        assert_eq!(update(&mut app, Action::CloseDetail), Effect::None);
    }

    #[test]
    fn test_reopen_keeps_single_lock_holder() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail(1));
        update(&mut app, Action::OpenDetail(2));
        update(&mut app, Action::CloseDetail);
        assert!(!app.scrolling_suspended());
    }

    #[test]
    fn test_lookup_results_applied_to_open_detail() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail(10));
        update(
            &mut app,
            Action::FunFactReady {
                atomic_number: 10,
                fact: "Neon glows red-orange.".to_string(),
            },
        );
        update(
            &mut app,
            Action::ImageReady {
                atomic_number: 10,
                uri: "data:image/png;base64,AAAA".to_string(),
            },
        );
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.fun_fact.ready(), Some("Neon glows red-orange."));
        assert_eq!(detail.image.ready(), Some("data:image/png;base64,AAAA"));
    }

    #[test]
    fn test_late_lookup_results_dropped() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail(10));
        update(&mut app, Action::OpenDetail(11));
        update(
            &mut app,
            Action::FunFactReady {
                atomic_number: 10,
                fact: "stale".to_string(),
            },
        );
        assert_eq!(app.detail.as_ref().unwrap().fun_fact, Lookup::Loading);

        update(&mut app, Action::CloseDetail);
        update(
            &mut app,
            Action::ImageReady {
                atomic_number: 11,
                uri: "late".to_string(),
            },
        );
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_search_editing() {
        let mut app = test_app();
        for c in "ne".chars() {
            update(&mut app, Action::SearchInput(c));
        }
        assert_eq!(app.search_term, "ne");
        // Neon and Bromine
        assert_eq!(app.match_count(), 2);
        assert_eq!(app.status_message, "2 matching \"ne\"");
        update(&mut app, Action::SearchBackspace);
        assert_eq!(app.search_term, "n");
        update(&mut app, Action::SearchClear);
        assert!(app.search_term.is_empty());
        assert_eq!(app.match_count(), app.elements.len());
    }

    #[test]
    fn test_entering_quiz_starts_session_and_closes_detail() {
        let mut app = test_app();
        update(&mut app, Action::OpenDetail(8));
        assert_eq!(update(&mut app, Action::ToggleView), Effect::CancelLookups);
        assert_eq!(app.view, View::Quiz);
        assert!(app.detail.is_none());
        assert!(!app.scrolling_suspended());
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.phase(), SessionPhase::InProgress);
        assert!(quiz.current_question.is_some());
        assert_eq!(app.status_message, "Question 1 of 10");
    }

    #[test]
    fn test_open_detail_ignored_in_quiz() {
        let mut app = quiz_app();
        assert_eq!(update(&mut app, Action::OpenDetail(1)), Effect::None);
        assert!(app.detail.is_none());
    }

    #[test]
    fn test_submit_schedules_advance_with_epoch() {
        let mut app = quiz_app();
        let answer = correct_answer(&app);
        let effect = update(&mut app, Action::SubmitAnswer(answer.clone()));
        assert_eq!(
            effect,
            Effect::ScheduleAdvance {
                epoch: epoch(&app),
                delay: FEEDBACK_DELAY
            }
        );
        assert_eq!(app.status_message, "Correct!");
        // Second submission is locked out and schedules nothing
        assert_eq!(update(&mut app, Action::SubmitAnswer(answer)), Effect::None);
        assert_eq!(app.quiz.as_ref().unwrap().score, 1);
    }

    #[test]
    fn test_advance_moves_to_next_question() {
        let mut app = quiz_app();
        let answer = correct_answer(&app);
        update(&mut app, Action::SubmitAnswer(answer));
        let current = epoch(&app);
        update(&mut app, Action::AdvanceQuiz { epoch: current });
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.rounds_completed, 1);
        assert_eq!(quiz.phase(), SessionPhase::InProgress);
        assert_eq!(app.status_message, "Question 2 of 10");
    }

    #[test]
    fn test_stale_epoch_advance_ignored() {
        let mut app = quiz_app();
        let answer = correct_answer(&app);
        update(&mut app, Action::SubmitAnswer(answer));
        let stale = epoch(&app);

        // Leave and re-enter: the old session is gone, a fresh one is waiting for an answer
        update(&mut app, Action::ShowView(View::Table));
        update(&mut app, Action::ShowView(View::Quiz));
        assert_ne!(epoch(&app), stale);
        let answer = correct_answer(&app);
        update(&mut app, Action::SubmitAnswer(answer));

        update(&mut app, Action::AdvanceQuiz { epoch: stale });
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.rounds_completed, 0);
        assert_eq!(quiz.phase(), SessionPhase::AwaitingFeedback);
    }

    #[test]
    fn test_advance_after_leaving_quiz_is_dropped() {
        let mut app = quiz_app();
        let answer = correct_answer(&app);
        update(&mut app, Action::SubmitAnswer(answer));
        let stale = epoch(&app);
        assert_eq!(update(&mut app, Action::ToggleView), Effect::CancelAdvance);
        assert!(app.quiz.is_none());
        assert_eq!(update(&mut app, Action::AdvanceQuiz { epoch: stale }), Effect::None);
    }

    #[test]
    fn test_full_quiz_and_restart() {
        let mut app = quiz_app();
        for _ in 0..TOTAL_ROUNDS {
            let answer = correct_answer(&app);
            update(&mut app, Action::SubmitAnswer(answer));
            let current = epoch(&app);
            update(&mut app, Action::AdvanceQuiz { epoch: current });
        }
        let finished_epoch = epoch(&app);
        assert!(app.quiz.as_ref().unwrap().is_over);
        assert_eq!(app.status_message, "Quiz complete! Score: 10 / 10");

        assert_eq!(update(&mut app, Action::RestartQuiz), Effect::CancelAdvance);
        let quiz = app.quiz.as_ref().unwrap();
        assert_eq!(quiz.phase(), SessionPhase::InProgress);
        assert_eq!(quiz.score, 0);
        assert_ne!(quiz.epoch(), finished_epoch);
    }

    #[test]
    fn test_restart_mid_quiz_is_noop() {
        let mut app = quiz_app();
        assert_eq!(update(&mut app, Action::RestartQuiz), Effect::None);
        assert_eq!(app.quiz.as_ref().unwrap().phase(), SessionPhase::InProgress);
    }

    #[test]
    fn test_show_same_view_is_noop() {
        let mut app = quiz_app();
        let before = epoch(&app);
        assert_eq!(update(&mut app, Action::ShowView(View::Quiz)), Effect::None);
        assert_eq!(epoch(&app), before);
    }
}
