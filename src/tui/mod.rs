//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! translates keyboard and mouse events into core `Action` values, and
//! performs the `Effect` each update returns.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Background work
//!
//! ```text
//!  Effect::SpawnLookups ──► tokio task (fact ∥ image) ──┐
//!  Effect::ScheduleAdvance ► FeedbackTimer (1500 ms) ───┤ mpsc<Action>
//!                                                       ▼
//!                                   event loop: rx.try_recv() → update()
//! ```
//!
//! Lookup tasks are aborted when the overlay closes; the feedback timer is
//! cancelled when the quiz is left or restarted. Anything that slips through
//! is discarded by `update()`.
//!
//! ## Redraw Strategy
//!
//! The loop polls quickly (~100ms) while lookups or the feedback timer are
//! pending, and redraws every tick while the detail overlay spins its atom.
//! Otherwise it sleeps up to 500ms and only redraws on input.

mod component;
pub mod components;
mod event;
pub mod theme;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::execute;
use tokio::task::AbortHandle;

use crate::View;
use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::element::ElementRecord;
use crate::core::session::SessionPhase;
use crate::core::state::App;
use crate::core::timer::FeedbackTimer;
use crate::lookup::{GeminiProvider, LookupProvider, UnconfiguredProvider, get_element_image, get_fun_fact};
use crate::tui::components::{Direction, PeriodicTableState, QuizCursor};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Theme;

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub theme: Theme,
    pub table: PeriodicTableState,
    pub quiz_cursor: QuizCursor,
    pub started: Instant,
    /// (epoch, round) of the question the cursor was last reset for.
    question_key: Option<(u64, u32)>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            theme: Theme::default(),
            table: PeriodicTableState::default(),
            quiz_cursor: QuizCursor::default(),
            started: Instant::now(),
            question_key: None,
        }
    }

    /// Moves the option highlight back to the top whenever a new question appears.
    fn sync_quiz_cursor(&mut self, app: &App) {
        let key = app.quiz.as_ref().map(|q| (q.epoch(), q.rounds_completed));
        if key != self.question_key {
            self.quiz_cursor = QuizCursor::default();
            self.question_key = key;
        }
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture)?;
        info!("Terminal modes enabled (mouse)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture);
    }
}

/// Build a lookup provider from the resolved config. Falls back to the
/// unconfigured provider when offline or no key is set.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn LookupProvider> {
    if config.offline {
        info!("Offline mode: lookups disabled");
        return Arc::new(UnconfiguredProvider);
    }
    match &config.gemini_api_key {
        Some(api_key) => Arc::new(GeminiProvider::new(
            api_key.clone(),
            config.gemini_base_url.clone(),
            config.text_model.clone(),
            config.image_model.clone(),
            config.request_timeout,
        )),
        None => {
            warn!("GEMINI_API_KEY not set. Fun facts and images will use fallbacks.");
            Arc::new(UnconfiguredProvider)
        }
    }
}

/// Owns the background work started on behalf of `update()`.
struct EffectRunner {
    tx: mpsc::Sender<Action>,
    lookups: Option<AbortHandle>,
    timer: FeedbackTimer,
}

impl EffectRunner {
    fn new(tx: mpsc::Sender<Action>) -> Self {
        Self {
            tx,
            lookups: None,
            timer: FeedbackTimer::new(),
        }
    }

    fn busy(&self) -> bool {
        self.timer.is_pending() || self.lookups.as_ref().is_some_and(|h| !h.is_finished())
    }

    fn cancel_lookups(&mut self) {
        if let Some(handle) = self.lookups.take() {
            handle.abort();
        }
    }

    /// Returns true when the effect asks the loop to quit.
    fn apply(&mut self, effect: Effect, app: &App) -> bool {
        match effect {
            Effect::None => {}
            Effect::Quit => return true,
            Effect::SpawnLookups(element) => {
                self.cancel_lookups();
                self.lookups = Some(spawn_lookups(app.lookups.clone(), element, self.tx.clone()));
            }
            Effect::CancelLookups => self.cancel_lookups(),
            Effect::ScheduleAdvance { epoch, delay } => {
                let tx = self.tx.clone();
                self.timer.schedule(delay, move || {
                    if tx.send(Action::AdvanceQuiz { epoch }).is_err() {
                        warn!("Failed to send AdvanceQuiz: receiver dropped");
                    }
                });
            }
            Effect::CancelAdvance => self.timer.cancel(),
        }
        false
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        self.cancel_lookups();
    }
}

fn dispatch(app: &mut App, runner: &mut EffectRunner, action: Action) -> bool {
    debug!("Dispatching {:?}", action);
    let effect = update(app, action);
    runner.apply(effect, app)
}

pub fn run(elements: Vec<ElementRecord>, config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    info!("Lookup provider: {}", provider.name());
    let mut app = App::from_config(Arc::from(elements), provider, &config);
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let mut runner = EffectRunner::new(tx);

    if config.start_view != View::Table {
        dispatch(&mut app, &mut runner, Action::ShowView(config.start_view));
    }

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();
    let mut needs_redraw = true; // Force first frame

    'main: loop {
        tui.sync_quiz_cursor(&app);

        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &app, &tui))?;
            needs_redraw = false;
        }

        // The open overlay animates its atom rings
        let animating = app.detail.is_some();
        let timeout = if animating || runner.busy() {
            Duration::from_millis(100)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() || animating {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            let frame_area = terminal.get_frame().area();
            if handle_event(event, &mut app, &mut tui, &mut runner, frame_area) {
                break 'main;
            }
        }

        // Handle background task actions (lookup results, timer fires)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            if dispatch(&mut app, &mut runner, action) {
                break 'main;
            }
        }
    }

    // Drop order: pending work is cancelled before the terminal is restored
    drop(runner);
    ratatui::restore();
    info!("Element Explorer shut down");
    Ok(())
}

/// Routes one terminal event. Returns true to quit.
fn handle_event(
    event: TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
    frame_area: ratatui::layout::Rect,
) -> bool {
    match event {
        TuiEvent::Resize => false,
        TuiEvent::ForceQuit => dispatch(app, runner, Action::Quit),
        TuiEvent::ToggleView => dispatch(app, runner, Action::ToggleView),
        TuiEvent::ToggleTheme => {
            tui.theme = tui.theme.toggle();
            app.status_message = format!("Theme: {}", tui.theme.label());
            false
        }
        event => match app.view {
            View::Table => handle_table_event(event, app, tui, runner, frame_area),
            View::Quiz => handle_quiz_event(event, app, tui, runner),
        },
    }
}

fn handle_table_event(
    event: TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
    frame_area: ratatui::layout::Rect,
) -> bool {
    // Overlay open: the table underneath does not move
    if app.detail.is_some() {
        return match event {
            TuiEvent::Escape | TuiEvent::Submit | TuiEvent::InputChar('q') => {
                dispatch(app, runner, Action::CloseDetail)
            }
            TuiEvent::MouseClick(column, row)
                if !ui::detail_overlay_area(frame_area).contains((column, row).into()) =>
            {
                dispatch(app, runner, Action::CloseDetail)
            }
            _ => false,
        };
    }

    let direction = match event {
        TuiEvent::CursorUp => Some(Direction::Up),
        TuiEvent::CursorDown => Some(Direction::Down),
        TuiEvent::CursorLeft => Some(Direction::Left),
        TuiEvent::CursorRight => Some(Direction::Right),
        _ => None,
    };
    if let Some(direction) = direction {
        if !app.scrolling_suspended() {
            tui.table.move_cursor(&app.elements, direction);
        }
        return false;
    }

    match event {
        TuiEvent::Submit => open_if_highlighted(app, runner, tui.table.selected),
        TuiEvent::MouseClick(column, row) => match ui::hit_test_element(column, row, frame_area, app) {
            Some(atomic_number) => {
                tui.table.selected = atomic_number;
                open_if_highlighted(app, runner, atomic_number)
            }
            None => false,
        },
        TuiEvent::InputChar(c) => dispatch(app, runner, Action::SearchInput(c)),
        TuiEvent::Backspace => dispatch(app, runner, Action::SearchBackspace),
        TuiEvent::Escape if !app.search_term.is_empty() => dispatch(app, runner, Action::SearchClear),
        TuiEvent::Escape => dispatch(app, runner, Action::Quit),
        _ => false,
    }
}

/// Dimmed tiles are not selectable.
fn open_if_highlighted(app: &mut App, runner: &mut EffectRunner, atomic_number: u32) -> bool {
    let selectable = app
        .element(atomic_number)
        .is_some_and(|element| app.is_highlighted(element));
    selectable && dispatch(app, runner, Action::OpenDetail(atomic_number))
}

fn handle_quiz_event(
    event: TuiEvent,
    app: &mut App,
    tui: &mut TuiState,
    runner: &mut EffectRunner,
) -> bool {
    let Some(quiz) = app.quiz.as_ref() else {
        return matches!(event, TuiEvent::Escape) && dispatch(app, runner, Action::ShowView(View::Table));
    };
    let restartable = quiz.phase() == SessionPhase::Over || quiz.is_stalled();
    let options: Vec<String> = quiz
        .current_question
        .as_ref()
        .map(|q| q.options.clone())
        .unwrap_or_default();

    match event {
        TuiEvent::Escape => dispatch(app, runner, Action::ShowView(View::Table)),
        TuiEvent::CursorUp => {
            tui.quiz_cursor.up();
            false
        }
        TuiEvent::CursorDown => {
            tui.quiz_cursor.down(options.len());
            false
        }
        TuiEvent::Submit if restartable => dispatch(app, runner, Action::RestartQuiz),
        TuiEvent::Submit => match options.get(tui.quiz_cursor.index) {
            Some(choice) => dispatch(app, runner, Action::SubmitAnswer(choice.clone())),
            None => false,
        },
        TuiEvent::InputChar(c) => {
            let picked = c
                .to_digit(10)
                .and_then(|d| (d as usize).checked_sub(1))
                .and_then(|i| options.get(i).map(|o| (i, o)));
            match picked {
                Some((index, choice)) => {
                    tui.quiz_cursor.index = index;
                    dispatch(app, runner, Action::SubmitAnswer(choice.clone()))
                }
                None => false,
            }
        }
        _ => false,
    }
}

/// Runs both lookups concurrently in one task; each result is sent as soon
/// as it is ready.
fn spawn_lookups(
    provider: Arc<dyn LookupProvider>,
    element: ElementRecord,
    tx: mpsc::Sender<Action>,
) -> AbortHandle {
    info!("Spawning lookups for {} via {}", element.symbol, provider.name());
    let atomic_number = element.atomic_number;
    let handle = tokio::spawn(async move {
        let fact = async {
            let fact = get_fun_fact(provider.as_ref(), &element).await;
            if tx.send(Action::FunFactReady { atomic_number, fact }).is_err() {
                warn!("Failed to send fun fact: receiver dropped");
            }
        };
        let image = async {
            let uri = get_element_image(provider.as_ref(), &element).await;
            if tx.send(Action::ImageReady { atomic_number, uri }).is_err() {
                warn!("Failed to send image: receiver dropped");
            }
        };
        futures::join!(fact, image);
    });
    handle.abort_handle()
}
