//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::consts::cli_consts::{EVENT_QUEUE_SIZE, LISTING_PAGE_CARDS, SPLASH_DURATION_MS};
use crate::events::Event as LoaderEvent;
use crate::loader::{DashboardLoader, LoadOutcome, spawn_load};
use crate::ui::dashboard::{DashboardState, SessionInfo, render_dashboard};
use crate::ui::splash::render_splash;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc};
use tokio::task::JoinHandle;

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
}

impl UIConfig {
    pub fn new(with_background_color: bool) -> Self {
        Self {
            with_background_color,
        }
    }
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying the creator's listings.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    session: SessionInfo,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    loader: Arc<DashboardLoader>,

    /// Receives progress events from the loader.
    event_receiver: mpsc::Receiver<LoaderEvent>,

    outcome_sender: mpsc::Sender<LoadOutcome>,
    outcome_receiver: mpsc::Receiver<LoadOutcome>,

    /// The load started by the latest (re)load, if any.
    current_load: Option<JoinHandle<()>>,

    /// Broadcasts shutdown signal to in-flight loads.
    shutdown_sender: broadcast::Sender<()>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        session: SessionInfo,
        loader: Arc<DashboardLoader>,
        event_receiver: mpsc::Receiver<LoaderEvent>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        let (outcome_sender, outcome_receiver) = mpsc::channel(EVENT_QUEUE_SIZE);
        Self {
            start_time: Instant::now(),
            session,
            current_screen: Screen::Splash,
            loader,
            event_receiver,
            outcome_sender,
            outcome_receiver,
            current_load: None,
            shutdown_sender,
            ui_config,
        }
    }

    /// Switches to the dashboard and starts the first load.
    fn enter_dashboard(&mut self) {
        let mut state = DashboardState::new(
            self.session.clone(),
            self.start_time,
            self.ui_config.clone(),
        );
        start_load(
            &mut state,
            &self.loader,
            &self.outcome_sender,
            &self.shutdown_sender,
            &mut self.current_load,
        );
        self.current_screen = Screen::Dashboard(Box::new(state));
    }
}

/// Begins a new load generation and aborts the load it supersedes.
///
/// Anything the old load already queued is ignored by generation.
fn start_load(
    state: &mut DashboardState,
    loader: &Arc<DashboardLoader>,
    outcomes: &mpsc::Sender<LoadOutcome>,
    shutdown: &broadcast::Sender<()>,
    current: &mut Option<JoinHandle<()>>,
) {
    if let Some(previous) = current.take() {
        previous.abort();
    }
    let generation = state.begin_reload();
    *current = Some(spawn_load(
        loader.clone(),
        generation,
        outcomes.clone(),
        shutdown.subscribe(),
    ));
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_millis(SPLASH_DURATION_MS);

    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        while let Ok(outcome) = app.outcome_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.apply_outcome(outcome);
            }
        }

        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
        }
        terminal.draw(|f| render(f, &app.current_screen, &app.session))?;

        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.enter_dashboard();
                continue;
            }
        }

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                    let _ = app.shutdown_sender.send(());
                    return Ok(());
                }

                // Any key press skips the splash screen
                if let Screen::Dashboard(state) = &mut app.current_screen {
                    match key.code {
                        KeyCode::Char('r' | 'R') => start_load(
                            state,
                            &app.loader,
                            &app.outcome_sender,
                            &app.shutdown_sender,
                            &mut app.current_load,
                        ),
                        KeyCode::Down | KeyCode::Char('j') => state.scroll_listings(1),
                        KeyCode::Up | KeyCode::Char('k') => state.scroll_listings(-1),
                        KeyCode::PageDown => state.scroll_listings(LISTING_PAGE_CARDS),
                        KeyCode::PageUp => state.scroll_listings(-LISTING_PAGE_CARDS),
                        KeyCode::Home => state.scroll_listings_to_top(),
                        _ => {}
                    }
                } else {
                    app.enter_dashboard();
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen, session: &SessionInfo) {
    match screen {
        Screen::Splash => render_splash(f, session),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
