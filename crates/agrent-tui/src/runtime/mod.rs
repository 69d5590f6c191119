//! TUI runtime - owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox pattern
//!
//! Async handlers are pure async functions returning a [`UiEvent`]. The
//! runtime spawns them and sends their result to an inbox channel, which is
//! drained every frame. Session-store notifications arrive through the
//! store's watch channel and are forwarded as `UiEvent::SessionChanged`,
//! so the gate never polls the session file.

pub mod handlers;

use std::io::Stdout;
use std::sync::Arc;
use std::time::Duration;

use agrent_core::api::ApiClient;
use agrent_core::session::Session;
use anyhow::{Context, Result};
use crossterm::event;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::{mpsc, watch};

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Poll timeout while idle; keeps the loop responsive to inbox events.
const POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop and on
/// panic (via the panic hook).
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    client: Arc<ApiClient>,
    inbox_tx: mpsc::UnboundedSender<UiEvent>,
    inbox_rx: mpsc::UnboundedReceiver<UiEvent>,
    session_rx: watch::Receiver<Session>,
}

impl TuiRuntime {
    /// Creates a new TUI runtime and takes over the terminal.
    ///
    /// # Errors
    /// Returns an error if the terminal cannot be set up.
    pub fn new(client: Arc<ApiClient>) -> Result<Self> {
        // Panic hook BEFORE entering the alternate screen
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let store = client.session();
        let session_rx = store.subscribe();
        let state = AppState::new(store.current());
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            state,
            client,
            inbox_tx,
            inbox_rx,
            session_rx,
        })
    }

    /// Runs the main event loop until the user quits.
    ///
    /// # Errors
    /// Returns an error if terminal I/O fails.
    pub fn run(&mut self) -> Result<()> {
        // Initial data load for the tree we start in
        let effects = self.state.startup_effects();
        self.execute_effects(effects);

        let mut dirty = true;
        while !self.state.should_quit {
            let events = self.collect_events()?;
            for event in events {
                if !matches!(event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects events from all sources (terminal, session watch, inbox).
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        if event::poll(POLL_DURATION)? {
            // Drain everything that is already buffered
            loop {
                events.push(UiEvent::Terminal(event::read()?));
                if !event::poll(Duration::ZERO)? {
                    break;
                }
            }
        }

        if self.session_rx.has_changed().unwrap_or(false) {
            let session = self.session_rx.borrow_and_update().clone();
            events.push(UiEvent::SessionChanged(session));
        }

        while let Ok(event) = self.inbox_rx.try_recv() {
            events.push(event);
        }

        if events.is_empty() {
            events.push(UiEvent::Tick);
        }
        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    /// Executes one effect. Everything except logout is an async API call
    /// spawned onto the runtime; results come back through the inbox.
    fn execute_effect(&mut self, effect: UiEffect) {
        let client = Arc::clone(&self.client);
        match effect {
            UiEffect::Logout => {
                // Synchronous: clears the session file; the watch channel
                // notification remounts the login tree.
                if let Err(err) = client.logout() {
                    tracing::warn!("logout failed: {err:#}");
                    self.state.status.error(format!("Logout failed: {err}"));
                }
            }
            UiEffect::Login {
                username,
                password,
            } => self.spawn(handlers::login(client, username, password)),
            UiEffect::Signup {
                registration,
            } => self.spawn(handlers::signup(client, registration)),
            UiEffect::SelectRole {
                role,
            } => self.spawn(handlers::select_role(client, role)),
            UiEffect::LoadVehicles => self.spawn(handlers::load_vehicles(client)),
            UiEffect::SaveVehicle {
                id,
                payload,
            } => self.spawn(handlers::save_vehicle(client, id, payload)),
            UiEffect::DeleteVehicle {
                id,
            } => self.spawn(handlers::delete_vehicle(client, id)),
            UiEffect::LoadBookings => self.spawn(handlers::load_bookings(client)),
            UiEffect::CreateBooking {
                booking,
            } => self.spawn(handlers::create_booking(client, booking)),
            UiEffect::SetBookingStatus {
                id,
                status,
            } => self.spawn(handlers::set_booking_status(client, id, status)),
            UiEffect::LoadOverview => self.spawn(handlers::load_overview(client)),
            UiEffect::LoadProfile => self.spawn(handlers::load_profile(client)),
        }
    }

    /// Spawns a pure async handler and routes its result to the inbox.
    fn spawn<F>(&self, handler: F)
    where
        F: std::future::Future<Output = UiEvent> + Send + 'static,
    {
        let tx = self.inbox_tx.clone();
        tokio::spawn(async move {
            let _ = tx.send(handler.await);
        });
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
