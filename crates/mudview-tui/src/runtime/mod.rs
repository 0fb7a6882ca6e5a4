//! TUI runtime: owns the terminal, runs the event loop, executes effects.
//!
//! This is the "Elm runtime" boundary: all side effects happen here. The
//! reducer stays pure and produces effects; this module executes them.
//!
//! ## Inbox Pattern
//!
//! The connection task sends `UiEvent`s to `inbox_tx`; the runtime drains
//! `inbox_rx` each loop iteration, so server messages are applied in the
//! order they arrived, between terminal events, on this thread only.

mod connection;
mod inbox;

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use inbox::{UiEventReceiver, UiEventSender};
use mudview_core::config::Config;
use mudview_core::{ClientView, CommandSink};
use tokio::sync::mpsc;
use tracing::warn;
use url::Url;

use self::connection::ConnectionHandle;
use crate::effects::UiEffect;
use crate::events::{ConnectionEvent, UiEvent};
use crate::state::AppState;
use crate::terminal::TuiTerminal;
use crate::{render, terminal, update};

/// Frame interval while there is activity (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll interval when idle.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen TUI runtime.
///
/// Terminal state is restored on drop and on panic.
pub struct TuiRuntime {
    terminal: TuiTerminal,
    pub state: AppState,
    /// Kept so the inbox never reports "disconnected" while the UI runs.
    _inbox_tx: UiEventSender,
    inbox_rx: UiEventReceiver,
    connection: ConnectionHandle,
    last_tick: Instant,
    last_activity: Instant,
}

impl TuiRuntime {
    /// Enters the terminal UI and starts connecting to `url`.
    ///
    /// Must be called inside a tokio runtime.
    pub fn new(config: &Config, url: Url) -> Result<Self> {
        terminal::install_panic_hook();
        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let state = AppState::new(ClientView::new(config.render_settings()), url.as_str());
        let connection = connection::spawn(url, config.framing, inbox_tx.clone());

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            _inbox_tx: inbox_tx,
            inbox_rx,
            connection,
            last_tick: now,
            last_activity: now,
        })
    }

    /// Runs the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            let mut events = self.collect_events()?;

            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_) | UiEvent::Connection(_)) {
                    self.last_activity = Instant::now();
                }
                // Only Tick triggers a redraw; everything else batches until then.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| render::render(&self.state, frame))?;
                dirty = false;
            }
        }

        Ok(())
    }

    /// Collects inbox and terminal events, then a Tick once the interval is due.
    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let tick_interval = if self.last_activity.elapsed() < IDLE_POLL_DURATION {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        while let Ok(ev) = self.inbox_rx.try_recv() {
            events.push(ev);
        }

        let poll_duration = if events.is_empty() {
            tick_interval.saturating_sub(self.last_tick.elapsed())
        } else {
            Duration::ZERO
        };

        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => self.state.should_quit = true,
            UiEffect::SendCommand(command) => {
                if let Err(err) = self.connection.send(&command) {
                    warn!(error = %err, "Failed to send command");
                    let event = UiEvent::Connection(ConnectionEvent::Failed {
                        error: format!("{err:#}"),
                    });
                    let effects = update::update(&mut self.state, event);
                    self.execute_effects(effects);
                }
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
