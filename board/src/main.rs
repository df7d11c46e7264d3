//! board — terminal client for a comments service.
//!
//! Entry point for the `board` binary. Wires together configuration, logging,
//! the terminal lifecycle (`tui`), the unified event bus (`event`), the network
//! worker (`net`), and rendering (`ui`).
//!
//! # Startup sequence
//!
//! 1. Load config and install the file logger — both before terminal init so
//!    failures print normally.
//! 2. `install_panic_hook()` then `register_sigterm()`.
//! 3. `init_tui()` — alternate screen + raw mode.
//! 4. Spawn the event task and the network worker; issue the first refresh.
//!
//! `restore_tui()` runs after the event loop exits. Inside the loop only the
//! draw call uses `?`, and a draw error breaks out of the loop rather than
//! returning past the restore.

mod app;
mod config;
mod event;
mod logging;
mod net;
mod theme;
mod tui;
mod ui;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use board_core::HttpCommentService;
use tracing::{error, info, warn};

use crate::ui::keybindings::{handle_key, handle_mouse, KeyAction};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let (config, config_error) = config::load();
    logging::init(&config.log_file, &config.log_level)?;
    if let Some(e) = config_error {
        warn!(error = %e, "ignoring config file, using defaults");
    }
    info!(server = %config.server_url, sort = ?config.sort, "board starting");

    let theme = theme::Theme::from_name(&config.theme);
    let service = HttpCommentService::new(&config.server_url, config.request_timeout())
        .map_err(std::io::Error::other)?;
    let mut state = app::AppState::new(config.sort);

    tui::install_panic_hook();
    let term_flag = tui::register_sigterm()?;
    let mut terminal = tui::init_tui()?;

    let handler = event::EventHandler::new();
    event::spawn_event_task(handler.tx.clone());
    let net_tx = net::worker::spawn_net_worker(Arc::new(service), handler.tx.clone());
    let mut rx = handler.rx;

    let dispatch = |state: &mut app::AppState, request: board_core::Request| {
        if net_tx.send(request).is_ok() {
            state.note_dispatched();
        } else {
            error!("network worker is gone, request dropped");
        }
    };

    let initial = state.store.begin_refresh();
    dispatch(&mut state, initial);

    let mut outcome = Ok(());
    'event_loop: loop {
        tokio::select! {
            // Heartbeat so SIGTERM is noticed even when no events arrive.
            _ = tokio::time::sleep(std::time::Duration::from_millis(50)) => {
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
            maybe_event = rx.recv() => {
                let action = match maybe_event {
                    Some(event::AppEvent::Render) => {
                        if let Err(e) = terminal.draw(|frame| ui::render(frame, &mut state, &theme)) {
                            outcome = Err(e);
                            break 'event_loop;
                        }
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::Key(key)) => handle_key(key, &mut state),
                    Some(event::AppEvent::Mouse(mouse)) => handle_mouse(mouse, &mut state),
                    Some(event::AppEvent::Tick) => {
                        state.tick();
                        KeyAction::Continue
                    }
                    Some(event::AppEvent::NetResult(completion)) => {
                        state.apply_completion(*completion);
                        KeyAction::Continue
                    }
                    // ratatui picks up the new size from frame.area() on the next draw.
                    Some(event::AppEvent::Resize(_, _)) => KeyAction::Continue,
                    Some(event::AppEvent::Quit) | None => KeyAction::Quit,
                };
                match action {
                    KeyAction::Continue => {}
                    KeyAction::Dispatch(request) => dispatch(&mut state, request),
                    KeyAction::Quit => break 'event_loop,
                }
                if term_flag.load(Ordering::Relaxed) {
                    break 'event_loop;
                }
            }
        }
    }

    tui::restore_tui()?;
    info!("board exiting");
    outcome
}
