//! Terminal Color Tetris runner (default binary).
//!
//! Wires the pieces together: crossterm key events become engine commands,
//! the tick driver turns the session's timer plan into gravity and flash
//! callbacks, and the framebuffer renderer draws a snapshot every frame.
//!
//! Settings come from `COLOR_TETRIS_*` environment variables (see
//! `DriverConfig`).

use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};

use color_tetris::core::{GameEvent, GameSession, GameSnapshot};
use color_tetris::driver::{drive, DriverConfig, EventLog, TickDriver};
use color_tetris::input::{handle_key_event, should_quit};
use color_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

/// Upper bound on one input wait so resizes are picked up promptly.
const MAX_FRAME_WAIT: Duration = Duration::from_millis(50);

fn main() -> Result<()> {
    let config = DriverConfig::from_env().context("invalid configuration")?;
    let log = EventLog::start_optional(config.log_path.as_deref())?;

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &config, log.as_ref());

    // Always try to restore terminal state.
    let _ = term.exit();
    if let Some(log) = log {
        log.close();
    }
    result
}

fn run(term: &mut TerminalRenderer, config: &DriverConfig, log: Option<&EventLog>) -> Result<()> {
    let mut session = GameSession::with_config(config.seed, config.engine_config());
    let mut driver = TickDriver::new();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        drive(&mut session, &mut driver, Instant::now());
        drain_events(&mut session, term, log)?;

        // Render.
        session.snapshot_into(&mut snap);
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw_swap(&mut fb)?;

        // Input until the next timer deadline.
        let timeout = driver.timeout(Instant::now(), MAX_FRAME_WAIT);
        if !event::poll(timeout)? {
            continue;
        }

        match event::read()? {
            Event::Key(key) if key.kind != KeyEventKind::Release => {
                if should_quit(key) {
                    return Ok(());
                }
                if let Some(command) = handle_key_event(key) {
                    session.apply(command);
                }
            }
            Event::Resize(_, _) => term.invalidate(),
            _ => {}
        }
    }
}

fn drain_events(
    session: &mut GameSession,
    term: &mut TerminalRenderer,
    log: Option<&EventLog>,
) -> Result<()> {
    for stamped in session.take_events() {
        if let Some(log) = log {
            log.record(&stamped);
        }
        if matches!(stamped.event, GameEvent::RowsFlashing { .. }) {
            term.bell()?;
        }
    }
    Ok(())
}
