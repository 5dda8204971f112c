//! Terminal runner (default binary).
//!
//! Mouse drags select apples, the keyboard drives the menus. Rendering goes
//! through the framebuffer renderer; logs go to `APPLES_LOG_PATH`.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};

use tui_apples::app::{App, Control};
use tui_apples::core::{CueSink, SimpleRng};
use tui_apples::input::{map_key_event, map_mouse_event, should_quit};
use tui_apples::logging::{self, LogConfig};
use tui_apples::store::LeaderboardStore;
use tui_apples::term::{FrameBuffer, RenderThrottle, TerminalRenderer, Viewport};
use tui_apples::types::{Cue, GameConfig, FRAME_MS};

/// Static screens are refreshed at least this often.
const STATIC_REFRESH_MS: u64 = 500;

/// Rings the terminal bell when a selection clears.
struct BellCues;

impl CueSink for BellCues {
    fn play(&mut self, cue: Cue) {
        if cue != Cue::Match {
            return;
        }
        let mut out = io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!("bell failed: {e}");
        }
    }
}

fn main() -> Result<()> {
    if let Err(e) = logging::init(&LogConfig::from_env()) {
        eprintln!("logging disabled: {e:#}");
    }

    let config = GameConfig::from_env();
    let rng = match std::env::var("APPLES_SEED").ok().and_then(|s| s.trim().parse().ok()) {
        Some(seed) => SimpleRng::new(seed),
        None => SimpleRng::from_time(),
    };
    let store = LeaderboardStore::from_env();
    let mut app = App::new(config, rng, store, BellCues)?;
    info!(
        "starting: {}x{} grid, {}s rounds",
        config.rows, config.cols, config.round_duration_secs
    );

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut app);

    // Always try to restore terminal state.
    let _ = term.exit();
    log::logger().flush();
    result
}

fn run(term: &mut TerminalRenderer, app: &mut App<BellCues>) -> Result<()> {
    let frame = Duration::from_millis(FRAME_MS as u64);
    let started = Instant::now();
    let mut last_frame = Instant::now();
    let mut throttle = RenderThrottle::new(STATIC_REFRESH_MS);
    let mut fb = FrameBuffer::new(0, 0);

    loop {
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        let viewport = Viewport::new(w, h);

        let now_ms = started.elapsed().as_millis() as u64;
        if throttle.should_render(now_ms, app.frame_fingerprint()) {
            app.render_into(viewport, &mut fb);
            term.draw_swap(&mut fb)?;
        }

        let timeout = frame
            .checked_sub(last_frame.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(k) = map_key_event(key) {
                        if app.handle_key(k) == Control::Quit {
                            return Ok(());
                        }
                    }
                }
                Event::Mouse(mouse) => {
                    if let Some(pointer) = map_mouse_event(mouse) {
                        app.handle_mouse(pointer, viewport);
                    }
                }
                Event::FocusLost => app.pointer_left(),
                Event::Resize(_, _) => {
                    term.invalidate();
                    throttle.reset();
                }
                _ => {}
            }
        }

        let elapsed = last_frame.elapsed();
        if elapsed >= frame {
            last_frame = Instant::now();
            app.advance(elapsed.as_millis() as u32);
        }
    }
}
