//! Terminal Tetris runner (default binary).
//!
//! One thread: poll crossterm input until the next gravity tick, apply actions,
//! tick, forward game events to audio, redraw.

use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::event::{self, Event};

use classic_tetris::audio::ProceduralAudio;
use classic_tetris::config::Config;
use classic_tetris::core::{GameSnapshot, GameState};
use classic_tetris::input::{handle_key_event, should_quit};
use classic_tetris::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

fn main() -> Result<()> {
    let config = Config::parse();

    let mut audio = if config.mute {
        ProceduralAudio::disabled()
    } else {
        ProceduralAudio::new()
    };

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&config, &mut term, &mut audio);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn run(config: &Config, term: &mut TerminalRenderer, audio: &mut ProceduralAudio) -> Result<()> {
    let mut game = GameState::new(config.seed_or_random());
    game.start();

    let view = GameView::default();
    let mut snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(0, 0);

    let tick = config.tick_interval();
    let mut last_tick = Instant::now();

    loop {
        for event in game.drain_events() {
            audio.handle_event(&event);
        }

        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        game.snapshot_into(&mut snap);
        view.render_into(&snap, Viewport::new(w, h), &mut fb);
        term.draw(&fb)?;

        // Input with timeout until next tick.
        let timeout = tick.checked_sub(last_tick.elapsed()).unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        game.apply_action(action);
                    }
                }
                Event::Resize(..) => term.invalidate(),
                _ => {}
            }
        }

        if last_tick.elapsed() >= tick {
            last_tick = Instant::now();
            game.tick();
        }
    }
}
