//! Key Runner entry point
//!
//! Runs the game in the terminal: fixed-rate simulation ticks, key and
//! resize events, and the terminal renderer.

use std::io::{self, Stdout, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute, terminal,
};

use key_runner::consts::*;
use key_runner::renderer::{Renderer, TerminalRenderer};
use key_runner::sim::{GameSession, KeyOutcome, handle_key, tick};
use key_runner::{Tuning, Viewport};

/// World units covered by one terminal cell
const CELL_WIDTH: f32 = 8.0;
const CELL_HEIGHT: f32 = 16.0;

fn viewport_for(cols: u16, rows: u16) -> Viewport {
    Viewport::new(cols as f32 * CELL_WIDTH, rows as f32 * CELL_HEIGHT)
}

/// Map a terminal key to the character the game sees
fn key_char(code: KeyCode) -> Option<char> {
    match code {
        KeyCode::Char(c) => Some(c),
        KeyCode::Enter => Some('\n'),
        KeyCode::Tab => Some('\t'),
        _ => None,
    }
}

/// Host game loop state
struct Game {
    session: GameSession,
    renderer: TerminalRenderer<Stdout>,
    accumulator: f32,
    last_frame: Instant,
}

impl Game {
    fn new(seed: u64, tuning: Tuning) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        Ok(Self {
            session: GameSession::new(seed, tuning, viewport_for(cols, rows)),
            renderer: TerminalRenderer::new(stdout(), cols, rows),
            accumulator: 0.0,
            last_frame: Instant::now(),
        })
    }

    /// Drain pending events; returns false when the player quits
    fn pump_events(&mut self) -> io::Result<bool> {
        while event::poll(Duration::ZERO)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let ctrl_c = key.code == KeyCode::Char('c')
                        && key.modifiers.contains(KeyModifiers::CONTROL);
                    if key.code == KeyCode::Esc || ctrl_c {
                        return Ok(false);
                    }
                    let outcome = handle_key(&mut self.session, key_char(key.code));
                    if outcome != KeyOutcome::Ignored {
                        log::trace!("Key {:?} -> {:?}", key.code, outcome);
                    }
                }
                Event::Resize(cols, rows) => {
                    let viewport = viewport_for(cols, rows);
                    self.session.resize(viewport.width, viewport.height);
                    self.renderer.resize(cols, rows);
                }
                _ => {}
            }
        }
        Ok(true)
    }

    /// Run simulation ticks owed since the last frame
    fn update(&mut self) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.session);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
    }

    fn run(&mut self) -> io::Result<()> {
        let frame_dur = Duration::from_secs_f32(SIM_DT);
        loop {
            let frame_start = Instant::now();

            if !self.pump_events()? {
                return Ok(());
            }
            self.update();
            self.renderer.render(&self.session.snapshot())?;

            let elapsed = frame_start.elapsed();
            if elapsed < frame_dur {
                std::thread::sleep(frame_dur - elapsed);
            }
        }
    }
}

fn main() -> io::Result<()> {
    env_logger::init();

    let tuning = std::env::var_os("KEY_RUNNER_TUNING")
        .map(PathBuf::from)
        .map(|path| Tuning::load(&path))
        .unwrap_or_default();
    let seed = std::env::var("KEY_RUNNER_SEED")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(rand::random::<u64>);
    log::info!("Key Runner starting with seed {}", seed);

    terminal::enable_raw_mode()?;
    let mut out = stdout();
    execute!(
        out,
        terminal::EnterAlternateScreen,
        cursor::Hide,
        terminal::DisableLineWrap,
    )?;

    let result = Game::new(seed, tuning).and_then(|mut game| game.run());

    execute!(
        out,
        terminal::LeaveAlternateScreen,
        cursor::Show,
        terminal::EnableLineWrap,
    )?;
    terminal::disable_raw_mode()?;
    result
}
