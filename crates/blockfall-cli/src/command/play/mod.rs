use anyhow::ensure;
use blockfall_engine::Game;
use log::info;

use crate::tui::Runtime;

use self::app::PlayApp;

mod action;
mod app;

const DEFAULT_FRAME_RATE: f64 = 60.0;
const MIN_FRAME_RATE: f64 = 1.0;
const MAX_FRAME_RATE: f64 = 1000.0;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Seed for the piece sequence (random when omitted)
    #[clap(long)]
    seed: Option<u64>,
    /// Game update and render rate (Hz)
    #[clap(long, default_value_t = DEFAULT_FRAME_RATE)]
    frame_rate: f64,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            seed: None,
            frame_rate: DEFAULT_FRAME_RATE,
        }
    }
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg { seed, frame_rate } = arg;
    check_frame_rate(*frame_rate)?;

    let game = match seed {
        Some(seed) => {
            info!("using seed {seed}");
            Game::with_seed(*seed)
        }
        None => Game::new(),
    };
    let mut app = PlayApp::new(game, *frame_rate);
    Runtime::new().run(&mut app)?;

    if let Some(session) = app.game().session() {
        println!(
            "Score: {} / Level: {} / Lines: {}",
            session.score(),
            session.level(),
            session.total_cleared_lines()
        );
    }
    Ok(())
}

fn check_frame_rate(frame_rate: f64) -> anyhow::Result<()> {
    ensure!(
        (MIN_FRAME_RATE..=MAX_FRAME_RATE).contains(&frame_rate),
        "frame rate must be between {MIN_FRAME_RATE} and {MAX_FRAME_RATE} Hz, got {frame_rate}"
    );
    Ok(())
}
