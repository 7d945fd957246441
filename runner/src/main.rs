mod game_loop;
mod runner_config;
mod text_render;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use snake_common::config::Validate;
use snake_common::games::SessionRng;
use snake_common::games::snake::SnakeSession;
use snake_common::high_score::FileHighScoreStore;
use snake_common::{log, logger};

use game_loop::{LoopOptions, Pilot, run_games};
use runner_config::{CONFIG_FILE, RunnerConfig, get_config_manager};
use text_render::TextRenderSink;

#[derive(Parser)]
#[command(name = "snake_runner", about = "Headless host for the snake rules engine")]
struct Args {
    #[arg(long, default_value = CONFIG_FILE)]
    config: PathBuf,

    /// Write the default config to `--config` and exit.
    #[arg(long)]
    init_config: bool,

    #[arg(long)]
    seed: Option<u64>,

    /// Overrides `games` from the config file.
    #[arg(long)]
    games: Option<u32>,

    /// Comma separated keys, one per frame (e.g. `space,w,d,p`). Autopilot
    /// plays when absent.
    #[arg(long)]
    keys: Option<String>,

    /// Run frames back to back with a fixed elapsed time.
    #[arg(long)]
    simulate: bool,

    #[arg(long, default_value_t = 1_000_000)]
    max_frames: u64,

    /// Do not draw the board.
    #[arg(long)]
    quiet: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Runner".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = get_config_manager(&args.config);
    if args.init_config {
        config_manager.set_config(&RunnerConfig::default())?;
        log!("Default config written to {}", args.config.display());
        return Ok(());
    }

    let mut config = config_manager.get_config()?;
    if let Some(games) = args.games {
        config.games = games;
    }
    config.validate()?;

    let rng = match args.seed {
        Some(seed) => SessionRng::new(seed),
        None => SessionRng::from_random(),
    };
    log!(
        "Starting {} game(s) on a {}x{} field, seed {}",
        config.games,
        config.game.cols,
        config.game.rows,
        rng.seed()
    );

    let pilot = match args.keys.as_deref() {
        Some(script) => Pilot::from_script(script)?,
        None => Pilot::Autopilot,
    };

    let store = FileHighScoreStore::new(&config.high_score_file);
    let sink = TextRenderSink::new(config.game.field_size(), !args.quiet);
    let mut session = SnakeSession::new(config.game.clone(), rng, store, sink)
        .with_game_over_callback(|score| {
            log!("Game over notification: final score {}", score);
            Ok(())
        });

    let options = LoopOptions {
        frame_interval: Duration::from_millis(config.frame_interval_ms),
        games: config.games,
        simulate: args.simulate,
        max_frames: args.max_frames,
    };

    let summary = run_games(&mut session, pilot, &options).await;

    log!(
        "Played {} game(s) in {} frames. Scores: {:?}. High score: {}",
        summary.scores.len(),
        summary.frames,
        summary.scores,
        session.high_score()
    );
    Ok(())
}
