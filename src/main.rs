//! Brickfall headless runner
//!
//! Plays a whole game with the autopilot and logs what happens. Useful for
//! checking level files, tuning files and determinism without a renderer.

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;

    use brickfall::sim::{GameEvent, GamePhase, GameSession, LevelSet, idle_input};
    use brickfall::{Result, Tuning};

    /// Brickfall simulation core, headless
    #[derive(Parser, Debug)]
    #[command(author, version, about, long_about = None)]
    pub struct Cli {
        /// Seed for launch angles and power-up drops
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop after this many ticks
        #[arg(long, default_value_t = 100_000)]
        max_ticks: u64,

        /// JSON file with an array of levels (defaults to the built-in levels)
        #[arg(long, value_name = "PATH")]
        levels: Option<PathBuf>,

        /// JSON file with tuning overrides
        #[arg(long, value_name = "PATH")]
        tuning: Option<PathBuf>,

        /// Print the final snapshot as JSON
        #[arg(long)]
        dump_snapshot: bool,
    }

    pub fn run(cli: Cli) -> Result<()> {
        let tuning = match &cli.tuning {
            Some(path) => Tuning::load(path)?,
            None => Tuning::default(),
        };
        let levels = match &cli.levels {
            Some(path) => LevelSet::load(path, &tuning)?,
            None => LevelSet::builtin(),
        };

        let mut session = GameSession::new(levels, tuning, cli.seed)?;
        session.start()?;
        log::info!("Brickfall starting, seed {}", cli.seed);

        let mut ticks = 0;
        let mut bricks_destroyed = 0u32;
        let mut explosions = 0u32;
        let mut captures = 0u32;

        while ticks < cli.max_ticks {
            match session.phase() {
                GamePhase::Playing => {}
                GamePhase::LevelComplete => {
                    session.next_level()?;
                    continue;
                }
                _ => break,
            }

            let input = idle_input(&session);
            let out = session.step(&input);
            ticks += 1;

            for event in &out.events {
                match event {
                    GameEvent::BrickDestroyed { .. } => bricks_destroyed += 1,
                    GameEvent::ExplosionTriggered { .. } => explosions += 1,
                    GameEvent::PowerUpCaptured { kind } => {
                        captures += 1;
                        log::info!("Tick {}: captured {:?}", session.time_ticks(), kind);
                    }
                    GameEvent::LifeLost => {
                        log::info!("Tick {}: life lost, {} left", session.time_ticks(), out.lives);
                    }
                    _ => {}
                }
            }
        }

        log::info!(
            "Finished after {} ticks: phase {:?}, level {}, score {}, lives {}",
            ticks,
            session.phase(),
            session.level_index() + 1,
            session.score(),
            session.lives()
        );
        log::info!(
            "{} bricks destroyed, {} explosions, {} power-ups captured",
            bricks_destroyed,
            explosions,
            captures
        );

        if cli.dump_snapshot {
            println!("{}", serde_json::to_string_pretty(&session.snapshot())?);
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = native::Cli::parse();
    if let Err(e) = native::run(cli) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The simulation is a library; wasm hosts drive it directly
}
