#![warn(clippy::pedantic)]

use std::{
    fs,
    io::{Write, stdout},
    path::PathBuf,
    thread,
    time::{Duration, Instant},
};

use clap::{ArgAction, Parser, Subcommand};
use color_eyre::eyre::{WrapErr, bail};
use cube_core::{
    notation,
    scheduler::{Animator, AnimatorConfig, TurnEvent},
    scramble,
};
use itertools::Itertools;
use log::LevelFilter;
use owo_colors::OwoColorize;

/// How often the headless render loop ticks the animator.
const TICK: Duration = Duration::from_millis(16);

/// Drive the cube engine from the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Animator settings in TOML format; defaults apply when omitted.
    #[arg(long, short = 'c', value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Increase logging verbosity (can be repeated).
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scramble a cube, then solve it by replaying the inverse history.
    Demo {
        /// Layers per edge.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=7))]
        size: u8,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
        /// Pace the turns in real time instead of fast-forwarding.
        #[arg(long)]
        real_time: bool,
    },
    /// Print a scramble in face notation without animating it.
    Scramble {
        /// Layers per edge.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=7))]
        size: u8,
        /// Seed for a reproducible scramble.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Apply a move sequence in face notation, e.g. "R U' 2F".
    Apply {
        /// Layers per edge.
        #[arg(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(3..=7))]
        size: u8,
        /// The move sequence to apply.
        sequence: String,
    },
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        })
        .init();

    let config = match &cli.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("reading {}", path.display()))?;
            toml::from_str(&text).wrap_err_with(|| format!("parsing {}", path.display()))?
        }
        None => AnimatorConfig::default(),
    };

    match cli.command {
        Commands::Demo {
            size,
            seed,
            real_time,
        } => demo(usize::from(size), seed, real_time, config),
        Commands::Scramble { size, seed } => print_scramble(usize::from(size), seed, &config),
        Commands::Apply { size, sequence } => apply(usize::from(size), &sequence, config),
    }
}

fn demo(
    size: usize,
    seed: Option<u64>,
    real_time: bool,
    config: AnimatorConfig,
) -> color_eyre::Result<()> {
    let mut animator = Animator::with_config(size, config);
    if let Some(seed) = seed {
        animator.reseed(seed);
    }

    animator.scramble()?;
    println!("Scramble ({} moves):", animator.queue_len());
    run_to_idle(&mut animator, real_time);

    let solve_moves = animator.history_len();
    animator.solve()?;
    println!();
    println!("Solve ({solve_moves} moves):");
    run_to_idle(&mut animator, real_time);

    println!();
    if animator.cube().is_solved() {
        println!("{}", "Cube returned to its initial state".green());
        Ok(())
    } else {
        bail!("cube did not return to its initial state");
    }
}

fn print_scramble(size: usize, seed: Option<u64>, config: &AnimatorConfig) -> color_eyre::Result<()> {
    let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
    let moves = scramble::generate(size, &config.scramble, &mut rng);

    println!(
        "{}",
        moves
            .iter()
            .map(|&mv| notation::notation(mv, size))
            .join(" ")
    );
    Ok(())
}

fn apply(size: usize, sequence: &str, config: AnimatorConfig) -> color_eyre::Result<()> {
    let moves = notation::parse_sequence(sequence, size)?;
    if moves.is_empty() {
        bail!("no moves in {sequence:?}");
    }

    let mut animator = Animator::with_config(size, config);
    animator.enqueue_moves(&moves)?;
    run_to_idle(&mut animator, false);

    println!(
        "{} cubies moved through {} turns; solved: {}",
        animator.cube().cubies().len(),
        moves.len(),
        animator.cube().is_solved()
    );
    Ok(())
}

/// Tick the animator until its queue drains, echoing each started turn's
/// notation the way a move-log panel would.
fn run_to_idle(animator: &mut Animator, real_time: bool) {
    let mut ticker = Ticker::new();

    while !animator.is_idle() {
        for event in animator.tick(TICK) {
            match event {
                TurnEvent::TurnStarted { notation, .. } => {
                    print!("{notation} ");
                    stdout().flush().ok();
                }
                TurnEvent::LayerSkipped { mv } => {
                    print!(
                        "{} ",
                        format!("[skipped {}]", notation::notation(mv, animator.size())).red()
                    );
                }
                TurnEvent::TurnFinished { .. } | TurnEvent::QueueIdle => {}
            }
        }

        if real_time {
            ticker.wait(TICK);
        }
    }

    println!();
}

/// Helper for accurate sleep intervals.
struct Ticker {
    now: Instant,
}

impl Ticker {
    fn new() -> Self {
        Self {
            now: Instant::now(),
        }
    }

    fn wait(&mut self, delay: Duration) {
        // Advance the expected next time and sleep until that instant.
        self.now += delay;
        thread::sleep(self.now.saturating_duration_since(Instant::now()));
    }
}
