#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that runs a Shadow Dimension level headlessly.

mod script;

use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::Parser;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use shadow_dimension_core::ActorSnapshot;
use shadow_dimension_system_controls::{Controls, Flow};
use shadow_dimension_world::{self as world, query, Arena, ArenaConfig};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::script::InputScript;

/// Headless runner for Shadow Dimension levels.
#[derive(Debug, Parser)]
#[command(name = "shadow-dimension", version, about)]
struct Args {
    /// Level file of `kind,x,y` records.
    #[arg(long)]
    level: PathBuf,
    /// TOML file overriding the default arena configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Input script; without one the player stands still.
    #[arg(long)]
    script: Option<PathBuf>,
    /// Seed for hostile wander rolls.
    #[arg(long, default_value_t = 0)]
    seed: u64,
    /// Upper bound on simulated frames.
    #[arg(long, default_value_t = 3600)]
    max_frames: u64,
    /// Print every event as a JSON line on stdout.
    #[arg(long)]
    events_json: bool,
}

/// How a session ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Outcome {
    Won,
    Lost,
    Quit,
    OutOfFrames,
}

impl Outcome {
    const fn label(self) -> &'static str {
        match self {
            Self::Won => "level cleared",
            Self::Lost => "game over",
            Self::Quit => "quit",
            Self::OutOfFrames => "frame limit reached",
        }
    }
}

struct Report {
    outcome: Outcome,
    frames: u64,
    player: ActorSnapshot,
}

/// Entry point for the Shadow Dimension command-line interface.
fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    match run(&args) {
        Ok(report) => {
            info!(outcome = ?report.outcome, frames = report.frames, "session finished");
            println!(
                "{} after {} frames; {} health {}/{}",
                report.outcome.label(),
                report.frames,
                report.player.kind.display_name(),
                report.player.health.current,
                report.player.health.max,
            );
            ExitCode::SUCCESS
        }
        Err(error) => {
            error!("{error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Report> {
    let config = load_config(args.config.as_deref())?;
    let level = fs::read_to_string(&args.level)
        .with_context(|| format!("reading level {}", args.level.display()))?;
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut arena = Arena::from_level_text(&level, &config, &mut rng)
        .with_context(|| format!("building arena from {}", args.level.display()))?;

    let script = match &args.script {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading script {}", path.display()))?;
            InputScript::parse(&text).with_context(|| format!("parsing script {}", path.display()))?
        }
        None => InputScript::default(),
    };

    let outcome = simulate(&mut arena, &script, args)?;
    Ok(Report {
        outcome,
        frames: query::tick_index(&arena),
        player: query::player(&arena),
    })
}

fn simulate(arena: &mut Arena, script: &InputScript, args: &Args) -> Result<Outcome> {
    let mut controls = Controls::default();
    let mut inputs = script.frames();
    let mut commands = Vec::new();
    let mut events = Vec::new();

    for _ in 0..args.max_frames {
        let input = inputs.next().unwrap_or_default();
        commands.clear();
        if controls.handle(&input, &mut commands) == Flow::Quit {
            return Ok(Outcome::Quit);
        }

        events.clear();
        for command in commands.drain(..) {
            world::apply(arena, command, &mut events);
        }

        if args.events_json {
            for event in &events {
                println!("{}", serde_json::to_string(event).context("encoding event")?);
            }
        }

        if query::has_lost(arena) {
            return Ok(Outcome::Lost);
        }
        if query::has_won(arena) {
            return Ok(Outcome::Won);
        }
    }

    Ok(Outcome::OutOfFrames)
}

fn load_config(path: Option<&Path>) -> Result<ArenaConfig> {
    let Some(path) = path else {
        return Ok(ArenaConfig::default());
    };

    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {}", path.display()))?;
    let config: ArenaConfig =
        toml::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("validating config {}", path.display()))?;
    Ok(config)
}
