//! Cosmogen CLI - generate a full universe document as JSON
//!
//! Generates the star population, every planetary system, nebulas, and warp
//! lanes for a seed, then writes the bundled document to disk. Useful as a
//! canonical-universe exporter and as a smoke test of the whole pipeline.

use std::path::PathBuf;

use clap::Parser;

use cosmogen::core::config::GenerationConfig;
use cosmogen::core::error::Result;
use cosmogen::nebula::generate_nebulas;
use cosmogen::starfield::{generate_stars, SHELL_MAX_RADIUS};
use cosmogen::system::generate_systems;
use cosmogen::universe::UniverseDocument;
use cosmogen::warp::generate_warp_lanes_with;

/// Deterministic universe generator
#[derive(Parser, Debug)]
#[command(name = "cosmogen")]
#[command(about = "Generate a deterministic universe and write it as JSON")]
struct Args {
    /// Galaxy seed; drawn from entropy when omitted
    #[arg(long)]
    seed: Option<i64>,

    /// Number of stars to generate
    #[arg(long, default_value_t = 500)]
    stars: usize,

    /// Number of nebulas to place
    #[arg(long, default_value_t = 40)]
    nebulas: usize,

    /// Number of warp lanes to build
    #[arg(long, default_value_t = 6)]
    lanes: usize,

    /// Output path for the universe document
    #[arg(long, default_value = "universe.json")]
    output: PathBuf,

    /// Optional TOML config overriding warp lane tunables
    #[arg(long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cosmogen=info".into()),
        )
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GenerationConfig::from_toml_file(path)?,
        None => GenerationConfig::default(),
    };

    // Entropy seeds stay within u32 so stream arithmetic keeps f64-exact
    // integers; reproducing a run only needs the logged value.
    let seed = args.seed.unwrap_or_else(|| rand::random::<u32>() as i64);
    tracing::info!(seed, stars = args.stars, "generating universe");

    let stars = generate_stars(seed, args.stars);
    let systems = generate_systems(&stars, seed)?;
    let nebulas = generate_nebulas(seed, args.nebulas, Some(&stars))?;
    let warp_lanes = generate_warp_lanes_with(&stars, SHELL_MAX_RADIUS, args.lanes, &config.warp)?;

    let planet_count: usize = systems.iter().map(|s| s.planets.len()).sum();
    let belt_count: usize = systems.iter().map(|s| s.belts.len()).sum();
    tracing::info!(
        stars = stars.len(),
        planets = planet_count,
        belts = belt_count,
        nebulas = nebulas.len(),
        lanes = warp_lanes.len(),
        "generation complete"
    );
    if warp_lanes.len() < args.lanes {
        tracing::warn!(
            requested = args.lanes,
            built = warp_lanes.len(),
            "fewer warp lanes than requested"
        );
    }

    let document = UniverseDocument::new(seed, stars, systems, nebulas, warp_lanes);
    document.save_to_file(&args.output)?;
    tracing::info!(path = %args.output.display(), "universe document written");

    Ok(())
}
