//! Grove - headless forest driver
//!
//! Usage: cargo run --release -- [OPTIONS]
//!
//! Options:
//!   --followers <N>     Sample follower count (default: 250)
//!   --seed <SEED>       Placement seed (default: 12345)
//!   --profile <NAME>    Terrain profile: normal, hills, valleys
//!   --quality <NAME>    Quality: medium, high, ultra
//!   --config <PATH>     Load a ForestConfig JSON file
//!   --import <PATH>     Import followers instead of generating samples
//!   --export <PATH>     Write the resulting followers to disk
//!   --frames <N>        Frames to simulate at 60 Hz (default: 120)

use std::path::PathBuf;

use grove::core::logging;
use grove::forest::{ForestCore, Quality};
use grove::generation::ForestConfig;
use grove::terrain::TerrainProfile;

fn main() {
    logging::init();

    if let Err(e) = run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

fn run() -> grove::core::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    let mut config = match parse_str_arg(&args, "--config") {
        Some(path) => ForestConfig::from_json(&std::fs::read_to_string(path)?)?,
        None => ForestConfig::default(),
    };
    if let Some(seed) = parse_u64_arg(&args, "--seed") {
        config.seed = seed;
    }
    if let Some(profile) = parse_str_arg(&args, "--profile").and_then(|s| parse_profile(&s)) {
        config.terrain = config.terrain.with_profile(profile);
    }
    if let Some(quality) = parse_str_arg(&args, "--quality").and_then(|s| parse_quality(&s)) {
        config.quality = quality;
    }
    let followers = parse_usize_arg(&args, "--followers").unwrap_or(250);
    let frames = parse_usize_arg(&args, "--frames").unwrap_or(120);

    let start = std::time::Instant::now();
    let mut forest = ForestCore::new(config)?;
    let (lo, hi) = forest.heightfield().height_bounds();
    log::info!("Terrain ready in {:.1}ms, heights {:.2}..{:.2}",
        start.elapsed().as_secs_f64() * 1000.0, lo, hi);

    match parse_str_arg(&args, "--import") {
        Some(path) => {
            forest.load(&PathBuf::from(path))?;
        }
        None => {
            forest.set_follower_count(followers);
        }
    }

    if let Err(e) = forest.add_follower("Grove Keeper") {
        log::warn!("Could not add keeper: {}", e);
    }

    for _ in 0..frames {
        forest.tick(1.0 / 60.0);
    }

    let stats = forest.stats();
    let progress = forest.progress();
    log::info!("{} followers, {} trees, chapter {} ({:.0}% full)",
        stats.follower_count, stats.tree_count, stats.current_chapter, progress.fraction * 100.0);
    for chapter in &stats.per_chapter {
        log::info!("  chapter {}: {}/{} trees placed", chapter.id, chapter.placed, chapter.owed);
    }
    let frame = forest.clock().stats();
    log::info!("Simulated {} frames ({:.1} fps avg)", frame.frame_count, frame.avg_fps);

    if let Some(path) = parse_str_arg(&args, "--export") {
        forest.save(&PathBuf::from(path))?;
    }

    Ok(())
}

fn parse_profile(name: &str) -> Option<TerrainProfile> {
    match name.to_ascii_lowercase().as_str() {
        "normal" => Some(TerrainProfile::Normal),
        "hills" => Some(TerrainProfile::Hills),
        "valleys" => Some(TerrainProfile::Valleys),
        other => {
            log::warn!("Unknown terrain profile '{}', keeping default", other);
            None
        }
    }
}

fn parse_quality(name: &str) -> Option<Quality> {
    match name.to_ascii_lowercase().as_str() {
        "medium" => Some(Quality::Medium),
        "high" => Some(Quality::High),
        "ultra" => Some(Quality::Ultra),
        other => {
            log::warn!("Unknown quality '{}', keeping default", other);
            None
        }
    }
}

fn parse_u64_arg(args: &[String], flag: &str) -> Option<u64> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_usize_arg(args: &[String], flag: &str) -> Option<usize> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .and_then(|s| s.parse().ok())
}

fn parse_str_arg(args: &[String], flag: &str) -> Option<String> {
    args.iter().position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .cloned()
}
