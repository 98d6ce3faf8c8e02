use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use itertools::Itertools;
use towerlink::{fill, CityGrid, Location};

mod config;

/// Generate a random city grid, place coverage towers on it, and print the shortest tower-to-tower routes.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub(crate) struct CliArgs {
    /// Number of grid rows [default: 10].
    #[arg(short = 'n', long, value_name = "ROWS")]
    rows: Option<usize>,
    /// Number of grid columns [default: 10].
    #[arg(short = 'm', long, value_name = "COLUMNS")]
    cols: Option<usize>,
    /// Probability that a cell starts blocked, in [0, 1] [default: 0.3].
    #[arg(long = "coverage-threshold", value_name = "PROBABILITY")]
    coverage_threshold: Option<f64>,
    /// Cells a tower reaches in every direction [default: 3].
    #[arg(long = "tower-radius", value_name = "CELLS")]
    tower_radius: Option<usize>,
    /// Seed for a reproducible grid.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,
    /// TOML file providing any of the above; flags take precedence.
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<PathBuf>,
}

/// One output line for the route from `start` to `end`, where `path` excludes `end`.
fn route_line(start: Location, end: Location, path: &[Location]) -> String {
    format!(
        "shortest path between tower {} and tower {}: {}",
        start,
        end,
        path.iter().chain([&end]).join(" -> "),
    )
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let config = config::load(&args)?;
    log::debug!("{:?}", config);

    let mut grid = match config.seed {
        Some(seed) => CityGrid::new(config.rows, config.cols, config.tower_radius, fill::seeded(config.coverage_threshold, seed)?)?,
        None => CityGrid::new(config.rows, config.cols, config.tower_radius, fill::entropy(config.coverage_threshold)?)?,
    };
    println!("{}", grid);

    let placed = grid.optimize();
    for (state, count) in grid.census() {
        log::info!("{}: {}", state, count);
    }
    println!("{} towers placed\n{}", placed.len(), grid);

    let paths = grid.shortest_paths();
    for (start, end, path) in paths.iter() {
        println!("{}", route_line(start, end, path));
    }

    Ok(())
}
