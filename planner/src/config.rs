use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::CliArgs;

/// Everything needed to generate and plan one grid.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerConfig {
    pub rows: usize,
    pub cols: usize,
    /// Probability that any one cell starts blocked.
    pub coverage_threshold: f64,
    pub tower_radius: usize,
    /// Fixed seed for the random fill; drawn from the OS when absent.
    pub seed: Option<u64>,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            coverage_threshold: 0.3,
            tower_radius: 3,
            seed: None,
        }
    }
}

impl PlannerConfig {
    fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&contents).with_context(|| format!("failed to parse config {}", path.display()))
    }

    fn apply_overrides(mut self, args: &CliArgs) -> Self {
        if let Some(rows) = args.rows {
            self.rows = rows;
        }
        if let Some(cols) = args.cols {
            self.cols = cols;
        }
        if let Some(threshold) = args.coverage_threshold {
            self.coverage_threshold = threshold;
        }
        if let Some(radius) = args.tower_radius {
            self.tower_radius = radius;
        }
        if args.seed.is_some() {
            self.seed = args.seed;
        }
        self
    }
}

/// Load the file named by `--config`, if any, then let command-line flags override it.
pub fn load(args: &CliArgs) -> Result<PlannerConfig> {
    let config = match &args.config {
        Some(path) => {
            let config = PlannerConfig::from_file(path)?;
            log::info!("loaded config from {}", path.display());
            config
        }
        None => PlannerConfig::default(),
    };

    Ok(config.apply_overrides(args))
}
