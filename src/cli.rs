use crate::error::Result;
use crate::utils::{DEFAULT_HEIGHT, DEFAULT_RIVERS, DEFAULT_WIDTH, DEFAULT_WORKERS, TICKS_PER_DAY};
use crate::world::{RiverParams, WorldConfig};
use clap::Parser;

/// CLI arguments for the colony simulation
#[derive(Parser, Debug)]
#[command(name = "ant_colony", about = "🐜 Grid ant colony simulator")]
pub struct Args {
    /// Grid width in tiles
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Number of rivers to carve
    #[arg(short = 'r', long = "rivers", default_value_t = DEFAULT_RIVERS)]
    pub rivers: usize,

    /// Number of initial workers
    #[arg(short = 'n', long = "workers", default_value_t = DEFAULT_WORKERS)]
    pub workers: usize,

    /// Ticks to simulate
    #[arg(short = 't', long, default_value_t = TICKS_PER_DAY * 3)]
    pub ticks: u64,

    /// Random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Terrain map to start from instead of a blank grid
    #[arg(short = 'm', long = "map")]
    pub map: Option<String>,

    /// Write the final terrain map here
    #[arg(short = 'o', long = "output")]
    pub output: Option<String>,

    /// Print the coloured grid after the run
    #[arg(long, default_value_t = false)]
    pub render: bool,

    /// Chance (permille) that a river keeps its heading
    #[arg(long, default_value_t = 800, value_parser = clap::value_parser!(u16).range(0..=1000))]
    pub straight_permille: u16,

    /// Suppress day logs (for benchmarks)
    #[arg(long, default_value_t = false)]
    pub suppress_events: bool,
}

impl Args {
    /// World settings described by these arguments
    pub fn world_config(&self) -> Result<WorldConfig> {
        Ok(WorldConfig {
            width: self.width,
            height: self.height,
            num_rivers: self.rivers,
            num_workers: self.workers,
            seed: self.seed,
            river: RiverParams::with_straight(usize::from(self.straight_permille))?,
        })
    }
}
