use crate::error::Result;
use crate::simulation::render::render_grid;
use crate::unit::Job;
use crate::world::{Grid, TickReport, World, WorldConfig};
use colored::Colorize;
use std::time::{Duration, Instant};
use tracing::info;

/// Build a seeded simulation from the five core knobs
pub fn create_world(
    width: usize,
    height: usize,
    num_rivers: usize,
    num_initial_workers: usize,
    seed: u64,
) -> Result<Simulation> {
    Simulation::new(&WorldConfig {
        width,
        height,
        num_rivers,
        num_workers: num_initial_workers,
        seed: Some(seed),
        ..WorldConfig::default()
    })
}

/// Totals of one `Simulation::run`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub dawns: u64,
    /// Ticks that reported a visible change
    pub redraws: u64,
    pub elapsed: Duration,
}

/// A world together with the single random stream that drives it
pub struct Simulation {
    world: World,
    rng: fastrand::Rng,
    seed: u64,
}

impl Simulation {
    /// Generate a fresh world; a random seed is drawn when none is configured
    pub fn new(config: &WorldConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = fastrand::Rng::with_seed(seed);
        let world = World::generate(config, &mut rng)?;
        info!(seed, "simulation ready");
        Ok(Self { world, rng, seed })
    }

    /// Use a loaded terrain instead of a blank grid
    pub fn from_terrain(grid: Grid, config: &WorldConfig) -> Result<Self> {
        let seed = config.seed.unwrap_or_else(|| fastrand::u64(..));
        let mut rng = fastrand::Rng::with_seed(seed);
        let world = World::from_terrain(grid, config, &mut rng)?;
        info!(seed, "simulation ready");
        Ok(Self { world, rng, seed })
    }

    #[inline]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Seed the random stream was created from
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Advance one tick
    #[inline]
    pub fn tick(&mut self) -> TickReport {
        self.world.tick(&mut self.rng)
    }

    /// Run `ticks` ticks, announcing each new day unless events are suppressed
    pub fn run(&mut self, ticks: u64, suppress_events: bool) -> RunSummary {
        let start = Instant::now();
        let mut dawns = 0;
        let mut redraws = 0;

        for _ in 0..ticks {
            let report = self.tick();
            if report.state_changed {
                redraws += 1;
            }
            if report.dawn {
                dawns += 1;
                self.log_dawn(suppress_events);
            }
        }

        RunSummary {
            ticks,
            dawns,
            redraws,
            elapsed: start.elapsed(),
        }
    }

    #[inline]
    fn log_dawn(&self, suppress_events: bool) {
        if suppress_events {
            return;
        }
        let stats = self.world.stats();
        println!(
            "{} {} {}",
            "🌅".yellow(),
            format!("Day {} dawns", stats.day).bright_yellow(),
            format!("(queen age {})", stats.queen_age).cyan()
        );
    }

    /// Print the colony overlay and a one-line run summary
    pub fn print_summary(&self, summary: &RunSummary, render: bool) {
        if render {
            print!("{}", render_grid(&self.world));
        }

        println!("{}", self.world.stats());
        println!(
            "\n{}\n{} {:.3} ms {} {} {} {} {} {}",
            "===".bright_blue().bold(),
            "⏱️  Simulation Latency:".green().bold(),
            summary.elapsed.as_secs_f64() * 1000.0,
            "|".dimmed(),
            format!("seed={}", self.seed).cyan(),
            format!("ticks={}", summary.ticks).cyan(),
            format!("day={}", self.world.day()).cyan(),
            format!("redraws={}", summary.redraws).cyan(),
            format!("searching={}", self.world.count_job(Job::Searching)).cyan(),
        );
    }
}
