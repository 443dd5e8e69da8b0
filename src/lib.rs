//! # Ant Colony
//!
//! A discrete-time colony simulation on a grid of dirt and water tiles.
//!
//! This library carves random rivers into a fresh grid, places a queen and her
//! workers on free dirt, and advances them one tick at a time. All randomness
//! flows through an explicit, seedable [`RandomSource`], so a seed fully
//! determines the terrain and every unit's path.

pub mod cli;
pub mod direction;
pub mod error;
pub mod rng;
pub mod simulation;
pub mod unit;
pub mod utils;
pub mod world;

pub use cli::Args;
pub use direction::Direction;
pub use error::{Result, SimError};
pub use rng::RandomSource;
pub use simulation::{create_world, Simulation};
pub use unit::{ColonyStats, Job, Unit, UnitId, UnitKind};
pub use world::{Grid, Position, TerrainKind, World, WorldConfig};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        create_world, Args, ColonyStats, Direction, Grid, Job, Position, RandomSource, Result,
        SimError, Simulation, TerrainKind, UnitId, UnitKind, World, WorldConfig,
    };
}
