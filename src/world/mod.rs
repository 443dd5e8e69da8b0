pub mod grid;
pub mod parser;
pub mod river;
pub mod tile;
pub mod world;

pub use grid::Grid;
pub use parser::{parse_terrain, parse_terrain_from_str, terrain_to_string, write_terrain};
pub use river::{River, RiverGenerator, RiverParams};
pub use tile::{Position, TerrainKind, Tile};
pub use world::{TickReport, World, WorldConfig};
