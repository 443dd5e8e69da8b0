pub mod engine;
pub mod render;

pub use engine::{create_world, RunSummary, Simulation};
pub use render::{render_grid, render_plain, tile_color, TileColor};
