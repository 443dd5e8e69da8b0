use crate::unit::UnitKind;
use crate::world::{Position, TerrainKind, World};
use colored::{ColoredString, Colorize};

/// What a tile shows; a unit hides the terrain under it
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileColor {
    Queen,
    Worker,
    Dirt,
    Water,
}

impl TileColor {
    /// RGBA in `[0, 1]`
    pub const fn rgba(self) -> [f32; 4] {
        match self {
            TileColor::Queen => [1.0, 0.0, 1.0, 1.0],
            TileColor::Worker => [0.0, 0.8, 0.0, 1.0],
            TileColor::Dirt => [0.6, 0.4, 0.2, 1.0],
            TileColor::Water => [0.0, 0.6, 1.0, 1.0],
        }
    }

    pub const fn glyph(self) -> char {
        match self {
            TileColor::Queen => 'Q',
            TileColor::Worker => 'w',
            TileColor::Dirt => '.',
            TileColor::Water => '~',
        }
    }

    /// Glyph painted for a terminal
    pub fn paint(self) -> ColoredString {
        let [r, g, b, _] = self.rgba();
        let s = self.glyph().to_string();
        let (r, g, b) = ((r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8);
        match self {
            TileColor::Queen => s.truecolor(r, g, b).bold(),
            _ => s.truecolor(r, g, b),
        }
    }
}

impl From<TerrainKind> for TileColor {
    fn from(kind: TerrainKind) -> Self {
        match kind {
            TerrainKind::Dirt => TileColor::Dirt,
            TerrainKind::Water => TileColor::Water,
        }
    }
}

impl From<UnitKind> for TileColor {
    fn from(kind: UnitKind) -> Self {
        match kind {
            UnitKind::Queen => TileColor::Queen,
            UnitKind::Worker { .. } => TileColor::Worker,
        }
    }
}

/// Colour of the tile at `pos`, `None` off the grid
pub fn tile_color(world: &World, pos: Position) -> Option<TileColor> {
    let tile = world.grid().tile(pos)?;
    Some(match tile.occupant.and_then(|id| world.unit(id)) {
        Some(unit) => unit.kind.into(),
        None => tile.terrain.into(),
    })
}

fn render_with<F>(world: &World, mut cell: F) -> String
where
    F: FnMut(TileColor, &mut String),
{
    let grid = world.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for row in grid.rows() {
        for tile in row {
            if let Some(color) = tile_color(world, tile.pos) {
                cell(color, &mut out);
            }
        }
        out.push('\n');
    }
    out
}

/// Whole grid as coloured glyphs, one line per row
pub fn render_grid(world: &World) -> String {
    render_with(world, |color, out| out.push_str(&color.paint().to_string()))
}

/// Whole grid as bare glyphs
pub fn render_plain(world: &World) -> String {
    render_with(world, |color, out| out.push(color.glyph()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::Job;
    use crate::world::parse_terrain_from_str;

    #[test]
    fn test_unit_color_wins_over_terrain() {
        let grid = parse_terrain_from_str("..~\n").unwrap();
        let world =
            World::with_units(grid, Position::new(0, 0), &[Position::new(1, 0)]).unwrap();

        assert_eq!(tile_color(&world, Position::new(0, 0)), Some(TileColor::Queen));
        assert_eq!(tile_color(&world, Position::new(1, 0)), Some(TileColor::Worker));
        assert_eq!(tile_color(&world, Position::new(2, 0)), Some(TileColor::Water));
        assert_eq!(tile_color(&world, Position::new(3, 0)), None);
    }

    #[test]
    fn test_render_plain_layout() {
        let grid = parse_terrain_from_str("...\n~~.\n").unwrap();
        let world =
            World::with_units(grid, Position::new(1, 0), &[Position::new(2, 1)]).unwrap();

        assert_eq!(render_plain(&world), ".Q.\n~~w\n");
    }

    #[test]
    fn test_render_grid_keeps_glyphs() {
        let grid = parse_terrain_from_str("..\n").unwrap();
        let world = World::with_units(grid, Position::new(0, 0), &[]).unwrap();
        let rendered = render_grid(&world);

        assert!(rendered.contains('Q'));
        assert!(rendered.contains('.'));
        assert!(rendered.ends_with('\n'));
    }

    #[test]
    fn test_kind_conversions() {
        assert_eq!(TileColor::from(UnitKind::Queen), TileColor::Queen);
        assert_eq!(
            TileColor::from(UnitKind::Worker { job: Job::Searching }),
            TileColor::Worker
        );
        assert_eq!(TileColor::from(TerrainKind::Water).rgba(), [0.0, 0.6, 1.0, 1.0]);
    }
}
