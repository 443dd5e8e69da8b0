use crate::direction::Direction;
use crate::error::{Result, SimError};
use crate::unit::UnitId;
use crate::world::tile::{Position, TerrainKind, Tile};

/// Fixed-size row-major array of tiles
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Create an all-dirt grid; both dimensions must be non-zero
    pub fn new(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(SimError::InvalidDimensions { width, height });
        }
        let tiles = (0..height)
            .flat_map(|y| (0..width).map(move |x| Tile::new(Position::new(x, y))))
            .collect();
        Ok(Self {
            width,
            height,
            tiles,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// Convert signed coordinates into an in-bounds position
    #[inline]
    pub fn checked_position(&self, x: isize, y: isize) -> Option<Position> {
        let pos = Position::new(usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        self.contains(pos).then_some(pos)
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        pos.y * self.width + pos.x
    }

    /// Get a tile by position
    #[inline]
    pub fn tile(&self, pos: Position) -> Option<&Tile> {
        if !self.contains(pos) {
            return None;
        }
        self.tiles.get(self.index(pos))
    }

    #[inline]
    pub(crate) fn tile_mut(&mut self, pos: Position) -> Option<&mut Tile> {
        if !self.contains(pos) {
            return None;
        }
        let idx = self.index(pos);
        self.tiles.get_mut(idx)
    }

    #[inline]
    pub fn terrain(&self, pos: Position) -> Option<TerrainKind> {
        self.tile(pos).map(|t| t.terrain)
    }

    #[inline]
    pub fn occupant(&self, pos: Position) -> Option<UnitId> {
        self.tile(pos).and_then(|t| t.occupant)
    }

    /// Out-of-bounds positions are never walkable
    #[inline]
    pub fn is_walkable(&self, pos: Position) -> bool {
        self.tile(pos).is_some_and(Tile::is_walkable)
    }

    /// Overwrite the terrain of a tile; returns false when out of bounds
    pub fn set_terrain(&mut self, pos: Position, terrain: TerrainKind) -> bool {
        match self.tile_mut(pos) {
            Some(tile) => {
                tile.terrain = terrain;
                true
            }
            None => false,
        }
    }

    /// One step from `pos`, if it stays inside the grid
    #[inline]
    pub fn neighbor(&self, pos: Position, direction: Direction) -> Option<Position> {
        let (dx, dy) = direction.delta();
        self.checked_position(pos.x as isize + dx, pos.y as isize + dy)
    }

    /// In-bounds orthogonal neighbours, Right, Left, Up, Down. No wraparound.
    pub fn adjacent_tiles(&self, pos: Position) -> impl Iterator<Item = Position> + '_ {
        Direction::ADJACENCY
            .into_iter()
            .filter_map(move |dir| self.neighbor(pos, dir))
    }

    pub fn tiles(&self) -> impl Iterator<Item = &Tile> + '_ {
        self.tiles.iter()
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> + '_ {
        self.tiles.chunks(self.width)
    }

    pub fn count_terrain(&self, terrain: TerrainKind) -> usize {
        self.tiles.iter().filter(|t| t.terrain == terrain).count()
    }

    pub fn count_walkable(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_walkable()).count()
    }

    /// Whether two grids carry the same terrain layout
    pub fn same_terrain(&self, other: &Grid) -> bool {
        self.width == other.width
            && self.height == other.height
            && self
                .tiles
                .iter()
                .zip(&other.tiles)
                .all(|(a, b)| a.terrain == b.terrain)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_creation() {
        let grid = Grid::new(4, 3).unwrap();

        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.tiles().count(), 12);
        assert_eq!(grid.count_terrain(TerrainKind::Dirt), 12);
        for tile in grid.tiles() {
            assert_eq!(grid.tile(tile.pos).unwrap().pos, tile.pos);
        }
    }

    #[test]
    fn test_zero_dimension_rejected() {
        assert!(matches!(
            Grid::new(0, 5),
            Err(SimError::InvalidDimensions { width: 0, height: 5 })
        ));
        assert!(Grid::new(5, 0).is_err());
    }

    #[test]
    fn test_out_of_bounds_lookup() {
        let grid = Grid::new(2, 2).unwrap();

        assert!(grid.tile(Position::new(2, 0)).is_none());
        assert!(grid.tile(Position::new(0, 2)).is_none());
        assert!(!grid.is_walkable(Position::new(5, 5)));
        assert_eq!(grid.checked_position(-1, 0), None);
        assert_eq!(grid.checked_position(1, 1), Some(Position::new(1, 1)));
    }

    #[test]
    fn test_adjacent_tiles_interior() {
        let grid = Grid::new(3, 3).unwrap();
        let adj: Vec<_> = grid.adjacent_tiles(Position::new(1, 1)).collect();

        assert_eq!(
            adj,
            vec![
                Position::new(2, 1),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 2),
            ]
        );
    }

    #[test]
    fn test_adjacent_tiles_corner_has_no_wraparound() {
        let grid = Grid::new(3, 3).unwrap();
        let adj: Vec<_> = grid.adjacent_tiles(Position::new(0, 0)).collect();

        assert_eq!(adj, vec![Position::new(1, 0), Position::new(0, 1)]);
    }

    #[test]
    fn test_single_tile_grid_has_no_neighbors() {
        let grid = Grid::new(1, 1).unwrap();
        assert_eq!(grid.adjacent_tiles(Position::new(0, 0)).count(), 0);
    }

    #[test]
    fn test_set_terrain() {
        let mut grid = Grid::new(2, 2).unwrap();

        assert!(grid.set_terrain(Position::new(1, 0), TerrainKind::Water));
        assert!(!grid.set_terrain(Position::new(2, 0), TerrainKind::Water));
        assert_eq!(grid.terrain(Position::new(1, 0)), Some(TerrainKind::Water));
        assert!(!grid.is_walkable(Position::new(1, 0)));
        assert_eq!(grid.count_walkable(), 3);
    }
}
