use crate::unit::UnitId;

/// Integer grid coordinate
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    #[inline]
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TerrainKind {
    Dirt,
    Water,
}

impl TerrainKind {
    /// Whether units may stand on this terrain
    #[inline]
    pub const fn is_passable(self) -> bool {
        matches!(self, TerrainKind::Dirt)
    }

    /// Map glyph
    pub const fn glyph(self) -> char {
        match self {
            TerrainKind::Dirt => '.',
            TerrainKind::Water => '~',
        }
    }

    pub const fn from_glyph(c: char) -> Option<TerrainKind> {
        match c {
            '.' => Some(TerrainKind::Dirt),
            '~' => Some(TerrainKind::Water),
            _ => None,
        }
    }
}

/// Grid cell: terrain plus at most one occupant
#[derive(Clone, Debug)]
pub struct Tile {
    pub pos: Position,
    pub terrain: TerrainKind,
    pub occupant: Option<UnitId>,
}

impl Tile {
    /// Create an unoccupied dirt tile
    #[inline]
    pub fn new(pos: Position) -> Self {
        Self {
            pos,
            terrain: TerrainKind::Dirt,
            occupant: None,
        }
    }

    /// Dirt and nobody standing on it
    #[inline]
    pub fn is_walkable(&self) -> bool {
        self.terrain.is_passable() && self.occupant.is_none()
    }
}
