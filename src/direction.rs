/// The four river headings.
///
/// Discriminants are the 1-based codes used by the turn formulas:
/// clockwise is `(code + 2) % 4 + 1` and counter-clockwise is `(code + 4) % 4 + 1`.
/// Neither formula ever yields the reverse heading.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    Up = 1,
    Left = 2,
    Down = 3,
    Right = 4,
}

impl Direction {
    /// All directions in code order
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Left,
        Direction::Down,
        Direction::Right,
    ];

    /// Neighbour scan order used by `Grid::adjacent_tiles`
    pub const ADJACENCY: [Direction; 4] = [
        Direction::Right,
        Direction::Left,
        Direction::Up,
        Direction::Down,
    ];

    /// 1-based code
    #[inline]
    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Inverse of [`Direction::code`]
    pub const fn from_code(code: u8) -> Option<Direction> {
        match code {
            1 => Some(Direction::Up),
            2 => Some(Direction::Left),
            3 => Some(Direction::Down),
            4 => Some(Direction::Right),
            _ => None,
        }
    }

    #[inline]
    pub const fn clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    #[inline]
    pub const fn counter_clockwise(self) -> Direction {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    #[inline]
    pub const fn opposite(self) -> Direction {
        self.clockwise().clockwise()
    }

    /// Unit step `(dx, dy)`; y grows downwards
    #[inline]
    pub const fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Down => (0, 1),
            Direction::Right => (1, 0),
        }
    }

    /// Get direction name as string
    pub const fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Left => "left",
            Direction::Down => "down",
            Direction::Right => "right",
        }
    }
}
