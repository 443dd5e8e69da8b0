//! Procedural river carving.
//!
//! Each river is a random walk that starts on a random dirt tile, fixes a
//! heading after its first tile and then mostly keeps it, occasionally turning
//! to a perpendicular heading. The walk stops with a probability that grows
//! with its length, or gives up after too many rejected candidates in a row.

use crate::direction::Direction;
use crate::error::{Result, SimError};
use crate::rng::RandomSource;
use crate::utils::PERMILLE;
use crate::world::grid::Grid;
use crate::world::tile::{Position, TerrainKind};
use tracing::debug;

/// Tunable knobs of the river walk
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RiverParams {
    /// Chance (permille) of keeping the initial heading
    pub straight_permille: usize,
    /// Chance (permille) of turning clockwise; the rest turns counter-clockwise
    pub clockwise_permille: usize,
    /// Rejected candidates tolerated in a row before the river is abandoned
    pub max_retries: usize,
    /// A termination draw below this stops the river
    pub stop_threshold: usize,
}

impl Default for RiverParams {
    fn default() -> Self {
        Self {
            straight_permille: 800,
            clockwise_permille: 100,
            max_retries: 20,
            stop_threshold: 5,
        }
    }
}

impl RiverParams {
    /// Straight weight with the remainder split evenly between both turns
    pub fn with_straight(straight_permille: usize) -> Result<Self> {
        let params = Self {
            straight_permille,
            clockwise_permille: PERMILLE.saturating_sub(straight_permille) / 2,
            ..Self::default()
        };
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        if self.straight_permille + self.clockwise_permille > PERMILLE {
            return Err(SimError::InvalidRiverParams(format!(
                "straight {} + clockwise {} exceeds {PERMILLE}",
                self.straight_permille, self.clockwise_permille
            )));
        }
        Ok(())
    }

    /// Weighted heading for every tile after the first
    fn next_heading<R: RandomSource + ?Sized>(&self, initial: Direction, rng: &mut R) -> Direction {
        let roll = rng.next_uniform_int(0, PERMILLE);
        if roll < self.straight_permille {
            initial
        } else if roll < self.straight_permille + self.clockwise_permille {
            initial.clockwise()
        } else {
            initial.counter_clockwise()
        }
    }
}

/// Tiles carved by one river, in placement order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct River {
    pub tiles: Vec<Position>,
    /// Gave up after too many rejected candidates
    pub aborted: bool,
}

impl River {
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn source(&self) -> Option<Position> {
        self.tiles.first().copied()
    }
}

/// Carves water paths into a grid
#[derive(Clone, Copy, Debug, Default)]
pub struct RiverGenerator {
    params: RiverParams,
}

impl RiverGenerator {
    pub fn new(params: RiverParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &RiverParams {
        &self.params
    }

    /// Carve `count` independent rivers
    pub fn carve<R: RandomSource + ?Sized>(
        &self,
        grid: &mut Grid,
        count: usize,
        rng: &mut R,
    ) -> Vec<River> {
        (0..count).map(|_| self.carve_river(grid, rng)).collect()
    }

    /// Carve a single river.
    ///
    /// A rejected candidate (off the grid, or already water) still moves the
    /// cursor, so a river can pass under water it runs into and resume on the
    /// far side. Existing water is never overwritten.
    pub fn carve_river<R: RandomSource + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> River {
        let span = grid.width() + grid.height();
        let mut river = River::default();
        let mut heading: Option<Direction> = None;
        let mut initial: Option<Direction> = None;
        let mut cursor: (isize, isize) = (0, 0);
        let mut repeats = 0usize;

        loop {
            let pos = loop {
                if repeats > self.params.max_retries {
                    debug!(
                        length = river.len(),
                        repeats, "river abandoned after repeated rejections"
                    );
                    river.aborted = true;
                    return river;
                }
                cursor = match heading {
                    None => (
                        rng.next_uniform_int(0, grid.width()) as isize,
                        rng.next_uniform_int(0, grid.height()) as isize,
                    ),
                    Some(dir) => {
                        let (dx, dy) = dir.delta();
                        (cursor.0 + dx, cursor.1 + dy)
                    }
                };
                match grid.checked_position(cursor.0, cursor.1) {
                    Some(p) if grid.terrain(p) == Some(TerrainKind::Dirt) => break p,
                    _ => repeats += 1,
                }
            };

            grid.set_terrain(pos, TerrainKind::Water);
            repeats = 0;
            river.tiles.push(pos);

            heading = Some(match initial {
                None => {
                    let dir = rng.next_uniform_direction();
                    initial = Some(dir);
                    dir
                }
                Some(init) => self.params.next_heading(init, rng),
            });

            // stopping gets likelier as the river approaches width + height tiles
            let remaining = span.saturating_sub(river.len()).max(1);
            if rng.next_uniform_int(0, remaining) < self.params.stop_threshold {
                debug!(
                    length = river.len(),
                    source = ?river.source(),
                    heading = initial.map_or("none", Direction::as_str),
                    "river carved"
                );
                return river;
            }
        }
    }
}
