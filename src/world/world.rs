use crate::error::{Result, SimError};
use crate::rng::RandomSource;
use crate::unit::{ColonyStats, Job, Queen, Unit, UnitId, UnitKind};
use crate::utils::{
    DEFAULT_HEIGHT, DEFAULT_RIVERS, DEFAULT_WIDTH, DEFAULT_WORKERS, FIRST_DAY, TICKS_PER_DAY,
};
use crate::world::grid::Grid;
use crate::world::river::{RiverGenerator, RiverParams};
use crate::world::tile::{Position, TerrainKind};
use tracing::{debug, info, trace};

/// Everything needed to build a world
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    pub width: usize,
    pub height: usize,
    pub num_rivers: usize,
    pub num_workers: usize,
    /// Drawn at random when absent
    pub seed: Option<u64>,
    pub river: RiverParams,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            num_rivers: DEFAULT_RIVERS,
            num_workers: DEFAULT_WORKERS,
            seed: None,
            river: RiverParams::default(),
        }
    }
}

/// Outcome of one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Something visible changed and a redraw is due
    pub state_changed: bool,
    /// This tick started a new day
    pub dawn: bool,
}

/// Grid plus unit arena.
///
/// Tiles store the id of their occupant and units store their position; both
/// sides are only written together, by spawning or by [`World::move_to`].
#[derive(Clone, Debug)]
pub struct World {
    grid: Grid,
    units: Vec<Unit>,
    queen: Queen,
    ticks: u64,
    day: u64,
    state_changed: bool,
}

impl World {
    /// Blank grid, carved rivers, randomly placed colony
    pub fn generate<R: RandomSource + ?Sized>(config: &WorldConfig, rng: &mut R) -> Result<Self> {
        let grid = Grid::new(config.width, config.height)?;
        Self::from_terrain(grid, config, rng)
    }

    /// Carve `config.num_rivers` rivers into an existing terrain, then spawn the
    /// queen and her workers on random walkable tiles. The grid's own size wins
    /// over `config.width`/`config.height`.
    pub fn from_terrain<R: RandomSource + ?Sized>(
        mut grid: Grid,
        config: &WorldConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.river.validate()?;
        let rivers = RiverGenerator::new(config.river).carve(&mut grid, config.num_rivers, rng);
        let aborted = rivers.iter().filter(|r| r.aborted).count();

        let mut world = Self::empty(grid);
        world.spawn_at_random_walkable(UnitKind::Queen, rng)?;
        for _ in 0..config.num_workers {
            let id = world.spawn_at_random_walkable(
                UnitKind::Worker {
                    job: Job::Resting,
                },
                rng,
            )?;
            world.queen.workers.push(id);
        }

        info!(
            width = world.grid.width(),
            height = world.grid.height(),
            rivers = rivers.len(),
            aborted,
            water = world.grid.count_terrain(TerrainKind::Water),
            workers = world.queen.num_workers(),
            "world created"
        );
        Ok(world)
    }

    /// Place the queen and workers at explicit positions, in roster order
    pub fn with_units(grid: Grid, queen: Position, workers: &[Position]) -> Result<Self> {
        let mut world = Self::empty(grid);
        world.spawn_at(UnitKind::Queen, queen)?;
        for &pos in workers {
            let id = world.spawn_at(
                UnitKind::Worker {
                    job: Job::Resting,
                },
                pos,
            )?;
            world.queen.workers.push(id);
        }
        Ok(world)
    }

    fn empty(grid: Grid) -> Self {
        Self {
            grid,
            units: Vec::new(),
            queen: Queen::new(UnitId(0)),
            ticks: 0,
            day: FIRST_DAY,
            state_changed: false,
        }
    }

    /// Keep drawing coordinates until one is walkable. Fails up front when the
    /// grid has no walkable tile left, so the draw loop always terminates.
    fn spawn_at_random_walkable<R: RandomSource + ?Sized>(
        &mut self,
        kind: UnitKind,
        rng: &mut R,
    ) -> Result<UnitId> {
        if self.grid.count_walkable() == 0 {
            return Err(SimError::NoWalkableTile {
                kind,
                placed: self.units.len(),
            });
        }
        let pos = loop {
            let pos = Position::new(
                rng.next_uniform_int(0, self.grid.width()),
                rng.next_uniform_int(0, self.grid.height()),
            );
            if self.grid.is_walkable(pos) {
                break pos;
            }
        };
        self.spawn_at(kind, pos)
    }

    fn spawn_at(&mut self, kind: UnitKind, pos: Position) -> Result<UnitId> {
        if !self.grid.is_walkable(pos) {
            return Err(SimError::TileNotWalkable { x: pos.x, y: pos.y });
        }
        let id = UnitId(self.units.len() as u32);
        if let Some(tile) = self.grid.tile_mut(pos) {
            tile.occupant = Some(id);
        }
        self.units.push(Unit::new(id, kind, pos));
        if kind == UnitKind::Queen {
            self.queen.id = id;
        }
        debug!(id = id.0, ?kind, x = pos.x, y = pos.y, "unit spawned");
        Ok(id)
    }

    /// Move a unit onto `dest`.
    ///
    /// Returns false and changes nothing when `dest` is water, occupied, off the
    /// grid, or the unit does not exist.
    pub fn move_to(&mut self, id: UnitId, dest: Position) -> bool {
        if !self.grid.is_walkable(dest) {
            return false;
        }
        let Some(from) = self.units.get(id.index()).map(Unit::pos) else {
            return false;
        };

        if let Some(tile) = self.grid.tile_mut(from) {
            if tile.occupant == Some(id) {
                tile.occupant = None;
            }
        }
        if let Some(tile) = self.grid.tile_mut(dest) {
            tile.occupant = Some(id);
        }
        self.units[id.index()].set_pos(dest);
        self.state_changed = true;

        trace!(id = id.0, from = ?from, to = ?dest, "unit moved");
        true
    }

    /// Advance one tick: day bookkeeping, queen, then workers in roster order
    pub fn tick<R: RandomSource + ?Sized>(&mut self, rng: &mut R) -> TickReport {
        self.ticks += 1;
        let dawn = self.ticks % TICKS_PER_DAY == 0;
        if dawn {
            self.day += 1;
            self.queen.age += 1;
            self.state_changed = true;
            debug!(day = self.day, queen_age = self.queen.age, "dawn");
        }

        self.dispatch_worker(Job::Searching);
        for i in 0..self.queen.workers.len() {
            let id = self.queen.workers[i];
            self.worker_tick(id, rng);
        }

        let report = TickReport {
            state_changed: self.state_changed,
            dawn,
        };
        self.state_changed = false;
        report
    }

    /// Send the first resting worker to the last unoccupied tile next to the
    /// queen. The job changes even when the tile turns out to be water and the
    /// move fails.
    fn dispatch_worker(&mut self, job: Job) -> Option<UnitId> {
        let queen_pos = self.units.get(self.queen.id.index())?.pos();
        let vacant = self
            .grid
            .adjacent_tiles(queen_pos)
            .filter(|&p| self.grid.occupant(p).is_none())
            .last()?;
        let id = self
            .queen
            .workers
            .iter()
            .copied()
            .find(|id| self.units[id.index()].job() == Some(Job::Resting))?;

        let moved = self.move_to(id, vacant);
        self.units[id.index()].kind = UnitKind::Worker { job };
        debug!(id = id.0, ?job, moved, x = vacant.x, y = vacant.y, "worker dispatched");
        Some(id)
    }

    fn worker_tick<R: RandomSource + ?Sized>(&mut self, id: UnitId, rng: &mut R) {
        let unit = &self.units[id.index()];
        match unit.job() {
            Some(Job::Searching) => {
                let pos = unit.pos();
                let mut opts = [Position::default(); 4];
                let mut k = 0usize;
                for p in self.grid.adjacent_tiles(pos) {
                    if self.grid.is_walkable(p) {
                        opts[k] = p;
                        k += 1;
                    }
                }
                if k == 0 {
                    return;
                }
                let dest = opts[rng.next_uniform_int(0, k)];
                if !self.move_to(id, dest) {
                    trace!(id = id.0, "worker move blocked");
                }
            }
            Some(Job::Resting) | None => {}
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    #[inline]
    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.index())
    }

    #[inline]
    pub fn queen(&self) -> &Queen {
        &self.queen
    }

    pub fn workers(&self) -> impl Iterator<Item = &Unit> + '_ {
        self.queen.workers.iter().filter_map(|&id| self.unit(id))
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn day(&self) -> u64 {
        self.day
    }

    pub fn tile_kind(&self, x: usize, y: usize) -> Option<TerrainKind> {
        self.grid.terrain(Position::new(x, y))
    }

    pub fn is_walkable(&self, x: usize, y: usize) -> bool {
        self.grid.is_walkable(Position::new(x, y))
    }

    pub fn occupant_at(&self, x: usize, y: usize) -> Option<UnitId> {
        self.grid.occupant(Position::new(x, y))
    }

    pub fn count_job(&self, job: Job) -> usize {
        self.workers().filter(|u| u.job() == Some(job)).count()
    }

    pub fn stats(&self) -> ColonyStats {
        ColonyStats {
            day: self.day,
            queen_age: self.queen.age,
            hunger: self.queen.hunger,
            thirst: self.queen.thirst,
            food: self.queen.food,
            water: self.queen.water,
            egg_count: self.queen.eggs,
            larva_count: self.queen.larvae,
            worker_count: self.queen.num_workers(),
        }
    }

    /// Every occupied tile points at a unit standing on it, and every unit's
    /// tile points back at the unit.
    pub fn is_consistent(&self) -> bool {
        let tiles_ok = self.grid.tiles().all(|t| match t.occupant {
            None => true,
            Some(id) => self.unit(id).is_some_and(|u| u.pos() == t.pos),
        });
        let units_ok = self
            .units
            .iter()
            .all(|u| self.grid.occupant(u.pos()) == Some(u.id));
        tiles_ok && units_ok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::scripted::Scripted;
    use crate::world::parser::parse_terrain_from_str;

    fn open_world(width: usize, height: usize, queen: Position, workers: &[Position]) -> World {
        World::with_units(Grid::new(width, height).unwrap(), queen, workers).unwrap()
    }

    #[test]
    fn test_with_units_places_roster() {
        let world = open_world(5, 5, Position::new(2, 2), &[Position::new(0, 0), Position::new(4, 4)]);

        assert_eq!(world.units().len(), 3);
        assert_eq!(world.queen().id, UnitId(0));
        assert_eq!(world.queen().workers, vec![UnitId(1), UnitId(2)]);
        assert_eq!(world.occupant_at(2, 2), Some(UnitId(0)));
        assert_eq!(world.occupant_at(4, 4), Some(UnitId(2)));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_with_units_rejects_water_and_collisions() {
        let grid = parse_terrain_from_str("~..\n").unwrap();
        assert!(matches!(
            World::with_units(grid.clone(), Position::new(0, 0), &[]),
            Err(SimError::TileNotWalkable { x: 0, y: 0 })
        ));
        assert!(matches!(
            World::with_units(grid, Position::new(1, 0), &[Position::new(1, 0)]),
            Err(SimError::TileNotWalkable { x: 1, y: 0 })
        ));
    }

    #[test]
    fn test_move_to_updates_both_sides() {
        let mut world = open_world(3, 3, Position::new(0, 0), &[Position::new(2, 2)]);

        assert!(world.move_to(UnitId(1), Position::new(1, 2)));
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(1, 2));
        assert_eq!(world.occupant_at(1, 2), Some(UnitId(1)));
        assert_eq!(world.occupant_at(2, 2), None);
        assert!(world.is_consistent());
    }

    #[test]
    fn test_move_to_rejects_water_occupied_and_out_of_bounds() {
        let grid = parse_terrain_from_str("..~\n...\n").unwrap();
        let mut world =
            World::with_units(grid, Position::new(0, 0), &[Position::new(1, 0)]).unwrap();

        assert!(!world.move_to(UnitId(1), Position::new(2, 0)));
        assert!(!world.move_to(UnitId(1), Position::new(0, 0)));
        assert!(!world.move_to(UnitId(1), Position::new(7, 7)));
        assert!(!world.move_to(UnitId(9), Position::new(1, 1)));

        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(1, 0));
        assert_eq!(world.occupant_at(1, 0), Some(UnitId(1)));
        assert_eq!(world.occupant_at(0, 0), Some(UnitId(0)));
        assert_eq!(world.tile_kind(2, 0), Some(TerrainKind::Water));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_failed_moves_leave_state_unchanged_flag() {
        let grid = parse_terrain_from_str("~~~\n~.~\n~~~\n").unwrap();
        let mut world = World::with_units(grid, Position::new(1, 1), &[]).unwrap();

        assert!(!world.move_to(UnitId(0), Position::new(0, 1)));
        let report = world.tick(&mut Scripted::new(&[]));
        assert!(!report.state_changed);
    }

    #[test]
    fn test_dispatch_then_search() {
        let mut world = open_world(5, 5, Position::new(2, 2), &[Position::new(0, 0), Position::new(4, 4)]);

        // worker 1 lands on (2,3), then wanders to the second walkable neighbour (1,3)
        let mut rng = Scripted::new(&[1]);
        let report = world.tick(&mut rng);

        assert!(rng.is_exhausted());
        assert!(report.state_changed);
        assert_eq!(world.unit(UnitId(1)).unwrap().job(), Some(Job::Searching));
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(1, 3));
        assert_eq!(world.unit(UnitId(2)).unwrap().job(), Some(Job::Resting));

        // worker 2 is dispatched next; both searchers move
        let mut rng = Scripted::new(&[0, 2]);
        world.tick(&mut rng);

        assert!(rng.is_exhausted());
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(0, 3));
        assert_eq!(world.unit(UnitId(2)).unwrap().pos(), Position::new(2, 4));
        assert_eq!(world.count_job(Job::Searching), 2);
        assert!(world.is_consistent());
    }

    #[test]
    fn test_dispatch_onto_water_flips_job_only() {
        let grid = parse_terrain_from_str("~..\n").unwrap();
        let mut world =
            World::with_units(grid, Position::new(1, 0), &[Position::new(2, 0)]).unwrap();

        let report = world.tick(&mut Scripted::new(&[]));

        assert!(!report.state_changed);
        assert_eq!(world.unit(UnitId(1)).unwrap().job(), Some(Job::Searching));
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(2, 0));
        assert_eq!(world.tile_kind(0, 0), Some(TerrainKind::Water));
    }

    #[test]
    fn test_no_dispatch_when_queen_is_surrounded() {
        let mut world = open_world(3, 1, Position::new(1, 0), &[Position::new(0, 0), Position::new(2, 0)]);

        let report = world.tick(&mut Scripted::new(&[]));

        assert!(!report.state_changed);
        assert_eq!(world.count_job(Job::Resting), 2);
    }

    #[test]
    fn test_searching_worker_with_no_exit_stays_put() {
        let grid = parse_terrain_from_str("...\n.~~\n").unwrap();
        let mut world = World::with_units(
            grid,
            Position::new(0, 0),
            &[Position::new(0, 1), Position::new(2, 0)],
        )
        .unwrap();

        // worker 1 is dispatched to (1,0) and is boxed in by the queen, worker 2 and water
        world.tick(&mut Scripted::new(&[]));
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(1, 0));

        // worker 2 is dispatched to (0,1), freeing (2,0) for worker 1
        let mut rng = Scripted::new(&[0]);
        world.tick(&mut rng);

        assert!(rng.is_exhausted());
        assert_eq!(world.unit(UnitId(1)).unwrap().pos(), Position::new(2, 0));
        assert_eq!(world.unit(UnitId(2)).unwrap().pos(), Position::new(0, 1));
        assert!(world.is_consistent());
    }

    #[test]
    fn test_day_cadence() {
        let mut world = open_world(1, 1, Position::new(0, 0), &[]);
        let mut rng = Scripted::new(&[]);

        for tick in 1..=(TICKS_PER_DAY * 2 + 5) {
            let report = world.tick(&mut rng);
            assert_eq!(report.dawn, tick % TICKS_PER_DAY == 0);
            assert_eq!(report.state_changed, report.dawn);
        }

        assert_eq!(world.ticks(), TICKS_PER_DAY * 2 + 5);
        assert_eq!(world.queen().age, 2);
        assert_eq!(world.day(), FIRST_DAY + 2);
        assert_eq!(world.stats().queen_age, 2);
    }

    #[test]
    fn test_spawn_fails_without_walkable_tiles() {
        let grid = parse_terrain_from_str("~~\n~~\n").unwrap();
        let config = WorldConfig {
            num_rivers: 0,
            ..WorldConfig::default()
        };
        let err = World::from_terrain(grid, &config, &mut fastrand::Rng::with_seed(1)).unwrap_err();

        assert!(matches!(
            err,
            SimError::NoWalkableTile {
                kind: UnitKind::Queen,
                placed: 0
            }
        ));
    }

    #[test]
    fn test_spawn_fails_when_workers_do_not_fit() {
        let config = WorldConfig {
            width: 2,
            height: 1,
            num_rivers: 0,
            num_workers: 2,
            ..WorldConfig::default()
        };
        let err = World::generate(&config, &mut fastrand::Rng::with_seed(1)).unwrap_err();

        assert!(matches!(err, SimError::NoWalkableTile { placed: 2, .. }));
    }

    #[test]
    fn test_generate_fills_tight_grid() {
        let config = WorldConfig {
            width: 2,
            height: 2,
            num_rivers: 0,
            num_workers: 3,
            ..WorldConfig::default()
        };
        let world = World::generate(&config, &mut fastrand::Rng::with_seed(9)).unwrap();

        assert_eq!(world.grid().count_walkable(), 0);
        assert!(world.is_consistent());
        assert_eq!(world.stats().worker_count, 3);
    }
}
