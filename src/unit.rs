use crate::utils::FIRST_DAY;
use crate::world::Position;
use std::fmt;

/// Stable index of a unit in the world's unit arena
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UnitId(pub u32);

impl UnitId {
    /// Get arena index
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Worker state machine
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Job {
    Resting,
    Searching,
}

/// Caste of a unit; workers carry their job
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnitKind {
    Queen,
    Worker { job: Job },
}

/// A unit standing on the grid.
///
/// The position is only written by `World`, which keeps it in step with the
/// occupant of the tile underneath.
#[derive(Clone, Debug)]
pub struct Unit {
    pub id: UnitId,
    pub kind: UnitKind,
    pos: Position,
}

impl Unit {
    pub(crate) fn new(id: UnitId, kind: UnitKind, pos: Position) -> Self {
        Self { id, kind, pos }
    }

    #[inline]
    pub fn pos(&self) -> Position {
        self.pos
    }

    #[inline]
    pub(crate) fn set_pos(&mut self, pos: Position) {
        self.pos = pos;
    }

    /// Job if this is a worker
    #[inline]
    pub fn job(&self) -> Option<Job> {
        match self.kind {
            UnitKind::Worker { job } => Some(job),
            UnitKind::Queen => None,
        }
    }

    #[inline]
    pub fn is_queen(&self) -> bool {
        self.kind == UnitKind::Queen
    }
}

/// Colony-level state owned by the queen, including her worker roster.
#[derive(Clone, Debug)]
pub struct Queen {
    pub id: UnitId,
    pub age: u64,
    pub hunger: f32,
    pub thirst: f32,
    pub food: u32,
    pub water: u32,
    pub eggs: u32,
    pub larvae: u32,
    /// Roster in dispatch order
    pub workers: Vec<UnitId>,
}

impl Queen {
    pub fn new(id: UnitId) -> Self {
        Self {
            id,
            age: 0,
            hunger: 1.0,
            thirst: 1.0,
            food: 0,
            water: 0,
            eggs: 0,
            larvae: 0,
            workers: Vec::new(),
        }
    }

    pub fn num_workers(&self) -> usize {
        self.workers.len()
    }
}

/// Snapshot for the stats overlay
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColonyStats {
    pub day: u64,
    pub queen_age: u64,
    pub hunger: f32,
    pub thirst: f32,
    pub food: u32,
    pub water: u32,
    pub egg_count: u32,
    pub larva_count: u32,
    pub worker_count: usize,
}

impl Default for ColonyStats {
    fn default() -> Self {
        Self {
            day: FIRST_DAY,
            queen_age: 0,
            hunger: 1.0,
            thirst: 1.0,
            food: 0,
            water: 0,
            egg_count: 0,
            larva_count: 0,
            worker_count: 0,
        }
    }
}

impl fmt::Display for ColonyStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Day: {}", self.day)?;
        writeln!(f, "Queen Age: {}", self.queen_age)?;
        writeln!(f, "Queen Food: {}%", self.hunger * 100.0)?;
        writeln!(f, "Queen Water: {}%", self.thirst * 100.0)?;
        writeln!(f, "Colony Food: {}", self.food)?;
        writeln!(f, "Colony Water: {}", self.water)?;
        writeln!(f, "Colony Eggs: {}", self.egg_count)?;
        writeln!(f, "Colony Larvae: {}", self.larva_count)?;
        write!(f, "Colony Workers: {}", self.worker_count)
    }
}
