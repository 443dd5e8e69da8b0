//! Shared constants.

/// Ticks in one simulated day (24 hours of 36 ticks)
pub const TICKS_PER_DAY: u64 = 24 * 36;

/// Day number shown before the first dawn
pub const FIRST_DAY: u64 = 1;

/// Denominator of every weighted draw
pub const PERMILLE: usize = 1000;

pub const DEFAULT_WIDTH: usize = 100;
pub const DEFAULT_HEIGHT: usize = 100;
pub const DEFAULT_RIVERS: usize = 20;
pub const DEFAULT_WORKERS: usize = 5;
