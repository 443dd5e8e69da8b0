use crate::direction::Direction;

/// Seedable source of uniform draws threaded through generation and ticks.
///
/// Implementations must be a single deterministic stream: the same seed yields
/// the same sequence of draws.
pub trait RandomSource {
    /// Uniform integer in `[low, high)`. Callers guarantee `low < high`.
    fn next_uniform_int(&mut self, low: usize, high: usize) -> usize;

    /// Uniform heading
    fn next_uniform_direction(&mut self) -> Direction {
        Direction::ALL[self.next_uniform_int(0, Direction::ALL.len())]
    }
}

impl RandomSource for fastrand::Rng {
    #[inline]
    fn next_uniform_int(&mut self, low: usize, high: usize) -> usize {
        self.usize(low..high)
    }
}
