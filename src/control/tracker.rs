//! Last-aimed-at target and the re-aim threshold.

use crate::plane::Coordinate;

/// Sentinel far outside any plane so the first detection always re-aims.
pub const UNTRACKED: Coordinate = Coordinate::new(-9999.0, -9999.0);

/// Remembers the coordinate the laser was last moved to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackedTarget {
    last: Coordinate,
}

impl Default for TrackedTarget {
    fn default() -> Self {
        Self::new()
    }
}

impl TrackedTarget {
    pub const fn new() -> Self {
        Self { last: UNTRACKED }
    }

    pub fn last(&self) -> Coordinate {
        self.last
    }

    /// `true` only when **both** axes moved strictly more than `threshold`.
    ///
    /// A pest sliding along one axis is ignored until it also moves on the
    /// other.
    pub fn has_moved(&self, candidate: Coordinate, threshold: f64) -> bool {
        (self.last.x - candidate.x).abs() > threshold
            && (self.last.y - candidate.y).abs() > threshold
    }

    pub fn update(&mut self, aimed_at: Coordinate) {
        self.last = aimed_at;
    }
}
