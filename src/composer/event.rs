use std::cmp::Ordering;

use glam::DVec2;

/// Two adjacent waves meeting at `(x, t)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionEvent {
    pub x: f64,
    pub t: f64,
    /// Id of the left colliding segment.
    pub left: usize,
    /// Id of the right colliding segment.
    pub right: usize,
    /// Id of the segment created by the collision, `None` if the waves cancel out.
    pub result: Option<usize>,
}

impl CollisionEvent {
    pub fn position(&self) -> DVec2 {
        DVec2::new(self.x, self.t)
    }
}

/// Two neighbouring waves whose facing speeds differ by less than the speed
/// tolerance and are therefore treated as parallel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParallelWaves {
    pub left: usize,
    pub right: usize,
    pub speed_difference: f64,
}

/// A predicted collision, ordered such that the earliest one is on top of a
/// `BinaryHeap`.
#[derive(Debug, Clone, Copy)]
pub(super) struct PendingCollision {
    pub t: f64,
    pub x: f64,
    pub left: usize,
    pub right: usize,
}

impl PartialEq for PendingCollision {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for PendingCollision {}

impl PartialOrd for PendingCollision {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for PendingCollision {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed: earliest time first, then leftmost pair
        other
            .t
            .total_cmp(&self.t)
            .then_with(|| other.left.cmp(&self.left))
    }
}
