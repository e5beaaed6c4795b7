//! Greedy single-axis walker.
//!
//! The walker fixes the horizontal offset first and only then the vertical
//! one, emitting at most one direction per tick. It does not look at the map:
//! an obstacle on the axis being resolved blocks it until the stall watchdog
//! (or the host) intervenes.

use crate::config::BotConfig;
use crate::state::{Direction, Position, Tile};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionController {
    dead_zone: f32,
    arrival_threshold: f32,
}

impl MotionController {
    pub const fn new(dead_zone: f32, arrival_threshold: f32) -> Self {
        Self {
            dead_zone,
            arrival_threshold,
        }
    }

    pub fn from_config(config: &BotConfig) -> Self {
        Self::new(config.dead_zone, config.arrival_threshold)
    }

    /// Direction to walk this tick, or `None` once both axes are aligned.
    pub fn step(&self, current: Position, target: Tile) -> Option<Direction> {
        let (tx, ty) = (target.x as f32, target.y as f32);

        if current.x + self.dead_zone < tx {
            Some(Direction::Right)
        } else if current.x - self.dead_zone > tx {
            Some(Direction::Left)
        } else if current.y + self.dead_zone < ty {
            Some(Direction::Down)
        } else if current.y - self.dead_zone > ty {
            Some(Direction::Up)
        } else {
            None
        }
    }

    /// True once the actor is within the arrival threshold of `target`.
    ///
    /// The actor stops next to the tile it works on, not on top of it.
    pub fn has_arrived(&self, current: Position, target: Tile) -> bool {
        current.distance_to(target) <= self.arrival_threshold
    }

    /// Facing that points from `current` toward `target`.
    ///
    /// The dominant axis wins; an exact diagonal (or zero offset) resolves
    /// vertically.
    pub fn face_target(&self, current: Position, target: Tile) -> Direction {
        let dx = target.x as f32 - current.x;
        let dy = target.y as f32 - current.y;

        if dx.abs() > dy.abs() {
            if dx > 0.0 {
                Direction::Right
            } else {
                Direction::Left
            }
        } else if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    }
}

impl Default for MotionController {
    fn default() -> Self {
        Self::new(
            BotConfig::DEFAULT_DEAD_ZONE,
            BotConfig::DEFAULT_ARRIVAL_THRESHOLD,
        )
    }
}
