use crate::state::{Direction, Position};

/// Identifier of a host animation clip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AnimationId(pub u32);

impl AnimationId {
    /// Directional variant of a clip family: `base + facing index`.
    pub const fn facing(base: u32, direction: Direction) -> Self {
        Self(base + direction.index())
    }
}

/// Host-side handle on the controlled actor.
pub trait ActorHandle {
    fn position(&self) -> Position;

    fn facing(&self) -> Direction;

    /// True while an uninterruptible animation or externally driven motion
    /// is in progress. The machine skips the whole tick while busy.
    fn is_busy(&self) -> bool;

    /// Requests (or cancels) walking in `direction` for the current tick.
    fn set_motion_intent(&mut self, direction: Direction, moving: bool);

    /// Stops all walking immediately.
    fn halt(&mut self);

    fn face(&mut self, direction: Direction);

    fn play_animation(&mut self, animation: AnimationId);
}
