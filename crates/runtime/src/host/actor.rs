//! Simulated farmer with simple walking physics.

use bot_core::{ActorHandle, AnimationId, Direction, Position, WorldQuery};

/// The controlled actor.
///
/// Motion intents last for one physics step: the agent has to renew them
/// every tick it wants to keep walking.
#[derive(Debug, Clone)]
pub struct SimActor {
    position: Position,
    facing: Direction,
    intent: Option<Direction>,
    animation_left: u32,
    animation_ticks: u32,
}

impl SimActor {
    pub fn new(position: Position, animation_ticks: u32) -> Self {
        Self {
            position,
            facing: Direction::Down,
            intent: None,
            animation_left: 0,
            animation_ticks,
        }
    }

    /// Runs one physics step: counts down the current animation and walks
    /// `speed` tiles along the pending intent if the destination is free.
    ///
    /// Returns `true` when the actor moved.
    pub fn physics_step(&mut self, world: &(impl WorldQuery + ?Sized), speed: f32) -> bool {
        self.animation_left = self.animation_left.saturating_sub(1);

        let Some(direction) = self.intent.take() else {
            return false;
        };
        self.facing = direction;

        let next = self.position.advanced(direction, speed);
        if world.is_standable(next.tile()) {
            self.position = next;
            true
        } else {
            false
        }
    }
}

impl ActorHandle for SimActor {
    fn position(&self) -> Position {
        self.position
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn is_busy(&self) -> bool {
        self.animation_left > 0
    }

    fn set_motion_intent(&mut self, direction: Direction, moving: bool) {
        if moving {
            self.intent = Some(direction);
        } else if self.intent == Some(direction) {
            self.intent = None;
        }
    }

    fn halt(&mut self) {
        self.intent = None;
    }

    fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    fn play_animation(&mut self, _animation: AnimationId) {
        self.animation_left = self.animation_ticks;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::SimFarm;
    use bot_content::FarmLayout;
    use bot_core::Tile;

    fn farm() -> SimFarm {
        let layout = FarmLayout::open(4, 1)
            .with_obstacle(Tile::new(2, 0))
            .with_actor(Position::new(0.0, 0.0));
        SimFarm::from_layout(&layout).expect("valid layout")
    }

    #[test]
    fn walks_only_while_intent_is_renewed() {
        let farm = farm();
        let mut actor = SimActor::new(Position::new(0.0, 0.0), 0);

        actor.set_motion_intent(Direction::Right, true);
        assert!(actor.physics_step(&farm, 0.25));
        assert_eq!(actor.position(), Position::new(0.25, 0.0));
        assert_eq!(actor.facing(), Direction::Right);

        assert!(!actor.physics_step(&farm, 0.25));
        assert_eq!(actor.position(), Position::new(0.25, 0.0));
    }

    #[test]
    fn blocked_tiles_stop_motion() {
        let farm = farm();
        let mut actor = SimActor::new(Position::new(1.25, 0.0), 0);

        actor.set_motion_intent(Direction::Right, true);
        assert!(!actor.physics_step(&farm, 0.5));
        assert_eq!(actor.position(), Position::new(1.25, 0.0));
    }

    #[test]
    fn animations_keep_the_actor_busy() {
        let mut actor = SimActor::new(Position::new(0.0, 0.0), 3);
        let farm = farm();

        actor.play_animation(AnimationId(210));
        assert!(actor.is_busy());

        for _ in 0..3 {
            actor.physics_step(&farm, 0.1);
        }
        assert!(!actor.is_busy());
    }

    #[test]
    fn halt_drops_pending_intent() {
        let farm = farm();
        let mut actor = SimActor::new(Position::new(0.0, 0.0), 0);

        actor.set_motion_intent(Direction::Right, true);
        actor.halt();
        assert!(!actor.physics_step(&farm, 0.25));
    }
}
