//! In-memory host doubles shared by the unit tests.

use std::collections::BTreeSet;

use crate::env::{
    ActorHandle, AnimationId, Env, Notice, ToolBelt, ToolCheck, ToolHandle, ToolOutcome, Wetness,
    WorkSite, WorldQuery,
};
use crate::error::HaltReason;
use crate::machine::{AgentStateMachine, TickOutcome};
use crate::state::{AgentContext, Direction, Position, Tile};

/// Square grid of land with optional water, obstacles and work sites.
#[derive(Clone, Debug, Default)]
pub struct Grid {
    min: i32,
    max: i32,
    water: BTreeSet<Tile>,
    obstacles: BTreeSet<Tile>,
    sites: Vec<(Tile, WorkSite)>,
}

impl Grid {
    /// Open land covering `min..=max` on both axes.
    pub fn open(min: i32, max: i32) -> Self {
        Self {
            min,
            max,
            ..Self::default()
        }
    }

    pub fn with_site(mut self, tile: Tile, site: WorkSite) -> Self {
        self.sites.push((tile, site));
        self
    }

    pub fn with_water(mut self, tile: Tile) -> Self {
        self.water.insert(tile);
        self
    }

    pub fn with_obstacle(mut self, tile: Tile) -> Self {
        self.obstacles.insert(tile);
        self
    }

    /// Flips enumeration order so tests can prove it does not matter.
    pub fn reversed_sites(mut self) -> Self {
        self.sites.reverse();
        self
    }

    pub fn water_site(&mut self, tile: Tile) {
        if let Some((_, site)) = self.sites.iter_mut().find(|(t, _)| *t == tile) {
            site.wetness = Wetness::Watered;
        }
    }

    fn in_bounds(&self, tile: Tile) -> bool {
        (self.min..=self.max).contains(&tile.x) && (self.min..=self.max).contains(&tile.y)
    }
}

impl WorldQuery for Grid {
    fn work_site(&self, tile: Tile) -> Option<WorkSite> {
        self.sites
            .iter()
            .find(|(t, _)| *t == tile)
            .map(|(_, site)| *site)
    }

    fn work_sites(&self) -> Vec<(Tile, WorkSite)> {
        self.sites.clone()
    }

    fn is_water(&self, tile: Tile) -> bool {
        self.water.contains(&tile)
    }

    fn is_standable(&self, tile: Tile) -> bool {
        self.in_bounds(tile) && !self.water.contains(&tile) && !self.obstacles.contains(&tile)
    }
}

/// Actor that records every command it receives.
#[derive(Clone, Debug)]
pub struct Actor {
    pub position: Position,
    pub facing: Direction,
    pub busy: bool,
    pub intent: Option<Direction>,
    pub halts: u32,
    pub animations: Vec<AnimationId>,
}

impl Actor {
    pub fn at(position: Position) -> Self {
        Self {
            position,
            facing: Direction::Down,
            busy: false,
            intent: None,
            halts: 0,
            animations: Vec::new(),
        }
    }
}

impl ActorHandle for Actor {
    fn position(&self) -> Position {
        self.position
    }

    fn facing(&self) -> Direction {
        self.facing
    }

    fn is_busy(&self) -> bool {
        self.busy
    }

    fn set_motion_intent(&mut self, direction: Direction, moving: bool) {
        self.intent = moving.then_some(direction);
    }

    fn halt(&mut self) {
        self.intent = None;
        self.halts += 1;
    }

    fn face(&mut self, direction: Direction) {
        self.facing = direction;
    }

    fn play_animation(&mut self, animation: AnimationId) {
        self.animations.push(animation);
    }
}

/// Watering can that remembers where it was fired.
#[derive(Clone, Debug, PartialEq)]
pub struct Can {
    pub charge: u32,
    pub capacity: u32,
    pub strikes: Vec<Tile>,
}

impl Can {
    pub fn new(charge: u32, capacity: u32) -> Self {
        Self {
            charge: charge.min(capacity),
            capacity,
            strikes: Vec::new(),
        }
    }
}

impl ToolHandle for Can {
    fn charge(&self) -> u32 {
        self.charge
    }

    fn capacity(&self) -> u32 {
        self.capacity
    }

    fn set_charge(&mut self, charge: u32) {
        self.charge = charge.min(self.capacity);
    }

    fn invoke(&mut self, target: Tile) -> ToolOutcome {
        if self.charge == 0 {
            return ToolOutcome::Empty;
        }
        self.charge -= 1;
        self.strikes.push(target);
        ToolOutcome::Applied
    }
}

#[derive(Clone, Debug, Default)]
pub struct Belt {
    pub can: Option<Can>,
}

impl Belt {
    pub fn holding(can: Can) -> Self {
        Self { can: Some(can) }
    }

    pub fn empty() -> Self {
        Self { can: None }
    }

    pub fn can(&self) -> &Can {
        self.can.as_ref().expect("belt holds a can")
    }
}

impl ToolBelt for Belt {
    fn required_tool(&mut self) -> ToolCheck<'_> {
        match self.can.as_mut() {
            Some(can) => ToolCheck::HasRequiredTool(can),
            None => ToolCheck::Missing,
        }
    }
}

/// Minimal host loop: ticks the machine, walks the actor, waters struck plots.
pub struct Harness {
    pub machine: AgentStateMachine,
    pub ctx: AgentContext,
    pub grid: Grid,
    pub actor: Actor,
    pub belt: Belt,
    pub notices: Vec<Notice>,
    /// Tiles per tick; zero freezes the actor in place.
    pub walk_speed: f32,
}

impl Harness {
    pub fn new(grid: Grid, start: Position, belt: Belt) -> Self {
        let mut ctx = AgentContext::new();
        ctx.set_active(true);
        Self {
            machine: AgentStateMachine::default(),
            ctx,
            grid,
            actor: Actor::at(start),
            belt,
            notices: Vec::new(),
            walk_speed: 0.1,
        }
    }

    pub fn with_machine(mut self, machine: AgentStateMachine) -> Self {
        self.machine = machine;
        self
    }

    pub fn tick(&mut self) -> TickOutcome {
        let outcome = {
            let mut env = Env::new(
                &self.grid,
                &mut self.actor,
                &mut self.belt,
                &mut self.notices,
            );
            self.machine.tick(&mut self.ctx, &mut env)
        };

        if let Some(can) = self.belt.can.as_mut() {
            for tile in can.strikes.drain(..) {
                self.grid.water_site(tile);
            }
        }

        if let Some(direction) = self.actor.intent.take() {
            self.actor.facing = direction;
            let next = self.actor.position.advanced(direction, self.walk_speed);
            if self.grid.is_standable(next.tile()) {
                self.actor.position = next;
            }
        }

        outcome
    }

    /// Ticks until the machine halts, returning the reason and tick count.
    pub fn run_until_halt(&mut self, max_ticks: u32) -> Option<(HaltReason, u32)> {
        (1..=max_ticks).find_map(|n| self.tick().halt_reason().map(|reason| (reason, n)))
    }
}
