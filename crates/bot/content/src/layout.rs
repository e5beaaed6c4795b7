//! Farm layout description consumed by hosts.

use bot_core::{Position, Tile, WorkSite};

/// Starting charge and capacity of the watering can.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CanSpec {
    pub charge: u32,
    pub capacity: u32,
}

impl CanSpec {
    pub const fn new(charge: u32, capacity: u32) -> Self {
        Self { charge, capacity }
    }

    pub const fn full(capacity: u32) -> Self {
        Self::new(capacity, capacity)
    }
}

/// A farm as authored: everything a host needs to stand up a world.
///
/// Tiles inside `dimensions` that are not listed anywhere are open ground.
/// Nothing here is validated; hosts reject layouts they cannot represent.
#[derive(Clone, Debug, PartialEq)]
pub struct FarmLayout {
    pub width: u32,
    pub height: u32,
    pub water: Vec<Tile>,
    pub obstacles: Vec<Tile>,
    pub plots: Vec<(Tile, WorkSite)>,
    pub actor: Position,
    pub can: CanSpec,
}

impl FarmLayout {
    /// Empty field of open ground with the actor in the top-left corner.
    pub fn open(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            water: Vec::new(),
            obstacles: Vec::new(),
            plots: Vec::new(),
            actor: Position::new(0.0, 0.0),
            can: CanSpec::full(40),
        }
    }

    pub fn with_water(mut self, tile: Tile) -> Self {
        self.water.push(tile);
        self
    }

    pub fn with_obstacle(mut self, tile: Tile) -> Self {
        self.obstacles.push(tile);
        self
    }

    pub fn with_plot(mut self, tile: Tile, site: WorkSite) -> Self {
        self.plots.push((tile, site));
        self
    }

    pub fn with_actor(mut self, actor: Position) -> Self {
        self.actor = actor;
        self
    }

    pub fn with_can(mut self, can: CanSpec) -> Self {
        self.can = can;
        self
    }

    /// Number of plots that still need watering.
    pub fn dry_plots(&self) -> usize {
        self.plots
            .iter()
            .filter(|(_, site)| site.is_eligible())
            .count()
    }
}
