use crate::state::Tile;

/// Read-only view of the grid the agent works on.
///
/// Implementations must be side-effect free: the machine may call any method
/// many times within one tick and expects the answers to stay consistent
/// until the host applies the tick's effects.
pub trait WorldQuery {
    /// Returns the work site at `tile`, if the tile is one.
    fn work_site(&self, tile: Tile) -> Option<WorkSite>;

    /// Enumerates every work site in the world.
    ///
    /// The order is irrelevant to callers; searches break ties on their own.
    fn work_sites(&self) -> Vec<(Tile, WorkSite)>;

    fn is_water(&self, tile: Tile) -> bool;

    /// True when the actor can stand on `tile`: unobstructed and not water.
    fn is_standable(&self, tile: Tile) -> bool;
}

/// Wetness of a work site for the current day.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::IntoStaticStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wetness {
    #[default]
    Dry,
    Watered,
}

/// Snapshot of a single tilled plot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkSite {
    pub wetness: Wetness,
    /// Whether something is planted here. Empty plots are never watered.
    pub occupied: bool,
}

impl WorkSite {
    pub const fn new(wetness: Wetness, occupied: bool) -> Self {
        Self { wetness, occupied }
    }

    pub const fn planted_dry() -> Self {
        Self::new(Wetness::Dry, true)
    }

    /// A site is a valid watering target iff it is planted and dry.
    pub const fn is_eligible(&self) -> bool {
        self.occupied && matches!(self.wetness, Wetness::Dry)
    }
}
