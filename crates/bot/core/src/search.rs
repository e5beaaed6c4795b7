//! Nearest-target searches.
//!
//! Both searches measure straight-line distance from the actor's continuous
//! position. When several candidates sit at exactly the same distance the one
//! that comes first in row-major order (smaller `y`, then smaller `x`) wins,
//! so results never depend on the order a host enumerates its tiles in.

use std::cmp::Ordering;

use crate::config::BotConfig;
use crate::env::WorldQuery;
use crate::state::{Position, Tile};

/// Nearest-first target finder.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SpatialSearch {
    radius: u32,
}

impl SpatialSearch {
    /// Radii above [`BotConfig::MAX_SEARCH_RADIUS`] are clamped to it.
    pub const fn new(radius: u32) -> Self {
        let radius = if radius > BotConfig::MAX_SEARCH_RADIUS {
            BotConfig::MAX_SEARCH_RADIUS
        } else {
            radius
        };
        Self { radius }
    }

    /// Half side of the water scan window.
    pub const fn radius(&self) -> u32 {
        self.radius
    }

    /// Closest planted, dry plot anywhere in the world.
    pub fn nearest_eligible_work_site(
        &self,
        origin: Position,
        world: &(impl WorldQuery + ?Sized),
    ) -> Option<Tile> {
        let mut best = Nearest::new(origin);
        for (tile, site) in world.work_sites() {
            if site.is_eligible() {
                best.offer(tile);
            }
        }
        best.into_tile()
    }

    /// Closest standable land tile touching water, within the scan window.
    ///
    /// Only water tiles inside the `2 * radius + 1` square around the actor are
    /// considered. Their neighbours may lie one tile outside the window.
    pub fn nearest_water_adjacency(
        &self,
        origin: Position,
        world: &(impl WorldQuery + ?Sized),
    ) -> Option<Tile> {
        let center = origin.tile();
        let radius = i32::try_from(self.radius).unwrap_or(i32::MAX);
        let mut best = Nearest::new(origin);

        for y in center.y.saturating_sub(radius)..=center.y.saturating_add(radius) {
            for x in center.x.saturating_sub(radius)..=center.x.saturating_add(radius) {
                let water = Tile::new(x, y);
                if !world.is_water(water) {
                    continue;
                }
                for candidate in water.neighbors() {
                    if world.is_standable(candidate) && !world.is_water(candidate) {
                        best.offer(candidate);
                    }
                }
            }
        }

        best.into_tile()
    }
}

/// Running minimum over candidate tiles.
struct Nearest {
    origin: Position,
    best: Option<(f32, Tile)>,
}

impl Nearest {
    fn new(origin: Position) -> Self {
        Self { origin, best: None }
    }

    fn offer(&mut self, tile: Tile) {
        let distance = self.origin.distance_squared_to(tile);
        let better = match self.best {
            None => true,
            Some((best_distance, best_tile)) => {
                match distance.total_cmp(&best_distance) {
                    Ordering::Less => true,
                    Ordering::Equal => row_major(tile, best_tile) == Ordering::Less,
                    Ordering::Greater => false,
                }
            }
        };
        if better {
            self.best = Some((distance, tile));
        }
    }

    fn into_tile(self) -> Option<Tile> {
        self.best.map(|(_, tile)| tile)
    }
}

fn row_major(a: Tile, b: Tile) -> Ordering {
    a.y.cmp(&b.y).then(a.x.cmp(&b.x))
}
