//! Simulated farm served through [`bot_core::WorldQuery`].

use std::collections::{BTreeMap, HashSet};

use bot_content::FarmLayout;
use bot_core::{Tile, Wetness, WorkSite, WorldQuery};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Layout problems that prevent building a [`SimFarm`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FarmError {
    #[error("farm dimensions must be non-zero (got {width}x{height})")]
    EmptyDimensions { width: u32, height: u32 },

    #[error("{kind} tile {tile} lies outside the {width}x{height} farm")]
    OutOfBounds {
        kind: &'static str,
        tile: Tile,
        width: u32,
        height: u32,
    },

    #[error("tile {tile} is listed as both {first} and {second}")]
    Overlap {
        tile: Tile,
        first: &'static str,
        second: &'static str,
    },

    #[error("actor starts on blocked tile {tile}")]
    ActorBlocked { tile: Tile },

    #[error("watering can capacity must be non-zero")]
    ZeroCapacity,

    #[error("watering can charge {charge} exceeds capacity {capacity}")]
    ChargeExceedsCapacity { charge: u32, capacity: u32 },
}

/// Terrain and plots of a rectangular farm.
///
/// Terrain is immutable once built; only plot wetness changes while the
/// simulation runs.
#[derive(Debug, Clone)]
pub struct SimFarm {
    width: u32,
    height: u32,
    water: HashSet<Tile>,
    obstacles: HashSet<Tile>,
    plots: BTreeMap<Tile, WorkSite>,
}

impl SimFarm {
    /// Builds the terrain part of `layout`, rejecting overlapping or
    /// out-of-bounds entries.
    pub fn from_layout(layout: &FarmLayout) -> Result<Self, FarmError> {
        if layout.width == 0 || layout.height == 0 {
            return Err(FarmError::EmptyDimensions {
                width: layout.width,
                height: layout.height,
            });
        }

        let mut farm = Self {
            width: layout.width,
            height: layout.height,
            water: HashSet::new(),
            obstacles: HashSet::new(),
            plots: BTreeMap::new(),
        };

        for &tile in &layout.water {
            farm.check_free(tile, "water")?;
            farm.water.insert(tile);
        }
        for &tile in &layout.obstacles {
            farm.check_free(tile, "obstacle")?;
            farm.obstacles.insert(tile);
        }
        for &(tile, site) in &layout.plots {
            farm.check_free(tile, "plot")?;
            farm.plots.insert(tile, site);
        }

        let start = layout.actor.tile();
        if !farm.is_standable(start) {
            return Err(FarmError::ActorBlocked { tile: start });
        }

        Ok(farm)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Marks a planted plot as watered. Returns `true` if anything changed.
    pub fn water_plot(&mut self, tile: Tile) -> bool {
        match self.plots.get_mut(&tile) {
            Some(site) if site.is_eligible() => {
                site.wetness = Wetness::Watered;
                true
            }
            _ => false,
        }
    }

    /// Number of plots still waiting for water.
    pub fn dry_plots(&self) -> usize {
        self.plots.values().filter(|site| site.is_eligible()).count()
    }

    pub fn snapshot(&self) -> FarmSnapshot {
        FarmSnapshot {
            width: self.width,
            height: self.height,
            water: sorted(&self.water),
            obstacles: sorted(&self.obstacles),
            plots: self.plots.iter().map(|(tile, site)| (*tile, *site)).collect(),
        }
    }

    fn contains(&self, tile: Tile) -> bool {
        tile.x >= 0 && tile.y >= 0 && (tile.x as u32) < self.width && (tile.y as u32) < self.height
    }

    fn kind_of(&self, tile: Tile) -> Option<&'static str> {
        if self.water.contains(&tile) {
            Some("water")
        } else if self.obstacles.contains(&tile) {
            Some("obstacle")
        } else if self.plots.contains_key(&tile) {
            Some("plot")
        } else {
            None
        }
    }

    fn check_free(&self, tile: Tile, kind: &'static str) -> Result<(), FarmError> {
        if !self.contains(tile) {
            return Err(FarmError::OutOfBounds {
                kind,
                tile,
                width: self.width,
                height: self.height,
            });
        }
        if let Some(first) = self.kind_of(tile) {
            return Err(FarmError::Overlap {
                tile,
                first,
                second: kind,
            });
        }
        Ok(())
    }
}

impl WorldQuery for SimFarm {
    fn work_site(&self, tile: Tile) -> Option<WorkSite> {
        self.plots.get(&tile).copied()
    }

    fn work_sites(&self) -> Vec<(Tile, WorkSite)> {
        self.plots.iter().map(|(tile, site)| (*tile, *site)).collect()
    }

    fn is_water(&self, tile: Tile) -> bool {
        self.water.contains(&tile)
    }

    fn is_standable(&self, tile: Tile) -> bool {
        self.contains(tile) && !self.water.contains(&tile) && !self.obstacles.contains(&tile)
    }
}

fn sorted(tiles: &HashSet<Tile>) -> Vec<Tile> {
    let mut tiles: Vec<Tile> = tiles.iter().copied().collect();
    tiles.sort_unstable_by_key(|tile| (tile.y, tile.x));
    tiles
}

/// Read-only copy of the farm handed out to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FarmSnapshot {
    pub width: u32,
    pub height: u32,
    pub water: Vec<Tile>,
    pub obstacles: Vec<Tile>,
    pub plots: Vec<(Tile, WorkSite)>,
}

impl FarmSnapshot {
    pub fn dry_plots(&self) -> usize {
        self.plots.iter().filter(|(_, site)| site.is_eligible()).count()
    }

    pub fn watered_plots(&self) -> usize {
        self.plots
            .iter()
            .filter(|(_, site)| site.occupied && site.wetness == Wetness::Watered)
            .count()
    }

    /// Renders the farm as text, one row per line.
    ///
    /// `~` water, `#` obstacle, `d` dry crop, `w` watered crop, `_` empty
    /// plot, `@` actor, `.` open ground.
    pub fn render(&self, actor: Option<Tile>) -> String {
        let width = self.width as usize;
        let mut grid = vec![vec!['.'; width]; self.height as usize];
        let mut put = |tile: Tile, glyph: char| {
            if let Some(cell) = usize::try_from(tile.y)
                .ok()
                .and_then(|y| grid.get_mut(y))
                .zip(usize::try_from(tile.x).ok())
                .and_then(|(row, x)| row.get_mut(x))
            {
                *cell = glyph;
            }
        };

        for &tile in &self.water {
            put(tile, '~');
        }
        for &tile in &self.obstacles {
            put(tile, '#');
        }
        for &(tile, site) in &self.plots {
            let glyph = match (site.occupied, site.wetness) {
                (false, _) => '_',
                (true, Wetness::Dry) => 'd',
                (true, Wetness::Watered) => 'w',
            };
            put(tile, glyph);
        }
        if let Some(tile) = actor {
            put(tile, '@');
        }

        grid.into_iter()
            .map(|row| row.into_iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bot_core::Position;

    fn layout() -> FarmLayout {
        FarmLayout::open(5, 3)
            .with_water(Tile::new(0, 0))
            .with_obstacle(Tile::new(4, 2))
            .with_plot(Tile::new(2, 1), WorkSite::planted_dry())
            .with_plot(Tile::new(3, 1), WorkSite::new(Wetness::Dry, false))
            .with_actor(Position::new(1.0, 2.0))
    }

    #[test]
    fn builds_from_layout() {
        let farm = SimFarm::from_layout(&layout()).expect("valid layout");

        assert_eq!(farm.dimensions(), (5, 3));
        assert!(farm.is_water(Tile::new(0, 0)));
        assert!(!farm.is_standable(Tile::new(0, 0)));
        assert!(!farm.is_standable(Tile::new(4, 2)));
        assert!(farm.is_standable(Tile::new(2, 1)));
        assert!(!farm.is_standable(Tile::new(5, 0)));
        assert!(!farm.is_standable(Tile::new(-1, 0)));
        assert_eq!(farm.dry_plots(), 1);
    }

    #[test]
    fn watering_only_changes_planted_dry_plots() {
        let mut farm = SimFarm::from_layout(&layout()).expect("valid layout");

        assert!(farm.water_plot(Tile::new(2, 1)));
        assert!(!farm.water_plot(Tile::new(2, 1)));
        assert!(!farm.water_plot(Tile::new(3, 1)));
        assert!(!farm.water_plot(Tile::new(1, 1)));
        assert_eq!(farm.dry_plots(), 0);
    }

    #[test]
    fn rejects_overlaps_and_strays() {
        let overlap = layout().with_plot(Tile::new(0, 0), WorkSite::planted_dry());
        assert_eq!(
            SimFarm::from_layout(&overlap).unwrap_err(),
            FarmError::Overlap {
                tile: Tile::new(0, 0),
                first: "water",
                second: "plot",
            }
        );

        let stray = layout().with_obstacle(Tile::new(9, 9));
        assert!(matches!(
            SimFarm::from_layout(&stray),
            Err(FarmError::OutOfBounds {
                kind: "obstacle",
                ..
            })
        ));

        let blocked = layout().with_actor(Position::new(4.2, 1.8));
        assert_eq!(
            SimFarm::from_layout(&blocked).unwrap_err(),
            FarmError::ActorBlocked {
                tile: Tile::new(4, 2)
            }
        );

        assert!(matches!(
            SimFarm::from_layout(&FarmLayout::open(0, 4)),
            Err(FarmError::EmptyDimensions { .. })
        ));
    }

    #[test]
    fn renders_every_glyph() {
        let farm = SimFarm::from_layout(&layout()).expect("valid layout");
        let text = farm.snapshot().render(Some(Tile::new(1, 2)));

        assert_eq!(text, "~....\n..d_.\n.@..#");
    }
}
