//! Farm layout loader.
//!
//! Loads terrain, plots and the starting actor/can from farm RON files.

use std::path::Path;

use bot_core::{Position, Tile, Wetness, WorkSite};
use serde::{Deserialize, Serialize};

use crate::layout::{CanSpec, FarmLayout};
use crate::loaders::{LoadResult, read_file};

/// Farms compiled into the binary, by name.
const EMBEDDED: &[(&str, &str)] = &[
    ("homestead", include_str!("../../data/farms/homestead.ron")),
    ("drought", include_str!("../../data/farms/drought.ron")),
];

/// Farm data structure for RON files.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct FarmDataRon {
    dimensions: (u32, u32),
    #[serde(default)]
    water: Vec<(i32, i32)>,
    #[serde(default)]
    obstacles: Vec<(i32, i32)>,
    #[serde(default)]
    plots: Vec<(i32, i32, Wetness, bool)>, // (x, y, wetness, planted)
    actor: (f32, f32),
    can: (u32, u32), // (charge, capacity)
}

impl From<FarmDataRon> for FarmLayout {
    fn from(data: FarmDataRon) -> Self {
        let tile = |(x, y): (i32, i32)| Tile::new(x, y);

        Self {
            width: data.dimensions.0,
            height: data.dimensions.1,
            water: data.water.into_iter().map(tile).collect(),
            obstacles: data.obstacles.into_iter().map(tile).collect(),
            plots: data
                .plots
                .into_iter()
                .map(|(x, y, wetness, planted)| (Tile::new(x, y), WorkSite::new(wetness, planted)))
                .collect(),
            actor: Position::new(data.actor.0, data.actor.1),
            can: CanSpec::new(data.can.0, data.can.1),
        }
    }
}

/// Loader for farm layouts from RON files.
pub struct FarmLoader;

impl FarmLoader {
    /// Name of the farm used when none is configured.
    pub const DEFAULT_FARM: &'static str = "homestead";

    /// Load a farm layout from a RON file.
    pub fn load(path: &Path) -> LoadResult<FarmLayout> {
        let content = read_file(path)?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{} ({})", e, path.display()))
    }

    /// Parse a farm layout from RON text.
    pub fn parse(content: &str) -> LoadResult<FarmLayout> {
        let data: FarmDataRon = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse farm RON: {}", e))?;

        Ok(data.into())
    }

    /// Load one of the farms compiled into the crate.
    pub fn embedded(name: &str) -> LoadResult<FarmLayout> {
        let (_, content) = EMBEDDED
            .iter()
            .find(|(embedded, _)| *embedded == name)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown embedded farm '{}' (available: {})",
                    name,
                    Self::embedded_names().collect::<Vec<_>>().join(", ")
                )
            })?;

        Self::parse(content)
    }

    pub fn embedded_names() -> impl Iterator<Item = &'static str> {
        EMBEDDED.iter().map(|(name, _)| *name)
    }
}
