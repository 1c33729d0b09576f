//! Configuration types for maps and searches

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::map::Cell;

/// Largest `x_range` / `y_range` a config file may ask for. A map holds
/// `(2 * range - 1)^2` cells, so this caps a loaded map at about four
/// million cells.
pub const MAX_MAP_RANGE: i32 = 1024;

/// Map dimensions and the state every cell starts in
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapConfig {
    /// Cells satisfy `-x_range < q < x_range`
    pub x_range: i32,
    /// Cells satisfy `-y_range < r < y_range`
    pub y_range: i32,
    /// Initial state of every cell
    #[serde(default)]
    pub default_cell: Cell,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            x_range: 10,
            y_range: 10,
            default_cell: Cell::default(),
        }
    }
}

impl MapConfig {
    pub fn new(x_range: i32, y_range: i32) -> Self {
        Self {
            x_range,
            y_range,
            ..Default::default()
        }
    }

    /// Set the initial cell state
    pub fn with_default_cell(mut self, cell: Cell) -> Self {
        self.default_cell = cell;
        self
    }

    /// Check the ranges are within `0..=MAX_MAP_RANGE`
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.x_range < 0 || self.y_range < 0 {
            anyhow::bail!(
                "map ranges must be non-negative, got x_range={} y_range={}",
                self.x_range,
                self.y_range
            );
        }
        if self.x_range > MAX_MAP_RANGE || self.y_range > MAX_MAP_RANGE {
            anyhow::bail!(
                "map ranges must be at most {}, got x_range={} y_range={}",
                MAX_MAP_RANGE,
                self.x_range,
                self.y_range
            );
        }
        Ok(())
    }

    /// Load from JSON file
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MapConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save to JSON file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Feasibility search tuning
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Cost added to `g` for every hop. Zero orders the frontier purely by
    /// distance to the goal (greedy best-first).
    pub step_cost: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::a_star()
    }
}

impl SearchConfig {
    /// One unit per hop
    pub fn a_star() -> Self {
        Self { step_cost: 1 }
    }

    /// No per-hop cost
    pub fn greedy() -> Self {
        Self { step_cost: 0 }
    }

    pub fn with_step_cost(mut self, step_cost: u32) -> Self {
        self.step_cost = step_cost;
        self
    }
}
