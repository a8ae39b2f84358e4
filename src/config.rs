use serde::{Deserialize, Serialize};

use crate::bounds::Billiard;
use crate::error::Result;
use crate::report::{HistogramReport, HistogramScope};
use crate::stats::StatsAggregator;

/// Which pictures a renderer should draw for a trajectory.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureMode {
    /// The six faces unfolded into a net, with bounce points per face.
    Projections,
    /// The trajectory inside a box wireframe.
    #[serde(rename = "3d")]
    ThreeD,
    #[default]
    Both,
}

impl PictureMode {
    /// Parses the one-letter selector: `p` for projections, `3` for 3D, anything else for both.
    pub fn from_selector(selector: &str) -> Self {
        match selector.trim() {
            "p" => PictureMode::Projections,
            "3" => PictureMode::ThreeD,
            _ => PictureMode::Both,
        }
    }

    pub fn projections(self) -> bool {
        matches!(self, PictureMode::Projections | PictureMode::Both)
    }

    pub fn three_d(self) -> bool {
        matches!(self, PictureMode::ThreeD | PictureMode::Both)
    }
}

/// Box, start point and picture mode for a single trajectory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BilliardConfig {
    pub sizes: Vec<i64>,
    pub start: Vec<i64>,
    #[serde(default)]
    pub mode: PictureMode,
}

impl Default for BilliardConfig {
    fn default() -> Self {
        Self { sizes: vec![2, 3, 4], start: vec![0, 0, 0], mode: PictureMode::default() }
    }
}

impl BilliardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validates the configuration for a `D`-dimensional box.
    pub fn billiard<const D: usize>(&self) -> Result<Billiard<D>> {
        Billiard::from_slices(self.sizes.len(), &self.sizes, &self.start)
    }
}

/// Which boxes the statistics run covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum StatsConfig {
    /// Every canonical shape with sides up to `max_side`.
    Sweep { max_side: i64 },
    /// Every start point of one box.
    Single { sizes: [i64; 3] },
}

impl StatsConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn run(&self, aggregator: &StatsAggregator) -> Result<HistogramReport> {
        match *self {
            StatsConfig::Sweep { max_side } => Ok(HistogramReport::new(
                HistogramScope::Sweep { max_side },
                aggregator.sweep(max_side)?,
            )),
            StatsConfig::Single { sizes: [a, b, c] } => Ok(HistogramReport::new(
                HistogramScope::Single { sizes: [a, b, c] },
                aggregator.single(a, b, c)?,
            )),
        }
    }
}
