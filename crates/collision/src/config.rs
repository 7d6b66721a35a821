use std::path::Path;

use glam::Vec3;
use roomwalk_common::WallAxis;
use serde::{Deserialize, Serialize};

use crate::layout::RoomLayout;
use crate::wall::{CollisionMargins, Wall};

/// Errors from loading or validating a room configuration.
#[derive(Debug, thiserror::Error)]
pub enum LayoutError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported room config extension: {0:?}")]
    UnsupportedFormat(Option<String>),
    #[error("room config has no walls")]
    NoWalls,
    #[error("wall {index} has a non-finite center {center:?}")]
    NonFiniteWall { index: usize, center: Vec3 },
    #[error("invalid collision margins: {0:?}")]
    InvalidMargins(CollisionMargins),
    #[error("invalid room height: {0}")]
    InvalidHeight(f32),
}

/// One wall entry in a room config. The axis is inferred when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallConfig {
    pub center: Vec3,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<WallAxis>,
}

/// On-disk room description (YAML or JSON).
///
/// ```yaml
/// walls:
///   - center: [0, 1.5, -10]
///   - center: [10, 1.5, 0]
///     axis: along_z
/// margins:
///   half_span: 10.0
///   player_radius: 0.5
/// height: 3.0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomConfig {
    pub walls: Vec<WallConfig>,
    #[serde(default)]
    pub margins: CollisionMargins,
    #[serde(default = "default_height")]
    pub height: f32,
}

fn default_height() -> f32 {
    3.0
}

impl RoomConfig {
    pub fn from_yaml_str(source: &str) -> Result<Self, LayoutError> {
        Ok(serde_yaml::from_str(source)?)
    }

    pub fn from_json_str(source: &str) -> Result<Self, LayoutError> {
        Ok(serde_json::from_str(source)?)
    }

    /// Load a config file, picking the format from its extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LayoutError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let source = std::fs::read_to_string(path)?;
        let config = match ext.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml_str(&source)?,
            Some("json") => Self::from_json_str(&source)?,
            _ => return Err(LayoutError::UnsupportedFormat(ext)),
        };
        tracing::debug!(
            "loaded room config from {} ({} walls)",
            path.display(),
            config.walls.len()
        );
        Ok(config)
    }

    pub fn to_yaml_string(&self) -> Result<String, LayoutError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validate and build the runtime layout.
    pub fn to_layout(&self) -> Result<RoomLayout, LayoutError> {
        if self.walls.is_empty() {
            return Err(LayoutError::NoWalls);
        }
        if !self.margins.is_valid() {
            return Err(LayoutError::InvalidMargins(self.margins));
        }
        if !self.height.is_finite() || self.height <= 0.0 {
            return Err(LayoutError::InvalidHeight(self.height));
        }
        let mut walls = Vec::with_capacity(self.walls.len());
        for (index, entry) in self.walls.iter().enumerate() {
            if !entry.center.is_finite() {
                return Err(LayoutError::NonFiniteWall {
                    index,
                    center: entry.center,
                });
            }
            walls.push(match entry.axis {
                Some(axis) => Wall::new(entry.center, axis),
                None => Wall::from_center(entry.center),
            });
        }
        Ok(RoomLayout::from_walls(walls, self.margins, self.height))
    }
}

impl From<&RoomLayout> for RoomConfig {
    fn from(layout: &RoomLayout) -> Self {
        Self {
            walls: layout
                .walls()
                .iter()
                .map(|w| WallConfig {
                    center: w.center,
                    axis: Some(w.axis),
                })
                .collect(),
            margins: *layout.margins(),
            height: layout.height(),
        }
    }
}
