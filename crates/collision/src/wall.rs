use glam::Vec3;
use roomwalk_common::WallAxis;
use serde::{Deserialize, Serialize};

/// Collision margins shared by every wall in a layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CollisionMargins {
    /// Half the wall's long span (walls are 20 units wide).
    pub half_span: f32,
    /// Player radius, added on both axes.
    pub player_radius: f32,
}

impl Default for CollisionMargins {
    fn default() -> Self {
        Self {
            half_span: 10.0,
            player_radius: 0.5,
        }
    }
}

impl CollisionMargins {
    /// Reach along the wall's long axis.
    pub fn half_width(&self) -> f32 {
        self.half_span + self.player_radius
    }

    /// Reach across the zero-thickness plane.
    pub fn half_depth(&self) -> f32 {
        self.player_radius
    }

    /// Longest single-frame step that cannot skip across a wall's margin.
    ///
    /// Only end points are tested, so a step longer than the full margin
    /// depth could start on one side and land past the other.
    pub fn max_step(&self) -> f32 {
        2.0 * self.half_depth()
    }

    /// Finite, non-negative span and a strictly positive player radius.
    pub fn is_valid(&self) -> bool {
        self.half_span.is_finite()
            && self.player_radius.is_finite()
            && self.half_span >= 0.0
            && self.player_radius > 0.0
    }
}

/// An axis-aligned vertical wall plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub center: Vec3,
    pub axis: WallAxis,
}

impl Wall {
    pub fn new(center: Vec3, axis: WallAxis) -> Self {
        Self { center, axis }
    }

    /// Build a wall whose axis is inferred once from its center.
    pub fn from_center(center: Vec3) -> Self {
        Self::new(center, WallAxis::infer(center))
    }

    /// Whether a point lies inside this wall's collision margin.
    ///
    /// Only x and z are compared; y is ignored.
    pub fn overlaps(&self, point: Vec3, margins: &CollisionMargins) -> bool {
        let distance_x = (point.x - self.center.x).abs();
        let distance_z = (point.z - self.center.z).abs();
        match self.axis {
            WallAxis::AlongZ => {
                distance_x <= margins.half_depth() && distance_z <= margins.half_width()
            }
            WallAxis::AlongX => {
                distance_z <= margins.half_depth() && distance_x <= margins.half_width()
            }
        }
    }
}
