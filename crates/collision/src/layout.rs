use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::wall::{CollisionMargins, Wall};

/// Wall centers of the default 20×20 room, in resolver order.
const BOX_WALL_CENTERS: [[f32; 3]; 4] = [
    [0.0, 1.5, -10.0],
    [0.0, 1.5, 10.0],
    [-10.0, 1.5, 0.0],
    [10.0, 1.5, 0.0],
];

/// Static wall layout for a session.
///
/// Created once before the frame loop and never mutated afterwards. Callers
/// own it and pass it into the resolver and motion controller explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomLayout {
    walls: Vec<Wall>,
    margins: CollisionMargins,
    /// Floor-to-ceiling height. Informational only: collision ignores y.
    height: f32,
}

impl Default for RoomLayout {
    fn default() -> Self {
        Self::default_box()
    }
}

impl RoomLayout {
    /// The 20×20×3 box room with the four walls at x = ±10 and z = ±10.
    pub fn default_box() -> Self {
        Self::from_centers(
            BOX_WALL_CENTERS.map(Vec3::from_array),
            CollisionMargins::default(),
            3.0,
        )
    }

    /// Build a layout from wall centers, inferring each wall's axis once.
    pub fn from_centers(
        centers: impl IntoIterator<Item = Vec3>,
        margins: CollisionMargins,
        height: f32,
    ) -> Self {
        Self::from_walls(centers.into_iter().map(Wall::from_center), margins, height)
    }

    pub fn from_walls(
        walls: impl IntoIterator<Item = Wall>,
        margins: CollisionMargins,
        height: f32,
    ) -> Self {
        Self {
            walls: walls.into_iter().collect(),
            margins,
            height,
        }
    }

    pub fn walls(&self) -> &[Wall] {
        &self.walls
    }

    pub fn margins(&self) -> &CollisionMargins {
        &self.margins
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Index of the first wall whose margin contains `candidate`, in layout order.
    pub fn first_collision(&self, candidate: Vec3) -> Option<usize> {
        self.walls
            .iter()
            .position(|wall| wall.overlaps(candidate, &self.margins))
    }

    /// Whether `candidate` is blocked by any wall.
    pub fn is_colliding(&self, candidate: Vec3) -> bool {
        self.first_collision(candidate).is_some()
    }
}

/// Free-function form of [`RoomLayout::is_colliding`].
pub fn is_colliding(candidate: Vec3, layout: &RoomLayout) -> bool {
    layout.is_colliding(candidate)
}
