use glam::Vec3;
use roomwalk_collision::RoomLayout;
use roomwalk_input::LookControl;
use roomwalk_kernel::PlayerState;

use crate::camera::CameraRig;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer reads the layout, player and look state and produces output.
/// It never mutates them.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame.
    fn render(&self, layout: &RoomLayout, player: &PlayerState, look: &LookControl)
    -> Self::Output;
}

/// Text renderer for the CLI and tests, with an optional top-down minimap.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    rig: CameraRig,
    /// Minimap resolution in cells per side. `None` disables the map.
    minimap_cells: Option<usize>,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rig(mut self, rig: CameraRig) -> Self {
        self.rig = rig;
        self
    }

    pub fn with_minimap(mut self, cells: usize) -> Self {
        self.minimap_cells = (cells > 0).then_some(cells);
        self
    }

    /// Top-down map, north (-Z) at the top. `#` is any point the resolver blocks,
    /// `@` is the player and `.` is free floor.
    pub fn minimap(&self, layout: &RoomLayout, player: &PlayerState, cells: usize) -> String {
        let extent = map_extent(layout);
        let size = 2.0 * extent / cells as f32;
        let to_cell = |v: f32| {
            let c = ((v + extent) / size).floor();
            (c >= 0.0 && c < cells as f32).then_some(c as usize)
        };
        let player_cell = to_cell(player.position.x).zip(to_cell(player.position.z));

        let mut out = String::with_capacity((cells + 1) * cells);
        for row in 0..cells {
            let z = -extent + (row as f32 + 0.5) * size;
            for col in 0..cells {
                let x = -extent + (col as f32 + 0.5) * size;
                let ch = if player_cell == Some((col, row)) {
                    '@'
                } else if layout.is_colliding(Vec3::new(x, player.position.y, z)) {
                    '#'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

/// Half-size of the square the minimap covers: the farthest wall plus its margin.
fn map_extent(layout: &RoomLayout) -> f32 {
    let far = layout
        .walls()
        .iter()
        .map(|w| w.center.x.abs().max(w.center.z.abs()))
        .fold(0.0_f32, f32::max);
    (far + layout.margins().half_depth()).max(1.0)
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, layout: &RoomLayout, player: &PlayerState, look: &LookControl) -> String {
        let orientation = look.orientation();
        let pose = self.rig.pose(player, orientation);
        let p = player.position;

        let mut out = String::new();
        out.push_str(&format!(
            "=== Room ({} walls, height {:.1}) ===\n",
            layout.walls().len(),
            layout.height()
        ));
        out.push_str(&format!(
            "Player: pos=({:.2}, {:.2}, {:.2}) speed={:.1}\n",
            p.x, p.y, p.z, player.speed
        ));
        out.push_str(&format!(
            "Look: yaw={:.1}° pitch={:.1}° locked={}\n",
            orientation.yaw.to_degrees(),
            orientation.pitch.to_degrees(),
            look.is_locked()
        ));
        out.push_str(&format!(
            "Camera: forward=({:.2}, {:.2}, {:.2}) fov={:.0}\n",
            pose.forward.x,
            pose.forward.y,
            pose.forward.z,
            self.rig.fov.to_degrees()
        ));
        for (i, wall) in layout.walls().iter().enumerate() {
            let c = wall.center;
            out.push_str(&format!(
                "  wall[{i}] center=({:.1}, {:.1}, {:.1}) axis={:?}\n",
                c.x, c.y, c.z, wall.axis
            ));
        }
        if let Some(cells) = self.minimap_cells {
            out.push_str(&self.minimap(layout, player, cells));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_contains_player_and_walls() {
        let out = DebugTextRenderer::new().render(
            &RoomLayout::default_box(),
            &PlayerState::default(),
            &LookControl::default(),
        );
        assert!(out.contains("4 walls"));
        assert!(out.contains("pos=(0.00, 1.60, 5.00)"));
        assert!(out.contains("locked=false"));
        assert!(out.contains("wall[3] center=(10.0, 1.5, 0.0) axis=AlongZ"));
        assert!(out.contains("fov=75"));
        // Header, player, look, camera, then one line per wall.
        assert_eq!(out.lines().count(), 4 + 4);
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn minimap_draws_box_and_player() {
        let renderer = DebugTextRenderer::new();
        let map = renderer.minimap(&RoomLayout::default_box(), &PlayerState::default(), 21);
        let rows: Vec<&str> = map.lines().collect();
        assert_eq!(rows.len(), 21);
        assert!(rows.iter().all(|r| r.chars().count() == 21));
        // Outer ring is wall, interior is floor.
        assert!(rows[0].chars().all(|c| c == '#'));
        assert!(rows[20].chars().all(|c| c == '#'));
        assert!(rows.iter().all(|r| r.starts_with('#') && r.ends_with('#')));
        assert_eq!(&rows[1][1..20], ".".repeat(19));
        // Player at (0, 5) sits in column 10, row 15.
        assert_eq!(rows[15].chars().nth(10), Some('@'));
        assert_eq!(map.matches('@').count(), 1);
    }

    #[test]
    fn minimap_enabled_in_render() {
        let out = DebugTextRenderer::new().with_minimap(21).render(
            &RoomLayout::default_box(),
            &PlayerState::default(),
            &LookControl::default(),
        );
        assert!(out.contains('@'));
        assert!(!DebugTextRenderer::new().with_minimap(0).render(
            &RoomLayout::default_box(),
            &PlayerState::default(),
            &LookControl::default(),
        )
        .contains('@'));
    }

    #[test]
    fn player_outside_map_is_not_drawn() {
        let map = DebugTextRenderer::new().minimap(
            &RoomLayout::default_box(),
            &PlayerState::at(Vec3::new(50.0, 1.6, 0.0)),
            21,
        );
        assert!(!map.contains('@'));
    }
}
