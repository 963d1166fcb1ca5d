//! Line-of-sight oracles.

use tactics_content::Obstacle;
use tactics_core::{OcclusionOracle, Position};

use super::geometry::segment_circle_entry;

/// Flat, empty terrain: every segment is clear and every point walkable.
#[derive(Debug, Clone, Copy, Default)]
pub struct OpenGround;

impl OcclusionOracle for OpenGround {
    fn first_obstruction(&self, _from: Position, _to: Position) -> Option<f32> {
        None
    }
}

/// Occlusion by circular obstacles on the ground plane.
#[derive(Debug, Clone, Default)]
pub struct ObstacleField {
    obstacles: Vec<Obstacle>,
}

impl ObstacleField {
    pub fn new(obstacles: Vec<Obstacle>) -> Self {
        Self { obstacles }
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }
}

impl OcclusionOracle for ObstacleField {
    fn first_obstruction(&self, from: Position, to: Position) -> Option<f32> {
        self.obstacles
            .iter()
            .filter_map(|obstacle| {
                segment_circle_entry(from, to, obstacle.center, obstacle.radius)
            })
            .min_by(f32::total_cmp)
    }
}
