//! Planar navigation over a bounded arena with circular obstacles.

use tactics_content::{ArenaBounds, Obstacle};
use tactics_core::{NavigationOracle, Position};

use super::geometry::segment_circle_entry;
use super::occlusion::OpenGround;

/// Straight-line navigation with a single detour around a blocking obstacle.
///
/// A destination is reachable when it lies inside the arena, outside every
/// obstacle, and either the straight segment is clear or one waypoint beside
/// the first blocking obstacle clears both legs.
#[derive(Debug, Clone)]
pub struct ArenaNavigation {
    bounds: ArenaBounds,
    obstacles: Vec<Obstacle>,
    clearance: f32,
}

impl ArenaNavigation {
    /// Gap kept between detour waypoints and obstacle edges.
    pub const DEFAULT_CLEARANCE: f32 = 0.5;

    pub fn new(bounds: ArenaBounds, obstacles: Vec<Obstacle>) -> Self {
        Self {
            bounds,
            obstacles,
            clearance: Self::DEFAULT_CLEARANCE,
        }
    }

    pub fn with_clearance(mut self, clearance: f32) -> Self {
        self.clearance = clearance.max(0.0);
        self
    }

    pub fn bounds(&self) -> ArenaBounds {
        self.bounds
    }

    pub fn is_walkable(&self, point: Position) -> bool {
        self.bounds.contains(point) && !self.obstacles.iter().any(|o| o.contains(point))
    }

    /// First obstacle crossed by `from -> to`, ignoring any `from` stands in.
    fn first_blocker(&self, from: Position, to: Position) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .filter(|obstacle| !obstacle.contains(from))
            .filter_map(|obstacle| {
                segment_circle_entry(from, to, obstacle.center, obstacle.radius)
                    .map(|distance| (distance, obstacle))
            })
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, obstacle)| obstacle)
    }

    fn detour(&self, from: Position, to: Position, obstacle: &Obstacle) -> Option<Vec<Position>> {
        let (dx, dz) = from.direction_to(to)?;
        let offset = obstacle.radius + self.clearance;
        // Perpendiculars to the travel direction, left then right.
        [(-dz, dx), (dz, -dx)]
            .into_iter()
            .map(|(px, pz)| obstacle.center.offset(px * offset, pz * offset))
            .filter(|waypoint| {
                self.is_walkable(*waypoint)
                    && self.first_blocker(from, *waypoint).is_none()
                    && self.first_blocker(*waypoint, to).is_none()
            })
            .min_by(|a, b| {
                let a_len = from.distance(*a) + a.distance(to);
                let b_len = from.distance(*b) + b.distance(to);
                a_len.total_cmp(&b_len)
            })
            .map(|waypoint| vec![from, waypoint, to])
    }

    /// Pushes `point` out of any obstacle it falls in.
    fn push_out(&self, mut point: Position) -> Position {
        for obstacle in &self.obstacles {
            if obstacle.contains(point) {
                let (dx, dz) = obstacle.center.direction_to(point).unwrap_or((1.0, 0.0));
                let reach = obstacle.radius + self.clearance;
                point = Position::new(
                    obstacle.center.x + dx * reach,
                    point.y,
                    obstacle.center.z + dz * reach,
                );
            }
        }
        point
    }
}

impl NavigationOracle for ArenaNavigation {
    fn calculate_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        if !self.is_walkable(to) {
            return None;
        }
        match self.first_blocker(from, to) {
            None => Some(vec![from, to]),
            Some(obstacle) => self.detour(from, to, obstacle),
        }
    }

    fn sample_nearest_valid(&self, point: Position, snap_radius: f32) -> Option<Position> {
        if self.is_walkable(point) {
            return Some(point);
        }
        let candidate = self.push_out(self.bounds.clamp(point));
        (self.is_walkable(candidate) && candidate.distance(point) <= snap_radius)
            .then_some(candidate)
    }
}

impl NavigationOracle for OpenGround {
    fn calculate_path(&self, from: Position, to: Position) -> Option<Vec<Position>> {
        Some(vec![from, to])
    }

    fn sample_nearest_valid(&self, point: Position, _snap_radius: f32) -> Option<Position> {
        Some(point)
    }
}
