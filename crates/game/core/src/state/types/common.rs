use std::fmt;

/// Opaque identifier for a unit on the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side a unit fights for.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Team {
    Player,
    Ai,
}

impl Team {
    /// The team this one fights against.
    pub const fn opponent(self) -> Self {
        match self {
            Team::Player => Team::Ai,
            Team::Ai => Team::Player,
        }
    }
}

/// Point in world space.
///
/// The vertical axis (`y`) is carried for presentation and line-of-sight
/// origins but ignored by every distance computation.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const ORIGIN: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Ground-plane point (`y = 0`).
    pub const fn planar(x: f32, z: f32) -> Self {
        Self { x, y: 0.0, z }
    }

    /// Planar Euclidean distance (y ignored).
    pub fn distance(self, other: Position) -> f32 {
        let dx = other.x - self.x;
        let dz = other.z - self.z;
        (dx * dx + dz * dz).sqrt()
    }

    /// Unit planar direction from `self` towards `to`, or `None` when both
    /// points share the same ground coordinates.
    pub fn direction_to(self, to: Position) -> Option<(f32, f32)> {
        let dx = to.x - self.x;
        let dz = to.z - self.z;
        let len = (dx * dx + dz * dz).sqrt();
        if len <= f32::EPSILON {
            return None;
        }
        Some((dx / len, dz / len))
    }

    /// Moves `distance` along the ground towards `to`, keeping `y`.
    ///
    /// Returns `self` unchanged when there is no direction to move in.
    pub fn step_towards(self, to: Position, distance: f32) -> Position {
        match self.direction_to(to) {
            Some((dx, dz)) => self.offset(dx * distance, dz * distance),
            None => self,
        }
    }

    /// Translates on the ground plane.
    pub fn offset(self, dx: f32, dz: f32) -> Position {
        Position::new(self.x + dx, self.y, self.z + dz)
    }

    /// Same ground coordinates, lifted by `dy`.
    pub fn raised(self, dy: f32) -> Position {
        Position::new(self.x, self.y + dy, self.z)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_ignores_height() {
        let a = Position::new(0.0, 0.0, 0.0);
        let b = Position::new(3.0, 50.0, 4.0);
        assert_eq!(a.distance(b), 5.0);
    }

    #[test]
    fn step_towards_keeps_height_and_direction() {
        let from = Position::new(0.0, 2.0, 0.0);
        let to = Position::planar(10.0, 0.0);
        let stepped = from.step_towards(to, 4.0);
        assert_eq!(stepped, Position::new(4.0, 2.0, 0.0));
    }

    #[test]
    fn step_towards_same_point_is_noop() {
        let p = Position::planar(1.0, 1.0);
        assert_eq!(p.step_towards(p.raised(3.0), 5.0), p);
    }

    #[test]
    fn team_parses_case_insensitively() {
        assert_eq!("AI".parse::<Team>().unwrap(), Team::Ai);
        assert_eq!(Team::Player.opponent(), Team::Ai);
    }
}
