use serde::{Deserialize, Serialize};
use std::fmt;

/// Compass direction a lane runs in.
///
/// Admission policies typically key off this (e.g., a signal that alternates
/// between north-south and east-west traffic).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    E,
    S,
    W,
    NE,
    SE,
    SW,
    NW,
}

impl Direction {
    /// Human-readable compass name.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::N => "North",
            Direction::E => "East",
            Direction::S => "South",
            Direction::W => "West",
            Direction::NE => "Northeast",
            Direction::SE => "Southeast",
            Direction::SW => "Southwest",
            Direction::NW => "Northwest",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_uses_full_compass_names() {
        assert_eq!(Direction::N.to_string(), "North");
        assert_eq!(Direction::SW.to_string(), "Southwest");
        assert_eq!(Direction::NE.to_string(), "Northeast");
    }
}
