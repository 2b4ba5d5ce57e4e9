//! Direction of travel on a line.

use std::fmt;

/// Error returned when parsing an invalid direction code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid direction {0:?}: expected \"N\" or \"S\"")]
pub struct InvalidDirection(String);

/// Direction of travel, as partitioned by the arrivals feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
}

impl Direction {
    /// Parse a direction code.
    ///
    /// Only the exact codes `"N"` and `"S"` are accepted.
    ///
    /// ```
    /// use next_train_server::domain::Direction;
    ///
    /// assert_eq!(Direction::parse("N").unwrap(), Direction::North);
    /// assert!(Direction::parse("n").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, InvalidDirection> {
        match s {
            "N" => Ok(Direction::North),
            "S" => Ok(Direction::South),
            other => Err(InvalidDirection(other.to_string())),
        }
    }

    /// The single-letter code used on the wire.
    pub fn code(&self) -> &'static str {
        match self {
            Direction::North => "N",
            Direction::South => "S",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
