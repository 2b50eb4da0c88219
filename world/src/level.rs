//! Level data: one `kind,x,y` record per line.

use std::str::FromStr;

use thiserror::Error;
use tracing::warn;

use crate::config::ConfigError;

/// Kinds of entries a level file may contain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordKind {
    /// Player spawn point.
    Player,
    /// Wall obstacle.
    Wall,
    /// Tree obstacle.
    Tree,
    /// Sinkhole trap.
    Sinkhole,
    /// Demon hostile.
    Demon,
    /// Navec boss.
    Navec,
    /// Top-left corner of the world boundary.
    TopLeft,
    /// Bottom-right corner of the world boundary.
    BottomRight,
}

impl FromStr for RecordKind {
    type Err = ();

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "Fae" | "Player" => Ok(Self::Player),
            "Wall" => Ok(Self::Wall),
            "Tree" => Ok(Self::Tree),
            "Sinkhole" => Ok(Self::Sinkhole),
            "Demon" => Ok(Self::Demon),
            "Navec" => Ok(Self::Navec),
            "TopLeft" => Ok(Self::TopLeft),
            "BottomRight" => Ok(Self::BottomRight),
            _ => Err(()),
        }
    }
}

/// Single parsed level entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelRecord {
    /// Entry kind.
    pub kind: RecordKind,
    /// Horizontal anchor coordinate.
    pub x: i32,
    /// Vertical anchor coordinate.
    pub y: i32,
}

impl LevelRecord {
    /// Creates a record.
    #[must_use]
    pub const fn new(kind: RecordKind, x: i32, y: i32) -> Self {
        Self { kind, x, y }
    }
}

/// Reasons a level cannot be turned into an arena.
#[derive(Debug, Error, PartialEq)]
pub enum LevelError {
    /// A line does not have exactly three comma-separated fields.
    #[error("line {line}: expected `kind,x,y`, found `{content}`")]
    MalformedRecord {
        /// One-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },
    /// A coordinate field is not an integer.
    #[error("line {line}: invalid coordinate `{value}`")]
    InvalidCoordinate {
        /// One-based line number.
        line: usize,
        /// Offending field.
        value: String,
    },
    /// No player spawn point was found.
    #[error("level has no player entry")]
    MissingPlayer,
    /// The world boundary lacks a `TopLeft` or `BottomRight` entry.
    #[error("level boundary is incomplete; both TopLeft and BottomRight are required")]
    MissingCorner,
    /// The arena configuration failed validation.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Parses level text into records.
///
/// Blank lines are skipped and unknown kinds are logged and ignored.
pub fn parse_records(text: &str) -> Result<Vec<LevelRecord>, LevelError> {
    let mut records = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let content = raw.trim();
        if content.is_empty() {
            continue;
        }

        let fields: Vec<&str> = content.split(',').map(str::trim).collect();
        let [name, x, y] = fields.as_slice() else {
            return Err(LevelError::MalformedRecord {
                line,
                content: content.to_owned(),
            });
        };

        let Ok(kind) = name.parse::<RecordKind>() else {
            warn!(line, kind = *name, "skipping unknown level entry");
            continue;
        };

        records.push(LevelRecord::new(
            kind,
            parse_coordinate(line, x)?,
            parse_coordinate(line, y)?,
        ));
    }

    Ok(records)
}

fn parse_coordinate(line: usize, value: &str) -> Result<i32, LevelError> {
    value.parse().map_err(|_| LevelError::InvalidCoordinate {
        line,
        value: value.to_owned(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_known_kind() {
        let records = parse_records(
            "Fae,20,40\nWall,100,100\nTree,150,100\nSinkhole,200,100\n\
             Demon,300,300\nNavec,400,400\nTopLeft,0,0\nBottomRight,1024,768\n",
        )
        .expect("level parses");

        let kinds: Vec<_> = records.iter().map(|record| record.kind).collect();
        assert_eq!(
            kinds,
            vec![
                RecordKind::Player,
                RecordKind::Wall,
                RecordKind::Tree,
                RecordKind::Sinkhole,
                RecordKind::Demon,
                RecordKind::Navec,
                RecordKind::TopLeft,
                RecordKind::BottomRight,
            ]
        );
        assert_eq!(records[0], LevelRecord::new(RecordKind::Player, 20, 40));
    }

    #[test]
    fn blank_lines_and_unknown_kinds_are_skipped() {
        let records = parse_records("\n  \nGhost,1,2\nWall, 5 , 6\r\n").expect("level parses");
        assert_eq!(records, vec![LevelRecord::new(RecordKind::Wall, 5, 6)]);
    }

    #[test]
    fn wrong_field_count_is_malformed() {
        assert_eq!(
            parse_records("Wall,1,2\nWall,3"),
            Err(LevelError::MalformedRecord {
                line: 2,
                content: "Wall,3".to_owned(),
            })
        );
    }

    #[test]
    fn non_numeric_coordinates_are_rejected() {
        assert_eq!(
            parse_records("Tree,ten,2"),
            Err(LevelError::InvalidCoordinate {
                line: 1,
                value: "ten".to_owned(),
            })
        );
    }
}
