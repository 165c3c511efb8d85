//! Core type definitions for the game.

use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchId(pub Uuid);

impl MatchId {
    /// Random (v4) id drawn from `rng`
    pub fn from_rng<R: RngCore + ?Sized>(rng: &mut R) -> Self {
        let mut bytes = [0u8; 16];
        rng.fill_bytes(&mut bytes);
        Self(uuid::Builder::from_random_bytes(bytes).into_uuid())
    }
}

impl fmt::Display for MatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a player, stable across seat reordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Identifier of a penguin on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PenguinId(pub u16);

impl fmt::Display for PenguinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hex cell in pointy-top "odd-r" offset coordinates.
///
/// Odd rows are shifted half a cell to the right. Row 0 is the top of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct HexCoord {
    pub row: i32,
    pub col: i32,
}

impl HexCoord {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Axial `(q, r)` form of this coordinate
    pub fn to_axial(self) -> (i32, i32) {
        let q = self.col - (self.row - (self.row & 1)) / 2;
        (q, self.row)
    }

    pub fn from_axial(q: i32, r: i32) -> Self {
        Self {
            row: r,
            col: q + (r - (r & 1)) / 2,
        }
    }

    /// The adjacent cell in `direction`, which may lie outside any board
    pub fn step(self, direction: Direction) -> Self {
        let (q, r) = self.to_axial();
        let (dq, dr) = direction.axial_delta();
        Self::from_axial(q + dq, r + dr)
    }

    /// All six adjacent cells, in [`Direction::all`] order
    pub fn neighbors(self) -> [HexCoord; 6] {
        Direction::all().map(|d| self.step(d))
    }

    /// Number of single steps between two cells
    pub fn distance(self, other: HexCoord) -> i32 {
        let (q1, r1) = self.to_axial();
        let (q2, r2) = other.to_axial();
        let dq = q1 - q2;
        let dr = r1 - r2;
        (dq.abs() + dr.abs() + (dq + dr).abs()) / 2
    }

    pub fn in_bounds(self, rows: i32, cols: i32) -> bool {
        self.row >= 0 && self.row < rows && self.col >= 0 && self.col < cols
    }

    /// Pull the coordinate back inside a `rows` x `cols` board
    pub fn clamp(self, rows: i32, cols: i32) -> Self {
        Self {
            row: self.row.clamp(0, (rows - 1).max(0)),
            col: self.col.clamp(0, (cols - 1).max(0)),
        }
    }
}

impl fmt::Display for HexCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Direction of a straight-line slide
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl Direction {
    pub fn axial_delta(&self) -> (i32, i32) {
        match self {
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
            Direction::NorthEast => (1, -1),
            Direction::NorthWest => (0, -1),
            Direction::SouthEast => (0, 1),
            Direction::SouthWest => (-1, 1),
        }
    }

    pub fn all() -> [Direction; 6] {
        [
            Direction::East,
            Direction::NorthEast,
            Direction::NorthWest,
            Direction::West,
            Direction::SouthWest,
            Direction::SouthEast,
        ]
    }
}

/// An ice floe tile. A hole in the board is the absence of a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tile {
    pub fish: u8,
}

impl Tile {
    pub fn new(fish: u8) -> Self {
        Self { fish }
    }
}

/// Penguin colors a player can pick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    Red,
    Yellow,
    Blue,
    Green,
}

impl PlayerColor {
    pub fn all() -> [PlayerColor; 4] {
        [
            PlayerColor::Red,
            PlayerColor::Yellow,
            PlayerColor::Blue,
            PlayerColor::Green,
        ]
    }

    /// Single letter used by the text renderer
    pub fn glyph(&self) -> char {
        match self {
            PlayerColor::Red => 'R',
            PlayerColor::Yellow => 'Y',
            PlayerColor::Blue => 'B',
            PlayerColor::Green => 'G',
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlayerColor::Red => "red",
            PlayerColor::Yellow => "yellow",
            PlayerColor::Blue => "blue",
            PlayerColor::Green => "green",
        };
        f.write_str(name)
    }
}

/// Game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Placing,
    Playing,
    GameOver,
}

/// A penguin slide from one tile to another
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    pub from: HexCoord,
    pub to: HexCoord,
}

impl Move {
    pub fn new(from: HexCoord, to: HexCoord) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.from, self.to)
    }
}
