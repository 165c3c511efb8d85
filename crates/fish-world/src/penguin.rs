//! Penguins and the players who own them.

use fish_core::{
    ControllerKind, HexCoord, PenguinId, PlayerColor, PlayerConfig, PlayerId, ScoreCard,
};
use serde::{Deserialize, Serialize};

/// A penguin on the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Penguin {
    pub id: PenguinId,
    pub owner: PlayerId,
    pub position: HexCoord,
    /// Cleared once the penguin is stranded and taken off the board
    pub active: bool,
    pub fish_collected: u32,
    pub moves: u32,
}

impl Penguin {
    pub fn new(id: PenguinId, owner: PlayerId, position: HexCoord) -> Self {
        Self {
            id,
            owner,
            position,
            active: true,
            fish_collected: 0,
            moves: 0,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Slide to `to`, crediting the fish from the tile left behind
    pub fn move_to(&mut self, to: HexCoord, fish: u8) {
        self.position = to;
        self.fish_collected += fish as u32;
        self.moves += 1;
    }

    /// Take the penguin off the board with the fish from its last tile
    pub fn retire(&mut self, fish: u8) {
        self.active = false;
        self.fish_collected += fish as u32;
    }
}

/// A player seat
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub age: u32,
    pub controller: ControllerKind,
    pub score: ScoreCard,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>, color: PlayerColor, age: u32) -> Self {
        Self {
            id,
            name: name.into(),
            color,
            age,
            controller: ControllerKind::default(),
            score: ScoreCard::new(),
        }
    }

    pub fn from_config(id: PlayerId, config: &PlayerConfig) -> Self {
        Self {
            controller: config.controller,
            ..Self::new(id, config.name.clone(), config.color, config.age)
        }
    }
}
