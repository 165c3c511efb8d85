//! Configuration types for the game.

use crate::error::{Error, Result};
use crate::types::PlayerColor;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Deepest search the minimax controller accepts
pub const MAX_SEARCH_DEPTH: u8 = 5;

/// Largest board accepted, in slots. Penguin ids are `u16`.
pub const MAX_BOARD_SLOTS: i64 = u16::MAX as i64;

/// Board generation parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    /// Number of tile rows
    pub rows: i32,
    /// Number of tiles per row
    pub cols: i32,
    /// Chance that a slot starts as open water (0.0 to 1.0)
    pub hole_probability: f32,
    /// Fewest fish on a tile
    pub min_fish: u8,
    /// Most fish on a tile
    pub max_fish: u8,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 8,
            hole_probability: 0.1,
            min_fish: 1,
            max_fish: 3,
        }
    }
}

/// Which decision logic drives a player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ControllerKind {
    /// Best immediate fish plus mobility and neighborhood bonuses
    Greedy,
    /// Greedy, but also keeps penguins close together
    Cohesive,
    /// Richest reachable tile, nearest first
    NearestFish,
    /// Any legal move
    Random,
    /// Alpha-beta minimax search
    Minimax { depth: u8 },
}

impl Default for ControllerKind {
    fn default() -> Self {
        ControllerKind::Minimax { depth: 3 }
    }
}

/// A seat at the table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    pub color: PlayerColor,
    /// Youngest player moves first
    pub age: u32,
    #[serde(default)]
    pub controller: ControllerKind,
}

impl PlayerConfig {
    pub fn new(name: impl Into<String>, color: PlayerColor, age: u32, controller: ControllerKind) -> Self {
        Self {
            name: name.into(),
            color,
            age,
            controller,
        }
    }

    /// Standard table of `count` players: the first seat plays greedy, the rest search
    pub fn lineup(count: usize, depth: u8) -> Vec<PlayerConfig> {
        PlayerColor::all()
            .into_iter()
            .take(count)
            .enumerate()
            .map(|(i, color)| {
                let controller = if i == 0 {
                    ControllerKind::Greedy
                } else {
                    ControllerKind::Minimax { depth }
                };
                PlayerConfig::new(format!("Player {}", i + 1), color, 25 + i as u32, controller)
            })
            .collect()
    }
}

/// Heuristic weights shared by the AI controllers
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Placement picks randomly among this many richest free tiles
    pub placement_top_k: usize,
    /// Value of each legal move available from a position
    pub mobility_weight: f32,
    /// Value of each fish on a free tile next to the destination
    pub neighbor_fish_weight: f32,
    /// Value of staying close to the player's other penguins
    pub cohesion_weight: f32,
    /// Distance at which the cohesion bonus reaches zero
    pub cohesion_radius: i32,
    /// Penalty per legal move available to the average opponent
    pub opponent_mobility_weight: f32,
    /// Search bonus for free fish near the searching player's penguins,
    /// each tile counting `fish / (distance + 1)`. Zero disables it.
    pub position_weight: f32,
    /// Farthest tile counted by the position bonus
    pub position_radius: i32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            placement_top_k: 3,
            mobility_weight: 0.5,
            neighbor_fish_weight: 0.2,
            cohesion_weight: 0.3,
            cohesion_radius: 5,
            opponent_mobility_weight: 0.3,
            position_weight: 0.0,
            position_radius: 3,
        }
    }
}

/// Game rule switches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Penguins per player; `None` means `6 - players`
    pub penguins_per_player: Option<u8>,
    /// Take stranded penguins off the board, scoring the tile they stood on
    pub remove_stranded_penguins: bool,
    /// Number of recent moves kept for display
    pub history_len: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            penguins_per_player: None,
            remove_stranded_penguins: true,
            history_len: 10,
        }
    }
}

impl RulesConfig {
    pub fn penguins_for(&self, players: usize) -> u8 {
        self.penguins_per_player
            .unwrap_or_else(|| 6u8.saturating_sub(players as u8))
    }
}

/// Full match configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Random seed for reproducibility
    pub seed: u64,
    /// Hard cap on simulation ticks
    pub max_ticks: u64,
    pub board: BoardConfig,
    pub players: Vec<PlayerConfig>,
    pub ai: AiConfig,
    pub rules: RulesConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            max_ticks: 1_000,
            board: BoardConfig::default(),
            players: vec![
                PlayerConfig::new("Player", PlayerColor::Red, 25, ControllerKind::Greedy),
                PlayerConfig::new("AI", PlayerColor::Yellow, 30, ControllerKind::Minimax { depth: 3 }),
            ],
            ai: AiConfig::default(),
            rules: RulesConfig::default(),
        }
    }
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<()> {
        let board = &self.board;
        if board.rows < 1 || board.cols < 1 {
            return Err(Error::Validation(format!(
                "Board must have at least one row and column, got {}x{}",
                board.rows, board.cols
            )));
        }
        if board.rows as i64 * board.cols as i64 > MAX_BOARD_SLOTS {
            return Err(Error::Validation(format!(
                "Board {}x{} exceeds {} slots",
                board.rows, board.cols, MAX_BOARD_SLOTS
            )));
        }
        if !(0.0..1.0).contains(&board.hole_probability) {
            return Err(Error::Validation(format!(
                "Hole probability must be in [0, 1), got {}",
                board.hole_probability
            )));
        }
        if board.min_fish == 0 || board.min_fish > board.max_fish || board.max_fish > 9 {
            return Err(Error::Validation(format!(
                "Fish range {}..={} is invalid",
                board.min_fish, board.max_fish
            )));
        }

        let players = self.players.len();
        if !(2..=4).contains(&players) {
            return Err(Error::Validation(format!(
                "Game needs 2 to 4 players, got {}",
                players
            )));
        }

        let mut colors = HashSet::new();
        for player in &self.players {
            if !colors.insert(player.color) {
                return Err(Error::Validation(format!(
                    "Color {} is taken by more than one player",
                    player.color
                )));
            }
            if let ControllerKind::Minimax { depth } = player.controller {
                if depth == 0 || depth > MAX_SEARCH_DEPTH {
                    return Err(Error::Validation(format!(
                        "Search depth for {} must be 1..={}, got {}",
                        player.name, MAX_SEARCH_DEPTH, depth
                    )));
                }
            }
        }

        let penguins = self.rules.penguins_for(players) as i64 * players as i64;
        if self.rules.penguins_for(players) == 0 {
            return Err(Error::Validation("Each player needs at least one penguin".to_string()));
        }
        if penguins > board.rows as i64 * board.cols as i64 {
            return Err(Error::Validation(format!(
                "{} penguins cannot fit on a {}x{} board",
                penguins, board.rows, board.cols
            )));
        }

        if self.ai.position_radius < 1 {
            return Err(Error::Validation("position_radius must be at least 1".to_string()));
        }
        if self.ai.placement_top_k == 0 {
            return Err(Error::Validation("placement_top_k must be at least 1".to_string()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_configs() {
        let board = BoardConfig::default();
        assert_eq!(board.rows, 6);
        assert_eq!(board.cols, 8);

        let config = GameConfig::default();
        assert_eq!(config.players.len(), 2);
        assert_eq!(config.rules.penguins_for(config.players.len()), 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_penguins_per_player() {
        let rules = RulesConfig::default();
        assert_eq!(rules.penguins_for(2), 4);
        assert_eq!(rules.penguins_for(3), 3);
        assert_eq!(rules.penguins_for(4), 2);

        let fixed = RulesConfig {
            penguins_per_player: Some(1),
            ..Default::default()
        };
        assert_eq!(fixed.penguins_for(4), 1);
    }

    #[test]
    fn test_lineup() {
        let players = PlayerConfig::lineup(4, 2);
        assert_eq!(players.len(), 4);
        assert_eq!(players[0].controller, ControllerKind::Greedy);
        assert_eq!(players[3].controller, ControllerKind::Minimax { depth: 2 });
        assert_eq!(players[2].color, PlayerColor::Blue);
        assert_eq!(players[1].age, 26);
    }

    #[test]
    fn test_validation_rejects_bad_configs() {
        let mut config = GameConfig::default();
        config.players.truncate(1);
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.players[1].color = PlayerColor::Red;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.players[1].controller = ControllerKind::Minimax { depth: 9 };
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.board.min_fish = 4;
        assert!(config.validate().is_err());

        let mut config = GameConfig::default();
        config.board.rows = 1;
        config.board.cols = 3;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));
    }

    #[test]
    fn test_validation_rejects_huge_board() {
        let mut config = GameConfig::default();
        config.board.rows = 50_000;
        config.board.cols = 50_000;
        assert!(matches!(config.validate(), Err(Error::Validation(_))));

        // Product would overflow i32
        config.board.rows = i32::MAX;
        config.board.cols = 2;
        assert!(config.validate().is_err());

        config.board.rows = 255;
        config.board.cols = 257;
        assert!(config.validate().is_ok());
        config.board.cols = 258;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{
            "seed": 9,
            "players": [
                { "name": "Ann", "color": "blue", "age": 8, "controller": { "kind": "random" } },
                { "name": "Bob", "color": "green", "age": 10 }
            ]
        }"#;
        let config = GameConfig::from_json(json).unwrap();
        assert_eq!(config.seed, 9);
        assert_eq!(config.board.cols, 8);
        assert_eq!(config.players[0].controller, ControllerKind::Random);
        assert_eq!(config.players[1].controller, ControllerKind::Minimax { depth: 3 });
    }

    #[test]
    fn test_config_serialization() {
        let config = GameConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config.seed, deserialized.seed);
        assert_eq!(config.players[1].controller, deserialized.players[1].controller);
    }
}
