//! Score tracking and final standings.

use crate::types::{PlayerColor, PlayerId};
use serde::{Deserialize, Serialize};

/// Running score of one player
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCard {
    /// Fish collected
    pub fish: u32,
    /// Tiles collected
    pub tiles: u32,
    /// Moves made
    pub moves: u32,
}

impl ScoreCard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit a collected tile
    pub fn collect(&mut self, fish: u8) {
        self.fish += fish as u32;
        self.tiles += 1;
    }

    /// Reverse a previous [`ScoreCard::collect`]
    pub fn uncollect(&mut self, fish: u8) {
        self.fish = self.fish.saturating_sub(fish as u32);
        self.tiles = self.tiles.saturating_sub(1);
    }

    /// True when this card ranks strictly ahead: more fish, then more tiles
    pub fn beats(&self, other: &ScoreCard) -> bool {
        (self.fish, self.tiles) > (other.fish, other.tiles)
    }
}

/// One line of the final table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based; tied players share a rank
    pub rank: usize,
    pub player: PlayerId,
    pub name: String,
    pub color: PlayerColor,
    pub score: ScoreCard,
}

/// Rank players by fish, then tiles collected
pub fn standings<'a, I>(players: I) -> Vec<Standing>
where
    I: IntoIterator<Item = (PlayerId, &'a str, PlayerColor, ScoreCard)>,
{
    let mut table: Vec<Standing> = players
        .into_iter()
        .map(|(player, name, color, score)| Standing {
            rank: 0,
            player,
            name: name.to_string(),
            color,
            score,
        })
        .collect();

    table.sort_by(|a, b| {
        (b.score.fish, b.score.tiles)
            .cmp(&(a.score.fish, a.score.tiles))
            .then(a.player.cmp(&b.player))
    });

    for i in 0..table.len() {
        table[i].rank = if i > 0 && !table[i - 1].score.beats(&table[i].score) {
            table[i - 1].rank
        } else {
            i + 1
        };
    }

    table
}

/// Every player holding the most fish wins; ties are shared
pub fn winners(table: &[Standing]) -> Vec<PlayerId> {
    let best = table.iter().map(|s| s.score.fish).max().unwrap_or(0);
    table
        .iter()
        .filter(|s| s.score.fish == best)
        .map(|s| s.player)
        .collect()
}
