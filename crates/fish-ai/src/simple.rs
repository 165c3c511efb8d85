//! Controllers without look-ahead: nearest fish and random.

use crate::placement::choose_placement;
use fish_core::{AiConfig, ControllerKind, HexCoord, Move};
use fish_world::{Controller, Game};
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Heads for the richest tile in reach, preferring short slides
pub struct NearestFishController {
    ai: AiConfig,
}

impl NearestFishController {
    pub fn new(ai: AiConfig) -> Self {
        Self { ai }
    }
}

impl Controller for NearestFishController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::NearestFish
    }

    fn choose_placement(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
        choose_placement(game, self.ai.placement_top_k, rng)
    }

    fn choose_move(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<Move> {
        let player = game.current_player()?.id;
        let ranked: Vec<(u8, i32, Move)> = game
            .legal_moves(player)
            .into_iter()
            .map(|mv| {
                let fish = game.board().get(mv.to).map(|t| t.fish).unwrap_or(0);
                (fish, mv.from.distance(mv.to), mv)
            })
            .collect();

        let best_fish = ranked.iter().map(|(fish, _, _)| *fish).max()?;
        let nearest = ranked
            .iter()
            .filter(|(fish, _, _)| *fish == best_fish)
            .map(|(_, distance, _)| *distance)
            .min()?;

        let shortlist: Vec<Move> = ranked
            .into_iter()
            .filter(|(fish, distance, _)| *fish == best_fish && *distance == nearest)
            .map(|(_, _, mv)| mv)
            .collect();

        let choice = shortlist.choose(rng).copied();
        if let Some(mv) = choice {
            debug!(mv = %mv, fish = best_fish, distance = nearest, "Nearest fish choice");
        }
        choice
    }
}

/// Any legal move, uniformly
pub struct RandomController {
    ai: AiConfig,
}

impl RandomController {
    pub fn new(ai: AiConfig) -> Self {
        Self { ai }
    }
}

impl Controller for RandomController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Random
    }

    fn choose_placement(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
        choose_placement(game, self.ai.placement_top_k, rng)
    }

    fn choose_move(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<Move> {
        let player = game.current_player()?.id;
        game.legal_moves(player).choose(rng).copied()
    }
}
