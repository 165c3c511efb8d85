//! One-ply heuristic controllers.

use crate::evaluation::score_move;
use crate::placement::choose_placement;
use crate::search::SearchState;
use fish_core::{AiConfig, ControllerKind, HexCoord, Move};
use fish_world::{Controller, Game};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

/// Takes the move with the best immediate payoff.
///
/// With `cohesive` set, also pulls penguins toward each other.
pub struct GreedyController {
    ai: AiConfig,
    cohesive: bool,
}

impl GreedyController {
    pub fn new(ai: AiConfig) -> Self {
        Self { ai, cohesive: false }
    }

    pub fn cohesive(ai: AiConfig) -> Self {
        Self { ai, cohesive: true }
    }
}

impl Controller for GreedyController {
    fn kind(&self) -> ControllerKind {
        if self.cohesive {
            ControllerKind::Cohesive
        } else {
            ControllerKind::Greedy
        }
    }

    fn choose_placement(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
        choose_placement(game, self.ai.placement_top_k, rng)
    }

    fn choose_move(&mut self, game: &Game, _rng: &mut ChaCha8Rng) -> Option<Move> {
        let mut state = SearchState::from_game(game);
        let seat = state.current();

        let mut best: Option<(Move, f32)> = None;
        for mv in state.moves_for(seat) {
            let score = score_move(&mut state, mv, &self.ai, self.cohesive);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((mv, score));
            }
        }

        if let Some((mv, score)) = best {
            debug!(controller = ?self.kind(), mv = %mv, score, "Greedy choice");
        }
        best.map(|(mv, _)| mv)
    }
}
