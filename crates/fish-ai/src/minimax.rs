//! Depth-limited minimax with alpha-beta pruning.
//!
//! The searching seat maximizes the position value from its own point of
//! view and every other seat minimizes it. Seats with no legal move are
//! passed over by [`SearchState::apply`], so a ply always belongs to a seat
//! that can act.
//!
//! Positions already searched to at least the remaining depth are served
//! from a transposition table. Entries record whether the stored value is
//! exact or only a bound, since alpha-beta cuts leave some values partial.

use crate::evaluation::evaluate_position;
use crate::placement::choose_placement;
use crate::search::SearchState;
use fish_core::{AiConfig, ControllerKind, HexCoord, Move};
use fish_world::{Controller, Game};
use rand_chacha::ChaCha8Rng;
use std::collections::HashMap;
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Bound {
    Exact,
    /// True value is at least the stored one
    Lower,
    /// True value is at most the stored one
    Upper,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    depth: u8,
    value: f32,
    bound: Bound,
}

pub struct MinimaxController {
    ai: AiConfig,
    depth: u8,
    /// Root-relative values, cleared for every search
    table: HashMap<u64, Entry>,
    nodes: u64,
    cutoffs: u64,
    hits: u64,
}

impl MinimaxController {
    pub fn new(ai: AiConfig, depth: u8) -> Self {
        Self {
            ai,
            depth: depth.max(1),
            table: HashMap::new(),
            nodes: 0,
            cutoffs: 0,
            hits: 0,
        }
    }

    /// Best move for the seat to act, with its value
    pub fn search_root(&mut self, state: &mut SearchState) -> Option<(Move, f32)> {
        self.table.clear();
        self.nodes = 0;
        self.cutoffs = 0;
        self.hits = 0;

        let root = state.current();
        let mut alpha = f32::NEG_INFINITY;
        let beta = f32::INFINITY;
        let mut best: Option<(Move, f32)> = None;

        for mv in state.moves_for(root) {
            let undo = state.apply(mv);
            let value = self.alphabeta(state, self.depth - 1, alpha, beta, root);
            state.undo(undo);

            if best.map_or(true, |(_, top)| value > top) {
                best = Some((mv, value));
            }
            alpha = alpha.max(value);
        }

        trace!(
            depth = self.depth,
            nodes = self.nodes,
            cutoffs = self.cutoffs,
            table_hits = self.hits,
            table_size = self.table.len(),
            "Search finished"
        );
        best
    }

    fn alphabeta(
        &mut self,
        state: &mut SearchState,
        depth: u8,
        mut alpha: f32,
        mut beta: f32,
        root: usize,
    ) -> f32 {
        self.nodes += 1;

        if depth == 0 || state.is_terminal() {
            return evaluate_position(state, root, &self.ai);
        }

        let (alpha_in, beta_in) = (alpha, beta);
        let key = state.key();
        if let Some(entry) = self.table.get(&key).copied() {
            if entry.depth >= depth {
                self.hits += 1;
                match entry.bound {
                    Bound::Exact => return entry.value,
                    Bound::Lower => alpha = alpha.max(entry.value),
                    Bound::Upper => beta = beta.min(entry.value),
                }
                if alpha >= beta {
                    return entry.value;
                }
            }
        }

        let seat = state.current();
        let moves = state.moves_for(seat);

        let value = if seat == root {
            let mut value = f32::NEG_INFINITY;
            for mv in moves {
                let undo = state.apply(mv);
                value = value.max(self.alphabeta(state, depth - 1, alpha, beta, root));
                state.undo(undo);

                alpha = alpha.max(value);
                if alpha >= beta {
                    self.cutoffs += 1;
                    break;
                }
            }
            value
        } else {
            let mut value = f32::INFINITY;
            for mv in moves {
                let undo = state.apply(mv);
                value = value.min(self.alphabeta(state, depth - 1, alpha, beta, root));
                state.undo(undo);

                beta = beta.min(value);
                if alpha >= beta {
                    self.cutoffs += 1;
                    break;
                }
            }
            value
        };

        let bound = if value <= alpha_in {
            Bound::Upper
        } else if value >= beta_in {
            Bound::Lower
        } else {
            Bound::Exact
        };
        self.table.insert(key, Entry { depth, value, bound });

        value
    }
}

impl Controller for MinimaxController {
    fn kind(&self) -> ControllerKind {
        ControllerKind::Minimax { depth: self.depth }
    }

    fn choose_placement(&mut self, game: &Game, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
        choose_placement(game, self.ai.placement_top_k, rng)
    }

    fn choose_move(&mut self, game: &Game, _rng: &mut ChaCha8Rng) -> Option<Move> {
        let mut state = SearchState::from_game(game);
        let (mv, value) = self.search_root(&mut state)?;
        debug!(
            depth = self.depth,
            mv = %mv,
            value,
            nodes = self.nodes,
            table_hits = self.hits,
            "Minimax choice"
        );
        Some(mv)
    }
}
