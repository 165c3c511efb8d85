//! Heuristic scoring of moves and positions.

use crate::search::SearchState;
use fish_core::{AiConfig, Move};

/// Value of a finished or cut-off position for `seat`.
///
/// Own fish minus the mean opponent fish, plus own mobility minus mean
/// opponent mobility, each mobility term weighted. A non-zero
/// `position_weight` adds [`position_value`] for `seat`.
pub fn evaluate_position(state: &SearchState, seat: usize, ai: &AiConfig) -> f32 {
    let opponents: Vec<usize> = (0..state.seat_count()).filter(|&s| s != seat).collect();

    let mut value = state.fish(seat) as f32 + ai.mobility_weight * state.mobility(seat) as f32;
    if !opponents.is_empty() {
        let count = opponents.len() as f32;
        let opponent_fish: f32 =
            opponents.iter().map(|&s| state.fish(s) as f32).sum::<f32>() / count;
        let opponent_mobility: f32 =
            opponents.iter().map(|&s| state.mobility(s) as f32).sum::<f32>() / count;
        value -= opponent_fish + ai.opponent_mobility_weight * opponent_mobility;
    }

    if ai.position_weight != 0.0 {
        value += ai.position_weight * position_value(state, seat, ai.position_radius);
    }
    value
}

/// Free fish within `radius` of the seat's penguins, each tile worth
/// `fish / (distance + 1)`
pub fn position_value(state: &SearchState, seat: usize, radius: i32) -> f32 {
    state
        .penguins(seat)
        .iter()
        .map(|&penguin| {
            state
                .board()
                .iter()
                .filter(|(coord, _)| !state.is_occupied(*coord))
                .map(|(coord, tile)| (coord.distance(penguin), tile.fish))
                .filter(|(distance, _)| *distance <= radius)
                .map(|(distance, fish)| fish as f32 / (distance + 1) as f32)
                .sum::<f32>()
        })
        .sum()
}

/// One-ply value of `mv` for the seat to move.
///
/// Fish on the tile left behind, plus the moves open from the destination,
/// plus the fish on free tiles around it. With `cohesion`, destinations close
/// to the seat's other penguins earn a bonus.
pub fn score_move(state: &mut SearchState, mv: Move, ai: &AiConfig, cohesion: bool) -> f32 {
    let seat = state.current();
    let departure = state.board().get(mv.from).map(|t| t.fish).unwrap_or(0) as f32;

    let undo = state.apply(mv);

    let mobility = state.targets_from(mv.to).len() as f32;
    let neighbor_fish: u32 = state
        .board()
        .neighbors(mv.to)
        .filter(|(coord, _)| !state.is_occupied(*coord))
        .map(|(_, tile)| tile.fish as u32)
        .sum();

    let mut score =
        departure + ai.mobility_weight * mobility + ai.neighbor_fish_weight * neighbor_fish as f32;

    if cohesion {
        let nearest = state
            .penguins(seat)
            .iter()
            .filter(|&&p| p != mv.to)
            .map(|&p| p.distance(mv.to))
            .min();
        if let Some(distance) = nearest {
            score += ai.cohesion_weight * (ai.cohesion_radius - distance).max(0) as f32;
        }
    }

    state.undo(undo);
    score
}
