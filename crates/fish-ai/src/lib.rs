//! Computer players.
//!
//! Every controller shares the same setup strategy (a random pick among the
//! richest free tiles) and differs in how it slides penguins during play.

pub mod evaluation;
pub mod greedy;
pub mod minimax;
pub mod placement;
pub mod search;
pub mod simple;

pub use greedy::GreedyController;
pub use minimax::MinimaxController;
pub use search::SearchState;
pub use simple::{NearestFishController, RandomController};

use fish_core::{AiConfig, ControllerKind, GameConfig};
use fish_world::Controller;

/// Build the controller for one seat
pub fn controller_for(kind: ControllerKind, ai: &AiConfig) -> Box<dyn Controller> {
    let ai = ai.clone();
    match kind {
        ControllerKind::Greedy => Box::new(GreedyController::new(ai)),
        ControllerKind::Cohesive => Box::new(GreedyController::cohesive(ai)),
        ControllerKind::NearestFish => Box::new(NearestFishController::new(ai)),
        ControllerKind::Random => Box::new(RandomController::new(ai)),
        ControllerKind::Minimax { depth } => Box::new(MinimaxController::new(ai, depth)),
    }
}

/// One controller per configured player, in config order
pub fn controllers_for(config: &GameConfig) -> Vec<Box<dyn Controller>> {
    config
        .players
        .iter()
        .map(|p| controller_for(p.controller, &config.ai))
        .collect()
}
