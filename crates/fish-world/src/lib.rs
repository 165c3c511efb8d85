//! Game engine.
//!
//! This crate holds the hex board, the rules of play and the tick loop that
//! drives controllers through a match.

pub mod board;
pub mod game;
pub mod penguin;
pub mod render;
pub mod simulation;

pub use board::Board;
pub use game::{Game, MoveRecord, Placement, Retirement, TurnReport};
pub use penguin::{Penguin, Player};
pub use render::render;
pub use simulation::{Controller, MatchResult, Simulation, TickEvent};
