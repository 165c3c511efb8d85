//! Lightweight game state for look-ahead.
//!
//! Holds only what the heuristics need (tiles, penguin positions, fish per
//! seat) and supports apply/undo so the search never clones the full game.

use fish_core::{HexCoord, Move, PlayerId, Tile};
use fish_world::{Board, Game};
use std::collections::hash_map::DefaultHasher;
use std::collections::HashSet;
use std::hash::{Hash, Hasher};

/// What [`SearchState::undo`] needs to restore the previous position
#[derive(Debug, Clone, Copy)]
pub struct Undo {
    seat: usize,
    penguin: usize,
    mv: Move,
    tile: Option<Tile>,
    previous: usize,
}

#[derive(Debug, Clone)]
pub struct SearchState {
    board: Board,
    seats: Vec<PlayerId>,
    /// Active penguin positions per seat
    penguins: Vec<Vec<HexCoord>>,
    occupied: HashSet<HexCoord>,
    fish: Vec<u32>,
    current: usize,
}

impl SearchState {
    pub fn from_game(game: &Game) -> Self {
        let seats: Vec<PlayerId> = game.players().iter().map(|p| p.id).collect();
        let penguins: Vec<Vec<HexCoord>> = seats
            .iter()
            .map(|&id| game.penguins_of(id).map(|p| p.position).collect())
            .collect();
        let occupied = penguins.iter().flatten().copied().collect();
        let fish = game.players().iter().map(|p| p.score.fish).collect();
        let current = game
            .current_player()
            .and_then(|p| seats.iter().position(|&id| id == p.id))
            .unwrap_or(0);

        Self {
            board: game.board().clone(),
            seats,
            penguins,
            occupied,
            fish,
            current,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seat_count(&self) -> usize {
        self.seats.len()
    }

    /// Seat to move
    pub fn current(&self) -> usize {
        self.current
    }

    pub fn fish(&self, seat: usize) -> u32 {
        self.fish[seat]
    }

    pub fn penguins(&self, seat: usize) -> &[HexCoord] {
        &self.penguins[seat]
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.occupied.contains(&coord)
    }

    pub fn targets_from(&self, from: HexCoord) -> Vec<HexCoord> {
        self.board
            .slide_targets(from, |coord| self.occupied.contains(&coord))
    }

    pub fn moves_for(&self, seat: usize) -> Vec<Move> {
        self.penguins[seat]
            .iter()
            .flat_map(|&from| {
                self.targets_from(from)
                    .into_iter()
                    .map(move |to| Move::new(from, to))
            })
            .collect()
    }

    /// Number of legal moves open to `seat`
    pub fn mobility(&self, seat: usize) -> usize {
        self.penguins[seat]
            .iter()
            .map(|&from| self.targets_from(from).len())
            .sum()
    }

    pub fn can_move(&self, seat: usize) -> bool {
        self.penguins[seat]
            .iter()
            .any(|&from| !self.targets_from(from).is_empty())
    }

    /// True when no seat has a legal move
    pub fn is_terminal(&self) -> bool {
        (0..self.seats.len()).all(|seat| !self.can_move(seat))
    }

    /// Position hash for the transposition table.
    ///
    /// Covers the remaining tiles, each seat's penguin spots (order
    /// ignored), fish per seat and the seat to move.
    pub fn key(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        self.board.tile_count().hash(&mut hasher);
        for (coord, _) in self.board.iter() {
            coord.hash(&mut hasher);
        }
        for spots in &self.penguins {
            let mut spots = spots.clone();
            spots.sort();
            spots.hash(&mut hasher);
        }
        self.fish.hash(&mut hasher);
        self.current.hash(&mut hasher);
        hasher.finish()
    }

    /// Play `mv` for the current seat and pass the turn to the next seat able
    /// to move. The move is assumed legal.
    pub fn apply(&mut self, mv: Move) -> Undo {
        let seat = self.current;
        let penguin = self.penguins[seat]
            .iter()
            .position(|&p| p == mv.from)
            .unwrap_or(0);

        let tile = self.board.remove(mv.from);
        self.fish[seat] += tile.map(|t| t.fish as u32).unwrap_or(0);
        self.occupied.remove(&mv.from);
        self.occupied.insert(mv.to);
        self.penguins[seat][penguin] = mv.to;

        let previous = self.current;
        let seats = self.seats.len();
        if let Some(next) = (1..=seats)
            .map(|step| (seat + step) % seats)
            .find(|&s| self.can_move(s))
        {
            self.current = next;
        }

        Undo {
            seat,
            penguin,
            mv,
            tile,
            previous,
        }
    }

    pub fn undo(&mut self, undo: Undo) {
        let Undo {
            seat,
            penguin,
            mv,
            tile,
            previous,
        } = undo;

        self.current = previous;
        self.penguins[seat][penguin] = mv.from;
        self.occupied.remove(&mv.to);
        self.occupied.insert(mv.from);
        self.fish[seat] -= tile.map(|t| t.fish as u32).unwrap_or(0);
        self.board.set(mv.from, tile);
    }
}
