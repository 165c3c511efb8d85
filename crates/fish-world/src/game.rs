//! Game rules: placement, sliding moves, turn order and scoring.

use crate::board::Board;
use crate::penguin::{Penguin, Player};
use fish_core::{
    standings, winners, Error, GameConfig, HexCoord, Move, PenguinId, Phase, PlayerId, Result,
    RulesConfig, Standing,
};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use tracing::{debug, info};

/// A penguin put on the board during setup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placement {
    pub turn: u64,
    pub player: PlayerId,
    pub penguin: PenguinId,
    pub position: HexCoord,
    /// Penguins already stranded when play begins
    pub retired: Vec<Retirement>,
}

/// A completed slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub turn: u64,
    pub player: PlayerId,
    pub penguin: PenguinId,
    pub from: HexCoord,
    pub to: HexCoord,
    /// Fish on the tile left behind
    pub fish: u8,
}

/// A stranded penguin taken off the board
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retirement {
    pub player: PlayerId,
    pub penguin: PenguinId,
    pub position: HexCoord,
    pub fish: u8,
}

/// Outcome of [`Game::apply_move`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    pub record: MoveRecord,
    pub retired: Vec<Retirement>,
}

/// Full game state. Owns the board, players and penguins.
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    /// Seats in play order, youngest first
    players: Vec<Player>,
    /// Indexed by `PenguinId`
    penguins: Vec<Penguin>,
    occupancy: HashMap<HexCoord, PenguinId>,
    phase: Phase,
    current: usize,
    penguins_per_player: u8,
    rules: RulesConfig,
    history: VecDeque<MoveRecord>,
    turn: u64,
}

impl Game {
    /// Generate a board and seat the configured players
    pub fn new(config: &GameConfig, rng: &mut ChaCha8Rng) -> Result<Self> {
        config.validate()?;
        let board = Board::from_config(&config.board, rng);
        let players = config
            .players
            .iter()
            .enumerate()
            .map(|(i, p)| Player::from_config(PlayerId(i as u8), p))
            .collect();
        Self::with_board(board, players, config.rules.clone())
    }

    /// Start a game on a prepared board
    pub fn with_board(board: Board, mut players: Vec<Player>, rules: RulesConfig) -> Result<Self> {
        if players.is_empty() {
            return Err(Error::Validation("Game needs at least one player".to_string()));
        }

        players.sort_by_key(|p| (p.age, p.id));

        let penguins_per_player = rules.penguins_for(players.len());
        let needed = penguins_per_player as usize * players.len();
        if needed == 0 || needed > board.tile_count() {
            return Err(Error::Validation(format!(
                "Board has {} tiles but {} penguins must be placed",
                board.tile_count(),
                needed
            )));
        }

        Ok(Self {
            board,
            players,
            penguins: Vec::with_capacity(needed),
            occupancy: HashMap::new(),
            phase: Phase::Placing,
            current: 0,
            penguins_per_player,
            rules,
            history: VecDeque::new(),
            turn: 0,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Players in seat order
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Every penguin ever placed, including retired ones
    pub fn penguins(&self) -> &[Penguin] {
        &self.penguins
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    pub fn penguins_per_player(&self) -> u8 {
        self.penguins_per_player
    }

    /// Number of placements and moves applied so far
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Most recent moves, oldest first
    pub fn history(&self) -> &VecDeque<MoveRecord> {
        &self.history
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Player to act, `None` once the game is over
    pub fn current_player(&self) -> Option<&Player> {
        if self.is_over() {
            None
        } else {
            self.players.get(self.current)
        }
    }

    pub fn penguin_at(&self, coord: HexCoord) -> Option<&Penguin> {
        self.occupancy
            .get(&coord)
            .map(|id| &self.penguins[id.0 as usize])
    }

    pub fn is_occupied(&self, coord: HexCoord) -> bool {
        self.occupancy.contains_key(&coord)
    }

    /// Active penguins of `player`, in placement order
    pub fn penguins_of(&self, player: PlayerId) -> impl Iterator<Item = &Penguin> + '_ {
        self.penguins
            .iter()
            .filter(move |p| p.owner == player && p.is_active())
    }

    /// Penguins still waiting to be placed
    pub fn penguins_to_place(&self) -> usize {
        (self.penguins_per_player as usize * self.players.len()).saturating_sub(self.penguins.len())
    }

    /// Free tiles a penguin may be placed on, row by row
    pub fn placement_candidates(&self) -> Vec<HexCoord> {
        self.board
            .iter()
            .map(|(coord, _)| coord)
            .filter(|coord| !self.is_occupied(*coord))
            .collect()
    }

    /// Put the current player's next penguin on `coord`
    pub fn place_penguin(&mut self, coord: HexCoord) -> Result<Placement> {
        if self.phase != Phase::Placing {
            return Err(Error::InvalidState(format!(
                "Cannot place penguins during {:?}",
                self.phase
            )));
        }

        let coord = self.clamped(coord);
        if !self.board.has_tile(coord) {
            return Err(Error::IllegalMove(format!("No ice at {}", coord)));
        }
        if self.is_occupied(coord) {
            return Err(Error::IllegalMove(format!("{} already has a penguin", coord)));
        }

        let player = self.players[self.current].id;
        let id = PenguinId(self.penguins.len() as u16);
        self.penguins.push(Penguin::new(id, player, coord));
        self.occupancy.insert(coord, id);
        self.turn += 1;

        debug!(
            event = "penguin_placed",
            player = %player,
            penguin = %id,
            row = coord.row,
            col = coord.col,
            turn = self.turn,
            "Penguin placed"
        );

        let mut placement = Placement {
            turn: self.turn,
            player,
            penguin: id,
            position: coord,
            retired: Vec::new(),
        };

        if self.penguins_to_place() == 0 {
            info!(
                event = "placement_complete",
                penguins = self.penguins.len(),
                "All penguins placed, play begins"
            );
            self.phase = Phase::Playing;
            // advance_turn looks at seat 0, the youngest, first
            self.current = self.players.len() - 1;
            placement.retired = self.advance_turn();
        } else {
            self.current = (self.current + 1) % self.players.len();
        }

        Ok(placement)
    }

    /// Destinations a penguin on `from` can slide to
    pub fn legal_moves_from(&self, from: HexCoord) -> Vec<HexCoord> {
        self.board
            .slide_targets(from, |coord| self.occupancy.contains_key(&coord))
    }

    /// Every legal move of `player`'s active penguins
    pub fn legal_moves(&self, player: PlayerId) -> Vec<Move> {
        self.penguins_of(player)
            .flat_map(|p| {
                self.legal_moves_from(p.position)
                    .into_iter()
                    .map(move |to| Move::new(p.position, to))
            })
            .collect()
    }

    pub fn can_move(&self, player: PlayerId) -> bool {
        self.penguins_of(player)
            .any(|p| !self.legal_moves_from(p.position).is_empty())
    }

    /// Slide one of the current player's penguins.
    ///
    /// The destination is clamped into the board before it is checked.
    pub fn apply_move(&mut self, mv: Move) -> Result<TurnReport> {
        if self.phase != Phase::Playing {
            return Err(Error::InvalidState(format!(
                "Cannot move penguins during {:?}",
                self.phase
            )));
        }

        let player = self.players[self.current].id;
        let to = self.clamped(mv.to);

        let penguin_id = *self
            .occupancy
            .get(&mv.from)
            .ok_or_else(|| Error::IllegalMove(format!("No penguin at {}", mv.from)))?;

        if self.penguins[penguin_id.0 as usize].owner != player {
            return Err(Error::IllegalMove(format!(
                "Penguin at {} does not belong to {}",
                mv.from, player
            )));
        }
        if !self.legal_moves_from(mv.from).contains(&to) {
            return Err(Error::IllegalMove(format!(
                "{} cannot slide to {}",
                mv.from, to
            )));
        }

        let fish = self.board.remove(mv.from).map(|t| t.fish).unwrap_or(0);
        self.occupancy.remove(&mv.from);
        self.occupancy.insert(to, penguin_id);
        self.penguins[penguin_id.0 as usize].move_to(to, fish);

        let seat = &mut self.players[self.current];
        seat.score.collect(fish);
        seat.score.moves += 1;
        self.turn += 1;

        let record = MoveRecord {
            turn: self.turn,
            player,
            penguin: penguin_id,
            from: mv.from,
            to,
            fish,
        };

        debug!(
            event = "penguin_moved",
            player = %player,
            penguin = %penguin_id,
            from = %mv.from,
            to = %to,
            fish,
            turn = self.turn,
            "Penguin moved"
        );

        if self.rules.history_len > 0 {
            if self.history.len() == self.rules.history_len {
                self.history.pop_front();
            }
            self.history.push_back(record.clone());
        }

        let retired = self.advance_turn();

        Ok(TurnReport { record, retired })
    }

    /// Current ranking
    pub fn standings(&self) -> Vec<Standing> {
        standings(
            self.players
                .iter()
                .map(|p| (p.id, p.name.as_str(), p.color, p.score)),
        )
    }

    /// Players holding the most fish
    pub fn winners(&self) -> Vec<PlayerId> {
        winners(&self.standings())
    }

    fn clamped(&self, coord: HexCoord) -> HexCoord {
        let clamped = self.board.clamp(coord);
        if clamped != coord {
            debug!(requested = %coord, clamped = %clamped, "Clamped position into board");
        }
        clamped
    }

    /// Hand the turn to the next seat able to move, or end the game
    fn advance_turn(&mut self) -> Vec<Retirement> {
        let retired = if self.rules.remove_stranded_penguins {
            self.retire_stranded()
        } else {
            Vec::new()
        };

        let seats = self.players.len();
        for step in 1..=seats {
            let seat = (self.current + step) % seats;
            if self.can_move(self.players[seat].id) {
                self.current = seat;
                return retired;
            }
        }

        self.finish();
        retired
    }

    /// Remove penguins with no legal move, scoring the tile under each.
    /// Removing a tile can strand a neighbor, so sweep until stable.
    fn retire_stranded(&mut self) -> Vec<Retirement> {
        let mut retired = Vec::new();

        loop {
            let stranded: Vec<PenguinId> = self
                .penguins
                .iter()
                .filter(|p| p.is_active() && self.legal_moves_from(p.position).is_empty())
                .map(|p| p.id)
                .collect();

            if stranded.is_empty() {
                return retired;
            }

            for id in stranded {
                let penguin = &mut self.penguins[id.0 as usize];
                let position = penguin.position;
                let owner = penguin.owner;
                let fish = self.board.remove(position).map(|t| t.fish).unwrap_or(0);
                penguin.retire(fish);
                self.occupancy.remove(&position);

                if let Some(player) = self.players.iter_mut().find(|p| p.id == owner) {
                    player.score.collect(fish);
                }

                info!(
                    event = "penguin_retired",
                    player = %owner,
                    penguin = %id,
                    row = position.row,
                    col = position.col,
                    fish,
                    "Stranded penguin removed from the floe"
                );

                retired.push(Retirement {
                    player: owner,
                    penguin: id,
                    position,
                    fish,
                });
            }
        }
    }

    fn finish(&mut self) {
        self.phase = Phase::GameOver;
        let standings = self.standings();
        info!(
            event = "game_over",
            turn = self.turn,
            tiles_left = self.board.tile_count(),
            leader = standings.first().map(|s| s.name.as_str()).unwrap_or(""),
            leader_fish = standings.first().map(|s| s.score.fish).unwrap_or(0),
            "Game over"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fish_core::{PlayerColor, Tile};
    use rand::SeedableRng;

    fn two_players() -> Vec<Player> {
        vec![
            Player::new(PlayerId(0), "Old", PlayerColor::Red, 40),
            Player::new(PlayerId(1), "Young", PlayerColor::Yellow, 8),
        ]
    }

    fn one_penguin_each() -> RulesConfig {
        RulesConfig {
            penguins_per_player: Some(1),
            ..Default::default()
        }
    }

    /// Two penguins on a single strip of ice: `Young` at col 0, `Old` at col 5
    fn strip_game(rules: RulesConfig) -> Game {
        let mut board = Board::filled(1, 6, 1);
        board.set(HexCoord::new(0, 2), Some(Tile::new(3)));
        let mut game = Game::with_board(board, two_players(), rules).unwrap();
        game.place_penguin(HexCoord::new(0, 0)).unwrap();
        game.place_penguin(HexCoord::new(0, 5)).unwrap();
        game
    }

    #[test]
    fn test_game_from_config() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let game = Game::new(&GameConfig::default(), &mut rng).unwrap();
        assert_eq!(game.phase(), Phase::Placing);
        assert_eq!(game.penguins_per_player(), 4);
        assert_eq!(game.penguins_to_place(), 8);
        // Youngest seat first
        assert_eq!(game.current_player().unwrap().name, "Player");
    }

    #[test]
    fn test_seats_ordered_by_age() {
        let game = Game::with_board(Board::filled(3, 3, 1), two_players(), one_penguin_each()).unwrap();
        assert_eq!(game.players()[0].name, "Young");
        assert_eq!(game.current_player().unwrap().id, PlayerId(1));
    }

    #[test]
    fn test_board_too_small() {
        let result = Game::with_board(Board::filled(1, 3, 1), two_players(), RulesConfig::default());
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_placement_rules() {
        let mut board = Board::filled(2, 3, 1);
        board.remove(HexCoord::new(1, 1));
        let mut game = Game::with_board(board, two_players(), one_penguin_each()).unwrap();

        assert!(matches!(
            game.place_penguin(HexCoord::new(1, 1)),
            Err(Error::IllegalMove(_))
        ));

        let placement = game.place_penguin(HexCoord::new(0, 0)).unwrap();
        assert_eq!(placement.player, PlayerId(1));
        assert_eq!(game.current_player().unwrap().id, PlayerId(0));

        assert!(matches!(
            game.place_penguin(HexCoord::new(0, 0)),
            Err(Error::IllegalMove(_))
        ));
        assert_eq!(game.placement_candidates().len(), 4);

        game.place_penguin(HexCoord::new(0, 2)).unwrap();
        assert_eq!(game.phase(), Phase::Playing);
        assert_eq!(game.current_player().unwrap().id, PlayerId(1));
    }

    #[test]
    fn test_placement_clamps_out_of_bounds() {
        let mut game = Game::with_board(Board::filled(3, 3, 1), two_players(), one_penguin_each()).unwrap();
        let placement = game.place_penguin(HexCoord::new(-4, 17)).unwrap();
        assert_eq!(placement.position, HexCoord::new(0, 2));
    }

    #[test]
    fn test_moves_cannot_pass_penguins() {
        let game = strip_game(one_penguin_each());
        let moves = game.legal_moves(PlayerId(1));
        let targets: Vec<_> = moves.iter().map(|m| m.to.col).collect();
        assert_eq!(targets, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_apply_move_collects_departure_tile() {
        let mut game = strip_game(one_penguin_each());

        let report = game
            .apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 3)))
            .unwrap();
        assert_eq!(report.record.fish, 1);
        assert!(!game.board().has_tile(HexCoord::new(0, 0)));
        assert_eq!(game.player(PlayerId(1)).unwrap().score.fish, 1);
        assert_eq!(game.current_player().unwrap().id, PlayerId(0));
        assert_eq!(game.history().len(), 1);
    }

    #[test]
    fn test_illegal_moves_are_rejected() {
        let mut game = strip_game(one_penguin_each());

        // Not your penguin
        let err = game.apply_move(Move::new(HexCoord::new(0, 5), HexCoord::new(0, 4)));
        assert!(matches!(err, Err(Error::IllegalMove(_))));

        // Jumping over the opponent
        let err = game.apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 5)));
        assert!(matches!(err, Err(Error::IllegalMove(_))));

        // Empty tile
        let err = game.apply_move(Move::new(HexCoord::new(0, 2), HexCoord::new(0, 3)));
        assert!(matches!(err, Err(Error::IllegalMove(_))));

        // Nothing changed
        assert_eq!(game.turn(), 2);
        assert_eq!(game.board().tile_count(), 6);
    }

    #[test]
    fn test_move_destination_is_clamped() {
        let mut game = strip_game(one_penguin_each());
        let report = game
            .apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(3, 4)))
            .unwrap();
        assert_eq!(report.record.to, HexCoord::new(0, 4));
    }

    #[test]
    fn test_stranded_penguin_retires_and_turn_skips() {
        let mut game = strip_game(one_penguin_each());

        // Young slides up against Old, who is then boxed in by water and Young
        let report = game
            .apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 4)))
            .unwrap();

        assert_eq!(report.retired.len(), 1);
        assert_eq!(report.retired[0].player, PlayerId(0));
        assert_eq!(report.retired[0].fish, 1);
        assert!(!game.board().has_tile(HexCoord::new(0, 5)));
        assert!(game.penguin_at(HexCoord::new(0, 5)).is_none());
        assert_eq!(game.player(PlayerId(0)).unwrap().score.fish, 1);

        // Old has nothing left on the ice, so Young moves again
        assert_eq!(game.current_player().unwrap().id, PlayerId(1));
    }

    #[test]
    fn test_game_over_scores_remaining_tiles_under_penguins() {
        // Board: [P][3][1][ ][P]  cols 0..5 with col 3 water
        let mut board = Board::filled(1, 5, 1);
        board.set(HexCoord::new(0, 1), Some(Tile::new(3)));
        board.remove(HexCoord::new(0, 3));
        let mut game = Game::with_board(board, two_players(), one_penguin_each()).unwrap();
        game.place_penguin(HexCoord::new(0, 0)).unwrap();
        let placement = game.place_penguin(HexCoord::new(0, 4)).unwrap();

        // Old at col 4 is stranded from the start and retires immediately
        assert_eq!(placement.retired.len(), 1);
        assert_eq!(game.player(PlayerId(0)).unwrap().score.fish, 1);
        assert!(!game.penguins()[1].is_active());
        assert_eq!(game.phase(), Phase::Playing);

        game.apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 2)))
            .unwrap();
        // Young at col 2 can still slide back west onto the 3
        assert_eq!(game.current_player().unwrap().id, PlayerId(1));

        game.apply_move(Move::new(HexCoord::new(0, 2), HexCoord::new(0, 1)))
            .unwrap();
        assert!(game.is_over());
        // 1 (col 0) + 1 (col 2) + 3 (retired on col 1)
        assert_eq!(game.player(PlayerId(1)).unwrap().score.fish, 5);
        assert_eq!(game.board().tile_count(), 0);
        assert_eq!(game.winners(), vec![PlayerId(1)]);
    }

    #[test]
    fn test_without_retirement_stranded_penguins_stay() {
        let mut board = Board::filled(1, 5, 1);
        board.remove(HexCoord::new(0, 3));
        let rules = RulesConfig {
            remove_stranded_penguins: false,
            ..one_penguin_each()
        };
        let mut game = Game::with_board(board, two_players(), rules).unwrap();
        game.place_penguin(HexCoord::new(0, 0)).unwrap();
        game.place_penguin(HexCoord::new(0, 4)).unwrap();

        assert!(game.penguins()[1].is_active());
        assert_eq!(game.player(PlayerId(0)).unwrap().score.fish, 0);
        // Old cannot move, so Young keeps the turn
        game.apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 1)))
            .unwrap();
        assert_eq!(game.current_player().unwrap().id, PlayerId(1));
    }

    #[test]
    fn test_history_is_bounded() {
        let rules = RulesConfig {
            history_len: 2,
            ..one_penguin_each()
        };
        let mut board = Board::filled(2, 8, 1);
        board.remove(HexCoord::new(1, 0));
        let mut game = Game::with_board(board, two_players(), rules).unwrap();
        game.place_penguin(HexCoord::new(0, 0)).unwrap();
        game.place_penguin(HexCoord::new(1, 7)).unwrap();

        for _ in 0..3 {
            let player = game.current_player().unwrap().id;
            let mv = game.legal_moves(player)[0];
            game.apply_move(mv).unwrap();
        }
        assert_eq!(game.history().len(), 2);
        assert_eq!(game.history().back().unwrap().turn, 5);
    }

    #[test]
    fn test_move_outside_play_phase() {
        let mut game = Game::with_board(Board::filled(3, 3, 1), two_players(), one_penguin_each()).unwrap();
        let err = game.apply_move(Move::new(HexCoord::new(0, 0), HexCoord::new(0, 1)));
        assert!(matches!(err, Err(Error::InvalidState(_))));
    }
}
