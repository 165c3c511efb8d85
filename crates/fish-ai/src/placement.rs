//! Setup phase: where to drop the next penguin.

use fish_core::HexCoord;
use fish_world::Game;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;

/// The `k` richest free tiles, most fish first, ties in row order
pub fn richest_free_tiles(game: &Game, k: usize) -> Vec<HexCoord> {
    let mut candidates: Vec<(u8, HexCoord)> = game
        .placement_candidates()
        .into_iter()
        .filter_map(|coord| game.board().get(coord).map(|tile| (tile.fish, coord)))
        .collect();

    candidates.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));
    candidates.into_iter().take(k).map(|(_, coord)| coord).collect()
}

/// Pick uniformly among the `k` richest free tiles
pub fn choose_placement(game: &Game, k: usize, rng: &mut ChaCha8Rng) -> Option<HexCoord> {
    richest_free_tiles(game, k).choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use fish_core::{PlayerColor, PlayerId, RulesConfig, Tile};
    use fish_world::{Board, Player};
    use rand::SeedableRng;

    fn game() -> Game {
        let mut board = Board::filled(2, 4, 1);
        board.set(HexCoord::new(1, 3), Some(Tile::new(3)));
        board.set(HexCoord::new(0, 2), Some(Tile::new(3)));
        board.set(HexCoord::new(1, 0), Some(Tile::new(2)));
        board.set(HexCoord::new(0, 1), Some(Tile::new(2)));
        let players = vec![
            Player::new(PlayerId(0), "A", PlayerColor::Red, 10),
            Player::new(PlayerId(1), "B", PlayerColor::Blue, 20),
        ];
        let rules = RulesConfig {
            penguins_per_player: Some(2),
            ..Default::default()
        };
        Game::with_board(board, players, rules).unwrap()
    }

    #[test]
    fn test_richest_free_tiles_order() {
        let game = game();
        let top = richest_free_tiles(&game, 3);
        assert_eq!(
            top,
            vec![HexCoord::new(0, 2), HexCoord::new(1, 3), HexCoord::new(0, 1)]
        );
    }

    #[test]
    fn test_occupied_tiles_are_skipped() {
        let mut game = game();
        game.place_penguin(HexCoord::new(0, 2)).unwrap();
        let top = richest_free_tiles(&game, 2);
        assert_eq!(top, vec![HexCoord::new(1, 3), HexCoord::new(0, 1)]);
    }

    #[test]
    fn test_choice_stays_in_top_k() {
        let game = game();
        let top = richest_free_tiles(&game, 3);
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..20 {
            let choice = choose_placement(&game, 3, &mut rng).unwrap();
            assert!(top.contains(&choice));
        }
        assert_eq!(choose_placement(&game, 1, &mut rng), Some(HexCoord::new(0, 2)));
    }
}
