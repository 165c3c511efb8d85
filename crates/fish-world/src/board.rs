//! Hexagonal ice floe board.

use fish_core::{BoardConfig, Direction, HexCoord, Tile};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// A bounded `rows` x `cols` hex board in odd-r offset layout.
/// Each slot holds a tile or open water.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Board {
    pub rows: i32,
    pub cols: i32,
    tiles: Vec<Option<Tile>>,
}

impl Board {
    /// Board of open water
    pub fn new(rows: i32, cols: i32) -> Self {
        let size = (rows.max(0) as usize).saturating_mul(cols.max(0) as usize);
        Self {
            rows,
            cols,
            tiles: vec![None; size],
        }
    }

    /// Board with every slot holding `fish`
    pub fn filled(rows: i32, cols: i32, fish: u8) -> Self {
        let mut board = Self::new(rows, cols);
        board.tiles.fill(Some(Tile::new(fish)));
        board
    }

    /// Generate a board from configuration
    pub fn from_config(config: &BoardConfig, rng: &mut ChaCha8Rng) -> Self {
        let mut board = Self::new(config.rows, config.cols);

        for row in 0..config.rows {
            for col in 0..config.cols {
                if rng.gen::<f32>() < config.hole_probability {
                    continue;
                }
                let fish = rng.gen_range(config.min_fish..=config.max_fish);
                board.set(HexCoord::new(row, col), Some(Tile::new(fish)));
            }
        }

        board
    }

    pub fn contains(&self, coord: HexCoord) -> bool {
        coord.in_bounds(self.rows, self.cols)
    }

    pub fn clamp(&self, coord: HexCoord) -> HexCoord {
        coord.clamp(self.rows, self.cols)
    }

    /// Tile at `coord`, `None` for water or outside the board
    pub fn get(&self, coord: HexCoord) -> Option<&Tile> {
        self.index(coord).and_then(|i| self.tiles[i].as_ref())
    }

    pub fn has_tile(&self, coord: HexCoord) -> bool {
        self.get(coord).is_some()
    }

    /// Set a slot. Coordinates outside the board are ignored.
    pub fn set(&mut self, coord: HexCoord, tile: Option<Tile>) {
        if let Some(i) = self.index(coord) {
            self.tiles[i] = tile;
        }
    }

    /// Take the tile off the board, leaving water
    pub fn remove(&mut self, coord: HexCoord) -> Option<Tile> {
        self.index(coord).and_then(|i| self.tiles[i].take())
    }

    /// Adjacent tiles (water and off-board cells skipped)
    pub fn neighbors(&self, coord: HexCoord) -> impl Iterator<Item = (HexCoord, Tile)> + '_ {
        coord
            .neighbors()
            .into_iter()
            .filter_map(move |n| self.get(n).map(|tile| (n, *tile)))
    }

    /// Cells reachable from `from` by sliding in a straight line.
    ///
    /// Each ray stops before water, the board edge, or any cell for which
    /// `blocked` returns true.
    pub fn slide_targets<F>(&self, from: HexCoord, blocked: F) -> Vec<HexCoord>
    where
        F: Fn(HexCoord) -> bool,
    {
        let mut targets = Vec::new();

        for direction in Direction::all() {
            let mut cursor = from.step(direction);
            while self.has_tile(cursor) && !blocked(cursor) {
                targets.push(cursor);
                cursor = cursor.step(direction);
            }
        }

        targets
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.is_some()).count()
    }

    pub fn total_fish(&self) -> u32 {
        self.tiles.iter().flatten().map(|t| t.fish as u32).sum()
    }

    /// All tiles with their coordinates, row by row
    pub fn iter(&self) -> impl Iterator<Item = (HexCoord, &Tile)> + '_ {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(move |(i, tile)| tile.as_ref().map(|t| (self.index_to_coord(i), t)))
    }

    fn index(&self, coord: HexCoord) -> Option<usize> {
        if self.contains(coord) {
            Some(coord.row as usize * self.cols as usize + coord.col as usize)
        } else {
            None
        }
    }

    fn index_to_coord(&self, index: usize) -> HexCoord {
        let cols = self.cols as usize;
        HexCoord::new((index / cols) as i32, (index % cols) as i32)
    }
}
