//! Plain text rendering of a game snapshot.

use crate::game::Game;
use fish_core::{HexCoord, Phase};
use std::fmt::Write;

const WATER: &str = " ~ ";

/// Board, scoreboard and recent moves
pub fn render(game: &Game) -> String {
    let mut out = String::new();
    out.push_str(&render_header(game));
    out.push('\n');
    out.push_str(&render_board(game));
    out.push('\n');
    out.push_str(&render_scoreboard(game));
    if !game.history().is_empty() {
        out.push('\n');
        out.push_str(&render_history(game));
    }
    out
}

pub fn render_header(game: &Game) -> String {
    let phase = match game.phase() {
        Phase::Placing => format!("placing ({} left)", game.penguins_to_place()),
        Phase::Playing => "playing".to_string(),
        Phase::GameOver => "game over".to_string(),
    };
    format!("Turn {} | {}\n", game.turn(), phase)
}

/// One line per row. Odd rows are indented half a cell.
/// Tiles show their fish `(n)`, penguins their owner's color `<R>`.
pub fn render_board(game: &Game) -> String {
    let board = game.board();
    let mut out = String::new();

    for row in 0..board.rows {
        let mut line = format!("{:>2} ", row);
        if row & 1 == 1 {
            line.push_str("  ");
        }

        let cells: Vec<String> = (0..board.cols)
            .map(|col| {
                let coord = HexCoord::new(row, col);
                if let Some(penguin) = game.penguin_at(coord) {
                    let glyph = game
                        .player(penguin.owner)
                        .map(|p| p.color.glyph())
                        .unwrap_or('?');
                    format!("<{}>", glyph)
                } else if let Some(tile) = board.get(coord) {
                    format!("({})", tile.fish)
                } else {
                    WATER.to_string()
                }
            })
            .collect();

        line.push_str(&cells.join(" "));
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}

pub fn render_scoreboard(game: &Game) -> String {
    let current = game.current_player().map(|p| p.id);
    let mut out = String::new();

    for player in game.players() {
        let marker = if Some(player.id) == current { '>' } else { ' ' };
        let active = game.penguins_of(player.id).count();
        let _ = writeln!(
            out,
            "{} {:<12} [{}] fish {:>3}  tiles {:>2}  penguins {}",
            marker,
            player.name,
            player.color.glyph(),
            player.score.fish,
            player.score.tiles,
            active
        );
    }

    if game.is_over() {
        let names: Vec<&str> = game
            .winners()
            .into_iter()
            .filter_map(|id| game.player(id).map(|p| p.name.as_str()))
            .collect();
        let label = if names.len() > 1 { "Winners" } else { "Winner" };
        let _ = writeln!(out, "{}: {}", label, names.join(", "));
    }

    out
}

/// Last few moves, oldest first
pub fn render_history(game: &Game) -> String {
    let mut out = String::from("Recent moves:\n");
    for record in game.history() {
        let name = game
            .player(record.player)
            .map(|p| p.name.as_str())
            .unwrap_or("?");
        let _ = writeln!(
            out,
            "  {:>3}. {} {} -> {} +{}",
            record.turn, name, record.from, record.to, record.fish
        );
    }
    out
}
