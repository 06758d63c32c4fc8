//! Shared display utilities for rendering Azul game state in the terminal
//!
//! Provides colorized, human-readable output for boards, factories and moves.

use azul_engine::{
    Board, Color, Destination, DrawSource, Game, GameResult, Move, RoundScore, Tile, BOARD_SIZE,
};

// ANSI color codes for tile display
pub const ORANGE: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[94m";
pub const WHITE: &str = "\x1b[97m";
pub const BLACK: &str = "\x1b[90m";
pub const RED: &str = "\x1b[91m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[2m";

pub fn color_code(color: Color) -> &'static str {
    match color {
        Color::Orange => ORANGE,
        Color::Blue => BLUE,
        Color::White => WHITE,
        Color::Black => BLACK,
        Color::Red => RED,
    }
}

pub fn color_char(color: Color) -> char {
    match color {
        Color::Orange => 'O',
        Color::Blue => 'B',
        Color::White => 'W',
        Color::Black => 'K',
        Color::Red => 'R',
    }
}

pub fn display_tile(color: Color) -> String {
    format!("{}{}{}", color_code(color), color_char(color), RESET)
}

pub fn display_token(tile: Tile) -> String {
    match tile {
        Tile::Colored(c) => display_tile(c),
        Tile::FirstPlayerMarker => format!("{BOLD}1{RESET}"),
    }
}

fn display_tiles(tiles: &[Tile]) -> String {
    if tiles.is_empty() {
        return format!("{DIM}(empty){RESET}");
    }
    tiles
        .iter()
        .map(|&t| display_token(t))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Format a move for display
pub fn format_move(mv: &Move) -> String {
    let source = match mv.source {
        DrawSource::Factory(f) => format!("F{f}"),
        DrawSource::Center => "Center".to_string(),
    };
    let dest = match mv.destination {
        Destination::PatternLine(r) => format!("Line {}", r + 1),
        Destination::Floor => "Floor".to_string(),
    };
    format!("{} {} -> {}", source, display_tile(mv.color), dest)
}

/// Pattern lines, wall and floor of one board, one string per printed line
pub fn board_lines(board: &Board) -> Vec<String> {
    let mut lines = vec!["  Pattern Lines          Wall".to_string()];

    for row in 0..BOARD_SIZE {
        let line = &board.pattern_lines()[row];
        let mut out = String::from("  ");
        // Right-align the staging row against the wall
        out.push_str(&"  ".repeat(BOARD_SIZE - line.capacity()));
        for _ in 0..line.capacity() - line.count() {
            out.push_str(&format!("{DIM}.{RESET} "));
        }
        if let Some(color) = line.color() {
            for _ in 0..line.count() {
                out.push_str(&format!("{} ", display_tile(color)));
            }
        }

        out.push_str(" -> ");
        for space in &board.wall().spaces()[row] {
            if space.occupied {
                out.push_str(&format!("{} ", display_tile(space.color)));
            } else {
                // Expected color, dimmed
                out.push_str(&format!("{DIM}{}{RESET} ", color_char(space.color)));
            }
        }
        lines.push(out);
    }

    let floor: Vec<Tile> = board.floor().spaces().iter().map(|s| s.tile).collect();
    lines.push(format!(
        "  Floor: {}  {DIM}({}){RESET}",
        display_tiles(&floor),
        board.floor().penalty()
    ));
    lines
}

/// Display the full table and every player's board
///
/// If `highlight_player` is Some, that player's board is shown with emphasis.
pub fn display_game(game: &Game, highlight_player: Option<usize>) {
    println!("\n{BOLD}══════════════════════════════════════════════════════════════{RESET}");
    println!(
        "{BOLD}  Round {}{RESET}   |   Current Player: {}   |   Bag: {}   Lid: {}",
        game.round(),
        game.players()[game.current_player()].name(),
        game.bag_tile_count(),
        game.lid_tile_count()
    );
    println!("{BOLD}══════════════════════════════════════════════════════════════{RESET}\n");

    println!("{BOLD}FACTORIES:{RESET}");
    for (i, factory) in game.factories().iter().enumerate() {
        println!("  F{i}: {}", display_tiles(factory.tiles()));
    }
    println!("\n{BOLD}CENTER:{RESET} {}\n", display_tiles(game.center().tiles()));

    for (seat, player) in game.players().iter().enumerate() {
        let style = if highlight_player == Some(seat) { BOLD } else { DIM };
        let marker = if player.is_first_player() { " *" } else { "" };
        println!(
            "{style}PLAYER {seat}: {}{marker} (Score: {}){RESET}",
            player.name(),
            player.score()
        );
        for line in board_lines(player.board()) {
            println!("{line}");
        }
        println!();
    }
}

pub fn display_round_scores(game: &Game, scores: &[RoundScore]) {
    println!("\n{BOLD}Round scoring{RESET}");
    for s in scores {
        println!(
            "  {:<12} wall +{:<3} floor {:<4} total {}",
            game.players()[s.player].name(),
            s.wall_points,
            s.floor_penalty,
            s.score
        );
    }
}

pub fn display_result(game: &Game, result: &GameResult) {
    println!("\n{BOLD}═══════════════════════════════════════{RESET}");
    println!("{BOLD}                GAME OVER{RESET}");
    println!("{BOLD}═══════════════════════════════════════{RESET}");
    println!("{DIM}Ended by {:?}{RESET}", result.reason);

    for (seat, bonus) in result.bonuses.iter().enumerate() {
        println!(
            "  {:<12} bonus +{} ({} rows, {} columns, {} colors)",
            game.players()[seat].name(),
            bonus.points,
            bonus.rows,
            bonus.columns,
            bonus.colors
        );
    }
    println!();
    for (place, standing) in result.standings.iter().enumerate() {
        println!(
            "  {}. {:<12} {:>4}  ({} complete rows)",
            place + 1,
            standing.name,
            standing.score,
            standing.completed_rows
        );
    }
}
