//! A player's board: pattern lines, floor, wall and running score.

use serde::Serialize;
use tracing::trace;

use crate::error::{AzulError, AzulResult};
use crate::tiles::{Color, Tile};
use crate::wall::{Wall, WallScore};
use crate::{BOARD_SIZE, COLOR_BONUS, COLUMN_BONUS, FLOOR_CAPACITY, FLOOR_PENALTY, ROW_BONUS};

// =============================================================================
// Pattern lines
// =============================================================================

/// A staging row. Every tile on it has the same color, so a color and a
/// count describe it fully.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct PatternLine {
    color: Option<Color>,
    count: usize,
    capacity: usize,
}

impl PatternLine {
    pub fn new(capacity: usize) -> Self {
        PatternLine {
            color: None,
            count: 0,
            capacity,
        }
    }

    /// `None` while the line is empty
    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn is_full(&self) -> bool {
        self.count >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    fn push(&mut self, color: Color) {
        debug_assert!(self.color.is_none() || self.color == Some(color));
        self.color = Some(color);
        self.count += 1;
    }
}

// =============================================================================
// Floor
// =============================================================================

/// An occupied floor slot and the penalty printed under it
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FloorSpace {
    pub tile: Tile,
    pub score_modifier: i32,
}

/// Penalty track of fixed length. Tiles past the last slot are thrown out.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct Floor {
    spaces: Vec<FloorSpace>,
}

impl Floor {
    pub fn new() -> Self {
        Floor {
            spaces: Vec::with_capacity(FLOOR_CAPACITY),
        }
    }

    /// Put a tile in the next free slot, or hand it back when the floor is full
    fn add(&mut self, tile: Tile) -> Option<Tile> {
        let slot = self.spaces.len();
        if slot >= FLOOR_CAPACITY {
            return Some(tile);
        }
        self.spaces.push(FloorSpace {
            tile,
            score_modifier: FLOOR_PENALTY[slot],
        });
        None
    }

    pub fn spaces(&self) -> &[FloorSpace] {
        &self.spaces
    }

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn free_spaces(&self) -> usize {
        FLOOR_CAPACITY - self.spaces.len()
    }

    pub fn penalty(&self) -> i32 {
        self.spaces.iter().map(|s| s.score_modifier).sum()
    }

    pub fn has_first_player_marker(&self) -> bool {
        self.spaces.iter().any(|s| s.tile.is_first_player_marker())
    }
}

// =============================================================================
// Round-end and game-end results
// =============================================================================

/// Result of moving completed pattern lines to the wall
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct PatternLineScoring {
    pub placements: Vec<WallScore>,
    pub points: i32,
    /// Tiles left over on the completed lines
    pub discarded: Vec<Tile>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FloorScoring {
    /// Sum of the occupied slots' modifiers (zero or negative)
    pub penalty: i32,
    pub removed: Vec<Tile>,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct FinalBonus {
    pub rows: usize,
    pub columns: usize,
    pub colors: usize,
    pub points: i32,
}

// =============================================================================
// Board
// =============================================================================

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Board {
    pattern_lines: [PatternLine; BOARD_SIZE],
    floor: Floor,
    wall: Wall,
    score: i32,
}

impl Board {
    pub fn new(palette: &[Color; BOARD_SIZE]) -> Self {
        Board {
            pattern_lines: std::array::from_fn(|i| PatternLine::new(i + 1)),
            floor: Floor::new(),
            wall: Wall::new(palette),
            score: 0,
        }
    }

    pub fn pattern_lines(&self) -> &[PatternLine; BOARD_SIZE] {
        &self.pattern_lines
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn wall(&self) -> &Wall {
        &self.wall
    }

    pub fn score(&self) -> i32 {
        self.score
    }

    /// The pattern line at `line`, provided it exists and still has room
    fn open_line(&self, line: usize) -> AzulResult<&PatternLine> {
        let pattern_line = self.pattern_lines.get(line).ok_or_else(|| {
            AzulError::invalid_action(format!("There is no pattern line #{line}"))
        })?;
        if pattern_line.is_full() {
            return Err(AzulError::invalid_action(
                "The line is already full of tiles, please choose another line",
            ));
        }
        Ok(pattern_line)
    }

    /// Check that `color` may go on pattern line `line` without moving anything
    pub fn check_placement(&self, line: usize, color: Color) -> AzulResult<()> {
        let pattern_line = self.open_line(line)?;
        if let Some(existing) = pattern_line.color {
            if existing != color {
                return Err(AzulError::invalid_action(format!(
                    "Pattern line #{line} already holds {existing} tiles"
                )));
            }
        }
        if self.wall.row_has_color(line, color) {
            return Err(AzulError::invalid_action(format!(
                "The wall already has a {color} tile in row #{line}"
            )));
        }
        Ok(())
    }

    /// Place drawn tiles on pattern line `line`.
    ///
    /// The marker and anything past the line's capacity go to the floor.
    /// Returns the tiles that did not fit on the floor either.
    pub fn place_tiles(&mut self, line: usize, tiles: Vec<Tile>) -> AzulResult<Vec<Tile>> {
        match single_color(&tiles)? {
            Some(color) => self.check_placement(line, color)?,
            None => {
                self.open_line(line)?;
            }
        }

        let mut discarded = Vec::new();
        for tile in tiles {
            let to_floor = match tile {
                Tile::Colored(c) if !self.pattern_lines[line].is_full() => {
                    self.pattern_lines[line].push(c);
                    None
                }
                other => Some(other),
            };
            if let Some(tile) = to_floor {
                discarded.extend(self.floor.add(tile));
            }
        }

        trace!(
            line,
            count = self.pattern_lines[line].count,
            floor = self.floor.len(),
            "placed tiles"
        );
        Ok(discarded)
    }

    /// Put every tile straight onto the floor. Returns the overflow.
    pub fn place_on_floor(&mut self, tiles: Vec<Tile>) -> Vec<Tile> {
        tiles
            .into_iter()
            .filter_map(|tile| self.floor.add(tile))
            .collect()
    }

    pub fn reset_pattern_line(&mut self, line: usize) -> AzulResult<()> {
        let pattern_line = self.pattern_lines.get_mut(line).ok_or_else(|| {
            AzulError::invalid_action(format!("There is no pattern line #{line}"))
        })?;
        *pattern_line = PatternLine::new(line + 1);
        Ok(())
    }

    pub fn reset_pattern_lines(&mut self) {
        self.pattern_lines = std::array::from_fn(|i| PatternLine::new(i + 1));
    }

    pub fn reset_floor(&mut self) {
        self.floor = Floor::new();
    }

    /// Move one tile from every exactly-full line to the wall and score it.
    /// The rest of each completed line is discarded; other lines are kept.
    pub fn score_pattern_lines(&mut self) -> PatternLineScoring {
        let mut result = PatternLineScoring::default();

        for line in 0..BOARD_SIZE {
            let pattern_line = self.pattern_lines[line];
            if pattern_line.count != pattern_line.capacity {
                continue;
            }
            let Some(color) = pattern_line.color else {
                continue;
            };

            let placed = self
                .wall
                .move_tile_to_wall(color, line)
                .and_then(|coord| self.wall.score_tile(coord));
            let Some(wall_score) = placed else {
                unreachable!("pattern line {line} held {color}, already on the wall");
            };
            self.score += wall_score.score;
            result.points += wall_score.score;
            result.placements.push(wall_score);

            result
                .discarded
                .extend(vec![Tile::Colored(color); pattern_line.count - 1]);
            self.pattern_lines[line] = PatternLine::new(line + 1);
        }

        result
    }

    /// Apply the floor penalties to the score and clear the floor.
    /// The score is not clamped at zero.
    pub fn score_floor(&mut self) -> FloorScoring {
        let penalty = self.floor.penalty();
        self.score += penalty;
        let removed = self.floor.spaces.iter().map(|s| s.tile).collect();
        self.reset_floor();
        FloorScoring { penalty, removed }
    }

    /// Bonuses for complete rows, complete columns and complete colors
    pub fn final_bonus(&self) -> FinalBonus {
        let rows = self.wall.completed_rows();
        let columns = self.wall.completed_columns();
        let colors = self.wall.completed_colors();
        FinalBonus {
            rows,
            columns,
            colors,
            points: rows as i32 * ROW_BONUS
                + columns as i32 * COLUMN_BONUS
                + colors as i32 * COLOR_BONUS,
        }
    }

    pub(crate) fn apply_final_bonus(&mut self) -> FinalBonus {
        let bonus = self.final_bonus();
        self.score += bonus.points;
        bonus
    }

    /// Colored tiles of `color` anywhere on the board
    pub fn count_of(&self, color: Color) -> usize {
        let on_lines: usize = self
            .pattern_lines
            .iter()
            .filter(|l| l.color == Some(color))
            .map(|l| l.count)
            .sum();
        let on_floor = self
            .floor
            .spaces
            .iter()
            .filter(|s| s.tile == Tile::Colored(color))
            .count();
        on_lines + on_floor + self.wall.count_of(color)
    }
}

/// The one color shared by the colored tiles, `None` if there are none
fn single_color(tiles: &[Tile]) -> AzulResult<Option<Color>> {
    if tiles.is_empty() {
        return Err(AzulError::invalid_action("There are no tiles to place"));
    }
    let mut colors = tiles.iter().filter_map(|t| t.color());
    let first = colors.next();
    if let Some(first) = first {
        if colors.any(|c| c != first) {
            return Err(AzulError::invalid_action(
                "The tiles to place must all be the same color",
            ));
        }
    }
    Ok(first)
}
