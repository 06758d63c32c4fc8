//! The 5x5 scoring wall and the adjacency scoring algorithm.

use serde::Serialize;

use crate::tiles::Color;
use crate::BOARD_SIZE;

/// One cell of the wall. The color is fixed by the layout; only the
/// occupied flag ever changes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WallSpace {
    pub color: Color,
    pub occupied: bool,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize)]
pub struct WallCoordinate {
    pub row: usize,
    pub col: usize,
}

impl WallCoordinate {
    pub fn new(row: usize, col: usize) -> Self {
        WallCoordinate { row, col }
    }
}

/// Points earned by one tile placement and the cells that earned them
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct WallScore {
    pub score: i32,
    /// Neighbouring runs first (left, right, up, down), then the placed tile
    pub tiles: Vec<WallCoordinate>,
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Wall {
    spaces: [[WallSpace; BOARD_SIZE]; BOARD_SIZE],
}

impl Wall {
    /// Build the layout: row `r`, column `c` takes `palette[(c - r) mod 5]`,
    /// so each color appears once per row and once per column.
    pub fn new(palette: &[Color; BOARD_SIZE]) -> Self {
        let spaces = std::array::from_fn(|row| {
            std::array::from_fn(|col| WallSpace {
                color: palette[(col + BOARD_SIZE - row) % BOARD_SIZE],
                occupied: false,
            })
        });
        Wall { spaces }
    }

    /// The cell at `coord`, or `None` off the wall
    pub fn space(&self, coord: WallCoordinate) -> Option<WallSpace> {
        self.spaces.get(coord.row)?.get(coord.col).copied()
    }

    pub fn spaces(&self) -> &[[WallSpace; BOARD_SIZE]; BOARD_SIZE] {
        &self.spaces
    }

    /// False for coordinates off the wall
    pub fn is_occupied(&self, row: usize, col: usize) -> bool {
        self.space(WallCoordinate::new(row, col))
            .is_some_and(|s| s.occupied)
    }

    /// Column in `row` whose fixed color is `color`
    pub fn column_of(&self, row: usize, color: Color) -> Option<usize> {
        self.spaces.get(row)?.iter().position(|s| s.color == color)
    }

    pub fn row_has_color(&self, row: usize, color: Color) -> bool {
        self.spaces
            .get(row)
            .is_some_and(|r| r.iter().any(|s| s.color == color && s.occupied))
    }

    /// Occupy the cell of `row` matching `color`. `None` when the row does
    /// not exist or that cell is already taken.
    pub fn move_tile_to_wall(&mut self, color: Color, row: usize) -> Option<WallCoordinate> {
        let col = self.column_of(row, color)?;
        let space = &mut self.spaces[row][col];
        if space.occupied {
            return None;
        }
        space.occupied = true;
        Some(WallCoordinate { row, col })
    }

    /// Score the tile just placed at `coord`.
    ///
    /// A horizontal run of neighbours is worth its length plus one, and so is
    /// a vertical run; a tile with neighbours both ways earns both. A tile
    /// with no neighbours is worth 1. `None` for a coordinate off the wall.
    pub fn score_tile(&self, coord: WallCoordinate) -> Option<WallScore> {
        let WallCoordinate { row, col } = coord;
        if row >= BOARD_SIZE || col >= BOARD_SIZE {
            return None;
        }

        let mut horizontal = Vec::new();
        for c in (0..col).rev() {
            if !self.is_occupied(row, c) {
                break;
            }
            horizontal.push(WallCoordinate::new(row, c));
        }
        for c in col + 1..BOARD_SIZE {
            if !self.is_occupied(row, c) {
                break;
            }
            horizontal.push(WallCoordinate::new(row, c));
        }

        let mut vertical = Vec::new();
        for r in (0..row).rev() {
            if !self.is_occupied(r, col) {
                break;
            }
            vertical.push(WallCoordinate::new(r, col));
        }
        for r in row + 1..BOARD_SIZE {
            if !self.is_occupied(r, col) {
                break;
            }
            vertical.push(WallCoordinate::new(r, col));
        }

        let mut score = 0;
        if !horizontal.is_empty() {
            score += horizontal.len() as i32 + 1;
        }
        if !vertical.is_empty() {
            score += vertical.len() as i32 + 1;
        }
        if score == 0 {
            score = 1;
        }

        let mut tiles = horizontal;
        tiles.extend(vertical);
        tiles.push(coord);
        Some(WallScore { score, tiles })
    }

    /// False for a row off the wall
    pub fn is_row_complete(&self, row: usize) -> bool {
        self.spaces
            .get(row)
            .is_some_and(|r| r.iter().all(|s| s.occupied))
    }

    pub fn completed_rows(&self) -> usize {
        (0..BOARD_SIZE).filter(|&r| self.is_row_complete(r)).count()
    }

    pub fn completed_columns(&self) -> usize {
        (0..BOARD_SIZE)
            .filter(|&c| (0..BOARD_SIZE).all(|r| self.spaces[r][c].occupied))
            .count()
    }

    /// Colors with all five tiles on the wall
    pub fn completed_colors(&self) -> usize {
        let palette = self.spaces[0].map(|s| s.color);
        palette
            .iter()
            .filter(|&&color| (0..BOARD_SIZE).all(|r| self.row_has_color(r, color)))
            .count()
    }

    pub fn tile_count(&self) -> usize {
        self.spaces.iter().flatten().filter(|s| s.occupied).count()
    }

    /// Number of occupied cells holding `color`
    pub fn count_of(&self, color: Color) -> usize {
        self.spaces
            .iter()
            .flatten()
            .filter(|s| s.occupied && s.color == color)
            .count()
    }
}
