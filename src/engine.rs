//! Core game engine for the Flood-It puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Tile`: the colors a cell can hold.
//! - `Board`: a rectangular grid of tiles with flood-fill, painting and display.
//! - `Game`: an interactive session with a move counter and undo history.
//!
//! The flood region is the set of cells 4-connected to the top-left corner
//! through cells of the corner's color. Painting recolors that region, which
//! merges it with every adjacent cell of the new color. The puzzle is solved
//! when the whole board holds a single color.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;
use std::fmt;

use crate::error::BoardError;

/// A cell color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tile {
    Red,
    Green,
    Blue,
    Yellow,
    Purple,
    Cyan,
}

impl Tile {
    /// Every color, in the order rules and color counts refer to them.
    pub const ALL: [Tile; 6] = [
        Tile::Red,
        Tile::Green,
        Tile::Blue,
        Tile::Yellow,
        Tile::Purple,
        Tile::Cyan,
    ];

    /// Converts the tile to its character representation.
    ///
    /// # Examples
    ///
    /// ```
    /// use gps_solver::engine::Tile;
    /// assert_eq!(Tile::Red.to_char(), 'R');
    /// assert_eq!(Tile::Cyan.to_char(), 'C');
    /// ```
    pub fn to_char(self) -> char {
        match self {
            Tile::Red => 'R',
            Tile::Green => 'G',
            Tile::Blue => 'B',
            Tile::Yellow => 'Y',
            Tile::Purple => 'P',
            Tile::Cyan => 'C',
        }
    }

    /// Parses a tile character, case-insensitively.
    pub fn from_char(ch: char) -> Option<Tile> {
        match ch.to_ascii_uppercase() {
            'R' => Some(Tile::Red),
            'G' => Some(Tile::Green),
            'B' => Some(Tile::Blue),
            'Y' => Some(Tile::Yellow),
            'P' => Some(Tile::Purple),
            'C' => Some(Tile::Cyan),
            _ => None,
        }
    }

    /// Returns the ANSI background color code for terminal output.
    fn to_ansi_color_code(self) -> &'static str {
        match self {
            Tile::Red => "41",
            Tile::Green => "42",
            Tile::Yellow => "43",
            Tile::Blue => "44",
            Tile::Purple => "45",
            Tile::Cyan => "46",
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Tile::Red => "red",
            Tile::Green => "green",
            Tile::Blue => "blue",
            Tile::Yellow => "yellow",
            Tile::Purple => "purple",
            Tile::Cyan => "cyan",
        };
        f.write_str(name)
    }
}

/// A rectangular Flood-It board.
///
/// Boards are never empty: both dimensions are at least one.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    grid: Vec<Vec<Tile>>,
}

impl Board {
    /// Creates a board with random colors drawn from the first `colors` entries
    /// of [`Tile::ALL`].
    ///
    /// The same `(rows, cols, colors, seed)` always produces the same board.
    ///
    /// # Errors
    /// Returns [`BoardError::Dimensions`] if either dimension is zero, and
    /// [`BoardError::ColorCount`] if `colors` is zero or exceeds the palette.
    pub fn new_random_with_seed(
        rows: usize,
        cols: usize,
        colors: usize,
        seed: u64,
    ) -> Result<Self, BoardError> {
        if rows == 0 || cols == 0 {
            return Err(BoardError::Dimensions { rows, cols });
        }
        if colors == 0 || colors > Tile::ALL.len() {
            return Err(BoardError::ColorCount {
                max: Tile::ALL.len(),
                found: colors,
            });
        }

        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = (0..rows)
            .map(|_| {
                (0..cols)
                    .map(|_| Tile::ALL[rng.gen_range(0..colors)])
                    .collect()
            })
            .collect();
        Ok(Board { grid })
    }

    /// Creates a board from a predefined grid.
    ///
    /// # Errors
    /// Returns [`BoardError::Empty`] for a grid without rows or with an empty
    /// first row, and [`BoardError::RaggedRow`] when rows differ in length.
    pub fn from_grid(grid: Vec<Vec<Tile>>) -> Result<Self, BoardError> {
        let expected = match grid.first() {
            Some(row) if !row.is_empty() => row.len(),
            _ => return Err(BoardError::Empty),
        };
        if let Some((row, found)) = grid
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != expected)
        {
            return Err(BoardError::RaggedRow {
                row,
                expected,
                found,
            });
        }
        Ok(Board { grid })
    }

    pub fn rows(&self) -> usize {
        self.grid.len()
    }

    pub fn cols(&self) -> usize {
        self.grid[0].len()
    }

    /// Returns the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn get_tile(&self, r: usize, c: usize) -> Tile {
        self.grid[r][c]
    }

    /// Sets the tile at row `r`, column `c`.
    ///
    /// # Panics
    /// Panics if the coordinates are outside the board.
    pub fn set_tile(&mut self, r: usize, c: usize, tile: Tile) {
        self.grid[r][c] = tile;
    }

    /// Color of the flood region, i.e. of the top-left cell.
    pub fn flood_color(&self) -> Tile {
        self.grid[0][0]
    }

    /// In-bounds orthogonal neighbours of `(r, c)`.
    pub fn neighbours(&self, r: usize, c: usize) -> impl Iterator<Item = (usize, usize)> {
        let (rows, cols) = (self.rows(), self.cols());
        let up = r.checked_sub(1).map(|nr| (nr, c));
        let down = (r + 1 < rows).then_some((r + 1, c));
        let left = c.checked_sub(1).map(|nc| (r, nc));
        let right = (c + 1 < cols).then_some((r, c + 1));
        [up, down, left, right].into_iter().flatten()
    }

    /// Finds the connected same-colored region containing `(r, c)`.
    ///
    /// Uses a breadth-first flood fill over orthogonal neighbours. The returned
    /// coordinates are sorted row-major.
    pub fn find_region(&self, r: usize, c: usize) -> Vec<(usize, usize)> {
        let color = self.get_tile(r, c);
        let mut region = Vec::new();
        let mut visited = vec![vec![false; self.cols()]; self.rows()];
        let mut q = VecDeque::new();

        q.push_back((r, c));
        visited[r][c] = true;

        while let Some((cr, cc)) = q.pop_front() {
            region.push((cr, cc));
            for (nr, nc) in self.neighbours(cr, cc) {
                if !visited[nr][nc] && self.grid[nr][nc] == color {
                    visited[nr][nc] = true;
                    q.push_back((nr, nc));
                }
            }
        }

        region.sort_unstable();
        region
    }

    /// The flood region: cells connected to the top-left corner.
    pub fn flood_region(&self) -> Vec<(usize, usize)> {
        self.find_region(0, 0)
    }

    /// Recolors the flood region with `color`.
    ///
    /// # Returns
    /// `false`, leaving the board untouched, if the region already has that color.
    pub fn paint(&mut self, color: Tile) -> bool {
        if self.flood_color() == color {
            return false;
        }
        for (r, c) in self.flood_region() {
            self.grid[r][c] = color;
        }
        true
    }

    /// Whether every cell holds the same color.
    pub fn is_uniform(&self) -> bool {
        let first = self.flood_color();
        self.grid.iter().flatten().all(|&tile| tile == first)
    }

    /// Colors present on the board, in [`Tile::ALL`] order.
    pub fn colors_present(&self) -> Vec<Tile> {
        Tile::ALL
            .into_iter()
            .filter(|tile| self.grid.iter().flatten().any(|t| t == tile))
            .collect()
    }

    /// Renders the board with ANSI colors, row and column numbers, and the
    /// given cells marked with `..`.
    pub fn to_string_with_highlight(&self, highlight: &[(usize, usize)]) -> String {
        let mut output = String::new();

        output.push_str("  ");
        for c_idx in 0..self.cols() {
            output.push_str(&format!("{:<2}", c_idx));
        }
        output.push('\n');

        for (r_idx, row) in self.grid.iter().enumerate() {
            output.push_str(&format!("{:<2}", r_idx));
            for (c_idx, tile) in row.iter().enumerate() {
                let content = if highlight.contains(&(r_idx, c_idx)) {
                    ".."
                } else {
                    "  "
                };
                output.push_str(&format!(
                    "\x1b[1;{};m{}\x1b[m",
                    tile.to_ansi_color_code(),
                    content
                ));
            }
            if r_idx + 1 < self.rows() {
                output.push('\n');
            }
        }

        output
    }

    /// Plain rows of tile characters, one string per row.
    pub fn to_rows(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| row.iter().map(|t| t.to_char()).collect())
            .collect()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(&[]))
    }
}

/// An interactive Flood-It session.
///
/// # Examples
/// ```
/// use gps_solver::engine::{Game, Tile};
/// use gps_solver::utils::board_from_str_array;
///
/// let board = board_from_str_array(&["RG", "GG"]).unwrap();
/// let mut game = Game::new_with_board(board);
/// assert!(game.process_move(Tile::Green));
/// assert!(game.is_solved());
/// assert_eq!(game.steps(), 1);
/// ```
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    steps: u32,
    history: Vec<Board>,
}

impl Game {
    pub fn new_with_board(initial_board: Board) -> Self {
        Game {
            board: initial_board,
            steps: 0,
            history: Vec::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Number of paints performed so far.
    pub fn steps(&self) -> u32 {
        self.steps
    }

    /// Paints the flood region with `color`.
    ///
    /// # Returns
    /// `false` if the paint is a no-op (same color as the region).
    pub fn process_move(&mut self, color: Tile) -> bool {
        let previous = self.board.clone();
        if !self.board.paint(color) {
            return false;
        }
        self.history.push(previous);
        self.steps += 1;
        true
    }

    /// Reverts the last paint. Returns `false` when there is nothing to undo.
    pub fn undo_last_move(&mut self) -> bool {
        match self.history.pop() {
            Some(previous) => {
                self.board = previous;
                self.steps -= 1;
                true
            }
            None => false,
        }
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_uniform()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::board_from_str_array;

    #[test]
    fn test_new_random_with_seed_determinism() {
        let a = Board::new_random_with_seed(6, 7, 4, 42).unwrap();
        let b = Board::new_random_with_seed(6, 7, 4, 42).unwrap();
        let c = Board::new_random_with_seed(6, 7, 4, 43).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.rows(), 6);
        assert_eq!(a.cols(), 7);
    }

    #[test]
    fn test_new_random_respects_color_count() {
        let board = Board::new_random_with_seed(10, 10, 3, 7).unwrap();
        for tile in board.colors_present() {
            assert!(Tile::ALL[..3].contains(&tile));
        }
    }

    #[test]
    fn test_new_random_rejects_bad_input() {
        assert!(matches!(
            Board::new_random_with_seed(0, 4, 3, 0),
            Err(BoardError::Dimensions { rows: 0, cols: 4 })
        ));
        assert!(matches!(
            Board::new_random_with_seed(4, 4, 7, 0),
            Err(BoardError::ColorCount { found: 7, .. })
        ));
    }

    #[test]
    fn test_from_grid_rejects_ragged_rows() {
        let grid = vec![vec![Tile::Red, Tile::Blue], vec![Tile::Red]];
        assert!(matches!(
            Board::from_grid(grid),
            Err(BoardError::RaggedRow {
                row: 1,
                expected: 2,
                found: 1
            })
        ));
        assert!(matches!(Board::from_grid(Vec::new()), Err(BoardError::Empty)));
    }

    #[test]
    fn test_tile_char_round_trip() {
        for tile in Tile::ALL {
            assert_eq!(Tile::from_char(tile.to_char()), Some(tile));
        }
        assert_eq!(Tile::from_char('r'), Some(Tile::Red));
        assert_eq!(Tile::from_char('X'), None);
    }

    #[test]
    fn test_flood_region() {
        let board = board_from_str_array(&["RRG", "BRG", "RRR"]).unwrap();
        assert_eq!(
            board.flood_region(),
            vec![(0, 0), (0, 1), (1, 1), (2, 0), (2, 1), (2, 2)]
        );
        assert_eq!(board.find_region(0, 2), vec![(0, 2), (1, 2)]);
        assert_eq!(board.find_region(1, 0), vec![(1, 0)]);
    }

    #[test]
    fn test_neighbours_at_corner_and_center() {
        let board = board_from_str_array(&["RRR", "RRR", "RRR"]).unwrap();
        let mut corner: Vec<_> = board.neighbours(0, 0).collect();
        corner.sort_unstable();
        assert_eq!(corner, vec![(0, 1), (1, 0)]);
        assert_eq!(board.neighbours(1, 1).count(), 4);
    }

    #[test]
    fn test_paint_merges_adjacent_cells() {
        let mut board = board_from_str_array(&["RGB", "GGB", "BBB"]).unwrap();
        assert!(board.paint(Tile::Green));
        assert_eq!(board.flood_region().len(), 4);
        assert!(board.paint(Tile::Blue));
        assert!(board.is_uniform());
    }

    #[test]
    fn test_paint_same_color_is_noop() {
        let mut board = board_from_str_array(&["RG"]).unwrap();
        assert!(!board.paint(Tile::Red));
        assert_eq!(board.to_rows(), vec!["RG".to_string()]);
    }

    #[test]
    fn test_colors_present_in_palette_order() {
        let board = board_from_str_array(&["CYR", "RRY"]).unwrap();
        assert_eq!(
            board.colors_present(),
            vec![Tile::Red, Tile::Yellow, Tile::Cyan]
        );
    }

    #[test]
    fn test_display_board_formatting() {
        let board = board_from_str_array(&["RG", "BY"]).unwrap();
        let expected = "  0 1 \n\
                        0 \x1b[1;41;m  \x1b[m\x1b[1;42;m  \x1b[m\n\
                        1 \x1b[1;44;m  \x1b[m\x1b[1;43;m  \x1b[m";
        assert_eq!(format!("{}", board), expected);
        assert!(board
            .to_string_with_highlight(&[(0, 0)])
            .contains("\x1b[1;41;m..\x1b[m"));
    }

    #[test]
    fn test_game_undo() {
        let board = board_from_str_array(&["RGB", "RGB"]).unwrap();
        let mut game = Game::new_with_board(board.clone());
        assert!(!game.undo_last_move());
        assert!(game.process_move(Tile::Green));
        assert!(game.process_move(Tile::Blue));
        assert!(game.is_solved());
        assert_eq!(game.steps(), 2);
        assert!(game.undo_last_move());
        assert!(game.undo_last_move());
        assert_eq!(game.board(), &board);
        assert_eq!(game.steps(), 0);
    }

    #[test]
    fn test_game_rejects_noop_move() {
        let board = board_from_str_array(&["RG"]).unwrap();
        let mut game = Game::new_with_board(board);
        assert!(!game.process_move(Tile::Red));
        assert_eq!(game.steps(), 0);
        assert!(!game.undo_last_move());
    }
}
