use std::fs;
use std::path::Path;

use crate::engine::{Board, Tile};
use crate::error::BoardError;

/// Parses an array of string slices into a `Board`.
///
/// Each string slice is one row, starting from the top. All rows must have the
/// same number of tiles. Valid characters (case-insensitive) are:
/// - 'R': `Tile::Red`
/// - 'G': `Tile::Green`
/// - 'B': `Tile::Blue`
/// - 'Y': `Tile::Yellow`
/// - 'P': `Tile::Purple`
/// - 'C': `Tile::Cyan`
///
/// # Errors
/// * [`BoardError::Empty`] if there are no rows or the first row is empty.
/// * [`BoardError::UnknownTile`] on any other character.
/// * [`BoardError::RaggedRow`] if a row's length differs from the first row's.
///
/// # Examples
/// ```
/// use gps_solver::utils::board_from_str_array;
/// use gps_solver::engine::Tile;
///
/// let board = board_from_str_array(&["RGY", "BPC"]).unwrap();
/// assert_eq!(board.get_tile(0, 0), Tile::Red);
/// assert_eq!(board.get_tile(1, 2), Tile::Cyan);
///
/// assert!(board_from_str_array(&["RXB"]).is_err());
/// assert!(board_from_str_array(&["RGB", "RG"]).is_err());
/// ```
pub fn board_from_str_array<S: AsRef<str>>(s: &[S]) -> Result<Board, BoardError> {
    let grid = s
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.as_ref()
                .chars()
                .enumerate()
                .map(|(col, ch)| {
                    Tile::from_char(ch).ok_or(BoardError::UnknownTile { ch, row, col })
                })
                .collect::<Result<Vec<Tile>, BoardError>>()
        })
        .collect::<Result<Vec<Vec<Tile>>, BoardError>>()?;
    Board::from_grid(grid)
}

/// Parses board text: one row per line, surrounding whitespace and blank lines
/// ignored.
pub fn board_from_text(text: &str) -> Result<Board, BoardError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    board_from_str_array(&lines)
}

/// Reads and parses a board file (see [`board_from_text`]).
pub fn board_from_file(path: impl AsRef<Path>) -> Result<Board, BoardError> {
    let content = fs::read_to_string(path)?;
    board_from_text(&content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_from_str_array_valid() {
        let board = board_from_str_array(&["RGYBPC", "rgybpc"]).unwrap();
        assert_eq!(board.rows(), 2);
        assert_eq!(board.cols(), 6);
        assert_eq!(board.get_tile(0, 5), Tile::Cyan);
        assert_eq!(board.get_tile(1, 1), Tile::Green);
    }

    #[test]
    fn test_board_from_str_array_invalid_char() {
        let err = board_from_str_array(&["RGX"]).unwrap_err();
        assert!(matches!(
            err,
            BoardError::UnknownTile {
                ch: 'X',
                row: 0,
                col: 2
            }
        ));
        assert_eq!(err.to_string(), "Unrecognized character 'X' in row 0 col 2");
    }

    #[test]
    fn test_board_from_str_array_with_spaces() {
        let err = board_from_str_array(&["R G"]).unwrap_err();
        assert!(err.to_string().contains("Unrecognized character ' '"));
    }

    #[test]
    fn test_board_from_str_array_ragged() {
        let err = board_from_str_array(&["RGB", "RGBR"]).unwrap_err();
        assert!(matches!(
            err,
            BoardError::RaggedRow {
                row: 1,
                expected: 3,
                found: 4
            }
        ));
    }

    #[test]
    fn test_board_from_str_array_empty_input() {
        let rows: [&str; 0] = [];
        assert!(matches!(board_from_str_array(&rows), Err(BoardError::Empty)));
        assert!(matches!(board_from_str_array(&[""]), Err(BoardError::Empty)));
    }

    #[test]
    fn test_board_from_text_skips_blank_lines() {
        let board = board_from_text("\n  RGB  \n\nGBR\n").unwrap();
        assert_eq!(board.to_rows(), vec!["RGB".to_string(), "GBR".to_string()]);
    }

    #[test]
    fn test_board_from_file_missing() {
        let err = board_from_file("/nonexistent/board.txt").unwrap_err();
        assert!(matches!(err, BoardError::Io(_)));
    }
}
