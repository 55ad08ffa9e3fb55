//! Board tests through the public facade.

use classic_tetris::core::Board;
use classic_tetris::types::{Tetromino, BOARD_HEIGHT, BOARD_WIDTH};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            assert!(board.is_valid(x, y), "cell ({x}, {y}) should be free");
            assert_eq!(board.get(x, y), Some(Tetromino::NoShape));
        }
    }
    assert_eq!(board.filled_count(), 0);
}

#[test]
fn test_board_out_of_bounds() {
    let mut board = Board::new();

    assert_eq!(board.get(-1, 0), None);
    assert_eq!(board.get(0, -1), None);
    assert_eq!(board.get(BOARD_WIDTH as i8, 0), None);
    assert_eq!(board.get(0, BOARD_HEIGHT as i8), None);

    assert!(!board.set(-1, 0, Tetromino::T));
    assert!(!board.set(0, BOARD_HEIGHT as i8, Tetromino::T));
    assert!(!board.is_valid(-1, 5));
    assert!(!board.is_occupied(-1, 5));

    assert_eq!(board.row(BOARD_HEIGHT as usize), None);
    assert!(!board.is_row_full(BOARD_HEIGHT as usize));
}

#[test]
fn test_board_set_and_clear_cell() {
    let mut board = Board::new();

    assert!(board.set(5, 10, Tetromino::T));
    assert_eq!(board.get(5, 10), Some(Tetromino::T));
    assert!(board.is_occupied(5, 10));
    assert!(!board.is_valid(5, 10));

    assert!(board.set(5, 10, Tetromino::NoShape));
    assert!(board.is_valid(5, 10));
}

#[test]
fn test_from_rows_puts_last_row_at_the_bottom() {
    let board = Board::from_rows(&["#.........", "..........", ".........#"], Tetromino::S);
    assert_eq!(board.get(9, 0), Some(Tetromino::S));
    assert_eq!(board.get(0, 2), Some(Tetromino::S));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_two_bottom_rows_clear_and_partial_row_drops() {
    let mut board = Board::from_rows(
        &["##..#.....", "##########", "##########"],
        Tetromino::Line,
    );

    assert_eq!(board.remove_full_lines(), 2);

    let expected: Vec<bool> = "##..#....."
        .chars()
        .map(|c| c == '#')
        .collect();
    let row0: Vec<bool> = board
        .row(0)
        .unwrap()
        .iter()
        .map(|c| !c.is_empty())
        .collect();
    assert_eq!(row0, expected);
    for y in 1..BOARD_HEIGHT as usize {
        assert!(
            board.row(y).unwrap().iter().all(|c| c.is_empty()),
            "row {y} not empty"
        );
    }
}

#[test]
fn test_non_adjacent_full_rows_clear_in_one_pass() {
    let mut board = Board::from_rows(
        &[
            "#.........", // row 4
            "##########", // row 3
            ".#........", // row 2
            "##########", // row 1
            "..#.......", // row 0
        ],
        Tetromino::T,
    );

    assert_eq!(board.remove_full_lines(), 2);
    assert!(board.is_occupied(2, 0));
    assert!(board.is_occupied(1, 1));
    assert!(board.is_occupied(0, 2));
    assert_eq!(board.filled_count(), 3);
}

#[test]
fn test_no_full_rows_is_a_no_op() {
    let mut board = Board::from_rows(&["#########."], Tetromino::Z);
    let before = board.clone();
    assert_eq!(board.remove_full_lines(), 0);
    assert_eq!(board, before);
}

#[test]
fn test_lock_cells_and_grid_codes() {
    let mut board = Board::new();
    board.lock_cells(&[(0, 0), (1, 0), (1, 1), (-1, 0)], Tetromino::MirroredL);
    assert_eq!(board.filled_count(), 3);

    let mut grid = [[0u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize];
    board.write_u8_grid(&mut grid);
    assert_eq!(grid[0][0], Tetromino::MirroredL.code());
    assert_eq!(grid[1][1], Tetromino::MirroredL.code());
    assert_eq!(grid[1][0], 0);
}
