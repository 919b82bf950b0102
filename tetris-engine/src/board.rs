use crate::piece::Piece;
use crate::shape::Shape;

pub const BOARD_WIDTH: usize = 12;
pub const BOARD_HEIGHT: usize = 20;

/// Occupancy of a single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled,
}

/// Fixed-size playing field, `BOARD_HEIGHT` rows of `BOARD_WIDTH` cells, row 0 on top
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    cells: [[Cell; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }

    pub fn width(&self) -> usize {
        BOARD_WIDTH
    }

    pub fn height(&self) -> usize {
        BOARD_HEIGHT
    }

    /// Cell at column `x`, row `y`. Out-of-range coordinates read as Empty.
    pub fn get(&self, x: usize, y: usize) -> Cell {
        self.cells
            .get(y)
            .and_then(|row| row.get(x))
            .copied()
            .unwrap_or(Cell::Empty)
    }

    /// Overwrite one cell; out-of-range coordinates are ignored
    pub fn set(&mut self, x: usize, y: usize, cell: Cell) {
        if x < BOARD_WIDTH && y < BOARD_HEIGHT {
            self.cells[y][x] = cell;
        }
    }

    pub fn row(&self, y: usize) -> &[Cell; BOARD_WIDTH] {
        &self.cells[y]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell; BOARD_WIDTH]> {
        self.cells.iter()
    }

    pub fn is_full_row(&self, y: usize) -> bool {
        self.cells[y].iter().all(|&c| c == Cell::Filled)
    }

    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&c| c == Cell::Filled)
            .count()
    }

    /// Check whether `shape` placed with its top-left cell at `(x, y)` leaves the
    /// board sideways or through the floor, or overlaps a filled cell.
    /// Cells above row 0 only take part in the bounds checks.
    pub fn collides(&self, x: i32, y: i32, shape: &Shape) -> bool {
        for (row, col) in shape.filled_cells() {
            let bx = x + col as i32;
            let by = y + row as i32;
            if bx < 0 || bx >= BOARD_WIDTH as i32 || by >= BOARD_HEIGHT as i32 {
                return true;
            }
            if by >= 0 && self.cells[by as usize][bx as usize] == Cell::Filled {
                return true;
            }
        }
        false
    }

    /// Placement check for a whole piece
    pub fn collides_piece(&self, piece: &Piece) -> bool {
        self.collides(piece.x(), piece.y(), piece.shape())
    }

    /// Commit every filled cell of `piece` that lies on the board.
    /// Cells still above row 0 are dropped.
    pub fn lock(&mut self, piece: &Piece) {
        for (bx, by) in piece.cells() {
            if bx >= 0 && by >= 0 {
                self.set(bx as usize, by as usize, Cell::Filled);
            }
        }
    }

    /// Remove every full row in a single bottom-to-top sweep and return how
    /// many were removed. After a removal the same row index is tested again,
    /// since the row above has moved into it.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = BOARD_HEIGHT;
        while y > 0 {
            let row = y - 1;
            if self.is_full_row(row) {
                cleared += 1;
                for above in (1..=row).rev() {
                    self.cells[above] = self.cells[above - 1];
                }
                self.cells[0] = [Cell::Empty; BOARD_WIDTH];
            } else {
                y -= 1;
            }
        }
        cleared
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::ShapeKind;

    fn fill_row(board: &mut Board, y: usize) {
        for x in 0..BOARD_WIDTH {
            board.set(x, y, Cell::Filled);
        }
    }

    fn fill_row_except(board: &mut Board, y: usize, hole: usize) {
        fill_row(board, y);
        board.set(hole, y, Cell::Empty);
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.width(), 12);
        assert_eq!(board.height(), 20);
        assert_eq!(board.filled_count(), 0);
        assert_eq!(board.rows().count(), BOARD_HEIGHT);
    }

    #[test]
    fn test_collides_outside_bounds_regardless_of_contents() {
        let shape = ShapeKind::O.shape();
        let mut full = Board::new();
        for y in 0..BOARD_HEIGHT {
            fill_row(&mut full, y);
        }
        for board in [Board::new(), full] {
            assert!(board.collides(-1, 5, &shape));
            assert!(board.collides(BOARD_WIDTH as i32 - 1, 5, &shape));
            assert!(board.collides(3, BOARD_HEIGHT as i32 - 1, &shape));
            assert!(board.collides(-1, -5, &shape));
        }
    }

    #[test]
    fn test_collides_with_filled_cell() {
        let mut board = Board::new();
        board.set(4, 10, Cell::Filled);
        let shape = ShapeKind::O.shape();
        assert!(board.collides(3, 9, &shape));
        assert!(board.collides(4, 10, &shape));
        assert!(!board.collides(5, 9, &shape));
        assert!(!board.collides(3, 7, &shape));
    }

    #[test]
    fn test_cells_above_board_only_check_bounds() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        let shape = ShapeKind::I.shape().rotate();
        // Rows -4..-1 are above the board and row 0 is filled underneath
        assert!(!board.collides(3, -4, &shape));
        assert!(board.collides(3, -3, &shape));
        assert!(board.collides(-1, -4, &shape));
    }

    #[test]
    fn test_lock_fills_piece_cells() {
        let mut board = Board::new();
        let piece = Piece::spawn(ShapeKind::T, BOARD_WIDTH).shifted(0, 18);
        board.lock(&piece);
        assert_eq!(board.filled_count(), 4);
        assert_eq!(board.get(6, 18), Cell::Filled);
        assert_eq!(board.get(5, 19), Cell::Filled);
        assert_eq!(board.get(6, 19), Cell::Filled);
        assert_eq!(board.get(7, 19), Cell::Filled);
        assert_eq!(board.get(5, 18), Cell::Empty);
    }

    #[test]
    fn test_lock_keeps_existing_cells() {
        let mut board = Board::new();
        board.set(0, 19, Cell::Filled);
        board.set(11, 0, Cell::Filled);
        let before = board.clone();
        let piece = Piece::spawn(ShapeKind::S, BOARD_WIDTH).shifted(0, 15);
        board.lock(&piece);
        for y in 0..BOARD_HEIGHT {
            for x in 0..BOARD_WIDTH {
                if before.get(x, y) == Cell::Filled {
                    assert_eq!(board.get(x, y), Cell::Filled);
                }
            }
        }
        assert_eq!(board.filled_count(), before.filled_count() + 4);
    }

    #[test]
    fn test_lock_drops_cells_above_board() {
        let mut board = Board::new();
        let piece = Piece::spawn(ShapeKind::I, BOARD_WIDTH).rotated().shifted(0, -2);
        board.lock(&piece);
        assert_eq!(board.filled_count(), 2);
        assert_eq!(board.get(4, 0), Cell::Filled);
        assert_eq!(board.get(4, 1), Cell::Filled);
    }

    #[test]
    fn test_clear_rows_two_and_five() {
        let mut board = Board::new();
        for y in 0..BOARD_HEIGHT {
            fill_row_except(&mut board, y, y % BOARD_WIDTH);
        }
        fill_row(&mut board, 2);
        fill_row(&mut board, 5);
        let before = board.clone();

        assert_eq!(board.clear_full_rows(), 2);

        // Rows below 5 are untouched
        for y in 6..BOARD_HEIGHT {
            assert_eq!(board.row(y), before.row(y));
        }
        // Rows 3 and 4 moved down by one
        assert_eq!(board.row(5), before.row(4));
        assert_eq!(board.row(4), before.row(3));
        // Rows 0 and 1 moved down by two
        assert_eq!(board.row(3), before.row(1));
        assert_eq!(board.row(2), before.row(0));
        // Two empty rows came in from above the top
        assert!(board.row(0).iter().all(|&c| c == Cell::Empty));
        assert!(board.row(1).iter().all(|&c| c == Cell::Empty));
    }

    #[test]
    fn test_clear_adjacent_full_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19);
        fill_row(&mut board, 18);
        fill_row(&mut board, 17);
        board.set(3, 16, Cell::Filled);

        assert_eq!(board.clear_full_rows(), 3);
        assert_eq!(board.filled_count(), 1);
        assert_eq!(board.get(3, 19), Cell::Filled);
    }

    #[test]
    fn test_clear_no_full_rows() {
        let mut board = Board::new();
        fill_row_except(&mut board, 19, 4);
        let before = board.clone();
        assert_eq!(board.clear_full_rows(), 0);
        assert_eq!(board, before);
    }

    #[test]
    fn test_clear_full_top_row() {
        let mut board = Board::new();
        fill_row(&mut board, 0);
        assert_eq!(board.clear_full_rows(), 1);
        assert_eq!(board.filled_count(), 0);
    }
}
