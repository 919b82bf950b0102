use crate::shape::{Shape, ShapeKind};

/// The currently falling piece
///
/// `x`/`y` is the board column/row of the shape grid's top-left cell. `y` may
/// be negative while the piece is still partly above the visible board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: ShapeKind,
    shape: Shape,
    x: i32,
    y: i32,
}

impl Piece {
    pub fn new(kind: ShapeKind, shape: Shape, x: i32, y: i32) -> Self {
        Piece { kind, shape, x, y }
    }

    /// Spawn-orientation piece of `kind` centered horizontally on a board of
    /// `board_width` columns, at row 0
    pub fn spawn(kind: ShapeKind, board_width: usize) -> Self {
        let shape = kind.shape();
        let x = (board_width / 2) as i32 - (shape.cols() / 2) as i32;
        Piece::new(kind, shape, x, 0)
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Same shape, origin moved by `(dx, dy)`
    pub fn shifted(&self, dx: i32, dy: i32) -> Piece {
        Piece {
            x: self.x + dx,
            y: self.y + dy,
            ..self.clone()
        }
    }

    /// Same origin, shape rotated clockwise
    pub fn rotated(&self) -> Piece {
        Piece {
            shape: self.shape.rotate(),
            ..self.clone()
        }
    }

    /// Board coordinates `(x, y)` of every filled cell, including cells above the board
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .filled_cells()
            .map(move |(row, col)| (self.x + col as i32, self.y + row as i32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spawn_is_centered() {
        // width/2 - shape_width/2
        assert_eq!(Piece::spawn(ShapeKind::I, 12).x(), 4);
        assert_eq!(Piece::spawn(ShapeKind::O, 12).x(), 5);
        assert_eq!(Piece::spawn(ShapeKind::T, 12).x(), 5);
        assert_eq!(Piece::spawn(ShapeKind::T, 12).y(), 0);
    }

    #[test]
    fn test_shifted_keeps_shape() {
        let piece = Piece::spawn(ShapeKind::L, 12);
        let moved = piece.shifted(-1, 2);
        assert_eq!(moved.x(), piece.x() - 1);
        assert_eq!(moved.y(), 2);
        assert_eq!(moved.shape(), piece.shape());
        assert_eq!(moved.kind(), ShapeKind::L);
    }

    #[test]
    fn test_rotated_keeps_origin() {
        let piece = Piece::spawn(ShapeKind::I, 12).shifted(0, 3);
        let rotated = piece.rotated();
        assert_eq!((rotated.x(), rotated.y()), (piece.x(), piece.y()));
        assert_eq!(rotated.shape().rows(), 4);
        assert_eq!(rotated.shape().cols(), 1);
    }

    #[test]
    fn test_cells_are_board_relative() {
        let piece = Piece::spawn(ShapeKind::O, 12).shifted(0, -1);
        let cells: Vec<_> = piece.cells().collect();
        assert_eq!(cells, vec![(5, -1), (6, -1), (5, 0), (6, 0)]);
    }
}
