use rand::Rng;

/// The seven tetromino kinds of the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    I,
    O,
    T,
    L,
    J,
    S,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::O,
        ShapeKind::T,
        ShapeKind::L,
        ShapeKind::J,
        ShapeKind::S,
        ShapeKind::Z,
    ];

    /// Pick a kind uniformly at random
    pub fn random(rng: &mut impl Rng) -> ShapeKind {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    // Occupancy rows of the kind in its spawn orientation
    fn rows(&self) -> &'static [&'static [u8]] {
        match self {
            ShapeKind::I => &[&[1, 1, 1, 1]],
            ShapeKind::O => &[&[1, 1], &[1, 1]],
            ShapeKind::T => &[&[0, 1, 0], &[1, 1, 1]],
            ShapeKind::L => &[&[1, 0, 0], &[1, 1, 1]],
            ShapeKind::J => &[&[0, 0, 1], &[1, 1, 1]],
            ShapeKind::S => &[&[0, 1, 1], &[1, 1, 0]],
            ShapeKind::Z => &[&[1, 1, 0], &[0, 1, 1]],
        }
    }

    /// Build the spawn-orientation shape of this kind
    pub fn shape(&self) -> Shape {
        let rows = self.rows();
        let cells = rows
            .iter()
            .flat_map(|row| row.iter().map(|&c| c == 1))
            .collect();
        Shape {
            rows: rows.len(),
            cols: rows[0].len(),
            cells,
        }
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Immutable rectangular occupancy grid, stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    #[cfg(test)]
    fn from_rows(rows: &[&[bool]]) -> Shape {
        let cols = rows.first().map_or(0, |row| row.len());
        assert!(
            rows.iter().all(|row| row.len() == cols),
            "shape rows must have equal length"
        );
        Shape {
            rows: rows.len(),
            cols,
            cells: rows.iter().flat_map(|row| row.iter().copied()).collect(),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_filled(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols && self.cells[row * self.cols + col]
    }

    /// Iterate over `(row, col)` of every filled cell
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, filled)| **filled)
            .map(move |(idx, _)| (idx / self.cols, idx % self.cols))
    }

    /// Rotate clockwise by 90 degrees: an R×C grid becomes C×R with
    /// `rotated[i][j] = self[R-1-j][i]`
    pub fn rotate(&self) -> Shape {
        let (rows, cols) = (self.cols, self.rows);
        let mut cells = Vec::with_capacity(self.cells.len());
        for i in 0..rows {
            for j in 0..cols {
                cells.push(self.is_filled(self.rows - 1 - j, i));
            }
        }
        Shape { rows, cols, cells }
    }
}
