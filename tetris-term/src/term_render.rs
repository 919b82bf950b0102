use console::Term;
use tetris_engine::{Board, Cell, Piece, Renderer, Result, BOARD_HEIGHT};

#[derive(Clone, PartialEq, Debug)]
pub enum TermCell {
    FieldCell(Cell),
    PieceCell,
    BorderVertical,
    BorderHorizontal,
    BorderTopLeft,
    BorderTopRight,
    BorderBottomLeft,
    BorderBottomRight,
    Space,
    Message(String),
}

pub trait TermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str;
    fn width(&self, cell: &TermCell) -> usize;
}

pub trait TermRender {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>>;
    fn render(&self, style: &impl TermStyle) -> Vec<String> {
        let mut lines = Vec::new();
        for row in self.output(style) {
            let mut line = String::new();
            for cell in &row {
                line.push_str(style.display(cell));
            }
            lines.push(line);
        }
        lines
    }
}

// Make all lines in block the same width by padding with TermCell::Space
pub fn pad_block_right(block: &mut [Vec<TermCell>], style: &impl TermStyle) {
    // One Space per missing column
    assert_eq!(style.width(&TermCell::Space), 1);
    let widths: Vec<usize> = block
        .iter()
        .map(|row| row.iter().map(|cell| style.width(cell)).sum())
        .collect();
    let width = widths.iter().copied().max().unwrap_or(0);
    for (row, line_width) in block.iter_mut().zip(widths) {
        row.extend(std::iter::repeat(TermCell::Space).take(width - line_width));
    }
}

// Shared widths: field cells are two columns wide, borders one
fn cell_width(cell: &TermCell) -> usize {
    match cell {
        TermCell::FieldCell(_) | TermCell::PieceCell => 2,
        TermCell::BorderHorizontal => 2,
        TermCell::BorderVertical
        | TermCell::BorderTopLeft
        | TermCell::BorderTopRight
        | TermCell::BorderBottomLeft
        | TermCell::BorderBottomRight => 1,
        TermCell::Space => 1,
        TermCell::Message(s) => s.chars().count(),
    }
}

#[derive(Clone, Copy)]
pub struct PlainTermStyle;

impl TermStyle for PlainTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(Cell::Empty) => "  ",
            TermCell::FieldCell(Cell::Filled) => "[]",
            TermCell::PieceCell => "##",
            TermCell::BorderVertical => "|",
            TermCell::BorderTopLeft => "+",
            TermCell::BorderTopRight => "+",
            TermCell::BorderBottomLeft => "+",
            TermCell::BorderHorizontal => "--",
            TermCell::BorderBottomRight => "+",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        cell_width(cell)
    }
}

#[derive(Clone, Copy)]
pub struct AnsiTermStyle;

impl TermStyle for AnsiTermStyle {
    fn display<'a>(&self, cell: &'a TermCell) -> &'a str {
        match cell {
            TermCell::FieldCell(Cell::Empty) => "\x1b[0m  ",
            TermCell::FieldCell(Cell::Filled) => "\x1b[0;37m██\x1b[0m",
            TermCell::PieceCell => "\x1b[0;36m██\x1b[0m",
            TermCell::BorderVertical => "\x1b[0m║",
            TermCell::BorderTopLeft => "\x1b[0m╔",
            TermCell::BorderTopRight => "\x1b[0m╗",
            TermCell::BorderBottomLeft => "\x1b[0m╚",
            TermCell::BorderHorizontal => "\x1b[0m══",
            TermCell::BorderBottomRight => "\x1b[0m╝",
            TermCell::Space => " ",
            TermCell::Message(s) => s.as_str(),
        }
    }
    fn width(&self, cell: &TermCell) -> usize {
        cell_width(cell)
    }
}

impl TermRender for Board {
    fn output(&self, _style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        self.rows()
            .map(|row| row.iter().map(|&cell| TermCell::FieldCell(cell)).collect())
            .collect()
    }
}

/// The board framed on all four sides, optionally with the game-over banner
pub struct WellField<'a> {
    board: &'a Board,
    game_over: Option<u64>,
}

impl<'a> WellField<'a> {
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            game_over: None,
        }
    }

    pub fn with_game_over(board: &'a Board, score: u64) -> Self {
        Self {
            board,
            game_over: Some(score),
        }
    }

    fn border_line(&self, left: TermCell, right: TermCell) -> Vec<TermCell> {
        let mut line = vec![left];
        line.extend(std::iter::repeat(TermCell::BorderHorizontal).take(self.board.width()));
        line.push(right);
        line
    }
}

impl TermRender for WellField<'_> {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.board.output(style);
        if let Some(score) = self.game_over {
            let middle = lines.len() / 2;
            lines[middle] = vec![TermCell::Message(center("GAME OVER!", self.board.width() * 2))];
            lines[middle + 1] = vec![TermCell::Message(center(
                &format!("Score: {}", score),
                self.board.width() * 2,
            ))];
            pad_block_right(&mut lines, style);
        }
        for line in &mut lines {
            line.insert(0, TermCell::BorderVertical);
            line.push(TermCell::BorderVertical);
        }
        lines.insert(
            0,
            self.border_line(TermCell::BorderTopLeft, TermCell::BorderTopRight),
        );
        lines.push(self.border_line(TermCell::BorderBottomLeft, TermCell::BorderBottomRight));
        lines
    }
}

fn center(text: &str, width: usize) -> String {
    let padding = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(padding), text)
}

/// Well plus the score and key help to its right
pub struct GameScreen<'a> {
    well: WellField<'a>,
    score: u64,
    prompt: bool,
}

impl<'a> GameScreen<'a> {
    pub fn new(well: WellField<'a>, score: u64) -> Self {
        let prompt = well.game_over.is_some();
        Self {
            well,
            score,
            prompt,
        }
    }

    fn panel(&self) -> Vec<String> {
        let mut panel = vec![
            String::new(),
            String::new(),
            format!("Score: {}", self.score),
            String::new(),
            "← → Move".to_string(),
            "↑ Rotate".to_string(),
            "↓ Drop".to_string(),
            "ESC Quit".to_string(),
        ];
        if self.prompt {
            panel.push(String::new());
            panel.push("R Restart".to_string());
        }
        panel
    }
}

impl TermRender for GameScreen<'_> {
    fn output(&self, style: &impl TermStyle) -> Vec<Vec<TermCell>> {
        let mut lines = self.well.output(style);
        pad_block_right(&mut lines, style);
        for (line, text) in lines.iter_mut().zip(self.panel()) {
            line.push(TermCell::Space);
            line.push(TermCell::Space);
            line.push(TermCell::Message(text));
        }
        pad_block_right(&mut lines, style);
        lines
    }
}

/// Terminal position `(column, row)` of board cell `(x, y)`, inside the frame
pub fn screen_position(x: i32, y: i32) -> Option<(usize, usize)> {
    if x < 0 || y < 0 || y as usize >= BOARD_HEIGHT {
        return None;
    }
    Some((1 + x as usize * 2, 1 + y as usize))
}

/// Draws the game onto a terminal
pub struct TermRenderer<S> {
    term: Term,
    style: S,
    // Last fully drawn board, kept for the game-over redraw
    board: Board,
}

impl<S: TermStyle> TermRenderer<S> {
    pub fn new(term: Term, style: S) -> Self {
        Self {
            term,
            style,
            board: Board::new(),
        }
    }

    fn draw_lines(&self, lines: Vec<String>) -> Result<()> {
        self.term.move_cursor_to(0, 0)?;
        for line in lines {
            self.term.write_line(&line)?;
        }
        self.term.flush()?;
        Ok(())
    }
}

impl<S: TermStyle + Send> Renderer for TermRenderer<S> {
    fn render(&mut self, board: &Board, score: u64) -> Result<()> {
        self.board = board.clone();
        let screen = GameScreen::new(WellField::new(board), score);
        self.draw_lines(screen.render(&self.style))
    }

    fn render_piece_overlay(&mut self, piece: &Piece, visible: bool) -> Result<()> {
        let cell = if visible {
            TermCell::PieceCell
        } else {
            TermCell::FieldCell(Cell::Empty)
        };
        let text = self.style.display(&cell);
        for (x, y) in piece.cells() {
            if let Some((col, row)) = screen_position(x, y) {
                self.term.move_cursor_to(col, row)?;
                self.term.write_str(text)?;
            }
        }
        self.term.flush()?;
        Ok(())
    }

    fn render_game_over(&mut self, score: u64) -> Result<()> {
        let screen = GameScreen::new(WellField::with_game_over(&self.board, score), score);
        let lines = screen.render(&self.style);
        self.draw_lines(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tetris_engine::{ShapeKind, BOARD_WIDTH};

    #[test]
    fn test_well_is_framed() {
        let board = Board::new();
        let lines = WellField::new(&board).render(&PlainTermStyle);
        assert_eq!(lines.len(), BOARD_HEIGHT + 2);
        let top = format!("+{}+", "--".repeat(BOARD_WIDTH));
        assert_eq!(lines[0], top);
        assert_eq!(lines[BOARD_HEIGHT + 1], top);
        assert_eq!(lines[1], format!("|{}|", " ".repeat(BOARD_WIDTH * 2)));
    }

    #[test]
    fn test_filled_cells_drawn() {
        let mut board = Board::new();
        board.set(0, 19, Cell::Filled);
        board.set(11, 19, Cell::Filled);
        let lines = WellField::new(&board).render(&PlainTermStyle);
        let bottom = &lines[BOARD_HEIGHT];
        assert!(bottom.starts_with("|[]"));
        assert!(bottom.ends_with("[]|"));
    }

    #[test]
    fn test_game_over_banner() {
        let board = Board::new();
        let lines = WellField::with_game_over(&board, 700).render(&PlainTermStyle);
        assert!(lines.iter().any(|l| l.contains("GAME OVER!")));
        assert!(lines.iter().any(|l| l.contains("Score: 700")));
        // The banner keeps the frame aligned
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn test_screen_panel_shows_score() {
        let board = Board::new();
        let lines = GameScreen::new(WellField::new(&board), 300).render(&PlainTermStyle);
        assert!(lines[2].contains("Score: 300"));
        assert!(!lines.iter().any(|l| l.contains("R Restart")));

        let lines = GameScreen::new(WellField::with_game_over(&board, 300), 300)
            .render(&PlainTermStyle);
        assert!(lines.iter().any(|l| l.contains("R Restart")));
    }

    #[test]
    fn test_screen_position() {
        assert_eq!(screen_position(0, 0), Some((1, 1)));
        assert_eq!(screen_position(3, 5), Some((7, 6)));
        assert_eq!(screen_position(3, -1), None);
        assert_eq!(screen_position(0, BOARD_HEIGHT as i32), None);

        let piece = Piece::spawn(ShapeKind::O, BOARD_WIDTH);
        let positions: Vec<_> = piece.cells().filter_map(|(x, y)| screen_position(x, y)).collect();
        assert_eq!(positions, vec![(11, 1), (13, 1), (11, 2), (13, 2)]);
    }

    #[test]
    fn test_pad_block_right() {
        let mut block = vec![
            vec![TermCell::Message("abc".to_string())],
            vec![TermCell::FieldCell(Cell::Empty)],
        ];
        pad_block_right(&mut block, &AnsiTermStyle);
        assert_eq!(block[1].len(), 2);
        assert_eq!(block[1][1], TermCell::Space);
    }
}
