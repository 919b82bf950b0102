use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::Board;
use crate::command::Command;
use crate::piece::Piece;
use crate::shape::ShapeKind;

/// Points awarded per cleared row
pub const POINTS_PER_LINE: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    GameOver,
}

/// What a single transition changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The piece moved or rotated, nothing else changed
    Moved { from: Piece, to: Piece },
    /// The piece was locked and the lock sequence ran.
    /// The game may have ended if the next piece could not be placed.
    Locked { lines_cleared: usize },
    /// The move would collide, state unchanged
    Rejected,
    /// The game was ended by a quit command
    GameOver,
    /// Nothing to do in the current state
    Ignored,
}

/// Read-only copy of the game state for renderers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub piece: Option<Piece>,
    pub score: u64,
    pub game_over: bool,
}

/// Single-session game state and the rules that mutate it
///
/// Every transition either fully applies or leaves the state untouched.
pub struct Game<R: Rng = StdRng> {
    board: Board,
    // None once a spawn was blocked
    current: Option<Piece>,
    score: u64,
    game_over: bool,
    lines_cleared: u64,
    pieces_locked: u64,
    rng: R,
}

impl Game<StdRng> {
    /// New game with a shape sequence determined by `seed`
    pub fn seeded(seed: u64) -> Self {
        Game::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Game<R> {
    /// New game on an empty board
    pub fn new(rng: R) -> Self {
        Game::with_board(Board::new(), rng)
    }

    /// New game on a prepared board. The first piece is spawned right away,
    /// so an overfilled board yields a game that is already over.
    pub fn with_board(board: Board, rng: R) -> Self {
        let mut game = Game {
            board,
            current: None,
            score: 0,
            game_over: false,
            lines_cleared: 0,
            pieces_locked: 0,
            rng,
        };
        game.spawn();
        game
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current(&self) -> Option<&Piece> {
        self.current.as_ref()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn lines_cleared(&self) -> u64 {
        self.lines_cleared
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else {
            GameStatus::Playing
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            board: self.board.clone(),
            piece: self.current.clone(),
            score: self.score,
            game_over: self.game_over,
        }
    }

    /// Apply one player command
    pub fn apply(&mut self, command: Command) -> Outcome {
        match command {
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::SoftDrop => self.tick(),
            Command::Rotate => self.rotate(),
            Command::Quit => self.quit(),
            // Restarting is decided by the session loop once the game is over
            Command::Restart => Outcome::Ignored,
        }
    }

    /// Gravity step: move the piece down one row, or lock it when it rests
    /// on something
    pub fn tick(&mut self) -> Outcome {
        match self.try_replace(|piece| piece.shifted(0, 1)) {
            Outcome::Rejected => self.lock_current(),
            outcome => outcome,
        }
    }

    pub fn move_left(&mut self) -> Outcome {
        self.try_replace(|piece| piece.shifted(-1, 0))
    }

    pub fn move_right(&mut self) -> Outcome {
        self.try_replace(|piece| piece.shifted(1, 0))
    }

    /// Rotate clockwise in place; no wall kicks
    pub fn rotate(&mut self) -> Outcome {
        self.try_replace(|piece| piece.rotated())
    }

    pub fn quit(&mut self) -> Outcome {
        if self.game_over {
            return Outcome::Ignored;
        }
        tracing::info!("Game quit with score {}", self.score);
        self.game_over = true;
        Outcome::GameOver
    }

    // Commit `change(current)` if it does not collide
    fn try_replace(&mut self, change: impl FnOnce(&Piece) -> Piece) -> Outcome {
        if self.game_over {
            return Outcome::Ignored;
        }
        let Some(current) = &mut self.current else {
            return Outcome::Ignored;
        };
        let candidate = change(current);
        if self.board.collides_piece(&candidate) {
            return Outcome::Rejected;
        }
        let from = std::mem::replace(current, candidate.clone());
        Outcome::Moved {
            from,
            to: candidate,
        }
    }

    // Lock the current piece, clear full rows, score them and spawn the next piece
    fn lock_current(&mut self) -> Outcome {
        let Some(piece) = self.current.take() else {
            return Outcome::Ignored;
        };
        self.board.lock(&piece);
        self.pieces_locked += 1;
        let lines_cleared = self.board.clear_full_rows();
        self.lines_cleared += lines_cleared as u64;
        self.score += lines_cleared as u64 * POINTS_PER_LINE;
        tracing::debug!(
            "Locked {} at ({}, {}), cleared {} lines, score {}",
            piece.kind(),
            piece.x(),
            piece.y(),
            lines_cleared,
            self.score
        );
        self.spawn();
        Outcome::Locked { lines_cleared }
    }

    // Place a random piece at the top; a blocked spawn ends the game
    fn spawn(&mut self) {
        let kind = ShapeKind::random(&mut self.rng);
        let piece = Piece::spawn(kind, self.board.width());
        if self.board.collides_piece(&piece) {
            tracing::info!("Spawn of {} blocked, game over with score {}", kind, self.score);
            self.current = None;
            self.game_over = true;
        } else {
            self.current = Some(piece);
        }
    }
}
