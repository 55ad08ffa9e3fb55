//! Game state module - the gravity-and-lock state machine
//!
//! This module ties together the board, the active/lookahead shapes and the
//! random source. It handles spawning, movement validation, locking, line
//! clears and the game lifecycle. All mutation goes through `&mut self`, so a
//! single owner (the game loop) serializes ticks and input.

use arrayvec::ArrayVec;

use crate::rng::{seeded, GameRng};
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, BOARD_HEIGHT, BOARD_WIDTH};
use crate::{Board, Shape};

/// Pending events kept between drains. When full, the oldest event is
/// discarded to make room.
const EVENT_CAPACITY: usize = 16;

/// Lifecycle of a game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameStatus {
    /// Not started yet.
    Idle,
    Running,
    Paused,
    /// A spawn collided. Only a restart leaves this state.
    GameOver,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    /// Falling piece; [`Shape::new`] (no shape) between a line clear and the next spawn.
    active: Shape,
    x: i8,
    y: i8,
    /// Lookahead piece, created on the first start.
    next: Option<Shape>,
    rng: GameRng,
    /// Total number of lines cleared.
    score: u32,
    started: bool,
    paused: bool,
    /// A lock cleared lines; the next tick spawns instead of applying gravity.
    falling_finished: bool,
    game_over: bool,
    events: ArrayVec<GameEvent, EVENT_CAPACITY>,
}

impl GameState {
    /// Create a new game whose piece sequence is determined by `seed`
    pub fn new(seed: u64) -> Self {
        Self::with_rng(seeded(seed))
    }

    /// Create a new game drawing pieces from `rng`
    pub fn with_rng(rng: GameRng) -> Self {
        Self {
            board: Board::new(),
            active: Shape::new(),
            x: 0,
            y: 0,
            next: None,
            rng,
            score: 0,
            started: false,
            paused: false,
            falling_finished: false,
            game_over: false,
            events: ArrayVec::new(),
        }
    }

    /// Start (or restart) the game: clear the grid and score, then spawn.
    ///
    /// Ignored while paused: a paused game has to be resumed before it can be
    /// restarted. Returns whether the game was started.
    pub fn start(&mut self) -> bool {
        if self.paused {
            return false;
        }

        self.started = true;
        self.game_over = false;
        self.falling_finished = false;
        self.score = 0;
        self.board.clear();
        self.active = Shape::new();
        self.next = Some(Shape::random(&mut self.rng));
        self.push_event(GameEvent::Started);

        self.spawn_next();
        true
    }

    /// Toggle pause. Returns false (and does nothing) unless a game is in progress.
    pub fn pause(&mut self) -> bool {
        if !self.started || self.game_over {
            return false;
        }

        self.paused = !self.paused;
        self.push_event(if self.paused {
            GameEvent::Paused
        } else {
            GameEvent::Resumed
        });
        true
    }

    /// Advance one gravity interval.
    ///
    /// Spawns the next piece if the previous interval cleared lines, otherwise
    /// moves the active piece down one row, locking it when blocked.
    /// Returns false when the game is not running.
    pub fn tick(&mut self) -> bool {
        if self.status() != GameStatus::Running {
            return false;
        }

        if self.falling_finished {
            self.falling_finished = false;
            self.spawn_next();
        } else {
            self.one_line_down();
        }
        true
    }

    /// Commit `shape` at (x, y) as the active piece if all of its cells are
    /// inside the board and empty. On failure nothing changes.
    pub fn try_move(&mut self, shape: Shape, x: i8, y: i8) -> bool {
        if !self.fits(&shape, x, y) {
            return false;
        }

        self.active = shape;
        self.x = x;
        self.y = y;
        true
    }

    /// Check a placement without committing it
    pub fn fits(&self, shape: &Shape, x: i8, y: i8) -> bool {
        shape
            .cells_at(x, y)
            .iter()
            .all(|&(cx, cy)| self.board.is_valid(cx, cy))
    }

    /// Move the active piece down one row, locking it if it cannot move.
    /// Returns whether the piece moved.
    pub fn one_line_down(&mut self) -> bool {
        if self.active.is_empty() {
            return false;
        }

        if self.try_move(self.active, self.x, self.y.saturating_sub(1)) {
            return true;
        }
        self.lock_piece();
        false
    }

    /// Hard drop: fall until blocked, then lock.
    pub fn drop_down(&mut self) {
        if self.active.is_empty() {
            return;
        }

        while self.try_move(self.active, self.x, self.y.saturating_sub(1)) {}
        self.lock_piece();
    }

    /// Write the active piece into the grid, clear lines, and spawn the next
    /// piece unless the clear deferred spawning to the next tick.
    pub fn lock_piece(&mut self) {
        if self.active.is_empty() {
            return;
        }

        let cells = self.active.cells_at(self.x, self.y);
        self.board.lock_cells(&cells, self.active.kind());
        self.push_event(GameEvent::Locked);

        self.remove_full_lines();

        if !self.falling_finished {
            self.spawn_next();
        }
    }

    /// Promote the lookahead piece and draw a new one.
    ///
    /// The piece is centred horizontally with its top cell on the top row. If it
    /// does not fit there the game is over.
    pub fn spawn_next(&mut self) {
        let piece = match self.next.take() {
            Some(shape) => shape,
            None => Shape::random(&mut self.rng),
        };
        let upcoming = Shape::random(&mut self.rng);
        self.next = Some(upcoming);
        self.push_event(GameEvent::NextPiece(upcoming.kind()));

        let x = (BOARD_WIDTH / 2) as i8 + piece.min_x();
        let y = (BOARD_HEIGHT - 1) as i8 + piece.min_y();

        if !self.try_move(piece, x, y) {
            self.active = Shape::new();
            self.x = x;
            self.y = y;
            self.started = false;
            self.game_over = true;
            self.push_event(GameEvent::GameOver { score: self.score });
        }
    }

    /// Remove all full rows and credit them to the score.
    ///
    /// When anything was removed, the active piece is cleared and the next tick
    /// spawns a fresh one. Returns the number of rows removed.
    pub fn remove_full_lines(&mut self) -> u32 {
        let count = self.board.remove_full_lines();
        if count > 0 {
            self.score += count;
            self.push_event(GameEvent::LinesCleared {
                count,
                score: self.score,
            });
            self.falling_finished = true;
            self.active = Shape::new();
        }
        count
    }

    /// Apply a player command.
    ///
    /// Pause and restart are always offered to [`pause`](Self::pause) and
    /// [`start`](Self::start). Movement, rotation and drops need a running game
    /// with an active piece. Returns whether the command changed the state.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::Pause => self.pause(),
            GameAction::Restart => self.start(),
            _ if !self.controllable() => false,
            GameAction::MoveLeft => self.try_move(self.active, self.x - 1, self.y),
            GameAction::MoveRight => self.try_move(self.active, self.x + 1, self.y),
            GameAction::RotateCw => self.try_move(self.active.rotate_right(), self.x, self.y),
            GameAction::RotateCcw => self.try_move(self.active.rotate_left(), self.x, self.y),
            GameAction::SoftDrop => {
                self.one_line_down();
                true
            }
            GameAction::HardDrop => {
                self.drop_down();
                true
            }
        }
    }

    fn controllable(&self) -> bool {
        self.status() == GameStatus::Running && !self.active.is_empty()
    }

    fn push_event(&mut self, event: GameEvent) {
        if self.events.is_full() {
            self.events.remove(0);
        }
        self.events.push(event);
    }

    /// Take all pending events, oldest first.
    pub fn drain_events(&mut self) -> impl Iterator<Item = GameEvent> + '_ {
        self.events.drain(..)
    }

    pub fn status(&self) -> GameStatus {
        if self.game_over {
            GameStatus::GameOver
        } else if !self.started {
            GameStatus::Idle
        } else if self.paused {
            GameStatus::Paused
        } else {
            GameStatus::Running
        }
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn game_over(&self) -> bool {
        self.game_over
    }

    pub fn falling_finished(&self) -> bool {
        self.falling_finished
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn active(&self) -> Shape {
        self.active
    }

    /// Board coordinate of the active piece's origin
    pub fn position(&self) -> (i8, i8) {
        (self.x, self.y)
    }

    pub fn next_piece(&self) -> Option<Shape> {
        self.next
    }

    /// Absolute cells of the active piece, if there is one
    pub fn active_cells(&self) -> Option<[(i8, i8); 4]> {
        if self.active.is_empty() {
            return None;
        }
        Some(self.active.cells_at(self.x, self.y))
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active_cells().map(|cells| ActiveSnapshot {
            kind: self.active.kind(),
            x: self.x,
            y: self.y,
            cells,
        });
        out.next = self.next;
        out.score = self.score;
        out.started = self.started;
        out.paused = self.paused;
        out.game_over = self.game_over;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
