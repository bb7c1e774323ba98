//! Hexapawn fixture shared by the integration tests.
#![allow(dead_code)]

use std::cell::Cell;

use puct_mcts::{
    Evaluation, EvaluationError, Evaluator, GameState, IllegalMoveError, Outcome, Player,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Square {
    Empty,
    White,
    Black,
}

/// Pawn move between two squares (0..9, row-major from Black's home row)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PawnMove {
    pub from: usize,
    pub to: usize,
}

impl PawnMove {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Every move that can occur in Hexapawn, indexed by its action id
const ACTIONS: [(usize, usize); 28] = [
    // White advances
    (6, 3),
    (7, 4),
    (8, 5),
    (3, 0),
    (4, 1),
    (5, 2),
    // Black advances
    (0, 3),
    (1, 4),
    (2, 5),
    (3, 6),
    (4, 7),
    (5, 8),
    // White captures
    (6, 4),
    (7, 3),
    (7, 5),
    (8, 4),
    (3, 1),
    (4, 0),
    (4, 2),
    (5, 1),
    // Black captures
    (0, 4),
    (1, 3),
    (1, 5),
    (2, 4),
    (3, 7),
    (4, 6),
    (4, 8),
    (5, 7),
];

const WHITE_CAPTURES: [&[usize]; 9] = [&[], &[], &[], &[1], &[0, 2], &[1], &[4], &[3, 5], &[4]];
const BLACK_CAPTURES: [&[usize]; 9] = [&[4], &[3, 5], &[4], &[7], &[6, 8], &[7], &[], &[], &[]];

/// 3x3 Hexapawn. White (first player) starts on squares 6..9 and moves up,
/// Black starts on 0..3 and moves down. Reaching the far row wins; a side
/// with no move on its turn loses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hexapawn {
    board: [Square; 9],
    to_move: Player,
}

impl Hexapawn {
    /// Starting position, White to move
    pub fn new() -> Self {
        Self::from_squares(&[6, 7, 8], &[0, 1, 2], Player::First)
    }

    pub fn from_squares(white: &[usize], black: &[usize], to_move: Player) -> Self {
        let mut board = [Square::Empty; 9];
        for &sq in white {
            board[sq] = Square::White;
        }
        for &sq in black {
            board[sq] = Square::Black;
        }
        Self { board, to_move }
    }

    fn pieces(player: Player) -> (Square, Square) {
        match player {
            Player::First => (Square::White, Square::Black),
            Player::Second => (Square::Black, Square::White),
        }
    }

    fn promoted(&self) -> Option<Player> {
        if self.board[0..3].contains(&Square::White) {
            Some(Player::First)
        } else if self.board[6..9].contains(&Square::Black) {
            Some(Player::Second)
        } else {
            None
        }
    }
}

impl GameState for Hexapawn {
    type Move = PawnMove;
    const NUM_ACTIONS: usize = ACTIONS.len();

    fn legal_moves(&self) -> Vec<PawnMove> {
        if self.promoted().is_some() {
            return Vec::new();
        }

        let (own, opp) = Self::pieces(self.to_move);
        let mut moves = Vec::new();
        for from in 0..9 {
            if self.board[from] != own {
                continue;
            }
            let (forward, captures) = match self.to_move {
                Player::First => (from.checked_sub(3), WHITE_CAPTURES[from]),
                Player::Second => (Some(from + 3).filter(|&to| to < 9), BLACK_CAPTURES[from]),
            };
            if let Some(to) = forward.filter(|&to| self.board[to] == Square::Empty) {
                moves.push(PawnMove::new(from, to));
            }
            for &to in captures {
                if self.board[to] == opp {
                    moves.push(PawnMove::new(from, to));
                }
            }
        }
        moves
    }

    fn apply_move(&self, mv: &PawnMove) -> Result<Self, IllegalMoveError> {
        if !self.legal_moves().contains(mv) {
            return Err(IllegalMoveError::new(mv));
        }
        let mut next = self.clone();
        next.board[mv.to] = next.board[mv.from];
        next.board[mv.from] = Square::Empty;
        next.to_move = self.to_move.opponent();
        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome> {
        if let Some(winner) = self.promoted() {
            return Some(Outcome::win_for(winner));
        }
        if self.legal_moves().is_empty() {
            return Some(Outcome::win_for(self.to_move.opponent()));
        }
        None
    }

    fn encode(&self) -> Vec<f32> {
        let plane = |piece: Square| {
            self.board
                .iter()
                .map(move |&sq| if sq == piece { 1.0 } else { 0.0 })
        };
        let turn = if self.to_move == Player::First { 1.0 } else { 0.0 };

        plane(Square::White)
            .chain(plane(Square::Black))
            .chain(std::iter::repeat_n(turn, 3))
            .collect()
    }

    fn action_index(&self, mv: &PawnMove) -> usize {
        ACTIONS
            .iter()
            .position(|&a| a == (mv.from, mv.to))
            .expect("every legal move is in the action table")
    }

    fn active_player(&self) -> Player {
        self.to_move
    }
}

/// Wraps an evaluator and counts how often it is called
pub struct CountingEvaluator<E> {
    inner: E,
    calls: Cell<usize>,
}

impl<E: Evaluator> CountingEvaluator<E> {
    pub fn new(inner: E) -> Self {
        Self {
            inner,
            calls: Cell::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl<E: Evaluator> Evaluator for CountingEvaluator<E> {
    fn evaluate(&self, features: &[f32]) -> Result<Evaluation, EvaluationError> {
        self.calls.set(self.calls.get() + 1);
        self.inner.evaluate(features)
    }
}

/// Always fails, as an unreachable model server would
pub struct FailingEvaluator;

impl Evaluator for FailingEvaluator {
    fn evaluate(&self, _features: &[f32]) -> Result<Evaluation, EvaluationError> {
        Err(EvaluationError::Failed("model unavailable".into()))
    }
}
