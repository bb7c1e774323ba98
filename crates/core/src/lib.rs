//! Game-state abstraction for two-player, perfect-information, turn-based games.
//!
//! The search engine never looks inside a game. It only generates moves,
//! applies them to immutable snapshots, asks whether a state is over and
//! encodes states for the evaluator, all through [`GameState`].

use std::fmt::Debug;

use thiserror::Error;

/// Side to move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    First,
    Second,
}

impl Player {
    /// The other player
    pub fn opponent(self) -> Self {
        match self {
            Player::First => Player::Second,
            Player::Second => Player::First,
        }
    }
}

/// Result of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Outcome {
    FirstPlayerWins,
    SecondPlayerWins,
    Draw,
}

impl Outcome {
    /// Value of the outcome from the first player's perspective
    ///
    /// Returns:
    /// - 1.0 if the first player won
    /// - -1.0 if the second player won
    /// - 0.0 for a draw
    pub fn value(self) -> f32 {
        match self {
            Outcome::FirstPlayerWins => 1.0,
            Outcome::SecondPlayerWins => -1.0,
            Outcome::Draw => 0.0,
        }
    }

    /// Winning player, if any
    pub fn winner(self) -> Option<Player> {
        match self {
            Outcome::FirstPlayerWins => Some(Player::First),
            Outcome::SecondPlayerWins => Some(Player::Second),
            Outcome::Draw => None,
        }
    }

    /// Outcome in which `player` has won
    pub fn win_for(player: Player) -> Self {
        match player {
            Player::First => Outcome::FirstPlayerWins,
            Player::Second => Outcome::SecondPlayerWins,
        }
    }
}

/// Raised when a move outside the current legal-move list is applied
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Illegal move: {0}")]
pub struct IllegalMoveError(pub String);

impl IllegalMoveError {
    pub fn new<M: Debug>(mv: &M) -> Self {
        Self(format!("{mv:?}"))
    }
}

/// Immutable game snapshot as seen by the search
///
/// Applying a move never mutates `self`: it produces the successor state,
/// so every tree node can own its state without aliasing.
pub trait GameState: Clone {
    /// Opaque action descriptor
    type Move: Clone + PartialEq + Debug;

    /// Size of the evaluator's action space
    const NUM_ACTIONS: usize;

    /// Legal moves in a stable order (empty if none)
    fn legal_moves(&self) -> Vec<Self::Move>;

    /// Successor state after `mv`
    fn apply_move(&self, mv: &Self::Move) -> Result<Self, IllegalMoveError>;

    /// `Some` once the game is over
    fn outcome(&self) -> Option<Outcome>;

    fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Fixed-length feature vector for the evaluator
    fn encode(&self) -> Vec<f32>;

    /// Index of `mv` in the evaluator's action space (`< NUM_ACTIONS`)
    fn action_index(&self, mv: &Self::Move) -> usize;

    /// Player to move
    fn active_player(&self) -> Player;
}
