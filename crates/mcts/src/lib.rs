//! AlphaZero-style Monte Carlo Tree Search guided by a policy/value evaluator.
//!
//! The search is generic over any [`GameState`] and any [`Evaluator`]; values
//! are always expressed from the first player's perspective.

// Module declarations
mod backup;
mod config;
mod dirichlet;
mod error;
mod evaluation;
mod expansion;
mod mcts;
mod search_result;
mod selection;
mod stop;
mod tree;

#[cfg(test)]
mod test_utils;

// Public exports
pub use config::MctsConfig;
pub use error::{MctsError, Result};
pub use evaluation::{Evaluation, EvaluationError, Evaluator, UniformEvaluator};
pub use mcts::{Mcts, search};
pub use search_result::{MoveStats, SearchResult};
pub use stop::{SearchBudget, SearchProgress, StopCondition};

pub use puct_core::{GameState, IllegalMoveError, Outcome, Player};
