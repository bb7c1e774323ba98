use puct_core::IllegalMoveError;
use thiserror::Error;

use crate::evaluation::EvaluationError;

#[derive(Error, Debug)]
pub enum MctsError {
    #[error("Game error: {0}")]
    IllegalMove(#[from] IllegalMoveError),

    #[error("Evaluator error: {0}")]
    Evaluation(#[from] EvaluationError),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Action index {index} outside action space of size {size}")]
    InvalidActionIndex { index: usize, size: usize },

    #[error("Dirichlet sampling error: {0}")]
    DirichletError(String),
}

pub type Result<T> = std::result::Result<T, MctsError>;
