use puct_core::GameState;
use thiserror::Error;

use crate::error::Result;

/// Errors reported by (or about) an evaluator
#[derive(Error, Debug)]
pub enum EvaluationError {
    #[error("Expected policy of length {expected}, got {actual}")]
    PolicyLength { expected: usize, actual: usize },

    #[error("Value estimate is not finite: {0}")]
    NonFiniteValue(f32),

    #[error("Evaluation failed: {0}")]
    Failed(String),
}

/// Output of a single evaluation
#[derive(Debug, Clone)]
pub struct Evaluation {
    /// Prior probability per action index
    pub priors: Vec<f32>,

    /// Value estimate in [-1, 1], from the first player's perspective
    pub value: f32,
}

/// Minimal interface required from a policy-value predictor
pub trait Evaluator {
    fn evaluate(&self, features: &[f32]) -> std::result::Result<Evaluation, EvaluationError>;
}

impl<E: Evaluator + ?Sized> Evaluator for &E {
    fn evaluate(&self, features: &[f32]) -> std::result::Result<Evaluation, EvaluationError> {
        (**self).evaluate(features)
    }
}

/// Evaluate a game state and check the output shape
///
/// Returns an [`Evaluation`] whose `priors` has exactly `G::NUM_ACTIONS`
/// entries and whose `value` is finite.
pub fn evaluate_state<G: GameState, E: Evaluator>(state: &G, evaluator: &E) -> Result<Evaluation> {
    let features = state.encode();
    let evaluation = evaluator.evaluate(&features)?;

    if evaluation.priors.len() != G::NUM_ACTIONS {
        return Err(EvaluationError::PolicyLength {
            expected: G::NUM_ACTIONS,
            actual: evaluation.priors.len(),
        }
        .into());
    }

    if !evaluation.value.is_finite() {
        return Err(EvaluationError::NonFiniteValue(evaluation.value).into());
    }

    Ok(evaluation)
}

/// Rescale priors in place so they sum to 1
///
/// Negative and non-finite entries count as zero mass. When no mass is left
/// every entry becomes `1 / len`. Returns `true` if that uniform fallback was used.
pub fn normalize_priors(priors: &mut [f32]) -> bool {
    if priors.is_empty() {
        return false;
    }

    let mut sum = 0.0f64;
    for p in priors.iter_mut() {
        if !p.is_finite() || *p < 0.0 {
            *p = 0.0;
        }
        sum += *p as f64;
    }

    if sum > 0.0 {
        for p in priors.iter_mut() {
            *p = (*p as f64 / sum) as f32;
        }
        false
    } else {
        let uniform = 1.0 / priors.len() as f32;
        priors.fill(uniform);
        true
    }
}

/// Evaluator that assigns equal probability to every action.
/// Value is always 0.0 (neutral).
#[derive(Debug, Clone)]
pub struct UniformEvaluator {
    num_actions: usize,
}

impl UniformEvaluator {
    pub fn new(num_actions: usize) -> Self {
        Self { num_actions }
    }

    /// Uniform evaluator sized for `G`'s action space
    pub fn for_game<G: GameState>() -> Self {
        Self::new(G::NUM_ACTIONS)
    }
}

impl Evaluator for UniformEvaluator {
    fn evaluate(&self, _features: &[f32]) -> std::result::Result<Evaluation, EvaluationError> {
        let prior = if self.num_actions == 0 {
            0.0
        } else {
            1.0 / self.num_actions as f32
        };
        Ok(Evaluation {
            priors: vec![prior; self.num_actions],
            value: 0.0,
        })
    }
}
