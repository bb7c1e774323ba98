//! Synthetic game and evaluators shared by the unit tests.

use std::cell::{Cell, RefCell};

use puct_core::{GameState, IllegalMoveError, Outcome, Player};

use crate::evaluation::{Evaluation, EvaluationError, Evaluator};

/// How a finished `TreeGame` is scored
#[derive(Debug, Clone, Copy)]
pub enum OutcomeRule {
    Always(Outcome),
    /// Final move 0 wins for the first player, 1 for the second
    LastMoveDecides,
}

/// Two moves (0 and 1) per ply, players alternate, over after `depth` plies
#[derive(Debug, Clone)]
pub struct TreeGame {
    pub path: Vec<u8>,
    pub depth: usize,
    pub rule: OutcomeRule,
    /// Report no legal moves once this many plies are played (without ending)
    pub stuck_at: Option<usize>,
}

impl TreeGame {
    pub fn new(depth: usize) -> Self {
        Self {
            path: Vec::new(),
            depth,
            rule: OutcomeRule::Always(Outcome::Draw),
            stuck_at: None,
        }
    }

    pub fn with_rule(mut self, rule: OutcomeRule) -> Self {
        self.rule = rule;
        self
    }

    pub fn stuck_at(mut self, plies: usize) -> Self {
        self.stuck_at = Some(plies);
        self
    }

    /// Already over with `outcome`
    pub fn finished(outcome: Outcome) -> Self {
        Self::new(0).with_rule(OutcomeRule::Always(outcome))
    }
}

impl GameState for TreeGame {
    type Move = u8;
    const NUM_ACTIONS: usize = 2;

    fn legal_moves(&self) -> Vec<u8> {
        if self.is_terminal() || self.stuck_at == Some(self.path.len()) {
            Vec::new()
        } else {
            vec![0, 1]
        }
    }

    fn apply_move(&self, mv: &u8) -> Result<Self, IllegalMoveError> {
        if !self.legal_moves().contains(mv) {
            return Err(IllegalMoveError::new(mv));
        }
        let mut next = self.clone();
        next.path.push(*mv);
        Ok(next)
    }

    fn outcome(&self) -> Option<Outcome> {
        if self.path.len() < self.depth {
            return None;
        }
        Some(match self.rule {
            OutcomeRule::Always(outcome) => outcome,
            OutcomeRule::LastMoveDecides => match self.path.last() {
                Some(0) => Outcome::FirstPlayerWins,
                _ => Outcome::SecondPlayerWins,
            },
        })
    }

    fn encode(&self) -> Vec<f32> {
        vec![
            self.path.len() as f32,
            self.path.last().map_or(-1.0, |&m| m as f32),
        ]
    }

    fn action_index(&self, mv: &u8) -> usize {
        *mv as usize
    }

    fn active_player(&self) -> Player {
        if self.path.len() % 2 == 0 {
            Player::First
        } else {
            Player::Second
        }
    }
}

/// Returns the same priors and value for every state, counting calls
pub struct FixedEvaluator {
    priors: Vec<f32>,
    value: f32,
    calls: Cell<usize>,
    seen: RefCell<Vec<Vec<f32>>>,
}

impl FixedEvaluator {
    pub fn new(priors: Vec<f32>, value: f32) -> Self {
        Self {
            priors,
            value,
            calls: Cell::new(0),
            seen: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.get()
    }

    /// Features passed to each call, in order
    pub fn seen(&self) -> Vec<Vec<f32>> {
        self.seen.borrow().clone()
    }
}

impl Evaluator for FixedEvaluator {
    fn evaluate(&self, features: &[f32]) -> Result<Evaluation, EvaluationError> {
        self.calls.set(self.calls.get() + 1);
        self.seen.borrow_mut().push(features.to_vec());
        Ok(Evaluation {
            priors: self.priors.clone(),
            value: self.value,
        })
    }
}
