use std::time::Duration;

use crate::error::{MctsError, Result};
use crate::stop::SearchBudget;

/// Configuration for MCTS search
#[derive(Debug, Clone)]
pub struct MctsConfig {
    /// Number of simulations to run
    pub num_simulations: u32,

    /// PUCT exploration constant
    pub c_puct: f32,

    /// Temperature for the visit distribution (1.0 = proportional to visits, 0.0 = argmax)
    pub temperature: f32,

    /// Optional wall-clock limit, checked once per simulation
    pub time_budget: Option<Duration>,

    /// Whether to add Dirichlet noise to root priors
    pub add_dirichlet_noise: bool,

    /// Dirichlet alpha parameter
    pub dirichlet_alpha: f32,

    /// Dirichlet epsilon for mixing noise (typically 0.25)
    pub dirichlet_epsilon: f32,
}

impl MctsConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set number of simulations
    pub fn with_simulations(mut self, n: u32) -> Self {
        self.num_simulations = n;
        self
    }

    /// Set PUCT exploration constant
    pub fn with_c_puct(mut self, c: f32) -> Self {
        self.c_puct = c;
        self
    }

    /// Set temperature for the visit distribution
    pub fn with_temperature(mut self, t: f32) -> Self {
        self.temperature = t;
        self
    }

    /// Stop early once `budget` has elapsed
    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget = Some(budget);
        self
    }

    /// Enable Dirichlet noise with given parameters
    pub fn with_dirichlet_noise(mut self, alpha: f32, epsilon: f32) -> Self {
        self.add_dirichlet_noise = true;
        self.dirichlet_alpha = alpha;
        self.dirichlet_epsilon = epsilon;
        self
    }

    /// Disable Dirichlet noise
    pub fn without_dirichlet_noise(mut self) -> Self {
        self.add_dirichlet_noise = false;
        self
    }

    /// Budget implied by `num_simulations` and `time_budget`
    pub fn budget(&self) -> SearchBudget {
        let budget = SearchBudget::iterations(self.num_simulations);
        match self.time_budget {
            Some(limit) => budget.with_time_limit(limit),
            None => budget,
        }
    }

    /// Reject parameter combinations the search cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.num_simulations == 0 {
            return Err(MctsError::InvalidConfig(
                "num_simulations must be positive".into(),
            ));
        }
        if !self.c_puct.is_finite() || self.c_puct <= 0.0 {
            return Err(MctsError::InvalidConfig(format!(
                "c_puct must be positive and finite, got {}",
                self.c_puct
            )));
        }
        if self.temperature.is_nan() {
            return Err(MctsError::InvalidConfig("temperature is NaN".into()));
        }
        if self.add_dirichlet_noise {
            if !(self.dirichlet_alpha > 0.0 && self.dirichlet_alpha.is_finite()) {
                return Err(MctsError::InvalidConfig(format!(
                    "dirichlet_alpha must be positive, got {}",
                    self.dirichlet_alpha
                )));
            }
            if !(0.0..=1.0).contains(&self.dirichlet_epsilon) {
                return Err(MctsError::InvalidConfig(format!(
                    "dirichlet_epsilon must be in [0, 1], got {}",
                    self.dirichlet_epsilon
                )));
            }
        }
        Ok(())
    }
}

impl Default for MctsConfig {
    fn default() -> Self {
        Self {
            num_simulations: 100,
            c_puct: 1.0,
            temperature: 1.0,
            time_budget: None,
            add_dirichlet_noise: false,
            dirichlet_alpha: 0.3,
            dirichlet_epsilon: 0.25,
        }
    }
}
