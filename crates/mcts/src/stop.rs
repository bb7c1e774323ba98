//! Stopping predicates checked after every simulation.

use std::time::Duration;

/// How far a search has progressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchProgress {
    /// Simulations completed so far
    pub iterations: u32,

    /// Wall-clock time since the search started
    pub elapsed: Duration,
}

/// Decides when a search should stop
///
/// Checked once after each completed simulation, so every search runs at
/// least one simulation.
pub trait StopCondition {
    fn should_stop(&self, progress: &SearchProgress) -> bool;
}

impl<F> StopCondition for F
where
    F: Fn(&SearchProgress) -> bool,
{
    fn should_stop(&self, progress: &SearchProgress) -> bool {
        self(progress)
    }
}

/// Iteration and/or wall-clock budget, whichever runs out first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchBudget {
    max_iterations: Option<u32>,
    time_limit: Option<Duration>,
}

impl SearchBudget {
    pub fn iterations(n: u32) -> Self {
        Self {
            max_iterations: Some(n),
            time_limit: None,
        }
    }

    pub fn time(limit: Duration) -> Self {
        Self {
            max_iterations: None,
            time_limit: Some(limit),
        }
    }

    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    pub fn with_max_iterations(mut self, n: u32) -> Self {
        self.max_iterations = Some(n);
        self
    }

    pub fn max_iterations(&self) -> Option<u32> {
        self.max_iterations
    }

    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }
}

impl StopCondition for SearchBudget {
    fn should_stop(&self, progress: &SearchProgress) -> bool {
        let out_of_iterations = self
            .max_iterations
            .is_some_and(|max| progress.iterations >= max);
        let out_of_time = self
            .time_limit
            .is_some_and(|limit| progress.elapsed >= limit);

        // An empty budget would never stop
        out_of_iterations || out_of_time || self == &SearchBudget::default()
    }
}
