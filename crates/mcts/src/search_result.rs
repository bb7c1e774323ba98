use rand::Rng;
use rand::distributions::{Distribution, WeightedIndex};

/// Statistics of one root move after search
#[derive(Debug, Clone, PartialEq)]
pub struct MoveStats<M> {
    /// The move
    pub mv: M,

    /// Visit-count-derived probability
    pub probability: f32,

    /// Number of simulations through this move
    pub visit_count: u32,

    /// Mean backed-up value (first player's perspective), 0.0 if never visited
    pub mean_value: f32,

    /// Normalized prior the move was expanded with
    pub prior: f32,
}

/// Result of MCTS search
#[derive(Debug, Clone)]
pub struct SearchResult<M> {
    /// One entry per root child, in the order children were created
    pub moves: Vec<MoveStats<M>>,

    /// Visit-weighted mean value of the root's children
    pub root_value: f32,

    /// Number of simulations actually run
    pub simulations: u32,

    /// Number of nodes allocated by the search
    pub tree_size: usize,
}

impl<M> SearchResult<M> {
    /// Result for a root that has no moves to search
    pub fn empty() -> Self {
        Self {
            moves: Vec::new(),
            root_value: 0.0,
            simulations: 0,
            tree_size: 1,
        }
    }

    /// Check if the root had no moves
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    /// Most visited move, earliest child on ties
    pub fn best_move(&self) -> Option<&M> {
        let mut best: Option<&MoveStats<M>> = None;
        for stats in &self.moves {
            if best.is_none_or(|b| stats.visit_count > b.visit_count) {
                best = Some(stats);
            }
        }
        best.map(|s| &s.mv)
    }

    /// Draw a move according to `probability`
    pub fn sample_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&M> {
        match WeightedIndex::new(self.moves.iter().map(|m| m.probability)) {
            Ok(dist) => Some(&self.moves[dist.sample(rng)].mv),
            Err(_) => self.best_move(),
        }
    }

    /// Get the total number of visits over root moves
    pub fn total_visits(&self) -> u32 {
        self.moves.iter().map(|m| m.visit_count).sum()
    }

    /// Get the probabilities in move order
    pub fn probabilities(&self) -> Vec<f32> {
        self.moves.iter().map(|m| m.probability).collect()
    }
}

impl<M: PartialEq> SearchResult<M> {
    /// Get the visit count for a specific move
    pub fn visit_count_for_move(&self, mv: &M) -> u32 {
        self.moves
            .iter()
            .find(|m| &m.mv == mv)
            .map(|m| m.visit_count)
            .unwrap_or(0)
    }
}
