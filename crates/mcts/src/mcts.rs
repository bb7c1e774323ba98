use std::time::Instant;

use puct_core::GameState;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use tracing::{debug, trace};

use crate::backup::backup;
use crate::config::MctsConfig;
use crate::dirichlet::add_dirichlet_noise_to_root;
use crate::error::Result;
use crate::evaluation::Evaluator;
use crate::expansion::{expand, expand_and_evaluate};
use crate::search_result::{MoveStats, SearchResult};
use crate::selection::select;
use crate::stop::{SearchProgress, StopCondition};
use crate::tree::{MctsTree, NodeId};

/// Below this temperature the visit distribution is one-hot
const GREEDY_TEMPERATURE: f32 = 0.01;

/// Guided Monte Carlo Tree Search (AlphaZero-style PUCT)
///
/// Every call to [`Mcts::search`] builds a fresh tree for the given root; only
/// the random generator used for tie-breaks and root noise persists.
pub struct Mcts {
    rng: ChaCha20Rng,
}

impl Mcts {
    /// Create a new MCTS instance seeded from OS entropy
    pub fn new() -> Self {
        Self {
            rng: ChaCha20Rng::from_entropy(),
        }
    }

    /// Create a new MCTS instance with reproducible tie-breaks and noise
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// Run MCTS search from a given game state
    ///
    /// Stops after `config.num_simulations` simulations or once
    /// `config.time_budget` has elapsed, whichever comes first. A root that
    /// is terminal (or has no legal moves) yields an empty result without
    /// consulting the evaluator.
    pub fn search<G: GameState, E: Evaluator>(
        &mut self,
        root: &G,
        evaluator: &E,
        config: &MctsConfig,
    ) -> Result<SearchResult<G::Move>> {
        self.search_until(root, evaluator, config, &config.budget())
    }

    /// Run MCTS search, stopping when `stop` says so instead of using the
    /// budget in `config`
    pub fn search_until<G, E, S>(
        &mut self,
        root: &G,
        evaluator: &E,
        config: &MctsConfig,
        stop: &S,
    ) -> Result<SearchResult<G::Move>>
    where
        G: GameState,
        E: Evaluator,
        S: StopCondition + ?Sized,
    {
        config.validate()?;

        // Check if position is already terminal
        if root.is_terminal() {
            debug!("Root is terminal, nothing to search");
            return Ok(SearchResult::empty());
        }
        if root.legal_moves().is_empty() {
            debug!("Root has no legal moves, nothing to search");
            return Ok(SearchResult::empty());
        }

        let start = Instant::now();

        // 1. Initialize the tree and expand the root, discarding its value
        let mut tree = MctsTree::new(root.clone());
        let root_id = tree.root_id;
        expand(&mut tree, root_id, evaluator)?;

        // 2. Add Dirichlet noise if configured
        if config.add_dirichlet_noise {
            add_dirichlet_noise_to_root(
                &mut tree,
                root_id,
                config.dirichlet_alpha,
                config.dirichlet_epsilon,
                &mut self.rng,
            )?;
        }

        debug!(
            num_moves = tree.node(root_id).children.len(),
            max_simulations = config.num_simulations,
            c_puct = config.c_puct,
            "Starting MCTS search"
        );

        // 3. Run simulations
        let mut iterations = 0u32;
        loop {
            self.simulate(&mut tree, root_id, evaluator, config.c_puct)?;
            iterations += 1;

            let progress = SearchProgress {
                iterations,
                elapsed: start.elapsed(),
            };
            if stop.should_stop(&progress) {
                break;
            }
        }

        // 4. Extract results
        let result = create_search_result(&tree, root_id, config.temperature, iterations);

        debug!(
            simulations = iterations,
            tree_size = result.tree_size,
            root_value = result.root_value,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "MCTS search finished"
        );

        Ok(result)
    }

    /// Run a single simulation (select -> expand/evaluate -> backup)
    fn simulate<G: GameState, E: Evaluator>(
        &mut self,
        tree: &mut MctsTree<G>,
        root_id: NodeId,
        evaluator: &E,
        c_puct: f32,
    ) -> Result<()> {
        // Selection: traverse tree using PUCT
        let leaf_id = select(tree, root_id, c_puct, &mut self.rng);

        // Expansion & Evaluation: terminal outcome or evaluator value
        let value = expand_and_evaluate(tree, leaf_id, evaluator)?;

        // Backup: propagate value up tree
        backup(tree, leaf_id, value);

        trace!(
            leaf = leaf_id,
            depth = tree.depth(leaf_id),
            value,
            "MCTS simulation complete"
        );

        Ok(())
    }
}

impl Default for Mcts {
    fn default() -> Self {
        Self::new()
    }
}

/// Search `root` for a fixed number of iterations
///
/// Returns `(move, probability, visit count, mean value)` statistics for every
/// root move in creation order; empty if `root` is already over.
///
/// Seeds its random generator from OS entropy. The first simulation always
/// breaks a tie among the root moves, so two calls on the same root can
/// differ; use [`Mcts::with_seed`] when results must be reproducible.
pub fn search<G: GameState, E: Evaluator>(
    root: &G,
    evaluator: &E,
    iterations: u32,
    c_puct: f32,
    tau: f32,
) -> Result<Vec<MoveStats<G::Move>>> {
    let config = MctsConfig::default()
        .with_simulations(iterations)
        .with_c_puct(c_puct)
        .with_temperature(tau);

    Ok(Mcts::new().search(root, evaluator, &config)?.moves)
}

/// Create search result from root edge statistics
fn create_search_result<G: GameState>(
    tree: &MctsTree<G>,
    root_id: NodeId,
    temperature: f32,
    simulations: u32,
) -> SearchResult<G::Move> {
    let visits: Vec<u32> = tree.child_edges(root_id).map(|e| e.visit_count).collect();
    let probabilities = visit_distribution(&visits, temperature);

    let moves: Vec<MoveStats<G::Move>> = tree
        .child_edges(root_id)
        .zip(probabilities)
        .map(|(edge, probability)| MoveStats {
            mv: edge.mv.clone(),
            probability,
            visit_count: edge.visit_count,
            mean_value: edge.mean_value,
            prior: edge.prior_probability,
        })
        .collect();

    let total_visits: u32 = visits.iter().sum();
    debug_assert_eq!(total_visits, simulations, "every simulation passes a root edge");

    let root_value = if total_visits > 0 {
        tree.child_edges(root_id).map(|e| e.total_value).sum::<f32>() / total_visits as f32
    } else {
        0.0
    };

    SearchResult {
        moves,
        root_value,
        simulations,
        tree_size: tree.size(),
    }
}

/// Convert visit counts into move probabilities
///
/// - temperature < 0.01 (including zero and negative): one-hot on the most
///   visited move, earliest on ties
/// - temperature = 1: proportional to visits
/// - otherwise: proportional to visits^(1/t)
///
/// With no visits at all the distribution is uniform.
pub(crate) fn visit_distribution(visits: &[u32], temperature: f32) -> Vec<f32> {
    let Some(&max) = visits.iter().max() else {
        return Vec::new();
    };

    if max == 0 {
        return vec![1.0 / visits.len() as f32; visits.len()];
    }

    if temperature < GREEDY_TEMPERATURE {
        let mut probs = vec![0.0; visits.len()];
        if let Some(best) = visits.iter().position(|&v| v == max) {
            probs[best] = 1.0;
        }
        return probs;
    }

    // Scale by the max first so visits^(1/t) cannot overflow
    let inv_temp = 1.0f64 / temperature as f64;
    let weights: Vec<f64> = visits
        .iter()
        .map(|&v| (v as f64 / max as f64).powf(inv_temp))
        .collect();
    let sum: f64 = weights.iter().sum();

    weights.iter().map(|&w| (w / sum) as f32).collect()
}
