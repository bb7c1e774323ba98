use puct_core::GameState;
use tracing::debug;

use crate::error::{MctsError, Result};
use crate::evaluation::{Evaluator, evaluate_state, normalize_priors};
use crate::tree::{MctsTree, NodeId};

/// Expand a leaf: create one child per legal move and assign evaluator priors
///
/// The leaf must be non-terminal. Returns the evaluator's value estimate for
/// the leaf. If the evaluator puts no mass on any legal move the priors fall
/// back to uniform. A state without legal moves is still evaluated but stays
/// a leaf. Nothing is added to the tree when an error is returned.
pub fn expand<G: GameState, E: Evaluator>(
    tree: &mut MctsTree<G>,
    leaf_id: NodeId,
    evaluator: &E,
) -> Result<f32> {
    debug_assert!(tree.node(leaf_id).is_leaf(), "only leaves are expanded");

    let (children, mut priors, value) = {
        let state = &tree.node(leaf_id).state;
        debug_assert!(!state.is_terminal(), "terminal nodes are never expanded");

        let moves = state.legal_moves();
        let evaluation = evaluate_state(state, evaluator)?;

        if moves.is_empty() {
            debug!(leaf = leaf_id, "Non-terminal state has no legal moves, kept as a leaf");
            return Ok(evaluation.value);
        }

        let mut children = Vec::with_capacity(moves.len());
        let mut priors = Vec::with_capacity(moves.len());
        for mv in moves {
            let index = state.action_index(&mv);
            let prior = *evaluation
                .priors
                .get(index)
                .ok_or(MctsError::InvalidActionIndex {
                    index,
                    size: evaluation.priors.len(),
                })?;
            let child_state = state.apply_move(&mv)?;

            priors.push(prior);
            children.push((mv, child_state));
        }

        (children, priors, evaluation.value)
    };

    if normalize_priors(&mut priors) {
        debug!(
            leaf = leaf_id,
            num_moves = priors.len(),
            "Evaluator gave no prior mass to legal moves, using uniform priors"
        );
    }

    for ((mv, child_state), prior) in children.into_iter().zip(priors) {
        let edge_id = tree.add_child(leaf_id, mv, child_state);
        tree.edge_mut(edge_id).prior_probability = prior;
    }

    debug_assert!(
        (tree
            .child_edges(leaf_id)
            .map(|e| e.prior_probability)
            .sum::<f32>()
            - 1.0)
            .abs()
            < 1e-3,
        "sibling priors must sum to 1"
    );

    Ok(value)
}

/// Value of a leaf: the fixed outcome if the game is over, otherwise the
/// evaluator's estimate obtained while expanding it
///
/// Terminal leaves never reach the evaluator.
pub fn expand_and_evaluate<G: GameState, E: Evaluator>(
    tree: &mut MctsTree<G>,
    leaf_id: NodeId,
    evaluator: &E,
) -> Result<f32> {
    if let Some(outcome) = tree.node(leaf_id).state.outcome() {
        return Ok(outcome.value());
    }

    expand(tree, leaf_id, evaluator)
}
