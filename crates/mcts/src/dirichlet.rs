use puct_core::GameState;
use rand::Rng;
use rand_distr::{Dirichlet, Distribution};
use tracing::debug;

use crate::error::{MctsError, Result};
use crate::tree::{MctsTree, NodeId};

/// Add Dirichlet noise to root priors for exploration
///
/// The noise is mixed with the original prior: P' = (1-ε)*P + ε*noise
///
/// Only applied to the root's children. Roots with fewer than two children
/// are left unchanged. With a very small alpha every gamma draw can underflow
/// to zero; the sample is then replaced by a one-hot vector on a uniformly
/// chosen child, the limit of the distribution as alpha goes to zero.
pub fn add_dirichlet_noise_to_root<G, R>(
    tree: &mut MctsTree<G>,
    root_id: NodeId,
    alpha: f32,
    epsilon: f32,
    rng: &mut R,
) -> Result<()>
where
    G: GameState,
    R: Rng + ?Sized,
{
    let n = tree.node(root_id).children.len();
    if n < 2 {
        return Ok(());
    }

    let alpha_vec = vec![alpha as f64; n];
    let dirichlet =
        Dirichlet::new(&alpha_vec).map_err(|e| MctsError::DirichletError(e.to_string()))?;
    let mut noise = dirichlet.sample(rng);

    if noise.iter().any(|x| !x.is_finite()) {
        debug!(alpha, num_moves = n, "Dirichlet sample underflowed, using one-hot noise");
        let hit = rng.gen_range(0..n);
        noise = (0..n).map(|i| if i == hit { 1.0 } else { 0.0 }).collect();
    }

    let children = tree.node(root_id).children.clone();
    for (edge_id, eta) in children.into_iter().zip(noise) {
        let edge = tree.edge_mut(edge_id);
        edge.prior_probability = (1.0 - epsilon) * edge.prior_probability + epsilon * eta as f32;
    }

    Ok(())
}
