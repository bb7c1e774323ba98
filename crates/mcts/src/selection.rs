use puct_core::{GameState, Player};
use rand::Rng;

use crate::tree::{Edge, MctsTree, NodeId};

/// Select a leaf node to expand using PUCT formula
///
/// Traverses the tree from `root_id`, following the child with the highest
/// PUCT score until reaching a node without children. Ties between maximal
/// scores are broken uniformly at random, as is a node whose scores are all
/// NaN.
pub fn select<G, R>(tree: &MctsTree<G>, root_id: NodeId, c_puct: f32, rng: &mut R) -> NodeId
where
    G: GameState,
    R: Rng + ?Sized,
{
    let mut current_id = root_id;
    let mut best: Vec<NodeId> = Vec::new();

    loop {
        let node = tree.node(current_id);

        if node.is_leaf() {
            return current_id;
        }

        let sqrt_parent = (tree.parent_visit_count(current_id) as f32).sqrt();
        let player = node.state.active_player();

        let mut best_score = f32::NEG_INFINITY;
        best.clear();
        for &edge_id in &node.children {
            let edge = tree.edge(edge_id);
            let score = puct_value(edge, sqrt_parent, c_puct, player);
            if score > best_score {
                best_score = score;
                best.clear();
                best.push(edge.child);
            } else if score == best_score {
                best.push(edge.child);
            }
        }

        // Nothing compares when a score is NaN; fall back to any child
        if best.is_empty() {
            best.extend(node.children.iter().map(|&e| tree.edge(e).child));
        }
        current_id = if best.len() == 1 {
            best[0]
        } else {
            best[rng.gen_range(0..best.len())]
        };
    }
}

/// Calculate PUCT value for an edge
///
/// PUCT(s, a) = Q'(s, a) + c_puct * P(s, a) * sqrt(N(s)) / (1 + N(s, a))
///
/// Where:
/// - Q'(s, a) is Q(s, a) seen by the player to move in s: values are stored
///   from the first player's perspective, so it is negated when the second
///   player is to move
/// - P(s, a) is the prior probability from the evaluator
/// - N(s) is the visit count of the edge leading into s
/// - N(s, a) is the edge visit count
pub fn puct_value<M>(edge: &Edge<M>, sqrt_parent: f32, c_puct: f32, player: Player) -> f32 {
    let q = if edge.visit_count == 0 {
        0.0
    } else {
        edge.mean_value
    };
    let q = match player {
        Player::First => q,
        Player::Second => -q,
    };

    let u = c_puct * edge.prior_probability * sqrt_parent / (1.0 + edge.visit_count as f32);

    q + u
}
