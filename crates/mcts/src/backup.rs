use puct_core::GameState;

use crate::tree::{MctsTree, NodeId};

/// Backup value from leaf to root
///
/// Walks the parent-edge chain from `leaf_id` upward, adding `value` to every
/// edge on the way and finally to the root's virtual visit count. Values are
/// kept in the first player's perspective throughout, so nothing is negated
/// here: `select` applies the perspective of the player to move.
pub fn backup<G: GameState>(tree: &mut MctsTree<G>, leaf_id: NodeId, value: f32) {
    let mut current = tree.node(leaf_id).parent_edge;

    while let Some(edge_id) = current {
        let edge = tree.edge_mut(edge_id);
        edge.record(value);
        let parent = edge.parent;

        current = tree.node(parent).parent_edge;
    }

    tree.root_visits += 1;
}
