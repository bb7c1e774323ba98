use puct_core::GameState;

/// Node ID in the arena-style tree
pub type NodeId = usize;

/// Edge ID in the arena-style tree
pub type EdgeId = usize;

/// Statistics for one action taken from a node
#[derive(Debug, Clone)]
pub struct Edge<M> {
    /// Move this edge represents
    pub mv: M,

    /// N: number of backups through this edge
    pub visit_count: u32,

    /// W: sum of backed-up values
    pub total_value: f32,

    /// Q: W / N, only meaningful once N > 0
    pub mean_value: f32,

    /// P: normalized prior from the evaluator
    pub prior_probability: f32,

    /// Node the move is played from
    pub parent: NodeId,

    /// Node the move leads to
    pub child: NodeId,
}

impl<M> Edge<M> {
    pub fn new(mv: M, parent: NodeId, child: NodeId) -> Self {
        Self {
            mv,
            visit_count: 0,
            total_value: 0.0,
            mean_value: 0.0,
            prior_probability: 0.0,
            parent,
            child,
        }
    }

    /// Add one backed-up value to the running statistics
    pub fn record(&mut self, value: f32) {
        self.visit_count += 1;
        self.total_value += value;
        self.mean_value = self.total_value / self.visit_count as f32;
    }
}

/// A single reachable game state
#[derive(Debug, Clone)]
pub struct Node<G> {
    /// Game state at this node, never mutated after creation
    pub state: G,

    /// Outgoing edges in creation order
    pub children: Vec<EdgeId>,

    /// Edge that produced this node (None for root)
    pub parent_edge: Option<EdgeId>,
}

impl<G> Node<G> {
    pub fn new(state: G, parent_edge: Option<EdgeId>) -> Self {
        Self {
            state,
            children: Vec::new(),
            parent_edge,
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// MCTS tree using arena allocation
///
/// Nodes and edges refer to each other by index, so the parent back-reference
/// never creates an ownership cycle.
pub struct MctsTree<G: GameState> {
    /// Arena of all nodes
    pub nodes: Vec<Node<G>>,

    /// Arena of all edges
    pub edges: Vec<Edge<G::Move>>,

    /// Root node ID (always 0)
    pub root_id: NodeId,

    /// Visit count of the root's virtual incoming edge
    pub root_visits: u32,
}

impl<G: GameState> MctsTree<G> {
    /// Create a tree holding only `root_state`
    pub fn new(root_state: G) -> Self {
        Self {
            nodes: vec![Node::new(root_state, None)],
            edges: Vec::new(),
            root_id: 0,
            root_visits: 0,
        }
    }

    /// Allocate a child node and the edge leading to it, returning the edge ID
    pub fn add_child(&mut self, parent: NodeId, mv: G::Move, state: G) -> EdgeId {
        let child_id = self.nodes.len();
        let edge_id = self.edges.len();

        self.nodes.push(Node::new(state, Some(edge_id)));
        self.edges.push(Edge::new(mv, parent, child_id));
        self.nodes[parent].children.push(edge_id);

        edge_id
    }

    pub fn node(&self, id: NodeId) -> &Node<G> {
        &self.nodes[id]
    }

    pub fn edge(&self, id: EdgeId) -> &Edge<G::Move> {
        &self.edges[id]
    }

    pub fn edge_mut(&mut self, id: EdgeId) -> &mut Edge<G::Move> {
        &mut self.edges[id]
    }

    /// Outgoing edges of `id` in creation order
    pub fn child_edges(&self, id: NodeId) -> impl Iterator<Item = &Edge<G::Move>> + '_ {
        self.nodes[id].children.iter().map(move |&e| &self.edges[e])
    }

    /// Visit count of the edge leading into `id` (the root's virtual count for the root)
    pub fn parent_visit_count(&self, id: NodeId) -> u32 {
        match self.nodes[id].parent_edge {
            Some(edge_id) => self.edges[edge_id].visit_count,
            None => self.root_visits,
        }
    }

    /// Number of edges between the root and `id`
    pub fn depth(&self, id: NodeId) -> usize {
        let mut depth = 0;
        let mut current = self.nodes[id].parent_edge;
        while let Some(edge_id) = current {
            depth += 1;
            current = self.nodes[self.edges[edge_id].parent].parent_edge;
        }
        depth
    }

    /// Get the number of nodes in the tree
    pub fn size(&self) -> usize {
        self.nodes.len()
    }
}
