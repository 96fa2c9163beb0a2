use crate::error::FlowError;
use num_traits::{Bounded, CheckedAdd, NumAssign};
use std::iter;
use std::ops::Neg;

// size hints come from untrusted input, reserve at most this many edges up front
const MAX_RESERVED_EDGES: usize = 1 << 20;

/// An original (forward) edge as seen by the caller after solving.
#[derive(PartialEq, Debug, Clone)]
pub struct Edge<Flow> {
    pub from: usize,
    pub to: usize,
    pub flow: Flow,
    pub upper: Flow,
    pub cost: Flow,
}

#[derive(Default, PartialEq, Debug, Clone)]
pub struct InsideEdge<Flow> {
    pub from: usize,
    pub to: usize,
    pub residual_capacity: Flow,
    pub cost: Flow,
    pub next: Option<usize>,
}

/// Residual network stored as an edge arena.
///
/// Edges always come in pairs: `2k` is the forward edge, `2k + 1` its reverse.
/// Every node owns a singly linked list of outgoing edges rooted at `head[u]`
/// and threaded through `InsideEdge::next`; new edges are prepended.
#[derive(Default)]
pub struct ResidualGraph<Flow> {
    num_nodes: usize,
    head: Vec<Option<usize>>,
    edges: Vec<InsideEdge<Flow>>,
    uppers: Vec<Flow>,
}

impl<Flow> ResidualGraph<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    /// Nodes are `1..=num_nodes`.
    pub fn new(num_nodes: usize, num_edges_hint: usize) -> Self {
        ResidualGraph {
            num_nodes,
            head: vec![None; num_nodes + 1],
            edges: Vec::with_capacity(2 * num_edges_hint.min(MAX_RESERVED_EDGES)),
            uppers: Vec::with_capacity(num_edges_hint.min(MAX_RESERVED_EDGES)),
        }
    }

    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.num_nodes
    }

    /// Number of stored edges, reverse edges included.
    #[inline]
    pub fn num_edges(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn contains_node(&self, u: usize) -> bool {
        (1..=self.num_nodes).contains(&u)
    }

    // return the index of the forward edge
    pub fn add_edge(&mut self, from: usize, to: usize, upper: Flow, cost: Flow) -> Result<usize, FlowError> {
        for node in [from, to] {
            if !self.contains_node(node) {
                return Err(FlowError::NodeOutOfRange { node, num_nodes: self.num_nodes });
            }
        }
        if upper < Flow::zero() {
            return Err(FlowError::NegativeCapacity { from, to });
        }

        let edge_id = self.edges.len();
        self.push_edge(from, to, upper, cost);
        self.push_edge(to, from, Flow::zero(), -cost);
        self.uppers.push(upper);
        debug_assert_eq!(self.paired_edge(edge_id), edge_id + 1);

        Ok(edge_id)
    }

    fn push_edge(&mut self, from: usize, to: usize, residual_capacity: Flow, cost: Flow) {
        let edge_id = self.edges.len();
        self.edges.push(InsideEdge { from, to, residual_capacity, cost, next: self.head[from] });
        self.head[from] = Some(edge_id);
    }

    #[inline]
    pub fn paired_edge(&self, edge_id: usize) -> usize {
        edge_id ^ 1
    }

    #[inline]
    pub fn is_forward(&self, edge_id: usize) -> bool {
        edge_id & 1 == 0
    }

    #[inline]
    pub fn edge(&self, edge_id: usize) -> &InsideEdge<Flow> {
        &self.edges[edge_id]
    }

    #[inline]
    pub fn head(&self, u: usize) -> Option<usize> {
        self.head[u]
    }

    #[inline]
    pub fn next(&self, edge_id: usize) -> Option<usize> {
        self.edges[edge_id].next
    }

    /// Ids of all edges leaving `u`, most recently added first.
    pub fn neighbors(&self, u: usize) -> impl Iterator<Item = usize> + '_ {
        iter::successors(self.head[u], move |&edge_id| self.edges[edge_id].next)
    }

    #[inline]
    pub fn capacity_of(&self, edge_id: usize) -> Flow {
        self.edges[edge_id].residual_capacity
    }

    /// Moves `delta` units of residual capacity from `edge_id` to its pair.
    pub fn reduce_capacity(&mut self, edge_id: usize, delta: Flow) {
        assert!(
            delta <= self.edges[edge_id].residual_capacity,
            "pushing more flow than the residual capacity of edge {}",
            edge_id
        );
        let rev = self.paired_edge(edge_id);
        self.edges[edge_id].residual_capacity -= delta;
        self.edges[rev].residual_capacity += delta;
    }

    /// Flow currently routed over the forward edge `edge_id`.
    #[inline]
    pub fn flow_of(&self, edge_id: usize) -> Flow {
        self.edges[edge_id | 1].residual_capacity
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        if edge_id >= self.edges.len() || !self.is_forward(edge_id) {
            return None;
        }
        let edge = &self.edges[edge_id];
        Some(Edge { from: edge.from, to: edge.to, flow: self.flow_of(edge_id), upper: self.uppers[edge_id / 2], cost: edge.cost })
    }

    // sum of the residual capacities leaving u, an upper bound for any flow starting at u
    // saturates at Flow::max_value()
    pub fn outgoing_capacity(&self, u: usize) -> Flow
    where
        Flow: CheckedAdd + Bounded,
    {
        self.neighbors(u)
            .try_fold(Flow::zero(), |sum, edge_id| sum.checked_add(&self.capacity_of(edge_id)))
            .unwrap_or_else(Flow::max_value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_are_paired() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(3, 2);
        let e0 = graph.add_edge(1, 2, 4, 3).unwrap();
        let e1 = graph.add_edge(2, 3, 5, -2).unwrap();
        assert_eq!((e0, e1), (0, 2));
        assert_eq!(graph.num_edges(), 4);

        let rev = graph.paired_edge(e1);
        assert_eq!(rev, 3);
        assert_eq!(graph.paired_edge(rev), e1);
        assert_eq!(graph.edge(rev).from, 3);
        assert_eq!(graph.edge(rev).to, 2);
        assert_eq!(graph.capacity_of(rev), 0);
        assert_eq!(graph.edge(rev).cost, 2);
    }

    #[test]
    fn adjacency_is_last_added_first() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(3, 3);
        let a = graph.add_edge(1, 2, 1, 0).unwrap();
        let b = graph.add_edge(1, 3, 1, 0).unwrap();
        let c = graph.add_edge(2, 1, 1, 0).unwrap();

        let out: Vec<usize> = graph.neighbors(1).collect();
        assert_eq!(out, vec![graph.paired_edge(c), b, a]);
        assert_eq!(graph.neighbors(3).collect::<Vec<_>>(), vec![graph.paired_edge(b)]);
        assert_eq!(graph.head(0), None);
    }

    #[test]
    fn reduce_capacity_keeps_pair_sum() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, 1);
        let e = graph.add_edge(1, 2, 10, 7).unwrap();
        graph.reduce_capacity(e, 4);
        assert_eq!(graph.capacity_of(e), 6);
        assert_eq!(graph.capacity_of(graph.paired_edge(e)), 4);
        assert_eq!(graph.get_edge(e), Some(Edge { from: 1, to: 2, flow: 4, upper: 10, cost: 7 }));

        graph.reduce_capacity(graph.paired_edge(e), 1);
        assert_eq!(graph.capacity_of(e) + graph.capacity_of(graph.paired_edge(e)), 10);
        assert_eq!(graph.flow_of(e), 3);
        assert_eq!(graph.get_edge(graph.paired_edge(e)), None);
    }

    #[test]
    #[should_panic]
    fn reduce_capacity_below_zero_panics() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, 1);
        let e = graph.add_edge(1, 2, 1, 0).unwrap();
        graph.reduce_capacity(e, 2);
    }

    #[test]
    fn outgoing_capacity_saturates() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, 2);
        graph.add_edge(1, 2, i64::MAX, 0).unwrap();
        assert_eq!(graph.outgoing_capacity(1), i64::MAX);
        graph.add_edge(1, 2, i64::MAX, 0).unwrap();
        assert_eq!(graph.outgoing_capacity(1), i64::MAX);
    }

    #[test]
    fn huge_edge_hint_does_not_reserve_everything() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, usize::MAX);
        graph.add_edge(1, 2, 1, 1).unwrap();
        assert_eq!(graph.num_edges(), 2);
    }

    #[test]
    fn rejects_bad_edges() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, 1);
        assert_eq!(graph.add_edge(0, 1, 1, 0), Err(FlowError::NodeOutOfRange { node: 0, num_nodes: 2 }));
        assert_eq!(graph.add_edge(1, 3, 1, 0), Err(FlowError::NodeOutOfRange { node: 3, num_nodes: 2 }));
        assert_eq!(graph.add_edge(1, 2, -1, 0), Err(FlowError::NegativeCapacity { from: 1, to: 2 }));
        assert_eq!(graph.num_edges(), 0);
    }

    #[test]
    fn self_loops_and_parallel_edges_are_kept() {
        let mut graph: ResidualGraph<i64> = ResidualGraph::new(2, 3);
        graph.add_edge(2, 2, 10, 1).unwrap();
        graph.add_edge(1, 2, 3, 1).unwrap();
        graph.add_edge(1, 2, 3, 5).unwrap();
        assert_eq!(graph.num_edges(), 6);
        assert_eq!(graph.neighbors(2).count(), 4);
        assert_eq!(graph.outgoing_capacity(1), 6);
    }
}
