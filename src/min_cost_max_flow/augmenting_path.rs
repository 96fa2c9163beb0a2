use crate::min_cost_max_flow::graph::ResidualGraph;
use num_traits::{Bounded, CheckedAdd, NumAssign};
use std::ops::Neg;

/// Pushes a blocking flow through the tight edges of a shortest-path labeling.
///
/// An edge `u -> v` is tight when it has residual capacity and
/// `distance(v) == distance(u) + cost`. Each node keeps a cursor into its
/// adjacency list so exhausted edges are not scanned twice in one phase.
#[derive(Default)]
pub struct BlockingFlow {
    current_edge: Vec<Option<usize>>,
    on_stack: Vec<bool>,
}

impl BlockingFlow {
    // returns the total flow pushed in this phase
    pub fn run<Flow>(&mut self, graph: &mut ResidualGraph<Flow>, distances: &[Option<Flow>], source: usize, sink: usize) -> Flow
    where
        Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + CheckedAdd + Bounded,
    {
        let n = graph.num_nodes() + 1;
        self.current_edge.clear();
        self.current_edge.extend((0..n).map(|u| graph.head(u)));
        self.on_stack.clear();
        self.on_stack.resize(n, false);

        let upper = graph.outgoing_capacity(source);
        let mut flow = Flow::zero();
        while flow < upper {
            let delta = self.dfs(graph, distances, source, sink, upper - flow);
            if delta == Flow::zero() {
                break;
            }
            flow += delta;
        }

        debug_assert!(flow > Flow::zero());
        flow
    }

    fn dfs<Flow>(&mut self, graph: &mut ResidualGraph<Flow>, distances: &[Option<Flow>], u: usize, sink: usize, upper: Flow) -> Flow
    where
        Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
    {
        if u == sink {
            return upper;
        }

        self.on_stack[u] = true;
        let mut res = Flow::zero();
        while let Some(edge_id) = self.current_edge[u] {
            let (to, cost) = (graph.edge(edge_id).to, graph.edge(edge_id).cost);
            let residual_capacity = graph.capacity_of(edge_id);

            if residual_capacity > Flow::zero() && !self.on_stack[to] && is_tight(distances, u, to, cost) {
                let d = self.dfs(graph, distances, to, sink, residual_capacity.min(upper - res));
                if d > Flow::zero() {
                    graph.reduce_capacity(edge_id, d);
                    res += d;
                    if res == upper {
                        // the edge may still have capacity left
                        break;
                    }
                }
            }
            self.current_edge[u] = graph.next(edge_id);
        }
        self.on_stack[u] = false;

        res
    }
}

#[inline]
fn is_tight<Flow>(distances: &[Option<Flow>], from: usize, to: usize, cost: Flow) -> bool
where
    Flow: NumAssign + Ord + Copy,
{
    match (distances[from], distances[to]) {
        (Some(d_from), Some(d_to)) => d_to == d_from + cost,
        _ => false,
    }
}

/// Pushes the bottleneck capacity along the single path recorded in `prev`,
/// walking back from `sink` to `source`.
pub fn augment_along_path<Flow>(graph: &mut ResidualGraph<Flow>, prev: &[Option<(usize, usize)>], source: usize, sink: usize) -> Flow
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    // calculate delta
    let Some((_, last_edge)) = prev[sink] else {
        return Flow::zero();
    };
    let mut delta = graph.capacity_of(last_edge);
    let mut v = sink;
    while let Some((u, edge_id)) = prev[v] {
        delta = delta.min(graph.capacity_of(edge_id));
        v = u;
    }
    debug_assert_eq!(v, source);
    debug_assert!(delta > Flow::zero());

    // update flow
    let mut v = sink;
    while let Some((u, edge_id)) = prev[v] {
        graph.reduce_capacity(edge_id, delta);
        v = u;
    }

    delta
}
