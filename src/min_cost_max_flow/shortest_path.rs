use crate::min_cost_max_flow::graph::ResidualGraph;
use num_traits::NumAssign;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, VecDeque};
use std::ops::Neg;

/// FIFO label-correcting search over edges with positive residual capacity.
///
/// Handles negative edge costs as long as the residual network has no
/// negative cycle.
pub struct LabelCorrecting<Flow> {
    que: VecDeque<usize>,
    in_queue: Vec<bool>,
    pub distances: Vec<Option<Flow>>,
}

impl<Flow> Default for LabelCorrecting<Flow> {
    fn default() -> Self {
        LabelCorrecting { que: VecDeque::new(), in_queue: Vec::new(), distances: Vec::new() }
    }
}

impl<Flow> LabelCorrecting<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    // returns whether the sink is reachable
    pub fn calculate_distance(&mut self, graph: &ResidualGraph<Flow>, source: usize, sink: usize) -> bool {
        let n = graph.num_nodes() + 1;
        self.distances.clear();
        self.distances.resize(n, None);
        self.in_queue.clear();
        self.in_queue.resize(n, false);
        self.que.clear();

        self.distances[source] = Some(Flow::zero());
        self.que.push_back(source);
        self.in_queue[source] = true;

        while let Some(u) = self.que.pop_front() {
            self.in_queue[u] = false;
            let Some(d) = self.distances[u] else { continue };

            for edge_id in graph.neighbors(u) {
                let edge = graph.edge(edge_id);
                if edge.residual_capacity == Flow::zero() {
                    continue;
                }

                let new_dist = d + edge.cost;
                if self.distances[edge.to].map_or(true, |old| new_dist < old) {
                    self.distances[edge.to] = Some(new_dist);
                    if !self.in_queue[edge.to] {
                        self.que.push_back(edge.to);
                        self.in_queue[edge.to] = true;
                    }
                }
            }
        }

        self.distances[sink].is_some()
    }
}

/// Dijkstra on reduced costs `cost(e) + potential(from) - potential(to)`.
///
/// The potentials must keep every reduced cost of a residual edge
/// non-negative. They are seeded from exact distances (see
/// [`PotentialDijkstra::seed_potentials`]) and advanced after every phase by
/// [`PotentialDijkstra::update_potentials`].
pub struct PotentialDijkstra<Flow> {
    pub potentials: Vec<Flow>,
    pub distances: Vec<Option<Flow>>,
    visited: Vec<bool>,
    // (predecessor node, edge used to reach this node)
    pub prev: Vec<Option<(usize, usize)>>,
}

impl<Flow> Default for PotentialDijkstra<Flow> {
    fn default() -> Self {
        PotentialDijkstra { potentials: Vec::new(), distances: Vec::new(), visited: Vec::new(), prev: Vec::new() }
    }
}

impl<Flow> PotentialDijkstra<Flow>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy,
{
    // nodes without a distance are unreachable from the source for the rest of the solve
    pub fn seed_potentials(&mut self, distances: &[Option<Flow>]) {
        self.potentials = distances.iter().map(|d| d.unwrap_or_else(Flow::zero)).collect();
    }

    #[inline]
    pub fn reduced_cost(&self, graph: &ResidualGraph<Flow>, edge_id: usize) -> Flow {
        let edge = graph.edge(edge_id);
        edge.cost + self.potentials[edge.from] - self.potentials[edge.to]
    }

    // returns whether the sink is reachable
    pub fn calculate_distance(&mut self, graph: &ResidualGraph<Flow>, source: usize, sink: usize) -> bool {
        let n = graph.num_nodes() + 1;
        debug_assert_eq!(self.potentials.len(), n);
        self.distances.clear();
        self.distances.resize(n, None);
        self.visited.clear();
        self.visited.resize(n, false);
        self.prev.clear();
        self.prev.resize(n, None);

        let mut bh = BinaryHeap::new();
        bh.push((Reverse(Flow::zero()), source));
        self.distances[source] = Some(Flow::zero());

        while let Some((Reverse(d), u)) = bh.pop() {
            if self.visited[u] {
                continue;
            }
            self.visited[u] = true;

            for edge_id in graph.neighbors(u) {
                let edge = graph.edge(edge_id);
                if edge.residual_capacity == Flow::zero() || self.visited[edge.to] {
                    continue;
                }

                let reduced_cost = self.reduced_cost(graph, edge_id);
                debug_assert!(reduced_cost >= Flow::zero());

                let new_dist = d + reduced_cost;
                if self.distances[edge.to].map_or(true, |old| new_dist < old) {
                    self.distances[edge.to] = Some(new_dist);
                    self.prev[edge.to] = Some((u, edge_id));
                    bh.push((Reverse(new_dist), edge.to));
                }
            }
        }

        self.visited[sink]
    }

    // after this, potentials[u] is the true shortest distance of every reached node
    pub fn update_potentials(&mut self) {
        for (potential, d) in self.potentials.iter_mut().zip(self.distances.iter()) {
            if let Some(d) = d {
                *potential += *d;
            }
        }
    }
}
