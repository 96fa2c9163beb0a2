use crate::error::FlowError;
use crate::min_cost_max_flow::augmenting_path::{augment_along_path, BlockingFlow};
use crate::min_cost_max_flow::graph::{Edge, ResidualGraph};
use crate::min_cost_max_flow::shortest_path::{LabelCorrecting, PotentialDijkstra};
use crate::min_cost_max_flow::status::Status;
use log::{debug, trace, warn};
use num_traits::{Bounded, CheckedAdd, NumAssign};
use std::fmt::Debug;
use std::ops::Neg;

#[derive(Default, PartialEq, Eq, Debug, Clone, Copy)]
pub enum Strategy {
    /// Label-correcting shortest paths, blocking flow over all tight paths per phase.
    LabelCorrecting,
    /// Dijkstra on reduced costs, one augmenting path per phase.
    #[default]
    PotentialRefined,
}

/// Minimum cost maximum flow by successive shortest paths.
///
/// Capacities, costs and shortest-path distances are `Flow`; the accumulated
/// flow and cost are `Total`, which must be wide enough for
/// `capacity * path cost` summed over all phases.
///
/// ```
/// use mcmf::min_cost_max_flow::solver::MinCostMaxFlow;
///
/// let mut solver: MinCostMaxFlow = MinCostMaxFlow::new(2, 1, 1, 2).unwrap();
/// solver.add_edge(1, 2, 5, 7).unwrap();
/// assert_eq!(solver.solve_potential_refined(), (5, 35));
/// ```
pub struct MinCostMaxFlow<Flow = i64, Total = i128> {
    graph: ResidualGraph<Flow>,
    source: usize,
    sink: usize,
    status: Status,
    flow: Total,
    cost: Total,
}

impl<Flow, Total> MinCostMaxFlow<Flow, Total>
where
    Flow: NumAssign + Neg<Output = Flow> + Ord + Copy + CheckedAdd + Bounded + Debug,
    Total: NumAssign + From<Flow> + Copy + Debug,
{
    pub fn new(num_nodes: usize, num_edges_hint: usize, source: usize, sink: usize) -> Result<Self, FlowError> {
        let graph = ResidualGraph::new(num_nodes, num_edges_hint);
        for node in [source, sink] {
            if !graph.contains_node(node) {
                return Err(FlowError::NodeOutOfRange { node, num_nodes });
            }
        }

        Ok(MinCostMaxFlow { graph, source, sink, status: Status::Running, flow: Total::zero(), cost: Total::zero() })
    }

    // return edge index
    pub fn add_edge(&mut self, from: usize, to: usize, capacity: Flow, cost: Flow) -> Result<usize, FlowError> {
        if self.status == Status::Terminated {
            return Err(FlowError::AlreadySolved);
        }
        self.graph.add_edge(from, to, capacity, cost)
    }

    #[inline]
    pub fn status(&self) -> Status {
        self.status
    }

    #[inline]
    pub fn graph(&self) -> &ResidualGraph<Flow> {
        &self.graph
    }

    #[inline]
    pub fn maximum_flow(&self) -> Total {
        self.flow
    }

    #[inline]
    pub fn minimum_cost(&self) -> Total {
        self.cost
    }

    pub fn get_edge(&self, edge_id: usize) -> Option<Edge<Flow>> {
        self.graph.get_edge(edge_id)
    }

    pub fn solve_label_correcting(&mut self) -> (Total, Total) {
        self.solve(Strategy::LabelCorrecting)
    }

    pub fn solve_potential_refined(&mut self) -> (Total, Total) {
        self.solve(Strategy::PotentialRefined)
    }

    pub fn solve(&mut self, strategy: Strategy) -> (Total, Total) {
        if self.status == Status::Terminated {
            warn!("solver already terminated, returning the recorded totals");
            return (self.flow, self.cost);
        }
        debug!(
            "solving with {:?}: {} nodes, {} edges, source {}, sink {}",
            strategy,
            self.graph.num_nodes(),
            self.graph.num_edges() / 2,
            self.source,
            self.sink
        );

        let phases = if self.source == self.sink {
            0
        } else {
            match strategy {
                Strategy::LabelCorrecting => self.run_label_correcting(),
                Strategy::PotentialRefined => self.run_potential_refined(),
            }
        };

        self.status = Status::Terminated;
        debug!("terminated after {} phases: flow {:?}, cost {:?}", phases, self.flow, self.cost);
        (self.flow, self.cost)
    }

    fn add_phase(&mut self, delta: Flow, distance: Flow) {
        let delta = Total::from(delta);
        self.flow += delta;
        self.cost += delta * Total::from(distance);
    }

    fn run_label_correcting(&mut self) -> usize {
        let mut oracle = LabelCorrecting::default();
        let mut blocking_flow = BlockingFlow::default();

        let mut phases = 0;
        while oracle.calculate_distance(&self.graph, self.source, self.sink) {
            let Some(distance) = oracle.distances[self.sink] else { break };
            let delta = blocking_flow.run(&mut self.graph, &oracle.distances, self.source, self.sink);
            trace!("phase {}: distance {:?}, pushed {:?}", phases, distance, delta);

            self.add_phase(delta, distance);
            phases += 1;
        }
        phases
    }

    fn run_potential_refined(&mut self) -> usize {
        let mut oracle = PotentialDijkstra::default();
        {
            let mut seed = LabelCorrecting::default();
            seed.calculate_distance(&self.graph, self.source, self.sink);
            oracle.seed_potentials(&seed.distances);
        }

        let mut phases = 0;
        while oracle.calculate_distance(&self.graph, self.source, self.sink) {
            oracle.update_potentials();
            // potentials[source] stays 0, so the sink potential is the path cost
            let distance = oracle.potentials[self.sink];
            let delta = augment_along_path(&mut self.graph, &oracle.prev, self.source, self.sink);
            trace!("phase {}: distance {:?}, pushed {:?}", phases, distance, delta);

            self.add_phase(delta, distance);
            phases += 1;
        }
        phases
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_source_and_sink_out_of_range() {
        assert!(matches!(MinCostMaxFlow::<i64, i128>::new(3, 0, 0, 3), Err(FlowError::NodeOutOfRange { node: 0, num_nodes: 3 })));
        assert!(matches!(MinCostMaxFlow::<i64, i128>::new(3, 0, 1, 4), Err(FlowError::NodeOutOfRange { node: 4, num_nodes: 3 })));
    }

    #[test]
    fn narrow_flow_with_wide_totals() {
        let mut solver: MinCostMaxFlow<i32, i64> = MinCostMaxFlow::new(2, 2, 1, 2).unwrap();
        solver.add_edge(1, 2, i32::MAX, i32::MAX).unwrap();
        solver.add_edge(1, 2, i32::MAX, 1).unwrap();
        let max = i64::from(i32::MAX);
        assert_eq!(solver.solve_label_correcting(), (2 * max, max * max + max));
    }

    #[test]
    fn edges_are_frozen_after_solve() {
        let mut solver: MinCostMaxFlow = MinCostMaxFlow::new(2, 1, 1, 2).unwrap();
        solver.add_edge(1, 2, 5, 7).unwrap();
        assert_eq!(solver.status(), Status::Running);
        assert_eq!(solver.solve_label_correcting(), (5, 35));
        assert_eq!(solver.status(), Status::Terminated);
        assert_eq!(solver.add_edge(1, 2, 1, 0), Err(FlowError::AlreadySolved));
    }

    #[test]
    fn second_solve_returns_recorded_totals() {
        let mut solver: MinCostMaxFlow = MinCostMaxFlow::new(2, 1, 1, 2).unwrap();
        let e = solver.add_edge(1, 2, 5, 7).unwrap();
        assert_eq!(solver.solve_potential_refined(), (5, 35));
        assert_eq!(solver.solve_label_correcting(), (5, 35));
        assert_eq!((solver.maximum_flow(), solver.minimum_cost()), (5, 35));
        assert_eq!(solver.get_edge(e).map(|edge| edge.flow), Some(5));
    }
}
