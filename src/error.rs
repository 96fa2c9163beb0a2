use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum FlowError {
    #[error("node {node} is outside 1..={num_nodes}")]
    NodeOutOfRange { node: usize, num_nodes: usize },

    #[error("edge {from} -> {to} has a negative capacity")]
    NegativeCapacity { from: usize, to: usize },

    #[error("edges cannot be added once solving has started")]
    AlreadySolved,
}
