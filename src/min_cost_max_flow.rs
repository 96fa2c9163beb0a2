pub mod augmenting_path;
pub mod graph;
pub mod shortest_path;
pub mod solver;
pub mod status;
