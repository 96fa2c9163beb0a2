pub mod error;
pub mod input;
pub mod min_cost_max_flow;

pub use error::FlowError;
pub use min_cost_max_flow::solver::{MinCostMaxFlow, Strategy};
pub use min_cost_max_flow::status::Status;
