//! Reading problems in the `n m s t` format.
//!
//! The first four integers are the number of nodes, the number of edges, the
//! source and the sink. Each of the following `m` groups of four integers is
//! an edge `u v capacity cost`. Tokens are separated by arbitrary whitespace.
//! Capacities and costs must fit in an `i32`; they are widened to `i64` for
//! the solver, whose totals are `i128`.

use crate::error::FlowError;
use crate::min_cost_max_flow::solver::MinCostMaxFlow;
use std::io::{self, BufRead};
use std::str::FromStr;
use thiserror::Error;

// the edge count is read from the input, do not trust it for allocation
const MAX_RESERVED_EDGES: usize = 1 << 20;

#[derive(Debug, Error)]
pub enum InputError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("unexpected end of input, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("invalid {expected} '{token}' on line {line}")]
    InvalidInteger { expected: &'static str, token: String, line: usize },

    #[error(transparent)]
    Flow(#[from] FlowError),
}

#[derive(PartialEq, Debug, Clone)]
pub struct Problem {
    pub num_nodes: usize,
    pub source: usize,
    pub sink: usize,
    // (from, to, capacity, cost)
    pub edges: Vec<(usize, usize, i64, i64)>,
}

impl Problem {
    pub fn into_solver(self) -> Result<MinCostMaxFlow<i64>, FlowError> {
        let mut solver = MinCostMaxFlow::new(self.num_nodes, self.edges.len(), self.source, self.sink)?;
        for (from, to, capacity, cost) in self.edges {
            solver.add_edge(from, to, capacity, cost)?;
        }
        Ok(solver)
    }
}

struct Tokens<R> {
    io: R,
    line: String,
    line_number: usize,
    pending: Vec<String>,
}

impl<R: BufRead> Tokens<R> {
    fn new(io: R) -> Self {
        Tokens { io, line: String::new(), line_number: 0, pending: Vec::new() }
    }

    fn next<T: FromStr>(&mut self, expected: &'static str) -> Result<T, InputError> {
        while self.pending.is_empty() {
            self.line.clear();
            if self.io.read_line(&mut self.line)? == 0 {
                return Err(InputError::UnexpectedEof { expected });
            }
            self.line_number += 1;
            self.pending = self.line.split_whitespace().rev().map(str::to_string).collect();
        }

        let Some(token) = self.pending.pop() else {
            return Err(InputError::UnexpectedEof { expected });
        };
        token.parse().map_err(|_| InputError::InvalidInteger { expected, token, line: self.line_number })
    }
}

pub fn read_problem<R: BufRead>(reader: R) -> Result<Problem, InputError> {
    let mut tokens = Tokens::new(reader);

    let num_nodes = tokens.next("number of nodes")?;
    let num_edges: usize = tokens.next("number of edges")?;
    let source = tokens.next("source")?;
    let sink = tokens.next("sink")?;

    let mut edges = Vec::with_capacity(num_edges.min(MAX_RESERVED_EDGES));
    for _ in 0..num_edges {
        let from = tokens.next("edge tail")?;
        let to = tokens.next("edge head")?;
        let capacity: i32 = tokens.next("edge capacity")?;
        let cost: i32 = tokens.next("edge cost")?;
        edges.push((from, to, i64::from(capacity), i64::from(cost)));
    }

    Ok(Problem { num_nodes, source, sink, edges })
}
