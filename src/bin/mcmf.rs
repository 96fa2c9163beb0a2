use mcmf::input::{read_problem, InputError};
use std::io::{self, Write};
use std::process::ExitCode;

fn run() -> Result<(i128, i128), InputError> {
    let problem = read_problem(io::stdin().lock())?;
    let mut solver = problem.into_solver()?;
    Ok(solver.solve_potential_refined())
}

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok((flow, cost)) => {
            let mut out = io::stdout().lock();
            if writeln!(out, "{} {}", flow, cost).is_err() {
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("mcmf: {}", err);
            ExitCode::FAILURE
        }
    }
}
