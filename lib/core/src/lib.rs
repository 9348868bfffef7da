pub mod solver;

pub mod assignment;
pub mod clause;
pub mod clause_allocator;
pub mod cref;
pub mod dimacs;
pub mod error;
pub mod heuristic;
pub mod idx;
pub mod lit;
pub mod options;
pub mod propagate;
pub mod truth_value;
pub mod utils;
pub mod var;
pub mod watch;

pub use crate::clause::Clause;
pub use crate::cref::ClauseRef;
pub use crate::dimacs::{format_solution, Cnf};
pub use crate::error::{Result, SolverError};
pub use crate::heuristic::{FirstUnassigned, Heuristic, RandomUnassigned, VarSelector};
pub use crate::lit::Lit;
pub use crate::options::{HeuristicKind, Options, DEFAULT_OPTIONS};
pub use crate::solver::{SolveResult, Solver};
pub use crate::truth_value::TruthValue;
pub use crate::var::Var;
