use std::io;
use std::path::PathBuf;

use snafu::Snafu;

use crate::lit::Lit;

pub type Result<T, E = SolverError> = std::result::Result<T, E>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum SolverError {
    #[snafu(display("Clause must contain at least one literal"))]
    EmptyClause,

    #[snafu(display("Literal {} is not a member of the clause", lit))]
    NotInClause { lit: Lit },

    #[snafu(display("Unknown heuristic '{}' (expected 'first' or 'random')", name))]
    UnknownHeuristic { name: String },

    #[snafu(display("Could not read '{}': {}", path.display(), source))]
    Io { path: PathBuf, source: io::Error },

    #[snafu(display("Could not parse DIMACS: {}", message))]
    ParseDimacs { message: String },

    #[snafu(display("DIMACS instance is not in CNF"))]
    NotCnf,
}
