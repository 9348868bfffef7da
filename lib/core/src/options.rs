use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::{SolverError, UnknownHeuristicSnafu};

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum HeuristicKind {
    FirstUnassigned,
    RandomUnassigned,
}

impl Display for HeuristicKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            HeuristicKind::FirstUnassigned => write!(f, "first"),
            HeuristicKind::RandomUnassigned => write!(f, "random"),
        }
    }
}

impl FromStr for HeuristicKind {
    type Err = SolverError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "first" => Ok(HeuristicKind::FirstUnassigned),
            "random" => Ok(HeuristicKind::RandomUnassigned),
            _ => UnknownHeuristicSnafu { name: s }.fail(),
        }
    }
}

#[derive(Debug, Copy, Clone)]
pub struct Options {
    // Branching:
    pub heuristic: HeuristicKind,
    pub seed: u64,
    // Budget:
    /// Maximum number of decisions per `solve()` call.
    pub decision_budget: Option<usize>,
}

pub const DEFAULT_OPTIONS: Options = Options {
    // Branching:
    heuristic: HeuristicKind::FirstUnassigned,
    seed: 42,
    // Budget:
    decision_budget: None,
};

impl Default for Options {
    fn default() -> Self {
        DEFAULT_OPTIONS
    }
}
