use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::idx::VarVec;
use crate::options::HeuristicKind;
use crate::truth_value::TruthValue;
use crate::var::Var;

/// Branching variable selection.
///
/// Callers must only invoke [`choose`][Heuristic::choose] while `num_open > 0`;
/// calling it without an open variable is a bug and panics.
pub trait Heuristic {
    fn choose(&mut self, model: &VarVec<TruthValue>, num_open: usize) -> Var;
}

/// Lowest-index unassigned variable.
#[derive(Debug, Default, Copy, Clone)]
pub struct FirstUnassigned;

impl Heuristic for FirstUnassigned {
    fn choose(&mut self, model: &VarVec<TruthValue>, _num_open: usize) -> Var {
        model
            .iter_enumerated()
            .find(|(_, value)| value.is_undefined())
            .map(|(var, _)| var)
            .unwrap_or_else(|| panic!("no open variable among {}", model.len()))
    }
}

/// Uniformly random unassigned variable, drawn from an injected random source.
#[derive(Debug, Clone)]
pub struct RandomUnassigned<R = StdRng> {
    rng: R,
}

impl RandomUnassigned {
    pub fn new(seed: u64) -> Self {
        Self::from_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomUnassigned<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> Heuristic for RandomUnassigned<R> {
    fn choose(&mut self, model: &VarVec<TruthValue>, num_open: usize) -> Var {
        let mut open = Vec::with_capacity(num_open);
        open.extend(model.iter_enumerated().filter(|(_, value)| value.is_undefined()).map(|(var, _)| var));
        assert!(!open.is_empty(), "no open variable among {}", model.len());
        open[self.rng.gen_range(0..open.len())]
    }
}

/// The closed set of branching strategies used by the solver.
#[derive(Debug, Clone)]
pub enum VarSelector {
    First(FirstUnassigned),
    Random(RandomUnassigned),
}

impl VarSelector {
    pub fn new(kind: HeuristicKind, seed: u64) -> Self {
        match kind {
            HeuristicKind::FirstUnassigned => VarSelector::First(FirstUnassigned),
            HeuristicKind::RandomUnassigned => VarSelector::Random(RandomUnassigned::new(seed)),
        }
    }

    pub fn kind(&self) -> HeuristicKind {
        match self {
            VarSelector::First(_) => HeuristicKind::FirstUnassigned,
            VarSelector::Random(_) => HeuristicKind::RandomUnassigned,
        }
    }
}

impl Default for VarSelector {
    fn default() -> Self {
        VarSelector::First(FirstUnassigned)
    }
}

impl Heuristic for VarSelector {
    #[inline]
    fn choose(&mut self, model: &VarVec<TruthValue>, num_open: usize) -> Var {
        match self {
            VarSelector::First(h) => h.choose(model, num_open),
            VarSelector::Random(h) => h.choose(model, num_open),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn model(values: &[TruthValue]) -> VarVec<TruthValue> {
        VarVec::from(values.to_vec())
    }

    #[test]
    fn test_first_unassigned() {
        use TruthValue::*;
        let m = model(&[True, False, Undefined, Undefined]);
        assert_eq!(FirstUnassigned.choose(&m, 2), Var::new(2));
    }

    #[test]
    #[should_panic(expected = "no open variable")]
    fn test_first_unassigned_without_open_variable() {
        let m = model(&[TruthValue::True]);
        FirstUnassigned.choose(&m, 0);
    }

    #[test]
    fn test_random_unassigned_picks_only_open_variables() {
        use TruthValue::*;
        let m = model(&[True, Undefined, False, Undefined, Undefined]);
        let mut heuristic = RandomUnassigned::new(42);
        let picked: HashSet<Var> = (0..200).map(|_| heuristic.choose(&m, 3)).collect();
        let expected: HashSet<Var> = [1, 3, 4].into_iter().map(Var::new).collect();
        assert_eq!(picked, expected);
    }

    #[test]
    fn test_random_unassigned_is_reproducible() {
        let m = model(&[TruthValue::Undefined; 16]);
        let mut a = RandomUnassigned::new(7);
        let mut b = RandomUnassigned::new(7);
        for _ in 0..20 {
            assert_eq!(a.choose(&m, 16), b.choose(&m, 16));
        }
    }

    #[test]
    #[should_panic(expected = "no open variable")]
    fn test_random_unassigned_without_open_variable() {
        let m = model(&[TruthValue::False]);
        RandomUnassigned::new(0).choose(&m, 0);
    }

    #[test]
    fn test_selector_dispatch() {
        let m = model(&[TruthValue::True, TruthValue::Undefined]);
        let mut selector = VarSelector::new(HeuristicKind::FirstUnassigned, 0);
        assert_eq!(selector.kind(), HeuristicKind::FirstUnassigned);
        assert_eq!(selector.choose(&m, 1), Var::new(1));
        let mut selector = VarSelector::new(HeuristicKind::RandomUnassigned, 0);
        assert_eq!(selector.kind(), HeuristicKind::RandomUnassigned);
        assert_eq!(selector.choose(&m, 1), Var::new(1));
    }
}
