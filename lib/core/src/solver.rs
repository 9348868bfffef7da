use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::time::{Duration, Instant};

use itertools::Itertools;
use tap::Tap;
use tracing::{debug, info};

use crate::assignment::{Assignment, Checkpoint};
use crate::clause::{Clause, Rank};
use crate::clause_allocator::ClauseAllocator;
use crate::cref::ClauseRef;
use crate::dimacs::Cnf;
use crate::error::Result;
use crate::heuristic::{Heuristic, VarSelector};
use crate::lit::Lit;
use crate::options::Options;
use crate::propagate::propagate;
use crate::truth_value::TruthValue;
use crate::var::Var;
use crate::watch::WatchList;

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SolveResult {
    Sat,
    Unsat,
    /// The decision budget ran out before a verdict was reached.
    Unknown,
}

impl Display for SolveResult {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SolveResult::Sat => write!(f, "SAT"),
            SolveResult::Unsat => write!(f, "UNSAT"),
            SolveResult::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// DPLL solver with two-watched-literal unit propagation and chronological backtracking.
#[derive(Debug)]
pub struct Solver {
    options: Options,
    ca: ClauseAllocator,
    clauses: Vec<ClauseRef>,
    watchlist: WatchList,
    assignment: Assignment,
    selector: VarSelector,
    ok: bool,
    // Statistics
    decisions: usize,
    propagations: usize,
    conflicts: usize,
    backtracks: usize,
    // Timings
    pub time_search: Duration,
    pub time_propagate: Duration,
}

impl Solver {
    pub fn new(num_vars: usize) -> Self {
        Self::with_options(num_vars, Options::default())
    }

    pub fn with_options(num_vars: usize, options: Options) -> Self {
        let mut solver = Self {
            options,
            ca: ClauseAllocator::new(),
            clauses: vec![],
            watchlist: WatchList::new(),
            assignment: Assignment::new(),
            selector: VarSelector::new(options.heuristic, options.seed),
            ok: true,
            decisions: 0,
            propagations: 0,
            conflicts: 0,
            backtracks: 0,
            time_search: Duration::new(0, 0),
            time_propagate: Duration::new(0, 0),
        };
        for _ in 0..num_vars {
            solver.new_var();
        }
        solver
    }

    /// Builds a solver from a CNF. Check [`is_ok`][Self::is_ok] for an immediate conflict.
    pub fn from_cnf(cnf: &Cnf, options: Options) -> Self {
        let mut solver = Self::with_options(cnf.num_vars, options);
        for lits in cnf.clauses.iter() {
            if !solver.add_clause(lits) {
                break;
            }
        }
        solver
    }

    pub fn from_file<P: AsRef<Path>>(path: P, options: Options) -> Result<Self> {
        let cnf = Cnf::from_file(path)?;
        Ok(Self::from_cnf(&cnf, options))
    }

    pub fn set_selector(&mut self, selector: VarSelector) {
        self.selector = selector;
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
    /// False once the clause set is known to be unsatisfiable.
    pub fn is_ok(&self) -> bool {
        self.ok
    }
    pub fn num_vars(&self) -> usize {
        self.assignment.num_vars()
    }
    pub fn num_clauses(&self) -> usize {
        self.clauses.len()
    }
    pub fn num_assigned(&self) -> usize {
        self.assignment.num_assigned()
    }
    pub fn num_decisions(&self) -> usize {
        self.decisions
    }
    pub fn num_propagations(&self) -> usize {
        self.propagations
    }
    pub fn num_conflicts(&self) -> usize {
        self.conflicts
    }
    pub fn num_backtracks(&self) -> usize {
        self.backtracks
    }
    pub fn decision_level(&self) -> usize {
        self.assignment.decision_level()
    }

    pub fn new_var(&mut self) -> Var {
        let var = self.assignment.new_var();
        self.watchlist.init(var);
        var
    }

    pub fn clauses(&self) -> impl Iterator<Item = (ClauseRef, &Clause)> {
        self.clauses.iter().map(|&cref| (cref, &self.ca[cref]))
    }
    pub fn clause(&self, cref: ClauseRef) -> &Clause {
        &self.ca[cref]
    }
    pub fn watchers(&self, lit: Lit) -> &[ClauseRef] {
        self.watchlist.lookup(lit)
    }

    pub fn val(&self, var: Var) -> TruthValue {
        self.assignment.value_var(var)
    }
    pub fn value(&self, lit: Lit) -> TruthValue {
        self.assignment.value(lit)
    }
    pub fn satisfied(&self, lit: Lit) -> bool {
        self.assignment.satisfied(lit)
    }
    pub fn falsified(&self, lit: Lit) -> bool {
        self.assignment.falsified(lit)
    }

    /// One literal per variable, positive iff the variable is true.
    pub fn model(&self) -> Vec<Lit> {
        self.assignment
            .values()
            .iter_enumerated()
            .map(|(var, &value)| Lit::new(var, value != TruthValue::True))
            .collect()
    }

    /// Assigns `lit` and enqueues it for propagation. Returns false if `lit` is already falsified.
    pub fn assign(&mut self, lit: Lit) -> bool {
        self.assignment.assign(lit)
    }

    /// Propagates all queued literals. Returns false on conflict.
    pub fn unit_propagate(&mut self) -> bool {
        self.propagate().is_none()
    }

    fn propagate(&mut self) -> Option<ClauseRef> {
        let time_propagate_start = Instant::now();
        let propagated = self.assignment.num_propagated();
        propagate(&mut self.watchlist, &mut self.ca, &mut self.assignment).tap(|_| {
            self.time_propagate += time_propagate_start.elapsed();
            self.propagations += self.assignment.num_propagated() - propagated;
        })
    }

    /// Adds a clause at the root level.
    ///
    /// Returns false (and marks the solver as unsatisfiable) if the clause is empty or
    /// conflicts with the facts already established at the root.
    /// Any decisions left over from a previous [`solve`][Self::solve] are undone first.
    pub fn add_clause(&mut self, lits: &[Lit]) -> bool {
        // If the solver is already in UNSAT state, we do not need to add new clause.
        if !self.ok {
            return false;
        }

        self.assignment.backtrack(0);

        let mut clause = match Clause::new(lits.to_vec()) {
            Ok(clause) => clause,
            Err(e) => {
                debug!("{}", e);
                self.ok = false;
                return false;
            }
        };

        // Auto-create missing variables.
        let max_var = lits.iter().map(|lit| lit.var().index() + 1).max().unwrap_or(0);
        while self.num_vars() < max_var {
            self.new_var();
        }

        // Watch non-falsified literals, since some may already be fixed at the root:
        let free = clause
            .iter()
            .positions(|&lit| !self.assignment.falsified(lit))
            .take(2)
            .collect_vec();
        let implied = match free.as_slice() {
            _ if clause.is_unit() => Some(clause[0]),
            &[] => {
                debug!("{} is falsified at the root", clause);
                self.ok = false;
                None
            }
            &[p] => {
                let q = if p == 0 { 1 } else { 0 };
                clause.set_watch_at(Rank::First, p);
                clause.set_watch_at(Rank::Second, q);
                Some(clause[p])
            }
            &[p, q, ..] => {
                clause.set_watch_at(Rank::First, p);
                clause.set_watch_at(Rank::Second, q);
                None
            }
        };

        let first = clause.watched(Rank::First);
        let second = clause.watched(Rank::Second);
        let is_unit = clause.is_unit();
        let cref = self.ca.alloc(clause);
        self.clauses.push(cref);
        self.watchlist.insert(first, cref);
        if !is_unit {
            self.watchlist.insert(second, cref);
        }

        if let Some(lit) = implied {
            if !self.assignment.assign(lit) || !self.unit_propagate() {
                debug!("conflict after asserting {} from {}", lit, cref);
                self.ok = false;
            }
        }
        self.ok
    }

    pub fn solve(&mut self) -> SolveResult {
        info!(
            "Solver::solve() with {} vars and {} clauses using '{}' heuristic",
            self.num_vars(),
            self.num_clauses(),
            self.selector.kind()
        );

        // If the solver is already in UNSAT state, return early.
        if !self.ok {
            info!("UNSAT");
            return SolveResult::Unsat;
        }

        let time_search_start = Instant::now();
        let result = self.search();
        self.time_search += time_search_start.elapsed();

        if result == SolveResult::Unsat {
            self.ok = false;
        }
        info!(
            "{} after {} decisions, {} conflicts, {} propagations",
            result,
            self.num_decisions(),
            self.num_conflicts(),
            self.num_propagations()
        );
        result
    }

    /// The DPLL loop: propagate, then either backtrack-and-flip on conflict or decide.
    fn search(&mut self) -> SolveResult {
        // Start from the root: re-assert unit clauses (facts derived earlier are kept).
        self.assignment.backtrack(0);
        for &cref in self.clauses.iter() {
            let clause = &self.ca[cref];
            if clause.is_unit() && !self.assignment.assign(clause[0]) {
                return SolveResult::Unsat;
            }
        }

        let mut current_decisions = 0;
        loop {
            if let Some(conflict) = self.propagate() {
                // Conflict
                self.conflicts += 1;
                debug!("conflict in {} at level {}", conflict, self.decision_level());
                if !self.backtrack_and_flip() {
                    // conflict with an empty trail => UNSAT
                    return SolveResult::Unsat;
                }
                continue;
            }

            // NO conflict
            let num_open = self.assignment.num_open();
            if num_open == 0 {
                return SolveResult::Sat;
            }

            if let Some(budget) = self.options.decision_budget {
                if current_decisions >= budget {
                    info!("Decision budget of {} exhausted", budget);
                    self.assignment.backtrack(0);
                    return SolveResult::Unknown;
                }
            }

            // Make a decision:
            let var = self.selector.choose(self.assignment.values(), num_open);
            let decision = Lit::pos(var);
            current_decisions += 1;
            self.decisions += 1;
            self.assignment.new_decision_level(decision);
            if !self.assignment.assign(decision) {
                unreachable!("heuristic picked assigned variable {}", var);
            }
            debug!("decision {} at level {}", decision, self.decision_level());
        }
    }

    /// Pops decision levels until the negation of a popped decision can be asserted
    /// at the parent level. Returns false once the trail is exhausted.
    fn backtrack_and_flip(&mut self) -> bool {
        while let Some(Checkpoint { decision, .. }) = self.assignment.pop_decision_level() {
            self.backtracks += 1;
            debug!("backtrack to level {}, flipping {}", self.decision_level(), decision);
            if self.assignment.assign(!decision) {
                return true;
            }
        }
        false
    }

    /// Simplified clause set equivalent to the clauses under the current (partial) model:
    /// one unit clause per assigned variable, then every clause that is not yet satisfied
    /// with its falsified literals removed, without duplicates.
    pub fn rebase(&self) -> Vec<Clause> {
        let mut rebased = Vec::new();
        let mut seen: HashSet<Vec<Lit>> = HashSet::new();

        let units = self
            .assignment
            .values()
            .iter_enumerated()
            .filter_map(|(var, value)| value.to_bool().map(|b| Lit::new(var, !b)));
        let reduced = self
            .clauses()
            .filter(|(_, clause)| !clause.iter().any(|&lit| self.satisfied(lit)))
            .map(|(_, clause)| clause.iter().copied().filter(|&lit| !self.falsified(lit)).collect_vec());

        for lits in units.map(|lit| vec![lit]).chain(reduced) {
            match Clause::new(lits) {
                Ok(clause) => {
                    if seen.insert(clause.sorted_lits()) {
                        rebased.push(clause);
                    }
                }
                Err(_) => debug!("skipping clause falsified under the current model"),
            }
        }

        rebased
    }
}
