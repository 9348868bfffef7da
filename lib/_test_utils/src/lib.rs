use itertools::Itertools;
use rand::seq::index::sample;
use rand::Rng;

use watchsat::core::lit::Lit;
use watchsat::core::solver::Solver;
use watchsat::core::var::Var;

pub fn lits(external: &[i32]) -> Vec<Lit> {
    external.iter().map(|&lit| Lit::from_external(lit)).collect()
}

/// Random k-CNF: every clause has `k` literals over distinct variables with random signs.
pub fn random_cnf<R: Rng>(rng: &mut R, num_vars: usize, num_clauses: usize, k: usize) -> Vec<Vec<Lit>> {
    assert!(k <= num_vars, "cannot draw {} distinct variables out of {}", k, num_vars);
    (0..num_clauses)
        .map(|_| {
            sample(rng, num_vars, k)
                .into_iter()
                .map(|v| Lit::new(Var::from(v), rng.gen_bool(0.5)))
                .collect_vec()
        })
        .collect_vec()
}

/// Pigeonhole principle: `pigeons` pigeons into `holes` holes.
/// Unsatisfiable iff `pigeons > holes`.
pub fn pigeonhole(pigeons: usize, holes: usize) -> (usize, Vec<Vec<Lit>>) {
    let p = |i: usize, j: usize| Var::from(i * holes + j);
    let mut clauses = Vec::new();
    for i in 0..pigeons {
        clauses.push((0..holes).map(|j| Lit::pos(p(i, j))).collect_vec());
    }
    for j in 0..holes {
        for (a, b) in (0..pigeons).tuple_combinations() {
            clauses.push(vec![Lit::neg(p(a, j)), Lit::neg(p(b, j))]);
        }
    }
    (pigeons * holes, clauses)
}

/// Whether the total assignment `values` (indexed by variable) satisfies `clause`.
pub fn satisfies_clause(values: &[bool], clause: &[Lit]) -> bool {
    clause.iter().any(|lit| values[lit.var().index()] != lit.negated())
}

pub fn is_model(values: &[bool], clauses: &[Vec<Lit>]) -> bool {
    clauses.iter().all(|clause| satisfies_clause(values, clause))
}

/// Exhaustive satisfiability check, only meant for small formulas.
pub fn brute_force(num_vars: usize, clauses: &[Vec<Lit>]) -> Option<Vec<bool>> {
    assert!(num_vars <= 20, "brute force over {} variables is too slow", num_vars);
    (0..1u32 << num_vars)
        .map(|bits| (0..num_vars).map(|v| bits >> v & 1 == 1).collect_vec())
        .find(|values| is_model(values, clauses))
}

/// Total assignment extracted from the solver, unassigned variables read as false.
pub fn solver_values(solver: &Solver) -> Vec<bool> {
    solver.model().iter().map(|lit| !lit.negated()).collect()
}

pub fn check_model(solver: &Solver, clauses: &[Vec<Lit>]) {
    let values = solver_values(solver);
    for clause in clauses {
        assert!(
            satisfies_clause(&values, clause),
            "clause {:?} is violated by {:?}",
            clause.iter().map(|lit| lit.to_external()).collect_vec(),
            values
        );
    }
}

pub fn new_solver(num_vars: usize, clauses: &[Vec<Lit>]) -> (Solver, bool) {
    let mut solver = Solver::new(num_vars);
    let ok = clauses.iter().all(|lits| solver.add_clause(lits));
    (solver, ok)
}
