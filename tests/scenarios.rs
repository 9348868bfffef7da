use test_log::test;

use watchsat::core::dimacs::{format_solution, Cnf};
use watchsat::core::options::{HeuristicKind, Options, DEFAULT_OPTIONS};
use watchsat::core::solver::{SolveResult, Solver};
use watchsat::core::truth_value::TruthValue;
use watchsat::core::var::Var;
use watchsat_test_utils::{check_model, lits, new_solver, pigeonhole};

fn solver_from_dimacs(input: &str) -> Solver {
    let cnf = Cnf::parse(input).unwrap();
    Solver::from_cnf(&cnf, DEFAULT_OPTIONS)
}

#[test]
fn contradicting_units_are_refuted_on_add() {
    let solver = solver_from_dimacs("p cnf 1 2\n1 0\n-1 0\n");
    assert!(!solver.is_ok());
}

#[test]
fn unit_refutes_by_propagation() {
    let mut solver = solver_from_dimacs("p cnf 2 3\n1 2 0\n-1 2 0\n-2 0\n");
    assert!(!solver.is_ok());
    assert_eq!(solver.solve(), SolveResult::Unsat);
}

#[test]
fn single_positive_unit() {
    let mut solver = solver_from_dimacs("p cnf 1 1\n1 0\n");
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.val(Var::new(0)), TruthValue::True);
    assert_eq!(format_solution(&solver.model()), "v 1 0\n");
}

#[test]
fn empty_formula_is_sat() {
    let mut solver = Solver::new(0);
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(format_solution(&solver.model()), "v 0\n");
}

#[test]
fn chain_is_decided_by_units() {
    let mut solver = solver_from_dimacs("p cnf 3 3\n1 0\n-1 2 0\n-2 -3 0\n");
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.num_decisions(), 0);
    assert_eq!(format_solution(&solver.model()), "v 1 2 -3 0\n");
}

#[test]
fn pigeonhole_unsat() {
    for holes in 1..=4 {
        let (num_vars, clauses) = pigeonhole(holes + 1, holes);
        // Small instances are already refuted while adding clauses.
        let (mut solver, _) = new_solver(num_vars, &clauses);
        assert_eq!(solver.solve(), SolveResult::Unsat, "php({}, {})", holes + 1, holes);
        assert!(!solver.is_ok());
    }
}

#[test]
fn pigeonhole_sat() {
    for holes in 1..=4 {
        let (num_vars, clauses) = pigeonhole(holes, holes);
        let (mut solver, ok) = new_solver(num_vars, &clauses);
        assert!(ok);
        assert_eq!(solver.solve(), SolveResult::Sat, "php({}, {})", holes, holes);
        check_model(&solver, &clauses);
    }
}

#[test]
fn random_heuristic_on_pigeonhole() {
    let options = Options {
        heuristic: HeuristicKind::RandomUnassigned,
        seed: 2022,
        ..DEFAULT_OPTIONS
    };
    for (pigeons, holes, expected) in [(3, 3, SolveResult::Sat), (4, 3, SolveResult::Unsat)] {
        let (num_vars, clauses) = pigeonhole(pigeons, holes);
        let mut solver = Solver::with_options(num_vars, options);
        for c in clauses.iter() {
            assert!(solver.add_clause(c));
        }
        assert_eq!(solver.solve(), expected);
        if expected == SolveResult::Sat {
            check_model(&solver, &clauses);
        }
    }
}

#[test]
fn budget_exhaustion_then_resume() {
    let (num_vars, clauses) = pigeonhole(4, 4);
    let options = Options {
        decision_budget: Some(1),
        ..DEFAULT_OPTIONS
    };
    let mut solver = Solver::with_options(num_vars, options);
    for c in clauses.iter() {
        assert!(solver.add_clause(c));
    }
    assert_eq!(solver.solve(), SolveResult::Unknown);
    assert_eq!(solver.decision_level(), 0);
    assert!(solver.is_ok());
}

#[test]
fn incremental_solving() {
    let mut solver = Solver::new(3);
    assert!(solver.add_clause(&lits(&[1, 2, 3])));
    assert_eq!(solver.solve(), SolveResult::Sat);

    assert!(solver.add_clause(&lits(&[-1])));
    assert!(solver.add_clause(&lits(&[-2])));
    assert_eq!(solver.solve(), SolveResult::Sat);
    assert_eq!(solver.model(), lits(&[-1, -2, 3]));

    assert!(!solver.add_clause(&lits(&[-3])));
    assert_eq!(solver.solve(), SolveResult::Unsat);
}
