use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use test_log::test;

use watchsat::core::options::{HeuristicKind, Options, DEFAULT_OPTIONS};
use watchsat::core::solver::{SolveResult, Solver};
use watchsat_test_utils::{brute_force, check_model, random_cnf};

fn run(options: Options, seeds: std::ops::Range<u64>) {
    for seed in seeds {
        let mut rng = StdRng::seed_from_u64(seed);
        let num_vars = rng.gen_range(3..=12);
        // Around the 3-SAT phase transition, so both outcomes show up.
        let num_clauses = (num_vars as f64 * 4.26).round() as usize;
        let clauses = random_cnf(&mut rng, num_vars, num_clauses, 3);

        let mut solver = Solver::with_options(num_vars, options);
        let ok = clauses.iter().all(|c| solver.add_clause(c));
        let result = if ok { solver.solve() } else { SolveResult::Unsat };

        let expected = brute_force(num_vars, &clauses);
        match result {
            SolveResult::Sat => {
                assert!(expected.is_some(), "seed {}: SAT, but there is no model", seed);
                check_model(&solver, &clauses);
            }
            SolveResult::Unsat => {
                assert!(expected.is_none(), "seed {}: UNSAT, but {:?} is a model", seed, expected);
            }
            SolveResult::Unknown => panic!("seed {}: no budget was set", seed),
        }
    }
}

#[test]
fn first_unassigned_agrees_with_brute_force() {
    run(DEFAULT_OPTIONS, 0..200);
}

#[test]
fn random_unassigned_agrees_with_brute_force() {
    for seed in 0..4 {
        let options = Options {
            heuristic: HeuristicKind::RandomUnassigned,
            seed,
            ..DEFAULT_OPTIONS
        };
        run(options, (seed * 50)..(seed * 50 + 50));
    }
}

#[test]
fn budget_never_gives_a_wrong_answer() {
    let options = Options {
        decision_budget: Some(3),
        ..DEFAULT_OPTIONS
    };
    for seed in 0..100 {
        let mut rng = StdRng::seed_from_u64(seed);
        let num_vars = 10;
        let clauses = random_cnf(&mut rng, num_vars, 43, 3);

        let mut solver = Solver::with_options(num_vars, options);
        if !clauses.iter().all(|c| solver.add_clause(c)) {
            continue;
        }
        let expected = brute_force(num_vars, &clauses);
        match solver.solve() {
            SolveResult::Sat => check_model(&solver, &clauses),
            SolveResult::Unsat => assert!(expected.is_none(), "seed {}", seed),
            SolveResult::Unknown => assert!(solver.num_decisions() >= 3),
        }
    }
}
