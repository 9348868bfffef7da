use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::AppSettings;
use clap::Parser;
use elapsed::measure_time;
use log::info;
use num_format::{Locale, ToFormattedString};
use serde::Serialize;
use serde_with::serde_as;
use serde_with::DurationSecondsWithFrac;

use watchsat_core::dimacs::{format_solution, Cnf};
use watchsat_core::options::{HeuristicKind, Options, DEFAULT_OPTIONS};
use watchsat_core::solver::{SolveResult, Solver};

const HEADING_SEARCH: &str = "SEARCH OPTIONS";

#[derive(Parser, Debug)]
#[clap(author, version)]
#[clap(global_setting(AppSettings::DeriveDisplayOrder))]
struct Cli {
    /// Path to input CNF (may be gzipped).
    #[clap(value_name = "PATH")]
    input: PathBuf,

    /// Path to output JSON report.
    #[clap(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Branching heuristic: 'first' or 'random'.
    #[clap(help_heading = HEADING_SEARCH)]
    #[clap(long, value_name = "NAME")]
    #[clap(default_value_t = DEFAULT_OPTIONS.heuristic)]
    heuristic: HeuristicKind,

    /// Seed for the random heuristic.
    #[clap(help_heading = HEADING_SEARCH)]
    #[clap(long, value_name = "INT")]
    #[clap(default_value_t = DEFAULT_OPTIONS.seed)]
    seed: u64,

    /// Maximum number of decisions before giving up.
    #[clap(help_heading = HEADING_SEARCH)]
    #[clap(long, value_name = "NUM")]
    budget: Option<usize>,
}

#[serde_as]
#[derive(Debug, Serialize)]
struct Report {
    name: String,
    result: String,
    heuristic: String,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    time_total: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    time_parse: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    time_search: Duration,
    #[serde_as(as = "DurationSecondsWithFrac<f64>")]
    time_propagate: Duration,
    num_vars: usize,
    num_clauses: usize,
    num_decisions: usize,
    num_propagations: usize,
    num_conflicts: usize,
    num_backtracks: usize,
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Help and version go to stdout and are not failures.
            let code = if e.use_stderr() { 1 } else { 0 };
            e.print()?;
            std::process::exit(code);
        }
    };
    info!("cli = {:?}", cli);

    let time_start = Instant::now();
    let (elapsed, cnf) = measure_time(|| Cnf::from_file(&cli.input));
    let cnf = cnf?;
    info!("Parsed {} clauses over {} variables in {}", cnf.clauses.len(), cnf.num_vars, elapsed);
    let time_parse = elapsed.duration();

    let options = Options {
        heuristic: cli.heuristic,
        seed: cli.seed,
        decision_budget: cli.budget,
    };
    let mut solver = Solver::with_options(cnf.num_vars, options);

    // Adding the clauses may already refute the formula:
    let added = cnf.clauses.iter().all(|lits| solver.add_clause(lits));
    let result = if added {
        solver.solve()
    } else {
        info!("Conflict while adding clauses");
        SolveResult::Unsat
    };
    let time_total = time_start.elapsed();

    match result {
        SolveResult::Sat => print!("{}", format_solution(&solver.model())),
        SolveResult::Unsat | SolveResult::Unknown => println!("{}", result),
    }

    let report = Report {
        name: cli.input.display().to_string(),
        result: result.to_string(),
        heuristic: options.heuristic.to_string(),
        time_total,
        time_parse,
        time_search: solver.time_search,
        time_propagate: solver.time_propagate,
        num_vars: solver.num_vars(),
        num_clauses: solver.num_clauses(),
        num_decisions: solver.num_decisions(),
        num_propagations: solver.num_propagations(),
        num_conflicts: solver.num_conflicts(),
        num_backtracks: solver.num_backtracks(),
    };

    // Dump the report:
    if let Some(output) = &cli.output {
        info!("Writing report to '{}'...", output.display());
        serde_json::to_writer_pretty(File::create(output)?, &report)?;
    }

    // Log the statistics and timings:
    let format = &Locale::en;
    info!("vars:         {}", report.num_vars.to_formatted_string(format));
    info!("clauses:      {}", report.num_clauses.to_formatted_string(format));
    info!("decisions:    {}", report.num_decisions.to_formatted_string(format));
    info!("propagations: {}", report.num_propagations.to_formatted_string(format));
    info!("conflicts:    {}", report.num_conflicts.to_formatted_string(format));
    info!("backtracks:   {}", report.num_backtracks.to_formatted_string(format));
    info!("time total:      {:?}", time_total);
    info!(
        "time parse:      {:?} ({:.2}%)",
        time_parse,
        100.0 * time_parse.as_secs_f64() / time_total.as_secs_f64(),
    );
    info!(
        "time search:     {:?} ({:.2}%)",
        solver.time_search,
        100.0 * solver.time_search.as_secs_f64() / time_total.as_secs_f64(),
    );
    info!(
        "time propagate:  {:?} ({:.2}%)",
        solver.time_propagate,
        100.0 * solver.time_propagate.as_secs_f64() / time_total.as_secs_f64(),
    );

    Ok(())
}
