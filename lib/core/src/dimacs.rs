use std::io::Read;
use std::path::Path;

use itertools::Itertools;
use snafu::ResultExt;
use tracing::debug;

use crate::error::{IoSnafu, NotCnfSnafu, ParseDimacsSnafu, Result};
use crate::lit::Lit;
use crate::utils::read_maybe_gzip;
use crate::var::Var;

/// A CNF formula as read from a DIMACS file.
#[derive(Debug, Clone, Default)]
pub struct Cnf {
    pub num_vars: usize,
    pub clauses: Vec<Vec<Lit>>,
}

impl Cnf {
    /// Parses DIMACS CNF text. Literal `v` maps to `pos(Var(v-1))`, `-v` to `neg(Var(v-1))`.
    pub fn parse(input: &str) -> Result<Self> {
        let instance = dimacs::parse_dimacs(input).map_err(|e| {
            ParseDimacsSnafu {
                message: format!("{:?}", e),
            }
            .build()
        })?;
        match instance {
            dimacs::Instance::Cnf { num_vars, clauses } => {
                let clauses = clauses
                    .iter()
                    .map(|c| {
                        c.lits()
                            .iter()
                            .map(|x| {
                                let var = Var::new((x.var().to_u64() - 1) as u32);
                                match x.sign() {
                                    dimacs::Sign::Pos => Lit::pos(var),
                                    dimacs::Sign::Neg => Lit::neg(var),
                                }
                            })
                            .collect_vec()
                    })
                    .collect_vec();
                // Tolerate literals beyond the declared header.
                let max_var = clauses.iter().flatten().map(|lit| lit.var().index() + 1).max().unwrap_or(0);
                Ok(Cnf {
                    num_vars: (num_vars as usize).max(max_var),
                    clauses,
                })
            }
            _ => NotCnfSnafu.fail(),
        }
    }

    /// Reads a (possibly `.gz`-compressed) DIMACS CNF file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut input = String::new();
        read_maybe_gzip(path)
            .and_then(|mut reader| reader.read_to_string(&mut input))
            .context(IoSnafu { path })?;
        let cnf = Self::parse(&input)?;
        debug!(
            "Read {} clauses over {} variables from '{}'",
            cnf.clauses.len(),
            cnf.num_vars,
            path.display()
        );
        Ok(cnf)
    }
}

/// Renders a total model as the DIMACS solution line: `v <lit>... 0`.
pub fn format_solution(model: &[Lit]) -> String {
    let lits = model.iter().map(|lit| lit.to_external().to_string());
    let line = std::iter::once("v".to_string()).chain(lits).chain(std::iter::once("0".to_string())).join(" ");
    format!("{}\n", line)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use flate2::write::GzEncoder;
    use flate2::Compression;
    use test_log::test;

    use super::*;
    use crate::error::SolverError;

    const EXAMPLE: &str = "c example\np cnf 3 2\n1 -3 0\n2 3 -1 0\n";

    #[test]
    fn test_parse_cnf() {
        let cnf = Cnf::parse(EXAMPLE).unwrap();
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(
            cnf.clauses,
            vec![
                vec![Lit::pos(Var::new(0)), Lit::neg(Var::new(2))],
                vec![Lit::pos(Var::new(1)), Lit::pos(Var::new(2)), Lit::neg(Var::new(0))],
            ]
        );
    }

    #[test]
    fn test_parse_garbage() {
        assert!(matches!(Cnf::parse("p cnf x y\n1 0\n"), Err(SolverError::ParseDimacs { .. })));
    }

    #[test]
    fn test_missing_file() {
        let res = Cnf::from_file("definitely/not/here.cnf");
        assert!(matches!(res, Err(SolverError::Io { .. })));
    }

    #[test]
    fn test_read_gzip_file() -> color_eyre::Result<()> {
        let dir = std::env::temp_dir().join(format!("watchsat-dimacs-{}", std::process::id()));
        std::fs::create_dir_all(&dir)?;
        let path = dir.join("example.cnf.gz");
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(EXAMPLE.as_bytes())?;
        std::fs::write(&path, encoder.finish()?)?;

        let cnf = Cnf::from_file(&path)?;
        assert_eq!(cnf.num_vars, 3);
        assert_eq!(cnf.clauses.len(), 2);

        std::fs::remove_dir_all(&dir)?;
        Ok(())
    }

    #[test]
    fn test_format_solution() {
        let model = vec![Lit::pos(Var::new(0)), Lit::neg(Var::new(1)), Lit::pos(Var::new(2))];
        assert_eq!(format_solution(&model), "v 1 -2 3 0\n");
        assert_eq!(format_solution(&[]), "v 0\n");
    }
}
