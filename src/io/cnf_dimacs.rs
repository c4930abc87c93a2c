use super::dimacs_common;
use crate::{CNFFormula, Clause};
use anyhow::{Context, Result};
use std::io::{Read, Write};
use varisat_dimacs::{DimacsHeader, DimacsParser};

/// A structure used to read a DIMACS formatted CNF formula.
///
/// The preamble is mandatory, and must be exact in terms of number of variables and clauses.
/// Clauses are streamed out of the parser as the input is consumed.
#[derive(Default)]
pub struct CNFDimacsReader;

impl CNFDimacsReader {
    /// Parses a CNF formula.
    pub fn read<R>(&self, reader: R) -> Result<CNFFormula>
    where
        R: Read,
    {
        let context = "while parsing a CNF formula";
        let mut clauses: Vec<Clause> = Vec::new();
        let parser = DimacsParser::parse_incremental(reader, |parser| {
            let chunk = parser.take_formula();
            clauses.extend(
                chunk
                    .iter()
                    .map(|lits| lits.iter().map(|l| l.to_dimacs()).collect::<Clause>()),
            );
            Ok(())
        })
        .context(context)?;
        let preamble_data = parser.header().map(|h| (h.var_count, h.clause_count));
        dimacs_common::assert_preamble_is_present(&preamble_data).context(context)?;
        let n_vars = parser.var_count();
        Ok(CNFFormula::new_from_clauses_unchecked(n_vars, clauses))
    }
}

/// A structure that is used to write a CNF formula using the DIMACS format.
#[derive(Default)]
pub struct CNFDimacsWriter;

impl CNFDimacsWriter {
    /// Writes a CNF formula.
    pub fn write(&self, mut writer: &mut dyn Write, cnf_formula: &CNFFormula) -> Result<()> {
        let context = "while writing a CNF formula";
        let header = DimacsHeader {
            var_count: cnf_formula.n_vars(),
            clause_count: cnf_formula.n_clauses(),
        };
        varisat_dimacs::write_dimacs_header(&mut writer, header).context(context)?;
        cnf_formula
            .iter_clauses()
            .try_for_each(|cl| dimacs_common::write_clause(writer, None, cl))
            .context(context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{DNFFormula, DpllSolver, SatSolver};
    use std::io::BufWriter;

    fn write_to_string(cnf: &CNFFormula) -> String {
        let mut writer = BufWriter::new(Vec::new());
        CNFDimacsWriter.write(&mut writer, cnf).unwrap();
        String::from_utf8(writer.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn test_read_dimacs() {
        let dimacs = "c a comment\np cnf 3 2\n-1 -2 0\n1 2\n3 0\n";
        let cnf = CNFDimacsReader.read(dimacs.as_bytes()).unwrap();
        assert_eq!(3, cnf.n_vars());
        assert_eq!(
            vec![&vec![-1, -2], &vec![1, 2, 3]],
            cnf.iter_clauses().collect::<Vec<_>>()
        );
        assert_eq!("p cnf 3 2\n-1 -2 0\n1 2 3 0\n", write_to_string(&cnf));
    }

    #[test]
    fn test_read_dimacs_unused_variables() {
        let dimacs = "p cnf 4 1\n2 0\n";
        let cnf = CNFDimacsReader.read(dimacs.as_bytes()).unwrap();
        assert_eq!(4, cnf.n_vars());
        assert_eq!(2, cnf.max_var());
    }

    #[test]
    fn test_read_dimacs_no_clauses() {
        let dimacs = "p cnf 2 0\n";
        let cnf = CNFDimacsReader.read(dimacs.as_bytes()).unwrap();
        assert_eq!(2, cnf.n_vars());
        assert_eq!(0, cnf.n_clauses());
        assert!(DpllSolver.is_satisfiable(&cnf));
        assert_eq!(dimacs, write_to_string(&cnf));
    }

    #[test]
    fn test_read_dimacs_missing_preamble() {
        let dimacs = "1 2 0\n";
        assert!(CNFDimacsReader.read(dimacs.as_bytes()).is_err());
    }

    #[test]
    fn test_read_dimacs_unknown_variable() {
        let dimacs = "p cnf 1 1\n1 2 0\n";
        assert!(CNFDimacsReader.read(dimacs.as_bytes()).is_err());
    }

    #[test]
    fn test_read_dimacs_not_enough_clauses() {
        let dimacs = "p cnf 1 2\n1 0\n";
        assert!(CNFDimacsReader.read(dimacs.as_bytes()).is_err());
    }

    #[test]
    fn test_read_dimacs_not_a_lit() {
        let dimacs = "p cnf 1 1\na 2 0\n";
        assert!(CNFDimacsReader.read(dimacs.as_bytes()).is_err());
    }

    #[test]
    fn test_write_goal_consistency_cnf() {
        let goals = DNFFormula::from_clauses(vec![vec![1, -2], vec![3]]);
        assert_eq!(
            "p cnf 3 2\n1 3 0\n-2 3 0\n",
            write_to_string(&goals.to_cnf())
        );
    }

    #[test]
    fn test_write_empty_clause() {
        let cnf = DNFFormula::default().to_cnf();
        assert_eq!("p cnf 0 1\n0\n", write_to_string(&cnf));
    }
}
