use super::{clap_subcommand_for, create_input_file_reader, create_solver, Command};
use anyhow::{Context, Result};
use clap::{App, ArgMatches};
use crusti_announce::{CNFDimacsReader, CNFFormula, SatSolver};
use log::info;
use std::io::{self, Write};

const CMD_NAME: &str = "sat";

#[derive(Default)]
pub(crate) struct SatCommand;

impl Command for SatCommand {
    fn name(&self) -> &str {
        CMD_NAME
    }

    fn clap_subcommand(&self) -> App<'static, 'static> {
        clap_subcommand_for(
            CMD_NAME,
            "Check the satisfiability of a CNF formula",
            "the input file that contains the DIMACS formula",
        )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let file_reader = create_input_file_reader(arg_matches)?;
        let cnf = CNFDimacsReader.read(file_reader)?;
        info!(
            "read a formula with {} variables and {} clauses",
            cnf.n_vars(),
            cnf.n_clauses()
        );
        let solver = create_solver(arg_matches);
        writeln!(io::stdout(), "{}", status_line(solver.as_ref(), &cnf))
            .context("while writing the solver status")?;
        Ok(())
    }
}

fn status_line(solver: &dyn SatSolver, cnf: &CNFFormula) -> &'static str {
    if solver.is_satisfiable(cnf) {
        "s SATISFIABLE"
    } else {
        "s UNSATISFIABLE"
    }
}
