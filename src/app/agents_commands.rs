use super::{
    clap_subcommand_for, create_input_file_reader, create_solver, Command, ARG_OUTPUT,
};
use anyhow::{anyhow, Context, Result};
use clap::{App, Arg, ArgMatches};
use crusti_announce::{
    goals_consistency_cnf, goals_consistent, Agent, AgentsDimacsReader, AnnouncementProblem,
    AnnouncementSynthesizer, CNFDimacsWriter, CNFFormula, LoggingObserver, SatSolver,
    MAX_SEARCH_VARS,
};
use log::info;
use std::{
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::PathBuf,
};

const CMD_NAME_ANNOUNCEMENT: &str = "announcement";
const CMD_NAME_GOAL_CONSISTENCY: &str = "goal-consistency";

#[derive(Default)]
pub(crate) struct AnnouncementCommand;

impl Command for AnnouncementCommand {
    fn name(&self) -> &str {
        CMD_NAME_ANNOUNCEMENT
    }

    fn clap_subcommand(&self) -> App<'static, 'static> {
        clap_subcommand_for(
            CMD_NAME_ANNOUNCEMENT,
            "Look for an announcement leading the agents to their goals",
            "the input file that contains the agents",
        )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let problem = read_problem(arg_matches)?;
        let solver = create_solver(arg_matches);
        check_search_bound(&problem, solver.as_ref())?;
        let mut observer = LoggingObserver::default();
        let outcome = AnnouncementSynthesizer::new(problem.agents())
            .with_solver(solver)
            .with_observer(&mut observer)
            .synthesize();
        writeln!(io::stdout(), "{}", outcome).context("while writing the outcome")?;
        Ok(())
    }
}

#[derive(Default)]
pub(crate) struct GoalConsistencyCommand;

impl Command for GoalConsistencyCommand {
    fn name(&self) -> &str {
        CMD_NAME_GOAL_CONSISTENCY
    }

    fn clap_subcommand(&self) -> App<'static, 'static> {
        clap_subcommand_for(
            CMD_NAME_GOAL_CONSISTENCY,
            "Check whether the goals of the agents are consistent",
            "the input file that contains the agents",
        )
        .arg(
            Arg::with_name(ARG_OUTPUT)
                .short("o")
                .long("output")
                .empty_values(false)
                .multiple(false)
                .help("writes the CNF formula given to the SAT solver to a file"),
        )
    }

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()> {
        let problem = read_problem(arg_matches)?;
        let solver = create_solver(arg_matches);
        let goals = problem.agents().iter().map(Agent::goal).collect::<Vec<_>>();
        let cnf = goals_consistency_cnf(&goals).unwrap_or_else(|| unsat_cnf(problem.n_vars()));
        info!(
            "the consistency check involves {} clauses",
            cnf.n_clauses()
        );
        if let Some(path) = arg_matches.value_of(ARG_OUTPUT) {
            write_cnf(path, &cnf)?;
        }
        let verdict = if solver.is_satisfiable(&cnf) {
            "goals are consistent"
        } else {
            "goals are inconsistent"
        };
        writeln!(io::stdout(), "{}", verdict).context("while writing the verdict")?;
        Ok(())
    }
}

fn read_problem(arg_matches: &ArgMatches<'_>) -> Result<AnnouncementProblem> {
    let file_reader = create_input_file_reader(arg_matches)?;
    let problem = AgentsDimacsReader.read(file_reader)?;
    if problem.agents().is_empty() {
        return Err(anyhow!("the input file does not define any agent"));
    }
    info!(
        "read {} agents over {} variables",
        problem.agents().len(),
        problem.n_vars()
    );
    Ok(problem)
}

fn check_search_bound(problem: &AnnouncementProblem, solver: &dyn SatSolver) -> Result<()> {
    let max_var = problem
        .agents()
        .iter()
        .map(Agent::max_var)
        .max()
        .unwrap_or(0);
    if max_var <= MAX_SEARCH_VARS {
        return Ok(());
    }
    let goals = problem.agents().iter().map(Agent::goal).collect::<Vec<_>>();
    if goals_consistent(&goals, solver) {
        Ok(())
    } else {
        Err(anyhow!(
            "goals are inconsistent and the agents involve variable {}, while the search is limited to {} variables",
            max_var,
            MAX_SEARCH_VARS
        ))
    }
}

fn unsat_cnf(n_vars: usize) -> CNFFormula {
    let mut cnf = CNFFormula::default();
    cnf.add_vars(n_vars);
    cnf.add_clause(vec![]);
    cnf
}

fn write_cnf(path: &str, cnf: &CNFFormula) -> Result<()> {
    let file = File::create(path).context("while creating the output file")?;
    let str_path = fs::canonicalize(PathBuf::from(path))
        .with_context(|| format!(r#"while opening file "{}""#, path))?;
    info!("writing the goal consistency CNF to {:?}", str_path);
    let mut writer = BufWriter::new(file);
    CNFDimacsWriter.write(&mut writer, cnf)?;
    writer.flush().context("while writing the output file")
}
