use anyhow::{Context, Result};
use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};
use crusti_announce::{DpllSolver, SatSolver, TruthTableSolver};
use log::{error, info, LevelFilter};
use std::{
    fs::{self, File},
    io::BufReader,
    path::PathBuf,
    str::FromStr,
};

mod agents_commands;
pub(crate) use agents_commands::AnnouncementCommand;
pub(crate) use agents_commands::GoalConsistencyCommand;

mod sat_command;
pub(crate) use sat_command::SatCommand;

pub(crate) const ARG_INPUT: &str = "ARG_INPUT";
pub(crate) const ARG_OUTPUT: &str = "ARG_OUTPUT";
pub(crate) const ARG_SOLVER: &str = "ARG_SOLVER";
const ARG_LOGGING_LEVEL: &str = "ARG_LOGGING_LEVEL";

/// A subcommand of the application.
pub(crate) trait Command {
    fn name(&self) -> &str;

    fn clap_subcommand(&self) -> App<'static, 'static>;

    fn execute(&self, arg_matches: &ArgMatches<'_>) -> Result<()>;
}

pub(crate) struct AppHelper {
    app_name: &'static str,
    app_version: &'static str,
    authors: &'static str,
    about: &'static str,
    commands: Vec<Box<dyn Command>>,
}

impl AppHelper {
    pub(crate) fn new(
        app_name: &'static str,
        app_version: &'static str,
        authors: &'static str,
        about: &'static str,
    ) -> Self {
        Self {
            app_name,
            app_version,
            authors,
            about,
            commands: Vec::new(),
        }
    }

    pub(crate) fn add_command(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub(crate) fn launch_app(&self) {
        let app = App::new(self.app_name)
            .version(self.app_version)
            .author(self.authors)
            .about(self.about)
            .setting(AppSettings::SubcommandRequiredElseHelp)
            .subcommands(self.commands.iter().map(|c| c.clap_subcommand()));
        let matches = app.get_matches();
        let (command_name, command_matches) = matches.subcommand();
        let command_matches = match command_matches {
            Some(m) => m,
            None => unreachable!(),
        };
        init_logging(command_matches);
        info!("{} {}", self.app_name, self.app_version);
        if let Some(command) = self.commands.iter().find(|c| c.name() == command_name) {
            if let Err(e) = command.execute(command_matches) {
                error!("{:?}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_logging(arg_matches: &ArgMatches<'_>) {
    let level = arg_matches
        .value_of(ARG_LOGGING_LEVEL)
        .and_then(|l| LevelFilter::from_str(l).ok())
        .unwrap_or(LevelFilter::Info);
    env_logger::Builder::new()
        .filter_level(level)
        .format_target(false)
        .init();
}

/// The argument used to set the minimal level of the log messages.
pub(crate) fn logging_level_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_LOGGING_LEVEL)
        .long("logging-level")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["trace", "debug", "info", "warn", "error", "off"])
        .default_value("info")
        .help("the minimal level of the log messages")
}

/// The argument used to select the SAT solver.
pub(crate) fn solver_cli_arg<'a>() -> Arg<'a, 'a> {
    Arg::with_name(ARG_SOLVER)
        .short("s")
        .long("solver")
        .empty_values(false)
        .multiple(false)
        .possible_values(&["dpll", "truth-table"])
        .default_value("dpll")
        .help("the SAT solver used for consistency checks")
}

/// Builds a subcommand taking an input file, a SAT solver, and a logging level.
pub(crate) fn clap_subcommand_for(
    subcommand_name: &'static str,
    about: &'static str,
    arg_input_help: &'static str,
) -> App<'static, 'static> {
    SubCommand::with_name(subcommand_name)
        .about(about)
        .setting(AppSettings::DisableVersion)
        .arg(
            Arg::with_name(ARG_INPUT)
                .short("i")
                .long("input")
                .empty_values(false)
                .multiple(false)
                .help(arg_input_help)
                .required(true),
        )
        .arg(solver_cli_arg())
        .arg(logging_level_cli_arg())
}

pub(crate) fn create_solver(arg_matches: &ArgMatches<'_>) -> Box<dyn SatSolver> {
    match arg_matches.value_of(ARG_SOLVER).unwrap_or("dpll") {
        "dpll" => Box::new(DpllSolver),
        "truth-table" => Box::new(TruthTableSolver),
        _ => unreachable!(),
    }
}

pub(crate) fn create_input_file_reader(arg_matches: &ArgMatches<'_>) -> Result<BufReader<File>> {
    let input_file_canonicalized = realpath_from_arg(arg_matches, ARG_INPUT)?;
    info!("reading input file {:?}", input_file_canonicalized);
    Ok(BufReader::new(File::open(input_file_canonicalized)?))
}

fn realpath_from_arg(arg_matches: &ArgMatches<'_>, arg: &str) -> Result<PathBuf> {
    let file_path = arg_matches
        .value_of(arg)
        .with_context(|| format!("missing value for {}", arg))?;
    fs::canonicalize(PathBuf::from(file_path))
        .with_context(|| format!(r#"while opening file "{}""#, file_path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crusti_announce::CNFFormula;

    fn matches_for(args: &[&str]) -> ArgMatches<'static> {
        clap_subcommand_for("test", "a test command", "the input file")
            .get_matches_from_safe(args.iter().copied())
            .unwrap()
    }

    #[test]
    fn test_default_solver_is_dpll() {
        let matches = matches_for(&["test", "-i", "input"]);
        assert_eq!(Some("dpll"), matches.value_of(ARG_SOLVER));
        let mut cnf = CNFFormula::default();
        cnf.add_vars(1);
        cnf.add_clause(vec![1]);
        assert!(create_solver(&matches).is_satisfiable(&cnf));
    }

    #[test]
    fn test_truth_table_solver() {
        let matches = matches_for(&["test", "-i", "input", "-s", "truth-table"]);
        let mut cnf = CNFFormula::default();
        cnf.add_vars(1);
        cnf.add_clause(vec![1]);
        cnf.add_clause(vec![-1]);
        assert!(!create_solver(&matches).is_satisfiable(&cnf));
    }

    #[test]
    fn test_unknown_solver() {
        assert!(clap_subcommand_for("test", "a test command", "the input file")
            .get_matches_from_safe(["test", "-i", "input", "-s", "minisat"].iter().copied())
            .is_err());
    }

    #[test]
    fn test_missing_input() {
        assert!(clap_subcommand_for("test", "a test command", "the input file")
            .get_matches_from_safe(["test"].iter().copied())
            .is_err());
    }

    #[test]
    fn test_unknown_input_file() {
        let matches = matches_for(&["test", "-i", "/this/file/does/not/exist"]);
        assert!(create_input_file_reader(&matches).is_err());
    }
}
