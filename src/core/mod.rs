mod agent;
pub use agent::Agent;

mod clause;
pub use clause::Clause;
pub use clause::Literal;
pub use clause::Variable;

mod cnf;
pub use cnf::CNFFormula;

mod dnf;
pub use dnf::DNFFormula;

mod problems;
pub use problems::AnnouncementProblem;

mod sat_solver;
pub use sat_solver::DpllSolver;
pub use sat_solver::SatSolver;
pub use sat_solver::TruthTableSolver;
