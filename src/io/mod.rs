mod agents_dimacs;
pub use agents_dimacs::AgentsDimacsReader;
pub use agents_dimacs::AgentsDimacsWriter;

mod cnf_dimacs;
pub use cnf_dimacs::CNFDimacsReader;
pub use cnf_dimacs::CNFDimacsWriter;

mod dimacs_common;
