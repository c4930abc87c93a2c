//! Public announcements leading agents to their goals through belief revision.
//!
//! Each [`Agent`] holds beliefs and a goal, both given as DNF formulas.
//! The [`AnnouncementSynthesizer`] looks for a formula such that, once every agent has revised its beliefs by it,
//! the revised beliefs of each agent contain its goal.

mod announcement;
pub use announcement::conjunctive_partitions;
pub use announcement::goals_conjunction;
pub use announcement::goals_consistency_cnf;
pub use announcement::goals_consistent;
pub use announcement::polarity_assignments;
pub use announcement::revise;
pub use announcement::synthesize_announcement;
pub use announcement::variable_subsets;
pub use announcement::AnnouncementOutcome;
pub use announcement::AnnouncementSynthesizer;
pub use announcement::LoggingObserver;
pub use announcement::SearchObserver;
pub use announcement::MAX_SEARCH_VARS;

mod core;
pub use crate::core::Agent;
pub use crate::core::AnnouncementProblem;
pub use crate::core::CNFFormula;
pub use crate::core::Clause;
pub use crate::core::DNFFormula;
pub use crate::core::DpllSolver;
pub use crate::core::Literal;
pub use crate::core::SatSolver;
pub use crate::core::TruthTableSolver;
pub use crate::core::Variable;

mod io;
pub use io::AgentsDimacsReader;
pub use io::AgentsDimacsWriter;
pub use io::CNFDimacsReader;
pub use io::CNFDimacsWriter;
