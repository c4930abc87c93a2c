use crate::{CNFFormula, DNFFormula, SatSolver};

/// Computes the simplified conjunction of the goals.
///
/// # Panics
///
/// This function panics if no goal is provided.
pub fn goals_conjunction(goals: &[&DNFFormula]) -> DNFFormula {
    DNFFormula::conjoin_all(goals).simplify()
}

/// Computes the CNF formula given to the SAT solver to check the consistency of the goals.
///
/// Returns `None` if the conjunction of the goals has no satisfiable clause, in which case the goals are inconsistent.
///
/// # Panics
///
/// This function panics if no goal is provided.
pub fn goals_consistency_cnf(goals: &[&DNFFormula]) -> Option<CNFFormula> {
    let conjunction = goals_conjunction(goals);
    if conjunction.n_clauses() == 0 {
        None
    } else {
        Some(conjunction.to_cnf())
    }
}

/// Checks whether the goals can be reached at the same time.
///
/// # Panics
///
/// This function panics if no goal is provided.
pub fn goals_consistent(goals: &[&DNFFormula], solver: &dyn SatSolver) -> bool {
    match goals_consistency_cnf(goals) {
        Some(cnf) => solver.is_satisfiable(&cnf),
        None => false,
    }
}
