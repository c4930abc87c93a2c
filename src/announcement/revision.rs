use crate::{DNFFormula, SatSolver};

/// Revises beliefs by a formula.
///
/// If the beliefs are consistent with the formula, the result is their (simplified) conjunction.
/// Otherwise, the formula takes priority and the result is the simplified formula alone.
/// The beliefs are left untouched.
pub fn revise(beliefs: &DNFFormula, formula: &DNFFormula, solver: &dyn SatSolver) -> DNFFormula {
    let conjunction = beliefs.conjoin(formula).simplify();
    if is_satisfiable(&conjunction, solver) {
        conjunction
    } else {
        formula.simplify()
    }
}

/// Checks the satisfiability of a DNF formula, one clause at a time.
///
/// A DNF formula is satisfiable iff one of its clauses is, so each clause is converted to CNF on its own.
/// This avoids the exponential size of the CNF equivalent of the whole formula.
pub(crate) fn is_satisfiable(formula: &DNFFormula, solver: &dyn SatSolver) -> bool {
    formula.iter_clauses().any(|cl| {
        let single = DNFFormula::new_from_clauses_unchecked(formula.n_vars(), vec![cl.clone()]);
        solver.is_satisfiable(&single.to_cnf())
    })
}
