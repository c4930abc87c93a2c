/// A propositional variable, indexed from 1.
pub type Variable = usize;

/// A literal, given by a nonzero integer: its magnitude is the variable index, its sign is the polarity.
pub type Literal = isize;

/// A sequence of literals.
///
/// Whether a clause is a conjunction or a disjunction depends on the formula that holds it:
/// a clause of a [`DNFFormula`](crate::DNFFormula) is a conjunction, while a clause of a [`CNFFormula`](crate::CNFFormula) is a disjunction.
pub type Clause = Vec<Literal>;

/// Sorts the literals of a clause by variable index and removes the repeated ones.
///
/// When a variable occurs with both polarities, the negative literal comes first.
pub(crate) fn canonicalize_clause(clause: &mut Clause) {
    clause.sort_unstable_by_key(|l| (l.unsigned_abs(), *l > 0));
    clause.dedup();
}

/// Returns `true` iff a canonical clause contains both a literal and its negation.
pub(crate) fn has_complementary_literals(clause: &[Literal]) -> bool {
    clause
        .windows(2)
        .any(|w| w[0].unsigned_abs() == w[1].unsigned_abs())
}

/// Sorts the clauses of a formula and removes the repeated ones.
///
/// The clauses themselves are expected to be canonical.
pub(crate) fn canonicalize_clauses(clauses: &mut Vec<Clause>) {
    clauses.sort_unstable();
    clauses.dedup();
}

/// Returns the highest variable index involved in the clauses, or 0 if there is none.
pub(crate) fn max_var_of<'a>(clauses: impl Iterator<Item = &'a Clause>) -> Variable {
    clauses
        .flat_map(|cl| cl.iter())
        .map(|l| l.unsigned_abs())
        .max()
        .unwrap_or(0)
}

pub(crate) fn check_literals(clause: &[Literal], n_vars: usize) {
    if clause.contains(&0) {
        panic!("a clause cannot contain the literal 0");
    }
    if clause.iter().any(|l| l.unsigned_abs() > n_vars) {
        panic!("variable index is higher than n_vars");
    }
}
