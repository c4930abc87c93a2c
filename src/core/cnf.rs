use super::clause::{self, Clause};

/// A formula in Conjunctive Normal Form: a conjunction of disjunctive clauses.
///
/// A CNF formula with no clauses is a tautology, while a CNF formula containing an empty clause cannot be satisfied.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CNFFormula {
    n_vars: usize,
    clauses: Vec<Clause>,
}

impl CNFFormula {
    /// Builds a new CNF formula from clauses, without checking their literals.
    pub(crate) fn new_from_clauses_unchecked(n_vars: usize, clauses: Vec<Clause>) -> Self {
        Self { n_vars, clauses }
    }

    /// Returns the number of variables associated with this CNF formula.
    ///
    /// The number of variables is typically set when the CNF formula is created, and updated by relevant functions.
    /// This number may thus be higher that the highest variable index present in the clauses.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the highest variable index actually involved in the clauses, or 0 if there is none.
    pub fn max_var(&self) -> usize {
        clause::max_var_of(self.clauses.iter())
    }

    /// Adds new variables to this formula.
    pub fn add_vars(&mut self, n: usize) {
        self.n_vars += n;
    }

    /// Returns the number of clauses contained in this CNF formula.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Adds a clause to the CNF formula.
    ///
    /// # Panics
    ///
    /// In case the clause involves the literal 0 or variable indexes that are higher than the number of variables associated with this CNF formula, this function panics.
    pub fn add_clause(&mut self, clause: Clause) {
        clause::check_literals(&clause, self.n_vars);
        self.clauses.push(clause);
    }

    /// Iterates over the clauses of this CNF formula.
    pub fn iter_clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    /// Returns `true` iff this formula contains an empty clause.
    pub fn has_empty_clause(&self) -> bool {
        self.clauses.iter().any(|cl| cl.is_empty())
    }

    /// Returns an equivalent formula in canonical form.
    ///
    /// Repeated literals are removed and literals are sorted by variable index.
    /// Clauses containing both a literal and its negation are tautologies, and are removed.
    /// Repeated clauses are removed, and the remaining ones are sorted.
    /// Empty clauses are kept since they make the formula unsatisfiable.
    pub fn simplify(&self) -> CNFFormula {
        let mut clauses = self
            .clauses
            .iter()
            .map(|cl| {
                let mut cl = cl.clone();
                clause::canonicalize_clause(&mut cl);
                cl
            })
            .filter(|cl| !clause::has_complementary_literals(cl))
            .collect::<Vec<Clause>>();
        clause::canonicalize_clauses(&mut clauses);
        CNFFormula::new_from_clauses_unchecked(self.n_vars, clauses)
    }
}
