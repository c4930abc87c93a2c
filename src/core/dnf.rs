use super::clause::{self, Clause, Literal};
use crate::CNFFormula;
use itertools::Itertools;
use std::fmt::Display;

/// A formula in Disjunctive Normal Form: a disjunction of conjunctive clauses.
///
/// A DNF formula with no clauses cannot be satisfied, while a DNF formula containing an empty clause is a tautology.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DNFFormula {
    n_vars: usize,
    clauses: Vec<Clause>,
}

impl DNFFormula {
    /// Builds a new DNF formula from clauses, without checking their literals.
    pub(crate) fn new_from_clauses_unchecked(n_vars: usize, clauses: Vec<Clause>) -> Self {
        Self { n_vars, clauses }
    }

    /// Builds a new DNF formula from clauses.
    ///
    /// The number of variables is set to the highest variable index involved in the clauses.
    ///
    /// # Panics
    ///
    /// In case a clause contains the literal 0, this function panics.
    pub fn from_clauses(clauses: Vec<Clause>) -> Self {
        let n_vars = clause::max_var_of(clauses.iter());
        clauses
            .iter()
            .for_each(|cl| clause::check_literals(cl, n_vars));
        Self { n_vars, clauses }
    }

    /// Returns the number of variables associated with this DNF formula.
    ///
    /// This number may be higher that the highest variable index present in the clauses.
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

    /// Returns the number of clauses contained in this DNF formula.
    pub fn n_clauses(&self) -> usize {
        self.clauses.len()
    }

    /// Adds a clause to the DNF formula.
    ///
    /// # Panics
    ///
    /// In case the clause involves the literal 0 or variable indexes that are higher than the number of variables associated with this DNF formula, this function panics.
    pub fn add_clause(&mut self, clause: Clause) {
        clause::check_literals(&clause, self.n_vars);
        self.clauses.push(clause);
    }

    /// Iterates over the clauses of this DNF formula.
    pub fn iter_clauses(&self) -> impl Iterator<Item = &Clause> + '_ {
        self.clauses.iter()
    }

    /// Returns `true` iff this formula contains the provided clause, literal for literal.
    pub fn contains_clause(&self, clause: &[Literal]) -> bool {
        self.clauses.iter().any(|cl| cl == clause)
    }

    /// Returns a copy of this formula where literals and clauses are sorted and deduplicated.
    ///
    /// Contrary to [`simplify`](Self::simplify), self-contradictory clauses are kept.
    pub fn canonicalize(&self) -> DNFFormula {
        let mut clauses = self.clauses.clone();
        clauses.iter_mut().for_each(clause::canonicalize_clause);
        clause::canonicalize_clauses(&mut clauses);
        DNFFormula::new_from_clauses_unchecked(self.n_vars, clauses)
    }

    /// Returns an equivalent formula in canonical form.
    ///
    /// Repeated literals are removed and literals are sorted by variable index.
    /// Clauses containing both a literal and its negation cannot be satisfied, and are removed.
    /// Repeated clauses are removed, and the remaining ones are sorted.
    /// Empty clauses are kept since they make the formula a tautology.
    ///
    /// This operation is idempotent.
    pub fn simplify(&self) -> DNFFormula {
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
        DNFFormula::new_from_clauses_unchecked(self.n_vars, clauses)
    }

    /// Computes the conjunction of two DNF formulas, expressed as a DNF formula.
    ///
    /// Each clause of the result is the concatenation of a clause of `self` and a clause of `other`; all the pairs are considered.
    /// The result is not simplified.
    pub fn conjoin(&self, other: &DNFFormula) -> DNFFormula {
        let clauses = self
            .clauses
            .iter()
            .cartesian_product(other.clauses.iter())
            .map(|(left, right)| left.iter().chain(right.iter()).copied().collect())
            .collect();
        DNFFormula::new_from_clauses_unchecked(usize::max(self.n_vars, other.n_vars), clauses)
    }

    /// Computes the conjunction of a sequence of DNF formulas, expressed as a DNF formula.
    ///
    /// The first formula is the seed of the conjunction; the other ones are folded into it using [`conjoin`](Self::conjoin).
    /// Formulas having the same clauses as the first one are skipped, whatever their number of variables.
    /// If no formula is folded in, the result is the first formula.
    ///
    /// # Panics
    ///
    /// This function panics if the sequence is empty.
    pub fn conjoin_all(formulas: &[&DNFFormula]) -> DNFFormula {
        let (first, others) = formulas
            .split_first()
            .expect("cannot conjoin an empty sequence of formulas");
        others
            .iter()
            .filter(|f| f.clauses != first.clauses)
            .fold(None, |acc: Option<DNFFormula>, f| {
                Some(acc.as_ref().unwrap_or(*first).conjoin(f))
            })
            .unwrap_or_else(|| (*first).clone())
    }

    /// Converts this formula into an equivalent CNF formula.
    ///
    /// The clauses of the CNF formula are all the ways to pick a literal from each clause of this formula.
    /// No auxiliary variable is introduced, so the size of the result may be exponential in the size of this formula.
    /// A formula made of a single clause is directly translated into unit clauses.
    pub fn to_cnf(&self) -> CNFFormula {
        let clauses = match self.clauses.as_slice() {
            [] => vec![Clause::new()],
            [single] => single.iter().map(|l| vec![*l]).collect(),
            several => several
                .iter()
                .map(|cl| cl.iter().copied())
                .multi_cartesian_product()
                .collect(),
        };
        CNFFormula::new_from_clauses_unchecked(self.n_vars, clauses)
    }
}

impl Display for DNFFormula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.clauses.is_empty() {
            return write!(f, "false");
        }
        let parenthesize = self.clauses.len() > 1;
        for (i, cl) in self.clauses.iter().enumerate() {
            if i > 0 {
                write!(f, " or ")?;
            }
            if cl.is_empty() {
                write!(f, "true")?;
                continue;
            }
            let wrap = parenthesize && cl.len() > 1;
            if wrap {
                write!(f, "(")?;
            }
            for (j, l) in cl.iter().enumerate() {
                if j > 0 {
                    write!(f, " and ")?;
                }
                if *l < 0 {
                    write!(f, "not {}", -l)?;
                } else {
                    write!(f, "{}", l)?;
                }
            }
            if wrap {
                write!(f, ")")?;
            }
        }
        Ok(())
    }
}
