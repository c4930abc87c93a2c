use super::clause::{Clause, Literal, Variable};
use crate::CNFFormula;
use rustc_hash::FxHashMap;

/// An interface for SAT solvers.
///
/// All implementations must give the same answer for the same formula.
pub trait SatSolver {
    /// Returns `true` iff some assignment of the variables satisfies all the clauses of the formula.
    fn is_satisfiable(&self, cnf: &CNFFormula) -> bool;
}

/// A SAT solver implementing the DPLL procedure with unit propagation.
#[derive(Clone, Copy, Debug, Default)]
pub struct DpllSolver;

impl SatSolver for DpllSolver {
    fn is_satisfiable(&self, cnf: &CNFFormula) -> bool {
        if cnf.has_empty_clause() {
            return false;
        }
        let clauses = cnf.iter_clauses().collect::<Vec<&Clause>>();
        let mut assignment = Assignment::new(cnf.max_var());
        dpll(&clauses, &mut assignment)
    }
}

struct Assignment {
    values: Vec<Option<bool>>,
    trail: Vec<Variable>,
}

impl Assignment {
    fn new(max_var: usize) -> Self {
        Self {
            values: vec![None; max_var + 1],
            trail: Vec::new(),
        }
    }

    fn value_of(&self, l: Literal) -> Option<bool> {
        self.values[l.unsigned_abs()].map(|v| v == (l > 0))
    }

    fn assign(&mut self, l: Literal) {
        self.values[l.unsigned_abs()] = Some(l > 0);
        self.trail.push(l.unsigned_abs());
    }

    fn trail_len(&self) -> usize {
        self.trail.len()
    }

    fn backtrack_to(&mut self, len: usize) {
        self.trail
            .drain(len..)
            .for_each(|v| self.values[v] = None);
    }
}

enum ClauseState {
    Satisfied,
    Falsified,
    Unit(Literal),
    Unresolved(Literal),
}

fn clause_state(clause: &[Literal], assignment: &Assignment) -> ClauseState {
    let mut first_unassigned = None;
    let mut n_unassigned = 0;
    for l in clause {
        match assignment.value_of(*l) {
            Some(true) => return ClauseState::Satisfied,
            Some(false) => {}
            None => {
                n_unassigned += 1;
                first_unassigned.get_or_insert(*l);
            }
        }
    }
    match first_unassigned {
        None => ClauseState::Falsified,
        Some(l) if n_unassigned == 1 => ClauseState::Unit(l),
        Some(l) => ClauseState::Unresolved(l),
    }
}

enum Propagation {
    Conflict,
    Decide(Literal),
    Satisfied,
}

fn propagate(clauses: &[&Clause], assignment: &mut Assignment) -> Propagation {
    loop {
        let mut decision = None;
        let mut propagated = false;
        for clause in clauses {
            match clause_state(clause, assignment) {
                ClauseState::Satisfied => {}
                ClauseState::Falsified => return Propagation::Conflict,
                ClauseState::Unit(l) => {
                    assignment.assign(l);
                    propagated = true;
                }
                ClauseState::Unresolved(l) => {
                    decision.get_or_insert(l);
                }
            }
        }
        if !propagated {
            return match decision {
                Some(l) => Propagation::Decide(l),
                None => Propagation::Satisfied,
            };
        }
    }
}

fn dpll(clauses: &[&Clause], assignment: &mut Assignment) -> bool {
    let checkpoint = assignment.trail_len();
    let decision = match propagate(clauses, assignment) {
        Propagation::Satisfied => return true,
        Propagation::Decide(l) => l,
        Propagation::Conflict => {
            assignment.backtrack_to(checkpoint);
            return false;
        }
    };
    for l in [decision, -decision] {
        let before_decision = assignment.trail_len();
        assignment.assign(l);
        if dpll(clauses, assignment) {
            return true;
        }
        assignment.backtrack_to(before_decision);
    }
    assignment.backtrack_to(checkpoint);
    false
}

/// A SAT solver enumerating all the assignments of the variables involved in the formula.
///
/// The enumeration stops at the first satisfying assignment.
///
/// # Panics
///
/// Checking a formula involving more than 64 distinct variables panics.
#[derive(Clone, Copy, Debug, Default)]
pub struct TruthTableSolver;

impl SatSolver for TruthTableSolver {
    fn is_satisfiable(&self, cnf: &CNFFormula) -> bool {
        let mut var_indexes = FxHashMap::default();
        cnf.iter_clauses().flatten().for_each(|l| {
            let next_index = var_indexes.len();
            var_indexes.entry(l.unsigned_abs()).or_insert(next_index);
        });
        let n_vars = var_indexes.len();
        assert!(
            n_vars <= 64,
            "cannot enumerate the assignments of more than 64 variables"
        );
        let indexed_clauses = cnf
            .iter_clauses()
            .map(|cl| {
                cl.iter()
                    .map(|l| (var_indexes[&l.unsigned_abs()], *l > 0))
                    .collect::<Vec<(usize, bool)>>()
            })
            .collect::<Vec<_>>();
        (0..1u128 << n_vars).any(|mask| {
            indexed_clauses.iter().all(|cl| {
                cl.iter()
                    .any(|(index, polarity)| ((mask >> index) & 1 == 1) == *polarity)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use itertools::Itertools;

    fn cnf(n_vars: usize, clauses: Vec<Clause>) -> CNFFormula {
        let mut cnf = CNFFormula::default();
        cnf.add_vars(n_vars);
        clauses.into_iter().for_each(|cl| cnf.add_clause(cl));
        cnf
    }

    fn solvers() -> Vec<Box<dyn SatSolver>> {
        vec![Box::new(DpllSolver), Box::new(TruthTableSolver)]
    }

    #[test]
    fn test_empty_formula_is_sat() {
        solvers()
            .iter()
            .for_each(|s| assert!(s.is_satisfiable(&CNFFormula::default())));
    }

    #[test]
    fn test_empty_clause_is_unsat() {
        solvers()
            .iter()
            .for_each(|s| assert!(!s.is_satisfiable(&cnf(0, vec![vec![]]))));
        solvers()
            .iter()
            .for_each(|s| assert!(!s.is_satisfiable(&cnf(2, vec![vec![1, 2], vec![]]))));
    }

    #[test]
    fn test_xor_is_sat() {
        let formula = cnf(2, vec![vec![-1, -2], vec![1, 2]]);
        solvers()
            .iter()
            .for_each(|s| assert!(s.is_satisfiable(&formula)));
    }

    #[test]
    fn test_all_clauses_over_two_vars_is_unsat() {
        let formula = cnf(2, vec![vec![1, 2], vec![1, -2], vec![-1, 2], vec![-1, -2]]);
        solvers()
            .iter()
            .for_each(|s| assert!(!s.is_satisfiable(&formula)));
    }

    #[test]
    fn test_unit_propagation_chain() {
        let formula = cnf(4, vec![vec![1], vec![-1, 2], vec![-2, 3], vec![-3, 4], vec![-4, -1]]);
        solvers()
            .iter()
            .for_each(|s| assert!(!s.is_satisfiable(&formula)));
    }

    #[test]
    fn test_pigeon_hole_3_2_is_unsat() {
        // variable 2 * p + h + 1: pigeon p sits in hole h
        let mut clauses = (0..3)
            .map(|p| vec![2 * p + 1, 2 * p + 2])
            .collect::<Vec<Clause>>();
        (0..2).for_each(|h| {
            (0..3).tuple_combinations().for_each(|(p, q)| {
                clauses.push(vec![-(2 * p + h + 1), -(2 * q + h + 1)]);
            })
        });
        let formula = cnf(6, clauses);
        solvers()
            .iter()
            .for_each(|s| assert!(!s.is_satisfiable(&formula)));
    }

    #[test]
    fn test_solvers_agree() {
        let all_clauses = [-2, -1, 1, 2]
            .into_iter()
            .powerset()
            .collect::<Vec<Clause>>();
        (0..=3).for_each(|n| {
            all_clauses.iter().combinations(n).for_each(|clauses| {
                let formula = cnf(2, clauses.into_iter().cloned().collect());
                assert_eq!(
                    TruthTableSolver.is_satisfiable(&formula),
                    DpllSolver.is_satisfiable(&formula),
                    "{:?}",
                    formula
                );
            })
        });
    }

    #[test]
    fn test_single_clause_round_trip() {
        let clauses: Vec<Clause> = vec![vec![1, -2, 3], vec![1, -1], vec![2, 3, -2], vec![]];
        clauses.into_iter().for_each(|cl| {
            let expected = !cl.iter().any(|l| cl.contains(&-l));
            let dnf = crate::DNFFormula::from_clauses(vec![cl]);
            solvers()
                .iter()
                .for_each(|s| assert_eq!(expected, s.is_satisfiable(&dnf.to_cnf())));
        });
    }
}
