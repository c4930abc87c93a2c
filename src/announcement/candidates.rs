use crate::{Clause, DNFFormula, Literal, Variable};
use itertools::Itertools;

/// Iterates over the nonempty subsets of the variables `1..=max_var`.
///
/// Subsets are given by increasing size; subsets of the same size come in lexicographic order.
/// The variables of a subset are sorted.
pub fn variable_subsets(max_var: usize) -> impl Iterator<Item = Vec<Variable>> {
    (1..=max_var).flat_map(move |size| (1..=max_var).combinations(size))
}

/// Iterates over the ways to give a polarity to each variable of a sequence.
///
/// The `k`-th bit of the counter gives the polarity of the `k`-th variable, a set bit meaning a positive literal.
/// The first assignment thus negates all the variables.
pub fn polarity_assignments(vars: &[Variable]) -> impl Iterator<Item = Vec<Literal>> + '_ {
    (0..1u128 << vars.len()).map(move |mask| {
        vars.iter()
            .enumerate()
            .map(|(k, v)| {
                if (mask >> k) & 1 == 1 {
                    *v as Literal
                } else {
                    -(*v as Literal)
                }
            })
            .collect()
    })
}

/// Iterates over the ways to split a sequence of literals into consecutive conjunctive clauses.
///
/// The `k`-th bit of the counter tells whether the `k+1`-th literal joins the clause of the `k`-th one (set bit) or opens a new clause.
/// The first formula is thus the disjunction of all the literals, and the last one is their conjunction.
/// The formulas are built with `n_vars` variables.
pub fn conjunctive_partitions(
    literals: &[Literal],
    n_vars: usize,
) -> impl Iterator<Item = DNFFormula> + '_ {
    let n_masks = match literals.len() {
        0 => 0,
        n => 1u128 << (n - 1),
    };
    (0..n_masks).map(move |mask| {
        let mut clauses: Vec<Clause> = vec![vec![literals[0]]];
        literals.iter().enumerate().skip(1).for_each(|(k, l)| {
            if (mask >> (k - 1)) & 1 == 1 {
                if let Some(last) = clauses.last_mut() {
                    last.push(*l);
                }
            } else {
                clauses.push(vec![*l]);
            }
        });
        DNFFormula::new_from_clauses_unchecked(n_vars, clauses)
    })
}
