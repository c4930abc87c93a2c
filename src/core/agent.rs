use crate::DNFFormula;

/// An agent, given by its beliefs and the goal it should reach.
///
/// Both formulas are in canonical form: literals are sorted by variable index and repeated literals and clauses are removed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Agent {
    beliefs: DNFFormula,
    goal: DNFFormula,
}

impl Agent {
    /// Builds a new agent, canonicalizing its beliefs and its goal.
    pub fn new(beliefs: DNFFormula, goal: DNFFormula) -> Self {
        Self {
            beliefs: beliefs.canonicalize(),
            goal: goal.canonicalize(),
        }
    }

    /// Returns the beliefs of the agent.
    pub fn beliefs(&self) -> &DNFFormula {
        &self.beliefs
    }

    /// Returns the goal of the agent.
    pub fn goal(&self) -> &DNFFormula {
        &self.goal
    }

    /// Returns the highest variable index involved in the beliefs or the goal, or 0 if there is none.
    pub fn max_var(&self) -> usize {
        usize::max(self.beliefs.max_var(), self.goal.max_var())
    }
}
