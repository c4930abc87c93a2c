use crate::Agent;

/// A set of agents for which a public announcement is looked for.
pub struct AnnouncementProblem {
    n_vars: usize,
    agents: Vec<Agent>,
}

impl AnnouncementProblem {
    /// Builds a new problem.
    pub fn new(n_vars: usize, agents: Vec<Agent>) -> Self {
        Self { n_vars, agents }
    }

    /// Returns the number of variables declared for this problem.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Returns the agents of the problem.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }
}
