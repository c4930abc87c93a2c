use super::{candidates, consistency, revision, SearchObserver};
use crate::{Agent, DNFFormula, DpllSolver, SatSolver};
use std::{
    fmt::Display,
    sync::atomic::{AtomicBool, Ordering},
};

/// The highest variable index the search for an announcement can handle.
pub const MAX_SEARCH_VARS: usize = 64;

/// The result of the synthesis of an announcement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnouncementOutcome {
    /// The goals were already consistent; their conjunction is given.
    GoalsConsistent(DNFFormula),
    /// An announcement leading all the agents to their goals was found.
    Found(DNFFormula),
    /// No announcement was found.
    NotFound,
    /// The search was cancelled before its end.
    Cancelled,
}

impl AnnouncementOutcome {
    /// Returns the announcement, if any.
    pub fn announcement(&self) -> Option<&DNFFormula> {
        match self {
            AnnouncementOutcome::GoalsConsistent(f) | AnnouncementOutcome::Found(f) => Some(f),
            AnnouncementOutcome::NotFound | AnnouncementOutcome::Cancelled => None,
        }
    }
}

impl Display for AnnouncementOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnnouncementOutcome::GoalsConsistent(formula) => write!(
                f,
                "Goals are consistent, their conjunction can be announced: {}",
                formula
            ),
            AnnouncementOutcome::Found(formula) => {
                write!(f, "Found an announcement that works: {}", formula)
            }
            AnnouncementOutcome::NotFound => write!(f, "No possible satisfying assignment was found"),
            AnnouncementOutcome::Cancelled => {
                write!(f, "The search for an announcement was cancelled")
            }
        }
    }
}

/// Looks for a public announcement that makes each agent reach its goal once it has revised its beliefs.
///
/// If the goals are consistent, their conjunction is returned.
/// Otherwise, candidate announcements are tested by increasing number of literals: for each subset of variables,
/// each polarity assignment, and each way to group the literals into conjunctive clauses.
/// The first candidate for which the revised beliefs of every agent contain all the clauses of its goal is returned.
pub struct AnnouncementSynthesizer<'a> {
    agents: &'a [Agent],
    solver: Box<dyn SatSolver>,
    observer: Option<&'a mut dyn SearchObserver>,
    cancellation_flag: Option<&'a AtomicBool>,
}

impl<'a> AnnouncementSynthesizer<'a> {
    /// Builds a new synthesizer for the given agents, using a [`DpllSolver`].
    ///
    /// # Panics
    ///
    /// This function panics if the list of agents is empty.
    pub fn new(agents: &'a [Agent]) -> Self {
        assert!(
            !agents.is_empty(),
            "cannot look for an announcement without agents"
        );
        Self {
            agents,
            solver: Box::new(DpllSolver),
            observer: None,
            cancellation_flag: None,
        }
    }

    /// Sets the SAT solver used for consistency checks.
    pub fn with_solver(mut self, solver: Box<dyn SatSolver>) -> Self {
        self.solver = solver;
        self
    }

    /// Sets an observer notified of the progress of the search.
    pub fn with_observer(mut self, observer: &'a mut dyn SearchObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Sets a flag that stops the search when it is raised.
    ///
    /// The flag is checked before each new subset of variables.
    pub fn with_cancellation_flag(mut self, flag: &'a AtomicBool) -> Self {
        self.cancellation_flag = Some(flag);
        self
    }

    /// Runs the synthesis.
    ///
    /// # Panics
    ///
    /// This function panics if the goals are inconsistent and the agents involve a variable which index is higher than [`MAX_SEARCH_VARS`].
    pub fn synthesize(&mut self) -> AnnouncementOutcome {
        let outcome = self.synthesize_outcome();
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_outcome(&outcome);
        }
        outcome
    }

    fn synthesize_outcome(&mut self) -> AnnouncementOutcome {
        let agents = self.agents;
        let goals = agents.iter().map(Agent::goal).collect::<Vec<_>>();
        let consistency_cnf = consistency::goals_consistency_cnf(&goals);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_goals_consistency_input(consistency_cnf.as_ref());
        }
        let consistent = consistency_cnf
            .as_ref()
            .map(|cnf| self.solver.is_satisfiable(cnf))
            .unwrap_or(false);
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.on_goals_consistency(consistent);
        }
        if consistent {
            return AnnouncementOutcome::GoalsConsistent(consistency::goals_conjunction(&goals));
        }
        self.search()
    }

    fn search(&mut self) -> AnnouncementOutcome {
        let max_var = self.agents.iter().map(Agent::max_var).max().unwrap_or(0);
        assert!(
            max_var <= MAX_SEARCH_VARS,
            "cannot look for an announcement involving more than {} variables",
            MAX_SEARCH_VARS
        );
        for vars in candidates::variable_subsets(max_var) {
            if self.is_cancelled() {
                return AnnouncementOutcome::Cancelled;
            }
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_variable_subset(&vars);
            }
            for literals in candidates::polarity_assignments(&vars) {
                for candidate in candidates::conjunctive_partitions(&literals, max_var) {
                    if self.is_accepted(&candidate) {
                        return AnnouncementOutcome::Found(candidate);
                    }
                }
            }
        }
        AnnouncementOutcome::NotFound
    }

    fn is_cancelled(&self) -> bool {
        self.cancellation_flag
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false)
    }

    fn is_accepted(&mut self, candidate: &DNFFormula) -> bool {
        let agents = self.agents;
        for (agent_index, agent) in agents.iter().enumerate() {
            let revised =
                revision::revise(agent.beliefs(), candidate, &*self.solver).canonicalize();
            if let Some(observer) = self.observer.as_deref_mut() {
                observer.on_candidate_revision(agent_index, agent, candidate, &revised);
            }
            if !agent
                .goal()
                .iter_clauses()
                .all(|cl| revised.contains_clause(cl))
            {
                return false;
            }
        }
        true
    }
}

/// Looks for an announcement leading the agents to their goals, and returns a description of the result.
///
/// # Panics
///
/// See [`AnnouncementSynthesizer::new`] and [`AnnouncementSynthesizer::synthesize`].
pub fn synthesize_announcement(agents: &[Agent]) -> String {
    AnnouncementSynthesizer::new(agents).synthesize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TruthTableSolver;

    fn agent(beliefs: Vec<Vec<isize>>, goal: Vec<Vec<isize>>) -> Agent {
        Agent::new(
            DNFFormula::from_clauses(beliefs),
            DNFFormula::from_clauses(goal),
        )
    }

    fn assert_goals_are_covered(agents: &[Agent], announcement: &DNFFormula) {
        agents.iter().for_each(|a| {
            let revised = revision::revise(a.beliefs(), announcement, &DpllSolver);
            a.goal()
                .iter_clauses()
                .for_each(|cl| assert!(revised.contains_clause(cl), "{:?}", cl));
        });
    }

    #[derive(Default)]
    struct RecordingObserver {
        consistency: Option<bool>,
        subsets: Vec<Vec<usize>>,
        n_revisions: usize,
        outcome: Option<AnnouncementOutcome>,
    }

    impl SearchObserver for RecordingObserver {
        fn on_goals_consistency(&mut self, consistent: bool) {
            self.consistency = Some(consistent);
        }

        fn on_variable_subset(&mut self, vars: &[usize]) {
            self.subsets.push(vars.to_vec());
        }

        fn on_candidate_revision(
            &mut self,
            _agent_index: usize,
            _agent: &Agent,
            _candidate: &DNFFormula,
            _revised: &DNFFormula,
        ) {
            self.n_revisions += 1;
        }

        fn on_outcome(&mut self, outcome: &AnnouncementOutcome) {
            self.outcome = Some(outcome.clone());
        }
    }

    #[test]
    fn test_consistent_goals() {
        let agents = vec![
            agent(vec![vec![1]], vec![vec![1]]),
            agent(vec![vec![2]], vec![vec![2]]),
        ];
        let mut observer = RecordingObserver::default();
        let outcome = AnnouncementSynthesizer::new(&agents)
            .with_observer(&mut observer)
            .synthesize();
        assert_eq!(
            AnnouncementOutcome::GoalsConsistent(DNFFormula::from_clauses(vec![vec![1, 2]])),
            outcome
        );
        assert_eq!(Some(true), observer.consistency);
        assert!(observer.subsets.is_empty());
        assert_eq!(0, observer.n_revisions);
        assert_eq!(Some(outcome), observer.outcome);
        assert_eq!(
            "Goals are consistent, their conjunction can be announced: 1 and 2",
            synthesize_announcement(&agents)
        );
    }

    #[test]
    fn test_identical_goals_with_different_n_vars() {
        let goal = DNFFormula::from_clauses(vec![vec![1], vec![2]]);
        let mut wider_goal = goal.clone();
        wider_goal.add_vars(3);
        let agents = vec![
            Agent::new(DNFFormula::from_clauses(vec![vec![1]]), goal),
            Agent::new(DNFFormula::from_clauses(vec![vec![2]]), wider_goal),
        ];
        assert_eq!(
            "Goals are consistent, their conjunction can be announced: 1 or 2",
            synthesize_announcement(&agents)
        );
    }

    #[test]
    fn test_single_agent() {
        let agents = vec![agent(vec![vec![-1]], vec![vec![1, 2]])];
        assert_eq!(
            "Goals are consistent, their conjunction can be announced: 1 and 2",
            synthesize_announcement(&agents)
        );
    }

    #[test]
    fn test_opposite_goals_not_found() {
        let agents = vec![
            agent(vec![vec![1]], vec![vec![1]]),
            agent(vec![vec![-1]], vec![vec![-1]]),
        ];
        let mut observer = RecordingObserver::default();
        let outcome = AnnouncementSynthesizer::new(&agents)
            .with_observer(&mut observer)
            .synthesize();
        assert_eq!(AnnouncementOutcome::NotFound, outcome);
        assert_eq!(Some(false), observer.consistency);
        assert_eq!(vec![vec![1]], observer.subsets);
        assert_eq!(
            "No possible satisfying assignment was found",
            synthesize_announcement(&agents)
        );
    }

    #[test]
    fn test_single_literal_announcement() {
        let agents = vec![
            agent(vec![vec![1]], vec![vec![1, 2]]),
            agent(vec![vec![-1]], vec![vec![-1, 2]]),
        ];
        let outcome = AnnouncementSynthesizer::new(&agents).synthesize();
        let expected = DNFFormula::from_clauses(vec![vec![2]]);
        assert_eq!(AnnouncementOutcome::Found(expected.clone()), outcome);
        assert_goals_are_covered(&agents, &expected);
        assert_eq!(
            "Found an announcement that works: 2",
            synthesize_announcement(&agents)
        );
    }

    #[test]
    fn test_disjunctive_announcement() {
        let agents = vec![
            agent(vec![vec![1, 3]], vec![vec![1, 3]]),
            agent(vec![vec![-1, -3]], vec![vec![-1, 2, -3]]),
        ];
        let outcome = AnnouncementSynthesizer::new(&agents)
            .with_solver(Box::new(TruthTableSolver))
            .synthesize();
        let announcement = outcome.announcement().unwrap();
        assert_eq!("1 or 2", announcement.to_string());
        assert_goals_are_covered(&agents, announcement);
    }

    #[test]
    fn test_solvers_give_the_same_outcome() {
        let agents = vec![
            agent(vec![vec![1, 3]], vec![vec![1, 3]]),
            agent(vec![vec![-1, -3]], vec![vec![-1, 2, -3]]),
            agent(vec![vec![2]], vec![vec![2]]),
        ];
        let dpll_outcome = AnnouncementSynthesizer::new(&agents).synthesize();
        let truth_table_outcome = AnnouncementSynthesizer::new(&agents)
            .with_solver(Box::new(TruthTableSolver))
            .synthesize();
        assert_eq!(dpll_outcome, truth_table_outcome);
        if let Some(announcement) = dpll_outcome.announcement() {
            assert_goals_are_covered(&agents, announcement);
        }
    }

    #[test]
    fn test_cancellation() {
        let agents = vec![
            agent(vec![vec![1]], vec![vec![1]]),
            agent(vec![vec![-1]], vec![vec![-1]]),
        ];
        let flag = AtomicBool::new(true);
        let outcome = AnnouncementSynthesizer::new(&agents)
            .with_cancellation_flag(&flag)
            .synthesize();
        assert_eq!(AnnouncementOutcome::Cancelled, outcome);
        assert!(outcome.announcement().is_none());
    }

    #[test]
    fn test_cancellation_flag_not_raised() {
        let agents = vec![
            agent(vec![vec![1]], vec![vec![1, 2]]),
            agent(vec![vec![-1]], vec![vec![-1, 2]]),
        ];
        let flag = AtomicBool::new(false);
        let outcome = AnnouncementSynthesizer::new(&agents)
            .with_cancellation_flag(&flag)
            .synthesize();
        assert!(matches!(outcome, AnnouncementOutcome::Found(_)));
    }

    #[test]
    #[should_panic(expected = "without agents")]
    fn test_no_agents() {
        synthesize_announcement(&[]);
    }

    #[test]
    #[should_panic(expected = "more than 64 variables")]
    fn test_too_many_variables() {
        let agents = vec![
            agent(vec![vec![65]], vec![vec![1]]),
            agent(vec![vec![-1]], vec![vec![-1]]),
        ];
        synthesize_announcement(&agents);
    }
}
