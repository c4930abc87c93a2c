use super::AnnouncementOutcome;
use crate::{Agent, CNFFormula, DNFFormula, Variable};
use log::{debug, info, trace};

/// A trait for structures following the progress of an [`AnnouncementSynthesizer`](crate::AnnouncementSynthesizer).
///
/// All the methods do nothing by default.
pub trait SearchObserver {
    /// Called with the CNF formula given to the SAT solver to check the consistency of the goals.
    ///
    /// `None` means the conjunction of the goals was found inconsistent before calling the solver.
    fn on_goals_consistency_input(&mut self, _cnf: Option<&CNFFormula>) {}

    /// Called once the consistency of the goals is known.
    fn on_goals_consistency(&mut self, _consistent: bool) {}

    /// Called before the candidates built on a new set of variables are tested.
    fn on_variable_subset(&mut self, _vars: &[Variable]) {}

    /// Called each time an agent revises its beliefs by a candidate announcement.
    fn on_candidate_revision(
        &mut self,
        _agent_index: usize,
        _agent: &Agent,
        _candidate: &DNFFormula,
        _revised: &DNFFormula,
    ) {
    }

    /// Called with the final result of the synthesis.
    fn on_outcome(&mut self, _outcome: &AnnouncementOutcome) {}
}

/// An observer writing the progress of the search into the logs.
#[derive(Default)]
pub struct LoggingObserver {
    n_revisions: usize,
}

impl LoggingObserver {
    /// Returns the number of revisions observed so far.
    pub fn n_revisions(&self) -> usize {
        self.n_revisions
    }
}

impl SearchObserver for LoggingObserver {
    fn on_goals_consistency_input(&mut self, cnf: Option<&CNFFormula>) {
        match cnf {
            Some(cnf) => debug!(
                "goal consistency input to the SAT solver: {}",
                format_clauses(cnf.iter_clauses())
            ),
            None => debug!("the conjunction of the goals has no consistent term"),
        }
    }

    fn on_goals_consistency(&mut self, consistent: bool) {
        if consistent {
            info!("goals are consistent");
        } else {
            info!("goals are inconsistent, looking for an announcement");
        }
    }

    fn on_variable_subset(&mut self, vars: &[Variable]) {
        debug!("trying announcements over variables {:?}", vars);
    }

    fn on_candidate_revision(
        &mut self,
        agent_index: usize,
        agent: &Agent,
        candidate: &DNFFormula,
        revised: &DNFFormula,
    ) {
        self.n_revisions += 1;
        trace!(
            "agent {}: beliefs [{}] revised by [{}] give [{}]; goal is [{}]",
            agent_index + 1,
            agent.beliefs(),
            candidate,
            revised,
            agent.goal()
        );
    }

    fn on_outcome(&mut self, outcome: &AnnouncementOutcome) {
        info!("{} ({} revisions computed)", outcome, self.n_revisions);
    }
}

fn format_clauses<'a>(clauses: impl Iterator<Item = &'a Vec<isize>>) -> String {
    clauses.fold(String::new(), |mut acc, cl| {
        if !acc.is_empty() {
            acc.push_str(", ")
        }
        acc.push_str(&format!("{:?}", cl));
        acc
    })
}
