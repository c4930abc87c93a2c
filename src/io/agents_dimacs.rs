use super::dimacs_common;
use crate::{Agent, AnnouncementProblem, Clause, DNFFormula};
use anyhow::{anyhow, Context, Result};
use std::{
    cell::RefCell,
    io::{BufRead, BufReader, Read, Write},
    rc::Rc,
};

/// A structure used to read agents described in a DIMACS-like format.
///
/// The preamble is `p agents <n_vars> <n_agents>`.
/// Each agent is opened by a line `a <index>`, indexes starting at 1 and following the order of the file.
/// Then, lines beginning with `b` and `g` give the conjunctive terms of the beliefs and the goal of the last opened agent.
/// As for clauses in DIMACS, terms are lists of literals ended by 0.
/// Each agent must have at least one belief term and one goal term.
#[derive(Default)]
pub struct AgentsDimacsReader;

#[derive(Default)]
struct AgentTerms {
    beliefs: Vec<Clause>,
    goal: Vec<Clause>,
}

impl AgentsDimacsReader {
    /// Parses an announcement problem.
    pub fn read<R>(&self, reader: R) -> Result<AnnouncementProblem>
    where
        R: Read,
    {
        let mut r = BufReader::new(reader);
        let mut buffer = String::new();
        let context = "while parsing an agents DIMACS instance";
        let line_index = Rc::new(RefCell::new(0));
        let line_index_context = || format!("while parsing line at index {}", line_index.borrow());
        let mut preamble_data = None;
        let mut agents: Vec<AgentTerms> = Vec::new();
        loop {
            let line = r.read_line(&mut buffer).context(context)?;
            if line == 0 {
                break;
            }
            let mut words = buffer.split_whitespace();
            if let Some(first_word) = words.next() {
                match first_word {
                    "c" => {}
                    "p" => dimacs_common::read_preamble(
                        &mut words,
                        &mut preamble_data,
                        "agents",
                        "the number of agents",
                    )
                    .context("while reading the preamble")
                    .with_context(line_index_context)
                    .context(context)?,
                    "a" => {
                        dimacs_common::assert_preamble_is_present(&preamble_data)
                            .with_context(line_index_context)
                            .context(context)?;
                        read_agent_index(&mut words, agents.len(), preamble_data.unwrap().1)
                            .context("while reading an agent definition")
                            .with_context(line_index_context)
                            .context(context)?;
                        agents.push(AgentTerms::default());
                    }
                    "b" | "g" => {
                        dimacs_common::assert_preamble_is_present(&preamble_data)
                            .with_context(line_index_context)
                            .context(context)?;
                        let term = dimacs_common::read_clause(&mut words, preamble_data.unwrap().0)
                            .context("while reading a term")
                            .with_context(line_index_context)
                            .context(context)?;
                        let agent = agents
                            .last_mut()
                            .ok_or_else(|| anyhow!("got a term before any agent definition"))
                            .with_context(line_index_context)
                            .context(context)?;
                        if first_word == "b" {
                            agent.beliefs.push(term);
                        } else {
                            agent.goal.push(term);
                        }
                    }
                    _ => {
                        return Err(anyhow!(r#"unexpected first word "{}""#, first_word))
                            .with_context(line_index_context)
                            .context(context);
                    }
                }
            }
            buffer.clear();
            *line_index.borrow_mut() += 1;
        }
        dimacs_common::assert_preamble_is_present(&preamble_data).context(context)?;
        let (n_vars, n_agents) = preamble_data.unwrap();
        if agents.len() != n_agents {
            return Err(anyhow!("less agent definitions than expected")).context(context);
        }
        let agents = agents
            .into_iter()
            .enumerate()
            .map(|(i, terms)| {
                if terms.beliefs.is_empty() {
                    return Err(anyhow!("agent {} has no belief term", i + 1));
                }
                if terms.goal.is_empty() {
                    return Err(anyhow!("agent {} has no goal term", i + 1));
                }
                Ok(Agent::new(
                    DNFFormula::new_from_clauses_unchecked(n_vars, terms.beliefs),
                    DNFFormula::new_from_clauses_unchecked(n_vars, terms.goal),
                ))
            })
            .collect::<Result<Vec<Agent>>>()
            .context(context)?;
        Ok(AnnouncementProblem::new(n_vars, agents))
    }
}

fn read_agent_index(
    words: &mut std::str::SplitWhitespace,
    n_defined: usize,
    n_agents: usize,
) -> Result<()> {
    let index = dimacs_common::expect_usize(words, "an agent index as second word")?;
    dimacs_common::expect_eol(words, "a third word")?;
    if n_defined == n_agents {
        return Err(anyhow!("more agent definitions than expected"));
    }
    if index != n_defined + 1 {
        return Err(anyhow!(
            "expected agent index {}, got {}",
            n_defined + 1,
            index
        ));
    }
    Ok(())
}

/// A structure that is used to write agents in the format read by [`AgentsDimacsReader`].
#[derive(Default)]
pub struct AgentsDimacsWriter;

impl AgentsDimacsWriter {
    /// Writes an announcement problem.
    pub fn write(&self, writer: &mut dyn Write, problem: &AnnouncementProblem) -> Result<()> {
        let context = "while writing an agents DIMACS instance";
        writeln!(
            writer,
            "p agents {} {}",
            problem.n_vars(),
            problem.agents().len()
        )
        .context(context)?;
        problem
            .agents()
            .iter()
            .enumerate()
            .try_for_each(|(i, agent)| {
                writeln!(writer, "a {}", i + 1)?;
                write_terms(writer, "b", agent.beliefs())?;
                write_terms(writer, "g", agent.goal())
            })
            .context(context)?;
        Ok(())
    }
}

fn write_terms(writer: &mut dyn Write, prefix: &str, formula: &DNFFormula) -> std::io::Result<()> {
    formula
        .iter_clauses()
        .try_for_each(|term| dimacs_common::write_clause(writer, Some(prefix), term))
}
