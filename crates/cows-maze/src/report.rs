//! Text and JSON rendering of a finished search.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::search::{GoalEncounter, SearchOutcome, StateSpace};
use crate::state::State;
use crate::transition::Transition;

/// Write the search report: goal encounters with their traces, the maximal
/// depth, then every visited transition.
pub fn write_report<W: Write>(
    out: &mut W,
    space: &StateSpace,
    outcome: &SearchOutcome,
) -> io::Result<()> {
    for goal in &outcome.goals {
        write_goal(out, goal)?;
    }
    writeln!(
        out,
        "The maximal search depth encountered is {}",
        outcome.max_depth
    )?;
    write_transitions(out, space.visited_transitions())
}

fn write_goal<W: Write>(out: &mut W, goal: &GoalEncounter) -> io::Result<()> {
    writeln!(out, "Goal state encountered at {}!", goal.depth)?;
    if let Some(trace) = &goal.trace {
        writeln!(out, "---- Stack trace, depth {}", goal.depth)?;
        for state in trace {
            writeln!(out, "{}", state)?;
        }
    }
    Ok(())
}

/// One transition per line
pub fn write_transitions<'a, W, I>(out: &mut W, transitions: I) -> io::Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'a Transition>,
{
    for transition in transitions {
        writeln!(out, "{}", transition)?;
    }
    Ok(())
}

/// Machine-readable summary of a search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchSummary {
    pub goal_found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_depth: Option<u32>,
    pub goals: Vec<GoalSummary>,
    pub max_depth: u32,
    pub states_visited: usize,
    pub illegal_encounters: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalSummary {
    pub depth: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<State>>,
}

impl From<&SearchOutcome> for SearchSummary {
    fn from(outcome: &SearchOutcome) -> Self {
        SearchSummary {
            goal_found: outcome.goal_found(),
            goal_depth: outcome.first_goal().map(|g| g.depth),
            goals: outcome
                .goals
                .iter()
                .map(|g| GoalSummary {
                    depth: g.depth,
                    trace: g.trace.clone(),
                })
                .collect(),
            max_depth: outcome.max_depth,
            states_visited: outcome.states_visited,
            illegal_encounters: outcome.illegal_encounters,
        }
    }
}
