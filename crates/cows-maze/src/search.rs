//! Depth-first search over the full transition table.
//!
//! The table holds one [`Transition`] per keyed state, stored densely at
//! [`State::index`]. It is built eagerly, then walked depth-first from the
//! start state. A state already recorded at the same or a shallower depth is
//! not expanded again.

use smallvec::SmallVec;

use crate::rules::Rulebook;
use crate::state::{Pencil, State, STATE_COUNT};
use crate::transition::Transition;

/// Default number of states kept in the trace buffer
pub const DEFAULT_TRACE_CAPACITY: usize = 300;

/// Configuration for the search
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// States deeper than this are not recorded, and a goal found deeper
    /// than this is reported without its trace
    pub trace_capacity: usize,
    /// Halt the whole search at the first goal. When false, a goal only ends
    /// the branch it was found on and every goal encounter is reported.
    pub stop_at_first_goal: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            trace_capacity: DEFAULT_TRACE_CAPACITY,
            stop_at_first_goal: true,
        }
    }
}

/// A goal reached during the search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoalEncounter {
    /// Depth of the state whose successor is the goal
    pub depth: u32,
    /// Path from the start state to that state, if it fit the trace buffer
    pub trace: Option<Vec<State>>,
}

/// Result of a search
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOutcome {
    pub goals: Vec<GoalEncounter>,
    /// Largest depth ever recorded on a transition
    pub max_depth: u32,
    /// Distinct keyed states recorded
    pub states_visited: usize,
    /// Branches abandoned because a successor was illegal
    pub illegal_encounters: usize,
}

impl SearchOutcome {
    pub fn goal_found(&self) -> bool {
        !self.goals.is_empty()
    }

    pub fn first_goal(&self) -> Option<&GoalEncounter> {
        self.goals.first()
    }
}

/// The whole state space with its precomputed transitions
#[derive(Debug, Clone)]
pub struct StateSpace {
    transitions: Box<[Transition]>,
}

impl StateSpace {
    /// Evaluate the rules for every keyed state
    pub fn build() -> Self {
        Self::build_with(Rulebook::Standard)
    }

    pub fn build_with(rulebook: Rulebook) -> Self {
        let transitions: Box<[Transition]> = (0..STATE_COUNT)
            .map(State::from_index)
            .map(|state| Transition::build_with(state, rulebook))
            .collect();

        for transition in transitions.iter() {
            for successor in transition.successors().filter(|s| !s.is_terminal()) {
                if State::from_index(successor.index()) != successor {
                    panic!(
                        "StateSpace::build(): successor {} of {} does not survive encoding",
                        successor,
                        transition.current()
                    );
                }
            }
        }

        Self { transitions }
    }

    /// Transition keyed by `state`. Panics if `state` is terminal.
    pub fn transition(&self, state: &State) -> &Transition {
        &self.transitions[state.index()]
    }

    /// All transitions in listing order (see [`State::enumerate`])
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        State::enumerate().map(move |state| &self.transitions[state.index()])
    }

    /// Transitions the search has recorded, in listing order
    pub fn visited_transitions(&self) -> impl Iterator<Item = &Transition> + '_ {
        self.transitions().filter(|t| t.is_visited())
    }

    /// Forget every recorded visit
    pub fn reset_visits(&mut self) {
        for transition in self.transitions.iter_mut() {
            transition.set_visited(0);
        }
    }

    /// Search from pencil 0 on box 1 and pencil 1 on box 7.
    ///
    /// Visits accumulate in the table; call [`StateSpace::reset_visits`]
    /// before searching the same space again.
    pub fn search(&mut self, config: &SearchConfig) -> SearchOutcome {
        self.search_from(State::start(), config)
    }

    pub fn search_from(&mut self, start: State, config: &SearchConfig) -> SearchOutcome {
        let mut walk = Walk {
            transitions: &mut self.transitions,
            config,
            trace: Vec::with_capacity(config.trace_capacity.min(STATE_COUNT)),
            outcome: SearchOutcome::default(),
        };
        walk.run(start.index());
        let mut outcome = walk.outcome;
        outcome.states_visited = self.transitions.iter().filter(|t| t.is_visited()).count();
        outcome
    }
}

/// A state being expanded, and which of its successors comes next
#[derive(Debug, Clone, Copy)]
struct Frame {
    index: usize,
    depth: u32,
    branch: u8,
}

impl Frame {
    fn new(index: usize, depth: u32) -> Self {
        Self {
            index,
            depth,
            branch: 0,
        }
    }
}

/// Mutable search state for one pass over the table
struct Walk<'a> {
    transitions: &'a mut [Transition],
    config: &'a SearchConfig,
    trace: Vec<State>,
    outcome: SearchOutcome,
}

impl Walk<'_> {
    /// Record a visit at `depth`. Returns false if the state was already
    /// recorded at this depth or shallower.
    fn enter(&mut self, index: usize, depth: u32) -> bool {
        let transition = &mut self.transitions[index];
        if transition.is_visited() && transition.visited() <= depth {
            return false;
        }
        transition.set_visited(depth);
        self.outcome.max_depth = self.outcome.max_depth.max(depth);

        let slot = depth as usize;
        if slot <= self.config.trace_capacity {
            self.trace.truncate(slot - 1);
            self.trace.push(transition.current());
        }
        true
    }

    fn run(&mut self, start: usize) {
        // Explicit stack in place of recursion; successors are tried in the
        // order pencil 0, its alternate, pencil 1, its alternate, each to
        // completion before the next.
        let mut stack: SmallVec<[Frame; 64]> = SmallVec::new();
        if self.enter(start, 1) {
            stack.push(Frame::new(start, 1));
        }

        while let Some(frame) = stack.last_mut() {
            let branch = frame.branch;
            frame.branch += 1;
            let (index, depth) = (frame.index, frame.depth);

            let transition = &self.transitions[index];
            let successor = match branch {
                0 => Some(transition.next(Pencil::First)),
                1 => transition.alt_next(Pencil::First),
                2 => Some(transition.next(Pencil::Second)),
                3 => transition.alt_next(Pencil::Second),
                _ => {
                    stack.pop();
                    continue;
                }
            };
            let Some(successor) = successor else {
                continue;
            };

            if successor.is_illegal() {
                // abandons the remaining successors of this state as well
                self.outcome.illegal_encounters += 1;
                stack.pop();
                continue;
            }

            if successor.is_goal() {
                let slot = depth as usize;
                let trace =
                    (slot <= self.config.trace_capacity).then(|| self.trace[..slot].to_vec());
                self.outcome.goals.push(GoalEncounter { depth, trace });
                if self.config.stop_at_first_goal {
                    return;
                }
                stack.pop();
                continue;
            }

            let next = successor.index();
            if self.enter(next, depth + 1) {
                stack.push(Frame::new(next, depth + 1));
            }
        }
    }
}
