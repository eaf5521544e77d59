//! Exhaustive state-space search for the "Cows in the Maze" puzzle.
//!
//! Two pencils start on boxes 1 and 7 of a maze whose boxes ask questions
//! about each other. This crate enumerates every combination of pencil
//! positions, movement flags and the box 60 rule, precomputes where each
//! choice of pencil leads, and searches depth-first for a way out.

pub mod maze;
pub mod report;
pub mod rules;
pub mod search;
pub mod state;
pub mod transition;

// Re-export main types
pub use maze::{MazePoint, Position, UnknownMazePoint};
pub use report::{write_report, write_transitions, SearchSummary};
pub use rules::{evaluate, evaluate_with, PathKind, RuleOutcome, Rulebook};
pub use search::{GoalEncounter, SearchConfig, SearchOutcome, StateSpace, DEFAULT_TRACE_CAPACITY};
pub use state::{Pencil, State, STATE_COUNT};
pub use transition::Transition;
