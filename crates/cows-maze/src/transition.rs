//! Precomputed edges out of one keyed state.

use std::fmt;

use crate::rules::{evaluate_with, PathKind, Rulebook};
use crate::state::{Pencil, State};

/// Successors of a keyed state, one set per choosable pencil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    current: State,
    next: [State; 2],
    alt_next: [Option<State>; 2],
    paths: [PathKind; 2],
    /// Depth at which the search last recorded this state, 0 if never
    visited: u32,
}

impl Transition {
    /// Evaluate the rules under both pencils of `current`
    pub fn build(current: State) -> Self {
        Self::build_with(current, Rulebook::Standard)
    }

    pub fn build_with(current: State, rulebook: Rulebook) -> Self {
        let outcomes = Pencil::BOTH.map(|pencil| evaluate_with(&current, pencil, rulebook));
        Self {
            current,
            next: outcomes.map(|o| o.next),
            alt_next: outcomes.map(|o| o.alt),
            paths: outcomes.map(|o| o.path),
            visited: 0,
        }
    }

    pub fn current(&self) -> State {
        self.current
    }

    /// State after following the rule under `pencil`
    pub fn next(&self, pencil: Pencil) -> State {
        self.next[pencil.index()]
    }

    /// The LUGNUT alternative, if the box under `pencil` offers one
    pub fn alt_next(&self, pencil: Pencil) -> Option<State> {
        self.alt_next[pencil.index()]
    }

    pub fn path(&self, pencil: Pencil) -> PathKind {
        self.paths[pencil.index()]
    }

    /// Successors in exploration order: pencil 0, its alternate, pencil 1,
    /// its alternate.
    pub fn successors(&self) -> impl Iterator<Item = State> + '_ {
        Pencil::BOTH
            .into_iter()
            .flat_map(move |pencil| std::iter::once(self.next(pencil)).chain(self.alt_next(pencil)))
    }

    pub fn visited(&self) -> u32 {
        self.visited
    }

    pub fn is_visited(&self) -> bool {
        self.visited > 0
    }

    pub fn set_visited(&mut self, depth: u32) {
        self.visited = depth;
    }
}

impl fmt::Display for Transition {
    /// `current -> next0 [or alt0] (p0) & next1 [or alt1] (p1) [ visited: n]`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> ", self.current)?;
        for pencil in Pencil::BOTH {
            if pencil == Pencil::Second {
                f.write_str(" & ")?;
            }
            write!(f, "{}", self.next(pencil))?;
            if let Some(alt) = self.alt_next(pencil) {
                write!(f, " or {}", alt)?;
            }
            write!(f, " (p{})", pencil.index())?;
        }
        f.write_str(" ")?;
        if self.is_visited() {
            write!(f, " visited: {}", self.visited)?;
        }
        Ok(())
    }
}
