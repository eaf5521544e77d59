//! Points of the 5-dimensional state space and their dense encoding.
//!
//! A state is where both pencils are, which of them moved in the last
//! round, and whether the rule from box 60 is in effect. States whose
//! pencils both sit on boxes are keys of the transition table and encode
//! bijectively onto `0..STATE_COUNT`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::maze::{MazePoint, Position, MAZE_POINT_COUNT, START_PENCIL_0, START_PENCIL_1};

/// Number of keyed states: 2 (moved0) x 2 (moved1) x 16 x 16 x 2 (rule 60)
pub const STATE_COUNT: usize = 2 * 2 * MAZE_POINT_COUNT * MAZE_POINT_COUNT * 2;

/// One of the two pencils
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pencil {
    First,
    Second,
}

impl Pencil {
    pub const BOTH: [Pencil; 2] = [Pencil::First, Pencil::Second];

    pub fn index(self) -> usize {
        match self {
            Pencil::First => 0,
            Pencil::Second => 1,
        }
    }

    /// Panics unless `index` is 0 or 1
    pub fn from_index(index: usize) -> Pencil {
        match index {
            0 => Pencil::First,
            1 => Pencil::Second,
            _ => panic!("Pencil::from_index(): illegal pencil index {}", index),
        }
    }

    pub fn other(self) -> Pencil {
        match self {
            Pencil::First => Pencil::Second,
            Pencil::Second => Pencil::First,
        }
    }
}

/// A point in the state space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct State {
    pub pencils: [Position; 2],
    pub moved: [bool; 2],
    pub rule60_active: bool,
}

impl State {
    /// Both pencils on boxes, nobody moved, rule 60 off
    pub fn new(pencil0: MazePoint, pencil1: MazePoint) -> Self {
        Self {
            pencils: [Position::At(pencil0), Position::At(pencil1)],
            moved: [false, false],
            rule60_active: false,
        }
    }

    /// Pencil 0 on box 1, pencil 1 on box 7
    pub fn start() -> Self {
        Self::new(START_PENCIL_0, START_PENCIL_1)
    }

    pub fn position(&self, pencil: Pencil) -> Position {
        self.pencils[pencil.index()]
    }

    pub fn moved(&self, pencil: Pencil) -> bool {
        self.moved[pencil.index()]
    }

    pub fn set_position(&mut self, pencil: Pencil, position: impl Into<Position>) {
        self.pencils[pencil.index()] = position.into();
    }

    pub fn set_moved(&mut self, pencil: Pencil, moved: bool) {
        self.moved[pencil.index()] = moved;
    }

    /// Box under `pencil`. Panics if the pencil is on a sentinel.
    pub fn maze_point(&self, pencil: Pencil) -> MazePoint {
        match self.position(pencil) {
            Position::At(mp) => mp,
            other => panic!(
                "State::maze_point(): pencil {} is not on a box ({:?})",
                pencil.index(),
                other
            ),
        }
    }

    /// Any pencil stuck in the deadly embrace
    pub fn is_illegal(&self) -> bool {
        self.pencils.contains(&Position::Illegal)
    }

    /// Any pencil made it out
    pub fn is_goal(&self) -> bool {
        self.pencils.contains(&Position::Goal)
    }

    pub fn is_terminal(&self) -> bool {
        self.is_illegal() || self.is_goal()
    }

    /// Mixed-radix encoding, most significant first:
    /// moved0 (2), moved1 (2), pencil0 box (16), pencil1 box (16), rule60 (2).
    ///
    /// Panics if either pencil is on a sentinel; only keyed states encode.
    pub fn index(&self) -> usize {
        let mut index = 0;
        index = index * 2 + self.moved[0] as usize;
        index = index * 2 + self.moved[1] as usize;
        index = index * MAZE_POINT_COUNT + self.maze_point(Pencil::First).ordinal();
        index = index * MAZE_POINT_COUNT + self.maze_point(Pencil::Second).ordinal();
        index * 2 + self.rule60_active as usize
    }

    /// Inverse of [`State::index`]. Panics outside `0..STATE_COUNT`.
    pub fn from_index(index: usize) -> State {
        if index >= STATE_COUNT {
            panic!("State::from_index(): index {} out of range", index);
        }
        let mut rest = index;
        let rule60_active = rest % 2 == 1;
        rest /= 2;
        let pencil1 = MazePoint::from_ordinal(rest % MAZE_POINT_COUNT);
        rest /= MAZE_POINT_COUNT;
        let pencil0 = MazePoint::from_ordinal(rest % MAZE_POINT_COUNT);
        rest /= MAZE_POINT_COUNT;
        let moved1 = rest % 2 == 1;
        let moved0 = rest / 2 == 1;
        State {
            pencils: [Position::At(pencil0), Position::At(pencil1)],
            moved: [moved0, moved1],
            rule60_active,
        }
    }

    /// Every keyed state in listing order: movement flags and rule 60 run
    /// set-first, boxes run ascending.
    pub fn enumerate() -> impl Iterator<Item = State> {
        [true, false].into_iter().flat_map(|moved0| {
            [true, false].into_iter().flat_map(move |moved1| {
                MazePoint::ALL.into_iter().flat_map(move |pencil0| {
                    MazePoint::ALL.into_iter().flat_map(move |pencil1| {
                        [true, false].into_iter().map(move |rule60_active| State {
                            pencils: [Position::At(pencil0), Position::At(pencil1)],
                            moved: [moved0, moved1],
                            rule60_active,
                        })
                    })
                })
            })
        })
    }
}

impl fmt::Display for State {
    /// `(m.,26, 7,*)`: movement marks, both positions, rule 60 mark
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = |moved: bool| if moved { 'm' } else { '.' };
        write!(
            f,
            "({}{},{},{},{})",
            mark(self.moved[0]),
            mark(self.moved[1]),
            self.pencils[0],
            self.pencils[1],
            if self.rule60_active { '*' } else { ' ' }
        )
    }
}
