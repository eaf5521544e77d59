//! The fixed "Cows in the Maze" board.
//!
//! Sixteen numbered boxes, each carrying a yes/no question about the box the
//! other pencil points to. The text categories below describe what is printed
//! in each box (colour of the text, words it contains) since several
//! questions ask about them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of boxes on the board
pub const MAZE_POINT_COUNT: usize = 16;

/// Box where pencil 0 starts
pub const START_PENCIL_0: MazePoint = MazePoint::B1;
/// Box where pencil 1 starts
pub const START_PENCIL_1: MazePoint = MazePoint::B7;

/// A box on the board, identified by its printed number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum MazePoint {
    B1,
    B2,
    B5,
    B7,
    B9,
    B15,
    B25,
    B26,
    B35,
    B40,
    B50,
    B55,
    B60,
    B61,
    B65,
    B75,
}

impl MazePoint {
    /// All boxes, ascending by label. The position in this array is the ordinal.
    pub const ALL: [MazePoint; MAZE_POINT_COUNT] = [
        MazePoint::B1,
        MazePoint::B2,
        MazePoint::B5,
        MazePoint::B7,
        MazePoint::B9,
        MazePoint::B15,
        MazePoint::B25,
        MazePoint::B26,
        MazePoint::B35,
        MazePoint::B40,
        MazePoint::B50,
        MazePoint::B55,
        MazePoint::B60,
        MazePoint::B61,
        MazePoint::B65,
        MazePoint::B75,
    ];

    /// The number printed on the box
    pub fn label(self) -> u8 {
        match self {
            MazePoint::B1 => 1,
            MazePoint::B2 => 2,
            MazePoint::B5 => 5,
            MazePoint::B7 => 7,
            MazePoint::B9 => 9,
            MazePoint::B15 => 15,
            MazePoint::B25 => 25,
            MazePoint::B26 => 26,
            MazePoint::B35 => 35,
            MazePoint::B40 => 40,
            MazePoint::B50 => 50,
            MazePoint::B55 => 55,
            MazePoint::B60 => 60,
            MazePoint::B61 => 61,
            MazePoint::B65 => 65,
            MazePoint::B75 => 75,
        }
    }

    /// Look up a box by its printed number
    pub fn from_label(label: u8) -> Option<MazePoint> {
        MazePoint::ALL.iter().copied().find(|mp| mp.label() == label)
    }

    /// Position of the box in [`MazePoint::ALL`], in `0..16`
    pub fn ordinal(self) -> usize {
        self as usize
    }

    /// Inverse of [`MazePoint::ordinal`]. Panics outside `0..16`.
    pub fn from_ordinal(ordinal: usize) -> MazePoint {
        match MazePoint::ALL.get(ordinal) {
            Some(&mp) => mp,
            None => panic!("MazePoint::from_ordinal(): ordinal {} out of range", ordinal),
        }
    }

    /// Box is printed in red, or contains green text
    pub fn has_red_or_green_text(self) -> bool {
        matches!(
            self,
            MazePoint::B7
                | MazePoint::B26
                | MazePoint::B61
                | MazePoint::B25
                | MazePoint::B50
                | MazePoint::B60
                | MazePoint::B9
                | MazePoint::B40
        )
    }

    /// Box has green text or contains the word "green"
    pub fn has_green_text_or_green_word(self) -> bool {
        matches!(
            self,
            MazePoint::B60
                | MazePoint::B5
                | MazePoint::B25
                | MazePoint::B2
                | MazePoint::B65
                | MazePoint::B40
                | MazePoint::B1
        )
    }

    /// Box text contains the word "red" or the word "green"
    pub fn has_red_word_or_green_word(self) -> bool {
        matches!(
            self,
            MazePoint::B5
                | MazePoint::B25
                | MazePoint::B2
                | MazePoint::B60
                | MazePoint::B1
                | MazePoint::B40
                | MazePoint::B65
        )
    }

    /// Box text contains the word "word"
    pub fn has_word_word(self) -> bool {
        matches!(self, MazePoint::B35 | MazePoint::B5)
    }

    /// Box text refers to cows
    pub fn refers_to_cows(self) -> bool {
        self == MazePoint::B50
    }

    /// Box text is a sentence beginning with "If"
    pub fn has_if_sentence(self) -> bool {
        matches!(self, MazePoint::B61 | MazePoint::B26 | MazePoint::B65)
    }

    pub fn is_odd(self) -> bool {
        self.label() % 2 == 1
    }

    pub fn is_multiple_of_five(self) -> bool {
        self.label() % 5 == 0
    }

    /// Text is red: rule 60 overrides the question and forces the Yes exit
    pub fn is_red_text(self) -> bool {
        matches!(
            self,
            MazePoint::B7
                | MazePoint::B9
                | MazePoint::B25
                | MazePoint::B26
                | MazePoint::B40
                | MazePoint::B50
                | MazePoint::B61
        )
    }
}

impl fmt::Display for MazePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.label(), f)
    }
}

/// Raw box number that names no box on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownMazePoint(pub u8);

impl fmt::Display for UnknownMazePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no box numbered {} in the maze", self.0)
    }
}

impl std::error::Error for UnknownMazePoint {}

impl TryFrom<u8> for MazePoint {
    type Error = UnknownMazePoint;

    fn try_from(label: u8) -> Result<Self, Self::Error> {
        MazePoint::from_label(label).ok_or(UnknownMazePoint(label))
    }
}

impl From<MazePoint> for u8 {
    fn from(mp: MazePoint) -> u8 {
        mp.label()
    }
}

/// Where a pencil is: on a box, or on one of the two terminal sentinels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Position {
    At(MazePoint),
    /// Dead end, reached through the deadly embrace of box 26
    Illegal,
    /// Left the maze through box 50's Yes exit
    Goal,
}

impl Position {
    /// The box, if this is not a sentinel
    pub fn maze_point(self) -> Option<MazePoint> {
        match self {
            Position::At(mp) => Some(mp),
            Position::Illegal | Position::Goal => None,
        }
    }
}

impl From<MazePoint> for Position {
    fn from(mp: MazePoint) -> Self {
        Position::At(mp)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::At(mp) => write!(f, "{:>2}", mp.label()),
            Position::Illegal => f.write_str("XX"),
            Position::Goal => f.write_str("GG"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels_ascending_and_unique() {
        let labels: Vec<u8> = MazePoint::ALL.iter().map(|mp| mp.label()).collect();
        assert_eq!(
            labels,
            vec![1, 2, 5, 7, 9, 15, 25, 26, 35, 40, 50, 55, 60, 61, 65, 75]
        );
        for (i, mp) in MazePoint::ALL.iter().enumerate() {
            assert_eq!(mp.ordinal(), i);
            assert_eq!(MazePoint::from_ordinal(i), *mp);
            assert_eq!(MazePoint::from_label(mp.label()), Some(*mp));
        }
    }

    #[test]
    fn test_unknown_label_rejected() {
        assert_eq!(MazePoint::from_label(3), None);
        assert_eq!(MazePoint::try_from(100u8), Err(UnknownMazePoint(100)));
        assert_eq!(
            UnknownMazePoint(42).to_string(),
            "no box numbered 42 in the maze"
        );
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_from_ordinal_out_of_range() {
        MazePoint::from_ordinal(MAZE_POINT_COUNT);
    }

    #[test]
    fn test_number_predicates() {
        assert!(MazePoint::B75.is_odd());
        assert!(!MazePoint::B26.is_odd());
        assert!(MazePoint::B55.is_multiple_of_five());
        assert!(!MazePoint::B61.is_multiple_of_five());
    }

    #[test]
    fn test_position_display() {
        assert_eq!(Position::At(MazePoint::B7).to_string(), " 7");
        assert_eq!(Position::At(MazePoint::B61).to_string(), "61");
        assert_eq!(Position::Illegal.to_string(), "XX");
        assert_eq!(Position::Goal.to_string(), "GG");
    }

    #[test]
    fn test_maze_point_serializes_as_label() {
        assert_eq!(serde_json::to_string(&MazePoint::B35).unwrap(), "35");
        let mp: MazePoint = serde_json::from_str("61").unwrap();
        assert_eq!(mp, MazePoint::B61);
        assert!(serde_json::from_str::<MazePoint>("3").is_err());
    }
}
