//! The sixteen box rules and their evaluation.
//!
//! Every box asks a question, almost always about the box the other pencil
//! points to, and is left through its Yes or its No exit. Evaluating the
//! rule for a chosen pencil yields the state after that pencil has moved.
//!
//! A few boxes bend the rules:
//! - 60 switches on a rule that makes every red-text box exit on Yes;
//!   65 switches it off again. The switch lives on the [`State`].
//! - 26 asks whether the other pencil would exit on No, which means
//!   evaluating the other pencil's box first. With both pencils on 26 that
//!   question has no answer and both pencils are dead, unless rule 60 lets
//!   the chosen pencil skip the question.
//! - 61 drags the other pencil along its own Yes exit.
//! - 55 is a free choice between Yes and LUGNUT.

use crate::maze::{MazePoint, Position};
use crate::state::{Pencil, State};

/// Which exit a box was left through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathKind {
    Yes,
    No,
    /// Yes and LUGNUT both taken (box 55)
    Lugnut,
    /// No exit at all (deadly embrace)
    None,
}

/// The question printed in a box
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Question {
    /// Does the other pencil point to a box with red text or green text?
    OtherHasRedOrGreenText,
    /// Does the other pencil point to a box with green text or the word "green"?
    OtherHasGreenTextOrGreenWord,
    /// Does the other pencil point to text with the word "red" or "green"?
    OtherHasRedOrGreenWord,
    /// Is the other pencil in a box with an odd number?
    OtherIsOdd,
    /// On the last turn, did you move the other pencil?
    OtherMovedLastTurn,
    /// Is the other pencil in a box whose number divides by 5?
    OtherIsMultipleOfFive,
    /// Had you chosen the other pencil, would it exit on No?
    OtherWouldExitNo,
    /// Does the other pencil point to text with the word "word"?
    OtherHasWordWord,
    /// Is the text in this box green? It is printed in red.
    OwnTextIsGreen,
    /// Does the other pencil point to text that refers to cows?
    OtherRefersToCows,
    /// Does the other pencil point to text beginning with "If"?
    OtherHasIfSentence,
    /// No question, exit on Yes
    Unconditional,
}

/// What happens besides the chosen pencil moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Switch on the red-text override
    ActivateRule60,
    /// Switch off the red-text override
    CancelRule60,
    /// Unless the override is on, the other pencil also takes its Yes exit
    MoveOtherOnYes,
    /// Free choice: Yes, or the LUGNUT exit to the given box
    Lugnut(MazePoint),
}

/// One box of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxRule {
    pub question: Question,
    pub yes: Position,
    /// `None` for boxes that only have a Yes exit
    pub no: Option<MazePoint>,
    pub effect: Effect,
}

impl BoxRule {
    const fn ask(question: Question, yes: MazePoint, no: MazePoint) -> Self {
        Self {
            question,
            yes: Position::At(yes),
            no: Some(no),
            effect: Effect::None,
        }
    }

    const fn exit(yes: MazePoint, effect: Effect) -> Self {
        Self {
            question: Question::Unconditional,
            yes: Position::At(yes),
            no: None,
            effect,
        }
    }
}

/// The rule printed in box `mp`
pub fn rule_for(mp: MazePoint) -> BoxRule {
    use MazePoint::*;
    use Question::*;
    match mp {
        B1 => BoxRule::ask(OtherHasRedOrGreenText, B2, B9),
        B2 => BoxRule::ask(OtherHasGreenTextOrGreenWord, B7, B15),
        B5 => BoxRule::ask(OtherHasRedOrGreenWord, B25, B2),
        B7 => BoxRule::ask(OtherIsOdd, B26, B5),
        B9 => BoxRule::ask(OtherMovedLastTurn, B2, B35),
        B15 => BoxRule::ask(OtherIsMultipleOfFive, B5, B40),
        B25 => BoxRule::ask(OtherHasRedOrGreenText, B7, B50),
        B26 => BoxRule::ask(OtherWouldExitNo, B61, B55),
        B35 => BoxRule::ask(OtherHasWordWord, B40, B1),
        B40 => BoxRule::ask(OwnTextIsGreen, B65, B60),
        B50 => BoxRule {
            question: OtherRefersToCows,
            yes: Position::Goal,
            no: Some(B26),
            effect: Effect::None,
        },
        B55 => BoxRule::exit(B15, Effect::Lugnut(B7)),
        B60 => BoxRule::exit(B25, Effect::ActivateRule60),
        B61 => BoxRule::exit(B1, Effect::MoveOtherOnYes),
        B65 => BoxRule::exit(B75, Effect::CancelRule60),
        B75 => BoxRule::ask(OtherHasIfSentence, B1, B50),
    }
}

/// Where the Yes exit of box `mp` leads
pub fn yes_target(mp: MazePoint) -> Position {
    rule_for(mp).yes
}

/// Result of following the rule under one pencil
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleOutcome {
    pub next: State,
    /// Second successor, only for the LUGNUT choice
    pub alt: Option<State>,
    pub path: PathKind,
}

/// How the two ambiguous corners of the maze are read
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rulebook {
    /// The reading behind the reference run. With rule 60 on, box 26 exits
    /// Yes before the other pencil is looked at, so two pencils on 26 only
    /// deadlock without it. The LUGNUT successor is the Yes successor with
    /// the chosen pencil put on 7, movement flag still set.
    #[default]
    Standard,
    /// Two pencils on 26 deadlock whatever rule 60 says, and the LUGNUT
    /// successor records no movement at all.
    Strict,
}

/// Follow the rule in the box under `chosen` with the [`Rulebook::Standard`]
/// reading.
pub fn evaluate(current: &State, chosen: Pencil) -> RuleOutcome {
    evaluate_with(current, chosen, Rulebook::Standard)
}

/// Follow the rule in the box under `chosen`.
///
/// The successor starts as a copy of `current` with both movement flags
/// cleared; the chosen pencil's flag is set when it moves (and the other's
/// when box 61 drags it along). Panics if `current` is terminal.
pub fn evaluate_with(current: &State, chosen: Pencil, rulebook: Rulebook) -> RuleOutcome {
    if current.is_terminal() {
        panic!("rules::evaluate(): not a normal current state {}", current);
    }
    let other = chosen.other();
    let here = current.maze_point(chosen);
    let there = current.maze_point(other);
    let overridden = current.rule60_active && here.is_red_text();

    let mut next = *current;
    next.moved = [false, false];

    let embraced = here == MazePoint::B26 && there == MazePoint::B26;
    if embraced && (rulebook == Rulebook::Strict || !overridden) {
        // deadly embrace
        next.set_position(chosen, Position::Illegal);
        next.set_position(other, Position::Illegal);
        return RuleOutcome {
            next,
            alt: None,
            path: PathKind::None,
        };
    }

    let rule = rule_for(here);
    let take_yes = overridden || answer(rule.question, current, other, rulebook);

    let (target, path) = match (take_yes, rule.no) {
        (true, _) | (false, None) => (rule.yes, PathKind::Yes),
        (false, Some(no)) => (Position::At(no), PathKind::No),
    };
    next.set_position(chosen, target);
    next.set_moved(chosen, true);

    match rule.effect {
        Effect::None => {}
        Effect::ActivateRule60 => next.rule60_active = true,
        Effect::CancelRule60 => next.rule60_active = false,
        Effect::MoveOtherOnYes => {
            if !overridden {
                next.set_position(other, yes_target(there));
                next.set_moved(other, true);
            }
        }
        Effect::Lugnut(lugnut) => {
            let mut alt = next;
            if rulebook == Rulebook::Strict {
                alt.moved = [false, false];
            }
            alt.set_position(chosen, lugnut);
            return RuleOutcome {
                next,
                alt: Some(alt),
                path: PathKind::Lugnut,
            };
        }
    }

    RuleOutcome {
        next,
        alt: None,
        path,
    }
}

/// Does `question` come out Yes in `current`? `other` is the pencil the
/// question is about.
fn answer(question: Question, current: &State, other: Pencil, rulebook: Rulebook) -> bool {
    let there = current.maze_point(other);
    match question {
        Question::OtherHasRedOrGreenText => there.has_red_or_green_text(),
        Question::OtherHasGreenTextOrGreenWord => there.has_green_text_or_green_word(),
        Question::OtherHasRedOrGreenWord => there.has_red_word_or_green_word(),
        Question::OtherIsOdd => there.is_odd(),
        Question::OtherMovedLastTurn => current.moved(other),
        Question::OtherIsMultipleOfFive => there.is_multiple_of_five(),
        // `other` is not on 26 here, so this recursion is one level deep
        Question::OtherWouldExitNo => {
            evaluate_with(current, other, rulebook).path == PathKind::No
        }
        Question::OtherHasWordWord => there.has_word_word(),
        Question::OwnTextIsGreen => false,
        Question::OtherRefersToCows => there.refers_to_cows(),
        Question::OtherHasIfSentence => there.has_if_sentence(),
        Question::Unconditional => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use MazePoint::*;

    fn state(pencil0: MazePoint, pencil1: MazePoint, rule60: bool) -> State {
        let mut s = State::new(pencil0, pencil1);
        s.rule60_active = rule60;
        s
    }

    fn first(s: &State) -> RuleOutcome {
        evaluate(s, Pencil::First)
    }

    #[test]
    fn test_box_1_branches() {
        let yes = first(&state(B1, B7, false));
        assert_eq!(yes.path, PathKind::Yes);
        assert_eq!(yes.next.to_string(), "(m., 2, 7, )");

        let no = first(&state(B1, B35, false));
        assert_eq!(no.path, PathKind::No);
        assert_eq!(no.next.to_string(), "(m., 9,35, )");
    }

    #[test]
    fn test_box_25_rule60_forces_yes() {
        for other in MazePoint::ALL {
            let outcome = first(&state(B25, other, true));
            assert_eq!(outcome.path, PathKind::Yes);
            assert_eq!(outcome.next.position(Pencil::First), Position::At(B7));
        }
    }

    #[test]
    fn test_box_25_without_rule60() {
        let yes = first(&state(B25, B50, false));
        assert_eq!(yes.path, PathKind::Yes);
        assert_eq!(yes.next.position(Pencil::First), Position::At(B7));

        let no = first(&state(B25, B1, false));
        assert_eq!(no.path, PathKind::No);
        assert_eq!(no.next.position(Pencil::First), Position::At(B50));
    }

    #[test]
    fn test_box_26_deadly_embrace() {
        let s = state(B26, B26, false);
        for pencil in Pencil::BOTH {
            let outcome = evaluate(&s, pencil);
            assert_eq!(outcome.path, PathKind::None);
            assert!(outcome.alt.is_none());
            assert_eq!(outcome.next.pencils, [Position::Illegal, Position::Illegal]);
            assert_eq!(outcome.next.moved, [false, false]);
            assert!(!outcome.next.rule60_active);
        }
    }

    #[test]
    fn test_box_26_rule60_escapes_embrace() {
        let s = state(B26, B26, true);
        let outcome = first(&s);
        assert_eq!(outcome.path, PathKind::Yes);
        assert_eq!(outcome.next.to_string(), "(m.,61,26,*)");
        assert_eq!(
            evaluate(&s, Pencil::Second).next.to_string(),
            "(.m,26,61,*)"
        );
    }

    #[test]
    fn test_strict_box_26_embrace_ignores_rule60() {
        for rule60 in [false, true] {
            let s = state(B26, B26, rule60);
            for pencil in Pencil::BOTH {
                let outcome = evaluate_with(&s, pencil, Rulebook::Strict);
                assert_eq!(outcome.path, PathKind::None);
                assert_eq!(outcome.next.pencils, [Position::Illegal, Position::Illegal]);
                assert_eq!(outcome.next.rule60_active, rule60);
            }
        }
    }

    #[test]
    fn test_box_26_asks_about_other_pencil() {
        // pencil 1 on 7 next to 26 (even) would exit No, so 26 exits Yes
        let yes = first(&state(B26, B7, false));
        assert_eq!(evaluate(&state(B26, B7, false), Pencil::Second).path, PathKind::No);
        assert_eq!(yes.path, PathKind::Yes);
        assert_eq!(yes.next.position(Pencil::First), Position::At(B61));

        // pencil 1 on 60 has no No exit, so 26 exits No
        let no = first(&state(B26, B60, false));
        assert_eq!(no.path, PathKind::No);
        assert_eq!(no.next.position(Pencil::First), Position::At(B55));
    }

    #[test]
    fn test_box_26_rule60_ignores_question() {
        let outcome = first(&state(B26, B60, true));
        assert_eq!(outcome.path, PathKind::Yes);
        assert_eq!(outcome.next.position(Pencil::First), Position::At(B61));
    }

    #[test]
    fn test_box_55_lugnut() {
        for other in MazePoint::ALL {
            let outcome = first(&state(B55, other, false));
            assert_eq!(outcome.path, PathKind::Lugnut);
            let alt = outcome.alt.expect("box 55 has an alternate exit");
            assert_eq!(outcome.next.position(Pencil::First), Position::At(B15));
            assert_eq!(alt.position(Pencil::First), Position::At(B7));
            assert_ne!(outcome.next, alt);
            assert_eq!(outcome.next.moved, [true, false]);
            assert_eq!(alt.moved, [true, false]);
        }
        let alt = evaluate(&state(B1, B55, false), Pencil::Second).alt;
        assert_eq!(alt.map(|s| s.to_string()), Some("(.m, 1, 7, )".to_string()));
    }

    #[test]
    fn test_strict_box_55_lugnut_clears_movement() {
        let outcome = evaluate_with(&state(B55, B1, false), Pencil::First, Rulebook::Strict);
        assert_eq!(outcome.next.moved, [true, false]);
        let alt = outcome.alt.expect("box 55 has an alternate exit");
        assert_eq!(alt.to_string(), "(.., 7, 1, )");
    }

    #[test]
    fn test_rulebooks_differ_only_on_26_and_55() {
        for s in State::enumerate() {
            for pencil in Pencil::BOTH {
                let standard = evaluate_with(&s, pencil, Rulebook::Standard);
                let strict = evaluate_with(&s, pencil, Rulebook::Strict);
                let both_26 = s.maze_point(pencil) == B26 && s.maze_point(pencil.other()) == B26;
                let on_55 = s.maze_point(pencil) == B55;
                if (both_26 && s.rule60_active) || on_55 {
                    assert_ne!(standard, strict, "{} under {:?}", s, pencil);
                } else {
                    assert_eq!(standard, strict, "{} under {:?}", s, pencil);
                }
            }
        }
    }

    #[test]
    fn test_box_60_and_65_toggle_rule60() {
        let on = first(&state(B60, B1, false));
        assert_eq!(on.next.to_string(), "(m.,25, 1,*)");

        let off = first(&state(B65, B1, true));
        assert_eq!(off.next.to_string(), "(m.,75, 1, )");
    }

    #[test]
    fn test_box_61_drags_other_pencil() {
        let outcome = evaluate(&state(B2, B61, false), Pencil::Second);
        assert_eq!(outcome.next.to_string(), "(mm, 7, 1, )");

        let to_goal = first(&state(B61, B50, false));
        assert_eq!(to_goal.next.position(Pencil::Second), Position::Goal);
        assert!(to_goal.next.is_goal());
    }

    #[test]
    fn test_box_61_rule60_moves_only_chosen() {
        let outcome = evaluate(&state(B2, B61, true), Pencil::Second);
        assert_eq!(outcome.next.to_string(), "(.m, 2, 1,*)");
    }

    #[test]
    fn test_box_9_checks_other_movement() {
        let mut s = state(B9, B1, false);
        assert_eq!(first(&s).next.position(Pencil::First), Position::At(B35));
        s.set_moved(Pencil::Second, true);
        assert_eq!(first(&s).next.position(Pencil::First), Position::At(B2));
    }

    #[test]
    fn test_box_40_and_50() {
        assert_eq!(first(&state(B40, B1, false)).path, PathKind::No);
        assert_eq!(first(&state(B40, B1, true)).path, PathKind::Yes);

        let goal = first(&state(B50, B50, false));
        assert_eq!(goal.next.to_string(), "(m.,GG,50, )");
        let no = first(&state(B50, B75, false));
        assert_eq!(no.next.position(Pencil::First), Position::At(B26));
    }

    #[test]
    fn test_exactly_one_pencil_moves() {
        for s in State::enumerate() {
            for pencil in Pencil::BOTH {
                let outcome = evaluate(&s, pencil);
                if outcome.path == PathKind::None {
                    continue;
                }
                let dragged = rule_for(s.maze_point(pencil)).effect == Effect::MoveOtherOnYes
                    && !s.rule60_active;
                assert!(outcome.next.moved(pencil));
                assert_eq!(outcome.next.moved(pencil.other()), dragged);
            }
        }
    }

    #[test]
    fn test_yes_targets() {
        assert_eq!(yes_target(B1), Position::At(B2));
        assert_eq!(yes_target(B26), Position::At(B61));
        assert_eq!(yes_target(B50), Position::Goal);
        assert_eq!(yes_target(B75), Position::At(B1));
    }

    #[test]
    #[should_panic(expected = "not a normal current state")]
    fn test_terminal_state_rejected() {
        let mut s = State::start();
        s.set_position(Pencil::Second, Position::Goal);
        evaluate(&s, Pencil::First);
    }
}
