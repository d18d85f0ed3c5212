use {crate::*, strum::EnumIter};

/// One of the three hand shapes, worth 1, 2, or 3 points when played
#[derive(Clone, Copy, EnumIter)]
#[cfg_attr(test, derive(Debug, PartialEq))]
enum Choice {
    Rock,
    Paper,
    Scissors,
}

impl Choice {
    fn try_from_letter(letter: char) -> Option<Self> {
        match letter {
            'A' | 'X' => Some(Self::Rock),
            'B' | 'Y' => Some(Self::Paper),
            'C' | 'Z' => Some(Self::Scissors),
            _ => None,
        }
    }

    const fn points(self) -> u32 {
        match self {
            Self::Rock => 1_u32,
            Self::Paper => 2_u32,
            Self::Scissors => 3_u32,
        }
    }

    /// The choice that `self` defeats
    const fn beats(self) -> Self {
        match self {
            Self::Rock => Self::Scissors,
            Self::Paper => Self::Rock,
            Self::Scissors => Self::Paper,
        }
    }

    /// The choice that defeats `self`
    const fn beaten_by(self) -> Self {
        match self {
            Self::Rock => Self::Paper,
            Self::Paper => Self::Scissors,
            Self::Scissors => Self::Rock,
        }
    }

    const fn outcome_against(self, opponent: Self) -> Outcome {
        match (self, opponent) {
            (Self::Rock, Self::Scissors)
            | (Self::Paper, Self::Rock)
            | (Self::Scissors, Self::Paper) => Outcome::Win,
            (Self::Rock, Self::Rock)
            | (Self::Paper, Self::Paper)
            | (Self::Scissors, Self::Scissors) => Outcome::Draw,
            (Self::Rock, Self::Paper)
            | (Self::Paper, Self::Scissors)
            | (Self::Scissors, Self::Rock) => Outcome::Loss,
        }
    }

    /// The unique choice that produces `outcome` when played against `opponent`
    const fn for_outcome_against(opponent: Self, outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => opponent.beaten_by(),
            Outcome::Draw => opponent,
            Outcome::Loss => opponent.beats(),
        }
    }
}

/// The result of a round, worth 0, 3, or 6 points
#[derive(Clone, Copy, EnumIter)]
#[cfg_attr(test, derive(Debug, PartialEq))]
enum Outcome {
    Loss,
    Draw,
    Win,
}

impl Outcome {
    const fn points(self) -> u32 {
        match self {
            Self::Loss => 0_u32,
            Self::Draw => 3_u32,
            Self::Win => 6_u32,
        }
    }
}

/// The second letter of a guide entry, before a meaning has been assigned to it
///
/// Whether a response letter names a choice or a desired outcome is decided per scoring variant,
/// so entries store the validated letter itself.
#[derive(Clone, Copy)]
#[cfg_attr(test, derive(Debug, PartialEq))]
enum ResponseLetter {
    X,
    Y,
    Z,
}

impl ResponseLetter {
    fn try_from_letter(letter: char) -> Option<Self> {
        match letter {
            'X' => Some(Self::X),
            'Y' => Some(Self::Y),
            'Z' => Some(Self::Z),
            _ => None,
        }
    }

    const fn as_choice(self) -> Choice {
        match self {
            Self::X => Choice::Rock,
            Self::Y => Choice::Paper,
            Self::Z => Choice::Scissors,
        }
    }

    const fn as_outcome(self) -> Outcome {
        match self {
            Self::X => Outcome::Loss,
            Self::Y => Outcome::Draw,
            Self::Z => Outcome::Win,
        }
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct Round {
    opponent: Choice,
    own: Choice,
}

impl Round {
    fn score(&self) -> u32 {
        self.own.outcome_against(self.opponent).points() + self.own.points()
    }
}

/// A possible error encountered while parsing a guide entry from a string slice
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
enum GuideEntryParseError {
    /// The line was empty
    MissingOpponentLetter,

    /// The first letter does not name a choice
    #[allow(dead_code)]
    InvalidOpponentLetter(char),

    /// The character after the first letter was not a space
    MissingSeparatingSpace,

    /// The line ended before a response letter
    MissingResponseLetter,

    /// The second letter is not one of `X`, `Y`, or `Z`
    #[allow(dead_code)]
    InvalidResponseLetter(char),

    /// There was an extra character after the response letter
    FoundExtraCharacter,
}

/// One line of the strategy guide: the opponent's choice and the coded response
#[cfg_attr(test, derive(Debug, PartialEq))]
struct GuideEntry {
    opponent: Choice,
    response: ResponseLetter,
}

impl TryFrom<&str> for GuideEntry {
    type Error = GuideEntryParseError;

    /// Tries to parse a `letter, space, letter` guide line
    fn try_from(guide_entry_str: &str) -> Result<Self, Self::Error> {
        use GuideEntryParseError as Error;

        let mut guide_entry_char_iter = guide_entry_str.chars();

        let opponent_letter: char = guide_entry_char_iter
            .next()
            .ok_or(Error::MissingOpponentLetter)?;
        let opponent: Choice = Choice::try_from_letter(opponent_letter)
            .ok_or(Error::InvalidOpponentLetter(opponent_letter))?;

        if guide_entry_char_iter.next() != Some(' ') {
            return Err(Error::MissingSeparatingSpace);
        }

        let response_letter: char = guide_entry_char_iter
            .next()
            .ok_or(Error::MissingResponseLetter)?;
        let response: ResponseLetter = ResponseLetter::try_from_letter(response_letter)
            .ok_or(Error::InvalidResponseLetter(response_letter))?;

        if guide_entry_char_iter.next().is_some() {
            Err(Error::FoundExtraCharacter)
        } else {
            Ok(Self { opponent, response })
        }
    }
}

/// A guide entry failed to parse, invalidating the whole guide
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct StrategyGuideParseError<'i> {
    #[allow(dead_code)]
    guide_entry_str: &'i str,
    #[allow(dead_code)]
    error: GuideEntryParseError,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<GuideEntry>);

impl Solution {
    /// The round a guide entry describes when the response letter names the choice to play
    fn direct_choice_round(guide_entry: &GuideEntry) -> Round {
        Round {
            opponent: guide_entry.opponent,
            own: guide_entry.response.as_choice(),
        }
    }

    /// The round a guide entry describes when the response letter names the outcome to arrange
    fn desired_outcome_round(guide_entry: &GuideEntry) -> Round {
        let opponent: Choice = guide_entry.opponent;

        Round {
            opponent,
            own: Choice::for_outcome_against(opponent, guide_entry.response.as_outcome()),
        }
    }

    /// Sums round scores, with `interpret` deciding what round a guide entry describes
    ///
    /// The interpretation only affects how rounds are constructed, never how they are scored.
    fn score_with<F: Fn(&GuideEntry) -> Round>(&self, interpret: F) -> u32 {
        self.0
            .iter()
            .map(|guide_entry: &GuideEntry| -> u32 { interpret(guide_entry).score() })
            .sum()
    }

    fn direct_choice_score(&self) -> u32 {
        self.score_with(Self::direct_choice_round)
    }

    fn desired_outcome_score(&self) -> u32 {
        self.score_with(Self::desired_outcome_round)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, args: &QuestionArgs) {
        if args.verbose {
            dbg!(self
                .0
                .iter()
                .map(Self::direct_choice_round)
                .map(|round: Round| -> u32 { round.score() })
                .collect::<Vec<u32>>());
        }

        dbg!(self.direct_choice_score());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.desired_outcome_score());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = StrategyGuideParseError<'i>;

    /// Tries to parse a strategy guide, one entry per non-blank line
    ///
    /// # Errors
    ///
    /// The first malformed entry fails the whole parse; the returned error carries the offending
    /// line and the defect found in it.
    fn try_from(strategy_guide_str: &'i str) -> Result<Self, Self::Error> {
        iter_trimmed_non_empty_lines(strategy_guide_str)
            .map(|guide_entry_str: &'i str| -> Result<GuideEntry, Self::Error> {
                guide_entry_str
                    .try_into()
                    .map_err(|error: GuideEntryParseError| StrategyGuideParseError {
                        guide_entry_str,
                        error,
                    })
            })
            .collect::<Result<Vec<GuideEntry>, Self::Error>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::sync::OnceLock, strum::IntoEnumIterator};

    const SOLUTION_STRS: &'static [&'static str] = &["A Y\nB X\nC Z\n"];

    fn solution(index: usize) -> &'static Solution {
        static ONCE_LOCK: OnceLock<Vec<Solution>> = OnceLock::new();

        &ONCE_LOCK.get_or_init(|| {
            vec![Solution(vec![
                GuideEntry {
                    opponent: Choice::Rock,
                    response: ResponseLetter::Y,
                },
                GuideEntry {
                    opponent: Choice::Paper,
                    response: ResponseLetter::X,
                },
                GuideEntry {
                    opponent: Choice::Scissors,
                    response: ResponseLetter::Z,
                },
            ])]
        })[index]
    }

    #[test]
    fn test_try_from_str() {
        for (index, solution_str) in SOLUTION_STRS.iter().copied().enumerate() {
            assert_eq!(
                Solution::try_from(solution_str).as_ref(),
                Ok(solution(index))
            );
        }
    }

    #[test]
    fn test_try_from_str_rejects_malformed_entries() {
        use GuideEntryParseError as Error;

        for (strategy_guide_str, guide_entry_str, error) in [
            ("A Y\nD X\n", "D X", Error::InvalidOpponentLetter('D')),
            ("A Y\nB A\n", "B A", Error::InvalidResponseLetter('A')),
            ("A-Y\n", "A-Y", Error::MissingSeparatingSpace),
            ("A\n", "A", Error::MissingSeparatingSpace),
            ("A \n", "A", Error::MissingSeparatingSpace),
            ("A YZ\n", "A YZ", Error::FoundExtraCharacter),
        ] {
            assert_eq!(
                Solution::try_from(strategy_guide_str),
                Err(StrategyGuideParseError {
                    guide_entry_str,
                    error
                })
            );
        }

        assert_eq!(
            GuideEntry::try_from(""),
            Err(Error::MissingOpponentLetter)
        );
        assert_eq!(
            GuideEntry::try_from("A "),
            Err(Error::MissingResponseLetter)
        );
    }

    #[test]
    fn test_outcome_against() {
        for choice in Choice::iter() {
            assert_eq!(choice.outcome_against(choice), Outcome::Draw);
            assert_eq!(choice.outcome_against(choice.beats()), Outcome::Win);
            assert_eq!(choice.beats().outcome_against(choice), Outcome::Loss);
        }
    }

    #[test]
    fn test_for_outcome_against() {
        for opponent in Choice::iter() {
            for outcome in Outcome::iter() {
                assert_eq!(
                    Choice::for_outcome_against(opponent, outcome).outcome_against(opponent),
                    outcome
                );
            }
        }
    }

    #[test]
    fn test_points() {
        assert_eq!(Choice::Rock.points(), 1_u32);
        assert_eq!(Choice::Paper.points(), 2_u32);
        assert_eq!(Choice::Scissors.points(), 3_u32);
        assert_eq!(Outcome::Loss.points(), 0_u32);
        assert_eq!(Outcome::Draw.points(), 3_u32);
        assert_eq!(Outcome::Win.points(), 6_u32);
    }

    #[test]
    fn test_direct_choice_score() {
        for (index, direct_choice_score) in [15_u32].into_iter().enumerate() {
            assert_eq!(solution(index).direct_choice_score(), direct_choice_score);
        }
    }

    #[test]
    fn test_desired_outcome_score() {
        for (index, desired_outcome_score) in [12_u32].into_iter().enumerate() {
            assert_eq!(
                solution(index).desired_outcome_score(),
                desired_outcome_score
            );
        }
    }
}
