use {
    crate::*,
    nom::{
        character::complete::line_ending,
        combinator::{all_consuming, map},
        error::Error,
        multi::{many0, separated_list1},
        sequence::{terminated, tuple},
        Err, IResult,
    },
};

/// The calorie counts of the snacks carried by a single elf
#[cfg_attr(test, derive(Debug, PartialEq))]
struct ElfCalories(Vec<i32>);

impl ElfCalories {
    fn total(&self) -> i32 {
        self.0.iter().sum()
    }
}

impl Parse for ElfCalories {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(separated_list1(line_ending, parse_integer), Self)(input)
    }
}

/// Computing a top-elves calorie total requires at least one elf
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
struct NoElvesError;

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<ElfCalories>);

impl Solution {
    fn iter_calorie_totals(&self) -> impl Iterator<Item = i32> + '_ {
        self.0.iter().map(ElfCalories::total)
    }

    /// Sums the calorie totals of the `elf_count` best-supplied elves
    ///
    /// Ties are broken arbitrarily. If there are fewer than `elf_count` elves, all of them
    /// contribute; if there are none, there is no best-supplied elf to start from, and a
    /// `NoElvesError` is returned.
    fn calorie_total_of_top_elves(&self, elf_count: usize) -> Result<i32, NoElvesError> {
        if self.0.is_empty() {
            Err(NoElvesError)
        } else {
            let mut calorie_totals: Vec<i32> = self.iter_calorie_totals().collect();

            calorie_totals.sort_unstable();

            Ok(calorie_totals.into_iter().rev().take(elf_count).sum())
        }
    }

    fn max_calorie_total(&self) -> Result<i32, NoElvesError> {
        self.calorie_total_of_top_elves(1_usize)
    }

    fn calorie_total_of_top_3_elves(&self) -> Result<i32, NoElvesError> {
        self.calorie_total_of_top_elves(3_usize)
    }
}

impl Parse for Solution {
    fn parse<'i>(input: &'i str) -> IResult<&'i str, Self> {
        map(
            terminated(
                separated_list1(tuple((line_ending, line_ending)), ElfCalories::parse),
                many0(line_ending),
            ),
            Self,
        )(input)
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, args: &QuestionArgs) {
        if args.verbose {
            dbg!(self.iter_calorie_totals().collect::<Vec<i32>>());
        }

        match self.max_calorie_total() {
            Ok(max_calorie_total) => {
                dbg!(max_calorie_total);
            }
            Err(error) => eprintln!("Failed to compute the max calorie total: {error:?}"),
        }
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        match self.calorie_total_of_top_3_elves() {
            Ok(calorie_total_of_top_3_elves) => {
                dbg!(calorie_total_of_top_3_elves);
            }
            Err(error) => eprintln!("Failed to compute the top-3 calorie total: {error:?}"),
        }
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = Err<Error<&'i str>>;

    /// Tries to parse blank-line-delimited groups of calorie counts
    ///
    /// # Errors
    ///
    /// A line that is not an integer, or any other leftover input, fails the whole parse; the
    /// returned error carries the offending remainder.
    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(all_consuming(Self::parse)(input)?.1)
    }
}
