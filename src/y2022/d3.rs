use crate::*;

/// Rucksacks are grouped in threes; a trailing partial group carries no badge
const GROUP_SIZE: usize = 3_usize;

/// Sums the priorities recorded in an item set
///
/// An item set stores whether or not an item is present in the bit corresponding to the item's
/// priority, so the sum of the set bit indices is the sum of the priorities.
fn priority_sum(mut item_set: u64) -> u32 {
    let mut priority_sum: u32 = 0_u32;

    while item_set != 0_u64 {
        priority_sum += item_set.trailing_zeros();
        item_set &= item_set - 1_u64;
    }

    priority_sum
}

/// A possible error encountered while parsing a rucksack from a string slice
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
enum RucksackParseError {
    /// An item character has no priority
    #[allow(dead_code)]
    InvalidItem(char),

    /// The item count is odd, so the line cannot split into two equal compartments
    #[allow(dead_code)]
    OddItemCount(usize),
}

/// The items in one rucksack, one `u64` item set per compartment
#[cfg_attr(test, derive(Debug, PartialEq))]
struct Rucksack {
    first_compartment: u64,
    second_compartment: u64,
}

impl Rucksack {
    /// Tries to convert an item character into a priority
    ///
    /// Lowercase items map to priorities 1 through 26, and uppercase items map to priorities 27
    /// through 52. Any other character has no priority.
    fn try_item_to_priority(item: char) -> Option<u32> {
        const LOWERCASE_A_OFFSET: u32 = 'a' as u32 - 1_u32;
        const UPPERCASE_A_OFFSET: u32 = 'A' as u32 - 27_u32;

        if item.is_ascii_lowercase() {
            Some(item as u32 - LOWERCASE_A_OFFSET)
        } else if item.is_ascii_uppercase() {
            Some(item as u32 - UPPERCASE_A_OFFSET)
        } else {
            None
        }
    }

    /// Takes inventory of the items present in a sequence of already-validated item characters
    fn item_set(items: &str) -> u64 {
        let mut item_set: u64 = 0_u64;

        for item in items.chars() {
            if let Some(priority) = Self::try_item_to_priority(item) {
                item_set |= 1_u64 << priority;
            }
        }

        item_set
    }

    /// The summed priorities of every item present in both compartments
    ///
    /// The puzzle promises exactly one such item per rucksack, but nothing here depends on that:
    /// zero common items contribute nothing, and several all contribute.
    fn common_item_priority_sum(&self) -> u32 {
        priority_sum(self.first_compartment & self.second_compartment)
    }

    fn all_items(&self) -> u64 {
        self.first_compartment | self.second_compartment
    }
}

impl TryFrom<&str> for Rucksack {
    type Error = RucksackParseError;

    /// Tries to parse a line of item characters into a rucksack
    ///
    /// The first half of the characters is the first compartment, and vice versa with the second
    /// half and second compartment.
    ///
    /// # Errors
    ///
    /// A character without a priority, or a line whose item count cannot split into two equal
    /// compartments, is an error.
    fn try_from(rucksack_str: &str) -> Result<Self, Self::Error> {
        use RucksackParseError as Error;

        for item in rucksack_str.chars() {
            if Self::try_item_to_priority(item).is_none() {
                return Err(Error::InvalidItem(item));
            }
        }

        if rucksack_str.len() % 2_usize != 0_usize {
            return Err(Error::OddItemCount(rucksack_str.len()));
        }

        let midpoint: usize = rucksack_str.len() / 2_usize;

        Ok(Self {
            first_compartment: Self::item_set(&rucksack_str[..midpoint]),
            second_compartment: Self::item_set(&rucksack_str[midpoint..]),
        })
    }
}

/// A rucksack line failed to parse, invalidating the whole list
#[derive(Debug)]
#[cfg_attr(test, derive(PartialEq))]
pub struct RucksackListParseError<'i> {
    #[allow(dead_code)]
    rucksack_str: &'i str,
    #[allow(dead_code)]
    error: RucksackParseError,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Solution(Vec<Rucksack>);

impl Solution {
    /// Sums the priorities of the items present in both compartments of each rucksack
    fn arrangement_priority_sum(&self) -> u32 {
        self.0
            .iter()
            .map(Rucksack::common_item_priority_sum)
            .sum()
    }

    /// Sums the priorities of the badge items of each complete group of `GROUP_SIZE` rucksacks
    ///
    /// Badge items are the items present in all of a group's rucksacks, compartments merged. A
    /// trailing group of fewer than `GROUP_SIZE` rucksacks is ignored.
    fn group_badge_priority_sum(&self) -> u32 {
        self.0
            .chunks_exact(GROUP_SIZE)
            .map(|group: &[Rucksack]| -> u32 {
                priority_sum(
                    group
                        .iter()
                        .fold(u64::MAX, |badge_items, rucksack: &Rucksack| -> u64 {
                            badge_items & rucksack.all_items()
                        }),
                )
            })
            .sum()
    }
}

impl RunQuestions for Solution {
    fn q1_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.arrangement_priority_sum());
    }

    fn q2_internal(&mut self, _args: &QuestionArgs) {
        dbg!(self.group_badge_priority_sum());
    }
}

impl<'i> TryFrom<&'i str> for Solution {
    type Error = RucksackListParseError<'i>;

    /// Tries to parse a rucksack list, one rucksack per non-blank line
    ///
    /// # Errors
    ///
    /// The first malformed rucksack fails the whole parse; the returned error carries the
    /// offending line and the defect found in it.
    fn try_from(rucksack_list_str: &'i str) -> Result<Self, Self::Error> {
        iter_trimmed_non_empty_lines(rucksack_list_str)
            .map(|rucksack_str: &'i str| -> Result<Rucksack, Self::Error> {
                rucksack_str
                    .try_into()
                    .map_err(|error: RucksackParseError| RucksackListParseError {
                        rucksack_str,
                        error,
                    })
            })
            .collect::<Result<Vec<Rucksack>, Self::Error>>()
            .map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RUCKSACKS_STR: &str = concat!(
        "vJrwpWtwJgWrhcsFMMfFFhFp\n",
        "jqHRNqRjqzjGDLGLrsFMfFZSrLrFZsSL\n",
        "PmmdzqPrVvPwwTWBwg\n",
        "wMqvLMZHhHMvwLHjbvcjnnSBnvTQFn\n",
        "ttgJtRGJQctTZtZT\n",
        "CrZsJsPPZsGzwwsLwLmpwMDw",
    );

    #[test]
    fn test_try_item_to_priority() {
        assert_eq!(Rucksack::try_item_to_priority('a'), Some(1_u32));
        assert_eq!(Rucksack::try_item_to_priority('z'), Some(26_u32));
        assert_eq!(Rucksack::try_item_to_priority('A'), Some(27_u32));
        assert_eq!(Rucksack::try_item_to_priority('Z'), Some(52_u32));
        assert_eq!(Rucksack::try_item_to_priority('0'), None);
        assert_eq!(Rucksack::try_item_to_priority(' '), None);
        assert_eq!(Rucksack::try_item_to_priority('µ'), None);
    }

    #[test]
    fn test_item_priorities_are_distinct() {
        let priorities: Vec<u32> = ('a'..='z')
            .chain('A'..='Z')
            .map(|item| Rucksack::try_item_to_priority(item).unwrap())
            .collect();

        assert_eq!(priorities, (1_u32..=52_u32).collect::<Vec<u32>>());
    }

    #[test]
    fn test_try_from_str() {
        assert_eq!(
            Solution::try_from("abab\ncdcd"),
            Ok(Solution(vec![
                Rucksack {
                    first_compartment: 0b110_u64,
                    second_compartment: 0b110_u64,
                },
                Rucksack {
                    first_compartment: 0b11000_u64,
                    second_compartment: 0b11000_u64,
                },
            ]))
        );
    }

    #[test]
    fn test_try_from_str_rejects_malformed_rucksacks() {
        use RucksackParseError as Error;

        assert_eq!(
            Solution::try_from("abcd\nab1d\n"),
            Err(RucksackListParseError {
                rucksack_str: "ab1d",
                error: Error::InvalidItem('1'),
            })
        );
        assert_eq!(
            Solution::try_from("abc\n"),
            Err(RucksackListParseError {
                rucksack_str: "abc",
                error: Error::OddItemCount(3_usize),
            })
        );
    }

    #[test]
    fn test_arrangement_priority_sum() {
        assert_eq!(
            Solution::try_from(RUCKSACKS_STR)
                .unwrap()
                .arrangement_priority_sum(),
            157_u32
        );
    }

    #[test]
    fn test_arrangement_priority_sum_with_zero_or_multiple_common_items() {
        // "abcd" has no common item; "abab" has both 'a' and 'b' in common
        assert_eq!(
            Solution::try_from("abcd")
                .unwrap()
                .arrangement_priority_sum(),
            0_u32
        );
        assert_eq!(
            Solution::try_from("abab")
                .unwrap()
                .arrangement_priority_sum(),
            3_u32
        );
    }

    #[test]
    fn test_group_badge_priority_sum() {
        assert_eq!(
            Solution::try_from(RUCKSACKS_STR)
                .unwrap()
                .group_badge_priority_sum(),
            70_u32
        );
    }

    #[test]
    fn test_group_badge_priority_sum_ignores_trailing_partial_group() {
        let seven_rucksacks_str: String = format!("{}\n{}", RUCKSACKS_STR, "ttgJtRGJQctTZtZT");

        assert_eq!(
            Solution::try_from(seven_rucksacks_str.as_str())
                .unwrap()
                .group_badge_priority_sum(),
            70_u32
        );
        assert_eq!(
            Solution::try_from("abab\ncdcd")
                .unwrap()
                .group_badge_priority_sum(),
            0_u32
        );
    }
}
