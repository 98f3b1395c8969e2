//! Fuzzy filtering for the choice lists.
//!
//! A choice matches when the filter is a case-insensitive substring of it, or when
//! any word of the choice is close to the filter by Jaro-Winkler similarity.

use crate::node_display::CHILD_COUNT_GLYPH;

/// Minimum Jaro-Winkler similarity for a word to count as a match.
pub const SIMILARITY_THRESHOLD: f64 = 0.85;

/// Strips the trailing child count from a choice label.
fn name_part(choice: &str) -> &str {
    choice
        .rfind(CHILD_COUNT_GLYPH)
        .and_then(|glyph| choice[..glyph].rfind(" ("))
        .map(|open| &choice[..open])
        .unwrap_or(choice)
}

/// Checks whether `choice` should stay visible for `filter`.
pub fn matches_filter(filter: &str, choice: &str) -> bool {
    let filter = filter.trim().to_lowercase();
    if filter.is_empty() {
        return true;
    }

    let name = name_part(choice).to_lowercase();
    if name.contains(&filter) {
        return true;
    }

    name.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .any(|word| strsim::jaro_winkler(&filter, word) >= SIMILARITY_THRESHOLD)
}

/// Returns the indices of the choices matching `filter`, in their original order.
///
/// Indices refer to the unfiltered list so a selection can be mapped back to the
/// hierarchy position it came from.
pub fn filter_choices<S: AsRef<str>>(filter: &str, choices: &[S]) -> Vec<usize> {
    choices
        .iter()
        .enumerate()
        .filter(|(_, choice)| matches_filter(filter, choice.as_ref()))
        .map(|(index, _)| index)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CHOICES: [&str; 4] = [
        "Main Camera (\u{260B} 0)",
        "Sun (\u{260B} 0)",
        "Player_Body (\u{260B} 3)",
        "Spot Light (\u{260B} 1)",
    ];

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(filter_choices("", &CHOICES), vec![0, 1, 2, 3]);
        assert_eq!(filter_choices("   ", &CHOICES), vec![0, 1, 2, 3]);
    }

    #[test]
    fn substring_match_is_case_insensitive() {
        assert_eq!(filter_choices("CAM", &CHOICES), vec![0]);
        assert_eq!(filter_choices("body", &CHOICES), vec![2]);
    }

    #[test]
    fn typos_still_match_a_word() {
        assert!(matches_filter("camra", CHOICES[0]));
        assert!(matches_filter("playr", CHOICES[2]));
    }

    #[test]
    fn unrelated_filters_drop_choices() {
        assert!(filter_choices("zzz", &CHOICES).is_empty());
        assert!(!matches_filter("spot", CHOICES[1]));
    }

    #[test]
    fn child_count_is_not_matched() {
        // "3" only appears in the child count suffix.
        assert!(filter_choices("3", &CHOICES).is_empty());
    }

    #[test]
    fn plain_names_are_matched_whole() {
        assert_eq!(name_part("primary window"), "primary window");
        assert_eq!(name_part("Odd (name) (\u{260B} 2)"), "Odd (name)");
    }
}
