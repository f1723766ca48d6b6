//! Science scorer — keyword frequency over a fixed vocabulary.
//!
//! Four categories of three phrases each. A category's score is the
//! fraction of its phrases that appear (case-insensitive substring) in the
//! text. Category order is fixed so rendering is deterministic.

/// The vocabulary: `(category, phrases)`.
const PRINCIPLES: &[(&str, [&str; 3])] = &[
    ("quantum", ["superposition", "entanglement", "uncertainty"]),
    ("thermo", ["entropy", "energy conservation", "heat transfer"]),
    ("relativity", ["time dilation", "mass-energy", "gravity"]),
    ("biology", ["evolution", "adaptation", "homeostasis"]),
];

/// Score `text` against every category. Always returns all four categories,
/// in vocabulary order, scores in `0.0..=1.0`.
pub fn score(text: &str) -> Vec<(&'static str, f32)> {
    let haystack = text.to_lowercase();
    PRINCIPLES
        .iter()
        .map(|(category, phrases)| {
            let hits = phrases.iter().filter(|p| haystack.contains(**p)).count();
            (*category, hits as f32 / phrases.len() as f32)
        })
        .collect()
}

/// Lexical complexity: distinct whitespace-separated words over total
/// words. Empty or whitespace-only text scores 0.0.
pub fn complexity(text: &str) -> f32 {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return 0.0;
    }
    let distinct: std::collections::HashSet<&str> = words.iter().copied().collect();
    distinct.len() as f32 / words.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_categories_always_present() {
        let scores = score("nothing scientific here");
        assert_eq!(scores.len(), 4);
        let names: Vec<&str> = scores.iter().map(|(c, _)| *c).collect();
        assert_eq!(names, vec!["quantum", "thermo", "relativity", "biology"]);
        assert!(scores.iter().all(|(_, s)| *s == 0.0));
    }

    #[test]
    fn scores_are_fractions_of_phrase_hits() {
        let scores = score("Entanglement and superposition rule the quantum world.");
        let quantum = scores.iter().find(|(c, _)| *c == "quantum").unwrap().1;
        assert!((quantum - 2.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let scores = score("GRAVITY bends light; Time Dilation follows.");
        let relativity = scores.iter().find(|(c, _)| *c == "relativity").unwrap().1;
        assert!((relativity - 2.0 / 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn multi_word_phrases_match_as_substrings() {
        let scores = score("energy conservation and heat transfer drive entropy");
        let thermo = scores.iter().find(|(c, _)| *c == "thermo").unwrap().1;
        assert_eq!(thermo, 1.0);
    }

    #[test]
    fn full_category_scores_one() {
        let scores = score("evolution, adaptation, homeostasis");
        let biology = scores.iter().find(|(c, _)| *c == "biology").unwrap().1;
        assert_eq!(biology, 1.0);
    }

    #[test]
    fn complexity_all_distinct_is_one() {
        assert_eq!(complexity("every word here differs"), 1.0);
    }

    #[test]
    fn complexity_counts_repeats() {
        // 2 distinct / 4 total
        assert_eq!(complexity("the the word word"), 0.5);
    }

    #[test]
    fn complexity_of_empty_text_is_zero() {
        assert_eq!(complexity(""), 0.0);
        assert_eq!(complexity("   \n\t "), 0.0);
    }
}
