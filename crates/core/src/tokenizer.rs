use std::collections::BTreeMap;

const BYTE_ORDER_MARK: char = '\u{FEFF}';

/// Word separator: Unicode whitespace plus the byte order mark, which PDF
/// text extraction often leaves between words.
pub fn is_separator(ch: char) -> bool {
    ch.is_whitespace() || ch == BYTE_ORDER_MARK
}

/// Splits on separator runs, discarding empty words.
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(is_separator).filter(|word| !word.is_empty())
}

/// Lowercases `text`, drops everything except ASCII letters, digits and
/// separators, then splits on separator runs.
pub fn tokenize(text: &str) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || is_separator(*ch))
        .collect();

    split_words(&cleaned).map(str::to_string).collect()
}

pub fn term_counts(terms: &[String]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for term in terms {
        *counts.entry(term.clone()).or_insert(0) += 1;
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::{split_words, term_counts, tokenize};

    #[test]
    fn punctuation_is_removed_and_case_folded() {
        let terms = tokenize("Hello, World! It's 2024.");
        assert_eq!(terms, vec!["hello", "world", "its", "2024"]);
    }

    #[test]
    fn blank_input_has_no_terms() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" \t\n ").is_empty());
        assert!(tokenize("?!—").is_empty());
    }

    #[test]
    fn non_ascii_letters_are_dropped_inside_words() {
        assert_eq!(tokenize("café naïve"), vec!["caf", "nave"]);
    }

    #[test]
    fn tokenizing_joined_terms_is_stable() {
        let original = "The  quick-brown FOX, jumped (over) 3 dogs.";
        let first = tokenize(original);
        let second = tokenize(&first.join(" "));
        assert_eq!(first, second);
    }

    #[test]
    fn byte_order_mark_separates_words() {
        assert_eq!(tokenize("a\u{FEFF}b"), vec!["a", "b"]);
        assert_eq!(tokenize("\u{FEFF}Intro\u{a0}Text"), vec!["intro", "text"]);
    }

    #[test]
    fn counts_keep_repetitions() {
        let counts = term_counts(&tokenize("the cat sat on the mat"));
        assert_eq!(counts.get("the"), Some(&2));
        assert_eq!(counts.get("cat"), Some(&1));
        assert_eq!(counts.len(), 5);
    }

    #[test]
    fn split_words_drops_empty_runs() {
        let words: Vec<_> = split_words(" one\u{FEFF}\u{FEFF}two \n three ").collect();
        assert_eq!(words, vec!["one", "two", "three"]);
    }
}
