use crate::models::{ChunkDraft, IngestionOptions, Page, DEFAULT_WORDS_PER_CHUNK};
use crate::tokenizer::split_words;

pub fn normalize_whitespace(text: &str) -> String {
    split_words(text).collect::<Vec<_>>().join(" ")
}

/// Parses a user supplied chunk size. Missing, unparsable, zero or negative
/// values fall back to [`DEFAULT_WORDS_PER_CHUNK`].
pub fn resolve_words_per_chunk(raw: Option<&str>) -> usize {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|size| *size > 0)
        .and_then(|size| usize::try_from(size).ok())
        .unwrap_or(DEFAULT_WORDS_PER_CHUNK)
}

/// Groups the whitespace separated words of `text` into chunks of
/// `words_per_chunk` words; the last chunk may be shorter. Zero means the
/// default size.
pub fn split_to_chunks(text: &str, words_per_chunk: usize) -> Vec<String> {
    let size = if words_per_chunk == 0 {
        DEFAULT_WORDS_PER_CHUNK
    } else {
        words_per_chunk
    };

    let words: Vec<&str> = split_words(text).collect();
    words.chunks(size).map(|window| window.join(" ")).collect()
}

/// Chunks one page. `next_id` is the corpus-wide counter; ids are `c1`,
/// `c2`, ... and the advanced counter is returned.
pub fn build_page_chunks(
    source_name: &str,
    page: &Page,
    options: &IngestionOptions,
    next_id: u64,
) -> (Vec<ChunkDraft>, u64) {
    let normalized = normalize_whitespace(&page.text);
    if normalized.chars().count() < options.min_page_chars {
        return (Vec::new(), next_id);
    }

    let mut cursor = next_id;
    let chunks = split_to_chunks(&normalized, options.words_per_chunk)
        .into_iter()
        .map(|text| {
            cursor = cursor.saturating_add(1);
            ChunkDraft {
                id: format!("c{cursor}"),
                text,
                source_name: source_name.to_string(),
                page_number: page.number,
            }
        })
        .collect();

    (chunks, cursor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(number: u32, text: &str) -> Page {
        Page {
            number,
            text: text.to_string(),
        }
    }

    #[test]
    fn whitespace_is_normalized() {
        let input = "A  \t  lot\nof \u{a0}  spacing ";
        assert_eq!(normalize_whitespace(input), "A lot of spacing");
    }

    #[test]
    fn byte_order_mark_is_a_word_boundary() {
        assert_eq!(normalize_whitespace("\u{FEFF}alpha\u{FEFF}beta "), "alpha beta");
        assert_eq!(split_to_chunks("one\u{FEFF}two three", 2), vec!["one two", "three"]);
    }

    #[test]
    fn chunk_size_three_splits_five_words() {
        let chunks = split_to_chunks("one two three four five", 3);
        assert_eq!(chunks, vec!["one two three", "four five"]);
    }

    #[test]
    fn rejoined_chunks_reproduce_the_collapsed_words() {
        let text = "  alpha beta\n\ngamma\tdelta epsilon zeta eta theta iota ";
        let chunks = split_to_chunks(text, 4);

        assert_eq!(chunks.join(" "), normalize_whitespace(text));
        let (last, rest) = chunks.split_last().expect("text has words");
        assert!(rest.iter().all(|chunk| chunk.split(' ').count() == 4));
        assert!(last.split(' ').count() <= 4);
    }

    #[test]
    fn empty_text_has_no_chunks() {
        assert!(split_to_chunks("   ", 10).is_empty());
    }

    #[test]
    fn zero_size_uses_default() {
        let text = vec!["w"; 401].join(" ");
        let chunks = split_to_chunks(&text, 0);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1], "w");
    }

    #[test]
    fn chunk_size_falls_back_to_default() {
        assert_eq!(resolve_words_per_chunk(None), 400);
        assert_eq!(resolve_words_per_chunk(Some("")), 400);
        assert_eq!(resolve_words_per_chunk(Some("abc")), 400);
        assert_eq!(resolve_words_per_chunk(Some("0")), 400);
        assert_eq!(resolve_words_per_chunk(Some("-5")), 400);
        assert_eq!(resolve_words_per_chunk(Some(" 120 ")), 120);
    }

    #[test]
    fn short_pages_are_dropped() {
        let options = IngestionOptions::default();
        let (chunks, next) = build_page_chunks("a.pdf", &page(1, "too short"), &options, 7);
        assert!(chunks.is_empty());
        assert_eq!(next, 7);
    }

    #[test]
    fn page_chunks_carry_provenance_and_sequential_ids() {
        let options = IngestionOptions {
            words_per_chunk: 3,
            min_page_chars: 10,
        };
        let text = "one two three four five six seven";
        let (chunks, next) = build_page_chunks("notes.pdf", &page(4, text), &options, 2);

        assert_eq!(next, 5);
        let ids: Vec<_> = chunks.iter().map(|chunk| chunk.id.as_str()).collect();
        assert_eq!(ids, vec!["c3", "c4", "c5"]);
        assert!(chunks
            .iter()
            .all(|chunk| chunk.source_name == "notes.pdf" && chunk.page_number == 4));
        assert_eq!(chunks[2].text, "seven");
    }
}
