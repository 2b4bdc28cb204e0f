use once_cell::sync::Lazy;
use regex::Regex;

/// Number of leading words kept in a file slug
pub const DEFAULT_SLUG_WORDS: usize = 5;

const FALLBACK_SLUG: &str = "phrase";

// `\w` is Unicode-aware, so umlauts, ß and Cyrillic survive.
static NON_WORD: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w\s]").expect("slug pattern is valid"));

/// Derive a filesystem-safe slug from the first `max_words` words of `text`.
///
/// Lowercases, strips punctuation, and joins the words with underscores.
pub fn slugify(text: &str, max_words: usize) -> String {
    let lowered = text.to_lowercase();
    let stripped = NON_WORD.replace_all(&lowered, "");

    let slug = stripped
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join("_");

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// File name for the clip at 1-based position `index` in a batch
pub fn clip_file_name(index: usize, slug: &str, extension: &str) -> String {
    format!("{:03}-{}.{}", index, slug, extension)
}
