//! Title and summary text cleaning.
//!
//! Titles come off the listing page percent-encoded, with underscores for
//! spaces and the odd typographic dash. They are cleaned twice: once into the
//! form stored in the dataset, once into the form sent to the API.

use unicode_general_category::{get_general_category, GeneralCategory};
use unicode_normalization::UnicodeNormalization;

const DASHES: [char; 3] = ['\u{2212}', '\u{2013}', '\u{2014}'];

/// Percent-decode a title, replacing invalid UTF-8 sequences instead of failing.
pub fn percent_decode(raw: &str) -> String {
    match urlencoding::decode(raw) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => {
            let bytes = urlencoding::decode_binary(raw.as_bytes());
            String::from_utf8_lossy(&bytes).into_owned()
        }
    }
}

fn clean(title: &str) -> String {
    title
        .chars()
        .map(|c| match c {
            c if DASHES.contains(&c) => '-',
            '_' => ' ',
            c => c,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Human readable title, as written to the dataset.
pub fn display_title(raw: &str) -> String {
    clean(&percent_decode(raw))
}

/// Title as the API expects it, before URL encoding.
pub fn query_title(raw: &str) -> String {
    clean(&percent_decode(raw))
}

/// Query title encoded for a path segment or query value. Everything except
/// ASCII alphanumerics and `-_.~` is escaped, slashes included.
pub fn encode_query_title(raw: &str) -> String {
    urlencoding::encode(&query_title(raw)).into_owned()
}

/// Strip diacritics from `text`. Returns `None` when more than
/// `max_non_ascii` non-ASCII characters survive the stripping.
///
/// Only nonspacing marks (Mn) are removed; spacing and enclosing marks stay
/// and count towards the limit.
pub fn normalize_text(text: &str, max_non_ascii: usize) -> Option<String> {
    let cleaned: String = text
        .nfd()
        .filter(|c| get_general_category(*c) != GeneralCategory::NonspacingMark)
        .collect();
    let non_ascii = cleaned.chars().filter(|c| !c.is_ascii()).count();

    if non_ascii > max_non_ascii {
        return None;
    }

    Some(cleaned)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}
