//! Publication row model as rendered on a Scholar profile page.

use serde::{Deserialize, Serialize};

/// One publication row extracted from the profile listing.
///
/// Every field is kept as the text the page rendered. Nothing is normalized
/// beyond the trimming the extractor applies to `authors` and `citation_count`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicationRecord {
    /// Title text of the row's title link (may be empty).
    #[serde(default)]
    pub title: String,

    /// Destination of the title link, relative or absolute (may be empty).
    #[serde(default)]
    pub link: String,

    /// Comma-separated author names as rendered.
    #[serde(default)]
    pub authors: String,

    /// Publication date, usually `YYYY` or `YYYY-MM`.
    #[serde(default)]
    pub publication_date: String,

    /// Journal or venue line (may be empty).
    #[serde(default)]
    pub journal: String,

    /// Citation count as text, `"0"` when the page shows none.
    #[serde(default = "zero")]
    pub citation_count: String,
}

fn zero() -> String {
    "0".to_string()
}

impl Default for PublicationRecord {
    fn default() -> Self {
        Self {
            title: String::new(),
            link: String::new(),
            authors: String::new(),
            publication_date: String::new(),
            journal: String::new(),
            citation_count: zero(),
        }
    }
}

impl PublicationRecord {
    /// Year parsed from the text before the first `-` of the publication date.
    #[must_use]
    pub fn year(&self) -> Option<i32> {
        parse_year(&self.publication_date)
    }

    /// Citation count as a number, 0 if the text is not numeric.
    #[must_use]
    pub fn citations(&self) -> u64 {
        self.citation_count.trim().parse().unwrap_or(0)
    }
}

/// Parse the year prefix of a publication date.
///
/// Takes the text before the first `-` and reads a leading integer from it:
/// leading whitespace is skipped, an optional sign is accepted, and parsing
/// stops at the first non-digit. `"2021-05"` gives 2021, `" 2019 "` gives 2019,
/// `"2020abc"` gives 2020, while `""`, `"-2021"` and `"n/a"` give `None`.
#[must_use]
pub fn parse_year(publication_date: &str) -> Option<i32> {
    let head = publication_date.split('-').next().unwrap_or_default();
    parse_leading_int(head)
}

fn parse_leading_int(text: &str) -> Option<i32> {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };

    let end = digits.bytes().take_while(u8::is_ascii_digit).count();
    if end == 0 {
        return None;
    }

    let value: i32 = digits[..end].parse().ok()?;
    Some(if negative { -value } else { value })
}
