//! Declarative extraction rules for the Scholar profile markup.
//!
//! Scholar's markup is unversioned and addressed by position ("the second
//! gray line is the venue"). Each positional assumption lives here as one
//! `(selector, position, fallback)` entry so it can be audited and tested on
//! its own.

use std::sync::LazyLock;

use scraper::{ElementRef, Selector};

use crate::models::PublicationRecord;

/// One publication row.
pub const PUBLICATION_ROW: &str = ".gsc_a_tr";

/// Value cells of the statistics table, in reading order.
pub const METRIC_CELL: &str = "#gsc_rsb_st .gsc_rsb_std";

/// Year labels under the citation graph.
pub const GRAPH_YEAR: &str = ".gsc_g_t";

/// Bar values of the citation graph.
pub const GRAPH_BAR: &str = ".gsc_g_a";

/// Field of a [`PublicationRecord`] a rule fills.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PublicationField {
    Title,
    Link,
    Authors,
    PublicationDate,
    Journal,
    CitationCount,
}

/// What to read from the matched node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Concatenated text of the node and its descendants.
    Text,
    /// Value of the named attribute.
    Attr(&'static str),
}

/// Value used when the node is missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fallback {
    /// Missing node gives `""`; a present but empty node stays `""`.
    Empty,
    /// Missing node or blank value gives `"0"`.
    ZeroIfBlank,
}

impl Fallback {
    /// Resolve an optional raw value under this policy.
    #[must_use]
    pub fn apply(self, value: Option<String>) -> String {
        match self {
            Self::Empty => value.unwrap_or_default(),
            Self::ZeroIfBlank => value.filter(|v| !v.is_empty()).unwrap_or_else(|| "0".to_string()),
        }
    }
}

/// A single positional extraction rule scoped to a publication row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldRule {
    pub field: PublicationField,
    pub selector: &'static str,
    /// Index among the row's matches, in document order.
    pub position: usize,
    pub source: Source,
    pub trim: bool,
    pub fallback: Fallback,
}

/// Rules for each publication field.
///
/// `Journal` reads the *second* gray node; `CitationCount` is the only field
/// that treats a blank value like a missing one.
pub const PUBLICATION_RULES: [FieldRule; 6] = [
    FieldRule {
        field: PublicationField::Title,
        selector: ".gsc_a_at",
        position: 0,
        source: Source::Text,
        trim: false,
        fallback: Fallback::Empty,
    },
    FieldRule {
        field: PublicationField::Link,
        selector: ".gsc_a_at",
        position: 0,
        source: Source::Attr("href"),
        trim: false,
        fallback: Fallback::Empty,
    },
    FieldRule {
        field: PublicationField::Authors,
        selector: ".gs_gray",
        position: 0,
        source: Source::Text,
        trim: true,
        fallback: Fallback::Empty,
    },
    FieldRule {
        field: PublicationField::PublicationDate,
        selector: ".gsc_a_y",
        position: 0,
        source: Source::Text,
        trim: false,
        fallback: Fallback::Empty,
    },
    FieldRule {
        field: PublicationField::Journal,
        selector: ".gs_gray",
        position: 1,
        source: Source::Text,
        trim: false,
        fallback: Fallback::Empty,
    },
    FieldRule {
        field: PublicationField::CitationCount,
        selector: ".gsc_a_c a",
        position: 0,
        source: Source::Text,
        trim: true,
        fallback: Fallback::ZeroIfBlank,
    },
];

impl FieldRule {
    /// Resolve this rule against a row using its compiled selector.
    #[must_use]
    pub fn resolve(&self, row: ElementRef<'_>, selector: &Selector) -> String {
        let raw = row.select(selector).nth(self.position).and_then(|node| match self.source {
            Source::Text => Some(text_of(node)),
            Source::Attr(name) => node.value().attr(name).map(str::to_string),
        });
        let raw = if self.trim { raw.map(|v| v.trim().to_string()) } else { raw };
        self.fallback.apply(raw)
    }

    /// Write a resolved value into the matching record field.
    pub fn assign(&self, record: &mut PublicationRecord, value: String) {
        match self.field {
            PublicationField::Title => record.title = value,
            PublicationField::Link => record.link = value,
            PublicationField::Authors => record.authors = value,
            PublicationField::PublicationDate => record.publication_date = value,
            PublicationField::Journal => record.journal = value,
            PublicationField::CitationCount => record.citation_count = value,
        }
    }
}

/// Text content of a node, like the DOM's `textContent`.
#[must_use]
pub fn text_of(node: ElementRef<'_>) -> String {
    node.text().collect()
}

/// Rule selectors compiled once per process.
pub struct CompiledRules {
    pub row: Selector,
    pub metric_cell: Selector,
    pub graph_year: Selector,
    pub graph_bar: Selector,
    pub fields: Vec<(FieldRule, Selector)>,
}

impl CompiledRules {
    fn new() -> Self {
        Self {
            row: compile(PUBLICATION_ROW),
            metric_cell: compile(METRIC_CELL),
            graph_year: compile(GRAPH_YEAR),
            graph_bar: compile(GRAPH_BAR),
            fields: PUBLICATION_RULES.iter().map(|rule| (*rule, compile(rule.selector))).collect(),
        }
    }
}

fn compile(selector: &str) -> Selector {
    Selector::parse(selector).expect("extraction selectors are valid CSS")
}

/// Shared compiled rule set.
pub static RULES: LazyLock<CompiledRules> = LazyLock::new(CompiledRules::new);
