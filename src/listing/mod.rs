//! Filtering and sorting for the invoice, client and project lists.
//!
//! Everything here takes the current view state as plain values and returns
//! a fresh `Vec`; no list keeps state between calls.

pub mod clients;
pub mod invoices;
pub mod projects;

use std::cmp::Ordering;

use deunicode::deunicode;

/// Lower-cased search text. An empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query(String);

impl Query {
    pub fn new(text: &str) -> Self {
        Self(text.to_lowercase())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Case-insensitive substring test
    pub fn matches(&self, field: &str) -> bool {
        self.is_empty() || field.to_lowercase().contains(&self.0)
    }

    pub fn matches_any(&self, fields: &[&str]) -> bool {
        self.is_empty() || fields.iter().any(|field| self.matches(field))
    }
}

/// Dictionary-style string order.
///
/// Accents are folded away first, so "Émile" files under E. Within the folded
/// text, punctuation and spaces sort before digits and digits before letters,
/// and letters compare without regard to case. Remaining ties put the
/// unaccented spelling first, then the lower-case one.
pub fn collate(a: &str, b: &str) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn sort_key(text: &str) -> Vec<(u8, char)> {
    deunicode(text)
        .to_lowercase()
        .chars()
        .map(|c| {
            let class = if c.is_alphabetic() {
                2
            } else if c.is_numeric() {
                1
            } else {
                0
            };
            (class, c)
        })
        .collect()
}
