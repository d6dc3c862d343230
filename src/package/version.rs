//! Natural version ordering.
//!
//! Version strings are split into maximal runs of ASCII digits and runs of
//! everything else. Runs are compared pairwise:
//!
//! - two numeric runs compare by integer value (`"9" < "10"`, `"007" == "7"`)
//! - two non-numeric runs compare lexicographically by bytes
//! - a numeric run orders before a non-numeric run at the same position
//! - when one string runs out of segments first, it is the lesser one
//!
//! No input is rejected; every pair of strings is comparable.

use std::cmp::Ordering;

/// Markers that flag a version string as a pre-release.
pub const PRERELEASE_MARKERS: [&str; 2] = [".dev", ".pre"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Segment<'a> {
    Number(&'a str),
    Text(&'a str),
}

struct Segments<'a> {
    rest: &'a str,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Segment<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.rest.chars().next()?;
        let numeric = first.is_ascii_digit();
        let end = self
            .rest
            .find(|c: char| c.is_ascii_digit() != numeric)
            .unwrap_or(self.rest.len());
        let (run, rest) = self.rest.split_at(end);
        self.rest = rest;
        Some(if numeric {
            Segment::Number(run)
        } else {
            Segment::Text(run)
        })
    }
}

fn segments(version: &str) -> Segments<'_> {
    Segments { rest: version }
}

/// Compares two runs of ASCII digits by value, without parsing into a
/// fixed-width integer.
fn compare_numbers(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

fn compare_segments(a: Segment<'_>, b: Segment<'_>) -> Ordering {
    match (a, b) {
        (Segment::Number(a), Segment::Number(b)) => compare_numbers(a, b),
        (Segment::Text(a), Segment::Text(b)) => a.cmp(b),
        (Segment::Number(_), Segment::Text(_)) => Ordering::Less,
        (Segment::Text(_), Segment::Number(_)) => Ordering::Greater,
    }
}

/// Compare two version strings using natural ordering.
///
/// Strings whose segments are all equal compare `Equal` even if their raw
/// text differs (`"1.0"` and `"1.00"`). Use [`compare_total`] when a strict
/// tie-break is needed.
pub fn compare(a: &str, b: &str) -> Ordering {
    let mut left = segments(a);
    let mut right = segments(b);

    loop {
        match (left.next(), right.next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) => match compare_segments(x, y) {
                Ordering::Equal => {}
                other => return other,
            },
        }
    }
}

/// Natural ordering with the raw string as a final tie-break.
///
/// Only returns `Equal` for identical strings, which keeps sorts deterministic.
pub fn compare_total(a: &str, b: &str) -> Ordering {
    compare(a, b).then_with(|| a.cmp(b))
}

/// Returns true if the version carries a pre-release marker.
///
/// This is a plain case-sensitive substring test, so `"1.0.dev3"` and
/// `"2.0.pre"` match while `"1.0rc1"` and `"1.0.DEV1"` do not.
pub fn is_prerelease(version: &str) -> bool {
    PRERELEASE_MARKERS
        .iter()
        .any(|marker| version.contains(marker))
}
