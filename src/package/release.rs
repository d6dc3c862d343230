//! Release records and ordered release sets.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::version;

/// A published release of a package, as reported by the index.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Release {
    /// Version string (e.g., "1.2.0")
    pub version: String,
    /// Upload time of the release's first file (ISO 8601)
    pub upload_time: String,
    /// Name of the release's first file
    #[serde(default)]
    pub filename: Option<String>,
    /// Download URL of the release's first file
    #[serde(default)]
    pub url: Option<String>,
    /// Whether every file of the release has been yanked
    #[serde(default)]
    pub yanked: bool,
}

impl Release {
    pub fn new(version: impl Into<String>, upload_time: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            upload_time: upload_time.into(),
            ..Default::default()
        }
    }
}

/// Order in which a [`ReleaseSet`] is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Natural version order
    #[default]
    Version,
    /// Upload time, ties broken by natural version order
    UploadTime,
}

impl SortKey {
    pub fn compare(&self, a: &Release, b: &Release) -> Ordering {
        match self {
            SortKey::Version => version::compare_total(&a.version, &b.version),
            SortKey::UploadTime => a
                .upload_time
                .cmp(&b.upload_time)
                .then_with(|| version::compare_total(&a.version, &b.version)),
        }
    }
}

/// The releases of one package, unique by version and kept in ascending
/// sort order (most recent last).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReleaseSet {
    package: String,
    releases: Vec<Release>,
}

impl ReleaseSet {
    /// Builds a sorted set. When a version appears more than once, the first
    /// occurrence wins.
    pub fn new(
        package: impl Into<String>,
        releases: impl IntoIterator<Item = Release>,
        sort: SortKey,
    ) -> Self {
        let mut seen = HashSet::new();
        let mut releases: Vec<Release> = releases
            .into_iter()
            .filter(|r| seen.insert(r.version.clone()))
            .collect();
        releases.sort_by(|a, b| sort.compare(a, b));

        Self {
            package: package.into(),
            releases,
        }
    }

    /// Wraps releases that are already unique and ordered.
    pub(crate) fn from_sorted(package: String, releases: Vec<Release>) -> Self {
        Self { package, releases }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn len(&self) -> usize {
        self.releases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.releases.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Release> {
        self.releases.iter()
    }

    /// Version strings in set order.
    pub fn versions(&self) -> Vec<&str> {
        self.releases.iter().map(|r| r.version.as_str()).collect()
    }

    pub fn get(&self, version: &str) -> Option<&Release> {
        self.releases.iter().find(|r| r.version == version)
    }

    /// The last release in set order.
    pub fn latest(&self) -> Option<&Release> {
        self.releases.last()
    }

    pub fn into_vec(self) -> Vec<Release> {
        self.releases
    }
}

impl<'a> IntoIterator for &'a ReleaseSet {
    type Item = &'a Release;
    type IntoIter = std::slice::Iter<'a, Release>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
