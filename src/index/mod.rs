//! Release index abstraction and release queries.
//!
//! A [`ReleaseIndex`] answers "which releases exist for this package". The
//! query entry point [`get_releases`] combines it with the descriptor parser
//! and the release filter.

mod pypi;

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{debug, info};

use crate::package::{PackageDescriptor, Release, ReleaseSet, SortKey, filter_releases};

pub use pypi::{DEFAULT_INDEX_URL, PyPiIndex};

/// Source of release metadata for packages.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReleaseIndex: Send + Sync {
    /// The endpoint this index talks to, for messages.
    fn index_url(&self) -> &str;

    /// Fetch every release published for `name`, in no particular order.
    async fn fetch_releases(&self, name: &str) -> Result<Vec<Release>>;
}

/// Caller policy for a release query.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseQuery {
    /// Keep versions containing `.dev` or `.pre`
    pub include_prerelease: bool,
    /// Keep releases whose files have all been yanked (hidden releases)
    pub include_yanked: bool,
    /// Order of the returned set
    pub sort: SortKey,
}

/// Resolve `descriptor` (e.g. `"foo>=1.0,<2.0"`) against `index`.
///
/// Returns the parsed descriptor and the matching releases, most recent last.
/// Descriptor and filtering failures surface as
/// [`PackageError`](crate::package::PackageError); fetch failures are
/// returned with added context.
#[tracing::instrument(skip(index))]
pub async fn get_releases<I: ReleaseIndex + ?Sized>(
    index: &I,
    descriptor: &str,
    query: &ReleaseQuery,
) -> Result<(PackageDescriptor, ReleaseSet)> {
    let descriptor: PackageDescriptor = descriptor.parse()?;

    let fetched = index
        .fetch_releases(&descriptor.name)
        .await
        .with_context(|| {
            format!(
                "Failed to fetch releases for {} from {}",
                descriptor.name,
                index.index_url()
            )
        })?;
    let fetched_count = fetched.len();

    let visible = fetched
        .into_iter()
        .filter(|r| query.include_yanked || !r.yanked);
    let all = ReleaseSet::new(descriptor.name.clone(), visible, query.sort);
    if all.len() < fetched_count {
        debug!(
            "{}: ignoring {} yanked release(s)",
            descriptor.name,
            fetched_count - all.len()
        );
    }

    let releases = filter_releases(&all, &descriptor.constraints, query.include_prerelease)?;
    info!(
        "{}: {} matching release(s), latest {}",
        descriptor.name,
        releases.len(),
        releases.latest().map(|r| r.version.as_str()).unwrap_or("-")
    );

    Ok((descriptor, releases))
}
