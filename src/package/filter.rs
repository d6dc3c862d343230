//! Release filtering against descriptor constraints.

use log::debug;

use super::descriptor::Constraint;
use super::error::PackageError;
use super::release::ReleaseSet;
use super::version;

/// Per-version predicate combining the constraints and the pre-release policy.
#[derive(Debug, Clone, Copy)]
pub struct ReleaseFilter<'a> {
    constraints: &'a [Constraint],
    include_prerelease: bool,
}

impl<'a> ReleaseFilter<'a> {
    pub fn new(constraints: &'a [Constraint], include_prerelease: bool) -> Self {
        Self {
            constraints,
            include_prerelease,
        }
    }

    /// True if `candidate` satisfies every constraint and, unless pre-releases
    /// are included, carries no pre-release marker.
    pub fn matches(&self, candidate: &str) -> bool {
        let satisfies = self.constraints.iter().all(|c| c.is_satisfied_by(candidate));
        satisfies && (self.include_prerelease || !version::is_prerelease(candidate))
    }
}

/// Select the releases that satisfy all `constraints`.
///
/// The result keeps the order of `releases`. Fails with
/// [`PackageError::NoReleasesFound`] when `releases` is empty and with
/// [`PackageError::NoMatchingReleases`] when nothing survives the filter.
pub fn filter_releases(
    releases: &ReleaseSet,
    constraints: &[Constraint],
    include_prerelease: bool,
) -> Result<ReleaseSet, PackageError> {
    if releases.is_empty() {
        return Err(PackageError::NoReleasesFound {
            package: releases.package().to_string(),
        });
    }

    let filter = ReleaseFilter::new(constraints, include_prerelease);
    let selected: Vec<_> = releases
        .iter()
        .filter(|r| filter.matches(&r.version))
        .cloned()
        .collect();

    debug!(
        "{}: {} of {} release(s) match",
        releases.package(),
        selected.len(),
        releases.len()
    );

    if selected.is_empty() {
        return Err(PackageError::NoMatchingReleases {
            package: releases.package().to_string(),
            specifiers: constraints
                .iter()
                .map(Constraint::to_string)
                .collect::<Vec<_>>()
                .join(","),
            available: releases.versions().into_iter().map(String::from).collect(),
        });
    }

    Ok(ReleaseSet::from_sorted(
        releases.package().to_string(),
        selected,
    ))
}
