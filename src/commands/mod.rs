//! Library-level operations: package manager commands and release queries.

use anyhow::{Result, bail};
use log::debug;

use crate::{
    index::{ReleaseIndex, ReleaseQuery, get_releases},
    package::{PackageDescriptor, Release, ReleaseSet},
    runner::{CommandRunner, OutputMode, Subcommand},
};

pub mod config;

pub use config::{Config, ConfigOptions};

/// Install `packages`. Returns the captured output in [`OutputMode::Capture`].
#[tracing::instrument(skip(runner))]
pub async fn install<C: CommandRunner + ?Sized>(
    runner: &C,
    packages: &[String],
    mode: OutputMode,
) -> Result<Option<String>> {
    run_for_packages(runner, Subcommand::Install, packages, mode).await
}

/// Uninstall `packages` without prompting.
#[tracing::instrument(skip(runner))]
pub async fn uninstall<C: CommandRunner + ?Sized>(
    runner: &C,
    packages: &[String],
    mode: OutputMode,
) -> Result<Option<String>> {
    run_for_packages(runner, Subcommand::Uninstall, packages, mode).await
}

/// Upgrade `packages` to their newest allowed versions.
#[tracing::instrument(skip(runner))]
pub async fn upgrade<C: CommandRunner + ?Sized>(
    runner: &C,
    packages: &[String],
    mode: OutputMode,
) -> Result<Option<String>> {
    run_for_packages(runner, Subcommand::Upgrade, packages, mode).await
}

/// List installed packages as sorted requirement lines (`name==version`).
///
/// Blank lines and `#` comments in the package manager's output are dropped.
/// Returns `None` in [`OutputMode::Inherit`].
#[tracing::instrument(skip(runner))]
pub async fn freeze<C: CommandRunner + ?Sized>(
    runner: &C,
    mode: OutputMode,
) -> Result<Option<Vec<String>>> {
    let output = runner.run(Subcommand::Freeze, &[], mode).await?;
    Ok(output.map(|text| parse_freeze_output(&text)))
}

/// Query `index` for the releases matching `descriptor`.
pub async fn releases<I: ReleaseIndex + ?Sized>(
    index: &I,
    descriptor: &str,
    query: &ReleaseQuery,
) -> Result<(PackageDescriptor, ReleaseSet)> {
    get_releases(index, descriptor, query).await
}

async fn run_for_packages<C: CommandRunner + ?Sized>(
    runner: &C,
    subcommand: Subcommand,
    packages: &[String],
    mode: OutputMode,
) -> Result<Option<String>> {
    if packages.is_empty() {
        bail!("No packages given to {}.", subcommand);
    }
    debug!("{} {:?}", subcommand, packages);
    runner.run(subcommand, packages, mode).await
}

fn parse_freeze_output(text: &str) -> Vec<String> {
    let mut lines: Vec<String> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect();
    lines.sort();
    lines
}

/// How `pip-helpers releases` prints its result.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReleaseFormat {
    /// Only the last release in set order
    pub latest: bool,
    /// A JSON array instead of `version<TAB>upload_time` lines
    pub json: bool,
}

/// Render a release set for the terminal.
pub fn render_releases(set: &ReleaseSet, format: ReleaseFormat) -> Result<String> {
    let selected: Vec<&Release> = if format.latest {
        set.latest().into_iter().collect()
    } else {
        set.iter().collect()
    };

    if format.json {
        return Ok(serde_json::to_string_pretty(&selected)?);
    }

    Ok(selected
        .iter()
        .map(|r| format!("{}\t{}", r.version, r.upload_time))
        .collect::<Vec<_>>()
        .join("\n"))
}
