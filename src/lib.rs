//! Helpers for installing, removing and querying Python packages.
//!
//! - [`package`]: descriptor parsing (`"foo>=1.0,<2.0"`), natural version
//!   ordering and release filtering
//! - [`index`]: release metadata from a PyPI-style JSON index
//! - [`runner`]: pip invocation with optional output capture
//! - [`commands`]: install, uninstall, upgrade, freeze and release queries

pub mod commands;
pub mod http;
pub mod index;
pub mod package;
pub mod runner;

pub use commands::{Config, ConfigOptions, freeze, install, releases, uninstall, upgrade};
pub use index::{ReleaseIndex, ReleaseQuery, get_releases};
pub use package::{PackageDescriptor, PackageError, Release, ReleaseSet, SortKey};
pub use runner::{CommandError, CommandRunner, OutputMode, Subcommand};
