//! Package descriptors, versions and release selection.
//!
//! Everything in this module is pure: no I/O, no shared state. A query flows
//! as descriptor text → [`PackageDescriptor`] → [`ReleaseSet`] fetched from
//! an index → [`filter_releases`] → the matching releases.

mod descriptor;
mod error;
mod filter;
mod release;
pub mod version;

pub use descriptor::{parse, Comparator, Constraint, PackageDescriptor};
pub use error::PackageError;
pub use filter::{filter_releases, ReleaseFilter};
pub use release::{Release, ReleaseSet, SortKey};
