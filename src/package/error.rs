//! Errors raised while parsing descriptors and selecting releases.

/// Failures of the descriptor parser and the release filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackageError {
    /// The input does not follow `name [comparator version [, comparator version]...]`
    InvalidDescriptor(String),
    /// The index has no releases at all for the package
    NoReleasesFound { package: String },
    /// Releases exist, but none satisfy the constraints and pre-release policy
    NoMatchingReleases {
        package: String,
        specifiers: String,
        available: Vec<String>,
    },
}

impl std::fmt::Display for PackageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PackageError::InvalidDescriptor(descriptor) => {
                write!(
                    f,
                    "Invalid package descriptor \"{}\". Must be like \"foo\", \"foo==1.0\", \"foo>=1.0\", etc.",
                    descriptor
                )
            }
            PackageError::NoReleasesFound { package } => {
                write!(f, "No releases found for package: {}", package)
            }
            PackageError::NoMatchingReleases {
                package,
                specifiers,
                available,
            } => {
                write!(
                    f,
                    "None of the following releases of {} match the specifiers \"{}\": {}",
                    package,
                    specifiers,
                    available.join(", ")
                )
            }
        }
    }
}

impl std::error::Error for PackageError {}
