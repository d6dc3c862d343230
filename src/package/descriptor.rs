//! Package descriptor parsing.
//!
//! A descriptor is a package name optionally followed by a comma-separated
//! list of version constraints, e.g. `"foo"`, `"foo==1.0"` or
//! `"foo>=1.0, <2.0"`. All constraints must hold for a version to match.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use super::error::PackageError;
use super::version;

/// A version relation operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparator {
    NotEqual,
    Equal,
    GreaterEqual,
    LessEqual,
    Greater,
    Less,
}

impl Comparator {
    /// All comparators, two-character symbols first so that `>=` is never
    /// read as `>` followed by `=`.
    pub const ALL: [Comparator; 6] = [
        Comparator::NotEqual,
        Comparator::Equal,
        Comparator::GreaterEqual,
        Comparator::LessEqual,
        Comparator::Greater,
        Comparator::Less,
    ];

    pub fn symbol(&self) -> &'static str {
        match self {
            Comparator::NotEqual => "!=",
            Comparator::Equal => "==",
            Comparator::GreaterEqual => ">=",
            Comparator::LessEqual => "<=",
            Comparator::Greater => ">",
            Comparator::Less => "<",
        }
    }

    /// Whether `ordering`, the result of comparing a candidate against the
    /// constraint's version, satisfies this comparator.
    pub fn matches(&self, ordering: Ordering) -> bool {
        match self {
            Comparator::NotEqual => ordering != Ordering::Equal,
            Comparator::Equal => ordering == Ordering::Equal,
            Comparator::GreaterEqual => ordering != Ordering::Less,
            Comparator::LessEqual => ordering != Ordering::Greater,
            Comparator::Greater => ordering == Ordering::Greater,
            Comparator::Less => ordering == Ordering::Less,
        }
    }

    /// Strips the longest comparator symbol from the front of `input`.
    fn strip_from(input: &str) -> Option<(Comparator, &str)> {
        Self::ALL.iter().find_map(|comparator| {
            input
                .strip_prefix(comparator.symbol())
                .map(|rest| (*comparator, rest))
        })
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Comparator {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|c| c.symbol() == s)
            .copied()
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown comparator: {}. Expected one of !=, ==, >=, <=, >, <.",
                    s
                )
            })
    }
}

/// A single `(comparator, version)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Constraint {
    pub comparator: Comparator,
    pub version: String,
}

impl Constraint {
    pub fn new(comparator: Comparator, version: impl Into<String>) -> Self {
        Self {
            comparator,
            version: version.into(),
        }
    }

    /// Check `candidate` against this constraint using natural version ordering.
    pub fn is_satisfied_by(&self, candidate: &str) -> bool {
        self.comparator
            .matches(version::compare(candidate, &self.version))
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.comparator, self.version)
    }
}

/// A package name plus zero or more version constraints.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageDescriptor {
    pub name: String,
    pub constraints: Vec<Constraint>,
}

impl PackageDescriptor {
    /// A descriptor with no constraints.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            constraints: Vec::new(),
        }
    }

    /// The constraint list as comma-separated text, `None` if unconstrained.
    pub fn specifiers(&self) -> Option<String> {
        if self.constraints.is_empty() {
            return None;
        }
        Some(
            self.constraints
                .iter()
                .map(Constraint::to_string)
                .collect::<Vec<_>>()
                .join(","),
        )
    }

    /// Whether `candidate` satisfies every constraint.
    pub fn matches(&self, candidate: &str) -> bool {
        self.constraints.iter().all(|c| c.is_satisfied_by(candidate))
    }
}

impl fmt::Display for PackageDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.specifiers() {
            Some(specifiers) => write!(f, "{}{}", self.name, specifiers),
            None => write!(f, "{}", self.name),
        }
    }
}

impl FromStr for PackageDescriptor {
    type Err = PackageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

fn is_name_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

fn is_version_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.')
}

/// Splits off the longest prefix made of `accept` characters.
fn take_while(input: &str, accept: fn(char) -> bool) -> (&str, &str) {
    let end = input.find(|c: char| !accept(c)).unwrap_or(input.len());
    input.split_at(end)
}

fn take_name(input: &str) -> Option<(&str, &str)> {
    if !input.starts_with(is_name_start) {
        return None;
    }
    Some(take_while(input, is_name_char))
}

fn take_version(input: &str) -> Option<(&str, &str)> {
    let (version, rest) = take_while(input, is_version_char);
    if version.is_empty() {
        None
    } else {
        Some((version, rest))
    }
}

/// Parse a descriptor such as `"foo>=1.0,<2.0"`.
///
/// Whitespace between tokens is ignored. Fails with
/// [`PackageError::InvalidDescriptor`] when the input does not follow
/// `name [comparator version [, comparator version]...]`.
pub fn parse(descriptor: &str) -> Result<PackageDescriptor, PackageError> {
    let invalid = || PackageError::InvalidDescriptor(descriptor.to_string());

    let (name, rest) = take_name(descriptor.trim()).ok_or_else(invalid)?;
    let mut rest = rest.trim_start();
    let mut constraints: Vec<Constraint> = Vec::new();

    while !rest.is_empty() {
        if !constraints.is_empty() {
            rest = rest.strip_prefix(',').ok_or_else(invalid)?.trim_start();
        }
        let (comparator, after) = Comparator::strip_from(rest).ok_or_else(invalid)?;
        let (version, after) = take_version(after.trim_start()).ok_or_else(invalid)?;
        constraints.push(Constraint::new(comparator, version));
        rest = after.trim_start();
    }

    Ok(PackageDescriptor {
        name: name.to_string(),
        constraints,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_name_only() {
        let d = parse("foo").unwrap();
        assert_eq!(d.name, "foo");
        assert!(d.constraints.is_empty());
        assert_eq!(d.specifiers(), None);
    }

    #[test]
    fn test_parse_single_constraint() {
        let d = parse("foo==1.0").unwrap();
        assert_eq!(d.name, "foo");
        assert_eq!(d.constraints, vec![Constraint::new(Comparator::Equal, "1.0")]);
    }

    #[test]
    fn test_parse_multiple_constraints() {
        let d = parse("foo>=1.0,<2.0").unwrap();
        assert_eq!(
            d.constraints,
            vec![
                Constraint::new(Comparator::GreaterEqual, "1.0"),
                Constraint::new(Comparator::Less, "2.0"),
            ]
        );
    }

    #[test]
    fn test_parse_ignores_whitespace_between_tokens() {
        let d = parse("  foo >= 1.0 , < 2.0  ").unwrap();
        assert_eq!(d, parse("foo>=1.0,<2.0").unwrap());
    }

    #[test]
    fn test_parse_longest_comparator_first() {
        for (input, expected) in [
            ("foo!=1", Comparator::NotEqual),
            ("foo==1", Comparator::Equal),
            ("foo>=1", Comparator::GreaterEqual),
            ("foo<=1", Comparator::LessEqual),
            ("foo>1", Comparator::Greater),
            ("foo<1", Comparator::Less),
        ] {
            let d = parse(input).unwrap();
            assert_eq!(d.constraints[0].comparator, expected, "{}", input);
            assert_eq!(d.constraints[0].version, "1");
        }
    }

    #[test]
    fn test_parse_name_characters() {
        assert_eq!(parse("zope.interface").unwrap().name, "zope.interface");
        assert_eq!(parse("python-dateutil>2").unwrap().name, "python-dateutil");
        assert_eq!(parse("_private").unwrap().name, "_private");
        assert_eq!(parse("a").unwrap().name, "a");
    }

    #[test]
    fn test_parse_version_with_letters() {
        let d = parse("foo>=1.0.dev3,!=1.0_rc1").unwrap();
        assert_eq!(d.constraints[0].version, "1.0.dev3");
        assert_eq!(d.constraints[1].version, "1.0_rc1");
    }

    #[test]
    fn test_parse_invalid() {
        for input in [
            "",
            "   ",
            "1abc",
            "-foo",
            "foo$bar",
            "foo<>1.0",
            "foo=1.0",
            "foo>=",
            "foo>=1.0,",
            "foo>=1.0 <2.0",
            "foo>=1.0,,<2.0",
            ">=1.0",
            "foo ==1.0-beta",
        ] {
            let result = parse(input);
            assert_eq!(
                result,
                Err(PackageError::InvalidDescriptor(input.to_string())),
                "{:?} should be rejected",
                input
            );
        }
    }

    #[test]
    fn test_parse_comparators_are_case_sensitive_symbols() {
        assert!(parse("foo=>1.0").is_err());
        assert!(parse("foo=<1.0").is_err());
    }

    #[test]
    fn test_display_canonical_form() {
        assert_eq!(parse("foo").unwrap().to_string(), "foo");
        assert_eq!(parse("foo == 1.0").unwrap().to_string(), "foo==1.0");
        assert_eq!(
            parse("foo >= 1.0 , < 2.0").unwrap().to_string(),
            "foo>=1.0,<2.0"
        );
    }

    #[test]
    fn test_display_round_trip() {
        for input in ["foo", "foo==1.0", "foo>=1.0,<2.0", "bar != 3 , > 1.2.dev0"] {
            let d = parse(input).unwrap();
            assert_eq!(d.to_string().parse::<PackageDescriptor>().unwrap(), d);
        }
    }

    #[test]
    fn test_comparator_from_str() {
        assert_eq!(">=".parse::<Comparator>().unwrap(), Comparator::GreaterEqual);
        assert_eq!("<".parse::<Comparator>().unwrap(), Comparator::Less);
        assert!("=>".parse::<Comparator>().is_err());
        assert!("".parse::<Comparator>().is_err());
    }

    #[test]
    fn test_comparator_matches() {
        use std::cmp::Ordering::*;
        assert!(Comparator::NotEqual.matches(Less));
        assert!(!Comparator::NotEqual.matches(Equal));
        assert!(Comparator::GreaterEqual.matches(Equal));
        assert!(Comparator::GreaterEqual.matches(Greater));
        assert!(!Comparator::GreaterEqual.matches(Less));
        assert!(Comparator::LessEqual.matches(Equal));
        assert!(!Comparator::LessEqual.matches(Greater));
        assert!(Comparator::Greater.matches(Greater));
        assert!(!Comparator::Greater.matches(Equal));
        assert!(Comparator::Less.matches(Less));
        assert!(!Comparator::Less.matches(Equal));
    }

    #[test]
    fn test_constraint_uses_natural_ordering() {
        let c = Constraint::new(Comparator::Less, "10");
        assert!(c.is_satisfied_by("9"));
        assert!(!c.is_satisfied_by("10"));

        let c = Constraint::new(Comparator::Greater, "1.2.0");
        assert!(c.is_satisfied_by("1.10.0"));
    }

    #[test]
    fn test_descriptor_matches_all_constraints() {
        let d = parse("foo>=1.0,<2.0,!=1.5").unwrap();
        assert!(d.matches("1.0"));
        assert!(d.matches("1.9"));
        assert!(!d.matches("1.5"));
        assert!(!d.matches("2.0"));
        assert!(!d.matches("0.9"));
        assert!(PackageDescriptor::new("foo").matches("anything"));
    }
}
