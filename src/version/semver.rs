use std::cmp::Ordering;
use std::fmt;

use ::semver::Version;

/// A version string parsed on a best-effort basis.
///
/// Strings following `MAJOR.MINOR.PATCH[-prerelease][+build]` become
/// [`SemanticVersion::Structured`]; anything else is kept verbatim as
/// [`SemanticVersion::Unparsed`]. Parsing never fails.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticVersion {
    Structured(Version),
    Unparsed(String),
}

impl SemanticVersion {
    pub fn parse(raw: &str) -> Self {
        match Version::parse(raw) {
            Ok(version) => SemanticVersion::Structured(version),
            Err(_) => SemanticVersion::Unparsed(raw.to_string()),
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, SemanticVersion::Structured(_))
    }

    /// Precedence order between two versions.
    ///
    /// - structured vs structured: major, minor, patch, then pre-release
    ///   (a pre-release ranks below the release it precedes). Build
    ///   metadata does not affect precedence.
    /// - unparsed always ranks below structured.
    /// - unparsed vs unparsed: equal rank.
    pub fn compare(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SemanticVersion::Structured(a), SemanticVersion::Structured(b)) => {
                a.cmp_precedence(b)
            }
            (SemanticVersion::Structured(_), SemanticVersion::Unparsed(_)) => Ordering::Greater,
            (SemanticVersion::Unparsed(_), SemanticVersion::Structured(_)) => Ordering::Less,
            (SemanticVersion::Unparsed(_), SemanticVersion::Unparsed(_)) => Ordering::Equal,
        }
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticVersion::Structured(version) => write!(f, "{}", version),
            SemanticVersion::Unparsed(raw) => f.write_str(raw),
        }
    }
}

impl From<&str> for SemanticVersion {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

/// Fold over candidates keeping the running maximum.
///
/// The first of several equal-rank candidates wins. Returns `None` for an
/// empty set.
pub fn max_version<I>(candidates: I) -> Option<SemanticVersion>
where
    I: IntoIterator<Item = SemanticVersion>,
{
    candidates.into_iter().fold(None, |max, candidate| match max {
        Some(current) if candidate.compare(&current) != Ordering::Greater => Some(current),
        _ => Some(candidate),
    })
}

/// Find the newest comparable version among published version strings.
///
/// Only strings that parse as structured versions take part; returns `None`
/// when none do.
pub fn find_newest<S: AsRef<str>>(versions: &[S]) -> Option<SemanticVersion> {
    max_version(
        versions
            .iter()
            .map(|v| SemanticVersion::parse(v.as_ref()))
            .filter(SemanticVersion::is_structured),
    )
}

/// Normalize an installed version string: canonical form when it parses,
/// verbatim otherwise.
pub fn normalize_version(raw: &str) -> String {
    SemanticVersion::parse(raw).to_string()
}
