//! Collation-aware text matching (RFC 4790).
//!
//! Pure string comparison used by query evaluation: a collation
//! normalizes both operands, then a match type compares them. No shared
//! state; safe for concurrent invocation.

use icu::casemap::CaseMapper;
use thiserror::Error;

/// Error type for text matching.
///
/// Both kinds correspond to a protocol-level bad request: the client
/// asked for a comparison the server does not implement.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TextMatchError {
    /// The requested collation is not supported.
    /// Per RFC 4791 §7.5.1 the server MUST reject the request rather
    /// than fall back to a different collation.
    #[error("unsupported collation: {0}")]
    UnsupportedCollation(String),
    /// The requested match type is not supported.
    #[error("unsupported match type: {0}")]
    UnsupportedMatchType(String),
}

/// Supported collations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collation {
    /// `i;octet`: byte-exact, no transform.
    Octet,
    /// `i;ascii-casemap`: uppercases ASCII `a`-`z` only.
    AsciiCasemap,
    /// `i;unicode-casemap`: full Unicode case fold.
    UnicodeCasemap,
}

impl Collation {
    /// Parses an RFC 4790 collation identifier.
    ///
    /// ## Errors
    /// Returns [`TextMatchError::UnsupportedCollation`] for any identifier
    /// other than the three supported ones.
    pub fn from_identifier(identifier: &str) -> Result<Self, TextMatchError> {
        match identifier {
            "i;octet" => Ok(Self::Octet),
            "i;ascii-casemap" => Ok(Self::AsciiCasemap),
            "i;unicode-casemap" => Ok(Self::UnicodeCasemap),
            unsupported => Err(TextMatchError::UnsupportedCollation(
                unsupported.to_owned(),
            )),
        }
    }

    /// Returns the identifier string for this collation.
    #[must_use]
    pub const fn as_identifier(self) -> &'static str {
        match self {
            Self::Octet => "i;octet",
            Self::AsciiCasemap => "i;ascii-casemap",
            Self::UnicodeCasemap => "i;unicode-casemap",
        }
    }

    /// Applies the collation transform to one operand.
    ///
    /// RFC 4790 §9.2.1: the ASCII casemap converts ONLY ASCII letters
    /// (a-z) to uppercase; non-ASCII characters MUST be left unchanged
    /// (e.g. `è` stays `è`). The Unicode casemap uses ICU case folding,
    /// which also handles `ß` → `ss` and final sigma.
    #[must_use]
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Octet => text.to_owned(),
            Self::AsciiCasemap => text.to_ascii_uppercase(),
            Self::UnicodeCasemap => CaseMapper::new().fold_string(text).into_owned(),
        }
    }
}

/// Supported match types, applied after the collation transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchType {
    /// Needle occurs anywhere in the haystack.
    Contains,
    /// Exact equality.
    Equals,
    /// Haystack prefix of the needle's length equals the needle.
    StartsWith,
    /// Haystack suffix of the needle's length equals the needle.
    EndsWith,
}

impl MatchType {
    /// Parses a match-type identifier.
    ///
    /// ## Errors
    /// Returns [`TextMatchError::UnsupportedMatchType`] for any identifier
    /// other than the four supported ones.
    pub fn from_identifier(identifier: &str) -> Result<Self, TextMatchError> {
        match identifier {
            "contains" => Ok(Self::Contains),
            "equals" => Ok(Self::Equals),
            "starts-with" => Ok(Self::StartsWith),
            "ends-with" => Ok(Self::EndsWith),
            unsupported => Err(TextMatchError::UnsupportedMatchType(
                unsupported.to_owned(),
            )),
        }
    }

    /// Returns the identifier string for this match type.
    #[must_use]
    pub const fn as_identifier(self) -> &'static str {
        match self {
            Self::Contains => "contains",
            Self::Equals => "equals",
            Self::StartsWith => "starts-with",
            Self::EndsWith => "ends-with",
        }
    }

    /// Compares two already-collated operands.
    #[must_use]
    pub fn evaluate(self, haystack: &str, needle: &str) -> bool {
        match self {
            Self::Contains => haystack.contains(needle),
            Self::Equals => haystack == needle,
            Self::StartsWith => haystack.starts_with(needle),
            Self::EndsWith => haystack.ends_with(needle),
        }
    }
}

/// ## Summary
/// Matches `needle` against `haystack` under a collation and match type,
/// both given as their wire identifiers.
///
/// Both identifiers are validated before any comparison happens, so an
/// unsupported collation or match type fails regardless of the operands.
///
/// ## Errors
/// Returns [`TextMatchError`] if the collation or match type is unknown.
pub fn text_match(
    haystack: &str,
    needle: &str,
    collation: &str,
    match_type: &str,
) -> Result<bool, TextMatchError> {
    let collation = Collation::from_identifier(collation)?;
    let match_type = MatchType::from_identifier(match_type)?;

    Ok(match_type.evaluate(&collation.apply(haystack), &collation.apply(needle)))
}
