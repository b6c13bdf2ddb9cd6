// deploy-graph-core/src/runtime/name_matcher.rs
// ============================================================================
// Module: Name Matcher
// Description: Classifies and evaluates dependency name references.
// Purpose: Distinguish literal task ids from glob patterns in requires lists.
// Dependencies: glob
// ============================================================================

//! ## Overview
//! A `requires`/`required_for`/`cross-depends` entry's `name` is either a
//! literal task id or a glob pattern (`*`) matched against candidate task
//! ids (§4.6). A name made up only of alphanumerics and underscores is
//! treated as literal; anything else is compiled as a glob pattern.

// ============================================================================
// SECTION: Imports
// ============================================================================

use glob::Pattern;
use glob::PatternError;

// ============================================================================
// SECTION: Name Reference
// ============================================================================

/// A classified dependency name reference.
#[derive(Debug, Clone)]
pub enum NameRef {
    /// An exact task id to match.
    Literal(String),
    /// A compiled glob pattern to match against candidate ids.
    Pattern(Box<Pattern>),
}

impl NameRef {
    /// Classifies and compiles `raw` into a [`NameRef`].
    ///
    /// # Errors
    ///
    /// Returns [`PatternError`] when `raw` is classified as a pattern but
    /// does not compile as a valid glob.
    pub fn compile(raw: &str) -> Result<Self, PatternError> {
        if is_literal(raw) {
            Ok(Self::Literal(raw.to_owned()))
        } else {
            Ok(Self::Pattern(Box::new(Pattern::new(raw)?)))
        }
    }

    /// Returns whether `candidate` matches this reference.
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Self::Literal(literal) => literal == candidate,
            Self::Pattern(pattern) => pattern.matches(candidate),
        }
    }

    /// Returns the original literal id when this reference is not a pattern.
    #[must_use]
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Self::Literal(literal) => Some(literal.as_str()),
            Self::Pattern(_) => None,
        }
    }
}

/// Returns whether `raw` is alphanumeric/underscore/hyphen only, and so is
/// treated as an exact id rather than compiled as a glob pattern.
fn is_literal(raw: &str) -> bool {
    !raw.is_empty()
        && raw
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
