//! Filename pattern derivation.
//!
//! A tile filename is the concatenation of a fixed prefix, the code head, a
//! middle token (capture date and resolution), the code tail and a suffix.
//! For directory matching the suffix is a glob wildcard so every extension
//! and sidecar variant of a tile matches; for list building a concrete
//! extension is substituted instead.

use glob::{Pattern, PatternError};

use super::CodeParts;

/// Default filename prefix.
pub const DEFAULT_PREFIX: &str = "DEM_";

/// Default middle token, embedding capture date and resolution.
pub const DEFAULT_MIDDLE: &str = "_2016_1000_";

/// Default suffix: a wildcard matching any extension.
pub const DEFAULT_SUFFIX: &str = ".*";

/// The fixed pieces surrounding a split tile code in a filename.
///
/// # Examples
///
/// ```
/// use tilesift::tile::{CodeParts, PatternSpec};
///
/// let spec = PatternSpec::default();
/// let parts = CodeParts {
///     head: "CB11".to_string(),
///     tail: "4123".to_string(),
/// };
/// assert_eq!(spec.render(&parts), "DEM_CB11_2016_1000_4123.*");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternSpec {
    /// Literal text before the code head.
    pub prefix: String,
    /// Literal text between head and tail.
    pub middle: String,
    /// Trailing glob pattern, usually a wildcard extension.
    pub suffix: String,
}

impl Default for PatternSpec {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            middle: DEFAULT_MIDDLE.to_string(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }
}

impl PatternSpec {
    /// Create a spec with the given prefix and middle and the default suffix.
    pub fn new(prefix: impl Into<String>, middle: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            middle: middle.into(),
            suffix: DEFAULT_SUFFIX.to_string(),
        }
    }

    /// Replace the suffix.
    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    /// Render the glob pattern string for a split code.
    pub fn render(&self, parts: &CodeParts) -> String {
        format!(
            "{}{}{}{}{}",
            self.prefix, parts.head, self.middle, parts.tail, self.suffix
        )
    }

    /// Render a concrete filename, substituting `extension` for the suffix.
    pub fn filename(&self, parts: &CodeParts, extension: &str) -> String {
        format!(
            "{}{}{}{}{}",
            self.prefix, parts.head, self.middle, parts.tail, extension
        )
    }

    /// Compile the rendered pattern for matching against filenames.
    ///
    /// Matching is case-sensitive. Only the suffix normally contains glob
    /// metacharacters, but prefix and middle are passed through verbatim, so
    /// a literal `[` or `*` in either makes compilation fail.
    pub fn compile(&self, parts: &CodeParts) -> Result<Pattern, PatternError> {
        Pattern::new(&self.render(parts))
    }
}
