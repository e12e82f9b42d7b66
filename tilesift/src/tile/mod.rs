//! Tile code handling and filename derivation.
//!
//! A selection table row carries a tile code such as `CB11_1000_4532`. The
//! code is split into a head and a tail by a [`SplitRule`], and the parts are
//! rendered into a filename pattern by a [`PatternSpec`]. Matching against a
//! source directory uses a glob pattern; list building uses a concrete
//! extension instead.

mod code;
mod pattern;

pub use code::{CodeError, CodeParts, RuleParseError, SplitRule};
pub use pattern::{PatternSpec, DEFAULT_MIDDLE, DEFAULT_PREFIX, DEFAULT_SUFFIX};
