//! Tile code splitting.
//!
//! Filenames embed a capture-date token between the leading and trailing
//! parts of the tile code, so deriving a filename from a code requires
//! splitting the code first. Different index exports split differently; the
//! rule is configurable and parseable from a compact string form:
//!
//! - `split:<n>` takes the first `n` characters as the head
//! - `ends:<head>:<tail>` takes `head` characters from the front and `tail`
//!   characters from the back
//! - `regex:<pattern>` applies a regex with exactly two capture groups

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use thiserror::Error;

/// Head and tail of a tile code, produced by [`SplitRule::split`].
///
/// For `CB11_1000_4532` under the default rule the head is the grid cell
/// `CB11` and the tail is the tile number `4532`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeParts {
    /// Leading portion of the code.
    pub head: String,
    /// Trailing portion of the code.
    pub tail: String,
}

/// Errors from splitting a tile code.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CodeError {
    /// The code is empty or whitespace-only.
    #[error("tile code is empty")]
    Empty,

    /// The code has fewer characters than the rule requires.
    #[error("tile code '{code}' is shorter than {needed} characters")]
    TooShort { code: String, needed: usize },

    /// The code does not match the extraction regex.
    #[error("tile code '{code}' does not match the extraction pattern")]
    NoMatch { code: String },
}

/// Errors from parsing a split rule string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleParseError {
    /// The string matches none of the known rule forms.
    #[error("unknown split rule '{0}': expected split:<n>, ends:<head>:<tail> or regex:<pattern>")]
    UnknownForm(String),

    /// A character count in the rule is not a number.
    #[error("invalid character count in split rule '{0}'")]
    InvalidCount(String),

    /// The regex form does not compile.
    #[error("invalid regex in split rule: {0}")]
    InvalidRegex(String),

    /// The regex form has the wrong number of capture groups.
    #[error("split regex must have exactly two capture groups, found {0}")]
    GroupCount(usize),
}

/// Rule for splitting a tile code into head and tail.
///
/// # Examples
///
/// ```
/// use tilesift::tile::SplitRule;
///
/// let rule: SplitRule = "split:4".parse().unwrap();
/// let parts = rule.split("CB11_1000_4532").unwrap();
/// assert_eq!(parts.head, "CB11");
/// assert_eq!(parts.tail, "_1000_4532");
/// ```
#[derive(Debug, Clone)]
pub enum SplitRule {
    /// Head is the first `n` characters, tail is everything after.
    SplitAt(usize),
    /// Head is the first `head` characters, tail is the last `tail`
    /// characters. The code must be at least `head + tail` characters long.
    HeadTail { head: usize, tail: usize },
    /// Regex with two capture groups: group 1 is the head, group 2 the tail.
    Pattern(Regex),
}

impl SplitRule {
    /// Split a tile code according to this rule.
    ///
    /// The code is trimmed first; an empty or whitespace-only code is
    /// rejected rather than producing an all-wildcard pattern downstream.
    pub fn split(&self, code: &str) -> Result<CodeParts, CodeError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(CodeError::Empty);
        }

        match self {
            SplitRule::SplitAt(n) => {
                let cut = cut_at(code, *n).ok_or_else(|| CodeError::TooShort {
                    code: code.to_string(),
                    needed: *n,
                })?;
                Ok(CodeParts {
                    head: code[..cut].to_string(),
                    tail: code[cut..].to_string(),
                })
            }
            SplitRule::HeadTail { head, tail } => {
                let total = code.chars().count();
                if total < head + tail {
                    return Err(CodeError::TooShort {
                        code: code.to_string(),
                        needed: head + tail,
                    });
                }
                let head_end = cut_at(code, *head).unwrap_or(code.len());
                let tail_start = cut_at(code, total - tail).unwrap_or(code.len());
                Ok(CodeParts {
                    head: code[..head_end].to_string(),
                    tail: code[tail_start..].to_string(),
                })
            }
            SplitRule::Pattern(re) => {
                let captures = re.captures(code).ok_or_else(|| CodeError::NoMatch {
                    code: code.to_string(),
                })?;
                match (captures.get(1), captures.get(2)) {
                    (Some(head), Some(tail)) => Ok(CodeParts {
                        head: head.as_str().to_string(),
                        tail: tail.as_str().to_string(),
                    }),
                    _ => Err(CodeError::NoMatch {
                        code: code.to_string(),
                    }),
                }
            }
        }
    }
}

impl Default for SplitRule {
    fn default() -> Self {
        // Source index codes put the grid cell in the first four characters
        // and the tile number in the last four; the portion between them is
        // replaced by the filename's middle token.
        SplitRule::HeadTail { head: 4, tail: 4 }
    }
}

impl fmt::Display for SplitRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitRule::SplitAt(n) => write!(f, "split:{}", n),
            SplitRule::HeadTail { head, tail } => write!(f, "ends:{}:{}", head, tail),
            SplitRule::Pattern(re) => write!(f, "regex:{}", re.as_str()),
        }
    }
}

impl FromStr for SplitRule {
    type Err = RuleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if let Some(count) = s.strip_prefix("split:") {
            let n = count
                .parse()
                .map_err(|_| RuleParseError::InvalidCount(s.to_string()))?;
            return Ok(SplitRule::SplitAt(n));
        }

        if let Some(counts) = s.strip_prefix("ends:") {
            let (head, tail) = counts
                .split_once(':')
                .ok_or_else(|| RuleParseError::InvalidCount(s.to_string()))?;
            let head = head
                .parse()
                .map_err(|_| RuleParseError::InvalidCount(s.to_string()))?;
            let tail = tail
                .parse()
                .map_err(|_| RuleParseError::InvalidCount(s.to_string()))?;
            return Ok(SplitRule::HeadTail { head, tail });
        }

        if let Some(pattern) = s.strip_prefix("regex:") {
            let re =
                Regex::new(pattern).map_err(|e| RuleParseError::InvalidRegex(e.to_string()))?;
            // captures_len includes the implicit whole-match group
            if re.captures_len() != 3 {
                return Err(RuleParseError::GroupCount(re.captures_len() - 1));
            }
            return Ok(SplitRule::Pattern(re));
        }

        Err(RuleParseError::UnknownForm(s.to_string()))
    }
}

/// Byte offset of the `chars`-th character, or None if the string is shorter.
fn cut_at(s: &str, chars: usize) -> Option<usize> {
    let mut remaining = chars;
    for (idx, _) in s.char_indices() {
        if remaining == 0 {
            return Some(idx);
        }
        remaining -= 1;
    }
    if remaining == 0 {
        Some(s.len())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_at_basic() {
        let rule = SplitRule::SplitAt(4);
        let parts = rule.split("CB11_1000_4532").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "_1000_4532");
    }

    #[test]
    fn test_split_at_exact_length() {
        let rule = SplitRule::SplitAt(4);
        let parts = rule.split("CB11").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "");
    }

    #[test]
    fn test_split_at_too_short() {
        let rule = SplitRule::SplitAt(4);
        let err = rule.split("CB1").unwrap_err();
        assert_eq!(
            err,
            CodeError::TooShort {
                code: "CB1".to_string(),
                needed: 4
            }
        );
    }

    #[test]
    fn test_split_trims_whitespace() {
        let rule = SplitRule::SplitAt(4);
        let parts = rule.split("  CB11_1000_4532\n").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "_1000_4532");
    }

    #[test]
    fn test_empty_code_rejected() {
        let rule = SplitRule::SplitAt(4);
        assert_eq!(rule.split("").unwrap_err(), CodeError::Empty);
        assert_eq!(rule.split("   ").unwrap_err(), CodeError::Empty);
    }

    #[test]
    fn test_split_at_char_boundaries() {
        // Multibyte characters count as one, and slicing stays on boundaries
        let rule = SplitRule::SplitAt(4);
        let parts = rule.split("ÄB11_1000").unwrap();
        assert_eq!(parts.head, "ÄB11");
        assert_eq!(parts.tail, "_1000");
    }

    #[test]
    fn test_head_tail_split() {
        let rule = SplitRule::HeadTail { head: 4, tail: 4 };
        let parts = rule.split("CB11_1000_4532").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "4532");
    }

    #[test]
    fn test_head_tail_too_short() {
        let rule = SplitRule::HeadTail { head: 4, tail: 4 };
        let err = rule.split("CB11_45").unwrap_err();
        assert_eq!(
            err,
            CodeError::TooShort {
                code: "CB11_45".to_string(),
                needed: 8
            }
        );
    }

    #[test]
    fn test_regex_split() {
        let rule: SplitRule = r"regex:^([A-Z]+\d+)_(.+)$".parse().unwrap();
        let parts = rule.split("CB11_1000_4532").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "1000_4532");
    }

    #[test]
    fn test_regex_no_match() {
        let rule: SplitRule = r"regex:^([A-Z]+)_(\d+)$".parse().unwrap();
        let err = rule.split("1234").unwrap_err();
        assert!(matches!(err, CodeError::NoMatch { .. }));
    }

    #[test]
    fn test_parse_split_form() {
        let rule: SplitRule = "split:6".parse().unwrap();
        assert!(matches!(rule, SplitRule::SplitAt(6)));
    }

    #[test]
    fn test_parse_ends_form() {
        let rule: SplitRule = "ends:4:4".parse().unwrap();
        assert!(matches!(rule, SplitRule::HeadTail { head: 4, tail: 4 }));
    }

    #[test]
    fn test_parse_unknown_form() {
        let err = "first:4".parse::<SplitRule>().unwrap_err();
        assert!(matches!(err, RuleParseError::UnknownForm(_)));
    }

    #[test]
    fn test_parse_invalid_count() {
        let err = "split:four".parse::<SplitRule>().unwrap_err();
        assert!(matches!(err, RuleParseError::InvalidCount(_)));

        let err = "ends:4".parse::<SplitRule>().unwrap_err();
        assert!(matches!(err, RuleParseError::InvalidCount(_)));
    }

    #[test]
    fn test_parse_regex_group_count() {
        let err = r"regex:^\w+$".parse::<SplitRule>().unwrap_err();
        assert_eq!(err, RuleParseError::GroupCount(0));

        let err = r"regex:^(\w)(\w)(\w+)$".parse::<SplitRule>().unwrap_err();
        assert_eq!(err, RuleParseError::GroupCount(3));
    }

    #[test]
    fn test_display_roundtrip() {
        for form in ["split:4", "ends:4:4", r"regex:^(\w{4})(.*)$"] {
            let rule: SplitRule = form.parse().unwrap();
            assert_eq!(rule.to_string(), form);
        }
    }

    #[test]
    fn test_default_rule() {
        let parts = SplitRule::default().split("CB11_1000_4532").unwrap();
        assert_eq!(parts.head, "CB11");
        assert_eq!(parts.tail, "4532");
    }
}
