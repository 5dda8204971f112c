//! Player name rules for leaderboard entries.

use std::fmt;

use crate::types::MAX_NAME_CHARS;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    Empty,
    TooLong { max: usize },
}

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "please enter a name"),
            Self::TooLong { max } => write!(f, "names are limited to {max} characters"),
        }
    }
}

impl std::error::Error for NameError {}

/// Trim and check a name typed by the player.
pub fn validate_name(raw: &str) -> Result<String, NameError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(NameError::TooLong {
            max: MAX_NAME_CHARS,
        });
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_and_accepts() {
        assert_eq!(validate_name("  kim ").unwrap(), "kim");
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert_eq!(validate_name(""), Err(NameError::Empty));
        assert_eq!(validate_name("   "), Err(NameError::Empty));
    }

    #[test]
    fn limit_counts_characters_not_bytes() {
        assert!(validate_name("abcdefgh").is_ok());
        assert_eq!(
            validate_name("abcdefghi"),
            Err(NameError::TooLong { max: 8 })
        );
        // Eight multi-byte characters still fit.
        assert!(validate_name("사과사과사과사과").is_ok());
    }
}
