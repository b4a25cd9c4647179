//! Player Name Value Object
//!
//! The display name is a secondary, mutable lookup key. It is never used as a
//! storage key: every write first resolves it to a [`PlayerId`].
//!
//! ## Invariants
//! - Length: 1 to 32 characters after trimming
//! - ASCII letters, digits, `_` and `.` only
//! - Never contains the identity delimiter (`-`), so a stored key can be told
//!   apart from a name
//!
//! Comparisons use the lowercase canonical form; the original spelling is kept
//! for display.
//!
//! [`PlayerId`]: super::player_id::PlayerId

use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum length for a player name (in characters)
pub const PLAYER_NAME_MAX_LENGTH: usize = 32;

/// Allowed special characters in a player name
const ALLOWED_SPECIAL_CHARS: &[char] = &['_', '.'];

/// Error returned when player name validation fails
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerNameError {
    Empty,
    TooLong { length: usize, max: usize },
    InvalidCharacter { char: char, position: usize },
}

impl fmt::Display for PlayerNameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Player name cannot be empty"),
            Self::TooLong { length, max } => {
                write!(f, "Player name is too long ({length} chars, maximum {max})")
            }
            Self::InvalidCharacter { char, position } => {
                write!(
                    f,
                    "Invalid character '{char}' at position {position}. Only A-Z, a-z, 0-9, _ and . are allowed"
                )
            }
        }
    }
}

impl std::error::Error for PlayerNameError {}

/// Validated player name
#[derive(Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PlayerName {
    original: String,
    canonical: String,
}

impl PlayerName {
    pub fn new(input: impl AsRef<str>) -> Result<Self, PlayerNameError> {
        let original = input.as_ref().trim().to_string();
        Self::validate(&original)?;
        let canonical = original.to_ascii_lowercase();
        Ok(Self {
            original,
            canonical,
        })
    }

    /// Spelling as last seen
    #[inline]
    pub fn original(&self) -> &str {
        &self.original
    }

    /// Lowercase form used for lookups
    #[inline]
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    fn validate(name: &str) -> Result<(), PlayerNameError> {
        if name.is_empty() {
            return Err(PlayerNameError::Empty);
        }

        let length = name.chars().count();
        if length > PLAYER_NAME_MAX_LENGTH {
            return Err(PlayerNameError::TooLong {
                length,
                max: PLAYER_NAME_MAX_LENGTH,
            });
        }

        match name
            .chars()
            .enumerate()
            .find(|(_, c)| !Self::is_valid_char(*c))
        {
            Some((position, char)) => Err(PlayerNameError::InvalidCharacter { char, position }),
            None => Ok(()),
        }
    }

    #[inline]
    fn is_valid_char(c: char) -> bool {
        c.is_ascii_alphanumeric() || ALLOWED_SPECIAL_CHARS.contains(&c)
    }
}

impl PartialEq for PlayerName {
    fn eq(&self, other: &Self) -> bool {
        self.canonical == other.canonical
    }
}

impl Eq for PlayerName {}

impl std::hash::Hash for PlayerName {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.canonical.hash(state);
    }
}

impl fmt::Debug for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("PlayerName").field(&self.original).finish()
    }
}

impl fmt::Display for PlayerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.original)
    }
}

impl AsRef<str> for PlayerName {
    fn as_ref(&self) -> &str {
        &self.canonical
    }
}

impl TryFrom<String> for PlayerName {
    type Error = PlayerNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PlayerName {
    type Error = PlayerNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<PlayerName> for String {
    fn from(name: PlayerName) -> Self {
        name.original
    }
}
