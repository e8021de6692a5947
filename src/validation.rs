//! Validation of the requested password length.

use std::fmt;
use std::num::IntErrorKind;
use std::str::FromStr;

/// A password length that has passed validation.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct PasswordLength(usize);

impl PasswordLength {
    pub const MIN: usize = 4;
    pub const MAX: usize = 16;

    pub fn new(length: usize) -> Result<PasswordLength, LengthError> {
        if length < Self::MIN {
            Err(LengthError::TooShort)
        } else if length > Self::MAX {
            Err(LengthError::TooLong)
        } else {
            Ok(PasswordLength(length))
        }
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for PasswordLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for PasswordLength {
    type Err = LengthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        validate_length(s)
    }
}

/// Why a length was rejected. The messages are shown to the user as-is.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum LengthError {
    #[error("Length is required")]
    Missing,
    #[error("Length must be a number")]
    NotANumber,
    #[error("Should be min of 4 characters")]
    TooShort,
    #[error("Should be max of 16 characters")]
    TooLong,
}

/// Check the raw text of the length field.
///
/// Surrounding whitespace is ignored. Anything that does not parse as a base-10 integer is
/// [`LengthError::NotANumber`]; integers too large to represent still report which end of the
/// range they missed.
pub fn validate_length(raw: &str) -> Result<PasswordLength, LengthError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(LengthError::Missing);
    }
    let value = match raw.parse::<i64>() {
        Ok(v) => v,
        Err(err) => {
            return Err(match err.kind() {
                IntErrorKind::PosOverflow => LengthError::TooLong,
                IntErrorKind::NegOverflow => LengthError::TooShort,
                _ => LengthError::NotANumber,
            })
        }
    };
    if value < 0 {
        return Err(LengthError::TooShort);
    }
    match usize::try_from(value) {
        Ok(v) => PasswordLength::new(v),
        Err(_) => Err(LengthError::TooLong),
    }
}
