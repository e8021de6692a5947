//! Configure and generate random passwords.
//!
//! The crate is split the way the form it backs is split: [`validation`] checks the requested
//! length, [`password_generation`] builds the character pool and samples it, and [`form`] ties
//! both together as a single state value that is moved forward by discrete actions.

use serde::{Deserialize, Serialize};

pub mod form;
pub mod password_generation;
pub mod validation;

pub use form::{Action, FormError, FormState, Status};
pub use password_generation::{
    build_pool, generate_random_password, CharacterClass, CharacterClasses, EmptyPoolError,
    IndexSource, Pool,
};
pub use validation::{validate_length, LengthError, PasswordLength};

/// A generated password.
///
/// The `Debug` output never contains the password; use [`Secret::as_str`] to get at it.
#[derive(Clone, Eq, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Secret(String);

opaque_debug::implement!(Secret);

impl Secret {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The number of characters (not bytes) in the password.
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl From<String> for Secret {
    fn from(s: String) -> Secret {
        Secret(s)
    }
}
