//! Utilities for generating passwords.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::validation::PasswordLength;

static UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
static LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
static DIGITS: &str = "0123456789";
static SYMBOLS: &str = "!@#$%^&*()_+";

/// One of the predefined groups of characters a password can draw from.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CharacterClass {
    Upper,
    Lower,
    Digits,
    Symbols,
}

impl CharacterClass {
    /// Every class, in the order their characters appear in a [`Pool`].
    pub const ALL: [CharacterClass; 4] = [
        CharacterClass::Upper,
        CharacterClass::Lower,
        CharacterClass::Digits,
        CharacterClass::Symbols,
    ];

    pub fn literal(self) -> &'static str {
        match self {
            CharacterClass::Upper => UPPERCASE,
            CharacterClass::Lower => LOWERCASE,
            CharacterClass::Digits => DIGITS,
            CharacterClass::Symbols => SYMBOLS,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CharacterClass::Upper => "Include uppercase letters",
            CharacterClass::Lower => "Include lowercase",
            CharacterClass::Digits => "Include numbers",
            CharacterClass::Symbols => "Include symbols",
        }
    }
}

/// Which character classes are enabled.
///
/// The default enables only lowercase letters.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
pub struct CharacterClasses {
    pub upper: bool,
    pub lower: bool,
    pub digits: bool,
    pub symbols: bool,
}

impl Default for CharacterClasses {
    fn default() -> Self {
        CharacterClasses {
            upper: false,
            lower: true,
            digits: false,
            symbols: false,
        }
    }
}

impl CharacterClasses {
    pub fn is_enabled(&self, class: CharacterClass) -> bool {
        match class {
            CharacterClass::Upper => self.upper,
            CharacterClass::Lower => self.lower,
            CharacterClass::Digits => self.digits,
            CharacterClass::Symbols => self.symbols,
        }
    }

    pub fn set(&mut self, class: CharacterClass, enabled: bool) {
        let flag = match class {
            CharacterClass::Upper => &mut self.upper,
            CharacterClass::Lower => &mut self.lower,
            CharacterClass::Digits => &mut self.digits,
            CharacterClass::Symbols => &mut self.symbols,
        };
        *flag = enabled;
    }

    /// Returns a copy with `class` flipped.
    pub fn toggled(mut self, class: CharacterClass) -> CharacterClasses {
        let enabled = self.is_enabled(class);
        self.set(class, !enabled);
        self
    }

    pub fn any(&self) -> bool {
        CharacterClass::ALL.iter().any(|c| self.is_enabled(*c))
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
#[error("Select at least one character class")]
pub struct EmptyPoolError;

/// The characters a password is sampled from. Never empty.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Pool(Vec<char>);

impl Pool {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn as_chars(&self) -> &[char] {
        &self.0
    }

    pub fn contains(&self, ch: char) -> bool {
        self.0.contains(&ch)
    }
}

impl fmt::Display for Pool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for ch in &self.0 {
            write!(f, "{}", ch)?;
        }
        Ok(())
    }
}

/// Concatenate the literals of every enabled class, always in the order upper, lower, digits,
/// symbols.
pub fn build_pool(selection: &CharacterClasses) -> Result<Pool, EmptyPoolError> {
    let mut chars = Vec::new();
    for class in CharacterClass::ALL {
        if selection.is_enabled(class) {
            chars.extend(class.literal().chars());
        }
    }
    if chars.is_empty() {
        return Err(EmptyPoolError);
    }
    log::debug!("built a pool of {} characters from {:?}", chars.len(), selection);
    Ok(Pool(chars))
}

/// A source of uniformly distributed indices.
///
/// Any [`rand::Rng`] is one; [`from_fn`] adapts a closure, which is handy for scripting exact
/// draws in tests.
pub trait IndexSource {
    /// Returns an index in `0..upper`. `upper` is never zero.
    fn next_index(&mut self, upper: usize) -> usize;
}

impl<R: Rng + ?Sized> IndexSource for R {
    fn next_index(&mut self, upper: usize) -> usize {
        self.gen_range(0..upper)
    }
}

/// An [`IndexSource`] backed by a closure.
pub struct FnSource<F>(F);

pub fn from_fn<F>(f: F) -> FnSource<F>
where
    F: FnMut(usize) -> usize,
{
    FnSource(f)
}

impl<F> IndexSource for FnSource<F>
where
    F: FnMut(usize) -> usize,
{
    fn next_index(&mut self, upper: usize) -> usize {
        (self.0)(upper)
    }
}

/// Generate a password by independently sampling `pool`, with replacement, once per position.
///
/// An index at or past the end of the pool (which a well-behaved source never returns) is
/// clamped to the last character.
pub fn generate_random_password<S>(source: &mut S, pool: &Pool, length: PasswordLength) -> crate::Secret
where
    S: IndexSource + ?Sized,
{
    let last = pool.len() - 1;
    let mut secret = String::with_capacity(length.get());
    for _ in 0..length.get() {
        let idx = source.next_index(pool.len()).min(last);
        secret.push(pool.0[idx]);
    }
    crate::Secret::from(secret)
}
