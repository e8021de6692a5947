//! The password form as a single state value.
//!
//! A [`FormState`] is never mutated in place: [`FormState::reduce`] takes an [`Action`] and
//! returns the next state. Randomness comes in through an [`IndexSource`], so the same
//! sequence of actions with the same source always lands on the same state.

use crate::password_generation::{
    build_pool, generate_random_password, CharacterClass, CharacterClasses, EmptyPoolError,
    IndexSource, Pool,
};
use crate::validation::{validate_length, LengthError, PasswordLength};
use crate::Secret;

/// Something the user did to the form.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Action {
    ToggleClass(CharacterClass),
    /// Replace the text of the length field.
    SetLength(String),
    /// The length field was interacted with but not changed.
    Touch,
    Submit,
    Reset,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    /// No password is shown.
    Idle,
    /// A generated password is shown.
    Shown,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FormError {
    #[error(transparent)]
    Length(#[from] LengthError),
    #[error(transparent)]
    EmptyPool(#[from] EmptyPoolError),
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct FormState {
    length_text: String,
    touched: bool,
    classes: CharacterClasses,
    password: Option<Secret>,
}

impl FormState {
    pub fn new() -> FormState {
        FormState::default()
    }

    pub fn reduce<S>(&self, action: Action, source: &mut S) -> FormState
    where
        S: IndexSource + ?Sized,
    {
        log::debug!("form action: {:?}", action);
        match action {
            Action::ToggleClass(class) => FormState {
                classes: self.classes.toggled(class),
                ..self.clone()
            },
            Action::SetLength(text) => FormState {
                length_text: text,
                touched: true,
                ..self.clone()
            },
            Action::Touch => FormState {
                touched: true,
                ..self.clone()
            },
            Action::Submit => {
                let touched = FormState {
                    touched: true,
                    ..self.clone()
                };
                match self.validate() {
                    Ok((length, pool)) => FormState {
                        password: Some(generate_random_password(source, &pool, length)),
                        ..touched
                    },
                    Err(err) => {
                        log::info!("submit blocked: {}", err);
                        touched
                    }
                }
            }
            Action::Reset => FormState::default(),
        }
    }

    /// Everything generation needs, or the first reason it can't run.
    ///
    /// The length is checked before the character classes.
    pub fn validate(&self) -> Result<(PasswordLength, Pool), FormError> {
        let length = validate_length(&self.length_text)?;
        let pool = build_pool(&self.classes)?;
        Ok((length, pool))
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    /// The length error to display under the field. Nothing is shown until the field has been
    /// touched.
    pub fn field_error(&self) -> Option<LengthError> {
        if !self.touched {
            return None;
        }
        validate_length(&self.length_text).err()
    }

    pub fn status(&self) -> Status {
        match self.password {
            Some(_) => Status::Shown,
            None => Status::Idle,
        }
    }

    pub fn password(&self) -> Option<&Secret> {
        self.password.as_ref()
    }

    pub fn length_text(&self) -> &str {
        &self.length_text
    }

    pub fn classes(&self) -> CharacterClasses {
        self.classes
    }

    pub fn is_touched(&self) -> bool {
        self.touched
    }
}
