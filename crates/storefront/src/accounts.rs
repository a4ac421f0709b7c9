//! Login and registration form validation.
//!
//! There is no account backend: a form that validates is simply accepted.
//! Validation mirrors the store's form rules. Blank fields are not checked,
//! so a field only fails when a value was entered and it is wrong.

use std::collections::BTreeMap;
use std::fmt;

use riddim_core::Email;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_FULL_NAME_LENGTH: usize = 2;
const MIN_USERNAME_LENGTH: usize = 3;
const MIN_PASSWORD_LENGTH: usize = 6;

/// Form fields that can carry a validation error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    FullName,
    Email,
    Username,
    Password,
    ConfirmPassword,
}

impl FormField {
    /// Field identifier as used by the form markup.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullName => "fullName",
            Self::Email => "email",
            Self::Username => "username",
            Self::Password => "password",
            Self::ConfirmPassword => "confirmPassword",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation messages, ordered by field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} form field(s) failed validation", .0.len())]
pub struct FormErrors(BTreeMap<FormField, &'static str>);

impl FormErrors {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message for `field`, if it failed.
    #[must_use]
    pub fn get(&self, field: FormField) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    /// Failed fields and their messages, in field order.
    pub fn iter(&self) -> impl Iterator<Item = (FormField, &'static str)> + '_ {
        self.0.iter().map(|(field, message)| (*field, *message))
    }

    fn insert(&mut self, field: FormField, message: &'static str) {
        self.0.insert(field, message);
    }

    fn into_result(self) -> Result<(), Self> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

/// Login form input.
#[derive(Debug)]
pub struct LoginForm {
    pub username: String,
    pub password: SecretString,
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` listing every field that failed.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();
        check_username(&self.username, &mut errors);
        check_password(&self.password, &mut errors);
        errors.into_result()
    }
}

/// Registration form input.
#[derive(Debug)]
pub struct RegistrationForm {
    pub full_name: String,
    pub email: String,
    pub username: String,
    pub password: SecretString,
    pub confirm_password: SecretString,
}

impl RegistrationForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns `FormErrors` listing every field that failed.
    pub fn validate(&self) -> Result<(), FormErrors> {
        let mut errors = FormErrors::default();

        if !self.full_name.is_empty() && self.full_name.trim().chars().count() < MIN_FULL_NAME_LENGTH
        {
            errors.insert(
                FormField::FullName,
                "Full name must be at least 2 characters long",
            );
        }

        if !self.email.is_empty() && Email::parse(&self.email).is_err() {
            errors.insert(FormField::Email, "Please enter a valid email address");
        }

        check_username(&self.username, &mut errors);
        check_password(&self.password, &mut errors);

        let confirm = self.confirm_password.expose_secret();
        if !confirm.is_empty() && confirm != self.password.expose_secret() {
            errors.insert(FormField::ConfirmPassword, "Passwords do not match");
        }

        errors.into_result()
    }
}

fn check_username(username: &str, errors: &mut FormErrors) {
    if !username.is_empty() && username.trim().chars().count() < MIN_USERNAME_LENGTH {
        errors.insert(
            FormField::Username,
            "Username must be at least 3 characters long",
        );
    }
}

fn check_password(password: &SecretString, errors: &mut FormErrors) {
    let password = password.expose_secret();
    if !password.is_empty() && password.chars().count() < MIN_PASSWORD_LENGTH {
        errors.insert(
            FormField::Password,
            "Password must be at least 6 characters long",
        );
    }
}
