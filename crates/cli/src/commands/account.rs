//! Account form commands.
//!
//! Only validation happens here; an accepted form is reported as successful.

use riddim_storefront::AppError;
use riddim_storefront::accounts::{LoginForm, RegistrationForm};
use secrecy::SecretString;

/// Validate a login form.
///
/// # Errors
///
/// Returns `AppError::Form` with every failing field.
pub fn login(username: String, password: String) -> Result<(), AppError> {
    let form = LoginForm {
        username,
        password: SecretString::from(password),
    };
    form.validate()?;
    println!("Login successful!");
    Ok(())
}

/// Validate a registration form.
///
/// # Errors
///
/// Returns `AppError::Form` with every failing field.
pub fn register(
    full_name: String,
    email: String,
    username: String,
    password: String,
    confirm_password: String,
) -> Result<(), AppError> {
    let form = RegistrationForm {
        full_name,
        email,
        username,
        password: SecretString::from(password),
        confirm_password: SecretString::from(confirm_password),
    };
    form.validate()?;
    println!("Registration successful!");
    Ok(())
}
