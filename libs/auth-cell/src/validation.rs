use tracing::instrument;

use shared_models::{FieldErrors, LoginCredentials};
use shared_utils::rules::{is_blank, is_valid_email, password_issues};

/// Generic login form: email present and well-formed, password present.
#[instrument(skip_all)]
pub fn validate_login(credentials: &LoginCredentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if is_blank(&credentials.email) {
        errors.add("email", "Email is required");
    } else if !is_valid_email(&credentials.email) {
        errors.add("email", "Invalid email address");
    }
    errors.check(credentials.password.is_empty(), "password", "Password is required");

    errors.into_result()
}

/// Doctor login form, which also enforces password strength.
#[instrument(skip_all)]
pub fn validate_doctor_login(credentials: &LoginCredentials) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();

    if !is_valid_email(&credentials.email) {
        errors.add("email", "Please enter a valid email address");
    }
    if is_blank(&credentials.email) {
        errors.add("email", "Email is required");
    }
    for issue in password_issues(&credentials.password) {
        errors.add("password", issue);
    }

    errors.into_result()
}
