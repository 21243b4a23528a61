//! Shape checks on submitted credentials.

use validator::ValidateEmail;

use servicehub_core::error::AppError;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Stateless email and password policy checks.
#[derive(Debug, Clone, Default)]
pub struct CredentialValidator;

impl CredentialValidator {
    /// Creates a new validator.
    pub fn new() -> Self {
        Self
    }

    /// Checks both the email format and the password policy.
    pub fn validate_credentials(&self, email: &str, password: &str) -> Result<(), AppError> {
        self.validate_email(email)?;
        self.validate_password(password)
    }

    /// The email must be a syntactically valid mailbox address.
    pub fn validate_email(&self, email: &str) -> Result<(), AppError> {
        let email = email.trim();
        if email.is_empty() || !email.validate_email() {
            return Err(AppError::bad_request("invalid email format"));
        }
        Ok(())
    }

    /// The password must be at least [`MIN_PASSWORD_LENGTH`] characters and
    /// contain an uppercase letter, a lowercase letter, a digit, and a
    /// symbol or punctuation character.
    pub fn validate_password(&self, password: &str) -> Result<(), AppError> {
        if password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(AppError::bad_request(format!(
                "password must be at least {MIN_PASSWORD_LENGTH} characters"
            )));
        }

        let (mut upper, mut lower, mut digit, mut symbol) = (false, false, false, false);
        for c in password.chars() {
            if c.is_uppercase() {
                upper = true;
            } else if c.is_lowercase() {
                lower = true;
            } else if c.is_numeric() {
                digit = true;
            } else if !c.is_alphanumeric() && !c.is_whitespace() && !c.is_control() {
                symbol = true;
            }
        }

        if !(upper && lower && digit && symbol) {
            return Err(AppError::bad_request(
                "password must contain uppercase, lowercase, number and symbol",
            ));
        }
        Ok(())
    }
}
