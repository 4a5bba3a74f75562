// --- File: crates/playon_session/src/validation.rs ---
use playon_common::PlayonError;
use thiserror::Error;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Enter a valid email address")]
    InvalidEmail,
    #[error("The password needs at least 6 characters")]
    PasswordTooShort,
    #[error("The passwords do not match")]
    PasswordMismatch,
    #[error("{0} is required")]
    Required(&'static str),
    #[error("The verification code is not correct")]
    WrongCode,
    #[error("Finish the previous step first")]
    OutOfOrder,
}

impl From<FormError> for PlayonError {
    fn from(err: FormError) -> Self {
        PlayonError::ValidationError(err.to_string())
    }
}

/// `local@domain.tld` with no whitespace.
pub fn validate_email(email: &str) -> Result<(), FormError> {
    let email = email.trim();
    let (local, domain) = email.split_once('@').ok_or(FormError::InvalidEmail)?;
    let valid = !local.is_empty()
        && !domain.contains('@')
        && !email.chars().any(char::is_whitespace)
        && domain
            .split_once('.')
            .map(|(host, _)| !host.is_empty())
            .unwrap_or(false)
        && !domain.ends_with('.');
    if valid {
        Ok(())
    } else {
        Err(FormError::InvalidEmail)
    }
}

pub fn validate_password(password: &str) -> Result<(), FormError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(FormError::PasswordTooShort);
    }
    Ok(())
}

fn require(value: &str, field: &'static str) -> Result<(), FormError> {
    if value.trim().is_empty() {
        return Err(FormError::Required(field));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), FormError> {
        validate_email(&self.email)?;
        validate_password(&self.password)
    }
}

/// Last step of the sign-up wizard. The email comes from the verified step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub phone: String,
    pub password: String,
    pub password_confirmation: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), FormError> {
        require(&self.name, "Name")?;
        require(&self.phone, "Phone")?;
        validate_password(&self.password)?;
        if self.password != self.password_confirmation {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}
