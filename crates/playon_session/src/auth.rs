// --- File: crates/playon_session/src/auth.rs ---
use playon_common::models::{Registration, User};
use playon_common::services::AuthService;
use playon_common::PlayonError;
use std::sync::Arc;
use tracing::{info, warn};

use crate::store::SessionStore;
use crate::validation::{validate_email, FormError, LoginForm, RegistrationForm};

/// Screens of the account page, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignUpStep {
    Login,
    Email,
    Verify,
    Register,
}

/// Progress through sign-up: which step is shown, and what earlier steps
/// established (the email the code went to, and the code itself).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignUpWizard {
    step: SignUpStep,
    email: Option<String>,
    code: Option<String>,
}

impl Default for SignUpWizard {
    fn default() -> Self {
        Self {
            step: SignUpStep::Login,
            email: None,
            code: None,
        }
    }
}

impl SignUpWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(&self) -> SignUpStep {
        self.step
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Leaves the login screen for the email step.
    pub fn start(&mut self) {
        self.step = SignUpStep::Email;
    }

    /// Goes back one step; going back to Email forgets the sent code.
    pub fn back(&mut self) {
        self.step = match self.step {
            SignUpStep::Login | SignUpStep::Email => SignUpStep::Login,
            SignUpStep::Verify => {
                self.code = None;
                SignUpStep::Email
            }
            SignUpStep::Register => SignUpStep::Verify,
        };
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Compares the typed code with the one the server sent, ignoring
    /// surrounding whitespace. A match moves on to registration.
    pub fn verify_code(&mut self, typed: &str) -> Result<(), FormError> {
        if self.step != SignUpStep::Verify {
            return Err(FormError::OutOfOrder);
        }
        match &self.code {
            Some(code) if code.trim() == typed.trim() => {
                self.step = SignUpStep::Register;
                Ok(())
            }
            _ => Err(FormError::WrongCode),
        }
    }
}

/// Login, sign-up and logout on top of the auth endpoints and the session.
pub struct AuthFlow {
    auth: Arc<dyn AuthService>,
    session: Arc<SessionStore>,
}

impl AuthFlow {
    pub fn new(auth: Arc<dyn AuthService>, session: Arc<SessionStore>) -> Self {
        Self { auth, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub async fn login(&self, form: &LoginForm) -> Result<User, PlayonError> {
        form.validate()?;
        let user = self
            .auth
            .login(form.email.trim(), &form.password)
            .await
            .inspect_err(|err| warn!("Login of {} failed: {}", form.email.trim(), err))?;
        self.session.set_user(user.clone())?;
        Ok(user)
    }

    /// Emails a verification code and advances the wizard to Verify.
    pub async fn send_code(&self, wizard: &mut SignUpWizard, email: &str) -> Result<(), PlayonError> {
        if wizard.step != SignUpStep::Email {
            return Err(FormError::OutOfOrder.into());
        }
        validate_email(email)?;
        let email = email.trim().to_string();
        let code = self.auth.send_email_code(&email).await?;
        info!("Verification code sent to {}", email);
        wizard.email = Some(email);
        wizard.code = Some(code);
        wizard.step = SignUpStep::Verify;
        Ok(())
    }

    /// Creates the account for the verified email and signs it in.
    pub async fn register(
        &self,
        wizard: &mut SignUpWizard,
        form: &RegistrationForm,
    ) -> Result<User, PlayonError> {
        let email = match (&wizard.step, &wizard.email) {
            (SignUpStep::Register, Some(email)) => email.clone(),
            _ => return Err(FormError::OutOfOrder.into()),
        };
        form.validate()?;
        let registration = Registration {
            email,
            password: form.password.clone(),
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
        };
        let user = self.auth.register(registration).await?;
        self.session.set_user(user.clone())?;
        info!("Registered user {}", user.id);
        wizard.reset();
        Ok(user)
    }

    pub fn logout(&self) -> Result<(), PlayonError> {
        self.session.clear()
    }
}
