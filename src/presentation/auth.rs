//! Session state and the sign-up form.

use super::ScreenStatus;
use crate::domain::{AuthUser, DomainError};
use crate::usecases::sign_up::MIN_SIGN_UP_PASSWORD_CHARS;
use crate::usecases::{DeleteAccountUseCase, SignInUseCase, SignOutUseCase, SignUpUseCase};

pub const GUEST_NAME: &str = "Guest";

/// Validation and auth failures show their own text.
fn auth_error_message(err: &DomainError, fallback_prefix: &str) -> String {
    match err {
        DomainError::Validation(v) => v.to_string(),
        DomainError::Auth(a) => a.to_string(),
        other => format!("{fallback_prefix}: {other}"),
    }
}

#[derive(Debug, Clone, Default)]
pub struct AuthState {
    pub current_user: Option<AuthUser>,
    pub is_signed_in: bool,
    pub status: ScreenStatus,
}

impl AuthState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.status.begin();
    }

    pub fn apply_signed_in(&mut self, result: Result<AuthUser, DomainError>) {
        match result {
            Ok(user) => {
                self.current_user = Some(user);
                self.is_signed_in = true;
            }
            Err(err) => self.fail(&err),
        }
        self.status.finish();
    }

    /// Sign-out and account deletion both end the session on success.
    pub fn apply_signed_out(&mut self, result: Result<(), DomainError>) {
        match result {
            Ok(()) => {
                self.current_user = None;
                self.is_signed_in = false;
            }
            Err(err) => self.fail(&err),
        }
        self.status.finish();
    }

    fn fail(&mut self, err: &DomainError) {
        self.status
            .fail(auth_error_message(err, "An error occurred"));
    }

    pub async fn sign_in_with(&mut self, sign_in: &SignInUseCase, email: &str, password: &str) {
        self.begin();
        self.apply_signed_in(sign_in.execute(email, password).await);
    }

    pub async fn sign_out_with(&mut self, sign_out: &SignOutUseCase) {
        self.begin();
        self.apply_signed_out(sign_out.execute().await);
    }

    pub async fn delete_account_with(&mut self, delete: &DeleteAccountUseCase) {
        self.begin();
        self.apply_signed_out(delete.execute().await);
    }

    pub fn has_valid_session(&self) -> bool {
        self.current_user.is_some() && self.is_signed_in
    }

    pub fn user_display_name(&self) -> &str {
        self.current_user
            .as_ref()
            .map_or(GUEST_NAME, |user| user.email.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordStrength {
    Empty,
    Weak,
    Medium,
    Strong,
}

impl PasswordStrength {
    /// Under 8 characters is weak; 8 or more with both a digit and a letter is strong.
    pub fn of(password: &str) -> Self {
        if password.is_empty() {
            return Self::Empty;
        }
        if password.chars().count() < MIN_SIGN_UP_PASSWORD_CHARS {
            return Self::Weak;
        }
        let has_digit = password.chars().any(char::is_numeric);
        let has_letter = password.chars().any(char::is_alphabetic);
        if has_digit && has_letter {
            Self::Strong
        } else {
            Self::Medium
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Empty => "",
            Self::Weak => "Weak",
            Self::Medium => "Medium",
            Self::Strong => "Strong",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub email: String,
    pub password: String,
    pub is_password_visible: bool,
    pub is_showing_success: bool,
    pub status: ScreenStatus,
}

impl SignUpForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&mut self) {
        self.status.begin();
    }

    /// Success clears the form.
    pub fn apply_signed_up(&mut self, result: Result<(), DomainError>) {
        match result {
            Ok(()) => {
                self.is_showing_success = true;
                self.clear_form();
            }
            Err(err) => self
                .status
                .fail(auth_error_message(&err, "Failed to create the account")),
        }
        self.status.finish();
    }

    pub async fn sign_up_with(&mut self, sign_up: &SignUpUseCase) {
        self.begin();
        let result = sign_up.execute(&self.email, &self.password).await;
        self.apply_signed_up(result);
    }

    pub fn clear_form(&mut self) {
        self.email.clear();
        self.password.clear();
        self.is_password_visible = false;
        self.status.error_message = None;
    }

    pub fn toggle_password_visibility(&mut self) {
        self.is_password_visible = !self.is_password_visible;
    }

    pub fn can_sign_up(&self) -> bool {
        !self.email.trim().is_empty()
            && self.password.chars().count() >= MIN_SIGN_UP_PASSWORD_CHARS
            && !self.status.is_loading
    }

    pub fn password_strength(&self) -> PasswordStrength {
        PasswordStrength::of(&self.password)
    }
}
