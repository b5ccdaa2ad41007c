//! Login View
//!
//! Two independent forms behind a mode toggle. The view never decides who
//! gets in: it packs the active form into [`Credentials`] for the
//! [`Authenticator`](cardbank_auth::Authenticator) and reports the
//! resulting [`Grant`] upward. Its only state is the form fields, the error
//! line and whether a verdict is pending.

use cardbank_auth::{AuthResult, Credentials, Grant};

use crate::input::InputField;

/// Which form is interactable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginMode {
    #[default]
    Customer,
    Admin,
}

impl LoginMode {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Customer => "Customer Login",
            Self::Admin => "Admin Login",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Customer => Self::Admin,
            Self::Admin => Self::Customer,
        }
    }

    /// Fields of this mode's form, in focus order
    pub fn fields(&self) -> &'static [LoginField] {
        match self {
            Self::Customer => &[LoginField::CardNumber, LoginField::Pin],
            Self::Admin => &[LoginField::Username, LoginField::Password],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    CardNumber,
    Pin,
    Username,
    Password,
}

impl LoginField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CardNumber => "Card Number",
            Self::Pin => "PIN",
            Self::Username => "Username",
            Self::Password => "Password",
        }
    }
}

/// Login screen state
#[derive(Debug, Clone)]
pub struct LoginView {
    mode: LoginMode,
    focus: usize,
    card_number: InputField,
    pin: InputField,
    username: InputField,
    password: InputField,
    error: Option<String>,
    verifying: bool,
}

impl Default for LoginView {
    fn default() -> Self {
        Self::new()
    }
}

impl LoginView {
    pub fn new() -> Self {
        Self {
            mode: LoginMode::Customer,
            focus: 0,
            card_number: InputField::new().with_max_len(16),
            pin: InputField::new().with_max_len(4).secret(),
            username: InputField::new(),
            password: InputField::new().secret(),
            error: None,
            verifying: false,
        }
    }

    pub fn mode(&self) -> LoginMode {
        self.mode
    }

    /// Switch forms; clears the error and focuses the first field
    pub fn set_mode(&mut self, mode: LoginMode) {
        self.mode = mode;
        self.focus = 0;
        self.error = None;
    }

    pub fn toggle_mode(&mut self) {
        self.set_mode(self.mode.toggled());
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn focused_field(&self) -> LoginField {
        let fields = self.mode.fields();
        fields[self.focus % fields.len()]
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % self.mode.fields().len();
    }

    pub fn focus_prev(&mut self) {
        let len = self.mode.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    pub fn field(&self, field: LoginField) -> &InputField {
        match field {
            LoginField::CardNumber => &self.card_number,
            LoginField::Pin => &self.pin,
            LoginField::Username => &self.username,
            LoginField::Password => &self.password,
        }
    }

    pub fn field_mut(&mut self, field: LoginField) -> &mut InputField {
        match field {
            LoginField::CardNumber => &mut self.card_number,
            LoginField::Pin => &mut self.pin,
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Type into the focused field
    pub fn input(&mut self, c: char) {
        let field = self.focused_field();
        self.field_mut(field).push(c);
    }

    pub fn backspace(&mut self) {
        let field = self.focused_field();
        self.field_mut(field).pop();
    }

    /// Show/hide the secret of the active form
    pub fn toggle_reveal(&mut self) {
        match self.mode {
            LoginMode::Customer => self.pin.toggle_reveal(),
            LoginMode::Admin => self.password.toggle_reveal(),
        }
    }

    /// Credentials from the active form only
    pub fn credentials(&self) -> Credentials {
        match self.mode {
            LoginMode::Customer => Credentials::Card {
                card_number: self.card_number.value().to_string(),
                pin: self.pin.value().to_string(),
            },
            LoginMode::Admin => Credentials::Admin {
                username: self.username.value().to_string(),
                password: self.password.value().to_string(),
            },
        }
    }

    /// Whether a submission is waiting for the authenticator
    pub fn is_verifying(&self) -> bool {
        self.verifying
    }

    /// Start a submission of the active form. Returns `None` while an
    /// earlier one is still being verified.
    pub fn begin_submit(&mut self) -> Option<Credentials> {
        if self.verifying {
            return None;
        }
        self.verifying = true;
        self.error = None;
        Some(self.credentials())
    }

    /// Apply the authenticator's verdict. On rejection the error line shows
    /// why and `None` comes back; nothing else changes.
    pub fn finish_submit(&mut self, result: AuthResult<Grant>) -> Option<Grant> {
        self.verifying = false;
        match result {
            Ok(grant) => Some(grant),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }
}
