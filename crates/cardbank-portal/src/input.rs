//! Editable text fields shared by the login form and dashboards

/// Character used in place of a hidden secret
pub const MASK_CHAR: char = '•';

/// Single-line text input with an optional length cap
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    value: String,
    max_len: Option<usize>,
    secret: bool,
    revealed: bool,
}

impl InputField {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the field at `max_len` characters
    pub fn with_max_len(mut self, max_len: usize) -> Self {
        self.max_len = Some(max_len);
        self
    }

    /// Hide the contents unless revealed
    pub fn secret(mut self) -> Self {
        self.secret = true;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    /// Replace the contents, truncated to the cap
    pub fn set(&mut self, value: &str) {
        self.value = match self.max_len {
            Some(max) => value.chars().take(max).collect(),
            None => value.to_string(),
        };
    }

    /// Append a character; returns false when the cap is reached
    pub fn push(&mut self, c: char) -> bool {
        if c.is_control() {
            return false;
        }
        if let Some(max) = self.max_len {
            if self.value.chars().count() >= max {
                return false;
            }
        }
        self.value.push(c);
        true
    }

    pub fn pop(&mut self) -> Option<char> {
        self.value.pop()
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }

    pub fn is_secret(&self) -> bool {
        self.secret
    }

    pub fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }

    /// What a renderer should print
    pub fn display(&self) -> String {
        if self.secret && !self.revealed {
            MASK_CHAR.to_string().repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}
