//! Shared-password gate in front of the admin surface.
//!
//! This is a convenience gate only: a plaintext comparison with no session,
//! lockout or server-side check.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub const DEFAULT_ADMIN_PASSWORD: &str = "password123";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessError {
    IncorrectPassword,
}

impl Display for AccessError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectPassword => f.write_str("Incorrect password."),
        }
    }
}

impl Error for AccessError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AccessGate {
    password: String,
}

impl AccessGate {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: password.into(),
        }
    }

    pub fn check(&self, attempt: &str) -> Result<(), AccessError> {
        if attempt == self.password {
            Ok(())
        } else {
            Err(AccessError::IncorrectPassword)
        }
    }
}

impl Default for AccessGate {
    fn default() -> Self {
        Self::new(DEFAULT_ADMIN_PASSWORD)
    }
}
