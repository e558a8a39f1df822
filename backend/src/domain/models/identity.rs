//! Identity supplied by the host chat platform at startup.

use crate::domain::outcome::LedgerError;

/// Stable user identity handed over by the host platform.
///
/// A session is never initialized without one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostIdentity {
    user_id: String,
    display_name: String,
}

impl HostIdentity {
    /// Blank ids are rejected; a blank display name falls back to the id.
    pub fn new(user_id: &str, display_name: &str) -> Result<Self, LedgerError> {
        let user_id = user_id.trim();
        if user_id.is_empty() {
            return Err(LedgerError::MissingIdentity);
        }

        let display_name = display_name.trim();
        let display_name = if display_name.is_empty() {
            user_id
        } else {
            display_name
        };

        Ok(Self {
            user_id: user_id.to_string(),
            display_name: display_name.to_string(),
        })
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }
}
