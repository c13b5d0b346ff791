//! Session context for the signed-in user.
//!
//! Authentication itself happens outside this crate. Whatever performs it
//! hands a `SessionContext` to the layers that need the current user, so
//! nothing reads an ambient "current user".

use super::{UserId, ValidationError};

/// Explicit session passed into the workflow and repositories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The signed-in user.
    pub user_id: UserId,

    /// Display name if the identity provider supplied one.
    pub display_name: Option<String>,
}

impl SessionContext {
    /// Creates a session for the given user.
    pub fn new(user_id: UserId) -> Self {
        Self {
            user_id,
            display_name: None,
        }
    }

    /// Convenience constructor from a raw user id string.
    pub fn for_user(user_id: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::new(UserId::new(user_id)?))
    }

    /// Sets the display name.
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Returns the display name, or the user id as fallback.
    pub fn display_name_or_id(&self) -> &str {
        self.display_name
            .as_deref()
            .unwrap_or_else(|| self.user_id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn for_user_rejects_empty_id() {
        assert!(SessionContext::for_user("").is_err());
    }

    #[test]
    fn display_name_falls_back_to_user_id() {
        let session = SessionContext::for_user("user-7").unwrap();
        assert_eq!(session.display_name_or_id(), "user-7");

        let named = session.with_display_name("Camille");
        assert_eq!(named.display_name_or_id(), "Camille");
    }
}
