use serde::{Deserialize, Serialize};

/// Cosmetic display-name record stored under the `currentUser` key.
/// This is a label, not authentication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserProfile {
    pub username: String,
}

impl UserProfile {
    pub fn new(username: impl Into<String>) -> Self {
        Self {
            username: username.into(),
        }
    }
}
