//! The signed-in user.

use tracing::info;

use crate::workflow::policy::{Action, Role, User};

/// Tracks who is using the screens and in which role.
#[derive(Debug, Clone)]
pub struct Session {
    user: User,
}

impl Session {
    /// Starts a session for `user`.
    #[must_use]
    pub fn new(user: User) -> Self {
        Self { user }
    }

    /// The current user.
    #[must_use]
    pub fn user(&self) -> &User {
        &self.user
    }

    /// Switches the current user's role.
    pub fn change_role(&mut self, role: Role) {
        if self.user.role != role {
            info!(user_id = %self.user.id, from = %self.user.role, to = %role, "Role changed");
        }
        self.user.role = role;
    }

    /// Whether the current role enables `action`.
    #[must_use]
    pub fn can(&self, action: Action) -> bool {
        self.user.can(action)
    }
}
