// Portal session types

use crate::models::{IdentityRecord, Role};

/// Caller-owned "current identity" slot.
///
/// A portal session is either anonymous or authenticated as exactly one
/// record. A successful login or registration replaces the slot; logout
/// empties it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalSession {
    current: Option<IdentityRecord>,
}

impl PortalSession {
    /// Create an anonymous session
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&IdentityRecord> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    pub fn is_faculty(&self) -> bool {
        self.role() == Some(Role::Faculty)
    }

    pub fn role(&self) -> Option<Role> {
        self.current.as_ref().map(|r| r.role)
    }

    pub(crate) fn sign_in(&mut self, record: IdentityRecord) {
        self.current = Some(record);
    }

    pub(crate) fn sign_out(&mut self) {
        self.current = None;
    }
}
