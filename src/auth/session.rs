use super::model::Principal;

/// Identity state of the current caller.
///
/// Starts anonymous; `sign_in` and `sign_out` move it between states.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    principal: Option<Principal>,
}

impl SessionContext {
    pub fn init() -> Self {
        Self::default()
    }

    pub fn sign_in(&mut self, principal: Principal) {
        self.principal = Some(principal);
    }

    pub fn sign_out(&mut self) {
        self.principal = None;
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }
}
