use crate::error::{Result, ViewerError};

use super::store::HoverStore;

/// Scope in which hover state exists
///
/// Every component that needs hover state takes the session by reference
/// instead of threading the store through each call. Outside an active
/// session (before `begin`, after `end`) every access fails with
/// [`ViewerError::NoActiveSession`] rather than handing out a default.
#[derive(Debug, Default)]
pub struct HoverSession {
    store: Option<HoverStore>,
}

impl HoverSession {
    /// Creates an inactive session
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session that is already active
    pub fn active() -> Self {
        let mut session = Self::new();
        session.begin();
        session
    }

    /// Starts the session with nothing hovered. Restarting resets the state.
    pub fn begin(&mut self) {
        log::info!("Hover session started");
        self.store = Some(HoverStore::new());
    }

    /// Ends the session, returning the final state
    pub fn end(&mut self) -> Option<HoverStore> {
        let store = self.store.take();
        if store.is_some() {
            log::info!("Hover session ended");
        }
        store
    }

    pub fn is_active(&self) -> bool {
        self.store.is_some()
    }

    pub fn hover(&self) -> Result<&HoverStore> {
        self.store.as_ref().ok_or(ViewerError::NoActiveSession)
    }

    pub fn hover_mut(&mut self) -> Result<&mut HoverStore> {
        self.store.as_mut().ok_or(ViewerError::NoActiveSession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::isolate::PieceId;

    #[test]
    fn test_access_outside_session_fails() {
        let mut session = HoverSession::new();
        assert!(matches!(session.hover(), Err(ViewerError::NoActiveSession)));
        assert!(matches!(session.hover_mut(), Err(ViewerError::NoActiveSession)));
    }

    #[test]
    fn test_access_after_end_fails() {
        let mut session = HoverSession::active();
        session.hover_mut().unwrap().set_hovered(PieceId::from("Desk"));

        let last = session.end().unwrap();
        assert_eq!(last.hovered(), Some(&PieceId::from("Desk")));
        assert!(!session.is_active());
        assert!(session.hover().is_err());
        assert!(session.end().is_none());
    }

    #[test]
    fn test_restart_resets_state() {
        let mut session = HoverSession::active();
        session.hover_mut().unwrap().set_hovered(PieceId::from("Desk"));
        session.begin();
        assert!(session.hover().unwrap().hovered().is_none());
    }
}
