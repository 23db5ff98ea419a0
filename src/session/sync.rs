//! Reconciles the external session with the navigation store.
//!
//! Reactions are computed from the state they read and tagged with the store
//! revision at that moment. The shell applies a reaction only when the store is
//! still at that revision; otherwise the reaction is stale and is recomputed.

use log::debug;

use crate::nav::NavigationState;
use crate::session::{SessionSnapshot, User};

#[derive(Debug, Clone, PartialEq)]
pub enum SyncKind {
    /// Identity appeared while signed out
    Login(User),
    /// Identity disappeared for a provider-backed session
    Logout,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncReaction {
    pub kind: SyncKind,
    pub observed_revision: u64,
}

#[derive(Debug, Default)]
pub struct SessionSynchronizer {
    latest: SessionSnapshot,
}

impl SessionSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest snapshot from the provider
    pub fn observe(&mut self, snapshot: SessionSnapshot) {
        self.latest = snapshot;
    }

    /// Evaluate the sync rules against `state`, in priority order:
    /// 1. provider still loading: wait;
    /// 2. identity present, store signed out: log in;
    /// 3. identity absent, store signed in: log out unless it is a bypass session.
    pub fn react(&self, state: &NavigationState, revision: u64) -> Option<SyncReaction> {
        if self.latest.loading {
            debug!("sync: provider loading, waiting");
            return None;
        }

        let kind = match (&self.latest.identity, state.is_authenticated()) {
            (Some(identity), false) => SyncKind::Login(User::from_identity(identity)),
            (None, true) if state.manual_auth() => {
                debug!("sync: provider has no identity, keeping bypass session");
                return None;
            }
            (None, true) => SyncKind::Logout,
            _ => return None,
        };

        Some(SyncReaction {
            kind,
            observed_revision: revision,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nav::RouteId;
    use crate::session::{Identity, Role};

    fn teacher_identity() -> Identity {
        Identity::new("t-1")
            .with_email("t@campus.test")
            .with_display_name("Tara Singh")
            .with_role(Role::Teacher)
    }

    #[test]
    fn test_loading_suspends_decision() {
        let mut sync = SessionSynchronizer::new();
        sync.observe(SessionSnapshot {
            identity: Some(teacher_identity()),
            loading: true,
        });
        assert_eq!(sync.react(&NavigationState::default(), 0), None);
    }

    #[test]
    fn test_identity_while_signed_out_logs_in() {
        let mut sync = SessionSynchronizer::new();
        sync.observe(SessionSnapshot::signed_in(teacher_identity()));
        let reaction = sync.react(&NavigationState::default(), 7).unwrap();
        assert_eq!(reaction.observed_revision, 7);
        match reaction.kind {
            SyncKind::Login(user) => {
                assert_eq!(user.role, Role::Teacher);
                assert_eq!(user.first_name, "Tara");
            }
            other => panic!("expected login, got {:?}", other),
        }
    }

    #[test]
    fn test_identity_while_signed_in_is_ignored() {
        let mut sync = SessionSynchronizer::new();
        sync.observe(SessionSnapshot::signed_in(teacher_identity()));
        let mut state = NavigationState::default();
        state.apply_login(User::from_identity(&teacher_identity()));
        assert_eq!(sync.react(&state, 1), None);
    }

    #[test]
    fn test_no_identity_logs_out_provider_session() {
        let sync = SessionSynchronizer::new();
        let mut state = NavigationState::default();
        state.apply_login(User::bypass(Role::Student));
        assert_eq!(sync.react(&state, 3).map(|r| r.kind), Some(SyncKind::Logout));
    }

    #[test]
    fn test_no_identity_keeps_bypass_session() {
        let sync = SessionSynchronizer::new();
        let state = NavigationState::new(RouteId::StudentDashboard, Some(User::bypass(Role::Student)));
        assert!(state.manual_auth());
        assert_eq!(sync.react(&state, 0), None);
    }
}
