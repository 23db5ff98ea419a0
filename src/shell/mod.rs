//! The navigation controller.
//!
//! `Shell` is the single owner of the navigation state. User actions, screen
//! callbacks, provider identity changes and sync reactions all arrive as
//! [`ShellEvent`]s on one ordered queue, so a race between a user's navigation
//! and a session change always resolves the same way.

pub mod event;
pub mod notice;

pub use event::{OnNavigate, ShellEvent, ShellHandle};
pub use notice::{Notice, NoticeLevel};

use log::{debug, info, warn};
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{mpsc, watch};

use crate::nav::{
    ActionTarget, BackOutcome, DrawerController, DrawerEvent, DrawerTiming, MenuItem, NavError,
    NavigationState, Palette, Params, ROUTES, RouteId, RouteTable, ScreenDescriptor, compose_menu,
    decide_back,
};
use crate::session::{
    SessionProvider, SessionSnapshot, SessionSynchronizer, SyncKind, SyncReaction, User,
};

/// Cold-start parameters
#[derive(Debug, Clone)]
pub struct ShellOptions {
    pub initial_route: RouteId,
    pub initial_user: Option<User>,
    pub drawer: DrawerTiming,
}

impl Default for ShellOptions {
    fn default() -> Self {
        Self {
            initial_route: RouteId::ROOT,
            initial_user: None,
            drawer: DrawerTiming::default(),
        }
    }
}

/// Provider call in flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAuth {
    SignIn { email: String },
    SignOut,
}

/// The screen to render plus the callback it navigates through
#[derive(Debug, Clone)]
pub struct Screen {
    pub descriptor: ScreenDescriptor,
    pub on_navigate: OnNavigate,
}

pub struct Shell {
    state: NavigationState,
    revision: u64,
    drawer: DrawerController,
    routes: &'static RouteTable,
    sync: SessionSynchronizer,
    provider: Arc<dyn SessionProvider>,
    session_rx: watch::Receiver<SessionSnapshot>,
    tx: mpsc::UnboundedSender<ShellEvent>,
    rx: mpsc::UnboundedReceiver<ShellEvent>,
    /// Unknown route requested through a string entry point, shown over the current route
    not_found: Option<(String, Params)>,
    notices: VecDeque<Notice>,
    pending: Option<PendingAuth>,
    stale_reactions: u64,
}

impl Shell {
    pub fn new(options: ShellOptions, provider: Arc<dyn SessionProvider>) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let session_rx = provider.subscribe();
        let mut sync = SessionSynchronizer::new();
        sync.observe(provider.snapshot());

        let mut shell = Self {
            state: NavigationState::new(options.initial_route, options.initial_user),
            revision: 0,
            drawer: DrawerController::new(options.drawer),
            routes: &ROUTES,
            sync,
            provider,
            session_rx,
            tx,
            rx,
            not_found: None,
            notices: VecDeque::new(),
            pending: None,
            stale_reactions: 0,
        };

        info!("Shell started at {}", shell.state.current_route());
        // A provider that already holds a session signs the user straight in
        shell.reevaluate();
        shell
    }

    pub fn handle(&self) -> ShellHandle {
        ShellHandle::new(self.tx.clone())
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn drawer(&self) -> &DrawerController {
        &self.drawer
    }

    pub fn pending(&self) -> Option<&PendingAuth> {
        self.pending.as_ref()
    }

    /// Number of sync reactions discarded because the store had moved on
    pub fn stale_reactions(&self) -> u64 {
        self.stale_reactions
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Menu and palette for the signed-in user's role
    pub fn menu(&self) -> (Vec<MenuItem>, Palette) {
        compose_menu(self.state.current_user().map(|u| u.role))
    }

    pub fn current_screen(&self) -> Screen {
        let descriptor = match &self.not_found {
            Some((route, params)) => self.routes.resolve(route, params),
            None => self.routes.resolve_for(
                self.state.current_route().as_str(),
                self.state.params(),
                self.state.current_user(),
            ),
        };
        let on_navigate = self.handle().on_navigate(descriptor.route);
        Screen { descriptor, on_navigate }
    }

    // Direct entry points. Each goes through the queue so it is ordered after
    // anything already waiting.

    pub fn navigate(&mut self, route: RouteId, params: Option<Params>, user: Option<User>) {
        self.dispatch(ShellEvent::Navigate { route, params, user });
    }

    pub fn open_link(&mut self, route: &str, params: Params) {
        self.dispatch(ShellEvent::OpenLink { route: route.to_string(), params });
    }

    pub fn bypass_sign_in(&mut self, user: User) {
        self.dispatch(ShellEvent::BypassSignIn(user));
    }

    pub fn open_drawer(&mut self) {
        self.dispatch(ShellEvent::OpenDrawer);
    }

    pub fn close_drawer(&mut self) {
        self.dispatch(ShellEvent::CloseDrawer);
    }

    pub fn toggle_drawer(&mut self) {
        self.dispatch(ShellEvent::ToggleDrawer);
    }

    fn dispatch(&mut self, event: ShellEvent) {
        self.enqueue(event);
        self.pump();
    }

    fn enqueue(&self, event: ShellEvent) {
        if self.tx.send(event).is_err() {
            warn!("Shell queue closed, dropping event");
        }
    }

    /// Platform back event. Returns whether it was consumed.
    pub fn handle_back(&mut self) -> bool {
        self.pump();
        self.apply_back()
    }

    /// Advance drawer animations
    pub fn tick(&mut self, now: Instant) {
        if let Some(event) = self.drawer.tick(now) {
            debug!("drawer settled: {:?}", event);
            if event == DrawerEvent::Closed {
                self.state.set_drawer_open(false);
            }
        }
    }

    /// Bridge provider changes into the queue and apply everything waiting.
    /// Returns the number of events handled.
    pub fn pump(&mut self) -> usize {
        self.observe_session();
        let mut handled = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.handle_event(event);
            handled += 1;
        }
        handled
    }

    /// Wait for in-flight provider calls to finish, then drain the queue
    pub async fn settle(&mut self) {
        self.pump();
        while self.pending.is_some() {
            tokio::select! {
                Some(event) = self.rx.recv() => self.handle_event(event),
                Ok(()) = self.session_rx.changed() => {
                    let snapshot = self.session_rx.borrow_and_update().clone();
                    self.handle_event(ShellEvent::SessionChanged(snapshot));
                }
                else => break,
            }
        }
        self.pump();
    }

    /// Ask the provider to sign in. The store only changes once the provider
    /// reports the new identity; failures become notices.
    pub fn begin_sign_in(&mut self, email: &str, password: &str) {
        if let Some(pending) = &self.pending {
            debug!("Ignoring sign-in, {:?} in flight", pending);
            return;
        }
        self.pending = Some(PendingAuth::SignIn { email: email.to_string() });

        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        let (email, password) = (email.to_string(), password.to_string());
        tokio::spawn(async move {
            let result = provider.sign_in(&email, &password).await;
            let _ = tx.send(ShellEvent::SignInFinished(result));
        });
    }

    /// End the current session.
    ///
    /// A provider session is signed out through the provider. A bypass session
    /// loses its protection once there is no provider identity left to sign out,
    /// so the sync rule tears it down.
    pub fn begin_sign_out(&mut self) {
        if !self.state.is_authenticated() {
            debug!("Sign-out requested while signed out");
            return;
        }
        if let Some(pending) = &self.pending {
            debug!("Ignoring sign-out, {:?} in flight", pending);
            return;
        }

        if self.provider.snapshot().identity.is_none() {
            self.end_bypass();
            self.pump();
            return;
        }

        self.pending = Some(PendingAuth::SignOut);
        let provider = Arc::clone(&self.provider);
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = provider.sign_out().await;
            let _ = tx.send(ShellEvent::SignOutFinished(result));
        });
    }

    fn observe_session(&mut self) {
        if self.session_rx.has_changed().unwrap_or(false) {
            let snapshot = self.session_rx.borrow_and_update().clone();
            self.enqueue(ShellEvent::SessionChanged(snapshot));
        }
    }

    fn handle_event(&mut self, event: ShellEvent) {
        match event {
            ShellEvent::Navigate { route, params, user } => self.apply_navigate(route, params, user),
            ShellEvent::Action { from, action, params } => self.apply_action(from, &action, params),
            ShellEvent::Back => {
                self.apply_back();
            }
            ShellEvent::OpenDrawer => self.apply_open_drawer(),
            ShellEvent::CloseDrawer => self.drawer.close(Instant::now()),
            ShellEvent::ToggleDrawer => {
                if self.drawer.is_opening_or_open() {
                    self.drawer.close(Instant::now());
                } else {
                    self.apply_open_drawer();
                }
            }
            ShellEvent::MenuSelect(route) => self.apply_navigate(route, None, None),
            ShellEvent::OpenLink { route, params } => match RouteId::parse(&route) {
                Some(route) => self.apply_navigate(route, Some(params), None),
                None => {
                    warn!("Link to unknown route '{}'", route);
                    self.not_found = Some((route, params));
                }
            },
            ShellEvent::SessionChanged(snapshot) => {
                debug!(
                    "session changed: identity={} loading={}",
                    snapshot.identity.is_some(),
                    snapshot.loading
                );
                self.sync.observe(snapshot);
                self.reevaluate();
            }
            ShellEvent::Sync(reaction) => self.apply_sync(reaction),
            ShellEvent::BypassSignIn(user) => {
                self.not_found = None;
                self.commit(|state| state.begin_bypass(user));
            }
            ShellEvent::SignInFinished(result) => {
                self.pending = None;
                if let Err(e) = result {
                    warn!("Sign-in failed: {}", e);
                    self.notices.push_back(Notice::error("Sign in failed", e.to_string()));
                }
            }
            ShellEvent::SignOutFinished(result) => {
                self.pending = None;
                match result {
                    Ok(()) => self.end_bypass(),
                    Err(e) => {
                        warn!("Sign-out failed: {}", e);
                        self.notices.push_back(Notice::error("Sign out failed", e.to_string()));
                    }
                }
            }
        }
    }

    /// Apply a state change, bumping the revision. The sync rule only runs on
    /// session changes, never on store writes.
    fn commit(&mut self, change: impl FnOnce(&mut NavigationState) -> bool) {
        let close_drawer = change(&mut self.state);
        self.revision += 1;

        if close_drawer {
            self.drawer.close(Instant::now());
        }
    }

    /// Drop bypass protection and let the sync rule decide against the latest snapshot
    fn end_bypass(&mut self) {
        if !self.state.manual_auth() {
            return;
        }
        self.commit(|state| {
            state.end_bypass();
            false
        });
        self.reevaluate();
    }

    fn reevaluate(&mut self) {
        if let Some(reaction) = self.sync.react(&self.state, self.revision) {
            self.enqueue(ShellEvent::Sync(reaction));
        }
    }

    fn apply_sync(&mut self, reaction: SyncReaction) {
        if reaction.observed_revision != self.revision {
            debug!(
                "Discarding stale sync reaction (read revision {}, store at {})",
                reaction.observed_revision, self.revision
            );
            self.stale_reactions += 1;
            // A login must not overwrite what happened after the identity appeared.
            // A logout still has to happen: the identity is gone either way.
            if reaction.kind == SyncKind::Logout {
                self.reevaluate();
            }
            return;
        }

        self.not_found = None;
        match reaction.kind {
            SyncKind::Login(user) => self.commit(|state| state.apply_login(user)),
            SyncKind::Logout => self.commit(|state| state.apply_logout()),
        }
    }

    fn apply_navigate(&mut self, route: RouteId, params: Option<Params>, user: Option<User>) {
        self.not_found = None;
        self.commit(|state| state.navigate(route, params, user));
    }

    fn apply_open_drawer(&mut self) {
        if !self.state.is_authenticated() {
            debug!("Drawer needs a signed-in user, ignoring");
            return;
        }
        self.drawer.open(Instant::now());
        self.state.set_drawer_open(true);
    }

    fn apply_back(&mut self) -> bool {
        match decide_back(&self.state) {
            BackOutcome::CloseDrawer => {
                self.drawer.close(Instant::now());
                true
            }
            BackOutcome::NavigateBack(_) if self.not_found.is_some() => {
                self.not_found = None;
                true
            }
            BackOutcome::NavigateBack(target) => {
                debug!("back to {}", target);
                self.commit(|state| {
                    state.go_back();
                    false
                });
                true
            }
            BackOutcome::Ignore => self.not_found.take().is_some(),
        }
    }

    fn home_route(&self) -> RouteId {
        self.state
            .current_user()
            .map(|u| u.role.dashboard_route())
            .unwrap_or(RouteId::ROOT)
    }

    fn apply_action(&mut self, from: Option<RouteId>, action: &str, params: Params) {
        let visible = match self.not_found {
            Some(_) => None,
            None => Some(self.state.current_route()),
        };
        if from != visible {
            debug!("Ignoring '{}' from {:?}, no longer on screen", action, from);
            return;
        }

        let target = match self.routes.translate(from, action) {
            Ok(target) => target,
            Err(e) => {
                self.notices.push_back(Notice::feature_unavailable(e.to_string()));
                return;
            }
        };

        match target {
            ActionTarget::Route(route) => self.apply_navigate(route, Some(params), None),
            ActionTarget::Home => {
                let home = self.home_route();
                self.apply_navigate(home, None, None);
            }
            ActionTarget::Back => {
                if self.state.previous_route().is_some() && self.not_found.is_none() {
                    self.commit(|state| {
                        state.go_back();
                        false
                    });
                } else {
                    let home = self.home_route();
                    self.apply_navigate(home, None, None);
                }
            }
            ActionTarget::OpenMenu => self.apply_open_drawer(),
            ActionTarget::SignIn => match (params.get_str("email"), params.get_str("password")) {
                (Some(email), Some(password)) => {
                    let (email, password) = (email.to_string(), password.to_string());
                    self.begin_sign_in(&email, &password);
                }
                (email, _) => {
                    let key = if email.is_none() { "email" } else { "password" };
                    let e = NavError::MissingParam {
                        route: self.state.current_route().to_string(),
                        key: key.to_string(),
                    };
                    self.notices.push_back(Notice::error("Sign in failed", e.to_string()));
                }
            },
            ActionTarget::SignOut => self.begin_sign_out(),
            ActionTarget::Bypass(role) => {
                self.not_found = None;
                self.commit(|state| state.begin_bypass(User::bypass(role)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Account, Identity, LocalSessionProvider, Role};
    use std::time::Duration;

    fn provider() -> Arc<LocalSessionProvider> {
        Arc::new(LocalSessionProvider::new(
            vec![Account::new("ravi@campus.test", "secret", "Ravi Kumar", Role::Teacher)],
            Duration::ZERO,
        ))
    }

    fn shell_with(provider: Arc<LocalSessionProvider>) -> Shell {
        Shell::new(ShellOptions::default(), provider)
    }

    #[test]
    fn test_starts_at_landing_route() {
        let shell = shell_with(provider());
        assert_eq!(shell.state().current_route(), RouteId::Welcome);
        assert!(!shell.state().is_authenticated());
        assert_eq!(shell.current_screen().descriptor.component, "WelcomeScreen");
    }

    #[test]
    fn test_screen_callback_navigates() {
        let mut shell = shell_with(provider());
        let screen = shell.current_screen();
        screen.on_navigate.call("login", None);
        shell.pump();

        assert_eq!(shell.state().current_route(), RouteId::Login);
        assert_eq!(shell.state().previous_route(), Some(RouteId::Welcome));
    }

    #[test]
    fn test_unknown_action_raises_notice() {
        let mut shell = shell_with(provider());
        shell.current_screen().on_navigate.call("create-assignment", None);
        shell.pump();

        let notice = shell.take_notice().unwrap();
        assert_eq!(notice.title, "Feature not available");
        assert_eq!(shell.state().current_route(), RouteId::Welcome);
    }

    #[test]
    fn test_stale_callback_is_ignored() {
        let mut shell = shell_with(provider());
        let welcome = shell.current_screen();
        shell.navigate(RouteId::Login, None, None);

        welcome.on_navigate.call("about", None);
        shell.pump();
        assert_eq!(shell.state().current_route(), RouteId::Login);
    }

    #[test]
    fn test_unknown_link_shows_fallback_then_home() {
        let mut shell = shell_with(provider());
        shell.open_link("teacher-dashbaord", Params::new());
        let screen = shell.current_screen();
        assert!(screen.descriptor.is_not_found());

        screen.on_navigate.call("home", None);
        shell.pump();
        assert!(!shell.current_screen().descriptor.is_not_found());
        assert_eq!(shell.state().current_route(), RouteId::Welcome);
    }

    #[test]
    fn test_drawer_requires_user_and_flag_lags_close() {
        let mut shell = shell_with(provider());
        shell.open_drawer();
        assert!(!shell.state().drawer_open());

        shell.bypass_sign_in(User::bypass(Role::Admin));
        shell.open_drawer();
        assert!(shell.state().drawer_open());

        // Navigating closes the drawer, but the flag waits for the animation
        shell.navigate(RouteId::Reports, None, None);
        assert!(shell.state().drawer_open());
        shell.tick(Instant::now() + Duration::from_secs(1));
        assert!(!shell.state().drawer_open());
    }

    #[test]
    fn test_menu_follows_role() {
        let mut shell = shell_with(provider());
        shell.bypass_sign_in(User::bypass(Role::Parent));
        let (items, _) = shell.menu();
        assert_eq!(items[0].target_route, RouteId::ParentDashboard);
    }

    #[test]
    fn test_store_writes_do_not_run_sync_rule() {
        let mut shell = shell_with(provider());
        shell.navigate(RouteId::ParentDashboard, None, Some(User::bypass(Role::Parent)));

        assert_eq!(shell.state().current_route(), RouteId::ParentDashboard);
        assert!(shell.state().is_authenticated());
        assert_eq!(shell.stale_reactions(), 0);
    }

    #[test]
    fn test_stale_login_reaction_is_dropped_not_retried() {
        let mut shell = shell_with(provider());
        let handle = shell.handle();

        let identity = Identity::new("t-1").with_role(Role::Teacher);
        handle.dispatch(ShellEvent::SessionChanged(SessionSnapshot::signed_in(identity)));
        handle.navigate(RouteId::About, None);
        shell.pump();

        assert_eq!(shell.state().current_route(), RouteId::About);
        assert!(!shell.state().is_authenticated());
        assert_eq!(shell.pump(), 0);
    }

    #[test]
    fn test_stale_login_reaction_does_not_override_bypass() {
        let provider = provider();
        let mut shell = shell_with(provider.clone());
        let handle = shell.handle();

        let identity = Identity::new("t-1").with_role(Role::Teacher);
        handle.dispatch(ShellEvent::SessionChanged(SessionSnapshot::signed_in(identity)));
        handle.bypass_sign_in(User::bypass(Role::Student));
        shell.pump();

        assert_eq!(shell.stale_reactions(), 1);
        assert_eq!(shell.state().current_route(), RouteId::StudentDashboard);
        assert_eq!(shell.state().current_user().map(|u| u.role), Some(Role::Student));
        assert!(shell.state().manual_auth());
    }

    #[tokio::test]
    async fn test_sign_in_action_without_credentials() {
        let mut shell = shell_with(provider());
        shell.navigate(RouteId::Login, None, None);
        shell.current_screen().on_navigate.call("submit", Some(Params::new().with("email", "ravi@campus.test")));
        shell.pump();

        assert!(shell.pending().is_none());
        let notice = shell.take_notice().unwrap();
        assert!(notice.message.contains("password"));
    }

    #[tokio::test]
    async fn test_sign_in_through_login_screen() {
        let mut shell = shell_with(provider());
        shell.navigate(RouteId::Login, None, None);
        let params = Params::new()
            .with("email", "ravi@campus.test")
            .with("password", "secret");
        shell.current_screen().on_navigate.call("submit", Some(params));
        shell.pump();
        assert!(matches!(shell.pending(), Some(PendingAuth::SignIn { .. })));

        shell.settle().await;
        assert_eq!(shell.state().current_route(), RouteId::TeacherDashboard);
        assert_eq!(shell.state().previous_route(), None);
        assert!(!shell.state().manual_auth());
    }
}
