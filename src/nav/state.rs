//! The navigation state store: the single mutable record deciding what is on screen.

use log::{debug, info};
use serde::{Serialize, Serializer};
use serde::ser::SerializeStruct;

use crate::nav::{Params, RouteId};
use crate::session::User;

/// What the store looks like at any point in time.
///
/// `is_authenticated` is derived from `current_user`, so the two can never disagree.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub(crate) current_route: RouteId,
    pub(crate) previous_route: Option<RouteId>,
    pub(crate) params: Params,
    pub(crate) current_user: Option<User>,
    pub(crate) drawer_open: bool,
    pub(crate) manual_auth: bool,
}

impl Default for NavigationState {
    fn default() -> Self {
        Self::new(RouteId::ROOT, None)
    }
}

impl NavigationState {
    /// Cold start (or a test harness starting mid-session).
    ///
    /// An initial user has no session provider behind it, so it is marked as a
    /// bypass session and survives the provider reporting no identity.
    pub fn new(initial_route: RouteId, initial_user: Option<User>) -> Self {
        let manual_auth = initial_user.is_some();
        Self {
            current_route: initial_route,
            previous_route: None,
            params: Params::new(),
            current_user: initial_user,
            drawer_open: false,
            manual_auth,
        }
    }

    pub fn current_route(&self) -> RouteId {
        self.current_route
    }

    pub fn previous_route(&self) -> Option<RouteId> {
        self.previous_route
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current_user.is_some()
    }

    pub fn drawer_open(&self) -> bool {
        self.drawer_open
    }

    pub fn manual_auth(&self) -> bool {
        self.manual_auth
    }

    /// Move to `route`.
    ///
    /// `previous_route` is overwritten, never pushed: only one level of back is kept.
    /// A `None` user keeps the current one, so this never signs anybody out.
    /// Returns true when the drawer was open and its close sequence must start.
    pub fn navigate(&mut self, route: RouteId, params: Option<Params>, user: Option<User>) -> bool {
        debug!("navigate: {} -> {}", self.current_route, route);
        self.previous_route = Some(self.current_route);
        self.current_route = route;
        self.params = params.unwrap_or_default();
        if let Some(user) = user {
            self.current_user = Some(user);
        }
        self.drawer_open
    }

    /// Return to the remembered route and forget it.
    pub fn go_back(&mut self) -> Option<RouteId> {
        let target = self.previous_route.take()?;
        debug!("back: {} -> {}", self.current_route, target);
        self.current_route = target;
        self.params = Params::new();
        Some(target)
    }

    /// Session provider reported a new identity while signed out.
    ///
    /// History is cleared so back cannot land inside the login flow.
    pub fn apply_login(&mut self, user: User) -> bool {
        info!("Signed in as {} ({})", user.email, user.role);
        self.previous_route = None;
        self.current_route = user.role.dashboard_route();
        self.params = Params::new();
        self.current_user = Some(user);
        self.manual_auth = false;
        self.drawer_open
    }

    /// Session provider reported no identity for a provider-backed session.
    pub fn apply_logout(&mut self) -> bool {
        info!("Signed out, returning to {}", RouteId::ROOT);
        self.current_user = None;
        self.current_route = RouteId::ROOT;
        self.previous_route = None;
        self.params = Params::new();
        self.drawer_open
    }

    /// Sign in without the session provider (demo/bypass path).
    pub fn begin_bypass(&mut self, user: User) -> bool {
        info!("Bypass sign-in as {} ({})", user.email, user.role);
        let dashboard = user.role.dashboard_route();
        let drawer_was_open = self.navigate(dashboard, None, Some(user));
        self.manual_auth = true;
        drawer_was_open
    }

    /// Stop treating the current session as a bypass session
    pub(crate) fn end_bypass(&mut self) {
        self.manual_auth = false;
    }

    pub(crate) fn set_drawer_open(&mut self, open: bool) {
        self.drawer_open = open;
    }
}

impl Serialize for NavigationState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("NavigationState", 7)?;
        s.serialize_field("currentRoute", &self.current_route)?;
        s.serialize_field("previousRoute", &self.previous_route)?;
        s.serialize_field("params", &self.params)?;
        s.serialize_field("currentUser", &self.current_user)?;
        s.serialize_field("isAuthenticated", &self.is_authenticated())?;
        s.serialize_field("drawerOpen", &self.drawer_open)?;
        s.serialize_field("manualAuth", &self.manual_auth)?;
        s.end()
    }
}
