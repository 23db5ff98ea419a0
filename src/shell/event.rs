use log::debug;
use tokio::sync::mpsc::UnboundedSender;

use crate::nav::{Params, RouteId};
use crate::session::{AuthError, SessionSnapshot, SyncReaction, User};

/// Everything that can change the shell, funneled through one ordered queue
#[derive(Debug, Clone)]
pub enum ShellEvent {
    Navigate {
        route: RouteId,
        params: Option<Params>,
        user: Option<User>,
    },
    /// Logical action requested by the screen shown for `from` (`None` = fallback screen)
    Action {
        from: Option<RouteId>,
        action: String,
        params: Params,
    },
    Back,
    OpenDrawer,
    CloseDrawer,
    ToggleDrawer,
    MenuSelect(RouteId),
    /// Deep link or any other string-addressed navigation
    OpenLink {
        route: String,
        params: Params,
    },
    SessionChanged(SessionSnapshot),
    Sync(SyncReaction),
    BypassSignIn(User),
    SignInFinished(Result<(), AuthError>),
    SignOutFinished(Result<(), AuthError>),
}

/// Cloneable sender into the shell's event queue
#[derive(Debug, Clone)]
pub struct ShellHandle {
    tx: UnboundedSender<ShellEvent>,
}

impl ShellHandle {
    pub(crate) fn new(tx: UnboundedSender<ShellEvent>) -> Self {
        Self { tx }
    }

    pub fn dispatch(&self, event: ShellEvent) {
        if self.tx.send(event).is_err() {
            debug!("Shell is gone, dropping event");
        }
    }

    pub fn navigate(&self, route: RouteId, params: Option<Params>) {
        self.dispatch(ShellEvent::Navigate { route, params, user: None });
    }

    pub fn back(&self) {
        self.dispatch(ShellEvent::Back);
    }

    pub fn toggle_drawer(&self) {
        self.dispatch(ShellEvent::ToggleDrawer);
    }

    pub fn select_menu(&self, route: RouteId) {
        self.dispatch(ShellEvent::MenuSelect(route));
    }

    pub fn bypass_sign_in(&self, user: User) {
        self.dispatch(ShellEvent::BypassSignIn(user));
    }

    /// Callback for the screen shown for `from`
    pub fn on_navigate(&self, from: Option<RouteId>) -> OnNavigate {
        OnNavigate {
            from,
            handle: self.clone(),
        }
    }
}

/// The `onNavigate(action, params?)` callback handed to a screen.
///
/// It is bound to the route the screen was built for; the screen only speaks in
/// logical actions and never names concrete routes.
#[derive(Debug, Clone)]
pub struct OnNavigate {
    from: Option<RouteId>,
    handle: ShellHandle,
}

impl OnNavigate {
    pub fn call(&self, action: &str, params: Option<Params>) {
        self.handle.dispatch(ShellEvent::Action {
            from: self.from,
            action: action.to_string(),
            params: params.unwrap_or_default(),
        });
    }
}
