//! Navigation core: route space, state store, drawer, back handling, menus and
//! the route registry.

pub mod back;
pub mod drawer;
pub mod menu;
pub mod params;
pub mod resolver;
pub mod route;
pub mod screens;
pub mod state;

pub use back::{BackOutcome, decide_back};
pub use drawer::{DrawerController, DrawerEvent, DrawerPhase, DrawerTiming};
pub use menu::{MenuItem, Palette, compose_menu, compose_menu_for};
pub use params::Params;
pub use resolver::{IdentityBinding, IdentitySource, ROUTES, RouteTable, ScreenDescriptor};
pub use route::RouteId;
pub use screens::{ActionTarget, IdentityKey, ScreenKind};
pub use state::NavigationState;

/// Errors raised by route lookup and action translation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NavError {
    #[error("Unknown route '{0}'")]
    UnknownRoute(String),

    #[error("Screen '{route}' has no action '{action}'")]
    UnknownAction { route: String, action: String },

    #[error("Action on '{route}' needs the '{key}' parameter")]
    MissingParam { route: String, key: String },

    #[error("Route table has no entry for: {}", .0.join(", "))]
    IncompleteRouteTable(Vec<String>),
}
