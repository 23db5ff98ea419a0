//! Route registry: maps a route identifier (and its parameters) to the screen
//! that should be shown, and translates a screen's logical actions into targets.

use log::{error, warn};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

use crate::nav::screens::{COMMON_ACTIONS, IdentityKey, ScreenKind, ScreenSpec, screen_spec};
use crate::nav::{ActionTarget, NavError, Params, RouteId};
use crate::session::User;

/// Process-wide route table, built on first use and read-only afterwards
pub static ROUTES: Lazy<RouteTable> = Lazy::new(RouteTable::standard);

const NOT_FOUND: ScreenSpec = ScreenSpec {
    component: "NotFoundScreen",
    title: "Page Not Found",
    kind: ScreenKind::NotFound,
    identity: None,
    actions: &[],
};

/// Where an identity parameter's value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdentitySource {
    Param,
    CurrentUser,
    /// Nothing supplied it; the literal default was substituted
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdentityBinding {
    pub key: &'static str,
    pub value: String,
    pub source: IdentitySource,
}

impl IdentityBinding {
    pub fn is_fallback(&self) -> bool {
        self.source == IdentitySource::Fallback
    }
}

/// Everything the screen layer needs to render the current route
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenDescriptor {
    /// `None` for the fallback screen
    pub route: Option<RouteId>,
    /// Identifier as it was requested
    pub requested: String,
    pub component: &'static str,
    pub title: &'static str,
    pub kind: ScreenKind,
    pub params: Params,
    pub identity: Option<IdentityBinding>,
    /// Logical actions offered by this screen, screen-specific ones first
    pub actions: Vec<&'static str>,
}

impl ScreenDescriptor {
    pub fn is_not_found(&self) -> bool {
        self.route.is_none()
    }
}

pub struct RouteTable {
    entries: HashMap<RouteId, ScreenSpec>,
}

impl RouteTable {
    /// Build the table for every identifier in the route space
    pub fn standard() -> Self {
        let entries = RouteId::ALL
            .iter()
            .map(|route| (*route, screen_spec(*route)))
            .collect();
        Self { entries }
    }

    /// Check that every route identifier has an entry
    pub fn validate(&self) -> Result<(), NavError> {
        let missing: Vec<String> = RouteId::ALL
            .iter()
            .filter(|route| !self.entries.contains_key(route))
            .map(|route| route.to_string())
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(NavError::IncompleteRouteTable(missing))
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn spec(&self, route: RouteId) -> Option<&ScreenSpec> {
        self.entries.get(&route)
    }

    /// Pure lookup. Unknown identifiers resolve to the fallback screen.
    pub fn resolve(&self, route: &str, params: &Params) -> ScreenDescriptor {
        self.resolve_for(route, params, None)
    }

    /// Lookup that can fill identity parameters from the signed-in user
    pub fn resolve_for(&self, route: &str, params: &Params, user: Option<&User>) -> ScreenDescriptor {
        let Some((route_id, spec)) = RouteId::parse(route).and_then(|id| self.entries.get(&id).map(|s| (id, s))) else {
            warn!("No screen registered for route '{}', showing fallback", route);
            return Self::not_found(route, params);
        };

        let identity = spec
            .identity
            .map(|key| bind_identity(route_id, key, params, user));

        let actions = spec
            .actions
            .iter()
            .chain(COMMON_ACTIONS.iter())
            .map(|(name, _)| *name)
            .collect();

        ScreenDescriptor {
            route: Some(route_id),
            requested: route.to_string(),
            component: spec.component,
            title: spec.title,
            kind: spec.kind,
            params: params.clone(),
            identity,
            actions,
        }
    }

    /// Translate a logical action requested by the screen on `from`.
    ///
    /// `from == None` is the fallback screen, which only knows `home`.
    pub fn translate(&self, from: Option<RouteId>, action: &str) -> Result<ActionTarget, NavError> {
        let Some(from) = from else {
            return match action {
                "home" => Ok(ActionTarget::Home),
                _ => Err(unknown_action("not-found", action)),
            };
        };

        self.entries
            .get(&from)
            .and_then(|spec| {
                spec.actions
                    .iter()
                    .chain(COMMON_ACTIONS.iter())
                    .find(|(name, _)| *name == action)
                    .map(|(_, target)| *target)
            })
            .ok_or_else(|| unknown_action(from.as_str(), action))
    }

    fn not_found(route: &str, params: &Params) -> ScreenDescriptor {
        ScreenDescriptor {
            route: None,
            requested: route.to_string(),
            component: NOT_FOUND.component,
            title: NOT_FOUND.title,
            kind: NOT_FOUND.kind,
            params: params.clone(),
            identity: None,
            actions: vec!["home"],
        }
    }
}

fn unknown_action(route: &str, action: &str) -> NavError {
    error!("Screen '{}' requested unknown action '{}'", route, action);
    NavError::UnknownAction {
        route: route.to_string(),
        action: action.to_string(),
    }
}

/// Explicit param first, then the signed-in user when their role owns the key,
/// then the literal fallback (logged so the substitution is visible).
fn bind_identity(route: RouteId, key: IdentityKey, params: &Params, user: Option<&User>) -> IdentityBinding {
    if let Some(value) = params.get_str(key.param()) {
        return IdentityBinding {
            key: key.param(),
            value: value.to_string(),
            source: IdentitySource::Param,
        };
    }

    if let Some(user) = user.filter(|u| Some(u.role) == key.role()) {
        return IdentityBinding {
            key: key.param(),
            value: user.id.clone(),
            source: IdentitySource::CurrentUser,
        };
    }

    warn!(
        "Missing identity '{}' for route '{}', substituting '{}'",
        key.param(),
        route,
        key.fallback()
    );
    IdentityBinding {
        key: key.param(),
        value: key.fallback().to_string(),
        source: IdentitySource::Fallback,
    }
}
