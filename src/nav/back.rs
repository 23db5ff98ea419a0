use crate::nav::{NavigationState, RouteId};

/// Resolution of a platform back event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackOutcome {
    /// Drawer is showing: close it, event consumed
    CloseDrawer,
    /// Return to the single remembered route, event consumed
    NavigateBack(RouteId),
    /// Not consumed; the platform decides (e.g. exit)
    Ignore,
}

impl BackOutcome {
    pub fn consumed(&self) -> bool {
        !matches!(self, BackOutcome::Ignore)
    }
}

/// Decide what a back event means for the given state, in priority order:
/// close the drawer, pop the remembered route, or let the platform have it.
pub fn decide_back(state: &NavigationState) -> BackOutcome {
    if state.drawer_open() {
        return BackOutcome::CloseDrawer;
    }
    match state.previous_route() {
        Some(previous) if state.current_route() != RouteId::ROOT => BackOutcome::NavigateBack(previous),
        _ => BackOutcome::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drawer_takes_priority() {
        let mut state = NavigationState::default();
        state.navigate(RouteId::Login, None, None);
        state.set_drawer_open(true);
        assert_eq!(decide_back(&state), BackOutcome::CloseDrawer);
    }

    #[test]
    fn test_pops_previous_route() {
        let mut state = NavigationState::default();
        state.navigate(RouteId::Login, None, None);
        assert_eq!(decide_back(&state), BackOutcome::NavigateBack(RouteId::Welcome));
    }

    #[test]
    fn test_root_is_not_consumed() {
        let mut state = NavigationState::default();
        assert_eq!(decide_back(&state), BackOutcome::Ignore);

        // Even with history, back at the landing route belongs to the platform
        state.navigate(RouteId::Login, None, None);
        state.navigate(RouteId::Welcome, None, None);
        assert_eq!(decide_back(&state), BackOutcome::Ignore);
        assert!(!BackOutcome::Ignore.consumed());
    }
}
