//! Navigation behaviour through the public shell API: transitions, back
//! handling, the drawer, menus and the route table.

use campus_shell::nav::{
    ActionTarget, BackOutcome, IdentitySource, NavigationState, Params, ROUTES, RouteId,
    RouteTable, compose_menu, compose_menu_for, decide_back,
};
use campus_shell::session::{LocalSessionProvider, Role, User};
use campus_shell::shell::{Shell, ShellOptions};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn shell() -> Shell {
    let provider = Arc::new(LocalSessionProvider::new(Vec::new(), Duration::ZERO));
    Shell::new(ShellOptions::default(), provider)
}

fn signed_in_shell(role: Role) -> Shell {
    let mut shell = shell();
    shell.bypass_sign_in(User::bypass(role));
    shell
}

#[test]
fn test_navigate_records_previous_and_replaces_params() {
    let mut shell = signed_in_shell(Role::Student);
    shell.navigate(
        RouteId::AssignmentDetail,
        Some(Params::new().with("assignmentId", "a-17")),
        None,
    );
    shell.navigate(RouteId::SubmitAssignment, None, None);

    let state = shell.state();
    assert_eq!(state.current_route(), RouteId::SubmitAssignment);
    assert_eq!(state.previous_route(), Some(RouteId::AssignmentDetail));
    assert!(state.params().is_empty());
    assert_eq!(state.current_user().unwrap().role, Role::Student);
}

#[test]
fn test_back_is_single_level() {
    let mut shell = signed_in_shell(Role::Teacher);
    shell.navigate(RouteId::Profile, None, None);

    assert!(shell.handle_back());
    assert_eq!(shell.state().current_route(), RouteId::TeacherDashboard);
    assert_eq!(shell.state().previous_route(), None);

    // Nothing left to go back to: the platform gets the event
    assert!(!shell.handle_back());
    assert_eq!(shell.state().current_route(), RouteId::TeacherDashboard);
}

#[test]
fn test_back_on_root_is_not_consumed() {
    let mut shell = shell();
    shell.navigate(RouteId::About, None, None);
    shell.navigate(RouteId::Welcome, None, None);
    assert_eq!(shell.state().previous_route(), Some(RouteId::About));

    assert!(!shell.handle_back());
    assert_eq!(shell.state().current_route(), RouteId::Welcome);
}

#[test]
fn test_back_closes_drawer_first() {
    let mut shell = signed_in_shell(Role::Parent);
    shell.navigate(RouteId::ChildAttendance, None, None);
    shell.open_drawer();

    assert!(shell.handle_back());
    assert_eq!(shell.state().current_route(), RouteId::ChildAttendance);

    shell.tick(Instant::now() + Duration::from_secs(1));
    assert!(!shell.state().drawer_open());
    assert!(shell.handle_back());
    assert_eq!(shell.state().current_route(), RouteId::ParentDashboard);
}

#[test]
fn test_decide_back_priorities() {
    let mut state = NavigationState::new(RouteId::Settings, Some(User::bypass(Role::Admin)));
    assert_eq!(decide_back(&state), BackOutcome::Ignore);

    state.navigate(RouteId::AuditLog, None, None);
    assert_eq!(decide_back(&state), BackOutcome::NavigateBack(RouteId::Settings));
}

#[test]
fn test_menu_select_navigates_and_closes_drawer() {
    let mut shell = signed_in_shell(Role::Admin);
    shell.open_drawer();
    let (items, _) = shell.menu();
    let target = items[2].target_route;

    shell.handle().select_menu(target);
    shell.pump();

    assert_eq!(shell.state().current_route(), target);
    assert!(shell.drawer().phase() != campus_shell::nav::DrawerPhase::Open);
}

#[test]
fn test_toggle_drawer_twice_ends_closed() {
    let mut shell = signed_in_shell(Role::Student);
    shell.toggle_drawer();
    shell.toggle_drawer();
    shell.tick(Instant::now() + Duration::from_secs(1));
    assert!(shell.drawer().is_closed());
    assert!(!shell.state().drawer_open());
}

#[test]
fn test_menus_start_with_role_dashboard() {
    for role in Role::ALL {
        let (items, _) = compose_menu(Some(role));
        assert_eq!(items[0].target_route, role.dashboard_route());
        for item in &items {
            assert!(ROUTES.spec(item.target_route).is_some());
        }
    }
    assert_eq!(compose_menu(None), compose_menu(Some(Role::Student)));
    assert_eq!(compose_menu_for(Some("janitor")), compose_menu(Some(Role::Student)));
}

#[test]
fn test_route_table_covers_every_route() {
    let table = RouteTable::standard();
    assert!(table.validate().is_ok());
    assert_eq!(table.len(), RouteId::ALL.len());

    for route in RouteId::ALL {
        let descriptor = table.resolve(route.as_str(), &Params::new());
        assert!(!descriptor.is_not_found(), "{} resolved to the fallback", route);
        assert!(descriptor.actions.contains(&"home"));
    }
}

#[test]
fn test_every_screen_action_translates() {
    for route in RouteId::ALL {
        let descriptor = ROUTES.resolve(route.as_str(), &Params::new());
        for action in &descriptor.actions {
            assert!(
                ROUTES.translate(Some(*route), action).is_ok(),
                "{} offers untranslatable action {}",
                route,
                action
            );
        }
    }
}

#[test]
fn test_unknown_route_resolves_to_fallback() {
    let descriptor = ROUTES.resolve("student-dashbord", &Params::new());
    assert!(descriptor.is_not_found());
    assert_eq!(descriptor.requested, "student-dashbord");
    assert_eq!(descriptor.actions, vec!["home"]);
    assert_eq!(ROUTES.translate(None, "home"), Ok(ActionTarget::Home));
}

#[test]
fn test_home_from_fallback_goes_to_dashboard_when_signed_in() {
    let mut shell = signed_in_shell(Role::Teacher);
    shell.navigate(RouteId::DoubtInbox, None, None);
    shell.open_link("nowhere", Params::new());
    assert!(shell.current_screen().descriptor.is_not_found());
    assert_eq!(shell.state().current_route(), RouteId::DoubtInbox);

    shell.current_screen().on_navigate.call("home", None);
    shell.pump();
    assert_eq!(shell.state().current_route(), RouteId::TeacherDashboard);
}

#[test]
fn test_back_from_fallback_returns_to_route_underneath() {
    let mut shell = shell();
    shell.open_link("missing-screen", Params::new());
    assert!(shell.handle_back());
    assert!(!shell.current_screen().descriptor.is_not_found());
    assert_eq!(shell.state().current_route(), RouteId::Welcome);
}

#[test]
fn test_identity_binding_prefers_param_then_user() {
    let mut shell = signed_in_shell(Role::Student);
    shell.navigate(RouteId::Attendance, None, None);
    let binding = shell.current_screen().descriptor.identity.unwrap();
    assert_eq!(binding.source, IdentitySource::CurrentUser);
    assert_eq!(&binding.value, &shell.state().current_user().unwrap().id);

    shell.navigate(
        RouteId::Attendance,
        Some(Params::new().with("studentId", "s-42")),
        None,
    );
    let binding = shell.current_screen().descriptor.identity.unwrap();
    assert_eq!(binding.source, IdentitySource::Param);
    assert_eq!(binding.value, "s-42");
}

#[test]
fn test_identity_falls_back_to_literal() {
    let descriptor = ROUTES.resolve("child-progress", &Params::new());
    let binding = descriptor.identity.unwrap();
    assert!(binding.is_fallback());
    assert_eq!(binding.key, "childId");
    assert_eq!(binding.value, "child_123");
}

#[test]
fn test_demo_action_on_login_starts_bypass() {
    let mut shell = shell();
    shell.navigate(RouteId::Login, None, None);
    shell.current_screen().on_navigate.call("demo-admin", None);
    shell.pump();

    assert_eq!(shell.state().current_route(), RouteId::AdminDashboard);
    assert!(shell.state().manual_auth());
}
