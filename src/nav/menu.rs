//! Role-scoped drawer menus and color palettes.

use ratatui::style::Color;
use serde::Serialize;

use crate::nav::RouteId;
use crate::session::Role;

/// One entry of the slide-in menu
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: &'static str,
    pub title: &'static str,
    pub icon: &'static str,
    pub target_route: RouteId,
}

/// Colors the drawer and header use for a role
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub primary: Color,
    pub secondary: Color,
    pub accent: Color,
    pub surface: Color,
}

const fn item(id: &'static str, title: &'static str, icon: &'static str, target_route: RouteId) -> MenuItem {
    MenuItem { id, title, icon, target_route }
}

const STUDENT_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard", "home", RouteId::StudentDashboard),
    item("live-classes", "Live Classes", "video", RouteId::LiveClass),
    item("recorded", "Recorded Classes", "play-circle", RouteId::RecordedClasses),
    item("assignments", "Assignments", "clipboard", RouteId::Assignments),
    item("tests", "Tests", "file-text", RouteId::Tests),
    item("materials", "Study Materials", "book", RouteId::StudyMaterials),
    item("doubts", "Doubt Forum", "help-circle", RouteId::DoubtForum),
    item("attendance", "Attendance", "calendar-check", RouteId::Attendance),
    item("progress", "Progress Report", "trending-up", RouteId::ProgressReport),
    item("fees", "Fee Payment", "credit-card", RouteId::FeePayment),
    item("profile", "Profile", "user", RouteId::Profile),
    item("settings", "Settings", "settings", RouteId::Settings),
];

const TEACHER_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard", "home", RouteId::TeacherDashboard),
    item("classes", "My Classes", "users", RouteId::TeacherClasses),
    item("go-live", "Start Live Class", "video", RouteId::StartLiveClass),
    item("grading", "Grade Assignments", "check-square", RouteId::GradeAssignments),
    item("create-test", "Create Test", "edit", RouteId::CreateTest),
    item("attendance", "Mark Attendance", "calendar-check", RouteId::MarkAttendance),
    item("students", "Students", "user-check", RouteId::StudentRoster),
    item("doubts", "Doubt Inbox", "inbox", RouteId::DoubtInbox),
    item("schedule", "Schedule", "calendar", RouteId::TeacherSchedule),
    item("messages", "Messages", "message-square", RouteId::TeacherMessages),
    item("profile", "Profile", "user", RouteId::Profile),
    item("settings", "Settings", "settings", RouteId::Settings),
];

const PARENT_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard", "home", RouteId::ParentDashboard),
    item("progress", "Child Progress", "trending-up", RouteId::ChildProgress),
    item("attendance", "Attendance", "calendar-check", RouteId::ChildAttendance),
    item("assignments", "Assignments", "clipboard", RouteId::ChildAssignments),
    item("results", "Test Results", "award", RouteId::ChildTestResults),
    item("fees", "Fee Status", "credit-card", RouteId::FeeStatus),
    item("meetings", "Teacher Meetings", "calendar", RouteId::TeacherMeetings),
    item("messages", "Messages", "message-square", RouteId::ParentMessages),
    item("announcements", "Announcements", "bell", RouteId::ParentAnnouncements),
    item("profile", "Profile", "user", RouteId::Profile),
    item("settings", "Settings", "settings", RouteId::Settings),
];

const ADMIN_MENU: &[MenuItem] = &[
    item("dashboard", "Dashboard", "home", RouteId::AdminDashboard),
    item("users", "User Management", "users", RouteId::UserManagement),
    item("batches", "Batches", "layers", RouteId::BatchManagement),
    item("courses", "Courses", "book-open", RouteId::CourseManagement),
    item("teachers", "Teachers", "user-check", RouteId::TeacherManagement),
    item("students", "Students", "user", RouteId::StudentManagement),
    item("fees", "Fee Management", "credit-card", RouteId::FeeManagement),
    item("revenue", "Revenue Analytics", "bar-chart", RouteId::RevenueAnalytics),
    item("reports", "Reports", "file-text", RouteId::Reports),
    item("announcements", "Announcements", "bell", RouteId::Announcements),
    item("audit", "Audit Log", "shield", RouteId::AuditLog),
    item("settings", "Institute Settings", "settings", RouteId::AdminSettings),
];

// Catppuccin Mocha accents, one family per role
const STUDENT_PALETTE: Palette = Palette {
    primary: Color::Rgb(0x89, 0xb4, 0xfa),   // blue
    secondary: Color::Rgb(0x74, 0xc7, 0xec), // sapphire
    accent: Color::Rgb(0x89, 0xdc, 0xeb),    // sky
    surface: Color::Rgb(0x1e, 0x1e, 0x2e),
};

const TEACHER_PALETTE: Palette = Palette {
    primary: Color::Rgb(0xa6, 0xe3, 0xa1),   // green
    secondary: Color::Rgb(0x94, 0xe2, 0xd5), // teal
    accent: Color::Rgb(0xf9, 0xe2, 0xaf),    // yellow
    surface: Color::Rgb(0x1e, 0x1e, 0x2e),
};

const PARENT_PALETTE: Palette = Palette {
    primary: Color::Rgb(0xfa, 0xb3, 0x87),   // peach
    secondary: Color::Rgb(0xf2, 0xcd, 0xcd), // flamingo
    accent: Color::Rgb(0xf5, 0xe0, 0xdc),    // rosewater
    surface: Color::Rgb(0x1e, 0x1e, 0x2e),
};

const ADMIN_PALETTE: Palette = Palette {
    primary: Color::Rgb(0xcb, 0xa6, 0xf7),   // mauve
    secondary: Color::Rgb(0xb4, 0xbe, 0xfe), // lavender
    accent: Color::Rgb(0xf5, 0xc2, 0xe7),    // pink
    surface: Color::Rgb(0x1e, 0x1e, 0x2e),
};

/// Menu entries and palette for a role; a missing role gets the Student configuration.
pub fn compose_menu(role: Option<Role>) -> (Vec<MenuItem>, Palette) {
    let (items, palette) = match role.unwrap_or(Role::Student) {
        Role::Student => (STUDENT_MENU, STUDENT_PALETTE),
        Role::Teacher => (TEACHER_MENU, TEACHER_PALETTE),
        Role::Parent => (PARENT_MENU, PARENT_PALETTE),
        Role::Admin => (ADMIN_MENU, ADMIN_PALETTE),
    };
    (items.to_vec(), palette)
}

/// Same as [`compose_menu`] for a free-form role string; unrecognized roles fall back to Student.
pub fn compose_menu_for(role: Option<&str>) -> (Vec<MenuItem>, Palette) {
    compose_menu(role.and_then(|r| r.parse::<Role>().ok()))
}
