//! Static screen vocabulary: which component each route shows and which logical
//! actions that component may request.
//!
//! `screen_spec` is an exhaustive match, so a route without an entry does not compile.

use serde::Serialize;

use crate::nav::RouteId;
use crate::session::Role;

/// What a logical action resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "target")]
pub enum ActionTarget {
    Route(RouteId),
    Back,
    /// Role dashboard when signed in, the landing route otherwise
    Home,
    OpenMenu,
    SignIn,
    SignOut,
    Bypass(Role),
}

/// Broad layout family of a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenKind {
    Landing,
    Auth,
    Dashboard,
    List,
    Detail,
    Form,
    Analytics,
    Live,
    Settings,
    Chat,
    Info,
    NotFound,
}

/// Identity parameter a screen needs, with its literal fallback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum IdentityKey {
    Student,
    Teacher,
    Parent,
    Admin,
    Child,
}

impl IdentityKey {
    pub fn param(&self) -> &'static str {
        match self {
            IdentityKey::Student => "studentId",
            IdentityKey::Teacher => "teacherId",
            IdentityKey::Parent => "parentId",
            IdentityKey::Admin => "adminId",
            IdentityKey::Child => "childId",
        }
    }

    pub fn fallback(&self) -> &'static str {
        match self {
            IdentityKey::Student => "student_123",
            IdentityKey::Teacher => "teacher_123",
            IdentityKey::Parent => "parent_123",
            IdentityKey::Admin => "admin_123",
            IdentityKey::Child => "child_123",
        }
    }

    /// Role whose signed-in user id can fill this key
    pub fn role(&self) -> Option<Role> {
        match self {
            IdentityKey::Student => Some(Role::Student),
            IdentityKey::Teacher => Some(Role::Teacher),
            IdentityKey::Parent => Some(Role::Parent),
            IdentityKey::Admin => Some(Role::Admin),
            IdentityKey::Child => None,
        }
    }
}

/// Logical actions every screen understands
pub const COMMON_ACTIONS: &[(&str, ActionTarget)] = &[
    ("back", ActionTarget::Back),
    ("home", ActionTarget::Home),
    ("menu", ActionTarget::OpenMenu),
    ("profile", ActionTarget::Route(RouteId::Profile)),
    ("settings", ActionTarget::Route(RouteId::Settings)),
    ("notifications", ActionTarget::Route(RouteId::Notifications)),
    ("sign-out", ActionTarget::SignOut),
];

#[derive(Debug, Clone, Copy)]
pub struct ScreenSpec {
    pub component: &'static str,
    pub title: &'static str,
    pub kind: ScreenKind,
    pub identity: Option<IdentityKey>,
    pub actions: &'static [(&'static str, ActionTarget)],
}

const fn spec(
    component: &'static str,
    title: &'static str,
    kind: ScreenKind,
    identity: Option<IdentityKey>,
    actions: &'static [(&'static str, ActionTarget)],
) -> ScreenSpec {
    ScreenSpec { component, title, kind, identity, actions }
}

pub fn screen_spec(route: RouteId) -> ScreenSpec {
    use ActionTarget::{Bypass, Route, SignIn};
    use IdentityKey as Id;
    use RouteId as R;
    use ScreenKind as K;

    match route {
        // Shared / unauthenticated
        R::Welcome => spec("WelcomeScreen", "Welcome", K::Landing, None, &[
            ("login", Route(R::Login)),
            ("signup", Route(R::Signup)),
            ("about", Route(R::About)),
        ]),
        R::Login => spec("LoginScreen", "Sign In", K::Auth, None, &[
            ("submit", SignIn),
            ("forgot-password", Route(R::ForgotPassword)),
            ("signup", Route(R::Signup)),
            ("demo-student", Bypass(Role::Student)),
            ("demo-teacher", Bypass(Role::Teacher)),
            ("demo-parent", Bypass(Role::Parent)),
            ("demo-admin", Bypass(Role::Admin)),
        ]),
        R::Signup => spec("SignupScreen", "Create Account", K::Auth, None, &[
            ("login", Route(R::Login)),
        ]),
        R::ForgotPassword => spec("ForgotPasswordScreen", "Reset Password", K::Auth, None, &[
            ("login", Route(R::Login)),
        ]),
        R::Profile => spec("ProfileScreen", "Profile", K::Detail, None, &[
            ("edit-profile", Route(R::EditProfile)),
            ("change-password", Route(R::ChangePassword)),
            ("help", Route(R::HelpSupport)),
        ]),
        R::EditProfile => spec("EditProfileScreen", "Edit Profile", K::Form, None, &[
            ("saved", Route(R::Profile)),
        ]),
        R::ChangePassword => spec("ChangePasswordScreen", "Change Password", K::Form, None, &[
            ("saved", Route(R::Profile)),
        ]),
        R::Settings => spec("SettingsScreen", "Settings", K::Settings, None, &[
            ("change-password", Route(R::ChangePassword)),
            ("help", Route(R::HelpSupport)),
            ("about", Route(R::About)),
        ]),
        R::Notifications => spec("NotificationsScreen", "Notifications", K::List, None, &[
            ("open-chat", Route(R::Chat)),
        ]),
        R::HelpSupport => spec("HelpSupportScreen", "Help & Support", K::Info, None, &[
            ("open-chat", Route(R::Chat)),
        ]),
        R::About => spec("AboutScreen", "About", K::Info, None, &[]),
        R::Chat => spec("ChatListScreen", "Messages", K::Chat, None, &[
            ("open-thread", Route(R::ChatThread)),
        ]),
        R::ChatThread => spec("ChatThreadScreen", "Conversation", K::Chat, None, &[]),

        // Student
        R::StudentDashboard => spec("StudentDashboard", "Student Dashboard", K::Dashboard, Some(Id::Student), &[
            ("join-live-class", Route(R::LiveClass)),
            ("recorded-classes", Route(R::RecordedClasses)),
            ("schedule", Route(R::ClassSchedule)),
            ("assignments", Route(R::Assignments)),
            ("tests", Route(R::Tests)),
            ("study-materials", Route(R::StudyMaterials)),
            ("doubts", Route(R::DoubtForum)),
            ("attendance", Route(R::Attendance)),
            ("progress", Route(R::ProgressReport)),
            ("fees", Route(R::FeePayment)),
            ("leaderboard", Route(R::Leaderboard)),
            ("courses", Route(R::EnrolledCourses)),
        ]),
        R::LiveClass => spec("LiveClassScreen", "Live Class", K::Live, Some(Id::Student), &[
            ("ask-doubt", Route(R::AskDoubt)),
            ("leave", Route(R::StudentDashboard)),
        ]),
        R::RecordedClasses => spec("RecordedClassesScreen", "Recorded Classes", K::List, Some(Id::Student), &[
            ("open-material", Route(R::StudyMaterials)),
        ]),
        R::ClassSchedule => spec("ClassScheduleScreen", "Class Schedule", K::List, Some(Id::Student), &[
            ("join-live-class", Route(R::LiveClass)),
            ("calendar", Route(R::StudentCalendar)),
        ]),
        R::Assignments => spec("AssignmentsScreen", "Assignments", K::List, Some(Id::Student), &[
            ("open-assignment", Route(R::AssignmentDetail)),
        ]),
        R::AssignmentDetail => spec("AssignmentDetailScreen", "Assignment", K::Detail, Some(Id::Student), &[
            ("submit", Route(R::SubmitAssignment)),
        ]),
        R::SubmitAssignment => spec("SubmitAssignmentScreen", "Submit Assignment", K::Form, Some(Id::Student), &[
            ("submitted", Route(R::Assignments)),
        ]),
        R::Tests => spec("TestsScreen", "Tests", K::List, Some(Id::Student), &[
            ("start-test", Route(R::TestAttempt)),
            ("view-result", Route(R::TestResult)),
        ]),
        R::TestAttempt => spec("TestAttemptScreen", "Test", K::Form, Some(Id::Student), &[
            ("finish", Route(R::TestResult)),
        ]),
        R::TestResult => spec("TestResultScreen", "Test Result", K::Analytics, Some(Id::Student), &[
            ("leaderboard", Route(R::Leaderboard)),
            ("tests", Route(R::Tests)),
        ]),
        R::StudyMaterials => spec("StudyMaterialsScreen", "Study Materials", K::List, Some(Id::Student), &[
            ("recorded-classes", Route(R::RecordedClasses)),
        ]),
        R::DoubtForum => spec("DoubtForumScreen", "Doubt Forum", K::List, Some(Id::Student), &[
            ("open-doubt", Route(R::DoubtDetail)),
            ("ask-doubt", Route(R::AskDoubt)),
        ]),
        R::DoubtDetail => spec("DoubtDetailScreen", "Doubt", K::Detail, Some(Id::Student), &[]),
        R::AskDoubt => spec("AskDoubtScreen", "Ask a Doubt", K::Form, Some(Id::Student), &[
            ("posted", Route(R::DoubtForum)),
        ]),
        R::Attendance => spec("AttendanceScreen", "Attendance", K::Analytics, Some(Id::Student), &[
            ("calendar", Route(R::StudentCalendar)),
        ]),
        R::ProgressReport => spec("ProgressReportScreen", "Progress Report", K::Analytics, Some(Id::Student), &[
            ("achievements", Route(R::Achievements)),
            ("test-result", Route(R::TestResult)),
        ]),
        R::FeePayment => spec("FeePaymentScreen", "Fee Payment", K::Form, Some(Id::Student), &[
            ("payment-history", Route(R::PaymentHistory)),
        ]),
        R::PaymentHistory => spec("PaymentHistoryScreen", "Payment History", K::List, Some(Id::Student), &[
            ("pay-now", Route(R::FeePayment)),
        ]),
        R::Leaderboard => spec("LeaderboardScreen", "Leaderboard", K::List, Some(Id::Student), &[]),
        R::Achievements => spec("AchievementsScreen", "Achievements", K::List, Some(Id::Student), &[]),
        R::StudentCalendar => spec("StudentCalendarScreen", "Calendar", K::List, Some(Id::Student), &[
            ("schedule", Route(R::ClassSchedule)),
        ]),
        R::CourseCatalog => spec("CourseCatalogScreen", "Course Catalog", K::List, Some(Id::Student), &[
            ("open-course", Route(R::CourseDetail)),
        ]),
        R::CourseDetail => spec("CourseDetailScreen", "Course", K::Detail, Some(Id::Student), &[
            ("enrolled", Route(R::EnrolledCourses)),
            ("pay-fees", Route(R::FeePayment)),
        ]),
        R::EnrolledCourses => spec("EnrolledCoursesScreen", "My Courses", K::List, Some(Id::Student), &[
            ("open-course", Route(R::CourseDetail)),
            ("browse", Route(R::CourseCatalog)),
        ]),

        // Teacher
        R::TeacherDashboard => spec("TeacherDashboard", "Teacher Dashboard", K::Dashboard, Some(Id::Teacher), &[
            ("classes", Route(R::TeacherClasses)),
            ("go-live", Route(R::StartLiveClass)),
            ("create-assignment", Route(R::CreateAssignment)),
            ("grade-assignments", Route(R::GradeAssignments)),
            ("create-test", Route(R::CreateTest)),
            ("upload-material", Route(R::UploadMaterial)),
            ("mark-attendance", Route(R::MarkAttendance)),
            ("students", Route(R::StudentRoster)),
            ("doubts", Route(R::DoubtInbox)),
            ("schedule", Route(R::TeacherSchedule)),
            ("messages", Route(R::TeacherMessages)),
            ("payroll", Route(R::TeacherPayroll)),
        ]),
        R::TeacherClasses => spec("TeacherClassesScreen", "My Classes", K::List, Some(Id::Teacher), &[
            ("open-class", Route(R::ClassDetail)),
        ]),
        R::ClassDetail => spec("ClassDetailScreen", "Class", K::Detail, Some(Id::Teacher), &[
            ("go-live", Route(R::StartLiveClass)),
            ("mark-attendance", Route(R::MarkAttendance)),
            ("students", Route(R::StudentRoster)),
            ("create-assignment", Route(R::CreateAssignment)),
        ]),
        R::StartLiveClass => spec("StartLiveClassScreen", "Live Class", K::Live, Some(Id::Teacher), &[
            ("end-class", Route(R::TeacherDashboard)),
        ]),
        R::CreateAssignment => spec("CreateAssignmentScreen", "New Assignment", K::Form, Some(Id::Teacher), &[
            ("created", Route(R::GradeAssignments)),
        ]),
        R::GradeAssignments => spec("GradeAssignmentsScreen", "Grade Assignments", K::List, Some(Id::Teacher), &[
            ("open-submissions", Route(R::AssignmentSubmissions)),
            ("create-assignment", Route(R::CreateAssignment)),
        ]),
        R::AssignmentSubmissions => spec("AssignmentSubmissionsScreen", "Submissions", K::List, Some(Id::Teacher), &[
            ("open-student", Route(R::StudentDetail)),
        ]),
        R::CreateTest => spec("CreateTestScreen", "New Test", K::Form, Some(Id::Teacher), &[
            ("created", Route(R::TestAnalytics)),
        ]),
        R::TestAnalytics => spec("TestAnalyticsScreen", "Test Analytics", K::Analytics, Some(Id::Teacher), &[
            ("open-student", Route(R::StudentDetail)),
        ]),
        R::UploadMaterial => spec("UploadMaterialScreen", "Upload Material", K::Form, Some(Id::Teacher), &[
            ("uploaded", Route(R::TeacherClasses)),
        ]),
        R::MarkAttendance => spec("MarkAttendanceScreen", "Mark Attendance", K::Form, Some(Id::Teacher), &[
            ("saved", Route(R::TeacherClasses)),
        ]),
        R::StudentRoster => spec("StudentRosterScreen", "Students", K::List, Some(Id::Teacher), &[
            ("open-student", Route(R::StudentDetail)),
        ]),
        R::StudentDetail => spec("StudentDetailScreen", "Student", K::Detail, Some(Id::Student), &[
            ("message", Route(R::ChatThread)),
        ]),
        R::DoubtInbox => spec("DoubtInboxScreen", "Doubt Inbox", K::List, Some(Id::Teacher), &[
            ("answer", Route(R::AnswerDoubt)),
        ]),
        R::AnswerDoubt => spec("AnswerDoubtScreen", "Answer Doubt", K::Form, Some(Id::Teacher), &[
            ("answered", Route(R::DoubtInbox)),
        ]),
        R::TeacherSchedule => spec("TeacherScheduleScreen", "Schedule", K::List, Some(Id::Teacher), &[
            ("go-live", Route(R::StartLiveClass)),
        ]),
        R::TeacherMessages => spec("TeacherMessagesScreen", "Messages", K::Chat, Some(Id::Teacher), &[
            ("open-thread", Route(R::ChatThread)),
        ]),
        R::TeacherPayroll => spec("TeacherPayrollScreen", "Payroll", K::Analytics, Some(Id::Teacher), &[]),

        // Parent
        R::ParentDashboard => spec("ParentDashboard", "Parent Dashboard", K::Dashboard, Some(Id::Parent), &[
            ("select-child", Route(R::ChildSelector)),
            ("progress", Route(R::ChildProgress)),
            ("attendance", Route(R::ChildAttendance)),
            ("assignments", Route(R::ChildAssignments)),
            ("test-results", Route(R::ChildTestResults)),
            ("fees", Route(R::FeeStatus)),
            ("meetings", Route(R::TeacherMeetings)),
            ("messages", Route(R::ParentMessages)),
            ("announcements", Route(R::ParentAnnouncements)),
        ]),
        R::ChildSelector => spec("ChildSelectorScreen", "Select Child", K::List, Some(Id::Parent), &[
            ("selected", Route(R::ParentDashboard)),
        ]),
        R::ChildProgress => spec("ChildProgressScreen", "Child Progress", K::Analytics, Some(Id::Child), &[
            ("test-results", Route(R::ChildTestResults)),
        ]),
        R::ChildAttendance => spec("ChildAttendanceScreen", "Attendance", K::Analytics, Some(Id::Child), &[]),
        R::ChildAssignments => spec("ChildAssignmentsScreen", "Assignments", K::List, Some(Id::Child), &[]),
        R::ChildTestResults => spec("ChildTestResultsScreen", "Test Results", K::Analytics, Some(Id::Child), &[
            ("progress", Route(R::ChildProgress)),
        ]),
        R::FeeStatus => spec("FeeStatusScreen", "Fee Status", K::Detail, Some(Id::Parent), &[
            ("pay-now", Route(R::ParentPayments)),
        ]),
        R::ParentPayments => spec("ParentPaymentsScreen", "Payments", K::Form, Some(Id::Parent), &[
            ("paid", Route(R::FeeStatus)),
        ]),
        R::TeacherMeetings => spec("TeacherMeetingsScreen", "Teacher Meetings", K::List, Some(Id::Parent), &[
            ("message-teacher", Route(R::ParentMessages)),
        ]),
        R::ParentMessages => spec("ParentMessagesScreen", "Messages", K::Chat, Some(Id::Parent), &[
            ("open-thread", Route(R::ChatThread)),
        ]),
        R::ParentAnnouncements => spec("ParentAnnouncementsScreen", "Announcements", K::List, Some(Id::Parent), &[]),

        // Admin
        R::AdminDashboard => spec("AdminDashboard", "Admin Dashboard", K::Dashboard, Some(Id::Admin), &[
            ("users", Route(R::UserManagement)),
            ("batches", Route(R::BatchManagement)),
            ("courses", Route(R::CourseManagement)),
            ("teachers", Route(R::TeacherManagement)),
            ("students", Route(R::StudentManagement)),
            ("fees", Route(R::FeeManagement)),
            ("revenue", Route(R::RevenueAnalytics)),
            ("kpi", Route(R::KpiDetail)),
            ("reports", Route(R::Reports)),
            ("announcements", Route(R::Announcements)),
            ("audit-log", Route(R::AuditLog)),
            ("institute", Route(R::InstituteProfile)),
        ]),
        R::UserManagement => spec("UserManagementScreen", "Users", K::List, Some(Id::Admin), &[
            ("open-user", Route(R::UserDetail)),
            ("create-user", Route(R::CreateUser)),
        ]),
        R::UserDetail => spec("UserDetailScreen", "User", K::Detail, Some(Id::Admin), &[]),
        R::CreateUser => spec("CreateUserScreen", "New User", K::Form, Some(Id::Admin), &[
            ("created", Route(R::UserManagement)),
        ]),
        R::BatchManagement => spec("BatchManagementScreen", "Batches", K::List, Some(Id::Admin), &[
            ("open-batch", Route(R::BatchDetail)),
        ]),
        R::BatchDetail => spec("BatchDetailScreen", "Batch", K::Detail, Some(Id::Admin), &[
            ("students", Route(R::StudentManagement)),
        ]),
        R::CourseManagement => spec("CourseManagementScreen", "Courses", K::List, Some(Id::Admin), &[]),
        R::TeacherManagement => spec("TeacherManagementScreen", "Teachers", K::List, Some(Id::Admin), &[
            ("open-user", Route(R::UserDetail)),
        ]),
        R::StudentManagement => spec("StudentManagementScreen", "Students", K::List, Some(Id::Admin), &[
            ("open-user", Route(R::UserDetail)),
        ]),
        R::FeeManagement => spec("FeeManagementScreen", "Fee Management", K::List, Some(Id::Admin), &[
            ("fee-structure", Route(R::FeeStructure)),
            ("revenue", Route(R::RevenueAnalytics)),
        ]),
        R::FeeStructure => spec("FeeStructureScreen", "Fee Structure", K::Form, Some(Id::Admin), &[]),
        R::RevenueAnalytics => spec("RevenueAnalyticsScreen", "Revenue", K::Analytics, Some(Id::Admin), &[
            ("kpi", Route(R::KpiDetail)),
        ]),
        R::KpiDetail => spec("KpiDetailScreen", "KPI", K::Analytics, Some(Id::Admin), &[
            ("reports", Route(R::Reports)),
        ]),
        R::Reports => spec("ReportsScreen", "Reports", K::List, Some(Id::Admin), &[
            ("kpi", Route(R::KpiDetail)),
        ]),
        R::Announcements => spec("AnnouncementsScreen", "Announcements", K::List, Some(Id::Admin), &[
            ("create-announcement", Route(R::CreateAnnouncement)),
        ]),
        R::CreateAnnouncement => spec("CreateAnnouncementScreen", "New Announcement", K::Form, Some(Id::Admin), &[
            ("published", Route(R::Announcements)),
        ]),
        R::AdminSettings => spec("AdminSettingsScreen", "Institute Settings", K::Settings, Some(Id::Admin), &[
            ("institute", Route(R::InstituteProfile)),
            ("audit-log", Route(R::AuditLog)),
        ]),
        R::AuditLog => spec("AuditLogScreen", "Audit Log", K::List, Some(Id::Admin), &[]),
        R::InstituteProfile => spec("InstituteProfileScreen", "Institute Profile", K::Detail, Some(Id::Admin), &[]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_actions_do_not_shadow_common_actions() {
        for route in RouteId::ALL {
            let spec = screen_spec(*route);
            for (action, _) in spec.actions {
                assert!(
                    !COMMON_ACTIONS.iter().any(|(common, _)| common == action),
                    "{} redefines common action '{}'",
                    route,
                    action
                );
            }
        }
    }

    #[test]
    fn test_screen_actions_are_unique() {
        for route in RouteId::ALL {
            let spec = screen_spec(*route);
            let mut names: Vec<_> = spec.actions.iter().map(|(a, _)| *a).collect();
            names.sort();
            names.dedup();
            assert_eq!(names.len(), spec.actions.len(), "duplicate action on {}", route);
        }
    }

    #[test]
    fn test_dashboards_use_dashboard_kind() {
        for role in Role::ALL {
            assert_eq!(screen_spec(role.dashboard_route()).kind, ScreenKind::Dashboard);
        }
    }
}
