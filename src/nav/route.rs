//! The closed route identifier space.
//!
//! Adding a screen means adding one identifier here plus one entry in
//! [`crate::nav::screens`]; the exhaustive match there refuses to compile otherwise.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::nav::NavError;

macro_rules! routes {
    ($($variant:ident => $id:literal),+ $(,)?) => {
        /// Identifier of every screen the shell can show
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum RouteId {
            $($variant),+
        }

        impl RouteId {
            /// Every route, in declaration order
            pub const ALL: &'static [RouteId] = &[$(RouteId::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $(RouteId::$variant => $id),+
                }
            }

            /// Parse a route identifier, `None` when it is not part of the route space
            pub fn parse(id: &str) -> Option<RouteId> {
                match id {
                    $($id => Some(RouteId::$variant),)+
                    _ => None,
                }
            }
        }
    };
}

routes! {
    // Shared / unauthenticated
    Welcome => "welcome",
    Login => "login",
    Signup => "signup",
    ForgotPassword => "forgot-password",
    Profile => "profile",
    EditProfile => "edit-profile",
    ChangePassword => "change-password",
    Settings => "settings",
    Notifications => "notifications",
    HelpSupport => "help-support",
    About => "about",
    Chat => "chat",
    ChatThread => "chat-thread",

    // Student
    StudentDashboard => "student-dashboard",
    LiveClass => "live-class",
    RecordedClasses => "recorded-classes",
    ClassSchedule => "class-schedule",
    Assignments => "assignments",
    AssignmentDetail => "assignment-detail",
    SubmitAssignment => "submit-assignment",
    Tests => "tests",
    TestAttempt => "test-attempt",
    TestResult => "test-result",
    StudyMaterials => "study-materials",
    DoubtForum => "doubt-forum",
    DoubtDetail => "doubt-detail",
    AskDoubt => "ask-doubt",
    Attendance => "attendance",
    ProgressReport => "progress-report",
    FeePayment => "fee-payment",
    PaymentHistory => "payment-history",
    Leaderboard => "leaderboard",
    Achievements => "achievements",
    StudentCalendar => "student-calendar",
    CourseCatalog => "course-catalog",
    CourseDetail => "course-detail",
    EnrolledCourses => "enrolled-courses",

    // Teacher
    TeacherDashboard => "teacher-dashboard",
    TeacherClasses => "teacher-classes",
    ClassDetail => "class-detail",
    StartLiveClass => "start-live-class",
    CreateAssignment => "create-assignment",
    GradeAssignments => "grade-assignments",
    AssignmentSubmissions => "assignment-submissions",
    CreateTest => "create-test",
    TestAnalytics => "test-analytics",
    UploadMaterial => "upload-material",
    MarkAttendance => "mark-attendance",
    StudentRoster => "student-roster",
    StudentDetail => "student-detail",
    DoubtInbox => "doubt-inbox",
    AnswerDoubt => "answer-doubt",
    TeacherSchedule => "teacher-schedule",
    TeacherMessages => "teacher-messages",
    TeacherPayroll => "teacher-payroll",

    // Parent
    ParentDashboard => "parent-dashboard",
    ChildSelector => "child-selector",
    ChildProgress => "child-progress",
    ChildAttendance => "child-attendance",
    ChildAssignments => "child-assignments",
    ChildTestResults => "child-test-results",
    FeeStatus => "fee-status",
    ParentPayments => "parent-payments",
    TeacherMeetings => "teacher-meetings",
    ParentMessages => "parent-messages",
    ParentAnnouncements => "parent-announcements",

    // Admin
    AdminDashboard => "admin-dashboard",
    UserManagement => "user-management",
    UserDetail => "user-detail",
    CreateUser => "create-user",
    BatchManagement => "batch-management",
    BatchDetail => "batch-detail",
    CourseManagement => "course-management",
    TeacherManagement => "teacher-management",
    StudentManagement => "student-management",
    FeeManagement => "fee-management",
    FeeStructure => "fee-structure",
    RevenueAnalytics => "revenue-analytics",
    KpiDetail => "kpi-detail",
    Reports => "reports",
    Announcements => "announcements",
    CreateAnnouncement => "create-announcement",
    AdminSettings => "admin-settings",
    AuditLog => "audit-log",
    InstituteProfile => "institute-profile",
}

impl RouteId {
    /// The unauthenticated landing route
    pub const ROOT: RouteId = RouteId::Welcome;
}

impl Default for RouteId {
    fn default() -> Self {
        RouteId::ROOT
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RouteId {
    type Err = NavError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RouteId::parse(s).ok_or_else(|| NavError::UnknownRoute(s.to_string()))
    }
}

impl Serialize for RouteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for RouteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let id = String::deserialize(deserializer)?;
        RouteId::parse(&id).ok_or_else(|| serde::de::Error::custom(format!("unknown route '{}'", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_identifier_round_trips() {
        for route in RouteId::ALL {
            assert_eq!(RouteId::parse(route.as_str()), Some(*route));
        }
    }

    #[test]
    fn test_identifiers_are_unique() {
        let ids: HashSet<&str> = RouteId::ALL.iter().map(|r| r.as_str()).collect();
        assert_eq!(ids.len(), RouteId::ALL.len());
        assert!(RouteId::ALL.len() >= 80);
    }

    #[test]
    fn test_unknown_identifier() {
        assert_eq!(RouteId::parse("student-dashbord"), None);
        assert!(matches!(
            "nope".parse::<RouteId>(),
            Err(NavError::UnknownRoute(id)) if id == "nope"
        ));
    }

    #[test]
    fn test_serde_uses_identifier() {
        let json = serde_json::to_string(&RouteId::KpiDetail).unwrap();
        assert_eq!(json, "\"kpi-detail\"");
        let back: RouteId = serde_json::from_str("\"live-class\"").unwrap();
        assert_eq!(back, RouteId::LiveClass);
    }
}
