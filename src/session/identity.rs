//! Users, roles and the external identity they are derived from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::nav::RouteId;
use crate::session::UnknownRole;

/// The four roles the institute front-end serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Student,
    Teacher,
    Parent,
    Admin,
}

impl Role {
    pub const ALL: [Role; 4] = [Role::Student, Role::Teacher, Role::Parent, Role::Admin];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Teacher => "teacher",
            Role::Parent => "parent",
            Role::Admin => "admin",
        }
    }

    /// The `<role>-dashboard` route a freshly signed-in user lands on
    pub fn dashboard_route(&self) -> RouteId {
        match self {
            Role::Student => RouteId::StudentDashboard,
            Role::Teacher => RouteId::TeacherDashboard,
            Role::Parent => RouteId::ParentDashboard,
            Role::Admin => RouteId::AdminDashboard,
        }
    }

    /// Display label used in headers and menus
    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Teacher => "Teacher",
            Role::Parent => "Parent",
            Role::Admin => "Admin",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "student" => Ok(Role::Student),
            "teacher" => Ok(Role::Teacher),
            "parent" => Ok(Role::Parent),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole(s.trim().to_string())),
        }
    }
}

/// A signed-in user as the navigation store sees it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub is_verified: bool,
}

impl User {
    /// Build a local user for the bypass sign-in path (no session provider behind it)
    pub fn bypass(role: Role) -> Self {
        Self {
            id: format!("{}_{}", role.as_str(), uuid::Uuid::new_v4().simple()),
            first_name: "Demo".to_string(),
            last_name: role.label().to_string(),
            email: format!("demo.{}@campus.local", role.as_str()),
            role,
            avatar: None,
            is_verified: false,
        }
    }

    pub fn full_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Derive a user from an external identity.
    ///
    /// Role falls back to Student when the identity carries none. The first name is
    /// the first word of the display name, then the email local part, then "User";
    /// the last name is the remainder of the display name or empty.
    pub fn from_identity(identity: &Identity) -> Self {
        let mut words = identity
            .display_name
            .as_deref()
            .unwrap_or("")
            .split_whitespace();

        let first_name = words
            .next()
            .map(str::to_string)
            .or_else(|| {
                identity
                    .email
                    .as_deref()
                    .and_then(|email| email.split('@').next())
                    .filter(|local| !local.is_empty())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| "User".to_string());
        let last_name = words.collect::<Vec<_>>().join(" ");

        Self {
            id: identity.uid.clone(),
            first_name,
            last_name,
            email: identity.email.clone().unwrap_or_default(),
            role: identity.role.unwrap_or(Role::Student),
            avatar: identity.photo_url.clone(),
            is_verified: identity.email_verified,
        }
    }
}

/// Identity as reported by the external session provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub uid: String,
    pub email: Option<String>,
    pub display_name: Option<String>,
    pub role: Option<Role>,
    pub photo_url: Option<String>,
    pub email_verified: bool,
    pub signed_in_at: DateTime<Utc>,
}

impl Identity {
    pub fn new(uid: impl Into<String>) -> Self {
        Self {
            uid: uid.into(),
            email: None,
            display_name: None,
            role: None,
            photo_url: None,
            email_verified: false,
            signed_in_at: Utc::now(),
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }
}
