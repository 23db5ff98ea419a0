/// Failures reported by the session provider.
///
/// The `Display` text is shown to the user as-is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Account {0} is disabled, contact your institute administrator")]
    AccountDisabled(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("No user is signed in")]
    NotSignedIn,
}

/// A role name that is not one of the four institute roles
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown role '{0}'")]
pub struct UnknownRole(pub String);
