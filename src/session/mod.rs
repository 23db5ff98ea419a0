pub mod error;
pub mod identity;
pub mod provider;
pub mod sync;

pub use error::{AuthError, UnknownRole};
pub use identity::{Identity, Role, User};
pub use provider::{Account, LocalSessionProvider, SessionProvider, SessionSnapshot};
pub use sync::{SessionSynchronizer, SyncKind, SyncReaction};
