//! External session provider contract and an in-memory implementation.

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::sync::watch;

use crate::session::{AuthError, Identity, Role};

/// What the provider currently reports
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionSnapshot {
    pub identity: Option<Identity>,
    pub loading: bool,
}

impl SessionSnapshot {
    pub fn signed_in(identity: Identity) -> Self {
        Self { identity: Some(identity), loading: false }
    }

    pub fn signed_out() -> Self {
        Self::default()
    }

    pub fn loading() -> Self {
        Self { identity: None, loading: true }
    }
}

/// The authentication service the shell consumes.
///
/// Identity changes are published through the watch channel and may happen at
/// any time, independent of calls made through this trait.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    fn snapshot(&self) -> SessionSnapshot;

    fn subscribe(&self) -> watch::Receiver<SessionSnapshot>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError>;

    async fn sign_out(&self) -> Result<(), AuthError>;
}

/// Credentials known to [`LocalSessionProvider`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Account {
    pub email: String,
    pub password: String,
    pub display_name: String,
    pub role: Role,
    #[serde(default)]
    pub disabled: bool,
}

impl Account {
    pub fn new(email: &str, password: &str, display_name: &str, role: Role) -> Self {
        Self {
            email: email.to_string(),
            password: password.to_string(),
            display_name: display_name.to_string(),
            role,
            disabled: false,
        }
    }

    fn identity(&self) -> Identity {
        let local = self.email.split('@').next().unwrap_or(&self.email);
        Identity {
            uid: format!("{}_{}", self.role, local.replace('.', "_")),
            email: Some(self.email.clone()),
            display_name: Some(self.display_name.clone()),
            role: Some(self.role),
            photo_url: None,
            email_verified: true,
            signed_in_at: Utc::now(),
        }
    }
}

/// In-memory provider with simulated latency
pub struct LocalSessionProvider {
    accounts: Vec<Account>,
    latency: Duration,
    offline: AtomicBool,
    tx: watch::Sender<SessionSnapshot>,
}

impl LocalSessionProvider {
    pub fn new(accounts: Vec<Account>, latency: Duration) -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot::default());
        Self {
            accounts,
            latency,
            offline: AtomicBool::new(false),
            tx,
        }
    }

    /// Make every provider call fail with a network error
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Drop the current identity out-of-band (token expiry, revoked session)
    pub fn expire(&self) {
        info!("Session expired");
        self.tx.send_replace(SessionSnapshot::signed_out());
    }

    /// Publish an arbitrary snapshot, as a remote provider would on its own schedule
    pub fn publish(&self, snapshot: SessionSnapshot) {
        self.tx.send_replace(snapshot);
    }

    fn check_online(&self) -> Result<(), AuthError> {
        if self.offline.load(Ordering::SeqCst) {
            Err(AuthError::Network("session provider unreachable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionProvider for LocalSessionProvider {
    fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.tx.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<(), AuthError> {
        debug!("Signing in {}", email);
        self.tx.send_modify(|s| s.loading = true);
        tokio::time::sleep(self.latency).await;

        let result = self.check_online().and_then(|_| {
            let account = self
                .accounts
                .iter()
                .find(|a| a.email.eq_ignore_ascii_case(email.trim()) && a.password == password)
                .ok_or(AuthError::InvalidCredentials)?;
            if account.disabled {
                return Err(AuthError::AccountDisabled(account.email.clone()));
            }
            Ok(account.identity())
        });

        match result {
            Ok(identity) => {
                info!("Provider signed in {}", email);
                self.tx.send_replace(SessionSnapshot::signed_in(identity));
                Ok(())
            }
            Err(e) => {
                warn!("Sign-in failed for {}: {}", email, e);
                self.tx.send_modify(|s| s.loading = false);
                Err(e)
            }
        }
    }

    async fn sign_out(&self) -> Result<(), AuthError> {
        if self.tx.borrow().identity.is_none() {
            return Err(AuthError::NotSignedIn);
        }
        tokio::time::sleep(self.latency).await;
        self.check_online()?;
        self.tx.send_replace(SessionSnapshot::signed_out());
        Ok(())
    }
}
