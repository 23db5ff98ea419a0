use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::nav::{DrawerTiming, RouteId};
use crate::session::{Account, Role, User};
use crate::shell::ShellOptions;
use crate::tui::theme::ThemeVariant;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub initial_route: String,
    /// Start mid-session as a bypass user of this role
    pub initial_role: Option<Role>,
    pub theme: ThemeVariant,
    pub log_file: String,
    pub drawer: DrawerConfig,
    pub session: SessionConfig,
    pub login: LoginConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            initial_route: RouteId::ROOT.as_str().to_string(),
            initial_role: None,
            theme: ThemeVariant::default(),
            log_file: "campus-shell.log".to_string(),
            drawer: DrawerConfig::default(),
            session: SessionConfig::default(),
            login: LoginConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawerConfig {
    pub open_ms: u64,
    pub close_ms: u64,
    pub overlay_opacity: f32,
}

impl Default for DrawerConfig {
    fn default() -> Self {
        Self {
            open_ms: 280,
            close_ms: 220,
            overlay_opacity: 0.5,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Simulated provider round-trip
    pub latency_ms: u64,
    /// Credentials known to the local session provider
    pub accounts: Vec<Account>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            latency_ms: 400,
            accounts: Role::ALL.iter().map(|role| demo_account(*role)).collect(),
        }
    }
}

fn demo_account(role: Role) -> Account {
    Account::new(
        &format!("{}@campus.local", role.as_str()),
        &format!("{}123", role.as_str()),
        &format!("Demo {}", role.label()),
        role,
    )
}

/// Credentials the login screen submits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginConfig {
    pub email: String,
    pub password: String,
}

impl Default for LoginConfig {
    fn default() -> Self {
        let demo = demo_account(Role::Student);
        Self {
            email: demo.email,
            password: demo.password,
        }
    }
}

impl ShellConfig {
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join("campus-shell")
        } else {
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(".campus-shell")
        };

        Ok(config_dir.join("config.toml"))
    }

    /// Load from `path`, or the default location when `None`. A missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(path) => path.to_path_buf(),
            None => Self::get_config_path()?,
        };
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("No config file at {:?}, using defaults", config_path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: ShellConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!("Loaded config with {} accounts", config.session.accounts.len());
        Ok(config)
    }

    pub fn initial_route(&self) -> Result<RouteId> {
        self.initial_route
            .parse::<RouteId>()
            .with_context(|| format!("Invalid initial_route '{}'", self.initial_route))
    }

    pub fn drawer_timing(&self) -> DrawerTiming {
        DrawerTiming {
            open: Duration::from_millis(self.drawer.open_ms),
            close: Duration::from_millis(self.drawer.close_ms),
            overlay_opacity: self.drawer.overlay_opacity.clamp(0.0, 1.0),
        }
    }

    pub fn session_latency(&self) -> Duration {
        Duration::from_millis(self.session.latency_ms)
    }

    pub fn to_options(&self) -> Result<ShellOptions> {
        Ok(ShellOptions {
            initial_route: self.initial_route()?,
            initial_user: self.initial_role.map(User::bypass),
            drawer: self.drawer_timing(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ShellConfig::default();
        let options = config.to_options().unwrap();
        assert_eq!(options.initial_route, RouteId::Welcome);
        assert!(options.initial_user.is_none());
        assert_eq!(options.drawer.open, Duration::from_millis(280));
        assert_eq!(options.drawer.close, Duration::from_millis(220));
        assert_eq!(config.session.accounts.len(), 4);
    }

    #[test]
    fn test_partial_toml() {
        let config: ShellConfig = toml::from_str(
            r#"
            initial_route = "login"
            initial_role = "teacher"
            theme = "latte"

            [drawer]
            open_ms = 100

            [[session.accounts]]
            email = "x@campus.test"
            password = "pw"
            display_name = "X Y"
            role = "parent"
            disabled = true
            "#,
        )
        .unwrap();

        let options = config.to_options().unwrap();
        assert_eq!(options.initial_route, RouteId::Login);
        assert_eq!(options.initial_user.unwrap().role, Role::Teacher);
        assert_eq!(options.drawer.open, Duration::from_millis(100));
        assert_eq!(options.drawer.close, Duration::from_millis(220));
        assert_eq!(config.theme, ThemeVariant::Latte);

        let accounts = &config.session.accounts;
        assert_eq!(accounts.len(), 1);
        assert!(accounts[0].disabled);
    }

    #[test]
    fn test_unknown_initial_route_rejected() {
        let config = ShellConfig {
            initial_route: "dashboard".to_string(),
            ..ShellConfig::default()
        };
        assert!(config.to_options().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("campus-shell-does-not-exist.toml");
        let config = ShellConfig::load(Some(&path)).unwrap();
        assert_eq!(config.initial_route, "welcome");
    }
}
