use anyhow::Result;
use log::info;
use std::sync::Arc;

use crate::config::ShellConfig;
use crate::nav::ROUTES;
use crate::session::LocalSessionProvider;
use crate::shell::Shell;
use crate::tui::{self, ShellApp, Theme};

/// Launch the interactive shell
pub async fn run_command(config: &ShellConfig) -> Result<()> {
    let options = config.to_options()?;
    info!(
        "Starting shell at {} ({} accounts, initial user: {:?})",
        options.initial_route,
        config.session.accounts.len(),
        options.initial_user.as_ref().map(|u| u.role)
    );

    ROUTES.validate()?;

    let provider = Arc::new(LocalSessionProvider::new(
        config.session.accounts.clone(),
        config.session_latency(),
    ));
    let shell = Shell::new(options, provider);
    let mut app = ShellApp::new(shell, Theme::new(config.theme), config.login.clone());

    tui::launch(&mut app).await
}
