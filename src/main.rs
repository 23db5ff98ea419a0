use anyhow::Result;
use clap::Parser;
use log::info;

use campus_shell::cli::commands::{menu_command, routes_command, run_command};
use campus_shell::cli::{Cli, Commands, open_log_file};
use campus_shell::config::ShellConfig;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ShellConfig::load(cli.config.as_deref())?;
    if let Some(route) = &cli.initial_route {
        config.initial_route = route.clone();
    }
    if let Some(role) = cli.as_role {
        config.initial_role = Some(role);
    }
    let log_path = match &cli.log_file {
        Some(path) => path.clone(),
        None => config.log_file.clone().into(),
    };

    // The TUI owns the terminal, so log to a file (truncated on each run)
    let log_file = open_log_file(&log_path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    info!("Starting campus-shell");

    match cli.command {
        Some(Commands::Run) | None => run_command(&config).await,
        Some(Commands::Routes) => routes_command(),
        Some(Commands::Menu { role }) => menu_command(role.as_deref()),
    }
}
