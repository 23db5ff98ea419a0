use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::session::Role;

#[derive(Parser)]
#[command(name = "campus-shell")]
#[command(about = "Navigation shell for the coaching institute app")]
pub struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Route to start on, overriding the config
    #[arg(long, global = true)]
    pub initial_route: Option<String>,

    /// Start signed in as a demo user of this role
    #[arg(long, global = true)]
    pub as_role: Option<Role>,

    /// Log file, overriding the config
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive shell (default)
    Run,
    /// Print the route table
    Routes,
    /// Print the drawer menu composed for a role
    Menu {
        /// student, teacher, parent or admin; anything else falls back to student
        role: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_command_is_none() {
        let cli = Cli::parse_from(["campus-shell"]);
        assert!(cli.command.is_none());
        assert!(cli.as_role.is_none());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::parse_from(["campus-shell", "run", "--as-role", "Teacher", "--initial-route", "reports"]);
        assert!(matches!(cli.command, Some(Commands::Run)));
        assert_eq!(cli.as_role, Some(Role::Teacher));
        assert_eq!(cli.initial_route.as_deref(), Some("reports"));
    }

    #[test]
    fn test_menu_role_optional() {
        let cli = Cli::parse_from(["campus-shell", "menu", "parent"]);
        match cli.command {
            Some(Commands::Menu { role }) => assert_eq!(role.as_deref(), Some("parent")),
            _ => panic!("expected menu"),
        }
    }
}
