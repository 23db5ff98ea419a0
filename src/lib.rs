//! Navigation and session-sync core for a multi-role coaching institute app.
//!
//! [`shell::Shell`] owns the navigation store and applies every change from one
//! ordered event queue. [`nav`] holds the route space and the pure state
//! machines, [`session`] the identity provider and the sync rule.

pub mod cli;
pub mod config;
pub mod nav;
pub mod session;
pub mod shell;
pub mod tui;
