pub mod menu;
pub mod routes;
pub mod run;

pub use menu::menu_command;
pub use routes::routes_command;
pub use run::run_command;
