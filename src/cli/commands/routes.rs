use anyhow::Result;
use log::info;

use crate::nav::{ROUTES, RouteId};

/// Print every route with its screen component and offered actions
pub fn routes_command() -> Result<()> {
    info!("Listing route table");
    ROUTES.validate()?;

    println!("{:<24} {:<28} {:<10} Actions", "Route", "Component", "Kind");
    println!("{}", "-".repeat(90));

    for route in RouteId::ALL {
        let descriptor = ROUTES.resolve(route.as_str(), &Default::default());
        let kind = format!("{:?}", descriptor.kind);
        println!(
            "{:<24} {:<28} {:<10} {}",
            route.as_str(),
            descriptor.component,
            kind,
            descriptor.actions.join(", ")
        );
    }

    println!();
    println!("{} routes", ROUTES.len());
    Ok(())
}
