use anyhow::Result;
use log::info;

use crate::nav::compose_menu_for;

/// Print the drawer menu for `role`; unknown or missing roles get the student menu
pub fn menu_command(role: Option<&str>) -> Result<()> {
    info!("Composing menu for {:?}", role);
    let (items, _) = compose_menu_for(role);

    println!("{:<4} {:<24} {:<28} Route", "", "Id", "Title");
    println!("{}", "-".repeat(80));
    for item in &items {
        println!(
            "{:<4} {:<24} {:<28} {}",
            item.icon,
            item.id,
            item.title,
            item.target_route
        );
    }
    Ok(())
}
