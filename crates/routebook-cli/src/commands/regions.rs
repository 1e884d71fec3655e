use routebook_core::Region;

use crate::cli::RegionCommands;
use crate::commands::common::{finish, format_region_lines, resolve_region, AppContext};
use crate::error::CliError;

pub async fn run_regions(command: Option<RegionCommands>, ctx: &AppContext) -> Result<(), CliError> {
    let command = command.unwrap_or(RegionCommands::List { json: false });
    let service = ctx.open_service().await?;

    match command {
        RegionCommands::List { json } => {
            let regions = service.list_regions().await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&regions)?);
            } else if regions.is_empty() {
                println!("No regions found");
            } else {
                for line in format_region_lines(&regions) {
                    println!("{line}");
                }
            }
            return Ok(());
        }
        RegionCommands::Add { name } => {
            let region = service.create_region(&name).await?;
            print_region(&region);
        }
        RegionCommands::Delete { region } => {
            let region = resolve_region(&region, &service).await?;
            service.delete_region(&region.id).await?;
            println!("{}", region.id);
        }
        RegionCommands::AddSub { region, name } => {
            let region = resolve_region(&region, &service).await?;
            let updated = service.add_subregion(&region.id, &name).await?;
            print_region(&updated);
        }
        RegionCommands::RemoveSub { region, index } => {
            let region = resolve_region(&region, &service).await?;
            let updated = service.remove_subregion(&region.id, index).await?;
            print_region(&updated);
        }
    }

    finish(&service).await;
    Ok(())
}

fn print_region(region: &Region) {
    for line in format_region_lines(std::slice::from_ref(region)) {
        println!("{line}");
    }
}
