use std::path::Path;

use routebook_core::import::parse_customers_csv;

use crate::commands::common::{finish, AppContext};
use crate::error::CliError;

pub async fn run_import(path: &Path, ctx: &AppContext) -> Result<usize, CliError> {
    let text = std::fs::read_to_string(path)?;
    let customers = parse_customers_csv(&text);
    if customers.is_empty() {
        return Err(CliError::EmptyImport(path.display().to_string()));
    }

    let service = ctx.open_service().await?;
    let imported = service.bulk_import_customers(&customers).await?;
    finish(&service).await;

    println!("Imported {imported} customer(s) from {}", path.display());
    Ok(imported)
}
