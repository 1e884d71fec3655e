use std::path::{Path, PathBuf};

use routebook_core::export::{render_customers_export, suggested_export_file_name};

use crate::cli::{ExportFormat, FilterArgs};
use crate::commands::common::{customer_filter, list_customers, AppContext};
use crate::error::CliError;

pub async fn run_export(
    filter: &FilterArgs,
    format: ExportFormat,
    output_path: Option<&Path>,
    to_stdout: bool,
    ctx: &AppContext,
) -> Result<(), CliError> {
    let customers = list_customers(&customer_filter(filter), ctx).await?;
    if customers.is_empty() {
        return Err(CliError::NothingToExport);
    }

    let rendered = render_customers_export(&customers, format.into())?;

    if to_stdout {
        println!("{rendered}");
        return Ok(());
    }

    let path = output_path.map_or_else(|| default_export_path(format), Path::to_path_buf);
    std::fs::write(&path, rendered)?;
    println!("{}", path.display());
    Ok(())
}

pub fn default_export_path(format: ExportFormat) -> PathBuf {
    PathBuf::from(suggested_export_file_name(
        format.into(),
        chrono::Local::now().date_naive(),
    ))
}
