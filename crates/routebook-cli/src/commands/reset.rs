use crate::commands::common::{finish, AppContext};
use crate::error::CliError;

pub async fn run_reset(confirmed: bool, ctx: &AppContext) -> Result<(), CliError> {
    if !confirmed {
        return Err(CliError::ConfirmationRequired);
    }

    let service = ctx.open_service().await?;
    let touched = service.reset_all_visit_status().await?;
    finish(&service).await;

    println!("Reset visit status for {touched} customer(s)");
    Ok(())
}
