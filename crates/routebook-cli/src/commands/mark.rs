use routebook_core::VisitStatus;

use crate::cli::StatusArg;
use crate::commands::common::{finish, normalize_customer_identifier, resolve_customer, AppContext};
use crate::error::CliError;

pub async fn run_mark(id: &str, status: StatusArg, ctx: &AppContext) -> Result<(), CliError> {
    let normalized_id = normalize_customer_identifier(id)?;
    let service = ctx.open_service().await?;
    let mut customer = resolve_customer(&normalized_id, &service).await?;

    let status = VisitStatus::from(status);
    if customer.visit_status != status {
        customer.visit_status = status;
        service.save_customer(&customer).await?;
        finish(&service).await;
    }

    println!("{}  {}", customer.id, status.label());
    Ok(())
}
