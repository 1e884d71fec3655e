use crate::commands::common::{finish, normalize_customer_identifier, resolve_customer, AppContext};
use crate::error::CliError;

pub async fn run_delete(id: &str, ctx: &AppContext) -> Result<(), CliError> {
    let normalized_id = normalize_customer_identifier(id)?;
    let service = ctx.open_service().await?;
    let customer = resolve_customer(&normalized_id, &service).await?;

    service.delete_customer(&customer.id).await?;
    finish(&service).await;

    println!("{}", customer.id);
    Ok(())
}
