use crate::cli::CustomerFields;
use crate::commands::common::{
    apply_customer_fields, finish, has_customer_fields, normalize_customer_identifier,
    resolve_customer, AppContext,
};
use crate::error::CliError;

pub async fn run_edit(id: &str, fields: &CustomerFields, ctx: &AppContext) -> Result<(), CliError> {
    let normalized_id = normalize_customer_identifier(id)?;
    if !has_customer_fields(fields) {
        return Err(CliError::NothingToEdit);
    }

    let service = ctx.open_service().await?;
    let mut customer = resolve_customer(&normalized_id, &service).await?;

    if !apply_customer_fields(&mut customer, fields) {
        println!("{}", customer.id);
        return Ok(());
    }

    customer.validate()?;
    service.save_customer(&customer).await?;
    finish(&service).await;

    println!("{}", customer.id);
    Ok(())
}
