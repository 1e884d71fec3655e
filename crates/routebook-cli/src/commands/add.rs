use routebook_core::{Customer, VisitStatus};

use crate::cli::{CustomerFields, StatusArg};
use crate::commands::common::{apply_customer_fields, finish, AppContext};
use crate::error::CliError;

pub async fn run_add(
    fields: &CustomerFields,
    status: Option<StatusArg>,
    ctx: &AppContext,
) -> Result<(), CliError> {
    let customer = build_customer(fields, status)?;

    let service = ctx.open_service().await?;
    service.save_customer(&customer).await?;
    finish(&service).await;

    println!("{}", customer.id);
    Ok(())
}

pub fn build_customer(
    fields: &CustomerFields,
    status: Option<StatusArg>,
) -> Result<Customer, CliError> {
    let mut customer = Customer::new("", "");
    customer.whatsapp_link.clear();
    apply_customer_fields(&mut customer, fields);
    customer.visit_status = status.map_or(VisitStatus::NotDone, VisitStatus::from);

    customer.validate()?;
    Ok(customer)
}
