use crate::cli::FilterArgs;
use crate::commands::common::{
    customer_filter, customer_to_list_item, format_customer_lines, list_customers, AppContext,
    CustomerListItem,
};
use crate::error::CliError;

pub async fn run_list(filter: &FilterArgs, as_json: bool, ctx: &AppContext) -> Result<(), CliError> {
    let customers = list_customers(&customer_filter(filter), ctx).await?;

    if as_json {
        let json_items = customers
            .iter()
            .map(customer_to_list_item)
            .collect::<Vec<CustomerListItem>>();
        println!("{}", serde_json::to_string_pretty(&json_items)?);
    } else if customers.is_empty() {
        println!("No customers found");
    } else {
        for line in format_customer_lines(&customers) {
            println!("{line}");
        }
    }

    Ok(())
}
