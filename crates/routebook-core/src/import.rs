//! Spreadsheet import.
//!
//! Columns are positional: main region, sub-region, shop name, manager name,
//! phone, WhatsApp link, map link, status. Fields are split on a bare comma,
//! so quoted commas are not supported.

use crate::models::{Customer, VisitStatus};

/// Tokens that mark the first line as a header row
const HEADER_TOKENS: [&str; 2] = ["manager_name", "اسم المحل"];

/// Rows with fewer columns than this are dropped
const MIN_COLUMNS: usize = 3;

/// Shop name used when the column is blank
const UNKNOWN_SHOP: &str = "Unknown";

/// Parse CSV text into new customers, each with a fresh id.
#[must_use]
pub fn parse_customers_csv(text: &str) -> Vec<Customer> {
    let text = text.strip_prefix(crate::export::UTF8_BOM).unwrap_or(text);
    let mut lines = text
        .split('\n')
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .peekable();

    if lines
        .peek()
        .is_some_and(|first| HEADER_TOKENS.iter().any(|token| first.contains(token)))
    {
        lines.next();
    }

    let mut skipped = 0usize;
    let customers = lines
        .filter_map(|line| {
            let row = parse_row(line);
            if row.is_none() {
                skipped += 1;
            }
            row
        })
        .collect::<Vec<_>>();

    if skipped > 0 {
        tracing::debug!("Skipped {skipped} CSV line(s) with fewer than {MIN_COLUMNS} columns");
    }
    customers
}

fn parse_row(line: &str) -> Option<Customer> {
    let columns = line.split(',').map(unquote).collect::<Vec<_>>();
    if columns.len() < MIN_COLUMNS {
        return None;
    }
    let column = |index: usize| columns.get(index).copied().unwrap_or_default().to_string();

    let shop_name = match column(2) {
        name if name.is_empty() => UNKNOWN_SHOP.to_string(),
        name => name,
    };

    Some(Customer {
        main_region: column(0),
        sub_region: column(1),
        manager_name: column(3),
        whatsapp_link: column(5),
        map_link: column(6),
        visit_status: VisitStatus::classify(&column(7)),
        phone: column(4),
        ..Customer::new(shop_name, "")
    })
}

/// Trim a field and drop one pair of wrapping double quotes
fn unquote(field: &str) -> &str {
    let field = field.trim();
    field
        .strip_prefix('"')
        .and_then(|inner| inner.strip_suffix('"'))
        .unwrap_or(field)
}
