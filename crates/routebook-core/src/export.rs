//! Customer export helpers shared by all clients.

use serde::{Deserialize, Serialize};

use crate::models::Customer;

/// Header row of the spreadsheet export
pub const CSV_HEADER: [&str; 8] = [
    "المنطقة",
    "المنطقة الفرعية",
    "اسم المحل",
    "المدير",
    "الهاتف",
    "رابط الواتساب",
    "رابط الخريطة",
    "الحالة",
];

/// Byte order mark so spreadsheet apps detect UTF-8
pub const UTF8_BOM: char = '\u{feff}';

/// Export output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

/// Render customers as a spreadsheet-friendly CSV document.
///
/// Every field is wrapped in double quotes. Embedded quotes are not escaped.
#[must_use]
pub fn render_customers_csv(customers: &[Customer]) -> String {
    let mut lines = Vec::with_capacity(customers.len() + 1);
    lines.push(CSV_HEADER.join(","));

    for customer in customers {
        let fields = [
            customer.main_region.as_str(),
            customer.sub_region.as_str(),
            customer.shop_name.as_str(),
            customer.manager_name.as_str(),
            customer.phone.as_str(),
            customer.whatsapp_link.as_str(),
            customer.map_link.as_str(),
            customer.visit_status.label(),
        ];
        lines.push(
            fields
                .iter()
                .map(|field| format!("\"{field}\""))
                .collect::<Vec<_>>()
                .join(","),
        );
    }

    format!("{UTF8_BOM}{}", lines.join("\n"))
}

/// Render customers as pretty-printed JSON.
pub fn render_customers_json(customers: &[Customer]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(customers)
}

/// Render customers based on selected export format.
pub fn render_customers_export(
    customers: &[Customer],
    format: ExportFormat,
) -> serde_json::Result<String> {
    match format {
        ExportFormat::Csv => Ok(render_customers_csv(customers)),
        ExportFormat::Json => render_customers_json(customers),
    }
}

/// Default export file name for the given day, e.g. `customers_export_2024-05-01.csv`.
#[must_use]
pub fn suggested_export_file_name(format: ExportFormat, date: chrono::NaiveDate) -> String {
    format!(
        "customers_export_{}.{}",
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VisitStatus;
    use pretty_assertions::assert_eq;

    #[test]
    fn csv_has_bom_header_and_quoted_rows() {
        let customer = Customer {
            manager_name: "Ahmed".to_string(),
            main_region: "دهوك".to_string(),
            sub_region: "مالطا".to_string(),
            map_link: "https://maps.example/x".to_string(),
            visit_status: VisitStatus::Done,
            ..Customer::new("Blue Shop", "0750")
        };

        let rendered = render_customers_csv(&[customer]);

        assert_eq!(
            rendered,
            "\u{feff}المنطقة,المنطقة الفرعية,اسم المحل,المدير,الهاتف,رابط الواتساب,رابط الخريطة,الحالة\n\
             \"دهوك\",\"مالطا\",\"Blue Shop\",\"Ahmed\",\"0750\",\"https://wa.me/0750\",\"https://maps.example/x\",\"تمت\""
        );
    }

    #[test]
    fn empty_export_is_header_only() {
        let rendered = render_customers_csv(&[]);
        assert!(rendered.starts_with(UTF8_BOM));
        assert_eq!(rendered.lines().count(), 1);
    }

    #[test]
    fn json_export_uses_camel_case() {
        let rendered = render_customers_json(&[Customer::new("Shop", "1")]).unwrap();
        assert!(rendered.contains("\"shopName\": \"Shop\""));
        assert!(rendered.contains("\"visitStatus\": \"لم تتم\""));
    }

    #[test]
    fn suggested_export_file_name_uses_date_and_extension() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
        assert_eq!(
            suggested_export_file_name(ExportFormat::Csv, date),
            "customers_export_2024-05-01.csv"
        );
        assert_eq!(
            suggested_export_file_name(ExportFormat::Json, date),
            "customers_export_2024-05-01.json"
        );
    }
}
