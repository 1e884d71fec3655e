use std::env;
use std::path::PathBuf;
use std::time::Duration;

use routebook_core::search::CustomerFilter;
use routebook_core::{Customer, CustomerId, DataService, Region, RegionId, RemoteConfig, VisitStatus};
use serde::Serialize;

use crate::cli::{CustomerFields, FilterArgs};
use crate::config_profiles::{normalize_text_option, CliProfilesConfig};
use crate::error::CliError;

/// How long a command waits for remote mirror writes before exiting
pub const MIRROR_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Where a command reads and writes its data
#[derive(Debug, Clone)]
pub struct AppContext {
    pub db_path: PathBuf,
    pub remote: RemoteConfig,
}

impl AppContext {
    /// Local-only context, used by tests and when no remote is configured
    pub fn local(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
            remote: RemoteConfig::default(),
        }
    }

    pub async fn open_service(&self) -> Result<DataService, CliError> {
        Ok(DataService::open_path(self.db_path.clone(), &self.remote).await?)
    }
}

#[derive(Debug, Serialize)]
pub struct CustomerListItem {
    pub id: String,
    pub shop_name: String,
    pub manager_name: String,
    pub phone: String,
    pub main_region: String,
    pub sub_region: String,
    pub whatsapp_link: String,
    pub map_link: String,
    pub visit_status: String,
    pub created_at: i64,
    pub created_at_iso: String,
}

/// Let pending mirror writes finish so the process can exit
pub async fn finish(service: &DataService) {
    let pending = service.drain_mirrors(MIRROR_DRAIN_TIMEOUT).await;
    if pending > 0 {
        tracing::debug!("Waited for {pending} remote mirror write(s)");
    }
}

pub async fn list_customers(
    filter: &CustomerFilter,
    ctx: &AppContext,
) -> Result<Vec<Customer>, CliError> {
    let service = ctx.open_service().await?;
    Ok(filter.apply(service.list_customers().await?))
}

pub fn customer_filter(args: &FilterArgs) -> CustomerFilter {
    CustomerFilter {
        main_region: normalize_text_option(args.region.clone()),
        sub_region: normalize_text_option(args.sub_region.clone()),
        status: args.status.map(VisitStatus::from),
        query: normalize_text_option(args.query.clone()),
    }
}

pub async fn resolve_customer(query: &str, service: &DataService) -> Result<Customer, CliError> {
    if let Ok(id) = query.parse::<CustomerId>() {
        if let Some(customer) = service.get_customer(&id).await? {
            return Ok(customer);
        }
    }

    let mut matching = service
        .list_customers()
        .await?
        .into_iter()
        .filter(|customer| customer.id.as_str().starts_with(query))
        .collect::<Vec<_>>();

    match matching.len() {
        0 => Err(CliError::CustomerNotFound(query.to_string())),
        1 => Ok(matching.remove(0)),
        _ => {
            let options = matching
                .iter()
                .take(3)
                .map(|customer| short_id(customer.id.as_str()))
                .collect::<Vec<_>>()
                .join(", ");

            Err(CliError::AmbiguousCustomerId(format!(
                "ID prefix '{query}' is ambiguous; matches: {options}"
            )))
        }
    }
}

/// Find a region by id, falling back to an exact name match
pub async fn resolve_region(query: &str, service: &DataService) -> Result<Region, CliError> {
    let query = query.trim();
    if let Ok(id) = query.parse::<RegionId>() {
        if let Some(region) = service.get_region(&id).await? {
            return Ok(region);
        }
    }

    service
        .list_regions()
        .await?
        .into_iter()
        .find(|region| region.name == query)
        .ok_or_else(|| CliError::RegionNotFound(query.to_string()))
}

pub fn normalize_customer_identifier(id: &str) -> Result<String, CliError> {
    let trimmed = id.trim();
    if trimmed.is_empty() {
        Err(CliError::EmptyCustomerId)
    } else {
        Ok(trimmed.to_string())
    }
}

/// Apply the flags that were passed; returns whether anything changed.
///
/// An explicit WhatsApp link wins over the one derived from a new phone.
pub fn apply_customer_fields(customer: &mut Customer, fields: &CustomerFields) -> bool {
    let before = customer.clone();

    if let Some(shop) = &fields.shop {
        customer.shop_name = shop.trim().to_string();
    }
    if let Some(manager) = &fields.manager {
        customer.manager_name = manager.trim().to_string();
    }
    if let Some(region) = &fields.region {
        customer.main_region = region.trim().to_string();
    }
    if let Some(sub_region) = &fields.sub_region {
        customer.sub_region = sub_region.trim().to_string();
    }
    if let Some(map_link) = &fields.map_link {
        customer.map_link = map_link.trim().to_string();
    }
    if let Some(phone) = &fields.phone {
        let phone = phone.trim();
        if phone != customer.phone {
            customer.set_phone(phone);
        }
    }
    if let Some(whatsapp_link) = &fields.whatsapp_link {
        customer.whatsapp_link = whatsapp_link.trim().to_string();
    }

    *customer != before
}

pub const fn has_customer_fields(fields: &CustomerFields) -> bool {
    fields.shop.is_some()
        || fields.manager.is_some()
        || fields.phone.is_some()
        || fields.region.is_some()
        || fields.sub_region.is_some()
        || fields.whatsapp_link.is_some()
        || fields.map_link.is_some()
}

pub fn short_id(id: &str) -> String {
    id.chars().take(13).collect()
}

pub fn format_customer_lines(customers: &[Customer]) -> Vec<String> {
    customers
        .iter()
        .map(|customer| {
            let shop = truncate(&customer.shop_name, 28);
            let location = format_location(customer);
            format!(
                "{:<13}  {:<8}  {shop:<28}  {:<16}  {location}",
                short_id(customer.id.as_str()),
                customer.visit_status.label(),
                customer.phone,
            )
        })
        .collect()
}

pub fn customer_to_list_item(customer: &Customer) -> CustomerListItem {
    CustomerListItem {
        id: customer.id.to_string(),
        shop_name: customer.shop_name.clone(),
        manager_name: customer.manager_name.clone(),
        phone: customer.phone.clone(),
        main_region: customer.main_region.clone(),
        sub_region: customer.sub_region.clone(),
        whatsapp_link: customer.whatsapp_link.clone(),
        map_link: customer.map_link.clone(),
        visit_status: customer.visit_status.label().to_string(),
        created_at: customer.created_at,
        created_at_iso: format_timestamp(customer.created_at),
    }
}

pub fn format_region_lines(regions: &[Region]) -> Vec<String> {
    let mut lines = Vec::new();
    for region in regions {
        lines.push(format!(
            "{:<13}  {} ({} sub-regions)",
            short_id(region.id.as_str()),
            region.name,
            region.subregions.len()
        ));
        for (index, name) in region.subregions.iter().enumerate() {
            lines.push(format!("    [{index}] {name}"));
        }
    }
    lines
}

pub fn format_location(customer: &Customer) -> String {
    match (customer.main_region.is_empty(), customer.sub_region.is_empty()) {
        (true, true) => "-".to_string(),
        (false, true) => customer.main_region.clone(),
        (true, false) => customer.sub_region.clone(),
        (false, false) => format!("{} / {}", customer.main_region, customer.sub_region),
    }
}

pub fn truncate(text: &str, max_chars: usize) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() <= max_chars {
        collapsed
    } else {
        let take_len = max_chars.saturating_sub(3);
        let mut truncated = collapsed.chars().take(take_len).collect::<String>();
        truncated.push_str("...");
        truncated
    }
}

pub fn format_timestamp(timestamp_ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(timestamp_ms).map_or_else(
        || timestamp_ms.to_string(),
        |date_time| date_time.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
    )
}

/// Resolve the database path and remote settings for a data command
pub fn app_context(
    cli_db_path: Option<PathBuf>,
    profile: Option<&str>,
) -> Result<AppContext, CliError> {
    Ok(AppContext {
        db_path: resolve_db_path(cli_db_path)?,
        remote: resolve_remote_config(profile)?,
    })
}

/// Remote settings: environment variables first, then the selected profile
pub fn resolve_remote_config(profile: Option<&str>) -> Result<RemoteConfig, CliError> {
    let config = CliProfilesConfig::load().map_err(CliError::Config)?;
    let profile_name = config.resolve_profile_name(profile);
    let from_profile = config
        .profile(&profile_name)
        .map(|profile| profile.remote_config())
        .unwrap_or_default();

    let remote = RemoteConfig::from_env().or(from_profile);
    if remote.is_configured() {
        tracing::debug!("Remote mirror configured via profile '{profile_name}' or environment");
    }
    Ok(remote)
}

pub fn resolve_db_path(cli_db_path: Option<PathBuf>) -> Result<PathBuf, CliError> {
    if let Some(path) = cli_db_path.or_else(|| env::var_os("ROUTEBOOK_DB_PATH").map(PathBuf::from)) {
        return Ok(path);
    }
    default_db_path()
}

pub fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|dir| dir.join("routebook").join("routebook.db"))
        .ok_or_else(|| CliError::Config("Failed to resolve CLI data directory".to_string()))
}
