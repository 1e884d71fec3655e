//! PostgREST client for a hosted Supabase project.

use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::{CustomerRow, RegionRow, RemoteError, RemoteResult, RemoteStore};
use crate::config::RemoteConfig;
use crate::models::{Customer, CustomerId, Region, RegionId, VisitStatus};
use crate::util::{compact_text, normalize_text_option};

const CUSTOMERS_TABLE: &str = "customers";
const REGIONS_TABLE: &str = "regions";

/// Filter that matches every row; PostgREST refuses unfiltered bulk updates
const ALL_ROWS_FILTER: &str = "neq.00000000-0000-0000-0000-000000000000";

const UPSERT_PREFERENCE: &str = "resolution=merge-duplicates,return=minimal";

#[derive(Clone)]
pub struct SupabaseRemote {
    rest_url: String,
    anon_key: String,
    client: Client,
}

impl SupabaseRemote {
    /// Build a client from a configuration.
    ///
    /// Returns `Ok(None)` when the configuration is incomplete, which means
    /// local-only mode.
    pub fn from_config(config: &RemoteConfig) -> RemoteResult<Option<Self>> {
        if !config.is_configured() {
            return Ok(None);
        }

        let rest_url = config.rest_url().ok_or_else(|| {
            RemoteError::InvalidConfiguration(
                "project URL must include http:// or https://".to_string(),
            )
        })?;
        let anon_key = normalize_text_option(config.anon_key.clone()).ok_or_else(|| {
            RemoteError::InvalidConfiguration("anon key must not be empty".to_string())
        })?;

        Ok(Some(Self {
            rest_url,
            anon_key,
            client: Client::builder().build()?,
        }))
    }

    pub fn rest_url(&self) -> &str {
        &self.rest_url
    }

    fn request(&self, method: Method, table: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}/{table}", self.rest_url))
            .header("apikey", &self.anon_key)
            .bearer_auth(&self.anon_key)
            .header("Accept", "application/json")
    }

    async fn send(request: RequestBuilder) -> RemoteResult<Response> {
        let response = request.send().await?;
        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(RemoteError::Api(parse_api_error(status, &body)));
        }
        Ok(response)
    }
}

impl SupabaseRemote {
    fn fetch_customers_request(&self) -> RequestBuilder {
        self.request(Method::GET, CUSTOMERS_TABLE)
            .query(&[("select", "*"), ("order", "created_at.desc")])
    }

    fn upsert_customers_request(&self, customers: &[Customer]) -> RequestBuilder {
        let rows = customers.iter().map(CustomerRow::from).collect::<Vec<_>>();
        self.request(Method::POST, CUSTOMERS_TABLE)
            .header("Prefer", UPSERT_PREFERENCE)
            .json(&rows)
    }

    fn delete_request(&self, table: &str, id: &str) -> RequestBuilder {
        self.request(Method::DELETE, table)
            .query(&[("id", format!("eq.{id}"))])
    }

    fn reset_visit_status_request(&self) -> RequestBuilder {
        let payload = serde_json::json!({
            "visit_status": VisitStatus::NotDone.label(),
        });
        self.request(Method::PATCH, CUSTOMERS_TABLE)
            .query(&[("id", ALL_ROWS_FILTER)])
            .header("Prefer", "return=minimal")
            .json(&payload)
    }

    fn fetch_regions_request(&self) -> RequestBuilder {
        self.request(Method::GET, REGIONS_TABLE)
            .query(&[("select", "*"), ("order", "name.asc")])
    }

    fn upsert_region_request(&self, region: &Region) -> RequestBuilder {
        self.request(Method::POST, REGIONS_TABLE)
            .header("Prefer", UPSERT_PREFERENCE)
            .json(&RegionRow::from(region))
    }
}

impl RemoteStore for SupabaseRemote {
    async fn fetch_customers(&self) -> RemoteResult<Vec<Customer>> {
        tracing::debug!("Fetching customers from {}", self.rest_url);
        let response = Self::send(self.fetch_customers_request()).await?;
        let rows = response.json::<Vec<CustomerRow>>().await?;
        Ok(rows.into_iter().filter_map(CustomerRow::into_customer).collect())
    }

    async fn upsert_customers(&self, customers: Vec<Customer>) -> RemoteResult<()> {
        tracing::debug!("Upserting {} customer row(s)", customers.len());
        Self::send(self.upsert_customers_request(&customers)).await?;
        Ok(())
    }

    async fn delete_customer(&self, id: CustomerId) -> RemoteResult<()> {
        Self::send(self.delete_request(CUSTOMERS_TABLE, id.as_str())).await?;
        Ok(())
    }

    async fn reset_visit_status(&self) -> RemoteResult<()> {
        Self::send(self.reset_visit_status_request()).await?;
        Ok(())
    }

    async fn fetch_regions(&self) -> RemoteResult<Vec<Region>> {
        tracing::debug!("Fetching regions from {}", self.rest_url);
        let response = Self::send(self.fetch_regions_request()).await?;
        let rows = response.json::<Vec<RegionRow>>().await?;
        Ok(rows.into_iter().filter_map(RegionRow::into_region).collect())
    }

    async fn upsert_region(&self, region: Region) -> RemoteResult<()> {
        Self::send(self.upsert_region_request(&region)).await?;
        Ok(())
    }

    async fn delete_region(&self, id: RegionId) -> RemoteResult<()> {
        Self::send(self.delete_request(REGIONS_TABLE, id.as_str())).await?;
        Ok(())
    }
}

#[derive(Debug, Deserialize)]
struct PostgrestErrorBody {
    message: Option<String>,
    hint: Option<String>,
    code: Option<String>,
}

fn parse_api_error(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<PostgrestErrorBody>(body) {
        if let Some(message) = payload.message {
            let mut rendered = message.trim().to_string();
            if let Some(code) = payload.code {
                rendered = format!("{rendered} [{code}]");
            }
            if let Some(hint) = payload.hint {
                rendered = format!("{rendered} (hint: {})", hint.trim());
            }
            return format!("{rendered} ({})", status.as_u16());
        }
    }

    let trimmed = compact_text(body);
    if trimmed.is_empty() {
        format!("HTTP {}", status.as_u16())
    } else {
        format!("{trimmed} ({})", status.as_u16())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote() -> SupabaseRemote {
        SupabaseRemote::from_config(&RemoteConfig::new("https://project.supabase.co", "anon"))
            .unwrap()
            .unwrap()
    }

    fn header<'a>(request: &'a reqwest::Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|value| value.to_str().ok())
    }

    fn json_body(request: &reqwest::Request) -> serde_json::Value {
        let bytes = request.body().and_then(|body| body.as_bytes()).unwrap();
        serde_json::from_slice(bytes).unwrap()
    }

    #[test]
    fn requests_carry_anon_key_headers() {
        let request = remote().fetch_customers_request().build().unwrap();
        assert_eq!(header(&request, "apikey"), Some("anon"));
        assert_eq!(header(&request, "authorization"), Some("Bearer anon"));
    }

    #[test]
    fn reads_are_ordered() {
        let customers = remote().fetch_customers_request().build().unwrap();
        assert_eq!(customers.method(), &Method::GET);
        assert_eq!(
            customers.url().as_str(),
            "https://project.supabase.co/rest/v1/customers?select=*&order=created_at.desc"
        );

        let regions = remote().fetch_regions_request().build().unwrap();
        assert_eq!(regions.url().query(), Some("select=*&order=name.asc"));
    }

    #[test]
    fn upserts_merge_duplicates() {
        let customer = Customer::new("Shop", "0750");
        let request = remote()
            .upsert_customers_request(std::slice::from_ref(&customer))
            .build()
            .unwrap();

        assert_eq!(request.method(), &Method::POST);
        assert!(header(&request, "prefer")
            .is_some_and(|prefer| prefer.contains("resolution=merge-duplicates")));
        let body = json_body(&request);
        assert_eq!(body[0]["id"], customer.id.as_str());
        assert_eq!(body[0]["shop_name"], "Shop");

        let region = Region::new("زاخو").with_subregion("المركز");
        let request = remote().upsert_region_request(&region).build().unwrap();
        assert!(header(&request, "prefer")
            .is_some_and(|prefer| prefer.contains("resolution=merge-duplicates")));
        assert_eq!(json_body(&request)["subregions"][0], "المركز");
    }

    #[test]
    fn deletes_filter_by_id() {
        let request = remote()
            .delete_request(CUSTOMERS_TABLE, "abc-123")
            .build()
            .unwrap();
        assert_eq!(request.method(), &Method::DELETE);
        assert_eq!(request.url().path(), "/rest/v1/customers");
        assert_eq!(request.url().query(), Some("id=eq.abc-123"));
    }

    #[test]
    fn reset_patches_every_row() {
        let request = remote().reset_visit_status_request().build().unwrap();
        assert_eq!(request.method(), &Method::PATCH);
        assert_eq!(
            request.url().query(),
            Some("id=neq.00000000-0000-0000-0000-000000000000")
        );
        assert_eq!(json_body(&request), serde_json::json!({ "visit_status": "لم تتم" }));
    }

    #[test]
    fn incomplete_config_means_local_only() {
        let remote = SupabaseRemote::from_config(&RemoteConfig::default()).unwrap();
        assert!(remote.is_none());
    }

    #[test]
    fn invalid_url_is_rejected() {
        let result = SupabaseRemote::from_config(&RemoteConfig::new("project.supabase.co", "k"));
        assert!(matches!(result, Err(RemoteError::InvalidConfiguration(_))));
    }

    #[test]
    fn rest_url_points_at_postgrest() {
        let remote = SupabaseRemote::from_config(&RemoteConfig::new(
            "https://project.supabase.co/",
            "anon",
        ))
        .unwrap()
        .unwrap();
        assert_eq!(remote.rest_url(), "https://project.supabase.co/rest/v1");
    }

    #[test]
    fn parse_api_error_prefers_postgrest_message() {
        let rendered = parse_api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"message":"permission denied for table customers","code":"42501","hint":null}"#,
        );
        assert_eq!(
            rendered,
            "permission denied for table customers [42501] (401)"
        );
    }

    #[test]
    fn parse_api_error_falls_back_to_body_or_status() {
        assert_eq!(
            parse_api_error(StatusCode::BAD_GATEWAY, "upstream down"),
            "upstream down (502)"
        );
        assert_eq!(parse_api_error(StatusCode::NOT_FOUND, "  "), "HTTP 404");
    }
}
