//! Remote mirror of the local store.
//!
//! The remote is best-effort: the sync layer only logs its failures.

mod rows;
mod supabase;

use std::future::Future;

use thiserror::Error;

use crate::models::{Customer, CustomerId, Region, RegionId};

pub use rows::{CustomerRow, RegionRow};
pub use supabase::SupabaseRemote;

#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Invalid remote configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Remote HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Remote API error: {0}")]
    Api(String),
}

pub type RemoteResult<T> = Result<T, RemoteError>;

/// Table-level operations the sync layer mirrors to the hosted backend.
///
/// Arguments are owned so calls can run on detached tasks.
pub trait RemoteStore: Send + Sync + 'static {
    /// Every customer, newest first
    fn fetch_customers(&self) -> impl Future<Output = RemoteResult<Vec<Customer>>> + Send;

    /// Insert or update a batch of customers in one request
    fn upsert_customers(
        &self,
        customers: Vec<Customer>,
    ) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Delete one customer by id
    fn delete_customer(&self, id: CustomerId) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Set every row's visit status to not-done
    fn reset_visit_status(&self) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Every region, ordered by name
    fn fetch_regions(&self) -> impl Future<Output = RemoteResult<Vec<Region>>> + Send;

    /// Insert or update one region, sub-regions included
    fn upsert_region(&self, region: Region) -> impl Future<Output = RemoteResult<()>> + Send;

    /// Delete one region by id
    fn delete_region(&self, id: RegionId) -> impl Future<Output = RemoteResult<()>> + Send;
}
