//! Sync layer between the local store and the optional remote mirror.
//!
//! Reads come from the local store. The remote is only consulted when the
//! local table is empty, and the result seeds the local table. Every mutation
//! commits locally first and is then mirrored on a detached task whose
//! failure is logged and otherwise ignored.

use std::future::Future;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError};
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;

use crate::config::RemoteConfig;
use crate::db::{
    CustomerRepository, Database, RegionRepository, SqliteCustomerRepository,
    SqliteRegionRepository,
};
use crate::models::{Customer, CustomerId, Region, RegionId, VisitStatus};
use crate::remote::{RemoteResult, RemoteStore, SupabaseRemote};
use crate::{Error, Result};

/// Thread-safe sync layer over the local store and an optional remote.
pub struct DataService<R = SupabaseRemote> {
    db: Arc<Mutex<Database>>,
    remote: Option<Arc<R>>,
    mirrors: Arc<std::sync::Mutex<Vec<JoinHandle<()>>>>,
}

impl<R> Clone for DataService<R> {
    fn clone(&self) -> Self {
        Self {
            db: Arc::clone(&self.db),
            remote: self.remote.clone(),
            mirrors: Arc::clone(&self.mirrors),
        }
    }
}

impl DataService<SupabaseRemote> {
    /// Open the local store at `db_path` and attach the hosted mirror when
    /// `remote_config` is complete.
    ///
    /// An unusable remote configuration is logged and the service runs
    /// local-only.
    pub async fn open_path(db_path: impl Into<PathBuf>, remote_config: &RemoteConfig) -> Result<Self> {
        let db_path = db_path.into();
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let db = Database::open(&db_path)?;
        let remote = match SupabaseRemote::from_config(remote_config) {
            Ok(Some(remote)) => {
                tracing::info!("Remote mirror enabled: {}", remote.rest_url());
                Some(remote)
            }
            Ok(None) => {
                tracing::info!("Running in local-only mode (no remote config)");
                None
            }
            Err(error) => {
                tracing::warn!("Remote mirror disabled: {error}");
                None
            }
        };

        Ok(Self::new(db, remote))
    }

    /// Open a local-only service at the given path.
    pub async fn open_local_path(db_path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_path(db_path, &RemoteConfig::default()).await
    }

    /// Open an in-memory local-only service (primarily for tests).
    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Database::open_in_memory()?, None))
    }
}

impl<R: RemoteStore> DataService<R> {
    /// Assemble a service from explicit stores.
    pub fn new(db: Database, remote: Option<R>) -> Self {
        Self {
            db: Arc::new(Mutex::new(db)),
            remote: remote.map(Arc::new),
            mirrors: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    /// Returns whether a remote mirror is attached.
    pub const fn is_remote_enabled(&self) -> bool {
        self.remote.is_some()
    }

    /// List customers, seeding the local store from the remote on first use.
    pub async fn list_customers(&self) -> Result<Vec<Customer>> {
        let local = {
            let db = self.db.lock().await;
            SqliteCustomerRepository::new(db.connection()).list()?
        };

        if !local.is_empty() {
            return Ok(local);
        }
        let Some(remote) = self.remote.as_ref() else {
            return Ok(local);
        };

        match remote.fetch_customers().await {
            Ok(fetched) if !fetched.is_empty() => {
                let db = self.db.lock().await;
                SqliteCustomerRepository::new(db.connection()).bulk_put(&fetched)?;
                tracing::info!("Seeded {} customer(s) from remote", fetched.len());
                Ok(fetched)
            }
            Ok(_) => Ok(local),
            Err(error) => {
                tracing::warn!("Remote customer fetch failed: {error}");
                Ok(local)
            }
        }
    }

    /// Fetch a customer from the local store.
    pub async fn get_customer(&self, id: &CustomerId) -> Result<Option<Customer>> {
        let db = self.db.lock().await;
        SqliteCustomerRepository::new(db.connection()).get(id)
    }

    /// Insert or update a customer, then mirror it.
    pub async fn save_customer(&self, customer: &Customer) -> Result<()> {
        {
            let db = self.db.lock().await;
            SqliteCustomerRepository::new(db.connection()).put(customer)?;
        }

        let batch = vec![customer.clone()];
        self.mirror("customer upsert", move |remote| async move {
            remote.upsert_customers(batch).await
        });
        Ok(())
    }

    /// Delete a customer, then mirror the delete. Unknown ids are not an error.
    pub async fn delete_customer(&self, id: &CustomerId) -> Result<()> {
        let removed = {
            let db = self.db.lock().await;
            SqliteCustomerRepository::new(db.connection()).delete(id)?
        };
        if !removed {
            tracing::debug!("Customer {id} was not in the local store");
        }

        let id = id.clone();
        self.mirror("customer delete", move |remote| async move {
            remote.delete_customer(id).await
        });
        Ok(())
    }

    /// Store a batch of customers in one local transaction, then mirror the
    /// batch as one request.
    pub async fn bulk_import_customers(&self, customers: &[Customer]) -> Result<usize> {
        if customers.is_empty() {
            return Ok(0);
        }

        {
            let db = self.db.lock().await;
            SqliteCustomerRepository::new(db.connection()).bulk_put(customers)?;
        }
        tracing::info!("Imported {} customer(s)", customers.len());

        let batch = customers.to_vec();
        self.mirror("customer bulk import", move |remote| async move {
            remote.upsert_customers(batch).await
        });
        Ok(customers.len())
    }

    /// Set every customer's visit status to not-done, locally and remotely.
    pub async fn reset_all_visit_status(&self) -> Result<usize> {
        let touched = {
            let db = self.db.lock().await;
            SqliteCustomerRepository::new(db.connection())
                .set_all_visit_status(VisitStatus::NotDone)?
        };
        tracing::info!("Reset visit status for {touched} customer(s)");

        self.mirror("visit status reset", |remote| async move {
            remote.reset_visit_status().await
        });
        Ok(touched)
    }

    /// List regions, seeding the local store from the remote on first use.
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let local = {
            let db = self.db.lock().await;
            SqliteRegionRepository::new(db.connection()).list()?
        };

        if !local.is_empty() {
            return Ok(local);
        }
        let Some(remote) = self.remote.as_ref() else {
            return Ok(local);
        };

        match remote.fetch_regions().await {
            Ok(fetched) if !fetched.is_empty() => {
                let db = self.db.lock().await;
                SqliteRegionRepository::new(db.connection()).bulk_put(&fetched)?;
                tracing::info!("Seeded {} region(s) from remote", fetched.len());
                Ok(fetched)
            }
            Ok(_) => Ok(local),
            Err(error) => {
                tracing::warn!("Remote region fetch failed: {error}");
                Ok(local)
            }
        }
    }

    /// Fetch a region from the local store.
    pub async fn get_region(&self, id: &RegionId) -> Result<Option<Region>> {
        let db = self.db.lock().await;
        SqliteRegionRepository::new(db.connection()).get(id)
    }

    /// Insert or update a region, then mirror it.
    pub async fn save_region(&self, region: &Region) -> Result<()> {
        {
            let db = self.db.lock().await;
            SqliteRegionRepository::new(db.connection()).put(region)?;
        }

        let region = region.clone();
        self.mirror("region upsert", move |remote| async move {
            remote.upsert_region(region).await
        });
        Ok(())
    }

    /// Delete a region, then mirror the delete.
    ///
    /// Customers that reference the region are left as they are.
    pub async fn delete_region(&self, id: &RegionId) -> Result<()> {
        let removed = {
            let db = self.db.lock().await;
            SqliteRegionRepository::new(db.connection()).delete(id)?
        };
        if !removed {
            tracing::debug!("Region {id} was not in the local store");
        }

        let id = id.clone();
        self.mirror("region delete", move |remote| async move {
            remote.delete_region(id).await
        });
        Ok(())
    }

    /// Create a region with no sub-regions.
    pub async fn create_region(&self, name: &str) -> Result<Region> {
        let name = required_name(name, "region name")?;
        let region = Region::new(name);
        self.save_region(&region).await?;
        Ok(region)
    }

    /// Append a sub-region and save the whole region back.
    pub async fn add_subregion(&self, region_id: &RegionId, name: &str) -> Result<Region> {
        let name = required_name(name, "sub-region name")?;
        let region = self.require_region(region_id).await?;
        let updated = region.with_subregion(name);
        self.save_region(&updated).await?;
        Ok(updated)
    }

    /// Remove the sub-region at `index` and save the whole region back.
    pub async fn remove_subregion(&self, region_id: &RegionId, index: usize) -> Result<Region> {
        let region = self.require_region(region_id).await?;
        if index >= region.subregions.len() {
            return Err(Error::InvalidInput(format!(
                "region '{}' has no sub-region at index {index}",
                region.name
            )));
        }
        let updated = region.without_subregion(index);
        self.save_region(&updated).await?;
        Ok(updated)
    }

    /// Wait up to `timeout` for in-flight mirror tasks.
    ///
    /// Mutations never call this; it exists so a short-lived process can let
    /// its mirrors finish before exiting. Returns how many tasks were pending.
    pub async fn drain_mirrors(&self, timeout: Duration) -> usize {
        let pending = {
            let mut mirrors = self.mirrors.lock().unwrap_or_else(PoisonError::into_inner);
            std::mem::take(&mut *mirrors)
        };
        let count = pending.len();
        if count == 0 {
            return 0;
        }

        let drained = tokio::time::timeout(timeout, async {
            for handle in pending {
                let _ = handle.await;
            }
        })
        .await;
        if drained.is_err() {
            tracing::warn!("Gave up waiting for remote mirror tasks after {timeout:?}");
        }
        count
    }

    async fn require_region(&self, region_id: &RegionId) -> Result<Region> {
        self.get_region(region_id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("region {region_id}")))
    }

    /// Dispatch a mirror operation on a detached task.
    fn mirror<F, Fut>(&self, operation: &'static str, call: F)
    where
        F: FnOnce(Arc<R>) -> Fut,
        Fut: Future<Output = RemoteResult<()>> + Send + 'static,
    {
        let Some(remote) = self.remote.clone() else {
            return;
        };

        let task = call(remote);
        let handle = tokio::spawn(async move {
            match task.await {
                Ok(()) => tracing::debug!("Remote {operation} mirrored"),
                Err(error) => tracing::warn!("Remote {operation} failed: {error}"),
            }
        });

        let mut mirrors = self.mirrors.lock().unwrap_or_else(PoisonError::into_inner);
        mirrors.retain(|handle| !handle.is_finished());
        mirrors.push(handle);
    }
}

fn required_name(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(Error::InvalidInput(format!("{field} cannot be empty")))
    } else {
        Ok(trimmed.to_string())
    }
}
