//! routebook-core - Core library for routebook
//!
//! This crate contains the customer and region models, the local `SQLite`
//! store, the best-effort remote mirror and the sync layer that ties them
//! together, plus the CSV import/export and dashboard helpers used by the CLI.

pub mod config;
pub mod dashboard;
pub mod db;
pub mod error;
pub mod export;
pub mod import;
pub mod models;
pub mod remote;
pub mod search;
pub mod services;
pub mod util;

pub use config::RemoteConfig;
pub use error::{Error, Result};
pub use models::{Customer, CustomerId, Region, RegionId, VisitStatus};
pub use services::DataService;
