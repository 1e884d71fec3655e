//! Local store for routebook

mod connection;
mod customer_repository;
mod migrations;
mod region_repository;
mod seed;

pub use connection::Database;
pub use customer_repository::{CustomerRepository, SqliteCustomerRepository};
pub use region_repository::{RegionRepository, SqliteRegionRepository};
pub use seed::default_regions;
