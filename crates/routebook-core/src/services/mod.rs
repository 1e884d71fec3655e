//! Service layer shared by all routebook interfaces.

mod data;

pub use data::DataService;
