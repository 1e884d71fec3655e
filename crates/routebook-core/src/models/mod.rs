//! Data models for routebook

mod customer;
mod region;
mod visit_status;

pub use customer::{whatsapp_link_for_phone, Customer, CustomerId};
pub use region::{Region, RegionId};
pub use visit_status::VisitStatus;
