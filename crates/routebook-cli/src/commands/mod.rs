pub mod add;
pub mod common;
pub mod completions;
pub mod config;
pub mod dashboard;
pub mod delete;
pub mod edit;
pub mod export;
pub mod import;
pub mod list;
pub mod mark;
pub mod regions;
pub mod reset;
