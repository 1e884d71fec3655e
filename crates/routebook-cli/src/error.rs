use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] routebook_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Customer ID cannot be empty")]
    EmptyCustomerId,
    #[error("Customer not found for id/prefix: {0}")]
    CustomerNotFound(String),
    #[error("{0}")]
    AmbiguousCustomerId(String),
    #[error("Region not found for id/name: {0}")]
    RegionNotFound(String),
    #[error("No fields to change; pass at least one of --shop, --manager, --phone, --region, --sub-region, --whatsapp-link, --map-link")]
    NothingToEdit,
    #[error("Nothing to export")]
    NothingToExport,
    #[error("No customer rows found in {0}")]
    EmptyImport(String),
    #[error("This marks every customer as not visited. Re-run with --yes to confirm.")]
    ConfirmationRequired,
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Extra guidance printed after the error message
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Core(error) if error.is_local_storage() => Some(
                "Check that the database path is writable and the disk is not full (see --db-path / ROUTEBOOK_DB_PATH).",
            ),
            Self::Io(_) => Some("Check the file path and its permissions."),
            _ => None,
        }
    }
}
