//! Region model

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::Error;

/// Opaque region identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(String);

impl RegionId {
    /// Create a new unique region ID
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation of this ID
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for RegionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RegionId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::InvalidInput("region id cannot be empty".into()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

/// A main region and its ordered sub-regions
///
/// The sub-region list is edited as a whole value: every change produces a
/// new `Region` that replaces the stored one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    /// Unique identifier
    pub id: RegionId,
    /// Region name (unique by convention only)
    pub name: String,
    /// Sub-region names, duplicates allowed
    pub subregions: Vec<String>,
}

impl Region {
    /// Create a new region with no sub-regions
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: RegionId::new(),
            name: name.into(),
            subregions: Vec::new(),
        }
    }

    /// Copy of this region with `name` appended to the sub-regions
    #[must_use]
    pub fn with_subregion(&self, name: impl Into<String>) -> Self {
        let mut subregions = self.subregions.clone();
        subregions.push(name.into());
        Self {
            subregions,
            ..self.clone()
        }
    }

    /// Copy of this region without the sub-region at `index`.
    ///
    /// An out-of-range index yields an unchanged copy.
    #[must_use]
    pub fn without_subregion(&self, index: usize) -> Self {
        let subregions = self
            .subregions
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != index)
            .map(|(_, name)| name.clone())
            .collect();
        Self {
            subregions,
            ..self.clone()
        }
    }
}
