//! Region repository implementation

use crate::error::Result;
use crate::models::{Region, RegionId};
use rusqlite::types::Type;
use rusqlite::{params, Connection};

const UPSERT_REGION: &str =
    "INSERT OR REPLACE INTO regions (id, name, subregions) VALUES (?, ?, ?)";

/// Trait for region storage operations
pub trait RegionRepository {
    /// List every region ordered by name
    fn list(&self) -> Result<Vec<Region>>;

    /// Get a region by ID
    fn get(&self, id: &RegionId) -> Result<Option<Region>>;

    /// Insert or replace a region (sub-regions are written as a whole)
    fn put(&self, region: &Region) -> Result<()>;

    /// Insert or replace a batch of regions in one transaction
    fn bulk_put(&self, regions: &[Region]) -> Result<()>;

    /// Delete a region, returning whether a row was removed
    fn delete(&self, id: &RegionId) -> Result<bool>;
}

/// `SQLite` implementation of `RegionRepository`
pub struct SqliteRegionRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteRegionRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    fn parse_region(row: &rusqlite::Row<'_>) -> rusqlite::Result<Region> {
        let id: String = row.get(0)?;
        let subregions: String = row.get(2)?;
        Ok(Region {
            id: id.parse().unwrap_or_default(),
            name: row.get(1)?,
            subregions: serde_json::from_str(&subregions).map_err(|error| {
                rusqlite::Error::FromSqlConversionFailure(2, Type::Text, Box::new(error))
            })?,
        })
    }

    fn insert_with(stmt: &mut rusqlite::Statement<'_>, region: &Region) -> Result<()> {
        stmt.execute(params![
            region.id.as_str(),
            region.name,
            serde_json::to_string(&region.subregions)?
        ])?;
        Ok(())
    }
}

impl RegionRepository for SqliteRegionRepository<'_> {
    fn list(&self) -> Result<Vec<Region>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, subregions FROM regions ORDER BY name ASC, id ASC")?;

        let regions = stmt
            .query_map([], Self::parse_region)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(regions)
    }

    fn get(&self, id: &RegionId) -> Result<Option<Region>> {
        let result = self.conn.query_row(
            "SELECT id, name, subregions FROM regions WHERE id = ?",
            params![id.as_str()],
            Self::parse_region,
        );

        match result {
            Ok(region) => Ok(Some(region)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, region: &Region) -> Result<()> {
        let mut stmt = self.conn.prepare(UPSERT_REGION)?;
        Self::insert_with(&mut stmt, region)
    }

    fn bulk_put(&self, regions: &[Region]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_REGION)?;
            for region in regions {
                Self::insert_with(&mut stmt, region)?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: &RegionId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM regions WHERE id = ?", params![id.as_str()])?;
        Ok(rows > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::Database;
    use pretty_assertions::assert_eq;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    #[test]
    fn test_seeded_regions_listed_by_name() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());

        let regions = repo.list().unwrap();
        assert_eq!(regions.len(), 4);

        let mut names = regions.iter().map(|r| r.name.clone()).collect::<Vec<_>>();
        let listed = names.clone();
        names.sort();
        assert_eq!(listed, names);
    }

    #[test]
    fn test_put_round_trips_subregions() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());

        let region = Region::new("Erbil")
            .with_subregion("Ankawa")
            .with_subregion("Ankawa");
        repo.put(&region).unwrap();

        assert_eq!(repo.get(&region.id).unwrap().unwrap(), region);
    }

    #[test]
    fn test_put_replaces_whole_subregion_list() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());

        let region = Region::new("Zakho").with_subregion("A").with_subregion("B");
        repo.put(&region).unwrap();
        repo.put(&region.without_subregion(0)).unwrap();

        let stored = repo.get(&region.id).unwrap().unwrap();
        assert_eq!(stored.subregions, vec!["B"]);
    }

    #[test]
    fn test_delete() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());

        let id: RegionId = "1".parse().unwrap();
        assert!(repo.delete(&id).unwrap());
        assert!(repo.get(&id).unwrap().is_none());
        assert_eq!(repo.list().unwrap().len(), 3);
    }

    #[test]
    fn test_corrupt_subregions_are_an_error() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());
        db.connection()
            .execute(
                "UPDATE regions SET subregions = '[\"a\",\"b\"' WHERE id = '1'",
                [],
            )
            .unwrap();

        let id: RegionId = "1".parse().unwrap();
        let error = repo.get(&id).unwrap_err();
        assert!(error.is_local_storage());
        assert!(repo.list().is_err());
    }

    #[test]
    fn test_bulk_put() {
        let db = setup();
        let repo = SqliteRegionRepository::new(db.connection());
        for region in repo.list().unwrap() {
            repo.delete(&region.id).unwrap();
        }

        repo.bulk_put(&[Region::new("A"), Region::new("B")]).unwrap();
        assert_eq!(repo.list().unwrap().len(), 2);
    }
}
