//! Database migrations

use crate::error::Result;
use rusqlite::{params, Connection};

use super::seed::default_regions;

/// Current schema version
const CURRENT_VERSION: i32 = 1;

/// Run all pending migrations
pub fn run(conn: &Connection) -> Result<()> {
    let version = get_version(conn)?;

    if version < 1 {
        migrate_v1(conn)?;
    }

    Ok(())
}

/// Get the current schema version
fn get_version(conn: &Connection) -> Result<i32> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
        [],
        |row| row.get(0),
    )?;

    if !exists {
        return Ok(0);
    }

    let version: i32 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;

    Ok(version)
}

/// Migration to version 1: customers, regions and the starter taxonomy
fn migrate_v1(conn: &Connection) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY
        );
        CREATE TABLE IF NOT EXISTS customers (
            id TEXT PRIMARY KEY,
            shop_name TEXT NOT NULL,
            manager_name TEXT NOT NULL DEFAULT '',
            phone TEXT NOT NULL DEFAULT '',
            main_region TEXT NOT NULL DEFAULT '',
            sub_region TEXT NOT NULL DEFAULT '',
            whatsapp_link TEXT NOT NULL DEFAULT '',
            map_link TEXT NOT NULL DEFAULT '',
            visit_status TEXT NOT NULL,
            created_at INTEGER NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_customers_shop_name ON customers(shop_name);
        CREATE INDEX IF NOT EXISTS idx_customers_manager_name ON customers(manager_name);
        CREATE INDEX IF NOT EXISTS idx_customers_phone ON customers(phone);
        CREATE INDEX IF NOT EXISTS idx_customers_main_region ON customers(main_region);
        CREATE INDEX IF NOT EXISTS idx_customers_visit_status ON customers(visit_status);
        CREATE INDEX IF NOT EXISTS idx_customers_created ON customers(created_at DESC);
        CREATE TABLE IF NOT EXISTS regions (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            subregions TEXT NOT NULL DEFAULT '[]'
        );
        CREATE INDEX IF NOT EXISTS idx_regions_name ON regions(name);",
    )?;

    let seeded = default_regions();
    for region in &seeded {
        tx.execute(
            "INSERT OR IGNORE INTO regions (id, name, subregions) VALUES (?, ?, ?)",
            params![
                region.id.as_str(),
                region.name,
                serde_json::to_string(&region.subregions)?
            ],
        )?;
    }

    tx.execute(
        "INSERT INTO schema_version (version) VALUES (?)",
        params![CURRENT_VERSION],
    )?;
    tx.commit()?;

    tracing::info!(
        "Migrated database to version {CURRENT_VERSION} ({} starter regions)",
        seeded.len()
    );
    Ok(())
}
