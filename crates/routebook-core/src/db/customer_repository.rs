//! Customer repository implementation

use crate::error::Result;
use crate::models::{Customer, CustomerId, VisitStatus};
use rusqlite::{params, Connection};

const CUSTOMER_COLUMNS: &str = "id, shop_name, manager_name, phone, main_region, sub_region, \
                                whatsapp_link, map_link, visit_status, created_at";

const UPSERT_CUSTOMER: &str = "INSERT OR REPLACE INTO customers (
        id, shop_name, manager_name, phone, main_region, sub_region,
        whatsapp_link, map_link, visit_status, created_at
    ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)";

/// Trait for customer storage operations
pub trait CustomerRepository {
    /// List every customer, newest first
    fn list(&self) -> Result<Vec<Customer>>;

    /// Get a customer by ID
    fn get(&self, id: &CustomerId) -> Result<Option<Customer>>;

    /// Insert or replace a customer
    fn put(&self, customer: &Customer) -> Result<()>;

    /// Insert or replace a batch of customers in one transaction
    fn bulk_put(&self, customers: &[Customer]) -> Result<()>;

    /// Delete a customer, returning whether a row was removed
    fn delete(&self, id: &CustomerId) -> Result<bool>;

    /// Set every customer's visit status, returning the number of rows touched
    fn set_all_visit_status(&self, status: VisitStatus) -> Result<usize>;
}

/// `SQLite` implementation of `CustomerRepository`
pub struct SqliteCustomerRepository<'a> {
    conn: &'a Connection,
}

impl<'a> SqliteCustomerRepository<'a> {
    /// Create a new repository with the given connection
    pub const fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Parse a customer from a database row
    fn parse_customer(row: &rusqlite::Row<'_>) -> rusqlite::Result<Customer> {
        let id: String = row.get(0)?;
        let status: String = row.get(8)?;
        Ok(Customer {
            id: id.parse().unwrap_or_default(),
            shop_name: row.get(1)?,
            manager_name: row.get(2)?,
            phone: row.get(3)?,
            main_region: row.get(4)?,
            sub_region: row.get(5)?,
            whatsapp_link: row.get(6)?,
            map_link: row.get(7)?,
            visit_status: VisitStatus::from(status),
            created_at: row.get(9)?,
        })
    }

    fn insert_with(stmt: &mut rusqlite::Statement<'_>, customer: &Customer) -> Result<()> {
        stmt.execute(params![
            customer.id.as_str(),
            customer.shop_name,
            customer.manager_name,
            customer.phone,
            customer.main_region,
            customer.sub_region,
            customer.whatsapp_link,
            customer.map_link,
            customer.visit_status.label(),
            customer.created_at,
        ])?;
        Ok(())
    }
}

impl CustomerRepository for SqliteCustomerRepository<'_> {
    fn list(&self) -> Result<Vec<Customer>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers ORDER BY created_at DESC, id DESC"
        ))?;

        let customers = stmt
            .query_map([], Self::parse_customer)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(customers)
    }

    fn get(&self, id: &CustomerId) -> Result<Option<Customer>> {
        let result = self.conn.query_row(
            &format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?"),
            params![id.as_str()],
            Self::parse_customer,
        );

        match result {
            Ok(customer) => Ok(Some(customer)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn put(&self, customer: &Customer) -> Result<()> {
        let mut stmt = self.conn.prepare(UPSERT_CUSTOMER)?;
        Self::insert_with(&mut stmt, customer)
    }

    fn bulk_put(&self, customers: &[Customer]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare(UPSERT_CUSTOMER)?;
            for customer in customers {
                Self::insert_with(&mut stmt, customer)?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn delete(&self, id: &CustomerId) -> Result<bool> {
        let rows = self
            .conn
            .execute("DELETE FROM customers WHERE id = ?", params![id.as_str()])?;
        Ok(rows > 0)
    }

    fn set_all_visit_status(&self, status: VisitStatus) -> Result<usize> {
        let rows = self.conn.execute(
            "UPDATE customers SET visit_status = ?",
            params![status.label()],
        )?;
        Ok(rows)
    }
}
