pub mod db;
pub mod diagnostics;
pub mod error;
pub mod migrate;
pub mod paths;
pub mod repo;

pub use crate::db::Access;

use crate::error::Result;
use rusqlite::Connection;
use std::path::Path;

pub struct Store {
    conn: Connection,
}

impl Store {
    /// Opens the application's existing database and checks that the
    /// expected tables are present. Never creates or migrates anything.
    pub fn open(path: &Path, access: Access) -> Result<Self> {
        let conn = db::open_existing(path, access)?;
        migrate::check_schema(&conn)?;
        Ok(Self { conn })
    }

    /// Creates a database file with the full schema applied.
    pub fn create(path: &Path) -> Result<Self> {
        let conn = db::create(path)?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = db::open_in_memory()?;
        Ok(Self { conn })
    }

    pub fn migrate(&self) -> Result<()> {
        migrate::run_migrations(&self.conn)
    }

    pub fn schema_version(&self) -> Result<i64> {
        migrate::schema_version(&self.conn)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn users(&self) -> repo::UsersRepo<'_> {
        repo::UsersRepo::new(&self.conn)
    }

    pub fn vehicles(&self) -> repo::VehiclesRepo<'_> {
        repo::VehiclesRepo::new(&self.conn)
    }

    pub fn bookings(&self) -> repo::BookingsRepo<'_> {
        repo::BookingsRepo::new(&self.conn)
    }
}
