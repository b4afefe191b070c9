use crate::error::{Result, StoreError};
use fleetdiag_core::domain::{Vehicle, VehicleCategory, VehicleDraft, VehicleId};
use rusqlite::{params, Connection};
use std::str::FromStr;

const VEHICLE_COLUMNS: &str =
    "id, name, brand, model, vehicle_type, price_per_day_cents, available, created_at";

/// Vehicle rows, split across one table per category.
pub struct VehiclesRepo<'a> {
    conn: &'a Connection,
}

impl<'a> VehiclesRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Inserts into the collection of `draft.category`, storing the canonical
    /// type on the row.
    pub fn insert(&self, now_utc: i64, draft: VehicleDraft) -> Result<Vehicle> {
        let vehicle = Vehicle {
            id: VehicleId::new(),
            category: draft.category,
            name: draft.name,
            brand: draft.brand,
            model: draft.model,
            vehicle_type: Some(draft.category.as_str().to_string()),
            price_per_day_cents: draft.price_per_day_cents,
            available: draft.available,
            created_at: now_utc,
        };
        let sql = format!(
            "INSERT INTO {} ({VEHICLE_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);",
            vehicle.category.collection()
        );
        self.conn.execute(
            &sql,
            params![
                vehicle.id.to_string(),
                vehicle.name,
                vehicle.brand,
                vehicle.model,
                vehicle.vehicle_type,
                vehicle.price_per_day_cents,
                vehicle.available,
                vehicle.created_at
            ],
        )?;
        Ok(vehicle)
    }

    pub fn get(&self, category: VehicleCategory, id: VehicleId) -> Result<Option<Vehicle>> {
        let sql = format!(
            "SELECT {VEHICLE_COLUMNS} FROM {} WHERE id = ?1;",
            category.collection()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([id.to_string()])?;
        let vehicle = match rows.next()? {
            Some(row) => Some(vehicle_from_row(category, row)?),
            None => None,
        };
        Ok(vehicle)
    }

    /// Searches every collection, in category order, and returns all hits.
    pub fn find_anywhere(&self, id: VehicleId) -> Result<Vec<Vehicle>> {
        let mut found = Vec::new();
        for category in VehicleCategory::ALL {
            if let Some(vehicle) = self.get(category, id)? {
                found.push(vehicle);
            }
        }
        Ok(found)
    }

    pub fn exists(&self, category: VehicleCategory, id: VehicleId) -> Result<bool> {
        let sql = format!(
            "SELECT EXISTS(SELECT 1 FROM {} WHERE id = ?1);",
            category.collection()
        );
        let exists: bool = self
            .conn
            .query_row(&sql, [id.to_string()], |row| row.get(0))?;
        Ok(exists)
    }

    pub fn list(&self, category: VehicleCategory) -> Result<Vec<Vehicle>> {
        let sql = format!(
            "SELECT {VEHICLE_COLUMNS} FROM {} ORDER BY created_at ASC, id ASC;",
            category.collection()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut vehicles = Vec::new();
        while let Some(row) = rows.next()? {
            vehicles.push(vehicle_from_row(category, row)?);
        }
        Ok(vehicles)
    }

    pub fn count(&self, category: VehicleCategory) -> Result<i64> {
        let sql = format!("SELECT COUNT(*) FROM {};", category.collection());
        let count = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count)
    }
}

fn vehicle_from_row(category: VehicleCategory, row: &rusqlite::Row<'_>) -> Result<Vehicle> {
    let id_str: String = row.get(0)?;
    let id = VehicleId::from_str(&id_str).map_err(|_| StoreError::InvalidId(id_str.clone()))?;
    Ok(Vehicle {
        id,
        category,
        name: row.get(1)?,
        brand: row.get(2)?,
        model: row.get(3)?,
        vehicle_type: row.get(4)?,
        price_per_day_cents: row.get(5)?,
        available: row.get(6)?,
        created_at: row.get(7)?,
    })
}
