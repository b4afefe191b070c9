use crate::error::{Result, StoreError};
use fleetdiag_core::domain::{Booking, BookingId, UserId, VehicleId};
use rusqlite::{params, Connection};
use std::str::FromStr;

const BOOKING_COLUMNS: &str =
    "id, user_id, vehicle_id, vehicle_type, status, start_at, end_at, created_at";

pub struct BookingsRepo<'a> {
    conn: &'a Connection,
}

#[derive(Debug, Clone)]
pub struct BookingNew {
    pub user_id: UserId,
    pub vehicle_id: VehicleId,
    pub vehicle_type: Option<String>,
    pub status: String,
    pub start_at: i64,
    pub end_at: i64,
}

impl<'a> BookingsRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Stores the booking as given; the type string is not normalized.
    pub fn create(&self, now_utc: i64, input: BookingNew) -> Result<Booking> {
        let booking = Booking {
            id: BookingId::new(),
            user_id: input.user_id,
            vehicle_id: input.vehicle_id,
            vehicle_type: input.vehicle_type,
            status: input.status,
            start_at: input.start_at,
            end_at: input.end_at,
            created_at: now_utc,
        };
        self.conn.execute(
            &format!(
                "INSERT INTO bookings ({BOOKING_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8);"
            ),
            params![
                booking.id.to_string(),
                booking.user_id.to_string(),
                booking.vehicle_id.to_string(),
                booking.vehicle_type,
                booking.status,
                booking.start_at,
                booking.end_at,
                booking.created_at
            ],
        )?;
        Ok(booking)
    }

    /// Newest first.
    pub fn list_for_user(&self, user_id: UserId, limit: i64) -> Result<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings
             WHERE user_id = ?1
             ORDER BY created_at DESC, id ASC
             LIMIT ?2;"
        ))?;
        let mut rows = stmt.query(params![user_id.to_string(), limit])?;
        let mut bookings = Vec::new();
        while let Some(row) = rows.next()? {
            bookings.push(booking_from_row(row)?);
        }
        Ok(bookings)
    }

    pub fn list_all(&self) -> Result<Vec<Booking>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings ORDER BY created_at ASC, id ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut bookings = Vec::new();
        while let Some(row) = rows.next()? {
            bookings.push(booking_from_row(row)?);
        }
        Ok(bookings)
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM bookings;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn booking_from_row(row: &rusqlite::Row<'_>) -> Result<Booking> {
    Ok(Booking {
        id: parse_id(row.get(0)?)?,
        user_id: parse_id(row.get(1)?)?,
        vehicle_id: parse_id(row.get(2)?)?,
        vehicle_type: row.get(3)?,
        status: row.get(4)?,
        start_at: row.get(5)?,
        end_at: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn parse_id<T: FromStr>(raw: String) -> Result<T> {
    T::from_str(&raw).map_err(|_| StoreError::InvalidId(raw.clone()))
}
