use crate::error::{Result, StoreError};
use fleetdiag_core::domain::{normalize_email, User, UserId};
use rusqlite::{params, Connection, OptionalExtension};
use std::str::FromStr;

const USER_COLUMNS: &str = "id, email, full_name, phone, created_at";

pub struct UsersRepo<'a> {
    conn: &'a Connection,
}

#[derive(Debug, Clone)]
pub struct UserNew {
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
}

impl<'a> UsersRepo<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, now_utc: i64, input: UserNew) -> Result<User> {
        let user = User {
            id: UserId::new(),
            email: normalize_email(&input.email)?,
            full_name: input.full_name.trim().to_string(),
            phone: input.phone,
            created_at: now_utc,
        };
        self.conn.execute(
            "INSERT INTO users (id, email, full_name, phone, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                user.id.to_string(),
                user.email,
                user.full_name,
                user.phone,
                user.created_at
            ],
        )?;
        Ok(user)
    }

    pub fn get(&self, id: UserId) -> Result<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1;");
        self.conn
            .query_row(&sql, [id.to_string()], user_from_row)
            .optional()?
            .transpose()
    }

    /// Matches case-insensitively on the trimmed address.
    pub fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = normalize_email(email)?;
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE lower(trim(email)) = ?1;");
        self.conn
            .query_row(&sql, [email], user_from_row)
            .optional()?
            .transpose()
    }

    pub fn count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM users;", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn user_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Result<User>> {
    let id_str: String = row.get(0)?;
    let email: String = row.get(1)?;
    let full_name: String = row.get(2)?;
    let phone: Option<String> = row.get(3)?;
    let created_at: i64 = row.get(4)?;
    Ok(UserId::from_str(&id_str)
        .map_err(|_| StoreError::InvalidId(id_str.clone()))
        .map(|id| User {
            id,
            email,
            full_name,
            phone,
            created_at,
        }))
}
