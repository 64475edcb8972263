// ==========================================
// Billing Hub - user repository
// ==========================================
// CRUD over the users table. Users are the only entity with a mutation
// path outside the import pipeline.
// ==========================================

use crate::domain::{NewUser, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};

pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    pub fn list(&self) -> RepositoryResult<Vec<User>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT Id_user, users_name, Identification_Number, Address, Phone, Email \
             FROM users ORDER BY Id_user",
        )?;
        let users = stmt
            .query_map([], map_user_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(users)
    }

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            "SELECT Id_user, users_name, Identification_Number, Address, Phone, Email \
             FROM users WHERE Id_user = ?1",
        )?;
        let mut rows = stmt.query_map(params![id], map_user_row)?;
        match rows.next() {
            Some(user) => Ok(Some(user?)),
            None => Ok(None),
        }
    }

    pub fn create(&self, user: &NewUser) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO users (Id_user, users_name, Identification_Number, Address, Phone, Email) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.id_user,
                user.users_name,
                user.identification_number,
                user.address,
                user.phone,
                user.email,
            ],
        )?;
        Ok(())
    }

    /// Update the mutable contact fields of a user.
    pub fn update_contact(&self, id: i64, users_name: &str, email: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "UPDATE users SET users_name = ?1, Email = ?2 WHERE Id_user = ?3",
            params![users_name, email, id],
        )?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "User".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }

    pub fn delete(&self, id: i64) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM users WHERE Id_user = ?1", params![id])?;
        if affected == 0 {
            return Err(RepositoryError::NotFound {
                entity: "User".to_string(),
                id: id.to_string(),
            });
        }
        Ok(())
    }
}

fn map_user_row(row: &Row<'_>) -> rusqlite::Result<User> {
    Ok(User {
        id_user: row.get(0)?,
        users_name: row.get(1)?,
        identification_number: row.get(2)?,
        address: row.get(3)?,
        phone: row.get(4)?,
        email: row.get(5)?,
    })
}
