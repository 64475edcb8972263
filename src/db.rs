// ==========================================
// Billing Hub - SQLite connection setup
// ==========================================
// Goals:
// - one place for Connection::open + PRAGMA behavior, so every module
//   gets the same busy_timeout instead of ad-hoc settings
// - one place for the target schema of the three import tables
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// Default busy_timeout (milliseconds)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// Apply the shared PRAGMA configuration to a connection.
///
/// busy_timeout must be configured per connection.
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// Open a SQLite connection with the shared configuration applied.
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// Create the three billing tables if they do not exist yet.
///
/// Schema notes:
/// - column names equal the CSV header names, so the import statements and
///   the HTTP payloads use one vocabulary;
/// - `users` and `invoices` are WITHOUT ROWID: their integer primary keys
///   are externally supplied, and a NULL key must fail the NOT NULL
///   constraint instead of being replaced with an auto-assigned rowid;
/// - `Id_user` on transactions/invoices is an advisory reference only.
///   Orphan rows are allowed to exist, so no FOREIGN KEY clause is declared.
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            Id_user                 INTEGER NOT NULL PRIMARY KEY,
            users_name              TEXT,
            Identification_Number   TEXT,
            Address                 TEXT,
            Phone                   TEXT,
            Email                   TEXT
        ) WITHOUT ROWID;

        CREATE TABLE IF NOT EXISTS transactions (
            Transaction_identification          TEXT NOT NULL PRIMARY KEY,
            Id_user                             INTEGER,
            Date_and_Time_of_the_Transaction    TEXT,
            Transaction_Amount                  REAL NOT NULL DEFAULT 0,
            Transaction_Status                  TEXT,
            Transaction_Type                    TEXT
        );

        CREATE TABLE IF NOT EXISTS invoices (
            invoice_id                  INTEGER NOT NULL PRIMARY KEY,
            Id_user                     INTEGER,
            Used_Platform               TEXT,
            Invoice_Number              TEXT,
            Billing_Period              TEXT,
            Billed_Amount               REAL NOT NULL DEFAULT 0,
            Amount_Paid                 REAL NOT NULL DEFAULT 0,
            Transaction_identification  TEXT
        ) WITHOUT ROWID;

        -- the per-user reports join on Id_user; keep those scans fast
        CREATE INDEX IF NOT EXISTS idx_transactions_user ON transactions(Id_user);
        CREATE INDEX IF NOT EXISTS idx_invoices_user ON invoices(Id_user);
        "#,
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name IN ('users','transactions','invoices')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn test_users_null_primary_key_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();

        // WITHOUT ROWID: a NULL key must not be silently auto-assigned
        let result = conn.execute(
            "INSERT INTO users (Id_user, users_name) VALUES (NULL, 'ghost')",
            [],
        );
        assert!(result.is_err());
    }
}
