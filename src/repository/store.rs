// ==========================================
// Billing Hub - the billing store handle
// ==========================================
// An explicitly constructed, explicitly passed handle over the SQLite
// connection. The importer consumes it only through the narrow
// StatementExecutor trait, which keeps the pipeline testable with an
// injected fake store.
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// The single operation the import pipeline needs from a store: execute
/// one statement and report how many rows changed. An idempotent insert
/// that hits an existing primary key reports 0.
#[async_trait]
pub trait StatementExecutor: Send + Sync {
    async fn execute(&self, sql: &str, params: Vec<Value>) -> RepositoryResult<usize>;
}

/// Handle over the billing database.
///
/// Clones share one underlying connection; statements are serialized
/// through a mutex, which is the bound on concurrent store operations.
/// The handle is opened once at startup and closed by the caller after
/// the last operation (see [`BillingStore::close`]).
#[derive(Clone)]
pub struct BillingStore {
    conn: Arc<Mutex<Connection>>,
}

impl BillingStore {
    /// Open the store and ensure the billing schema exists.
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Share the underlying connection with a repository.
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Explicitly close the store.
    ///
    /// When other handles (clones or repositories) are still alive the
    /// connection stays open until the last of them drops; the call is
    /// then a no-op rather than an error, so shutdown paths can always
    /// call it unconditionally.
    pub fn close(self) -> RepositoryResult<()> {
        match Arc::try_unwrap(self.conn) {
            Ok(mutex) => {
                let conn = mutex
                    .into_inner()
                    .map_err(|e| RepositoryError::LockError(e.to_string()))?;
                conn.close()
                    .map_err(|(_, e)| RepositoryError::DatabaseConnectionError(e.to_string()))
            }
            Err(_) => Ok(()),
        }
    }
}

#[async_trait]
impl StatementExecutor for BillingStore {
    async fn execute(&self, sql: &str, params: Vec<Value>) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let changed = conn.execute(sql, rusqlite::params_from_iter(params))?;
        Ok(changed)
    }
}
