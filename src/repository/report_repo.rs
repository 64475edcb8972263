// ==========================================
// Billing Hub - reporting queries
// ==========================================
// Read-only aggregations over the imported data. The joins are LEFT
// (or INNER where the report is about existing invoices), so orphan
// transaction/invoice rows simply fall out of the per-user views.
// ==========================================

use crate::domain::{BilledAmountByUser, PendingInvoiceUser, TransactionsByUser};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

pub struct ReportRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReportRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// Transaction count per user, busiest first.
    pub fn transactions_by_user(&self) -> RepositoryResult<Vec<TransactionsByUser>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT u.Id_user, u.users_name, COUNT(t.Transaction_identification) AS total_transactions
            FROM users u
            LEFT JOIN transactions t ON u.Id_user = t.Id_user
            GROUP BY u.Id_user, u.users_name
            ORDER BY total_transactions DESC
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TransactionsByUser {
                    id_user: row.get(0)?,
                    users_name: row.get(1)?,
                    total_transactions: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Billed total per user, highest first. Users without invoices get a
    /// NULL total, matching the SQL SUM over an empty group.
    pub fn billed_amount_by_user(&self) -> RepositoryResult<Vec<BilledAmountByUser>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT u.Id_user, u.users_name, SUM(i.Billed_Amount) AS total_billed
            FROM users u
            LEFT JOIN invoices i ON u.Id_user = i.Id_user
            GROUP BY u.Id_user, u.users_name
            ORDER BY total_billed DESC
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(BilledAmountByUser {
                    id_user: row.get(0)?,
                    users_name: row.get(1)?,
                    total_billed: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Users holding at least one invoice with an outstanding balance.
    pub fn users_with_pending_invoices(&self) -> RepositoryResult<Vec<PendingInvoiceUser>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT DISTINCT u.Id_user, u.users_name, u.Email
            FROM users u
            INNER JOIN invoices i ON u.Id_user = i.Id_user
            WHERE i.Amount_Paid < i.Billed_Amount
            "#,
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(PendingInvoiceUser {
                    id_user: row.get(0)?,
                    users_name: row.get(1)?,
                    email: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}
