// Small dev utility: sanity-check an import by printing per-table row
// counts, the number of orphan transaction/invoice rows (rows whose
// Id_user has no matching user - tolerated, but worth knowing about),
// and a few sample rows per table.
//
// Usage:
//   cargo run --bin verify_import -- [db_path]

use billing_hub::db::{init_schema, open_sqlite_connection};
use billing_hub::domain::{Invoice, TransactionRecord, User};
use billing_hub::settings::Settings;
use rusqlite::Connection;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| Settings::from_env().db_path);

    let conn = open_sqlite_connection(&db_path)?;
    // a fresh database should report zeros, not "no such table"
    init_schema(&conn)?;

    println!("verifying import in {}", db_path);
    println!("users:        {}", count(&conn, "SELECT COUNT(*) FROM users")?);
    println!(
        "transactions: {}",
        count(&conn, "SELECT COUNT(*) FROM transactions")?
    );
    println!(
        "invoices:     {}",
        count(&conn, "SELECT COUNT(*) FROM invoices")?
    );

    let orphan_transactions = count(
        &conn,
        "SELECT COUNT(*) FROM transactions t \
         LEFT JOIN users u ON t.Id_user = u.Id_user \
         WHERE t.Id_user IS NOT NULL AND u.Id_user IS NULL",
    )?;
    let orphan_invoices = count(
        &conn,
        "SELECT COUNT(*) FROM invoices i \
         LEFT JOIN users u ON i.Id_user = u.Id_user \
         WHERE i.Id_user IS NOT NULL AND u.Id_user IS NULL",
    )?;
    println!("orphan transactions: {}", orphan_transactions);
    println!("orphan invoices:     {}", orphan_invoices);

    println!("\nsample rows:");
    print_samples("users", sample_users(&conn)?)?;
    print_samples("transactions", sample_transactions(&conn)?)?;
    print_samples("invoices", sample_invoices(&conn)?)?;

    Ok(())
}

fn count(conn: &Connection, sql: &str) -> rusqlite::Result<i64> {
    conn.query_row(sql, [], |row| row.get(0))
}

fn print_samples<T: serde::Serialize>(
    table: &str,
    rows: Vec<T>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("  {}: {}", table, serde_json::to_string(&rows)?);
    Ok(())
}

fn sample_users(conn: &Connection) -> rusqlite::Result<Vec<User>> {
    let mut stmt = conn.prepare(
        "SELECT Id_user, users_name, Identification_Number, Address, Phone, Email \
         FROM users LIMIT 3",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(User {
            id_user: row.get(0)?,
            users_name: row.get(1)?,
            identification_number: row.get(2)?,
            address: row.get(3)?,
            phone: row.get(4)?,
            email: row.get(5)?,
        })
    })?;
    rows.collect()
}

fn sample_transactions(conn: &Connection) -> rusqlite::Result<Vec<TransactionRecord>> {
    let mut stmt = conn.prepare(
        "SELECT Transaction_identification, Id_user, Date_and_Time_of_the_Transaction, \
                Transaction_Amount, Transaction_Status, Transaction_Type \
         FROM transactions LIMIT 3",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(TransactionRecord {
            transaction_identification: row.get(0)?,
            id_user: row.get(1)?,
            transaction_datetime: row.get(2)?,
            amount: row.get(3)?,
            status: row.get(4)?,
            transaction_type: row.get(5)?,
        })
    })?;
    rows.collect()
}

fn sample_invoices(conn: &Connection) -> rusqlite::Result<Vec<Invoice>> {
    let mut stmt = conn.prepare(
        "SELECT invoice_id, Id_user, Used_Platform, Invoice_Number, Billing_Period, \
                Billed_Amount, Amount_Paid, Transaction_identification \
         FROM invoices LIMIT 3",
    )?;
    let rows = stmt.query_map([], |row| {
        Ok(Invoice {
            invoice_id: row.get(0)?,
            id_user: row.get(1)?,
            used_platform: row.get(2)?,
            invoice_number: row.get(3)?,
            billing_period: row.get(4)?,
            billed_amount: row.get(5)?,
            amount_paid: row.get(6)?,
            transaction_identification: row.get(7)?,
        })
    })?;
    rows.collect()
}
