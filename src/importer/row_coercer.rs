// ==========================================
// Billing Hub - row coercion rules
// ==========================================
// One strategy table keyed by record kind: each kind carries its insert
// statement and the field-level coercion rules that turn raw CSV text into
// typed parameters. The kind is resolved once per file, never per row.
// ==========================================

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use rusqlite::types::Value;
use std::collections::HashMap;

/// Sentinel for transactions imported without a status.
pub const DEFAULT_TRANSACTION_STATUS: &str = "Earring";

/// Sentinel for transactions imported without a type.
pub const DEFAULT_TRANSACTION_TYPE: &str = "Bill Payment";

/// Canonical form for transaction timestamps: seconds granularity,
/// space-separated, no timezone suffix.
const CANONICAL_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// The three record shapes this system imports. There is no schema
/// discovery: anything not in this registry is not importable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Users,
    Transactions,
    Invoices,
}

impl RecordKind {
    /// Resolve a file name to its target record kind.
    pub fn for_file(file_name: &str) -> Option<Self> {
        match file_name {
            "users.csv" => Some(Self::Users),
            "transaction.csv" => Some(Self::Transactions),
            "invoice_data.csv" => Some(Self::Invoices),
            _ => None,
        }
    }

    pub fn table(&self) -> &'static str {
        match self {
            Self::Users => "users",
            Self::Transactions => "transactions",
            Self::Invoices => "invoices",
        }
    }

    /// Idempotent insert statement for this kind.
    ///
    /// The ON CONFLICT clause is scoped to the primary key: re-importing a
    /// row with a known key is a silent no-op (0 rows changed), while any
    /// other constraint violation still fails that row.
    pub fn insert_sql(&self) -> &'static str {
        match self {
            Self::Users => {
                r#"INSERT INTO users (Id_user, users_name, Identification_Number, Address, Phone, Email)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                   ON CONFLICT(Id_user) DO NOTHING"#
            }
            Self::Transactions => {
                r#"INSERT INTO transactions (Transaction_identification, Id_user, Date_and_Time_of_the_Transaction, Transaction_Amount, Transaction_Status, Transaction_Type)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                   ON CONFLICT(Transaction_identification) DO NOTHING"#
            }
            Self::Invoices => {
                r#"INSERT INTO invoices (invoice_id, Id_user, Used_Platform, Invoice_Number, Billing_Period, Billed_Amount, Amount_Paid, Transaction_identification)
                   VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                   ON CONFLICT(invoice_id) DO NOTHING"#
            }
        }
    }

    /// Coerce one raw row into the positional parameters of
    /// [`Self::insert_sql`].
    ///
    /// Best-effort by contract: no I/O, and malformed input never raises
    /// here. A value that cannot satisfy the target schema surfaces later
    /// as that row's insert failure.
    pub fn coerce(&self, row: &HashMap<String, String>) -> Vec<Value> {
        match self {
            Self::Users => vec![
                integer(row, "Id_user"),
                text(row, "users_name"),
                text(row, "Identification_Number"),
                text(row, "Address"),
                text(row, "Phone"),
                text(row, "Email"),
            ],
            Self::Transactions => vec![
                text(row, "Transaction_identification"),
                integer(row, "Id_user"),
                transaction_timestamp(row, "Date_and_Time_of_the_Transaction"),
                amount(row, "Transaction_Amount"),
                text_or(row, "Transaction_Status", DEFAULT_TRANSACTION_STATUS),
                text_or(row, "Transaction_Type", DEFAULT_TRANSACTION_TYPE),
            ],
            Self::Invoices => vec![
                integer(row, "invoice_id"),
                integer(row, "Id_user"),
                text(row, "Used_Platform"),
                text(row, "Invoice_Number"),
                billing_period(row, "Billing_Period"),
                amount(row, "Billed_Amount"),
                amount(row, "Amount_Paid"),
                text(row, "Transaction_identification"),
            ],
        }
    }
}

// ==========================================
// Field-level rules
// ==========================================

/// A field counts as present when it is non-empty after trimming.
fn raw<'a>(row: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    row.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Free text: pass through, absent becomes NULL.
fn text(row: &HashMap<String, String>, key: &str) -> Value {
    match raw(row, key) {
        Some(v) => Value::Text(v.to_string()),
        None => Value::Null,
    }
}

/// Free text with a fixed sentinel default.
fn text_or(row: &HashMap<String, String>, key: &str, default: &str) -> Value {
    Value::Text(raw(row, key).unwrap_or(default).to_string())
}

/// Integer identifier: absent or unparseable becomes NULL, never zero.
fn integer(row: &HashMap<String, String>, key: &str) -> Value {
    match raw(row, key).and_then(|v| v.parse::<i64>().ok()) {
        Some(n) => Value::Integer(n),
        None => Value::Null,
    }
}

/// Decimal amount: absent or unparseable becomes 0, never NULL.
fn amount(row: &HashMap<String, String>, key: &str) -> Value {
    Value::Real(raw(row, key).and_then(|v| v.parse::<f64>().ok()).unwrap_or(0.0))
}

/// Transaction timestamp: best-effort parse, normalized to the canonical
/// seconds-granularity string; invalid input becomes NULL.
fn transaction_timestamp(row: &HashMap<String, String>, key: &str) -> Value {
    match raw(row, key).and_then(parse_datetime) {
        Some(dt) => Value::Text(dt.format(CANONICAL_DATETIME_FORMAT).to_string()),
        None => Value::Null,
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.naive_utc());
    }
    for format in [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%dT%H:%M:%S",
        "%Y/%m/%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(value, format) {
            return Some(dt);
        }
    }
    // date-only input anchors to midnight
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
}

/// Billing period: a bare year-month is anchored to the first day of the
/// month; anything else (including NULL) passes through unchanged.
fn billing_period(row: &HashMap<String, String>, key: &str) -> Value {
    match raw(row, key) {
        None => Value::Null,
        Some(v) if is_year_month(v) => Value::Text(format!("{}-01", v)),
        Some(v) => Value::Text(v.to_string()),
    }
}

/// `YYYY-MM` shape check, same leniency as the original pattern (the month
/// digits are not range-validated).
fn is_year_month(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 7
        && bytes[..4].iter().all(u8::is_ascii_digit)
        && bytes[4] == b'-'
        && bytes[5..].iter().all(u8::is_ascii_digit)
}
