// ==========================================
// Billing Hub - billing entities
// ==========================================
// The serialized field names equal the database column names (which in
// turn equal the CSV headers), so rows travel from file to store to HTTP
// response under a single vocabulary.
// ==========================================

use serde::{Deserialize, Serialize};

/// A billing account holder. Created by import or by the users CRUD
/// surface; the identifier is always externally supplied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "Id_user")]
    pub id_user: i64,
    #[serde(rename = "users_name")]
    pub users_name: Option<String>,
    #[serde(rename = "Identification_Number")]
    pub identification_number: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "Phone")]
    pub phone: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
}

/// Payload for creating a user through the CRUD surface.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    #[serde(rename = "Id_user")]
    pub id_user: i64,
    #[serde(rename = "users_name", default)]
    pub users_name: Option<String>,
    #[serde(rename = "Identification_Number", default)]
    pub identification_number: Option<String>,
    #[serde(rename = "Address", default)]
    pub address: Option<String>,
    #[serde(rename = "Phone", default)]
    pub phone: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
}

/// Payload for the user update endpoint. Both fields are required there;
/// the route layer rejects requests missing either one.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUser {
    #[serde(rename = "users_name", default)]
    pub users_name: Option<String>,
    #[serde(rename = "Email", default)]
    pub email: Option<String>,
}

/// A money movement tied to a user. Import-only: there is no CRUD
/// mutation path for transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde(rename = "Transaction_identification")]
    pub transaction_identification: String,
    #[serde(rename = "Id_user")]
    pub id_user: Option<i64>,
    /// Canonical `YYYY-MM-DD HH:MM:SS`, no timezone suffix.
    #[serde(rename = "Date_and_Time_of_the_Transaction")]
    pub transaction_datetime: Option<String>,
    #[serde(rename = "Transaction_Amount")]
    pub amount: f64,
    #[serde(rename = "Transaction_Status")]
    pub status: Option<String>,
    #[serde(rename = "Transaction_Type")]
    pub transaction_type: Option<String>,
}

/// A billed period for a user. Import-only, like transactions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    #[serde(rename = "invoice_id")]
    pub invoice_id: i64,
    #[serde(rename = "Id_user")]
    pub id_user: Option<i64>,
    #[serde(rename = "Used_Platform")]
    pub used_platform: Option<String>,
    #[serde(rename = "Invoice_Number")]
    pub invoice_number: Option<String>,
    /// Full date; a bare `YYYY-MM` is anchored to the first of the month
    /// at import time.
    #[serde(rename = "Billing_Period")]
    pub billing_period: Option<String>,
    #[serde(rename = "Billed_Amount")]
    pub billed_amount: f64,
    #[serde(rename = "Amount_Paid")]
    pub amount_paid: f64,
    #[serde(rename = "Transaction_identification")]
    pub transaction_identification: Option<String>,
}

// ==========================================
// Report rows
// ==========================================

/// Per-user transaction count (left join, so users without transactions
/// appear with zero).
#[derive(Debug, Clone, Serialize)]
pub struct TransactionsByUser {
    #[serde(rename = "Id_user")]
    pub id_user: i64,
    #[serde(rename = "users_name")]
    pub users_name: Option<String>,
    pub total_transactions: i64,
}

/// Per-user billed total. `None` when the user has no invoices.
#[derive(Debug, Clone, Serialize)]
pub struct BilledAmountByUser {
    #[serde(rename = "Id_user")]
    pub id_user: i64,
    #[serde(rename = "users_name")]
    pub users_name: Option<String>,
    pub total_billed: Option<f64>,
}

/// A user with at least one invoice where the paid amount is below the
/// billed amount.
#[derive(Debug, Clone, Serialize)]
pub struct PendingInvoiceUser {
    #[serde(rename = "Id_user")]
    pub id_user: i64,
    #[serde(rename = "users_name")]
    pub users_name: Option<String>,
    #[serde(rename = "Email")]
    pub email: Option<String>,
}
