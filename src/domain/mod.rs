// ==========================================
// Billing Hub - domain model layer
// ==========================================

pub mod billing;
pub mod import;

pub use billing::{
    BilledAmountByUser, Invoice, NewUser, PendingInvoiceUser, TransactionRecord,
    TransactionsByUser, UpdateUser, User,
};
pub use import::FileImportStats;
