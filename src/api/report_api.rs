// ==========================================
// Billing Hub - reporting API
// ==========================================

use crate::api::error::ApiResult;
use crate::domain::{BilledAmountByUser, PendingInvoiceUser, TransactionsByUser};
use crate::repository::ReportRepository;
use std::sync::Arc;

pub struct ReportApi {
    report_repo: Arc<ReportRepository>,
}

impl ReportApi {
    pub fn new(report_repo: Arc<ReportRepository>) -> Self {
        Self { report_repo }
    }

    pub async fn transactions_by_user(&self) -> ApiResult<Vec<TransactionsByUser>> {
        Ok(self.report_repo.transactions_by_user()?)
    }

    pub async fn billed_amount_by_user(&self) -> ApiResult<Vec<BilledAmountByUser>> {
        Ok(self.report_repo.billed_amount_by_user()?)
    }

    pub async fn pending_invoices(&self) -> ApiResult<Vec<PendingInvoiceUser>> {
        Ok(self.report_repo.users_with_pending_invoices()?)
    }
}
