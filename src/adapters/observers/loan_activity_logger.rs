use crate::domain::{AvailabilityChanged, Item};
use crate::ports::catalog_subscriber::{CatalogSubscriber, Result};

/// 登録・貸出・返却を構造化ログとして出力する購読者
#[derive(Debug, Default, Clone, Copy)]
pub struct LoanActivityLogger;

impl LoanActivityLogger {
    pub fn new() -> Self {
        Self
    }
}

impl CatalogSubscriber for LoanActivityLogger {
    fn name(&self) -> &str {
        "loan-activity-logger"
    }

    fn on_item_admitted(&self, item: &Item) -> Result<()> {
        tracing::info!(
            item_id = ?item.id(),
            title = item.title(),
            author = item.author(),
            category = item.category().as_str(),
            medium = item.medium().as_str(),
            "new item in catalog"
        );
        Ok(())
    }

    fn on_availability_changed(&self, item: &Item, change: &AvailabilityChanged) -> Result<()> {
        match &change.loan {
            Some(loan) => tracing::info!(
                item_id = ?item.id(),
                title = item.title(),
                borrower = loan.borrower.as_deref().unwrap_or("-"),
                due_date = %loan.due_date.format("%Y-%m-%d"),
                "item loaned"
            ),
            None => tracing::info!(
                item_id = ?item.id(),
                title = item.title(),
                from = change.from.as_str(),
                to = change.to.as_str(),
                "availability changed"
            ),
        }
        Ok(())
    }
}
