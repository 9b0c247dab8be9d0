use crate::domain::{Availability, AvailabilityChanged, Item, ItemId, LoanDetails};
use crate::ports::catalog_subscriber::{CatalogSubscriber, Result};
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use std::sync::{PoisonError, RwLock};

/// 延滞中の貸出
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverdueLoan {
    pub item_id: ItemId,
    pub loan: LoanDetails,
    pub days_overdue: i64,
}

/// 貸出中の資料ごとの貸出情報を保持する購読者
///
/// 貸出通知で登録し、返却通知で取り除く。プロセス内のみで永続化はしないため、
/// 再起動前に貸し出された資料の情報は持たない。
#[derive(Debug, Default)]
pub struct LoanRegister {
    loans: RwLock<IndexMap<ItemId, LoanDetails>>,
}

impl LoanRegister {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_loan(&self, item_id: ItemId) -> Option<LoanDetails> {
        self.loans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&item_id)
            .cloned()
    }

    pub fn active_loans(&self) -> usize {
        self.loans.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// 指定時点で返却期限を過ぎている貸出（貸出順）
    pub fn overdue(&self, now: DateTime<Utc>) -> Vec<OverdueLoan> {
        self.loans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|(_, loan)| loan.is_overdue(now))
            .map(|(item_id, loan)| OverdueLoan {
                item_id: *item_id,
                loan: loan.clone(),
                days_overdue: loan.days_overdue(now),
            })
            .collect()
    }
}

impl CatalogSubscriber for LoanRegister {
    fn name(&self) -> &str {
        "loan-register"
    }

    fn on_item_admitted(&self, _item: &Item) -> Result<()> {
        Ok(())
    }

    fn on_availability_changed(&self, item: &Item, change: &AvailabilityChanged) -> Result<()> {
        let item_id = change
            .item_id
            .or(item.id())
            .ok_or("availability change for an unsaved item")?;

        let mut loans = self.loans.write().unwrap_or_else(PoisonError::into_inner);
        match (change.to, &change.loan) {
            (Availability::Loaned, Some(loan)) => {
                loans.insert(item_id, loan.clone());
            }
            (Availability::Loaned, None) => {
                return Err(format!("loan of {} carries no loan details", item_id).into());
            }
            (Availability::Available, _) => {
                loans.shift_remove(&item_id);
            }
        }
        Ok(())
    }
}
