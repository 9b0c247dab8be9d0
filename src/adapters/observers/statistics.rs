use crate::domain::{Availability, AvailabilityChanged, Item};
use crate::ports::catalog_subscriber::{CatalogSubscriber, Result};
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

/// 活動件数のスナップショット
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ActivitySnapshot {
    pub admitted: u64,
    pub loans: u64,
    pub returns: u64,
}

/// 登録・貸出・返却の件数を数える購読者
///
/// プロセス内の累計のみ。永続化はしない。
#[derive(Debug, Default)]
pub struct StatisticsObserver {
    admitted: AtomicU64,
    loans: AtomicU64,
    returns: AtomicU64,
}

impl StatisticsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> ActivitySnapshot {
        ActivitySnapshot {
            admitted: self.admitted.load(Ordering::Relaxed),
            loans: self.loans.load(Ordering::Relaxed),
            returns: self.returns.load(Ordering::Relaxed),
        }
    }
}

impl CatalogSubscriber for StatisticsObserver {
    fn name(&self) -> &str {
        "statistics"
    }

    fn on_item_admitted(&self, _item: &Item) -> Result<()> {
        self.admitted.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    fn on_availability_changed(&self, _item: &Item, change: &AvailabilityChanged) -> Result<()> {
        match change.to {
            Availability::Loaned => self.loans.fetch_add(1, Ordering::Relaxed),
            Availability::Available => self.returns.fetch_add(1, Ordering::Relaxed),
        };
        Ok(())
    }
}
