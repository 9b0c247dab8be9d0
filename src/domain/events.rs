use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::{Availability, ItemId};

/// 貸出期間（日数）
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// 貸出の付随情報
///
/// 資料そのものの状態ではなく、貸出遷移イベントの属性として扱う。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDetails {
    pub borrower: Option<String>,
    pub loaned_at: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
}

impl LoanDetails {
    /// 貸出日から返却期限（14日後）を計算する
    pub fn starting_at(borrower: Option<String>, loaned_at: DateTime<Utc>) -> Self {
        Self {
            borrower,
            loaned_at,
            due_date: loaned_at + Duration::days(LOAN_PERIOD_DAYS),
        }
    }

    /// 純粋関数：延滞判定
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        now > self.due_date
    }

    /// 延滞日数（延滞していなければ0）
    pub fn days_overdue(&self, now: DateTime<Utc>) -> i64 {
        if !self.is_overdue(now) {
            return 0;
        }
        (now - self.due_date).num_days()
    }
}

/// イベント：資料の貸出状態が変わった
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityChanged {
    pub item_id: Option<ItemId>,
    pub from: Availability,
    pub to: Availability,
    pub occurred_at: DateTime<Utc>,
    /// 貸出遷移のときのみ値を持つ
    pub loan: Option<LoanDetails>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loan_details_due_date_is_fourteen_days_later() {
        let loaned_at = Utc::now();
        let details = LoanDetails::starting_at(Some("Ana".to_string()), loaned_at);
        assert_eq!(details.due_date, loaned_at + Duration::days(14));
    }

    #[test]
    fn test_is_overdue_false_before_due_date() {
        let loaned_at = Utc::now();
        let details = LoanDetails::starting_at(None, loaned_at);

        assert!(!details.is_overdue(loaned_at + Duration::days(13)));
        assert_eq!(details.days_overdue(loaned_at + Duration::days(13)), 0);
    }

    #[test]
    fn test_days_overdue_after_due_date() {
        let loaned_at = Utc::now();
        let details = LoanDetails::starting_at(None, loaned_at);
        let now = loaned_at + Duration::days(17) + Duration::hours(3);

        assert!(details.is_overdue(now));
        assert_eq!(details.days_overdue(now), 3);
    }
}
