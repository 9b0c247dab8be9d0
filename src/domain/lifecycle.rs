//! 資料の貸出状態を管理する状態機械
//!
//! ```text
//! Available --loan--> Loaned --return--> Available
//! ```
//!
//! 遷移関数はすべて純粋関数。入力の資料は借用のみで変更せず、
//! 成功時に新しい資料と遷移イベントを返す。失敗時はイベントを返さない。

use chrono::{DateTime, Utc};

use super::{Availability, AvailabilityChanged, Item, LifecycleError, LoanDetails};

/// 純粋関数：資料を貸し出す
///
/// ビジネスルール：
/// - Available状態からのみ貸出可能
/// - 返却期限は貸出日から14日後
///
/// 副作用なし。新しいItemとイベントを返す。
pub fn loan_item(
    item: &Item,
    borrower: Option<String>,
    loaned_at: DateTime<Utc>,
) -> Result<(Item, AvailabilityChanged), LifecycleError> {
    if !item.availability.is_available() {
        return Err(LifecycleError::NotAvailable {
            title: item.title.clone(),
        });
    }

    let loan = LoanDetails::starting_at(borrower, loaned_at);
    let (loaned, event) = transition(item, Availability::Loaned, loaned_at);

    Ok((
        loaned,
        AvailabilityChanged {
            loan: Some(loan),
            ..event
        },
    ))
}

/// 純粋関数：資料を返却する
///
/// ビジネスルール：
/// - Loaned状態からのみ返却可能
///
/// 副作用なし。新しいItemとイベントを返す。
pub fn return_item(
    item: &Item,
    returned_at: DateTime<Utc>,
) -> Result<(Item, AvailabilityChanged), LifecycleError> {
    if !item.availability.is_loaned() {
        return Err(LifecycleError::NotLoaned {
            title: item.title.clone(),
        });
    }

    Ok(transition(item, Availability::Available, returned_at))
}

/// 純粋関数：削除可能か判定する
///
/// 貸出中の資料は削除できない。
pub fn ensure_removable(item: &Item) -> Result<(), LifecycleError> {
    if item.availability.is_loaned() {
        return Err(LifecycleError::RemovalWhileLoaned {
            title: item.title.clone(),
        });
    }
    Ok(())
}

fn transition(item: &Item, to: Availability, at: DateTime<Utc>) -> (Item, AvailabilityChanged) {
    let next = Item {
        availability: to,
        updated_at: at,
        ..item.clone()
    };

    let event = AvailabilityChanged {
        item_id: item.id,
        from: item.availability,
        to,
        occurred_at: at,
        loan: None,
    };

    (next, event)
}
