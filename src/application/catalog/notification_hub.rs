use crate::domain::{AvailabilityChanged, Item};
use crate::ports::CatalogSubscriber;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::{Arc, PoisonError, RwLock};

/// 1回の配信結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// ハンドラーが正常終了した購読者数
    pub delivered: usize,
    /// エラーを返した、またはpanicした購読者数
    pub failed: usize,
}

/// 通知ハブ（publish/subscribe）
///
/// 購読者は登録順に保持される。同じ購読者の重複登録も許容する。
///
/// 配信は呼び出し元のスレッドで同期的に行う。配信開始時にレジストリの
/// スナップショットを取ってからロックを解放するため、配信中の
/// subscribe / unsubscribe は進行中の配信に影響しない。
/// ハンドラーの失敗（エラーまたはpanic）はログに記録して次の購読者へ進む。
#[derive(Default)]
pub struct NotificationHub {
    subscribers: RwLock<Vec<Arc<dyn CatalogSubscriber>>>,
}

impl NotificationHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// 購読者を末尾に追加する
    pub fn subscribe(&self, subscriber: Arc<dyn CatalogSubscriber>) {
        tracing::debug!(subscriber = subscriber.name(), "subscriber registered");
        self.subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(subscriber);
    }

    /// 同一インスタンス（ポインタ同一性）の最初の登録を取り除く
    ///
    /// # 戻り値
    /// 登録が見つかった場合はtrue
    pub fn unsubscribe(&self, subscriber: &Arc<dyn CatalogSubscriber>) -> bool {
        let mut subscribers = self
            .subscribers
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let position = subscribers
            .iter()
            .position(|registered| std::ptr::addr_eq(Arc::as_ptr(registered), Arc::as_ptr(subscriber)));

        match position {
            Some(index) => {
                subscribers.remove(index);
                tracing::debug!(subscriber = subscriber.name(), "subscriber removed");
                true
            }
            None => false,
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// 登録通知を全購読者へ配信する
    pub fn publish_admitted(&self, item: &Item) -> DeliveryReport {
        self.deliver("item_admitted", |subscriber| {
            subscriber.on_item_admitted(item)
        })
    }

    /// 状態変化通知を全購読者へ配信する
    pub fn publish_state_changed(&self, item: &Item, change: &AvailabilityChanged) -> DeliveryReport {
        self.deliver("availability_changed", |subscriber| {
            subscriber.on_availability_changed(item, change)
        })
    }

    fn snapshot(&self) -> Vec<Arc<dyn CatalogSubscriber>> {
        self.subscribers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn deliver<F>(&self, event: &'static str, handler: F) -> DeliveryReport
    where
        F: Fn(&dyn CatalogSubscriber) -> crate::ports::catalog_subscriber::Result<()>,
    {
        let mut report = DeliveryReport::default();

        for subscriber in self.snapshot() {
            let outcome = catch_unwind(AssertUnwindSafe(|| handler(subscriber.as_ref())));

            match outcome {
                Ok(Ok(())) => report.delivered += 1,
                Ok(Err(e)) => {
                    report.failed += 1;
                    tracing::warn!(
                        subscriber = subscriber.name(),
                        event,
                        error = %e,
                        "subscriber failed to handle notification"
                    );
                }
                Err(_) => {
                    report.failed += 1;
                    tracing::warn!(
                        subscriber = subscriber.name(),
                        event,
                        "subscriber panicked while handling notification"
                    );
                }
            }
        }

        report
    }
}

impl std::fmt::Debug for NotificationHub {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationHub")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}
