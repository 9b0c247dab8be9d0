use crate::domain::{
    self, Availability, Item, ItemDraft, ItemId,
    commands::{LoanItem, ReturnItem},
    legacy::LegacyItemRecord,
    search::SearchStrategy,
    validation::{ValidationPipeline, ValidationResult},
};
use crate::ports::ItemRepository;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;

use super::errors::{CatalogError, Result};
use super::notification_hub::NotificationHub;

/// サービスの依存関係
///
/// 関数型DDDの原則に従い、データ構造として定義。
/// 振る舞いは持たず、各ユースケース関数に明示的に渡す。
/// ストアのハンドルは構築時に注入され、その寿命は呼び出し側が管理する。
#[derive(Clone)]
pub struct ServiceDependencies {
    pub item_repository: Arc<dyn ItemRepository>,
    pub notification_hub: Arc<NotificationHub>,
    pub validation_pipeline: Arc<ValidationPipeline>,
}

impl ServiceDependencies {
    /// 標準の検証パイプラインと空の通知ハブで構成する
    pub fn new(item_repository: Arc<dyn ItemRepository>) -> Self {
        Self {
            item_repository,
            notification_hub: Arc::new(NotificationHub::new()),
            validation_pipeline: Arc::new(ValidationPipeline::standard()),
        }
    }
}

/// 登録結果
///
/// 警告は登録を妨げないが、呼び出し側が表示できるよう返す。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Admission {
    pub item: Item,
    pub warnings: Vec<String>,
}

/// カタログの統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CatalogStatistics {
    pub total: u64,
    pub available: u64,
    pub loaned: u64,
}

/// IDで資料を取得するヘルパー関数
///
/// # エラー
/// - NotFound: 資料が存在しない
/// - Store: 読み込み失敗
async fn load_item(repository: &Arc<dyn ItemRepository>, item_id: ItemId) -> Result<Item> {
    repository
        .find_by_id(item_id)
        .await?
        .ok_or(CatalogError::NotFound(item_id))
}

/// 資料を登録する
///
/// ビジネスルール：
/// - 検証パイプライン（タイトル → 著者 → 整合性）をすべて通過すること
/// - 候補の状態がAvailableであること（貸出中での登録は不可）
/// - 同じタイトル・著者の資料が未登録であること
///
/// 保存が成功してから登録通知を配信する。購読者の失敗は登録を取り消さない。
///
/// # 一貫性保証
///
/// 重複確認と保存は1つのトランザクションではない。同時に同じ資料を登録した場合、
/// ストア側の一意制約がなければ重複しうる。
pub async fn admit_item(deps: &ServiceDependencies, draft: ItemDraft) -> Result<Admission> {
    // 1. 検証（全ステージの結果を収集）
    let validation = deps.validation_pipeline.run(&draft);
    if !validation.is_valid() {
        tracing::info!(
            title = %draft.title,
            errors = validation.errors().len(),
            "item rejected by validation"
        );
        return Err(CatalogError::Validation(validation));
    }

    // 2. 初期状態はAvailableのみ（貸出はライフサイクル経由）
    if let Some(availability) = draft.availability.filter(|a| !a.is_available()) {
        return Err(CatalogError::InvalidOperation(format!(
            "Items must be admitted as available, got {}: {}",
            availability, draft.title
        )));
    }

    // 3. 候補から資料を構築
    let item = draft
        .into_builder()
        .build()
        .map_err(|e| CatalogError::Validation(ValidationResult::error(e.to_string())))?;

    // 4. 重複確認
    let duplicate = deps
        .item_repository
        .exists_by_title_and_author(item.title(), item.author())
        .await?;

    if duplicate {
        return Err(CatalogError::InvalidOperation(format!(
            "An item with the same title and author already exists: {} - {}",
            item.title(),
            item.author()
        )));
    }

    // 5. 保存
    let saved = deps.item_repository.save(&item).await?;
    tracing::info!(item_id = ?saved.id(), title = saved.title(), "item admitted");

    // 6. 通知
    deps.notification_hub.publish_admitted(&saved);

    let warnings = validation.warnings().to_vec();
    for warning in &warnings {
        tracing::warn!(item_id = ?saved.id(), warning = %warning, "validation warning");
    }

    Ok(Admission {
        item: saved,
        warnings,
    })
}

/// 旧システムのレコードを取り込む
///
/// 登録規則は `admit_item()` と同じ。貸出中のレコードは登録後に
/// 貸出遷移を適用するため、購読者には登録通知と状態変化通知の両方が届く。
/// 旧レコードは借り手を持たないため、貸出情報の借り手は空になる。
///
/// # 一貫性保証
///
/// 登録と貸出は別々に保存される。貸出が失敗した場合も登録は残り、
/// エラーが返る。
pub async fn import_legacy_item(
    deps: &ServiceDependencies,
    record: &LegacyItemRecord,
) -> Result<Admission> {
    let admission = admit_item(deps, record.to_draft()).await?;

    if !record.availability().is_loaned() {
        return Ok(admission);
    }

    let item_id = admission
        .item
        .id()
        .ok_or_else(|| CatalogError::InvalidOperation("admitted item has no id".to_string()))?;
    let loaned = loan_item(
        deps,
        LoanItem {
            item_id,
            borrower: None,
            loaned_at: Utc::now(),
        },
    )
    .await?;
    tracing::info!(item_id = %item_id, "legacy item imported on loan");

    Ok(Admission {
        item: loaned,
        ..admission
    })
}

/// IDで資料を取得する
pub async fn get_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<Item> {
    load_item(&deps.item_repository, item_id).await
}

/// 資料の一覧（状態で絞り込み可能）
pub async fn list_items(
    deps: &ServiceDependencies,
    availability: Option<Availability>,
) -> Result<Vec<Item>> {
    let items = match availability {
        Some(availability) => {
            deps.item_repository
                .find_by_availability(availability)
                .await?
        }
        None => deps.item_repository.find_all().await?,
    };
    Ok(items)
}

/// 検索戦略で資料を検索する
pub async fn search_items(
    deps: &ServiceDependencies,
    strategy: &dyn SearchStrategy,
    criterion: &str,
) -> Result<Vec<Item>> {
    let items = deps.item_repository.find_all().await?;
    let found = strategy.search(&items, criterion);

    tracing::debug!(
        strategy = strategy.name(),
        criterion,
        found = found.len(),
        "catalog searched"
    );

    Ok(found)
}

/// 資料を貸し出す
///
/// ビジネスルール：
/// - 資料が存在すること
/// - 資料がAvailable状態であること
///
/// # 一貫性保証
///
/// 読み込み → 遷移 → 保存の間に他者が同じ資料を更新した場合、
/// ストアの版管理により保存が失敗し InvalidOperation を返す（二重貸出は起きない）。
pub async fn loan_item(deps: &ServiceDependencies, cmd: LoanItem) -> Result<Item> {
    // 1. 資料を読み込む
    let item = load_item(&deps.item_repository, cmd.item_id).await?;

    // 2. ドメイン層の純粋関数を呼び出し
    let (loaned, event) = domain::lifecycle::loan_item(&item, cmd.borrower, cmd.loaned_at)?;

    // 3. 保存
    let saved = deps.item_repository.save(&loaned).await?;
    tracing::info!(
        item_id = %cmd.item_id,
        due_date = ?event.loan.as_ref().map(|loan| loan.due_date),
        "item loaned"
    );

    // 4. 通知
    deps.notification_hub.publish_state_changed(&saved, &event);

    Ok(saved)
}

/// 資料を返却する
///
/// ビジネスルール：
/// - 資料が存在すること
/// - 資料がLoaned状態であること
///
/// # 一貫性保証
///
/// `loan_item()` と同じ。
pub async fn return_item(deps: &ServiceDependencies, cmd: ReturnItem) -> Result<Item> {
    let item = load_item(&deps.item_repository, cmd.item_id).await?;

    let (returned, event) = domain::lifecycle::return_item(&item, cmd.returned_at)?;

    let saved = deps.item_repository.save(&returned).await?;
    tracing::info!(item_id = %cmd.item_id, "item returned");

    deps.notification_hub.publish_state_changed(&saved, &event);

    Ok(saved)
}

/// 資料を削除する
///
/// ビジネスルール：
/// - 資料が存在すること
/// - 貸出中でないこと
pub async fn remove_item(deps: &ServiceDependencies, item_id: ItemId) -> Result<()> {
    let item = load_item(&deps.item_repository, item_id).await?;

    domain::lifecycle::ensure_removable(&item)?;

    deps.item_repository.delete(&item).await?;
    tracing::info!(item_id = %item_id, "item removed");

    Ok(())
}

/// カタログの統計を取得する
pub async fn catalog_statistics(deps: &ServiceDependencies) -> Result<CatalogStatistics> {
    let total = deps.item_repository.count().await?;
    let available = deps
        .item_repository
        .count_by_availability(Availability::Available)
        .await?;
    let loaned = deps
        .item_repository
        .count_by_availability(Availability::Loaned)
        .await?;

    Ok(CatalogStatistics {
        total,
        available,
        loaned,
    })
}
