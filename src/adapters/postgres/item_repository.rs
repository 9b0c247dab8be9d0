use crate::domain::{Availability, Category, Item, ItemId, Medium};
use crate::ports::item_repository::{ItemRepository as ItemRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use std::str::FromStr;

const SELECT_ITEMS: &str = r#"
    SELECT
        id,
        title,
        author,
        category,
        medium,
        availability,
        version,
        created_at,
        updated_at
    FROM items
"#;

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(Box::new(err))
    }
}

/// PostgreSQLの行データをItemに変換する
///
/// 列挙型は文字列で保存しているため、FromStrで解釈し直す。
/// 解釈できない値は InvalidData として扱う。
fn map_row_to_item(row: &PgRow) -> Result<Item> {
    let category_str: &str = row.try_get("category")?;
    let category = Category::from_str(category_str).map_err(StoreError::InvalidData)?;

    let medium_str: &str = row.try_get("medium")?;
    let medium = Medium::from_str(medium_str).map_err(StoreError::InvalidData)?;

    let availability_str: &str = row.try_get("availability")?;
    let availability = Availability::from_str(availability_str).map_err(StoreError::InvalidData)?;

    Ok(Item {
        id: Some(ItemId::from_uuid(row.try_get("id")?)),
        title: row.try_get("title")?,
        author: row.try_get("author")?,
        category,
        medium,
        availability,
        version: row.try_get("version")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

/// ItemRepositoryのPostgreSQL実装
///
/// 版管理は `WHERE id = $1 AND version = $2` の条件付き更新で行う。
/// 更新で行が返らない、または削除の影響行数が0なら他者が先に更新（または削除）したとみなす。
/// 保存結果の時刻は `RETURNING` で読み戻し、`find_by_id` の結果と一致させる。
pub struct ItemRepository {
    pool: PgPool,
}

impl ItemRepository {
    /// PostgreSQLコネクションプールから新しいItemRepositoryを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn insert(&self, item: &Item) -> Result<Item> {
        let row = sqlx::query(
            r#"
            INSERT INTO items (
                title,
                author,
                category,
                medium,
                availability,
                version,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, 1, $6, $7)
            RETURNING id, created_at, updated_at
            "#,
        )
        .bind(&item.title)
        .bind(&item.author)
        .bind(item.category.as_str())
        .bind(item.medium.as_str())
        .bind(item.availability.as_str())
        .bind(item.created_at)
        .bind(item.updated_at)
        .fetch_one(&self.pool)
        .await?;

        // 時刻はストアの精度（マイクロ秒）に丸められた値を返す
        Ok(Item {
            id: Some(ItemId::from_uuid(row.try_get("id")?)),
            version: 1,
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
            ..item.clone()
        })
    }

    async fn update(&self, id: ItemId, item: &Item) -> Result<Item> {
        let row = sqlx::query(
            r#"
            UPDATE items
            SET
                title = $3,
                author = $4,
                category = $5,
                medium = $6,
                availability = $7,
                updated_at = $8,
                version = version + 1
            WHERE id = $1 AND version = $2
            RETURNING updated_at
            "#,
        )
        .bind(id.value())
        .bind(item.version)
        .bind(&item.title)
        .bind(&item.author)
        .bind(item.category.as_str())
        .bind(item.medium.as_str())
        .bind(item.availability.as_str())
        .bind(item.updated_at)
        .fetch_optional(&self.pool)
        .await?;

        // 行が返らなければ他者が先に更新（または削除）した
        let row = row.ok_or(StoreError::VersionConflict(id))?;

        Ok(Item {
            version: item.version + 1,
            updated_at: row.try_get("updated_at")?,
            ..item.clone()
        })
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    async fn save(&self, item: &Item) -> Result<Item> {
        match item.id {
            None => self.insert(item).await,
            Some(id) => self.update(id, item).await,
        }
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        let row = sqlx::query(&format!("{SELECT_ITEMS} WHERE id = $1"))
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(map_row_to_item).transpose()
    }

    async fn exists_by_title_and_author(&self, title: &str, author: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM items WHERE title = $1 AND author = $2)",
        )
        .bind(title)
        .bind(author)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// (availability)のインデックスを使用する
    async fn find_by_availability(&self, availability: Availability) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!(
            "{SELECT_ITEMS} WHERE availability = $1 ORDER BY seq ASC"
        ))
        .bind(availability.as_str())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row_to_item).collect()
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        let rows = sqlx::query(&format!("{SELECT_ITEMS} ORDER BY seq ASC"))
            .fetch_all(&self.pool)
            .await?;

        rows.iter().map(map_row_to_item).collect()
    }

    async fn delete(&self, item: &Item) -> Result<()> {
        let id = item
            .id
            .ok_or_else(|| StoreError::InvalidData("cannot delete an unsaved item".to_string()))?;

        let result = sqlx::query("DELETE FROM items WHERE id = $1 AND version = $2")
            .bind(id.value())
            .bind(item.version)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::VersionConflict(id));
        }

        Ok(())
    }

    async fn count_by_availability(&self, availability: Availability) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE availability = $1")
            .bind(availability.as_str())
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }

    async fn count(&self) -> Result<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count.max(0) as u64)
    }
}
