use crate::domain::{Availability, Item, ItemId};
use crate::ports::item_repository::{ItemRepository as ItemRepositoryTrait, Result, StoreError};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

/// In-memory implementation of ItemRepository
///
/// Keeps items in insertion order and enforces the same optimistic
/// versioning contract as the PostgreSQL adapter. Suitable for tests and
/// for running the service without a database.
#[derive(Debug, Default)]
pub struct ItemRepository {
    items: Mutex<IndexMap<ItemId, Item>>,
}

impl ItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn items(&self) -> MutexGuard<'_, IndexMap<ItemId, Item>> {
        self.items.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl ItemRepositoryTrait for ItemRepository {
    /// Insert unsaved items with a fresh id, update saved ones on version match
    async fn save(&self, item: &Item) -> Result<Item> {
        let mut items = self.items();

        let Some(id) = item.id else {
            let id = ItemId::new();
            let stored = Item {
                id: Some(id),
                version: 1,
                ..item.clone()
            };
            items.insert(id, stored.clone());
            return Ok(stored);
        };

        let current = items.get_mut(&id).ok_or(StoreError::VersionConflict(id))?;
        if current.version != item.version {
            return Err(StoreError::VersionConflict(id));
        }

        *current = Item {
            version: item.version + 1,
            ..item.clone()
        };
        Ok(current.clone())
    }

    async fn find_by_id(&self, id: ItemId) -> Result<Option<Item>> {
        Ok(self.items().get(&id).cloned())
    }

    async fn exists_by_title_and_author(&self, title: &str, author: &str) -> Result<bool> {
        Ok(self
            .items()
            .values()
            .any(|item| item.title == title && item.author == author))
    }

    async fn find_by_availability(&self, availability: Availability) -> Result<Vec<Item>> {
        Ok(self
            .items()
            .values()
            .filter(|item| item.availability == availability)
            .cloned()
            .collect())
    }

    async fn find_all(&self) -> Result<Vec<Item>> {
        Ok(self.items().values().cloned().collect())
    }

    async fn delete(&self, item: &Item) -> Result<()> {
        let id = item
            .id
            .ok_or_else(|| StoreError::InvalidData("cannot delete an unsaved item".to_string()))?;

        let mut items = self.items();
        match items.get(&id) {
            Some(current) if current.version == item.version => {
                items.shift_remove(&id);
                Ok(())
            }
            _ => Err(StoreError::VersionConflict(id)),
        }
    }

    async fn count_by_availability(&self, availability: Availability) -> Result<u64> {
        let count = self
            .items()
            .values()
            .filter(|item| item.availability == availability)
            .count();
        Ok(count as u64)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.items().len() as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ItemBuilder;

    fn new_item(title: &str) -> Item {
        ItemBuilder::new()
            .title(title)
            .author("George Orwell")
            .fiction()
            .physical()
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_save_assigns_id_and_first_version() {
        let repository = ItemRepository::new();

        let saved = repository.save(&new_item("1984")).await.unwrap();

        assert!(saved.id().is_some());
        assert_eq!(saved.version(), 1);
        assert_eq!(repository.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_save_rejects_stale_version() {
        let repository = ItemRepository::new();
        let saved = repository.save(&new_item("1984")).await.unwrap();

        let mut first = saved.clone();
        first.set_title("Nineteen Eighty-Four");
        let updated = repository.save(&first).await.unwrap();
        assert_eq!(updated.version(), 2);

        let mut stale = saved;
        stale.set_title("Animal Farm");
        let result = repository.save(&stale).await;
        assert!(matches!(result, Err(StoreError::VersionConflict(_))));
    }

    #[tokio::test]
    async fn test_delete_requires_matching_version() {
        let repository = ItemRepository::new();
        let saved = repository.save(&new_item("1984")).await.unwrap();
        let _ = repository.save(&saved).await.unwrap();

        let result = repository.delete(&saved).await;
        assert!(matches!(result, Err(StoreError::VersionConflict(_))));

        let current = repository.find_by_id(saved.id().unwrap()).await.unwrap().unwrap();
        repository.delete(&current).await.unwrap();
        assert_eq!(repository.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_queries_keep_insertion_order() {
        let repository = ItemRepository::new();
        for title in ["Animal Farm", "1984", "Homage to Catalonia"] {
            repository.save(&new_item(title)).await.unwrap();
        }

        let titles: Vec<String> = repository
            .find_all()
            .await
            .unwrap()
            .iter()
            .map(|item| item.title().to_string())
            .collect();

        assert_eq!(titles, vec!["Animal Farm", "1984", "Homage to Catalonia"]);
        assert!(repository.exists_by_title_and_author("1984", "George Orwell").await.unwrap());
        assert!(!repository.exists_by_title_and_author("1984", "george orwell").await.unwrap());
        assert_eq!(
            repository
                .count_by_availability(Availability::Available)
                .await
                .unwrap(),
            3
        );
    }
}
