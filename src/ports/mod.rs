pub mod catalog_subscriber;
pub mod item_repository;

pub use catalog_subscriber::CatalogSubscriber;
pub use item_repository::{ItemRepository, StoreError};
