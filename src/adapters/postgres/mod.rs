pub mod item_repository;

// パブリックに型を再エクスポート
pub use item_repository::ItemRepository as PostgresItemRepository;
