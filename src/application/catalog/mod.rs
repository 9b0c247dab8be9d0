mod catalog_service;
mod errors;
mod notification_hub;

pub use catalog_service::{
    Admission, CatalogStatistics, ServiceDependencies, admit_item, catalog_statistics, get_item,
    import_legacy_item, list_items, loan_item, remove_item, return_item, search_items,
};
pub use errors::{CatalogError, Result};
pub use notification_hub::{DeliveryReport, NotificationHub};
