pub mod mock;
pub mod observers;
pub mod postgres;
