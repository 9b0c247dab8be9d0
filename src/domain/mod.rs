pub mod commands;
pub mod errors;
pub mod events;
pub mod item;
pub mod legacy;
pub mod lifecycle;
pub mod search;
pub mod validation;
pub mod value_objects;

pub use errors::*;
pub use events::*;
pub use item::*;
pub use value_objects::*;
