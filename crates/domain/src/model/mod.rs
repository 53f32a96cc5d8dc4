//! Domain entities and value objects.

mod account;
mod generated_id_entity;
mod order;
mod order_item;
mod value_objects;
mod versioned_entity;

pub use account::Account;
pub use generated_id_entity::GeneratedIdEntity;
pub use order::{Items, Order};
pub use order_item::OrderItem;
pub use value_objects::{OrderItemId, ProductId};
pub use versioned_entity::{MAX_DATA_LENGTH, VersionedEntity};
