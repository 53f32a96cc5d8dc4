use common::EntityId;

use super::{OrderItemId, ProductId};
use crate::error::DomainError;

/// A line of an [`Order`](super::Order).
///
/// Owned exclusively by its order: the constructor and the quantity
/// mutators are visible only inside the `model` module, so the only way to
/// create or merge a line is through `Order::add_item`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderItem {
    id: OrderItemId,
    quantity: i32,
}

impl OrderItem {
    /// Creates a line. Only the owning order calls this.
    pub(super) fn new(id: OrderItemId, quantity: i32) -> Result<Self, DomainError> {
        let mut item = Self { id, quantity: 0 };
        item.set_quantity(quantity)?;
        Ok(item)
    }

    /// Returns the composite identity of this line.
    pub fn id(&self) -> &OrderItemId {
        &self.id
    }

    /// Returns the owning order's id, once it has one.
    pub fn order_id(&self) -> Option<EntityId> {
        self.id.order_id()
    }

    /// Returns the ordered product.
    pub fn product_id(&self) -> &ProductId {
        self.id.product_id()
    }

    /// Returns the number of units ordered.
    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    /// Overwrites the quantity, rejecting values below 1.
    pub(super) fn set_quantity(&mut self, quantity: i32) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }
        self.quantity = quantity;
        Ok(())
    }

    /// Merges a duplicate insert of the same product into this line.
    pub(super) fn add_quantity(&mut self, increment: i32) -> Result<(), DomainError> {
        if increment <= 0 {
            return Err(DomainError::InvalidIncrement { increment });
        }
        self.quantity = self
            .quantity
            .checked_add(increment)
            .ok_or(DomainError::QuantityOverflow {
                current: self.quantity,
                increment,
            })?;
        Ok(())
    }

    /// Points the line at the order that was just persisted.
    pub(super) fn backfill_order_id(&mut self, order_id: EntityId) {
        self.id = self.id.with_order_id(order_id);
    }
}

impl std::fmt::Display for OrderItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.order_id() {
            Some(order_id) => write!(
                f,
                "OrderItem [quantity={}, order_id={}, product_id={}]",
                self.quantity,
                order_id,
                self.product_id()
            ),
            None => write!(
                f,
                "OrderItem [quantity={}, order_id=none, product_id={}]",
                self.quantity,
                self.product_id()
            ),
        }
    }
}
