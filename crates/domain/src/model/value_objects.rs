//! Value objects for the order domain.

use common::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Product identifier (SKU).
///
/// Never blank. Deserialization runs the same check as [`ProductId::new`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProductId(String);

impl ProductId {
    /// Creates a product ID, rejecting empty or whitespace-only values.
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::BlankValue { field: "product_id" });
        }
        Ok(Self(value))
    }

    /// Returns the product ID as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for ProductId {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for ProductId {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProductId> for String {
    fn from(id: ProductId) -> Self {
        id.0
    }
}

impl AsRef<str> for ProductId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Identity of an order line: owning order plus product.
///
/// The order component is `None` while the owning order is transient.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct OrderItemId {
    order_id: Option<EntityId>,
    product_id: ProductId,
}

impl OrderItemId {
    /// Creates a line identity from its order and product.
    pub fn new(order_id: Option<EntityId>, product_id: ProductId) -> Self {
        Self {
            order_id,
            product_id,
        }
    }

    /// Returns the order half of the key, if assigned.
    pub fn order_id(&self) -> Option<EntityId> {
        self.order_id
    }

    /// Returns the product half of the key.
    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    /// Returns a copy pointing at another owning order.
    pub(crate) fn with_order_id(&self, order_id: EntityId) -> Self {
        Self {
            order_id: Some(order_id),
            product_id: self.product_id.clone(),
        }
    }
}

impl std::fmt::Display for OrderItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.order_id {
            Some(order_id) => write!(f, "{}/{}", order_id, self.product_id),
            None => write!(f, "new/{}", self.product_id),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_product_id_rejects_blank() {
        assert!(matches!(
            ProductId::new(""),
            Err(DomainError::BlankValue { field: "product_id" })
        ));
        assert!(ProductId::new("   ").is_err());
        assert!(ProductId::new("\t\n").is_err());
    }

    #[test]
    fn test_product_id_equality_by_value() {
        let a = ProductId::new("abc").unwrap();
        let b = ProductId::new("abc").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "abc");
        assert_ne!(a, ProductId::new("abd").unwrap());

        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_product_id_try_from() {
        let id: ProductId = "SKU-002".try_into().unwrap();
        assert_eq!(id.to_string(), "SKU-002");

        let err = ProductId::try_from(String::new()).unwrap_err();
        assert_eq!(err.to_string(), "product_id must not be null or empty");
    }

    #[test]
    fn test_product_id_deserialization_validates() {
        let id: ProductId = serde_json::from_str("\"xxx\"").unwrap();
        assert_eq!(id.as_str(), "xxx");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"xxx\"");

        let blank: Result<ProductId, _> = serde_json::from_str("\"  \"");
        assert!(blank.is_err());
    }

    #[test]
    fn test_order_item_id_equality_uses_both_fields() {
        let product = ProductId::new("xxx").unwrap();
        let transient = OrderItemId::new(None, product.clone());
        let persisted = OrderItemId::new(Some(EntityId::new(1)), product.clone());

        assert_eq!(transient, OrderItemId::new(None, product.clone()));
        assert_ne!(transient, persisted);
        assert_ne!(
            persisted,
            OrderItemId::new(Some(EntityId::new(2)), product.clone())
        );
        assert_ne!(
            persisted,
            OrderItemId::new(Some(EntityId::new(1)), ProductId::new("yyy").unwrap())
        );
    }

    #[test]
    fn test_order_item_id_with_order_id() {
        let id = OrderItemId::new(None, ProductId::new("xxx").unwrap());
        let backfilled = id.with_order_id(EntityId::new(9));
        assert_eq!(backfilled.order_id(), Some(EntityId::new(9)));
        assert_eq!(backfilled.product_id(), id.product_id());
        assert_eq!(backfilled.to_string(), "9/xxx");
        assert_eq!(id.to_string(), "new/xxx");
    }
}
