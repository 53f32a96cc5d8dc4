//! Order aggregate implementation.

use std::collections::HashMap;
use std::collections::hash_map::Values;

use common::EntityId;
use store::{Persistent, Stamp};

use super::{OrderItem, OrderItemId, ProductId};
use crate::error::DomainError;

/// Order aggregate root.
///
/// Holds at most one [`OrderItem`] per product. The backing map is private
/// and never handed out; callers read through [`Order::items`] and change
/// the lines only with [`Order::add_item`] and [`Order::remove_item`].
///
/// Equality is by id only, so all transient orders compare equal.
#[derive(Debug, Clone, Default)]
pub struct Order {
    /// Assigned by the repository on first save.
    id: Option<EntityId>,

    /// Lines keyed by product. Allocates on first insert.
    items: HashMap<ProductId, OrderItem>,
}

impl Order {
    /// Creates an empty, transient order.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generated id, or `None` before the first save.
    pub fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Returns a read-only view of the order's lines.
    pub fn items(&self) -> Items<'_> {
        Items { items: &self.items }
    }

    /// Returns the number of distinct products in the order.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the sum of all line quantities.
    pub fn total_quantity(&self) -> i64 {
        self.items
            .values()
            .map(|item| i64::from(item.quantity()))
            .sum()
    }

    /// Adds `quantity` units of a product.
    ///
    /// A product that is already on the order has the quantity merged into
    /// its existing line. On error the order is left unchanged.
    pub fn add_item(&mut self, quantity: i32, product_id: ProductId) -> Result<(), DomainError> {
        if quantity <= 0 {
            return Err(DomainError::InvalidQuantity { quantity });
        }

        if let Some(item) = self.items.get_mut(&product_id) {
            return item.add_quantity(quantity);
        }

        let item = OrderItem::new(OrderItemId::new(self.id, product_id.clone()), quantity)?;
        self.items.insert(product_id, item);
        Ok(())
    }

    /// Removes the line for a product. Does nothing if there is none.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.remove(product_id);
    }
}

impl PartialEq for Order {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Order {}

impl std::hash::Hash for Order {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl Persistent for Order {
    fn entity_type() -> &'static str {
        "Order"
    }

    fn id(&self) -> Option<EntityId> {
        self.id
    }

    /// Takes on the generated id and back-fills it into every line's
    /// identity, so items added before the first save point at the order.
    fn restamp(&mut self, stamp: &Stamp) {
        let id = stamp.id();
        self.id = Some(id);
        for item in self.items.values_mut() {
            if item.order_id() != Some(id) {
                item.backfill_order_id(id);
            }
        }
    }
}

/// Read-only view over the lines of an [`Order`].
///
/// Iteration order is unspecified. The view has no mutating methods:
///
/// ```compile_fail
/// use domain::Order;
///
/// let order = Order::new();
/// order.items().clear();
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Items<'a> {
    items: &'a HashMap<ProductId, OrderItem>,
}

impl<'a> Items<'a> {
    /// Returns the number of lines.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the order has no lines.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the line for a product, if any.
    pub fn get(&self, product_id: &ProductId) -> Option<&'a OrderItem> {
        self.items.get(product_id)
    }

    /// Returns true if the product has a line.
    pub fn contains(&self, product_id: &ProductId) -> bool {
        self.items.contains_key(product_id)
    }

    /// Iterates over the lines in unspecified order.
    pub fn iter(&self) -> Values<'a, ProductId, OrderItem> {
        self.items.values()
    }
}

impl<'a> IntoIterator for Items<'a> {
    type Item = &'a OrderItem;
    type IntoIter = Values<'a, ProductId, OrderItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str) -> ProductId {
        ProductId::new(id).unwrap()
    }

    #[test]
    fn test_new_order_is_empty() {
        let order = Order::new();
        assert!(order.id().is_none());
        assert!(order.items().is_empty());
        assert_eq!(order.item_count(), 0);
    }

    #[test]
    fn test_add_item() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();

        let item = order.items().get(&product("xxx")).unwrap();
        assert_eq!(item.quantity(), 3);
        assert_eq!(item.order_id(), None);
        assert_eq!(item.product_id(), &product("xxx"));
    }

    #[test]
    fn test_add_same_product_merges_quantity() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();
        order.add_item(4, product("xxx")).unwrap();

        assert_eq!(order.item_count(), 1);
        assert_eq!(order.items().get(&product("xxx")).unwrap().quantity(), 7);
    }

    #[test]
    fn test_add_distinct_products() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();
        order.add_item(2, product("yyy")).unwrap();
        order.add_item(5, product("zzz")).unwrap();

        assert_eq!(order.item_count(), 3);
        assert_eq!(order.total_quantity(), 10);
    }

    #[test]
    fn test_negative_quantity_on_existing_item_keeps_quantity() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();

        let result = order.add_item(-1, product("xxx"));
        assert!(matches!(
            result,
            Err(DomainError::InvalidQuantity { quantity: -1 })
        ));
        assert_eq!(order.items().get(&product("xxx")).unwrap().quantity(), 3);
    }

    #[test]
    fn test_zero_quantity_on_new_item_adds_nothing() {
        let mut order = Order::new();
        assert!(order.add_item(0, product("xxx")).is_err());
        assert!(order.items().is_empty());
    }

    #[test]
    fn test_overflowing_merge_keeps_quantity() {
        let mut order = Order::new();
        order.add_item(i32::MAX, product("xxx")).unwrap();
        assert!(matches!(
            order.add_item(1, product("xxx")),
            Err(DomainError::QuantityOverflow { .. })
        ));
        assert_eq!(
            order.items().get(&product("xxx")).unwrap().quantity(),
            i32::MAX
        );
    }

    #[test]
    fn test_remove_item() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();
        order.add_item(1, product("yyy")).unwrap();

        order.remove_item(&product("xxx"));
        assert_eq!(order.item_count(), 1);
        assert!(!order.items().contains(&product("xxx")));
    }

    #[test]
    fn test_remove_absent_item_is_noop() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();

        order.remove_item(&product("nope"));
        assert_eq!(order.item_count(), 1);
    }

    #[test]
    fn test_items_view_iterates_all_lines() {
        let mut order = Order::new();
        order.add_item(3, product("xxx")).unwrap();
        order.add_item(2, product("yyy")).unwrap();

        let mut products: Vec<_> = order
            .items()
            .into_iter()
            .map(|item| item.product_id().as_str().to_string())
            .collect();
        products.sort();
        assert_eq!(products, vec!["xxx", "yyy"]);
        assert_eq!(order.items().iter().count(), 2);
        assert_eq!(order.items().len(), 2);
    }

    #[test]
    fn test_equality_by_id() {
        let mut with_items = Order::new();
        with_items.add_item(1, product("xxx")).unwrap();
        assert_eq!(Order::new(), with_items);

        let mut persisted = Order::new();
        persisted.id = Some(EntityId::new(1));
        assert_ne!(Order::new(), persisted);
    }
}
