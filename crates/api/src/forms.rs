//! Form binding for order submissions.
//!
//! A submitted form is validated as a whole before any order is touched,
//! so a bad line never leaves a half-edited order behind. Line fields are
//! bound loosely so that a value of the wrong type is reported against its
//! field path instead of rejecting the whole body.

use domain::{DomainError, Order, ProductId};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{ApiError, FieldError};

/// Order lines as submitted by a client.
#[derive(Debug, Default, Deserialize)]
pub struct OrderForm {
    #[serde(default)]
    pub items: Vec<OrderFormItem>,
}

/// One submitted line, fields as sent.
#[derive(Debug, Default, Deserialize)]
pub struct OrderFormItem {
    #[serde(default)]
    pub product_id: Value,
    #[serde(default)]
    pub quantity: Value,
}

/// A validated order line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

impl OrderForm {
    /// Checks every line and returns them typed, or every field error found.
    pub fn validate(&self) -> Result<Vec<OrderLine>, Vec<FieldError>> {
        let mut lines = Vec::with_capacity(self.items.len());
        let mut errors = Vec::new();

        for (index, item) in self.items.iter().enumerate() {
            let product_id = bind_product_id(&item.product_id).map_err(|message| {
                errors.push(FieldError::new(format!("items[{index}].product_id"), message))
            });
            let quantity = bind_quantity(&item.quantity).map_err(|message| {
                errors.push(FieldError::new(format!("items[{index}].quantity"), message))
            });

            if let (Ok(product_id), Ok(quantity)) = (product_id, quantity) {
                lines.push(OrderLine {
                    product_id,
                    quantity,
                });
            }
        }

        if errors.is_empty() {
            Ok(lines)
        } else {
            Err(errors)
        }
    }

    /// Validates the form, then replaces the order's lines with the form's.
    ///
    /// Repeated products merge. An invalid form leaves the order unchanged.
    pub fn apply_to(&self, order: &mut Order) -> Result<(), ApiError> {
        let lines = self.validate().map_err(ApiError::Validation)?;
        replace_lines(order, lines)?;
        Ok(())
    }
}

fn bind_product_id(value: &Value) -> Result<ProductId, String> {
    match value {
        Value::String(s) => ProductId::new(s.as_str()).map_err(|err| err.to_string()),
        Value::Null => ProductId::new("").map_err(|err| err.to_string()),
        _ => Err("must be a string".to_string()),
    }
}

fn bind_quantity(value: &Value) -> Result<i32, String> {
    let quantity = match value {
        Value::Null => return Err("must not be null".to_string()),
        Value::Number(n) => n.as_i64().and_then(|q| i32::try_from(q).ok()),
        Value::String(s) => s.trim().parse::<i32>().ok(),
        _ => None,
    }
    .ok_or_else(|| format!("failed to convert {value} to a whole number"))?;

    if quantity < 1 {
        return Err("must be greater than or equal to 1".to_string());
    }
    Ok(quantity)
}

fn replace_lines(order: &mut Order, lines: Vec<OrderLine>) -> Result<(), DomainError> {
    let existing: Vec<ProductId> = order
        .items()
        .iter()
        .map(|item| item.product_id().clone())
        .collect();
    for product_id in &existing {
        order.remove_item(product_id);
    }

    for line in lines {
        order.add_item(line.quantity, line.product_id)?;
    }
    Ok(())
}
