//! Order data handed to the dispatcher by the storefront.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use validator::Validate;

/// A single cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Item quantity must be at least 1"))]
    pub quantity: u32,
    #[serde(default)]
    pub price: Decimal,
}

fn default_quantity() -> u32 {
    1
}

/// Order being paid for. Never persisted here.
///
/// Every field defaults when absent so that an incomplete payload reaches
/// [`OrderData::check`] and comes back as a failure result rather than a
/// deserialization rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderData {
    #[serde(default)]
    pub total: Decimal,
    #[serde(default)]
    pub order_id: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidOrder {
    #[error("Valid total amount is required")]
    NonPositiveTotal,

    #[error("Order id is required")]
    MissingOrderId,

    #[error("Order must contain at least one item")]
    NoItems,

    #[error("Invalid order item {index}: {reason}")]
    InvalidItem { index: usize, reason: String },
}

/// Decimal amount in cents, rounded half-up. `None` if negative or too large.
pub fn to_minor_units(amount: Decimal) -> Option<u64> {
    amount
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}

impl OrderData {
    /// Boundary validation applied to every payment method alike.
    pub fn check(&self) -> Result<(), InvalidOrder> {
        // Must charge at least one cent once rounded.
        match self.amount_in_minor_units() {
            Some(amount) if amount > 0 => {}
            _ => return Err(InvalidOrder::NonPositiveTotal),
        }
        if self.order_id.trim().is_empty() {
            return Err(InvalidOrder::MissingOrderId);
        }
        if self.items.is_empty() {
            return Err(InvalidOrder::NoItems);
        }

        for (index, item) in self.items.iter().enumerate() {
            item.validate()
                .map_err(|errors| InvalidOrder::InvalidItem {
                    index,
                    reason: errors.to_string(),
                })?;

            if item.price.is_sign_negative() {
                return Err(InvalidOrder::InvalidItem {
                    index,
                    reason: "price must not be negative".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Total in cents, rounded half-up. `None` if it does not fit.
    pub fn amount_in_minor_units(&self) -> Option<u64> {
        to_minor_units(self.total)
    }

    /// Total as a decimal string with at most two fractional digits and no
    /// trailing zeros, e.g. `100.5`.
    pub fn decimal_total(&self) -> String {
        self.total
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize()
            .to_string()
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}
