//! Value objects for the order domain.

use common::{OrderItemId, ProductId};
use serde::{Deserialize, Serialize};

use super::OrderError;

/// Money amount represented in cents to avoid floating point issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in cents (e.g., 1000 = $10.00)
    cents: i64,
}

impl Money {
    /// Creates a new Money amount from cents.
    pub fn from_cents(cents: i64) -> Self {
        Self { cents }
    }

    /// Creates a new Money amount from a whole dollar value.
    pub fn from_dollars(dollars: i64) -> Self {
        Self {
            cents: dollars * 100,
        }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { cents: 0 }
    }

    /// Returns the amount in cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// Returns the dollar portion (whole number).
    pub fn dollars(&self) -> i64 {
        self.cents / 100
    }

    /// Returns the cents portion (remainder after dollars).
    pub fn cents_part(&self) -> i64 {
        self.cents.abs() % 100
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.cents == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.cents < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            cents: self.cents * quantity as i64,
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.cents < 0 {
            write!(f, "-${}.{:02}", self.dollars().abs(), self.cents_part())
        } else {
            write!(f, "${}.{:02}", self.dollars(), self.cents_part())
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            cents: self.cents + rhs.cents,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.cents += rhs.cents;
    }
}

/// A line item owned by exactly one order.
///
/// The name is a denormalized copy of the product name at the time the
/// item was added, not a live reference; changing the product later does
/// not rewrite existing orders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// The line item identifier.
    pub id: OrderItemId,

    /// Product name as it read when the item was added.
    pub name: String,

    /// Price per unit.
    pub unit_price: Money,

    /// The product this item was derived from.
    pub product_id: ProductId,

    /// Quantity ordered.
    pub quantity: u32,
}

impl OrderItem {
    /// Creates a new order item.
    ///
    /// Quantity must be positive and the unit price non-negative.
    pub fn new(
        id: impl Into<OrderItemId>,
        name: impl Into<String>,
        unit_price: Money,
        product_id: impl Into<ProductId>,
        quantity: u32,
    ) -> Result<Self, OrderError> {
        if quantity == 0 {
            return Err(OrderError::InvalidQuantity { quantity });
        }
        if unit_price.is_negative() {
            return Err(OrderError::InvalidPrice {
                price: unit_price.cents(),
            });
        }

        Ok(Self {
            id: id.into(),
            name: name.into(),
            unit_price,
            product_id: product_id.into(),
            quantity,
        })
    }

    /// Returns the subtotal for this item (unit price times quantity).
    pub fn subtotal(&self) -> Money {
        self.unit_price.multiply(self.quantity)
    }
}
