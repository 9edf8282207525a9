//! Fixed-point money handling.
//!
//! Every monetary column is `DECIMAL(10, 2)`. Values are normalized to exactly two
//! fractional digits on the way in and on the way out, so repeated read-modify-write
//! cycles never accumulate representation noise from the driver.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::entity::{cart, order_item, orders, product};

pub const SCALE: u32 = 2;

/// Largest amount a `DECIMAL(10, 2)` column holds: 99999999.99.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, SCALE);

pub fn normalize(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(SCALE, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(SCALE);
    rounded
}

pub fn fits_column(amount: Decimal) -> bool {
    normalize(amount).abs() <= MAX_AMOUNT
}

/// `quantity` units at `unit_price`, normalized. `None` when the result does not fit a
/// money column.
pub fn line_total(unit_price: Decimal, quantity: i32) -> Option<Decimal> {
    let total = normalize(unit_price).checked_mul(Decimal::from(quantity))?;
    let total = normalize(total);
    fits_column(total).then_some(total)
}

/// Sum of already normalized amounts, `None` on overflow of a money column.
pub fn checked_sum(amounts: impl IntoIterator<Item = Decimal>) -> Option<Decimal> {
    let total = amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| acc.checked_add(amount))?;
    fits_column(total).then_some(total)
}

/// Models carrying monetary columns.
pub trait Monetary {
    fn with_normalized_money(self) -> Self;
}

impl Monetary for product::Model {
    fn with_normalized_money(mut self) -> Self {
        self.price = normalize(self.price);
        self
    }
}

impl Monetary for cart::Model {
    fn with_normalized_money(mut self) -> Self {
        self.total_price = normalize(self.total_price);
        self
    }
}

impl Monetary for orders::Model {
    fn with_normalized_money(mut self) -> Self {
        self.total_price = normalize(self.total_price);
        self
    }
}

impl Monetary for order_item::Model {
    fn with_normalized_money(mut self) -> Self {
        self.price = normalize(self.price);
        self
    }
}
