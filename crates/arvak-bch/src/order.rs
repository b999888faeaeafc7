//! Validated truncation order.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{BchError, BchResult};

/// Highest BCH order with known coefficients.
pub const MAX_ORDER: u8 = 4;

/// A truncation order in `0..=MAX_ORDER`.
///
/// Built through `TryFrom`: negative or non-integer inputs fail with
/// [`BchError::InvalidOrder`], integers above [`MAX_ORDER`] with
/// [`BchError::UnsupportedOrder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u64", into = "u8")]
pub struct Order(u8);

impl Order {
    /// The highest supported order.
    pub const MAX: Order = Order(MAX_ORDER);

    /// Validate a non-negative order.
    pub fn new(order: u64) -> BchResult<Self> {
        if order > u64::from(MAX_ORDER) {
            return Err(BchError::UnsupportedOrder {
                order,
                max: MAX_ORDER,
            });
        }
        // Bounded by MAX_ORDER above.
        Ok(Self(order as u8))
    }

    /// The order as an integer.
    pub const fn get(self) -> u8 {
        self.0
    }

    /// Every valid order, lowest first.
    pub fn all() -> impl Iterator<Item = Order> {
        (0..=MAX_ORDER).map(Order)
    }
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Order> for u8 {
    fn from(order: Order) -> Self {
        order.0
    }
}

macro_rules! impl_try_from_unsigned {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Order {
            type Error = BchError;

            fn try_from(order: $t) -> BchResult<Self> {
                Order::new(order as u64)
            }
        }
    )*};
}

macro_rules! impl_try_from_signed {
    ($($t:ty),*) => {$(
        impl TryFrom<$t> for Order {
            type Error = BchError;

            fn try_from(order: $t) -> BchResult<Self> {
                if order < 0 {
                    return Err(BchError::InvalidOrder(order.to_string()));
                }
                Order::new(order as u64)
            }
        }
    )*};
}

impl_try_from_unsigned!(u8, u16, u32, u64, usize);
impl_try_from_signed!(i8, i16, i32, i64, isize);

/// Only JSON integers pass: floats (even `2.0`), numeric strings, booleans
/// and null are all [`BchError::InvalidOrder`].
impl TryFrom<&Value> for Order {
    type Error = BchError;

    fn try_from(value: &Value) -> BchResult<Self> {
        match value.as_u64() {
            Some(order) => Order::new(order),
            None => Err(BchError::InvalidOrder(value.to_string())),
        }
    }
}
