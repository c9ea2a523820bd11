use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, DomainResult, ValueObject};

/// Amount in the smallest currency unit.
///
/// Unit conversion (e.g. 18-decimal token amounts) happens at the caller's
/// boundary; the catalog only ever sees whole smallest units.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(u128);

impl Price {
    pub const ZERO: Price = Price(0);

    pub fn new(amount: u128) -> Self {
        Self(amount)
    }

    pub fn amount(self) -> u128 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl ValueObject for Price {}

impl core::fmt::Display for Price {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u128> for Price {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

/// Price validation applied when an item is listed.
///
/// The default accepts every amount, zero included.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceRule {
    pub allow_zero: bool,
    pub max: Option<Price>,
}

impl Default for PriceRule {
    fn default() -> Self {
        Self::accept_all()
    }
}

impl PriceRule {
    pub fn accept_all() -> Self {
        Self {
            allow_zero: true,
            max: None,
        }
    }

    /// Reject zero-priced items.
    pub fn positive() -> Self {
        Self {
            allow_zero: false,
            max: None,
        }
    }

    /// Same rule with an inclusive upper bound.
    pub fn with_max(mut self, max: Price) -> Self {
        self.max = Some(max);
        self
    }

    pub fn check(&self, price: Price) -> DomainResult<()> {
        if !self.allow_zero && price.is_zero() {
            return Err(DomainError::invalid_item("price must be greater than zero"));
        }
        if let Some(max) = self.max {
            if price > max {
                return Err(DomainError::invalid_item(format!(
                    "price {price} exceeds maximum {max}"
                )));
            }
        }
        Ok(())
    }
}
