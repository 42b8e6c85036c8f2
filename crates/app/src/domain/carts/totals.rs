//! Totals Calculator
//!
//! Pure derivation of cart totals from line items. Persisted totals
//! are never written except through this module.

use crate::domain::carts::models::CartItem;

/// Derived subtotal/total pair for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Totals {
    pub subtotal: u64,
    pub total: u64,
}

/// Compute totals over an item sequence.
///
/// The empty sequence yields zeroes. No tax or shipping modelling
/// yet; `total` mirrors `subtotal`.
#[must_use]
pub fn totals(items: &[CartItem]) -> Totals {
    let subtotal = items
        .iter()
        .fold(0_u64, |sum, item| sum.saturating_add(item.subtotal));

    Totals {
        subtotal,
        total: subtotal,
    }
}

/// Line subtotal: `quantity * unit_price`, in minor units.
#[must_use]
pub fn line_subtotal(quantity: u32, unit_price: u64) -> u64 {
    u64::from(quantity).saturating_mul(unit_price)
}
