// flux-common/src/dto/decimal.rs
// Decimal equality used by every value object in this crate.
//
// Two amounts are equal when they denote the same number. The scale is not
// part of the value: "1", "1.0" and "1.000" compare equal. Exchanges are free
// to re-render the same balance with a different number of trailing zeros
// between two polls and that must not surface as a change.

use rust_decimal::Decimal;

/// Numeric equality, scale ignored.
pub fn decimal_eq(a: &Decimal, b: &Decimal) -> bool {
    a.normalize() == b.normalize()
}

/// Both absent, or both present and numerically equal.
pub fn optional_decimal_eq(a: Option<&Decimal>, b: Option<&Decimal>) -> bool {
    match (a, b) {
        (None, None) => true,
        (Some(a), Some(b)) => decimal_eq(a, b),
        _ => false,
    }
}
