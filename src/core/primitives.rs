use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

use crate::error::{OverlayError, OverlayResult};

pub fn decimal_to_f64(value: Decimal, field_name: &str) -> OverlayResult<f64> {
    value.to_f64().ok_or_else(|| {
        OverlayError::InvalidData(format!("{field_name} cannot be represented as f64"))
    })
}

/// Maps `NaN` and infinities to an explicit absence.
#[must_use]
pub fn finite_or_none(value: f64) -> Option<f64> {
    value.is_finite().then_some(value)
}
