use std::borrow::Cow;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value as JsonValue;
use validator::ValidationError;

use crate::models::listing::PropertyType;

/// NUMERIC(10,2): eight integer digits, two fractional.
const PRICE_MAX_EXCLUSIVE: i64 = 100_000_000;

fn error(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(message.into());
    err
}

pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::new(1, 2) {
        return Err(error(
            "min_value",
            "Ensure this value is greater than or equal to 0.01.",
        ));
    }
    if price.normalize().scale() > 2 {
        return Err(error(
            "max_decimal_places",
            "Ensure that there are no more than 2 decimal places.",
        ));
    }
    if price.trunc() >= Decimal::from(PRICE_MAX_EXCLUSIVE) {
        return Err(error(
            "max_digits",
            "Ensure that there are no more than 10 digits in total.",
        ));
    }
    Ok(())
}

pub fn validate_property_type(value: &str) -> Result<(), ValidationError> {
    PropertyType::from_str(value)
        .map(|_| ())
        .map_err(|msg| error("invalid_choice", msg))
}

pub fn validate_amenities(value: &JsonValue) -> Result<(), ValidationError> {
    match value {
        JsonValue::Array(items) if items.iter().all(JsonValue::is_string) => Ok(()),
        JsonValue::Array(_) => Err(error("invalid", "Every amenity must be a string.")),
        _ => Err(error("not_a_list", "Expected a list of items.")),
    }
}

/// Attached to server-controlled fields so a write that sets them fails.
pub fn reject_read_only(_value: &JsonValue) -> Result<(), ValidationError> {
    Err(error("read_only", "This field is read-only."))
}

/// Turns an already validated amenities value into its list form.
pub fn amenities_list(value: JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                JsonValue::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

/// Stored prices always carry two decimal places.
pub fn normalize_price(price: Decimal) -> Decimal {
    let mut price = price.round_dp(2);
    price.rescale(2);
    price
}
