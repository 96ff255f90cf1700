//! Wire-format float rendering.
//!
//! PHP's reference output for floats switches to scientific notation with an
//! uppercase `E` marker once the magnitude leaves the plain-decimal range.
//! Host formatters disagree on presentation: Rust's `Display` never uses
//! scientific notation, while `{:e}` always does and writes a lowercase
//! marker. The functions here pick the presentation deterministically from
//! the decimal exponent so the same value produces the same wire text on
//! every runtime.
//!
//! Non-finite values use PHP's own literals `INF`, `-INF` and `NAN`.

use crate::grammar;

/// Decimal exponents inside this range render as plain decimal text,
/// everything outside renders as `<mantissa>E<exponent>`.
const PLAIN_EXPONENT_RANGE: std::ops::RangeInclusive<i32> = -3..=6;

/// Formats an `f64` as PHP wire text.
///
/// # Examples
///
/// ```rust
/// use serde_php::format_double;
///
/// assert_eq!(format_double(2.5), "2.5");
/// assert_eq!(format_double(f64::MAX), "1.7976931348623157E308");
/// assert_eq!(format_double(f64::NEG_INFINITY), "-INF");
/// ```
#[must_use]
pub fn format_double(value: f64) -> String {
    if value.is_nan() {
        return grammar::NAN.to_string();
    }
    if value.is_infinite() {
        return non_finite(value.is_sign_positive());
    }
    choose_presentation(&format!("{:e}", value), value.to_string())
}

/// Formats an `f32` as PHP wire text.
///
/// The value stays on the single-precision formatter throughout; widening to
/// `f64` first would grow the mantissa past what the float can distinguish.
///
/// # Examples
///
/// ```rust
/// use serde_php::format_float;
///
/// assert_eq!(format_float(f32::MAX), "3.4028235E38");
/// ```
#[must_use]
pub fn format_float(value: f32) -> String {
    if value.is_nan() {
        return grammar::NAN.to_string();
    }
    if value.is_infinite() {
        return non_finite(value.is_sign_positive());
    }
    choose_presentation(&format!("{:e}", value), value.to_string())
}

fn non_finite(positive: bool) -> String {
    if positive { grammar::INF } else { grammar::NEG_INF }.to_string()
}

/// Picks plain or scientific presentation from the shortest-round-trip
/// scientific text. `plain` is the host's plain rendering of the same value.
fn choose_presentation(scientific: &str, plain: String) -> String {
    let (mantissa, exponent) = match scientific.split_once('e') {
        Some(parts) => parts,
        None => return plain,
    };
    match exponent.parse::<i32>() {
        Ok(exp) if PLAIN_EXPONENT_RANGE.contains(&exp) => plain,
        Ok(exp) => format!("{}E{}", mantissa, exp),
        Err(_) => plain,
    }
}
