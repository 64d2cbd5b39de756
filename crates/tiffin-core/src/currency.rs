//! # Currency Formatting
//!
//! Display strings for rupee amounts. Pure functions, no locale lookup.
//!
//! ```text
//! format_price(149.6)               → "₹150"
//! format_price_with_decimals(149.6) → "₹149.60"
//! format_price_for_two(300.0)       → "₹300 for two"
//! ```
//!
//! Inputs are decimal rupees (not paise), the unit the backend sends.

use crate::money::Money;

/// Currency glyph prefixed to every formatted amount.
pub const CURRENCY_SYMBOL: &str = "₹";

/// Suffix used on a vendor's "cost for two" label.
pub const FOR_TWO_SUFFIX: &str = " for two";

/// Formats an amount rounded to whole rupees.
///
/// Rounds half away from zero on the exact binary value, so `149.5` gives
/// `₹150` and `149.6` gives `₹150`.
///
/// ## Example
/// ```rust
/// use tiffin_core::currency::format_price;
///
/// assert_eq!(format_price(149.6), "₹150");
/// assert_eq!(format_price(99.0), "₹99");
/// ```
pub fn format_price(amount: f64) -> String {
    format!("{}{:.0}", CURRENCY_SYMBOL, amount.round())
}

/// Formats an amount with exactly two decimal places.
///
/// Rounds half away from zero on the exact binary value, so `1.005`
/// (stored as `1.00499...`) gives `₹1.00` and `0.125` gives `₹0.13`.
/// Non-finite input is printed as-is (`₹NaN`, `₹inf`).
///
/// ## Example
/// ```rust
/// use tiffin_core::currency::format_price_with_decimals;
///
/// assert_eq!(format_price_with_decimals(149.6), "₹149.60");
/// assert_eq!(format_price_with_decimals(20.0), "₹20.00");
/// ```
pub fn format_price_with_decimals(amount: f64) -> String {
    format!("{}{}", CURRENCY_SYMBOL, to_fixed_2(amount))
}

/// `amount` with exactly two decimals, without the currency glyph.
///
/// `{:.2}` already rounds the exact binary value but breaks ties to even.
/// A tie at the third decimal is only possible for odd multiples of 1/8
/// (`x.125`, `x.375`, `x.625`, `x.875`); those are rounded away from zero
/// in integer arithmetic.
pub(crate) fn to_fixed_2(amount: f64) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let eighths = amount * 8.0;
    if eighths.fract() == 0.0 && eighths % 2.0 != 0.0 {
        // |eighths| < 2^53 here: larger floats are all even integers
        let eighths = eighths as i128;
        let paise = (eighths.abs() * 25 + 1) / 2;
        let sign = if eighths < 0 { "-" } else { "" };
        return format!("{}{}.{:02}", sign, paise / 100, paise % 100);
    }

    format!("{:.2}", amount)
}

/// Formats a vendor's "cost for two" label.
///
/// The amount is printed as-is in its shortest form, without forced rounding.
///
/// ## Example
/// ```rust
/// use tiffin_core::currency::format_price_for_two;
///
/// assert_eq!(format_price_for_two(300.0), "₹300 for two");
/// assert_eq!(format_price_for_two(250.5), "₹250.5 for two");
/// ```
pub fn format_price_for_two(amount: f64) -> String {
    format!("{}{}{}", CURRENCY_SYMBOL, amount, FOR_TWO_SUFFIX)
}

/// Formats a [`Money`] value rounded to whole rupees, like [`format_price`].
///
/// Works on integer paise so cart totals never pass back through `f64`.
pub fn format_money(money: Money) -> String {
    let paise = money.paise();
    let rupees = if paise >= 0 {
        paise.saturating_add(50) / 100
    } else {
        paise.saturating_sub(50) / 100
    };
    format!("{}{}", CURRENCY_SYMBOL, rupees)
}
