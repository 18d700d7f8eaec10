use lens_math::{Dec, Rounding};

/// Render a decimal with exactly `decimal_places` fractional digits, rounding
/// half up, and the integer part grouped by thousands with `,`.
///
/// ```
/// use {lens_format::to_grouped_fixed, lens_math::Dec};
///
/// let value: Dec = "1234567.891".parse().unwrap();
/// assert_eq!(to_grouped_fixed(&value, 2), "1,234,567.89");
/// ```
pub fn to_grouped_fixed(value: &Dec, decimal_places: u32) -> String {
    let rounded = value.round(decimal_places.into(), Rounding::HalfUp);
    let parts = rounded.plain_parts();

    let mut out = String::new();
    // A negative value that rounds to zero keeps its sign, e.g. "-0.00".
    if value.is_negative() {
        out.push('-');
    }

    out.push_str(&group_thousands(&parts.integer));

    if decimal_places > 0 {
        out.push('.');
        out.push_str(&parts.fraction);
        for _ in parts.fraction.len()..decimal_places as usize {
            out.push('0');
        }
    }

    out
}

/// Insert `,` between every group of three digits, counting from the right.
pub fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }

    out
}

/// Round to the given number of significant digits, half up.
///
/// Zero is returned unchanged.
pub fn round_significant(value: &Dec, significant_digits: u32) -> Dec {
    if value.is_zero() {
        return value.clone();
    }

    let parts = value.plain_parts();
    let decimal_places = if parts.integer != "0" {
        i64::from(significant_digits) - parts.integer.len() as i64
    } else {
        leading_fraction_zeros(value) as i64 + i64::from(significant_digits)
    };

    value.round(decimal_places, Rounding::HalfUp)
}

/// Number of zeros between the decimal point and the first significant
/// digit, for a value whose magnitude is below one. Zero otherwise.
pub fn leading_fraction_zeros(value: &Dec) -> usize {
    let parts = value.plain_parts();
    if parts.integer != "0" {
        return 0;
    }

    parts.fraction.chars().take_while(|c| *c == '0').count()
}

// ----------------------------------- tests -----------------------------------
