use {
    crate::{format_value, FormatSpec},
    lens_math::{Dec, Rounding, Uint128},
};

/// Convert an amount in base units into whole tokens.
pub fn to_natural_units(amount: Uint128, decimals: u32) -> Dec {
    amount.to_dec().shift(-i64::from(decimals))
}

/// Format a token balance given in base units, e.g. 1234567 untrn with
/// 6 decimals -> "1.23". Large balances are written out in full.
pub fn format_token_balance(
    amount: Uint128,
    decimals: u32,
    significant_digits: u32,
    fixed_decimals: u32,
) -> String {
    let spec = FormatSpec::default()
        .without_compact_notation()
        .with_significant_digits(significant_digits)
        .with_decimal_places(fixed_decimals);

    format_value(&to_natural_units(amount, decimals), &spec).to_plain_string()
}

/// Render a maximum amount in base units as a plain number of whole tokens,
/// suitable for filling an input field. Never rounds up.
pub fn format_max_amount(amount: Uint128, decimals: u32) -> String {
    to_natural_units(amount, decimals)
        .round(decimals.into(), Rounding::Down)
        .to_string()
}

// ----------------------------------- tests -----------------------------------
