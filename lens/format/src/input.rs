use {
    crate::format_max_amount,
    lens_math::{Dec, Rounding, Uint128},
};

/// The state of an amount input field after the user typed into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumericInput {
    /// Text to show in the field.
    pub input_value: String,
    /// The amount in base units, or `None` if the field is empty.
    pub amount_raw: Option<Uint128>,
}

impl NumericInput {
    pub fn empty() -> Self {
        Self {
            input_value: String::new(),
            amount_raw: None,
        }
    }

    fn new(input_value: impl Into<String>, amount_raw: Uint128) -> Self {
        Self {
            input_value: input_value.into(),
            amount_raw: Some(amount_raw),
        }
    }
}

fn is_numeric(input: &str) -> bool {
    let mut seen_dot = false;
    input.chars().all(|c| match c {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        },
        _ => false,
    })
}

/// Clean up what the user typed into an amount field and convert it into
/// base units.
///
/// - `,` is accepted as the decimal point.
/// - Anything that isn't digits with at most one decimal point clears the
///   field.
/// - Leading zeros are dropped and digits beyond the token's decimals are
///   cut off.
/// - If `max_amount` is non-zero, amounts above it are replaced by it.
pub fn normalize_numeric_input(input: &str, max_amount: Uint128, decimals: u32) -> NumericInput {
    let mut value = input.replacen(',', ".", 1);

    if value.is_empty() {
        return NumericInput::empty();
    }

    if value == "." {
        return NumericInput::new("0.", Uint128::ZERO);
    }

    if !is_numeric(&value) {
        return NumericInput::empty();
    }

    if value == "0" {
        return NumericInput::new("0", Uint128::ZERO);
    }

    if value.starts_with('0') && !value.contains('.') {
        value = value.trim_start_matches('0').to_string();
        if value.is_empty() {
            value = "0".to_string();
        }
    }

    let Ok(parsed) = numeric_value(&value) else {
        return NumericInput::empty();
    };

    let excess_decimals = value
        .split_once('.')
        .is_some_and(|(_, fraction)| fraction.len() > decimals as usize);
    if excess_decimals {
        value = parsed.round(decimals.into(), Rounding::Down).to_string();
    }

    let amount_raw = parsed
        .round(decimals.into(), Rounding::Down)
        .shift(decimals.into())
        .to_uint_floor()
        .unwrap_or(Uint128::MAX);

    if max_amount.is_non_zero() && amount_raw > max_amount {
        return NumericInput::new(format_max_amount(max_amount, decimals), max_amount);
    }

    NumericInput::new(value, amount_raw)
}

/// Parse text like "1.", ".5" or "12.34" that a user may leave in a field.
fn numeric_value(value: &str) -> Result<Dec, lens_math::MathError> {
    let value = value.strip_suffix('.').unwrap_or(value);
    if value.starts_with('.') {
        format!("0{value}").parse()
    } else if value.is_empty() {
        Ok(Dec::zero())
    } else {
        value.parse()
    }
}

// ----------------------------------- tests -----------------------------------
