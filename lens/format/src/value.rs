use {
    crate::{leading_fraction_zeros, round_significant, to_grouped_fixed},
    lens_math::Dec,
    lens_types::config::FormatConfig,
    serde::{Deserialize, Serialize},
};

/// Text shown when a small value can't be broken down into zeros and digits.
pub const SMALL_VALUE_FALLBACK: &str = "< 0.0001";

const CURRENCY_PREFIX: &str = "$";

/// Scales for compact notation as powers of ten, largest first.
const COMPACT_SCALES: [(i64, &str); 3] = [(9, "B"), (6, "M"), (3, "K")];

/// Options controlling how a number is formatted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatSpec {
    pub is_currency: bool,
    /// Whether values at or above `large_value_threshold` are abbreviated
    /// with K, M or B.
    pub use_compact_notation: bool,
    pub significant_digits: u32,
    pub decimal_places: u32,
    /// Positive values below this are written in subscript notation.
    pub small_value_threshold: Dec,
    pub large_value_threshold: Dec,
}

impl Default for FormatSpec {
    fn default() -> Self {
        Self::from(&FormatConfig::default())
    }
}

impl From<&FormatConfig> for FormatSpec {
    fn from(cfg: &FormatConfig) -> Self {
        Self {
            is_currency: false,
            use_compact_notation: true,
            significant_digits: cfg.significant_digits,
            decimal_places: cfg.decimal_places,
            small_value_threshold: cfg.small_value_threshold.clone(),
            large_value_threshold: cfg.large_value_threshold.clone(),
        }
    }
}

impl FormatSpec {
    pub fn currency(self) -> Self {
        Self {
            is_currency: true,
            ..self
        }
    }

    pub fn without_compact_notation(self) -> Self {
        Self {
            use_compact_notation: false,
            ..self
        }
    }

    pub fn with_significant_digits(self, significant_digits: u32) -> Self {
        Self {
            significant_digits,
            ..self
        }
    }

    pub fn with_decimal_places(self, decimal_places: u32) -> Self {
        Self {
            decimal_places,
            ..self
        }
    }

    pub fn with_small_value_threshold(self, small_value_threshold: Dec) -> Self {
        Self {
            small_value_threshold,
            ..self
        }
    }

    pub fn with_large_value_threshold(self, large_value_threshold: Dec) -> Self {
        Self {
            large_value_threshold,
            ..self
        }
    }

    fn prefix(&self) -> String {
        if self.is_currency {
            CURRENCY_PREFIX.to_string()
        } else {
            String::new()
        }
    }
}

/// A formatted number, ready for a renderer.
///
/// Subscript results describe a very small number like 0.0000034 as
/// "0.0" followed by a subscript 5 (the count of zeros after the decimal
/// point) and the digits "34", and leave the markup to the renderer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormatResult {
    Standard {
        prefix: String,
        text: String,
    },
    Subscript {
        prefix: String,
        leading_zero_count: u32,
        significant_digits_text: String,
    },
}

impl FormatResult {
    fn standard(prefix: String, text: impl Into<String>) -> Self {
        Self::Standard {
            prefix,
            text: text.into(),
        }
    }

    fn zero(spec: &FormatSpec) -> Self {
        let text = if spec.is_currency { "0.00" } else { "0" };
        Self::standard(spec.prefix(), text)
    }

    /// Render without markup, for logs and terminals. Subscripts are written
    /// as `0.0_5_34`.
    pub fn to_plain_string(&self) -> String {
        match self {
            FormatResult::Standard { prefix, text } => format!("{prefix}{text}"),
            FormatResult::Subscript {
                prefix,
                leading_zero_count,
                significant_digits_text,
            } => format!("{prefix}0.0_{leading_zero_count}_{significant_digits_text}"),
        }
    }
}

/// Format a decimal value.
pub fn format_value(value: &Dec, spec: &FormatSpec) -> FormatResult {
    if value.is_zero() {
        return FormatResult::zero(spec);
    }

    let prefix = spec.prefix();

    if spec.use_compact_notation && value.abs() >= spec.large_value_threshold {
        return format_compact(value, prefix);
    }

    if value.is_positive() && *value < spec.small_value_threshold {
        return format_small(value, spec, prefix);
    }

    if spec.is_currency {
        return FormatResult::standard(prefix, to_grouped_fixed(value, spec.decimal_places));
    }

    if value.abs() < Dec::one() {
        let rounded = round_significant(value, spec.significant_digits);
        let decimal_places = if value.abs() < Dec::new_percent(1) {
            let wanted = leading_fraction_zeros(value) as u32 + spec.significant_digits;
            spec.decimal_places.max(wanted)
        } else {
            spec.decimal_places
        };

        return FormatResult::standard(prefix, to_grouped_fixed(&rounded, decimal_places));
    }

    FormatResult::standard(prefix, to_grouped_fixed(value, spec.decimal_places))
}

/// Format a value given as text, e.g. from an API response. A leading `$`
/// marks the value as a currency amount. Text that isn't a number formats as
/// zero.
pub fn format_str(input: &str, spec: &FormatSpec) -> FormatResult {
    let input = input.trim();
    let (input, spec) = match input.strip_prefix(CURRENCY_PREFIX) {
        Some(rest) => (rest, spec.clone().currency()),
        None => (input, spec.clone()),
    };

    match input.parse::<Dec>() {
        Ok(value) => format_value(&value, &spec),
        Err(err) => {
            tracing::debug!(input, %err, "Formatting unparseable value as zero");
            FormatResult::zero(&spec)
        },
    }
}

/// Format a float. NaN and infinities format as zero.
pub fn format_f64(value: f64, spec: &FormatSpec) -> FormatResult {
    match Dec::from_f64(value) {
        Some(value) => format_value(&value, spec),
        None => FormatResult::zero(spec),
    }
}

fn format_compact(value: &Dec, prefix: String) -> FormatResult {
    let magnitude = value.abs();

    for (exponent, suffix) in COMPACT_SCALES {
        if magnitude >= Dec::one().shift(exponent) {
            let scaled = value.shift(-exponent);
            return FormatResult::standard(prefix, to_grouped_fixed(&scaled, 2) + suffix);
        }
    }

    // Only reachable with a large value threshold below 1000.
    FormatResult::standard(prefix, to_grouped_fixed(value, 2))
}

fn format_small(value: &Dec, spec: &FormatSpec, prefix: String) -> FormatResult {
    let parts = value.plain_parts();
    let zeros = parts.fraction.chars().take_while(|c| *c == '0').count();
    let digits = &parts.fraction[zeros..];

    if parts.integer != "0" || zeros == 0 || digits.is_empty() {
        return FormatResult::standard(prefix, SMALL_VALUE_FALLBACK);
    }

    let limit = if spec.is_currency {
        spec.decimal_places
    } else {
        spec.significant_digits
    };

    let significant_digits_text = match digits
        .chars()
        .take(limit as usize)
        .collect::<String>()
        .trim_end_matches('0')
    {
        "" => "1".to_string(),
        text => text.to_string(),
    };

    FormatResult::Subscript {
        prefix,
        leading_zero_count: zeros as u32,
        significant_digits_text,
    }
}

// ----------------------------------- tests -----------------------------------
