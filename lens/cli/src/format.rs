use {
    crate::output::print_json_pretty,
    clap::Parser,
    lens_format::{format_str, FormatSpec},
    lens_math::Dec,
    lens_types::config::LensConfig,
};

#[derive(Parser)]
pub struct FormatCmd {
    /// The number to format; a leading `$` formats it as a currency amount
    #[arg(allow_hyphen_values = true)]
    value: String,

    /// Format as a currency amount
    #[arg(long, default_value_t = false)]
    currency: bool,

    /// Write large values out in full instead of abbreviating them
    #[arg(long, default_value_t = false)]
    no_compact: bool,

    /// Significant digits kept for small values [default: from config]
    #[arg(long)]
    significant_digits: Option<u32>,

    /// Decimal places of standard values [default: from config]
    #[arg(long)]
    decimal_places: Option<u32>,

    /// Positive values below this use subscript notation [default: from config]
    #[arg(long)]
    small_threshold: Option<Dec>,

    /// Values at or above this are abbreviated [default: from config]
    #[arg(long)]
    large_threshold: Option<Dec>,

    /// Print the structured result instead of plain text
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl FormatCmd {
    pub fn run(self, cfg: &LensConfig) -> anyhow::Result<()> {
        let result = format_str(&self.value, &self.spec(cfg));

        if self.json {
            return print_json_pretty(result);
        }

        println!("{}", result.to_plain_string());

        Ok(())
    }

    fn spec(&self, cfg: &LensConfig) -> FormatSpec {
        let mut spec = FormatSpec::from(&cfg.format);

        if self.currency {
            spec = spec.currency();
        }

        if self.no_compact {
            spec = spec.without_compact_notation();
        }

        if let Some(significant_digits) = self.significant_digits {
            spec = spec.with_significant_digits(significant_digits);
        }

        if let Some(decimal_places) = self.decimal_places {
            spec = spec.with_decimal_places(decimal_places);
        }

        if let Some(threshold) = &self.small_threshold {
            spec = spec.with_small_value_threshold(threshold.clone());
        }

        if let Some(threshold) = &self.large_threshold {
            spec = spec.with_large_value_threshold(threshold.clone());
        }

        spec
    }
}
