use {
    crate::{MathError, MathResult, Uint128},
    bigdecimal::{
        num_bigint::{BigInt, Sign},
        BigDecimal,
    },
    serde::{de, ser},
    std::{
        cmp::Ordering,
        fmt::{self, Display, Write},
        iter::Sum,
        ops::{Add, Mul, Neg, Sub},
        str::FromStr,
    },
};

/// Largest absolute decimal exponent accepted when parsing. Anything beyond
/// this is far outside the range of any token amount or price.
const MAX_EXPONENT: i64 = 4096;

/// How to discard fractional digits beyond a given number of decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rounding {
    /// Round to the nearest neighbour; if equidistant, away from zero.
    HalfUp,
    /// Towards zero.
    Down,
    /// Towards negative infinity.
    Floor,
    /// Towards positive infinity.
    Ceil,
}

/// An arbitrary precision, signed decimal number.
///
/// Used for everything that isn't a base-unit amount: oracle prices, interest
/// rates, loan-to-value ratios, USD values. Serializes to a plain decimal
/// string (never scientific notation), e.g. `"0.000001234"`. Negative values
/// are allowed; callers that need a non-negative value check the sign.
#[derive(Default, Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Dec(BigDecimal);

impl Dec {
    pub fn new(inner: BigDecimal) -> Self {
        Self(inner)
    }

    pub fn zero() -> Self {
        Self(BigDecimal::default())
    }

    pub fn one() -> Self {
        Self::from(1u64)
    }

    /// Create a decimal from a percentage, e.g. `Dec::new_percent(5)` = 0.05.
    pub fn new_percent(percent: u64) -> Self {
        Self(BigDecimal::new(BigInt::from(percent), 2))
    }

    /// Create a decimal from its atomic representation, e.g. atomics = 1234
    /// and decimal places = 3 gives 1.234.
    pub fn from_atomics(atomics: i128, decimal_places: i64) -> Self {
        Self(BigDecimal::new(BigInt::from(atomics), decimal_places))
    }

    /// Create a decimal from a float. Returns `None` for NaN and infinities.
    ///
    /// Goes through the float's shortest round-trip representation, so
    /// `0.1f64` becomes exactly 0.1 rather than its binary expansion.
    pub fn from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }

        value.to_string().parse().ok()
    }

    pub fn inner(&self) -> &BigDecimal {
        &self.0
    }

    pub fn into_inner(self) -> BigDecimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.sign() == Sign::NoSign
    }

    pub fn is_positive(&self) -> bool {
        self.0.sign() == Sign::Plus
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub fn abs(&self) -> Self {
        Self(self.0.abs())
    }

    /// Lossy conversion into a float, used only where the result feeds an
    /// inherently approximate computation (e.g. compounding).
    pub fn to_f64(&self) -> f64 {
        self.to_string().parse().unwrap_or_default()
    }

    /// Multiply by `10^exponent`. Exact: only the decimal point moves.
    pub fn shift(&self, exponent: i64) -> Self {
        let (atomics, scale) = self.0.as_bigint_and_exponent();
        Self(BigDecimal::new(atomics, scale - exponent))
    }

    pub fn checked_div(&self, rhs: &Self) -> MathResult<Self> {
        if rhs.is_zero() {
            return Err(MathError::division_by_zero(self));
        }

        Ok(Self(&self.0 / &rhs.0))
    }

    /// Discard fractional digits beyond `decimal_places` using the given
    /// rounding mode. Numbers that already fit are returned unchanged.
    pub fn round(&self, decimal_places: i64, rounding: Rounding) -> Self {
        let (atomics, scale) = self.0.as_bigint_and_exponent();

        if scale <= decimal_places {
            return self.clone();
        }

        let divisor = pow10(scale - decimal_places);
        let quotient = &atomics / &divisor;
        let remainder = &atomics - &quotient * &divisor;
        let negative = atomics.sign() == Sign::Minus;
        let inexact = remainder.sign() != Sign::NoSign;

        let bump = match rounding {
            Rounding::HalfUp => {
                let remainder = if negative { -remainder } else { remainder };
                &remainder + &remainder >= divisor
            },
            Rounding::Down => false,
            Rounding::Floor => negative && inexact,
            Rounding::Ceil => !negative && inexact,
        };

        let quotient = match (bump, negative) {
            (false, _) => quotient,
            (true, false) => quotient + BigInt::from(1),
            (true, true) => quotient - BigInt::from(1),
        };

        Self(BigDecimal::new(quotient, decimal_places))
    }

    pub fn round_half_up(&self, decimal_places: i64) -> Self {
        self.round(decimal_places, Rounding::HalfUp)
    }

    pub fn floor(&self) -> Self {
        self.round(0, Rounding::Floor)
    }

    pub fn ceil(&self) -> Self {
        self.round(0, Rounding::Ceil)
    }

    pub fn to_uint_floor(&self) -> MathResult<Uint128> {
        self.to_uint(Rounding::Floor)
    }

    pub fn to_uint_ceil(&self) -> MathResult<Uint128> {
        self.to_uint(Rounding::Ceil)
    }

    fn to_uint(&self, rounding: Rounding) -> MathResult<Uint128> {
        let rounded = self.round(0, rounding);

        if rounded.is_negative() {
            return Err(MathError::negative_to_unsigned::<Uint128, _>(self));
        }

        let (atomics, scale) = rounded.0.as_bigint_and_exponent();
        let integer = match scale.cmp(&0) {
            Ordering::Less => atomics * pow10(-scale),
            _ => atomics,
        };

        u128::try_from(&integer)
            .map(Uint128::new)
            .map_err(|_| MathError::overflow_conversion::<Uint128, _>(self))
    }

    /// Split into sign, integer digits and fractional digits, without any
    /// exponent. Trailing fractional zeros are removed; the integer part is
    /// `"0"` for numbers with magnitude below one.
    pub fn plain_parts(&self) -> PlainParts {
        let (atomics, scale) = self.0.as_bigint_and_exponent();
        let negative = atomics.sign() == Sign::Minus;
        let digits = atomics.magnitude().to_string();

        let (integer, fraction) = if scale <= 0 {
            let mut integer = digits;
            integer.extend(std::iter::repeat('0').take((-scale) as usize));
            (integer, String::new())
        } else {
            let scale = scale as usize;
            if digits.len() > scale {
                let (integer, fraction) = digits.split_at(digits.len() - scale);
                (integer.to_string(), fraction.to_string())
            } else {
                let mut fraction = "0".repeat(scale - digits.len());
                fraction.push_str(&digits);
                ("0".to_string(), fraction)
            }
        };

        let integer = integer.trim_start_matches('0');
        let fraction = fraction.trim_end_matches('0');

        PlainParts {
            negative,
            integer: if integer.is_empty() {
                "0".to_string()
            } else {
                integer.to_string()
            },
            fraction: fraction.to_string(),
        }
    }
}

fn pow10(exponent: i64) -> BigInt {
    BigInt::from(10u32).pow(exponent.unsigned_abs() as u32)
}

/// A decimal number written out digit by digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainParts {
    pub negative: bool,
    pub integer: String,
    pub fraction: String,
}

impl From<Uint128> for Dec {
    fn from(value: Uint128) -> Self {
        Self(BigDecimal::from(BigInt::from(value.into_inner())))
    }
}

impl From<u64> for Dec {
    fn from(value: u64) -> Self {
        Self(BigDecimal::from(BigInt::from(value)))
    }
}

impl From<i64> for Dec {
    fn from(value: i64) -> Self {
        Self(BigDecimal::from(BigInt::from(value)))
    }
}

impl From<BigDecimal> for Dec {
    fn from(value: BigDecimal) -> Self {
        Self(value)
    }
}

impl Add for Dec {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl<'a> Add<&'a Dec> for &'a Dec {
    type Output = Dec;

    fn add(self, rhs: &'a Dec) -> Self::Output {
        Dec(&self.0 + &rhs.0)
    }
}

impl Sub for Dec {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl<'a> Sub<&'a Dec> for &'a Dec {
    type Output = Dec;

    fn sub(self, rhs: &'a Dec) -> Self::Output {
        Dec(&self.0 - &rhs.0)
    }
}

impl Mul for Dec {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl<'a> Mul<&'a Dec> for &'a Dec {
    type Output = Dec;

    fn mul(self, rhs: &'a Dec) -> Self::Output {
        Dec(&self.0 * &rhs.0)
    }
}

impl Neg for Dec {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Dec {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::zero(), Add::add)
    }
}

impl Display for Dec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts = self.plain_parts();

        if parts.negative {
            f.write_char('-')?;
        }

        f.write_str(&parts.integer)?;

        if !parts.fraction.is_empty() {
            f.write_char('.')?;
            f.write_str(&parts.fraction)?;
        }

        Ok(())
    }
}

impl FromStr for Dec {
    type Err = MathError;

    /// Possible inputs: "1.23", "-0.5", "000012", ".5", "3.4e-6".
    /// Disallowed: "", "NaN", "inf", "1,000".
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() {
            return Err(MathError::parse_number::<Self, _, _>(input, "empty string"));
        }

        let inner = BigDecimal::from_str(input)
            .map_err(|err| MathError::parse_number::<Self, _, _>(input, err))?;

        let (_, scale) = inner.as_bigint_and_exponent();
        if scale.abs() > MAX_EXPONENT {
            return Err(MathError::parse_number::<Self, _, _>(
                input,
                "exponent out of range",
            ));
        }

        Ok(Self(inner))
    }
}

impl ser::Serialize for Dec {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Dec {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(DecVisitor)
    }
}

struct DecVisitor;

impl de::Visitor<'_> for DecVisitor {
    type Value = Dec;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded decimal number")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Dec::from(v))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Dec::from(v))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Dec::from_f64(v).ok_or_else(|| E::custom(format!("non-finite number: {v}")))
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, proptest::prelude::*, test_case::test_case};

    fn dec(s: &str) -> Dec {
        s.parse().unwrap()
    }

    #[test_case("1.23" => "1.23"; "simple")]
    #[test_case("1.2300" => "1.23"; "trailing zeros")]
    #[test_case("3.4e-6" => "0.0000034"; "scientific small")]
    #[test_case("1.5e9" => "1500000000"; "scientific large")]
    #[test_case("-0.05" => "-0.05"; "negative")]
    #[test_case(".5" => "0.5"; "no integer part")]
    #[test_case("000" => "0"; "zeros")]
    fn plain_display(input: &str) -> String {
        dec(input).to_string()
    }

    #[test_case("" ; "empty")]
    #[test_case("NaN" ; "nan")]
    #[test_case("inf" ; "infinity")]
    #[test_case("1,000" ; "grouped")]
    #[test_case("1e99999" ; "huge exponent")]
    fn parsing_rejects(input: &str) {
        assert!(input.parse::<Dec>().is_err());
    }

    #[test_case("1.005", 2 => "1.01"; "tie rounds up")]
    #[test_case("1.0049", 2 => "1"; "below tie rounds down")]
    #[test_case("-1.005", 2 => "-1.01"; "negative tie rounds away from zero")]
    #[test_case("0.00345", 4 => "0.0035"; "small")]
    #[test_case("999.995", 2 => "1000"; "carry")]
    #[test_case("12", 2 => "12"; "already fits")]
    fn rounding_half_up(input: &str, dp: i64) -> String {
        dec(input).round_half_up(dp).to_string()
    }

    #[test_case("1.9", Rounding::Floor => "1"; "floor positive")]
    #[test_case("-1.1", Rounding::Floor => "-2"; "floor negative")]
    #[test_case("1.1", Rounding::Ceil => "2"; "ceil positive")]
    #[test_case("-1.9", Rounding::Ceil => "-1"; "ceil negative")]
    #[test_case("-1.9", Rounding::Down => "-1"; "down negative")]
    fn rounding_modes(input: &str, rounding: Rounding) -> String {
        dec(input).round(0, rounding).to_string()
    }

    #[test]
    fn shifting_moves_the_decimal_point() {
        assert_eq!(dec("1.5").shift(-6).to_string(), "0.0000015");
        assert_eq!(dec("0.0000015").shift(6).to_string(), "1.5");
        assert_eq!(dec("42").shift(0), dec("42"));
    }

    #[test]
    fn converting_into_uint() {
        assert_eq!(dec("1000000.0951").to_uint_ceil().unwrap(), Uint128::new(1_000_001));
        assert_eq!(dec("1000000.0951").to_uint_floor().unwrap(), Uint128::new(1_000_000));
        assert_eq!(dec("1.5e3").to_uint_floor().unwrap(), Uint128::new(1_500));
        assert!(dec("-1").to_uint_floor().is_err());
        assert!(dec("1e40").to_uint_floor().is_err());
    }

    #[test]
    fn division_by_zero_is_an_error() {
        assert!(dec("1").checked_div(&Dec::zero()).is_err());
        assert_eq!(dec("1").checked_div(&dec("4")).unwrap(), dec("0.25"));
    }

    #[test]
    fn floats_use_shortest_representation() {
        assert_eq!(Dec::from_f64(0.1).unwrap(), dec("0.1"));
        assert_eq!(Dec::from_f64(0.0000034).unwrap(), dec("0.0000034"));
        assert!(Dec::from_f64(f64::NAN).is_none());
        assert!(Dec::from_f64(f64::INFINITY).is_none());
    }

    #[test]
    fn serde_uses_plain_strings() {
        let json = serde_json::to_string(&dec("3.4e-6")).unwrap();
        assert_eq!(json, r#""0.0000034""#);

        let from_num: Dec = serde_json::from_str("0.25").unwrap();
        assert_eq!(from_num, dec("0.25"));
    }

    proptest! {
        #[test]
        fn shift_is_reversible(atomics in any::<i64>(), scale in -20i64..20, shift in -30i64..30) {
            let value = Dec::from_atomics(atomics.into(), scale);
            prop_assert_eq!(value.shift(shift).shift(-shift), value);
        }

        #[test]
        fn half_up_stays_within_half_a_unit(atomics in any::<i64>(), dp in 0i64..6) {
            let value = Dec::from_atomics(atomics.into(), 8);
            let rounded = value.round_half_up(dp);
            let diff = (&rounded - &value).abs();
            prop_assert!(diff <= Dec::from_atomics(5, dp + 1));
        }
    }
}
