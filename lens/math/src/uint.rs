use {
    crate::{Dec, MathError, MathResult},
    serde::{de, ser},
    std::{
        fmt::{self, Display},
        iter::Sum,
        str::FromStr,
    },
};

/// An amount of a token in its _base unit_, e.g. 1234 uatom = 0.001234 ATOM.
///
/// Serializes to a string, which is how lending contracts and the risk engine
/// encode `Uint128` in JSON.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Uint128(u128);

impl Uint128 {
    pub const MAX: Self = Self(u128::MAX);
    pub const ONE: Self = Self(1);
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn into_inner(self) -> u128 {
        self.0
    }

    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub const fn is_non_zero(self) -> bool {
        self.0 != 0
    }

    pub fn checked_add(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_add(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_add::<Self, _, _>(self, rhs))
    }

    pub fn checked_sub(self, rhs: Self) -> MathResult<Self> {
        self.0
            .checked_sub(rhs.0)
            .map(Self)
            .ok_or_else(|| MathError::overflow_sub::<Self, _, _>(self, rhs))
    }

    /// Subtract, clamping the result at zero instead of failing.
    pub const fn saturating_sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }

    pub const fn saturating_add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }

    /// Convert to an arbitrary precision decimal. Lossless.
    pub fn to_dec(self) -> Dec {
        Dec::from(self)
    }
}

impl From<u128> for Uint128 {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Uint128 {
    fn from(value: u64) -> Self {
        Self(value.into())
    }
}

impl From<u32> for Uint128 {
    fn from(value: u32) -> Self {
        Self(value.into())
    }
}

impl From<Uint128> for u128 {
    fn from(value: Uint128) -> Self {
        value.0
    }
}

impl Sum for Uint128 {
    /// Saturates at `Uint128::MAX` rather than panicking.
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl Display for Uint128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Uint128 {
    type Err = MathError;

    /// Possible inputs: "0", "1234", "000012".
    /// Disallowed: "", "-1", "+1", "1.5", "1e6".
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        if input.is_empty() || !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MathError::parse_number::<Self, _, _>(
                input,
                "not a non-negative integer",
            ));
        }

        input
            .parse::<u128>()
            .map(Self)
            .map_err(|err| MathError::parse_number::<Self, _, _>(input, err))
    }
}

impl ser::Serialize for Uint128 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> de::Deserialize<'de> for Uint128 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(Uint128Visitor)
    }
}

struct Uint128Visitor;

impl de::Visitor<'_> for Uint128Visitor {
    type Value = Uint128;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("a string-encoded unsigned integer")
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.parse().map_err(E::custom)
    }

    // Some feeds encode small amounts as bare JSON numbers.
    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(Uint128::from(v))
    }
}

// ----------------------------------- tests -----------------------------------
