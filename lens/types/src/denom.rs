use {
    serde::{de, ser},
    std::{
        borrow::Borrow,
        fmt::{self, Display},
        str::FromStr,
    },
};

/// Minimum and maximum length of a denom, in bytes.
const MIN_LEN: usize = 3;
const MAX_LEN: usize = 128;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DenomError {
    #[error("invalid denom `{denom}`: {reason}")]
    Invalid { denom: String, reason: &'static str },
}

/// Identifier of a fungible token, e.g. `untrn` or `ibc/B559A80D...`.
///
/// Must be 3-128 bytes, start with an ASCII letter, and contain only ASCII
/// alphanumerics and `/ : . _ -`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Denom(String);

impl Denom {
    pub fn new<T>(denom: T) -> Result<Self, DenomError>
    where
        T: Into<String>,
    {
        let denom = denom.into();

        if denom.len() < MIN_LEN || denom.len() > MAX_LEN {
            return Err(DenomError::Invalid {
                denom,
                reason: "length must be between 3 and 128",
            });
        }

        if !denom.starts_with(|c: char| c.is_ascii_alphabetic()) {
            return Err(DenomError::Invalid {
                denom,
                reason: "must start with a letter",
            });
        }

        if !denom
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-'))
        {
            return Err(DenomError::Invalid {
                denom,
                reason: "contains an invalid character",
            });
        }

        Ok(Self(denom))
    }

    /// Create a denom without checking its validity. Only meant for
    /// compile-time constants and tests.
    pub fn new_unchecked<T>(denom: T) -> Self
    where
        T: Into<String>,
    {
        Self(denom.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Denom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Denom {
    type Err = DenomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for Denom {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Denom {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Denom {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Denom {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl ser::Serialize for Denom {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> de::Deserialize<'de> for Denom {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let denom = <String as de::Deserialize>::deserialize(deserializer)?;
        Denom::new(denom).map_err(de::Error::custom)
    }
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, test_case::test_case};

    #[test_case("untrn" => true; "native")]
    #[test_case("ibc/B559A80D62249C8AA07A380E2A2BEA6E5CA9A6F079C912C3A9E9B494105E4F81" => true; "ibc")]
    #[test_case("factory/neutron1abc/udatom" => true; "token factory")]
    #[test_case("ab" => false; "too short")]
    #[test_case("1abc" => false; "starts with digit")]
    #[test_case("u atom" => false; "whitespace")]
    fn validating(denom: &str) -> bool {
        Denom::new(denom).is_ok()
    }

    #[test]
    fn deserializing_rejects_invalid() {
        assert!(serde_json::from_str::<Denom>(r#""uatom""#).is_ok());
        assert!(serde_json::from_str::<Denom>(r#""x""#).is_err());
    }
}
