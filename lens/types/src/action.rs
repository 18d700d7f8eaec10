use {
    crate::{Denom, Uint128},
    serde::{Deserialize, Serialize},
};

/// A user action against a single market.
#[derive(
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ActionKind {
    Supply,
    Withdraw,
    Borrow,
    Repay,
}

/// A prospective action: what the user would like to do, before it's sent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ActionRequest {
    pub denom: Denom,
    pub kind: ActionKind,
    /// Amount in base units.
    pub amount: Uint128,
}

impl ActionRequest {
    pub fn new(denom: Denom, kind: ActionKind, amount: Uint128) -> Self {
        Self {
            denom,
            kind,
            amount,
        }
    }
}

// ----------------------------------- tests -----------------------------------
