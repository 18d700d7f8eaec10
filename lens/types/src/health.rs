use {
    crate::{Dec, Denom, Uint128},
    serde::{Deserialize, Serialize},
};

/// Health values computed by the risk engine.
///
/// A health factor is the ratio of risk-adjusted collateral to debt; it is
/// `None` when the account has no debt.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct HealthResult {
    pub total_debt_value: Uint128,
    pub total_collateral_value: Uint128,
    pub max_ltv_adjusted_collateral: Uint128,
    pub liquidation_threshold_adjusted_collateral: Uint128,
    pub max_ltv_health_factor: Option<Dec>,
    pub liquidation_health_factor: Option<Dec>,
    pub liquidatable: bool,
    pub above_max_ltv: bool,
}

/// Where borrowed funds are sent. Affects how much can be borrowed, since
/// funds kept in the account still count as collateral.
#[derive(Serialize, Deserialize, Default, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BorrowTarget {
    Deposit,
    #[default]
    Wallet,
    Vault {
        address: String,
    },
    Swap {
        denom_out: Denom,
        slippage: Dec,
    },
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, serde_json::json};

    #[test]
    fn parsing_engine_output_without_debt() {
        let result: HealthResult = serde_json::from_value(json!({
            "total_debt_value": "0",
            "total_collateral_value": "1500",
            "max_ltv_health_factor": null,
            "liquidation_health_factor": null,
            "liquidatable": false,
            "above_max_ltv": false
        }))
        .unwrap();

        assert_eq!(result.total_collateral_value, Uint128::new(1500));
        assert!(result.liquidation_health_factor.is_none());
    }

    #[test]
    fn borrow_target_serializes_snake_case() {
        assert_eq!(serde_json::to_value(BorrowTarget::Wallet).unwrap(), json!("wallet"));
    }
}
