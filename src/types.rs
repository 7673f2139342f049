use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::inputs::IntoLendDecimal;

/// A numeric value as it arrives from the settings source.
///
/// Upstream feeds mix JSON integers, floats, and decimal strings for the
/// same field, so all three are accepted and converted on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDecimal {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl Default for RawDecimal {
    fn default() -> Self {
        RawDecimal::Integer(0)
    }
}

impl From<i64> for RawDecimal {
    fn from(value: i64) -> Self {
        RawDecimal::Integer(value)
    }
}

impl From<f64> for RawDecimal {
    fn from(value: f64) -> Self {
        RawDecimal::Float(value)
    }
}

impl From<&str> for RawDecimal {
    fn from(value: &str) -> Self {
        RawDecimal::Text(value.to_string())
    }
}

impl From<Decimal> for RawDecimal {
    fn from(value: Decimal) -> Self {
        RawDecimal::Text(value.to_string())
    }
}

/// An asset entry exactly as listed in the settings `asset_list`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAsset {
    pub id: String,
    pub supply_apy: RawDecimal,
    pub borrow_apy: RawDecimal,
    pub wallet_balance: RawDecimal,
    pub supply_balance: RawDecimal,
    #[serde(rename = "sTokenBalance")]
    pub stoken_balance: RawDecimal,
    pub borrow_balance: RawDecimal,
    pub collateral_factor: RawDecimal,
    pub token_price: RawDecimal,
    pub liquidity: RawDecimal,
}

impl RawAsset {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn supply_balance(mut self, value: impl Into<RawDecimal>) -> Self {
        self.supply_balance = value.into();
        self
    }

    pub fn borrow_balance(mut self, value: impl Into<RawDecimal>) -> Self {
        self.borrow_balance = value.into();
        self
    }

    pub fn wallet_balance(mut self, value: impl Into<RawDecimal>) -> Self {
        self.wallet_balance = value.into();
        self
    }

    pub fn supply_apy(mut self, value: impl Into<RawDecimal>) -> Self {
        self.supply_apy = value.into();
        self
    }

    pub fn borrow_apy(mut self, value: impl Into<RawDecimal>) -> Self {
        self.borrow_apy = value.into();
        self
    }

    pub fn token_price(mut self, value: impl Into<RawDecimal>) -> Self {
        self.token_price = value.into();
        self
    }

    pub fn liquidity(mut self, value: impl Into<RawDecimal>) -> Self {
        self.liquidity = value.into();
        self
    }
}

/// A market asset with every numeric field held as an exact decimal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub supply_apy: Decimal,
    pub borrow_apy: Decimal,
    pub wallet_balance: Decimal,
    pub supply_balance: Decimal,
    #[serde(rename = "sTokenBalance")]
    pub stoken_balance: Decimal,
    pub borrow_balance: Decimal,
    pub collateral_factor: Decimal,
    pub token_price: Decimal,
    pub liquidity: Decimal,
}

impl Asset {
    /// Converts every numeric field of a raw entry.
    ///
    /// Fails on the first malformed field, naming it in the error.
    pub fn from_raw(raw: &RawAsset) -> Result<Self, LendError> {
        let field = |name: &str, value: &RawDecimal| {
            value
                .clone()
                .into_lend_decimal()
                .map_err(|e| e.for_field(name))
        };

        Ok(Self {
            id: raw.id.clone(),
            supply_apy: field("supplyApy", &raw.supply_apy)?,
            borrow_apy: field("borrowApy", &raw.borrow_apy)?,
            wallet_balance: field("walletBalance", &raw.wallet_balance)?,
            supply_balance: field("supplyBalance", &raw.supply_balance)?,
            stoken_balance: field("sTokenBalance", &raw.stoken_balance)?,
            borrow_balance: field("borrowBalance", &raw.borrow_balance)?,
            collateral_factor: field("collateralFactor", &raw.collateral_factor)?,
            token_price: field("tokenPrice", &raw.token_price)?,
            liquidity: field("liquidity", &raw.liquidity)?,
        })
    }

    /// True once the user has a non-zero supply position.
    pub fn is_supplied(&self) -> bool {
        !self.supply_balance.is_zero()
    }

    /// True once the user has a non-zero borrow position.
    pub fn is_borrowed(&self) -> bool {
        !self.borrow_balance.is_zero()
    }

    /// Uppercase ticker of the underlying token.
    pub fn symbol(&self) -> String {
        self.id.to_uppercase()
    }

    /// Ticker of the interest-bearing receipt token.
    pub fn receipt_symbol(&self) -> String {
        if self.id == "wbtc" {
            "sBTC".to_string()
        } else {
            format!("s{}", self.symbol())
        }
    }
}

impl TryFrom<&RawAsset> for Asset {
    type Error = LendError;

    fn try_from(raw: &RawAsset) -> Result<Self, Self::Error> {
        Asset::from_raw(raw)
    }
}

/// Token precisions for one asset id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDecimals {
    /// Precision of the underlying token.
    pub token: u32,
    /// Precision of the receipt token.
    pub stoken: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LendError {
    #[error("invalid number for field `{field}`: {value}")]
    InvalidNumber { field: String, value: String },
    #[error("no token decimals configured for asset `{0}`")]
    MissingDecimals(String),
    #[error("action tab `{tab}` is not available in the {market} market")]
    TabNotInMarket { tab: String, market: String },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("io error: {0}")]
    Io(String),
}

impl LendError {
    /// Attaches a field name to a conversion failure.
    pub fn for_field(self, field: &str) -> Self {
        match self {
            LendError::InvalidNumber { value, .. } => LendError::InvalidNumber {
                field: field.to_string(),
                value,
            },
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_from_raw_mixed_inputs() {
        let raw = RawAsset::new("dai")
            .supply_balance("10.5")
            .borrow_balance(0)
            .supply_apy(3.25);

        let asset = Asset::from_raw(&raw).unwrap();
        assert_eq!(asset.supply_balance, dec!(10.5));
        assert_eq!(asset.borrow_balance, Decimal::ZERO);
        assert_eq!(asset.supply_apy, dec!(3.25));
        assert!(asset.is_supplied());
        assert!(!asset.is_borrowed());
    }

    #[test]
    fn test_from_raw_names_bad_field() {
        let raw = RawAsset::new("usdc").token_price("one dollar");
        match Asset::from_raw(&raw) {
            Err(LendError::InvalidNumber { field, value }) => {
                assert_eq!(field, "tokenPrice");
                assert_eq!(value, "one dollar");
            }
            other => panic!("Expected InvalidNumber, got {:?}", other),
        }
    }

    #[test]
    fn test_receipt_symbol() {
        let wbtc = Asset { id: "wbtc".into(), ..Default::default() };
        let usdt = Asset { id: "usdt".into(), ..Default::default() };
        assert_eq!(wbtc.receipt_symbol(), "sBTC");
        assert_eq!(usdt.receipt_symbol(), "sUSDT");
        assert_eq!(usdt.symbol(), "USDT");
    }

    #[test]
    fn test_raw_asset_json_shape() {
        let json = r#"{"id":"eth","supplyBalance":"0","borrowBalance":5,"sTokenBalance":1.5}"#;
        let raw: RawAsset = serde_json::from_str(json).unwrap();
        assert_eq!(raw.borrow_balance, RawDecimal::Integer(5));
        assert_eq!(raw.stoken_balance, RawDecimal::Float(1.5));

        let asset = Asset::from_raw(&raw).unwrap();
        assert_eq!(asset.borrow_balance, dec!(5));
        assert!(!asset.is_supplied());
    }
}
