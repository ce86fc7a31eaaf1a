use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::LoanParameters;
use crate::types::KfwAmount;

/// financing configuration for a property purchase
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingConfig {
    pub property_value: Money,
    pub liquidity: Money,
    /// first year of repayment, current year when absent
    #[serde(default)]
    pub start_year: Option<i32>,
    pub kfw: KfwLoanTerms,
    pub bank: LoanTerms,
}

/// rates and term of one loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanTerms {
    pub annual_interest_rate: Rate,
    pub annual_repayment_rate: Rate,
    pub term_years: u32,
}

/// KfW loan: one of the recognized amounts plus its terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KfwLoanTerms {
    pub amount: KfwAmount,
    pub terms: LoanTerms,
}

impl LoanTerms {
    pub fn new(annual_interest_rate: Rate, annual_repayment_rate: Rate, term_years: u32) -> Self {
        Self {
            annual_interest_rate,
            annual_repayment_rate,
            term_years,
        }
    }

    /// attach a principal and validate
    pub fn parameters(&self, principal: Money) -> Result<LoanParameters> {
        LoanParameters::new(
            principal,
            self.annual_interest_rate,
            self.annual_repayment_rate,
            self.term_years,
        )
    }
}

impl Default for FinancingConfig {
    fn default() -> Self {
        Self {
            property_value: Money::from_major(700_000),
            liquidity: Money::from_major(50_000),
            start_year: None,
            kfw: KfwLoanTerms {
                amount: KfwAmount::Standard,
                terms: LoanTerms::new(
                    Rate::from_percentage(1),
                    Rate::from_percentage(2),
                    10,
                ),
            },
            bank: LoanTerms::new(
                Rate::from_percentage_decimal(dec!(3.45)),
                Rate::from_percentage(3),
                10,
            ),
        }
    }
}

impl FinancingConfig {
    pub fn builder() -> FinancingConfigBuilder {
        FinancingConfigBuilder::new()
    }

    /// load configuration from json
    pub fn from_json(json: &str) -> Result<Self> {
        let config: FinancingConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// property value less available liquidity
    pub fn total_loan_amount(&self) -> Money {
        (self.property_value - self.liquidity).max(Money::ZERO)
    }

    pub fn kfw_principal(&self) -> Money {
        self.kfw.amount.principal()
    }

    /// remainder after liquidity and the KfW loan, never negative
    pub fn bank_principal(&self) -> Money {
        (self.total_loan_amount() - self.kfw_principal()).max(Money::ZERO)
    }

    /// share of the property value that is financed
    pub fn loan_to_value(&self) -> Option<Rate> {
        self.total_loan_amount().ratio_of(self.property_value)
    }

    pub fn kfw_parameters(&self) -> Result<LoanParameters> {
        self.kfw.terms.parameters(self.kfw_principal())
    }

    pub fn bank_parameters(&self) -> Result<LoanParameters> {
        self.bank.parameters(self.bank_principal())
    }

    pub fn validate(&self) -> Result<()> {
        if !self.property_value.is_positive() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("property value must be positive, got {}", self.property_value),
            });
        }
        if self.liquidity.is_negative() {
            return Err(LoanError::InvalidConfiguration {
                message: format!("liquidity must not be negative, got {}", self.liquidity),
            });
        }
        if self.liquidity > self.property_value {
            return Err(LoanError::InvalidConfiguration {
                message: format!(
                    "liquidity {} exceeds property value {}",
                    self.liquidity, self.property_value
                ),
            });
        }
        self.kfw_parameters()?;
        self.bank_parameters()?;
        Ok(())
    }
}

/// builder for financing configurations, unset fields keep their defaults
#[derive(Debug, Default)]
pub struct FinancingConfigBuilder {
    property_value: Option<Money>,
    liquidity: Option<Money>,
    start_year: Option<i32>,
    kfw_amount: Option<KfwAmount>,
    kfw_terms: Option<LoanTerms>,
    bank_terms: Option<LoanTerms>,
}

impl FinancingConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property_value(mut self, value: Money) -> Self {
        self.property_value = Some(value);
        self
    }

    pub fn liquidity(mut self, liquidity: Money) -> Self {
        self.liquidity = Some(liquidity);
        self
    }

    pub fn start_year(mut self, year: i32) -> Self {
        self.start_year = Some(year);
        self
    }

    pub fn kfw_amount(mut self, amount: KfwAmount) -> Self {
        self.kfw_amount = Some(amount);
        self
    }

    pub fn kfw_terms(mut self, terms: LoanTerms) -> Self {
        self.kfw_terms = Some(terms);
        self
    }

    pub fn bank_terms(mut self, terms: LoanTerms) -> Self {
        self.bank_terms = Some(terms);
        self
    }

    pub fn build(self) -> Result<FinancingConfig> {
        let defaults = FinancingConfig::default();

        let config = FinancingConfig {
            property_value: self.property_value.unwrap_or(defaults.property_value),
            liquidity: self.liquidity.unwrap_or(defaults.liquidity),
            start_year: self.start_year.or(defaults.start_year),
            kfw: KfwLoanTerms {
                amount: self.kfw_amount.unwrap_or(defaults.kfw.amount),
                terms: self.kfw_terms.unwrap_or(defaults.kfw.terms),
            },
            bank: self.bank_terms.unwrap_or(defaults.bank),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_derived_amounts() {
        let config = FinancingConfig::default();

        assert_eq!(config.total_loan_amount(), Money::from_major(650_000));
        assert_eq!(config.kfw_principal(), Money::from_major(100_000));
        assert_eq!(config.bank_principal(), Money::from_major(550_000));
        assert_eq!(
            config.loan_to_value().unwrap().as_percentage().round_dp(1),
            dec!(92.9)
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bank_principal_clamped_at_zero() {
        let config = FinancingConfig::builder()
            .property_value(Money::from_major(300_000))
            .liquidity(Money::from_major(150_000))
            .kfw_amount(KfwAmount::Extended)
            .build()
            .unwrap();

        assert_eq!(config.total_loan_amount(), Money::from_major(150_000));
        assert_eq!(config.bank_principal(), Money::ZERO);
        assert_eq!(config.bank_parameters().unwrap().principal(), Money::ZERO);
    }

    #[test]
    fn test_liquidity_above_property_value_rejected() {
        let result = FinancingConfig::builder()
            .property_value(Money::from_major(100_000))
            .liquidity(Money::from_major(200_000))
            .build();

        assert!(matches!(result, Err(LoanError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_invalid_loan_terms_rejected() {
        let result = FinancingConfig::builder()
            .bank_terms(LoanTerms::new(Rate::from_percentage(3), Rate::from_percentage(2), 0))
            .build();

        assert!(matches!(
            result,
            Err(LoanError::InvalidParameter { field: "term_years", .. })
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_configuration() {
        let config = FinancingConfig::builder()
            .kfw_amount(KfwAmount::Extended)
            .start_year(2026)
            .build()
            .unwrap();

        let json = config.to_json_pretty().unwrap();
        assert!(json.contains("\"amount\": \"220000\""));

        let parsed = FinancingConfig::from_json(&json).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_json_with_unknown_kfw_amount_rejected() {
        let json = r#"{
            "property_value": "500000",
            "liquidity": "50000",
            "kfw": {
                "amount": "150000",
                "terms": { "annual_interest_rate": "0.01", "annual_repayment_rate": "0.02", "term_years": 10 }
            },
            "bank": { "annual_interest_rate": "0.0345", "annual_repayment_rate": "0.03", "term_years": 10 }
        }"#;

        assert!(matches!(
            FinancingConfig::from_json(json),
            Err(LoanError::Serialization(_))
        ));
    }

    #[test]
    fn test_json_without_start_year() {
        let json = r#"{
            "property_value": "500000",
            "liquidity": "50000",
            "kfw": {
                "amount": "100000",
                "terms": { "annual_interest_rate": "0.01", "annual_repayment_rate": "0.02", "term_years": 10 }
            },
            "bank": { "annual_interest_rate": "0.0345", "annual_repayment_rate": "0.03", "term_years": 15 }
        }"#;

        let config = FinancingConfig::from_json(json).unwrap();
        assert_eq!(config.start_year, None);
        assert_eq!(config.bank_principal(), Money::from_major(350_000));
        assert_eq!(config.bank.term_years, 15);
    }
}
