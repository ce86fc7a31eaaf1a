use serde::{Deserialize, Serialize};
use std::fmt;

use crate::decimal::Money;
use crate::errors::LoanError;

/// the two loans that make up a financing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanKind {
    /// subsidized loan with a fixed principal
    Kfw,
    /// complementary bank loan covering the rest
    Bank,
}

impl fmt::Display for LoanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanKind::Kfw => write!(f, "KfW"),
            LoanKind::Bank => write!(f, "bank"),
        }
    }
}

/// how the monthly payment of a schedule was derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AmortizationMethod {
    /// payment fixed at principal * (interest + initial repayment) / 12
    FixedRepayment,
    /// classic annuity that retires the loan exactly at term
    Annuity,
}

/// recognized KfW principal amounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(try_from = "Money", into = "Money")]
pub enum KfwAmount {
    /// 100 000
    #[default]
    Standard,
    /// 220 000
    Extended,
}

impl KfwAmount {
    pub const ALL: [KfwAmount; 2] = [KfwAmount::Standard, KfwAmount::Extended];

    pub fn principal(&self) -> Money {
        match self {
            KfwAmount::Standard => Money::from_major(100_000),
            KfwAmount::Extended => Money::from_major(220_000),
        }
    }
}

impl TryFrom<Money> for KfwAmount {
    type Error = LoanError;

    fn try_from(amount: Money) -> Result<Self, Self::Error> {
        KfwAmount::ALL
            .into_iter()
            .find(|option| option.principal() == amount)
            .ok_or(LoanError::UnsupportedKfwAmount { amount })
    }
}

impl From<KfwAmount> for Money {
    fn from(amount: KfwAmount) -> Self {
        amount.principal()
    }
}
