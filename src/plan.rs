use chrono::{Datelike, Months, NaiveDate};
use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::FinancingConfig;
use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::payments::{
    combine, project_payoff, schedule_for, CombinedSchedule, PayoffProjection, Schedule,
};
use crate::types::LoanKind;

/// evaluated schedule and payoff of one loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanOutcome {
    pub kind: LoanKind,
    pub principal: Money,
    pub schedule: Schedule,
    pub projection: PayoffProjection,
    /// date the balance reaches zero when the payment is kept up
    pub payoff_date: Option<NaiveDate>,
}

impl LoanOutcome {
    pub fn initial_monthly_payment(&self) -> Money {
        self.schedule
            .get(1)
            .map(|p| p.monthly_payment)
            .unwrap_or(Money::ZERO)
    }
}

/// result of evaluating a financing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingResult {
    pub start_date: NaiveDate,
    pub total_loan_amount: Money,
    pub loan_to_value: Option<Rate>,
    pub liquidity: Money,
    pub kfw: LoanOutcome,
    pub bank: LoanOutcome,
    pub combined: CombinedSchedule,
}

impl FinancingResult {
    pub fn initial_monthly_payment(&self) -> Money {
        self.kfw.initial_monthly_payment() + self.bank.initial_monthly_payment()
    }

    pub fn outcome(&self, kind: LoanKind) -> &LoanOutcome {
        match kind {
            LoanKind::Kfw => &self.kfw,
            LoanKind::Bank => &self.bank,
        }
    }

    /// later of the two payoff dates, `None` if either loan is never retired
    pub fn final_payoff_date(&self) -> Option<NaiveDate> {
        Some(self.kfw.payoff_date?.max(self.bank.payoff_date?))
    }
}

/// KfW plus bank financing of a property
#[derive(Debug, Clone)]
pub struct FinancingPlan {
    config: FinancingConfig,
}

impl FinancingPlan {
    pub fn new(config: FinancingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &FinancingConfig {
        &self.config
    }

    /// first day of repayment, falling back to the provider's current year
    pub fn start_date(&self, time_provider: &SafeTimeProvider) -> Result<NaiveDate> {
        let year = self
            .config
            .start_year
            .unwrap_or_else(|| time_provider.now().year());
        NaiveDate::from_ymd_opt(year, 1, 1).ok_or_else(|| LoanError::InvalidDate {
            message: format!("start year {} out of range", year),
        })
    }

    /// evaluate using the provider's clock for a missing start year
    pub fn evaluate_with_time(&self, time_provider: &SafeTimeProvider) -> Result<FinancingResult> {
        let start_date = self.start_date(time_provider)?;
        self.evaluate(start_date)
    }

    /// compute both schedules, merge them and project payoff dates
    pub fn evaluate(&self, start_date: NaiveDate) -> Result<FinancingResult> {
        let kfw = self.outcome(LoanKind::Kfw, start_date)?;
        let bank = self.outcome(LoanKind::Bank, start_date)?;
        let combined = combine(&kfw.schedule, &bank.schedule);

        info!(
            total_loan_amount = %self.config.total_loan_amount(),
            kfw_principal = %kfw.principal,
            bank_principal = %bank.principal,
            initial_payment = %(kfw.initial_monthly_payment() + bank.initial_monthly_payment()),
            total_interest = %combined.summary.total_interest_paid,
            months = combined.summary.final_payoff_month,
            "evaluated financing plan"
        );

        Ok(FinancingResult {
            start_date,
            total_loan_amount: self.config.total_loan_amount(),
            loan_to_value: self.config.loan_to_value(),
            liquidity: self.config.liquidity,
            kfw,
            bank,
            combined,
        })
    }

    fn outcome(&self, kind: LoanKind, start_date: NaiveDate) -> Result<LoanOutcome> {
        let params = match kind {
            LoanKind::Kfw => self.config.kfw_parameters()?,
            LoanKind::Bank => self.config.bank_parameters()?,
        };
        let schedule = schedule_for(&params);
        let projection = project_payoff(&schedule);
        let payoff_date = projection
            .total_months
            .and_then(|months| start_date.checked_add_months(Months::new(months)));

        Ok(LoanOutcome {
            kind,
            principal: params.principal(),
            schedule,
            projection,
            payoff_date,
        })
    }
}
