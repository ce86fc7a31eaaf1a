/// serializable views for presentation layers
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::payments::{CombinedPeriod, CombinedSchedule, PaymentPeriod, Schedule};
use crate::plan::{FinancingResult, LoanOutcome};
use crate::types::{AmortizationMethod, LoanKind};

/// one table row, amounts rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    pub month: u32,
    pub remaining_balance: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    pub total_payment: Money,
}

impl From<&PaymentPeriod> for ScheduleRow {
    fn from(period: &PaymentPeriod) -> Self {
        ScheduleRow {
            month: period.period_index,
            remaining_balance: period.closing_balance.to_cents(),
            principal_payment: period.principal_portion.to_cents(),
            interest_payment: period.interest_portion.to_cents(),
            total_payment: period.monthly_payment.to_cents(),
        }
    }
}

impl From<&CombinedPeriod> for ScheduleRow {
    fn from(period: &CombinedPeriod) -> Self {
        ScheduleRow {
            month: period.period_index,
            remaining_balance: period.closing_balance.to_cents(),
            principal_payment: period.principal_portion.to_cents(),
            interest_payment: period.interest_portion.to_cents(),
            total_payment: period.monthly_payment.to_cents(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleView {
    pub method: AmortizationMethod,
    pub principal: Money,
    pub interest_rate: Rate,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
    pub rows: Vec<ScheduleRow>,
}

impl ScheduleView {
    pub fn from_schedule(schedule: &Schedule) -> Self {
        ScheduleView {
            method: schedule.method,
            principal: schedule.principal,
            interest_rate: schedule.annual_interest_rate,
            monthly_payment: schedule.monthly_payment.to_cents(),
            total_interest: schedule.total_interest().to_cents(),
            total_principal: schedule.total_principal().to_cents(),
            total_paid: schedule.total_paid().to_cents(),
            remaining_balance: schedule.remaining_balance().to_cents(),
            rows: schedule.periods.iter().map(ScheduleRow::from).collect(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// per-loan summary figures
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummaryView {
    pub kind: LoanKind,
    pub principal: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
    pub additional_months: Option<u32>,
    pub total_years: Option<Decimal>,
    pub payoff_date: Option<NaiveDate>,
}

impl LoanSummaryView {
    pub fn from_outcome(outcome: &LoanOutcome) -> Self {
        LoanSummaryView {
            kind: outcome.kind,
            principal: outcome.principal,
            monthly_payment: outcome.initial_monthly_payment().to_cents(),
            total_interest: outcome.schedule.total_interest().to_cents(),
            total_paid: outcome.schedule.total_paid().to_cents(),
            remaining_balance: outcome.schedule.remaining_balance().to_cents(),
            additional_months: outcome.projection.additional_months,
            total_years: outcome
                .projection
                .total_months
                .map(|months| (Decimal::from(months) / Decimal::from(12)).round_dp(1)),
            payoff_date: outcome.payoff_date,
        }
    }
}

/// summary of a whole financing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancingView {
    pub start_date: NaiveDate,
    pub total_loan_amount: Money,
    pub down_payment: Money,
    /// financed share of the property value, in percent
    pub mortgage_percentage: Option<Decimal>,
    pub total_monthly_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub remaining_balance: Money,
    pub final_payoff_month: u32,
    pub final_payoff_date: Option<NaiveDate>,
    pub loans: Vec<LoanSummaryView>,
}

impl FinancingView {
    pub fn from_result(result: &FinancingResult) -> Self {
        let summary = &result.combined.summary;
        FinancingView {
            start_date: result.start_date,
            total_loan_amount: result.total_loan_amount,
            down_payment: result.liquidity,
            mortgage_percentage: result.loan_to_value.map(|ltv| ltv.as_percentage().round_dp(1)),
            total_monthly_payment: result.initial_monthly_payment().to_cents(),
            total_interest: summary.total_interest_paid.to_cents(),
            total_paid: summary.total_paid.to_cents(),
            remaining_balance: summary.remaining_balance.to_cents(),
            final_payoff_month: summary.final_payoff_month,
            final_payoff_date: result.final_payoff_date(),
            loans: vec![
                LoanSummaryView::from_outcome(&result.kfw),
                LoanSummaryView::from_outcome(&result.bank),
            ],
        }
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// rows of a combined schedule, amounts rounded to cents
pub fn combined_rows(combined: &CombinedSchedule) -> Vec<ScheduleRow> {
    combined
        .periods
        .iter()
        .map(ScheduleRow::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FinancingConfig;
    use crate::payments::compute_schedule;
    use crate::plan::FinancingPlan;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_first_row_rounded_to_cents() {
        let schedule = compute_schedule(
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.01)),
            Rate::from_decimal(dec!(0.02)),
            10,
        )
        .unwrap();
        let view = ScheduleView::from_schedule(&schedule);

        assert_eq!(view.rows.len(), 120);
        assert_eq!(
            view.rows[0],
            ScheduleRow {
                month: 1,
                remaining_balance: Money::from_decimal(dec!(99833.33)),
                principal_payment: Money::from_decimal(dec!(166.67)),
                interest_payment: Money::from_decimal(dec!(83.33)),
                total_payment: Money::from_major(250),
            }
        );

        let json = view.to_json_pretty().unwrap();
        assert!(json.contains("\"method\": \"FixedRepayment\""));
    }

    #[test]
    fn test_financing_view_summary() {
        let config = FinancingConfig::builder().start_year(2025).build().unwrap();
        let result = FinancingPlan::new(config)
            .unwrap()
            .evaluate(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap())
            .unwrap();
        let view = FinancingView::from_result(&result);

        assert_eq!(view.total_loan_amount, Money::from_major(650_000));
        assert_eq!(view.down_payment, Money::from_major(50_000));
        assert_eq!(view.mortgage_percentage, Some(dec!(92.9)));
        assert_eq!(view.total_monthly_payment.as_decimal(), dec!(3206.25));
        assert_eq!(view.final_payoff_month, 120);
        assert_eq!(view.loans.len(), 2);
        assert_eq!(view.loans[0].kind, LoanKind::Kfw);
        assert_eq!(view.loans[1].kind, LoanKind::Bank);
        assert!(view.loans[0].additional_months.unwrap() > 0);

        let rows = combined_rows(&result.combined);
        assert_eq!(rows.len(), 120);
        assert_eq!(rows[0].total_payment.as_decimal(), dec!(3206.25));
        assert_eq!(rows[0], ScheduleRow::from(&result.combined.periods[0]));
        assert_eq!(rows[0].month, 1);
    }
}
