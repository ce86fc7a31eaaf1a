use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::decimal::{Money, Rate};
use crate::errors::{LoanError, Result};
use crate::types::AmortizationMethod;

/// upper bound for payoff projections beyond the scheduled term
const MAX_PROJECTION_MONTHS: u32 = 1200;

/// longest loan term accepted
pub const MAX_TERM_YEARS: u32 = 100;

/// validated inputs for a fixed-repayment loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LoanParameters {
    principal: Money,
    annual_interest_rate: Rate,
    annual_repayment_rate: Rate,
    term_years: u32,
}

impl LoanParameters {
    /// validate and build loan parameters
    ///
    /// A zero principal is accepted and produces an empty schedule; it is what a
    /// derived bank loan becomes when liquidity and the KfW loan cover everything.
    pub fn new(
        principal: Money,
        annual_interest_rate: Rate,
        annual_repayment_rate: Rate,
        term_years: u32,
    ) -> Result<Self> {
        if principal.is_negative() {
            return Err(LoanError::invalid_parameter(
                "principal",
                format!("must not be negative, got {}", principal),
            ));
        }
        if !annual_interest_rate.is_proper_fraction() {
            return Err(LoanError::invalid_parameter(
                "annual_interest_rate",
                format!("must be within [0, 1), got {}", annual_interest_rate.as_decimal()),
            ));
        }
        if !annual_repayment_rate.is_proper_fraction() {
            return Err(LoanError::invalid_parameter(
                "annual_repayment_rate",
                format!("must be within [0, 1), got {}", annual_repayment_rate.as_decimal()),
            ));
        }
        if term_years < 1 {
            return Err(LoanError::invalid_parameter(
                "term_years",
                "must be at least one year",
            ));
        }
        if term_years > MAX_TERM_YEARS {
            return Err(LoanError::invalid_parameter(
                "term_years",
                format!("must not exceed {} years, got {}", MAX_TERM_YEARS, term_years),
            ));
        }

        Ok(Self {
            principal,
            annual_interest_rate,
            annual_repayment_rate,
            term_years,
        })
    }

    pub fn principal(&self) -> Money {
        self.principal
    }

    pub fn annual_interest_rate(&self) -> Rate {
        self.annual_interest_rate
    }

    pub fn annual_repayment_rate(&self) -> Rate {
        self.annual_repayment_rate
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn term_months(&self) -> u32 {
        self.term_years * 12
    }

    /// constant payment: principal * (interest + repayment) / 12
    pub fn monthly_payment(&self) -> Money {
        let annual = self.annual_interest_rate + self.annual_repayment_rate;
        Money::from_decimal(self.principal.as_decimal() * annual.as_decimal() / dec!(12))
    }
}

/// one month of a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPeriod {
    /// 1-based month number
    pub period_index: u32,
    pub opening_balance: Money,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub closing_balance: Money,
    pub monthly_payment: Money,
}

/// month-by-month schedule of a single loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    pub method: AmortizationMethod,
    pub principal: Money,
    pub annual_interest_rate: Rate,
    /// regular payment; the final period may be smaller
    pub monthly_payment: Money,
    pub term_months: u32,
    pub periods: Vec<PaymentPeriod>,
}

impl Schedule {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// get period by its 1-based index
    pub fn get(&self, period_index: u32) -> Option<&PaymentPeriod> {
        if period_index == 0 {
            return None;
        }
        self.periods.get((period_index - 1) as usize)
    }

    pub fn total_interest(&self) -> Money {
        self.periods.iter().map(|p| p.interest_portion).sum()
    }

    pub fn total_principal(&self) -> Money {
        self.periods.iter().map(|p| p.principal_portion).sum()
    }

    pub fn total_paid(&self) -> Money {
        self.periods.iter().map(|p| p.monthly_payment).sum()
    }

    /// balance still owed after the last scheduled period
    pub fn remaining_balance(&self) -> Money {
        self.periods
            .last()
            .map(|p| p.closing_balance)
            .unwrap_or(self.principal)
    }

    pub fn is_fully_repaid(&self) -> bool {
        self.remaining_balance().is_zero()
    }
}

/// compute the fixed-repayment schedule of a single loan
///
/// The payment stays constant; the last period is clamped so it never pays more
/// than the remaining balance. The schedule stops at `term_years * 12` periods or
/// as soon as the balance reaches zero.
pub fn compute_schedule(
    principal: Money,
    annual_interest_rate: Rate,
    annual_repayment_rate: Rate,
    term_years: u32,
) -> Result<Schedule> {
    let params = LoanParameters::new(
        principal,
        annual_interest_rate,
        annual_repayment_rate,
        term_years,
    )?;
    Ok(schedule_for(&params))
}

/// compute the fixed-repayment schedule from validated parameters
pub fn schedule_for(params: &LoanParameters) -> Schedule {
    let monthly_payment = params.monthly_payment();
    let term_months = params.term_months();

    let mut periods = Vec::with_capacity(term_months as usize);
    let mut balance = params.principal();

    for period_index in 1..=term_months {
        if balance.is_zero() {
            break;
        }
        let period = next_period(
            period_index,
            balance,
            params.annual_interest_rate(),
            monthly_payment,
        );
        balance = period.closing_balance;
        periods.push(period);
    }

    let schedule = Schedule {
        method: AmortizationMethod::FixedRepayment,
        principal: params.principal(),
        annual_interest_rate: params.annual_interest_rate(),
        monthly_payment,
        term_months,
        periods,
    };

    debug!(
        principal = %schedule.principal,
        monthly_payment = %monthly_payment,
        periods = schedule.len(),
        term_months,
        remaining = %schedule.remaining_balance(),
        "computed fixed repayment schedule"
    );

    schedule
}

/// roll a balance forward by one month at a fixed payment
fn next_period(
    period_index: u32,
    opening_balance: Money,
    annual_rate: Rate,
    payment: Money,
) -> PaymentPeriod {
    let interest_portion = opening_balance.monthly_interest(annual_rate);
    let principal_portion = payment - interest_portion;

    if principal_portion > opening_balance {
        // final period: pay off exactly what is left
        debug!(period_index, remaining = %opening_balance, "clamping final payment");
        return PaymentPeriod {
            period_index,
            opening_balance,
            interest_portion,
            principal_portion: opening_balance,
            closing_balance: Money::ZERO,
            monthly_payment: interest_portion + opening_balance,
        };
    }

    PaymentPeriod {
        period_index,
        opening_balance,
        interest_portion,
        principal_portion,
        closing_balance: (opening_balance - principal_portion).max(Money::ZERO),
        monthly_payment: payment,
    }
}

/// calculate the annuity payment that retires `principal` in `months`
pub fn annuity_payment(principal: Money, annual_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Ok(principal);
    }

    let r = annual_rate.monthly_rate().as_decimal();

    if r.is_zero() {
        return Ok(principal / Decimal::from(months));
    }

    let overflow = || {
        LoanError::invalid_parameter(
            "months",
            format!("annuity factor overflows for {} months at {}", months, annual_rate),
        )
    };

    // P * r * (1 + r)^n / ((1 + r)^n - 1)
    let mut compound = Decimal::ONE;
    let base = Decimal::ONE + r;
    for _ in 0..months {
        compound = compound.checked_mul(base).ok_or_else(overflow)?;
    }

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|pr| pr.checked_mul(compound))
        .ok_or_else(overflow)?;
    let denominator = compound - Decimal::ONE;

    Ok(Money::from_decimal(numerator / denominator))
}

/// compute a classic annuity schedule that ends at zero after exactly `months`
pub fn compute_annuity_schedule(
    principal: Money,
    annual_interest_rate: Rate,
    months: u32,
) -> Result<Schedule> {
    if principal.is_negative() {
        return Err(LoanError::invalid_parameter(
            "principal",
            format!("must not be negative, got {}", principal),
        ));
    }
    if !annual_interest_rate.is_proper_fraction() {
        return Err(LoanError::invalid_parameter(
            "annual_interest_rate",
            format!("must be within [0, 1), got {}", annual_interest_rate.as_decimal()),
        ));
    }
    if months == 0 {
        return Err(LoanError::invalid_parameter(
            "months",
            "must be at least one month",
        ));
    }
    if months > MAX_TERM_YEARS * 12 {
        return Err(LoanError::invalid_parameter(
            "months",
            format!("must not exceed {} months, got {}", MAX_TERM_YEARS * 12, months),
        ));
    }

    let payment = annuity_payment(principal, annual_interest_rate, months)?;
    let mut periods = Vec::with_capacity(months as usize);
    let mut balance = principal;

    for period_index in 1..=months {
        if balance.is_zero() {
            break;
        }
        let mut period = next_period(period_index, balance, annual_interest_rate, payment);

        // absorb rounding so the term closes at zero
        if period_index == months && !period.closing_balance.is_zero() {
            period.principal_portion = period.opening_balance;
            period.monthly_payment = period.interest_portion + period.opening_balance;
            period.closing_balance = Money::ZERO;
        }

        balance = period.closing_balance;
        periods.push(period);
    }

    debug!(
        principal = %principal,
        payment = %payment,
        months,
        "computed annuity schedule"
    );

    Ok(Schedule {
        method: AmortizationMethod::Annuity,
        principal,
        annual_interest_rate,
        monthly_payment: payment,
        term_months: months,
        periods,
    })
}

/// how long a loan really runs when its fixed payment is kept up after the term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoffProjection {
    /// periods covered by the schedule itself
    pub scheduled_months: u32,
    /// balance left when the schedule ends
    pub remaining_balance: Money,
    /// months needed after the schedule, `None` if the payment never retires the balance
    pub additional_months: Option<u32>,
    pub total_months: Option<u32>,
}

impl PayoffProjection {
    pub fn is_payable(&self) -> bool {
        self.total_months.is_some()
    }
}

/// project how many months past the schedule are needed to reach zero
pub fn project_payoff(schedule: &Schedule) -> PayoffProjection {
    let scheduled_months = schedule.len() as u32;
    let remaining_balance = schedule.remaining_balance();

    let additional_months = months_to_retire(
        remaining_balance,
        schedule.annual_interest_rate,
        schedule.monthly_payment,
    );

    match additional_months {
        Some(0) => {}
        Some(extra) => warn!(
            remaining = %remaining_balance,
            additional_months = extra,
            "balance remains after term"
        ),
        None => warn!(
            remaining = %remaining_balance,
            payment = %schedule.monthly_payment,
            "payment does not cover interest, balance is never retired"
        ),
    }

    PayoffProjection {
        scheduled_months,
        remaining_balance,
        additional_months,
        total_months: additional_months.map(|extra| scheduled_months + extra),
    }
}

/// months of `payment` needed to bring `balance` to zero
fn months_to_retire(balance: Money, annual_rate: Rate, payment: Money) -> Option<u32> {
    let mut remaining = balance;
    let mut months = 0;

    while !remaining.is_zero() {
        if months >= MAX_PROJECTION_MONTHS {
            return None;
        }
        let interest = remaining.monthly_interest(annual_rate);
        if payment <= interest {
            return None;
        }
        let period = next_period(months + 1, remaining, annual_rate, payment);
        remaining = period.closing_balance;
        months += 1;
    }

    Some(months)
}
