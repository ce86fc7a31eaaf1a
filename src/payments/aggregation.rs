use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::payments::amortization::{PaymentPeriod, Schedule};

/// one month of two loans taken together
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedPeriod {
    pub period_index: u32,
    pub interest_portion: Money,
    pub principal_portion: Money,
    pub monthly_payment: Money,
    /// outstanding debt across both loans after this month
    pub closing_balance: Money,
}

/// summary figures of a combined schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleSummary {
    pub total_interest_paid: Money,
    pub total_principal_paid: Money,
    pub total_paid: Money,
    /// length of the longer of the two schedules
    pub final_payoff_month: u32,
    /// balance both loans still carry once their schedules end
    pub remaining_balance: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombinedSchedule {
    pub periods: Vec<CombinedPeriod>,
    pub summary: ScheduleSummary,
}

impl CombinedSchedule {
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// get period by its 1-based index
    pub fn get(&self, period_index: u32) -> Option<&CombinedPeriod> {
        if period_index == 0 {
            return None;
        }
        self.periods.get((period_index - 1) as usize)
    }
}

/// merge two loan schedules month by month
///
/// Months past the end of a shorter schedule contribute no payment; its closing
/// balance carries whatever that loan still owes.
pub fn combine(a: &Schedule, b: &Schedule) -> CombinedSchedule {
    let months = a.len().max(b.len()) as u32;

    let periods: Vec<CombinedPeriod> = (1..=months)
        .map(|month| {
            let (a_payment, a_interest, a_principal, a_balance) = contribution(a, month);
            let (b_payment, b_interest, b_principal, b_balance) = contribution(b, month);
            CombinedPeriod {
                period_index: month,
                interest_portion: a_interest + b_interest,
                principal_portion: a_principal + b_principal,
                monthly_payment: a_payment + b_payment,
                closing_balance: a_balance + b_balance,
            }
        })
        .collect();

    let total_interest_paid = periods.iter().map(|p| p.interest_portion).sum();
    let total_principal_paid = periods.iter().map(|p| p.principal_portion).sum();
    let total_paid = periods.iter().map(|p| p.monthly_payment).sum();

    CombinedSchedule {
        periods,
        summary: ScheduleSummary {
            total_interest_paid,
            total_principal_paid,
            total_paid,
            final_payoff_month: months,
            remaining_balance: a.remaining_balance() + b.remaining_balance(),
        },
    }
}

/// (payment, interest, principal, closing balance) of one loan in a month
fn contribution(schedule: &Schedule, month: u32) -> (Money, Money, Money, Money) {
    match schedule.get(month) {
        Some(PaymentPeriod {
            monthly_payment,
            interest_portion,
            principal_portion,
            closing_balance,
            ..
        }) => (
            *monthly_payment,
            *interest_portion,
            *principal_portion,
            *closing_balance,
        ),
        None => (
            Money::ZERO,
            Money::ZERO,
            Money::ZERO,
            schedule.remaining_balance(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Rate;
    use crate::payments::amortization::compute_schedule;
    use rust_decimal_macros::dec;

    fn kfw() -> Schedule {
        compute_schedule(
            Money::from_major(100_000),
            Rate::from_decimal(dec!(0.01)),
            Rate::from_decimal(dec!(0.02)),
            10,
        )
        .unwrap()
    }

    fn bank(term_years: u32) -> Schedule {
        compute_schedule(
            Money::from_major(550_000),
            Rate::from_decimal(dec!(0.0345)),
            Rate::from_decimal(dec!(0.03)),
            term_years,
        )
        .unwrap()
    }

    #[test]
    fn test_combined_length_is_longer_schedule() {
        let a = kfw();
        let b = bank(15);
        let combined = combine(&a, &b);

        assert_eq!(combined.len(), 180);
        assert_eq!(combined.summary.final_payoff_month, 180);
        assert_eq!(combine(&b, &a).len(), 180);
    }

    #[test]
    fn test_combined_month_sums_both_loans() {
        let a = kfw();
        let b = bank(10);
        let combined = combine(&a, &b);

        let first = combined.get(1).unwrap();
        assert_eq!(
            first.monthly_payment,
            a.get(1).unwrap().monthly_payment + b.get(1).unwrap().monthly_payment
        );
        assert_eq!(
            first.interest_portion,
            a.get(1).unwrap().interest_portion + b.get(1).unwrap().interest_portion
        );
        assert_eq!(
            first.principal_portion,
            a.get(1).unwrap().principal_portion + b.get(1).unwrap().principal_portion
        );
        assert_eq!(
            first.closing_balance,
            a.get(1).unwrap().closing_balance + b.get(1).unwrap().closing_balance
        );
    }

    #[test]
    fn test_months_past_shorter_loan_are_zero_filled() {
        let a = kfw();
        let b = bank(15);
        let combined = combine(&a, &b);

        let month = combined.get(150).unwrap();
        let bank_month = b.get(150).unwrap();
        assert_eq!(month.monthly_payment, bank_month.monthly_payment);
        assert_eq!(month.interest_portion, bank_month.interest_portion);
        assert_eq!(month.principal_portion, bank_month.principal_portion);
        // kfw residual is still owed
        assert_eq!(
            month.closing_balance,
            bank_month.closing_balance + a.remaining_balance()
        );
    }

    #[test]
    fn test_summary_totals() {
        let a = kfw();
        let b = bank(12);
        let combined = combine(&a, &b);

        assert_eq!(
            combined.summary.total_interest_paid,
            a.total_interest() + b.total_interest()
        );
        assert_eq!(
            combined.summary.total_principal_paid,
            a.total_principal() + b.total_principal()
        );
        assert_eq!(
            combined.summary.total_paid,
            combined.summary.total_interest_paid + combined.summary.total_principal_paid
        );
        assert_eq!(
            combined.summary.remaining_balance,
            a.remaining_balance() + b.remaining_balance()
        );
    }

    #[test]
    fn test_empty_schedule_leaves_other_loan_alone() {
        let a = kfw();
        let empty = compute_schedule(
            Money::ZERO,
            Rate::from_decimal(dec!(0.0345)),
            Rate::from_decimal(dec!(0.03)),
            10,
        )
        .unwrap();

        let combined = combine(&a, &empty);
        assert_eq!(combined.len(), a.len());
        for (merged, single) in combined.periods.iter().zip(&a.periods) {
            assert_eq!(merged.period_index, single.period_index);
            assert_eq!(merged.monthly_payment, single.monthly_payment);
            assert_eq!(merged.interest_portion, single.interest_portion);
            assert_eq!(merged.principal_portion, single.principal_portion);
            assert_eq!(merged.closing_balance, single.closing_balance);
        }
        assert_eq!(combined.summary.total_interest_paid, a.total_interest());

        assert_eq!(combine(&empty, &a), combined);
    }

    #[test]
    fn test_two_empty_schedules() {
        let empty = compute_schedule(Money::ZERO, Rate::ZERO, Rate::ZERO, 1).unwrap();
        let combined = combine(&empty, &empty);

        assert!(combined.is_empty());
        assert_eq!(combined.summary.final_payoff_month, 0);
        assert!(combined.summary.total_paid.is_zero());
    }
}
