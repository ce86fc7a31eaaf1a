pub mod aggregation;
pub mod amortization;

pub use aggregation::{combine, CombinedPeriod, CombinedSchedule, ScheduleSummary};
pub use amortization::{
    annuity_payment, compute_annuity_schedule, compute_schedule, project_payoff, schedule_for,
    LoanParameters, PaymentPeriod, PayoffProjection, Schedule, MAX_TERM_YEARS,
};
