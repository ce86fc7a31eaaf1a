pub mod config;
pub mod decimal;
pub mod errors;
pub mod payments;
pub mod plan;
pub mod types;
pub mod views;

// re-export key types
pub use config::{FinancingConfig, FinancingConfigBuilder, KfwLoanTerms, LoanTerms};
pub use decimal::{Money, Rate};
pub use errors::{LoanError, Result};
pub use payments::{
    annuity_payment, combine, compute_annuity_schedule, compute_schedule, project_payoff,
    schedule_for, CombinedPeriod, CombinedSchedule, LoanParameters, PaymentPeriod,
    PayoffProjection, Schedule, ScheduleSummary,
};
pub use plan::{FinancingPlan, FinancingResult, LoanOutcome};
pub use types::{AmortizationMethod, KfwAmount, LoanKind};
pub use views::{FinancingView, LoanSummaryView, ScheduleRow, ScheduleView};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
