/// time control - start year taken from a controlled clock
use chrono::{TimeZone, Utc};
use home_loan_rs::{FinancingConfig, FinancingPlan, SafeTimeProvider, TimeSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== time control example ===\n");

    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2030, 3, 1, 0, 0, 0).unwrap()
    ));

    // no start year configured, the clock decides
    let plan = FinancingPlan::new(FinancingConfig::default())?;
    let result = plan.evaluate_with_time(&time)?;

    println!("repayment starts: {}", result.start_date.format("%Y-%m-%d"));
    match result.final_payoff_date() {
        Some(date) => println!("both loans retired: {}", date.format("%Y-%m-%d")),
        None => println!("one of the loans is never retired"),
    }

    Ok(())
}
