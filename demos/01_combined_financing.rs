/// combined financing - KfW and bank loan for a property purchase
use home_loan_rs::chrono::NaiveDate;
use home_loan_rs::{
    Decimal, FinancingConfig, FinancingPlan, KfwAmount, LoanKind, LoanTerms, Money, Rate,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== combined financing example ===\n");

    let config = FinancingConfig::builder()
        .property_value(Money::from_major(700_000))
        .liquidity(Money::from_major(50_000))
        .kfw_amount(KfwAmount::Extended)
        .kfw_terms(LoanTerms::new(Rate::from_percentage(1), Rate::from_percentage(2), 10))
        .bank_terms(LoanTerms::new(
            Rate::from_percentage_decimal(Decimal::new(345, 2)),
            Rate::from_percentage(3),
            15,
        ))
        .build()?;

    println!("total loan amount: €{}", config.total_loan_amount());
    println!("bank loan amount: €{}", config.bank_principal());

    let plan = FinancingPlan::new(config)?;
    let result = plan.evaluate(NaiveDate::from_ymd_opt(2025, 1, 1).ok_or("invalid date")?)?;

    for kind in [LoanKind::Kfw, LoanKind::Bank] {
        let outcome = result.outcome(kind);
        println!("\n{} loan", kind);
        println!("  monthly payment: €{}", outcome.initial_monthly_payment().to_cents());
        println!("  total interest: €{}", outcome.schedule.total_interest().to_cents());
        println!("  remaining after term: €{}", outcome.schedule.remaining_balance().to_cents());
        match outcome.payoff_date {
            Some(date) => println!("  paid off: {}", date.format("%B %d, %Y")),
            None => println!("  paid off: cannot be calculated"),
        }
    }

    let summary = &result.combined.summary;
    println!("\ntotal monthly payment: €{}", result.initial_monthly_payment().to_cents());
    println!("total interest paid: €{}", summary.total_interest_paid.to_cents());
    println!("total amount paid: €{}", summary.total_paid.to_cents());
    println!("months scheduled: {}", summary.final_payoff_month);

    Ok(())
}
