/// json config - load a financing from json and print the summary view
use home_loan_rs::{FinancingConfig, FinancingPlan, FinancingView, SafeTimeProvider, TimeSource};

const CONFIG: &str = r#"{
    "property_value": "450000",
    "liquidity": "90000",
    "start_year": 2026,
    "kfw": {
        "amount": "100000",
        "terms": { "annual_interest_rate": "0.0095", "annual_repayment_rate": "0.025", "term_years": 10 }
    },
    "bank": { "annual_interest_rate": "0.0362", "annual_repayment_rate": "0.02", "term_years": 20 }
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== json config example ===\n");

    let config = FinancingConfig::from_json(CONFIG)?;
    let plan = FinancingPlan::new(config)?;

    let time = SafeTimeProvider::new(TimeSource::System);
    let result = plan.evaluate_with_time(&time)?;

    println!("{}", FinancingView::from_result(&result).to_json_pretty()?);

    Ok(())
}
