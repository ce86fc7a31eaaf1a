/// quick start - schedule of a single loan
use home_loan_rs::{compute_schedule, Money, Rate};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 100k at 1% interest and 2% initial repayment over 10 years
    let schedule = compute_schedule(
        Money::from_major(100_000),
        Rate::from_percentage(1),
        Rate::from_percentage(2),
        10,
    )?;

    println!("monthly payment: €{}", schedule.monthly_payment.to_cents());
    println!("total interest: €{}", schedule.total_interest().to_cents());
    println!("remaining after term: €{}", schedule.remaining_balance().to_cents());

    Ok(())
}
