/// standard annuity - classic mortgage that ends exactly at term
use home_loan_rs::{compute_annuity_schedule, Money, Rate, ScheduleView};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== standard annuity example ===\n");

    let schedule = compute_annuity_schedule(Money::from_major(300_000), Rate::from_percentage(5), 240)?;
    let view = ScheduleView::from_schedule(&schedule);

    println!("monthly payment: €{}", view.monthly_payment);
    println!("total interest: €{}", view.total_interest);
    println!("total paid: €{}", view.total_paid);

    println!("\nmonth | balance | principal | interest | payment");
    for row in view.rows.iter().step_by(12) {
        println!(
            "{:>5} | {:>10} | {:>9} | {:>8} | {:>7}",
            row.month,
            row.remaining_balance.to_string(),
            row.principal_payment.to_string(),
            row.interest_payment.to_string(),
            row.total_payment.to_string(),
        );
    }

    Ok(())
}
