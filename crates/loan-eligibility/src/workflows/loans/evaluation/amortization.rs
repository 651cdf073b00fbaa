use chrono::{Months, NaiveDate};

use super::super::domain::RepaymentScheduleEntry;

/// Fixed-rate equal monthly installment for `principal` over `months`.
///
/// A zero principal yields a zero installment; a zero rate spreads the principal evenly. Long
/// terms approach the interest-only payment `principal * monthly_rate` and stay finite.
pub fn monthly_installment(principal: f64, annual_rate_percent: f64, months: u32) -> f64 {
    if principal == 0.0 || months == 0 {
        return 0.0;
    }

    let monthly_rate = annual_rate_percent / 12.0 / 100.0;
    if monthly_rate == 0.0 {
        return principal / f64::from(months);
    }

    // P·r / (1 - (1 + r)^-n), with the discount factor kept in log space.
    let discounted = -(-f64::from(months) * monthly_rate.ln_1p()).exp_m1();
    principal * monthly_rate / discounted
}

/// Monthly installments, the first falling due one month after `evaluated_on`.
///
/// Due dates past the end of a shorter month clamp to its last day. Returns `None` when a due
/// date would fall outside the supported calendar, so a schedule never comes back truncated.
pub fn repayment_schedule(
    evaluated_on: NaiveDate,
    months: u32,
    installment: f64,
) -> Option<Vec<RepaymentScheduleEntry>> {
    (1..=months)
        .map(|offset| {
            evaluated_on
                .checked_add_months(Months::new(offset))
                .map(|due_date| RepaymentScheduleEntry {
                    due_date,
                    amount: installment,
                    paid: false,
                    paid_on: None,
                })
        })
        .collect()
}
