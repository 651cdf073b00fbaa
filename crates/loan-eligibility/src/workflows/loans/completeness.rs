use serde::Serialize;

use super::domain::ApplicantProfile;

const REQUIRED_WEIGHT: f64 = 0.7;
const OPTIONAL_WEIGHT: f64 = 0.3;

/// How much of an applicant profile has been filled in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProfileCompletion {
    pub completed_required: usize,
    pub total_required: usize,
    pub completed_optional: usize,
    pub total_optional: usize,
    pub percentage: u8,
    pub missing_required: Vec<&'static str>,
}

/// Score profile completeness with required fields weighted at 70% and optional fields at 30%.
///
/// A field counts once it is present; text must also be non-empty. Numeric zero and `false`
/// are valid answers and count as completed.
pub fn profile_completion(profile: &ApplicantProfile) -> ProfileCompletion {
    let required = required_fields(profile);
    let optional = optional_fields(profile);

    let completed_required = required.iter().filter(|(_, done)| *done).count();
    let completed_optional = optional.iter().filter(|(_, done)| *done).count();
    let missing_required = required
        .iter()
        .filter(|(_, done)| !*done)
        .map(|(name, _)| *name)
        .collect();

    let score = REQUIRED_WEIGHT * completed_required as f64 / required.len() as f64
        + OPTIONAL_WEIGHT * completed_optional as f64 / optional.len() as f64;
    let percentage = (score * 100.0).round().clamp(0.0, 100.0) as u8;

    ProfileCompletion {
        completed_required,
        total_required: required.len(),
        completed_optional,
        total_optional: optional.len(),
        percentage,
        missing_required,
    }
}

fn text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|value| !value.is_empty())
}

fn required_fields(p: &ApplicantProfile) -> [(&'static str, bool); 13] {
    [
        ("full_name", text(&p.full_name)),
        ("address", text(&p.address)),
        ("pan_number", text(&p.pan_number)),
        ("company", text(&p.company)),
        ("current_salary", p.current_salary.is_some()),
        (
            "employment_duration_months",
            p.employment_duration_months.is_some(),
        ),
        ("bank_name", text(&p.bank_name)),
        ("grocery_expense", p.grocery_expense.is_some()),
        ("current_emis", p.current_emis.is_some()),
        ("owns_house", p.owns_house.is_some()),
        ("dependents", p.dependents.is_some()),
        ("health_insurance", p.health_insurance.is_some()),
        ("has_emergency_fund", p.has_emergency_fund.is_some()),
    ]
}

fn optional_fields(p: &ApplicantProfile) -> [(&'static str, bool); 30] {
    [
        ("date_of_birth", p.date_of_birth.is_some()),
        ("gender", p.gender.is_some()),
        ("marital_status", p.marital_status.is_some()),
        ("previous_salary", p.previous_salary.is_some()),
        ("industry", text(&p.industry)),
        ("job_title", text(&p.job_title)),
        ("date_prev_hike", p.date_prev_hike.is_some()),
        ("estimated_next_hike", p.estimated_next_hike.is_some()),
        ("avg_monthly_savings", p.avg_monthly_savings.is_some()),
        ("avg_credit_card_bill", p.avg_credit_card_bill.is_some()),
        ("total_credit_limit", p.total_credit_limit.is_some()),
        ("credit_score", p.credit_score.is_some()),
        ("rent_amount", p.rent_amount.is_some()),
        ("utility_bills", p.utility_bills.is_some()),
        ("property_value", p.property_value.is_some()),
        ("mall_visits_per_month", p.mall_visits_per_month.is_some()),
        ("avg_mall_spending", p.avg_mall_spending.is_some()),
        (
            "restaurant_visits_per_month",
            p.restaurant_visits_per_month.is_some(),
        ),
        ("avg_restaurant_spending", p.avg_restaurant_spending.is_some()),
        ("entertainment_expense", p.entertainment_expense.is_some()),
        ("travel_expense", p.travel_expense.is_some()),
        ("shopping_expense", p.shopping_expense.is_some()),
        ("health_expense", p.health_expense.is_some()),
        ("education_expense", p.education_expense.is_some()),
        ("alcohol_smoker", p.alcohol_smoker.is_some()),
        ("gambling_habits", p.gambling_habits.is_some()),
        ("investment_portfolio", p.investment_portfolio.is_some()),
        ("social_media_usage", p.social_media_usage.is_some()),
        (
            "online_shopping_frequency",
            p.online_shopping_frequency.is_some(),
        ),
        ("credit_card_usage", p.credit_card_usage.is_some()),
    ]
}
