use crate::infra::{InMemoryApplicantRepository, InMemoryLoanRepository};
use clap::Args;
use loan_eligibility::error::AppError;
use loan_eligibility::workflows::loans::{
    profile_completion, ApplicantId, ApplicantProfile, AssessmentSummary, CreditCardUsage,
    EligibilityEngine, EvaluationConfig, LoanApplicationService, LoanRecord, LoanRequest,
    ShoppingFrequency, SocialMediaUsage,
};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct AssessArgs {
    /// JSON file holding the applicant profile
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// JSON file holding the loan request
    #[arg(long)]
    pub(crate) request: PathBuf,
    /// Print the full assessment (components and unrounded figures) instead of the summary
    #[arg(long)]
    pub(crate) detailed: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Number of installments to mark as paid on the approved loan
    #[arg(long, default_value_t = 1)]
    pub(crate) repayments: usize,
}

pub(crate) fn run_assessment(args: AssessArgs) -> Result<(), AppError> {
    let profile: ApplicantProfile = serde_json::from_str(&fs::read_to_string(&args.profile)?)?;
    let request: LoanRequest = serde_json::from_str(&fs::read_to_string(&args.request)?)?;

    let assessment = EligibilityEngine::default().evaluate(&profile, &request)?;
    let rendered = if args.detailed {
        serde_json::to_string_pretty(&assessment)?
    } else {
        serde_json::to_string_pretty(&assessment.summary())?
    };
    println!("{rendered}");
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Loan eligibility demo");

    let service = LoanApplicationService::new(
        Arc::new(InMemoryApplicantRepository::default()),
        Arc::new(InMemoryLoanRepository::default()),
        EvaluationConfig::default(),
    );

    for profile in [salaried_applicant(), first_job_applicant()] {
        let completion = profile_completion(&profile);
        println!(
            "\nApplicant {} ({}% complete)",
            profile.applicant_id.0, completion.percentage
        );
        if !completion.missing_required.is_empty() {
            println!("  Missing: {}", completion.missing_required.join(", "));
        }
        let applicant_id = profile.applicant_id.clone();
        service.save_profile(profile)?;

        let mut request = LoanRequest::new(400_000.0, "Wedding");
        request.repayment_period = 24;
        let record = service.apply(&applicant_id, request)?;
        render_record(&record);

        if record.active {
            let paid = args.repayments.min(record.repayment_schedule.len());
            let mut latest = record;
            for index in 0..paid {
                latest = service.record_repayment(&applicant_id, &latest.loan_id, index)?;
            }
            println!(
                "  Repayments: {}/{} paid, {:.0} outstanding",
                latest.installments_paid(),
                latest.repayment_schedule.len(),
                latest.outstanding_amount()
            );
        }

        let stored = service.profile(&applicant_id)?;
        println!(
            "  Stored scores: financial {:?} | spending {:?} | lifestyle {:?} | overall risk {:?}",
            stored.financial_stability_score,
            stored.spending_habits_score,
            stored.lifestyle_risk_score,
            stored.overall_risk_score
        );
    }

    Ok(())
}

fn render_record(record: &LoanRecord) {
    let summary: AssessmentSummary = record.assessment.summary();
    println!(
        "- Loan {} -> {} (risk {})",
        record.loan_id.0,
        record.status.label(),
        summary.risk_score
    );
    println!("  {}", summary.reason);
    if summary.eligible {
        println!(
            "  Granted {:.0} over {} months at {:.1}% | EMI {:.0}",
            summary.granted_amount,
            summary.repayment_months,
            summary.interest_rate.unwrap_or_default(),
            summary.emi
        );
    }
    println!(
        "  Categories: financial {} | spending {} | lifestyle {} | employment {} | behavioral {}",
        summary.analysis.financial_stability,
        summary.analysis.spending_habits,
        summary.analysis.lifestyle_risk,
        summary.analysis.employment_stability,
        summary.analysis.behavioral_risk
    );
}

fn salaried_applicant() -> ApplicantProfile {
    ApplicantProfile {
        full_name: Some("Meera Iyer".to_string()),
        address: Some("44 Residency Road, Bengaluru".to_string()),
        pan_number: Some("AAAPI1234Q".to_string()),
        company: Some("Helios Health".to_string()),
        industry: Some("Healthcare".to_string()),
        current_salary: Some(95_000.0),
        previous_salary: Some(82_000.0),
        employment_duration_months: Some(52),
        bank_name: Some("Canara Bank".to_string()),
        avg_monthly_savings: Some(30_000.0),
        current_emis: Some(8_000.0),
        avg_credit_card_bill: Some(6_000.0),
        grocery_expense: Some(9_000.0),
        rent_amount: Some(22_000.0),
        utility_bills: Some(3_500.0),
        mall_visits_per_month: Some(2),
        avg_mall_spending: Some(2_000.0),
        restaurant_visits_per_month: Some(3),
        avg_restaurant_spending: Some(1_200.0),
        owns_house: Some(false),
        dependents: Some(2),
        health_insurance: Some(true),
        has_emergency_fund: Some(true),
        alcohol_smoker: Some(false),
        gambling_habits: Some(false),
        investment_portfolio: Some(250_000.0),
        social_media_usage: Some(SocialMediaUsage::Medium),
        online_shopping_frequency: Some(ShoppingFrequency::Sometimes),
        credit_card_usage: Some(CreditCardUsage::Rarely),
        ..ApplicantProfile::new(ApplicantId("meera".to_string()))
    }
}

fn first_job_applicant() -> ApplicantProfile {
    ApplicantProfile {
        full_name: Some("Rohan Das".to_string()),
        company: Some("Urban Threads".to_string()),
        industry: Some("Retail".to_string()),
        current_salary: Some(18_000.0),
        employment_duration_months: Some(4),
        grocery_expense: Some(4_000.0),
        rent_amount: Some(7_000.0),
        entertainment_expense: Some(3_000.0),
        shopping_expense: Some(2_500.0),
        mall_visits_per_month: Some(6),
        avg_mall_spending: Some(1_500.0),
        restaurant_visits_per_month: Some(8),
        avg_restaurant_spending: Some(600.0),
        alcohol_smoker: Some(true),
        social_media_usage: Some(SocialMediaUsage::High),
        online_shopping_frequency: Some(ShoppingFrequency::VeryOften),
        credit_card_usage: Some(CreditCardUsage::Often),
        ..ApplicantProfile::new(ApplicantId("rohan".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canned_applicants_land_on_opposite_sides_of_the_threshold() {
        let engine = EligibilityEngine::default();
        let request = LoanRequest::new(400_000.0, "Wedding");

        let salaried = engine
            .evaluate(&salaried_applicant(), &request)
            .expect("valid request");
        let first_job = engine
            .evaluate(&first_job_applicant(), &request)
            .expect("valid request");

        assert!(salaried.eligible);
        assert!(!first_job.eligible);
    }

    #[test]
    fn demo_runs_end_to_end() {
        run_demo(DemoArgs { repayments: 2 }).expect("demo completes");
    }
}
