use super::common::*;
use crate::workflows::loans::domain::ApplicantProfile;
use crate::workflows::loans::profile_completion;

#[test]
fn empty_profile_is_zero_percent_complete() {
    let completion = profile_completion(&empty_profile("blank"));

    assert_eq!(completion.percentage, 0);
    assert_eq!(completion.completed_required, 0);
    assert_eq!(completion.total_required, 13);
    assert_eq!(completion.total_optional, 30);
    assert_eq!(completion.missing_required.len(), 13);
    assert_eq!(completion.missing_required[0], "full_name");
}

#[test]
fn required_fields_alone_reach_seventy_percent() {
    let completion = profile_completion(&required_only_profile("required"));

    assert_eq!(completion.completed_required, 13);
    assert_eq!(completion.completed_optional, 0);
    assert!(completion.missing_required.is_empty());
    assert_eq!(completion.percentage, 70);
}

#[test]
fn fully_completed_profile_reaches_one_hundred() {
    let completion = profile_completion(&fully_completed_profile("complete"));

    assert_eq!(completion.completed_optional, 30);
    assert_eq!(completion.percentage, 100);
}

#[test]
fn empty_text_does_not_count_but_zero_and_false_do() {
    let profile = ApplicantProfile {
        full_name: Some(String::new()),
        current_salary: Some(0.0),
        owns_house: Some(false),
        ..empty_profile("partial")
    };
    let completion = profile_completion(&profile);

    assert_eq!(completion.completed_required, 2);
    assert!(completion.missing_required.contains(&"full_name"));
    assert!(!completion.missing_required.contains(&"current_salary"));
    // 0.7 * 2 / 13 = 10.77%
    assert_eq!(completion.percentage, 11);
}

#[test]
fn optional_fields_carry_thirty_percent() {
    let profile = ApplicantProfile {
        gender: Some(crate::workflows::loans::Gender::Other),
        industry: Some("IT".to_string()),
        credit_score: Some(700),
        ..empty_profile("optional")
    };
    let completion = profile_completion(&profile);

    assert_eq!(completion.completed_optional, 3);
    // 0.3 * 3 / 30 = 3%
    assert_eq!(completion.percentage, 3);
}
