//! Tests for profile input validation and field merging.

use super::*;
use rstest::{fixture, rstest};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[fixture]
fn minimal_input() -> ProfileInput {
    ProfileInput {
        status: Some("Developer".to_owned()),
        skills: Some("go, rust , python".to_owned()),
        ..ProfileInput::default()
    }
}

#[rstest]
fn skills_are_trimmed_in_order(minimal_input: ProfileInput) {
    let fields = ProfileFields::try_from(minimal_input).expect("valid input");
    let profile = Profile::create(UserId::random(), fields, Utc::now());
    assert_eq!(profile.skills, vec!["go", "rust", "python"]);
}

#[rstest]
#[case(None, Some("rust"), "status")]
#[case(Some("  "), Some("rust"), "status")]
#[case(Some("Developer"), None, "skills")]
#[case(Some("Developer"), Some(" , ,"), "skills")]
fn required_fields_are_enforced(
    #[case] status: Option<&str>,
    #[case] skills: Option<&str>,
    #[case] field: &str,
) {
    let input = ProfileInput {
        status: status.map(str::to_owned),
        skills: skills.map(str::to_owned),
        ..ProfileInput::default()
    };
    let err = ProfileFields::try_from(input).expect_err("missing field");
    assert_eq!(err.field(), field);
}

#[rstest]
fn blank_optional_fields_are_treated_as_absent(minimal_input: ProfileInput) {
    let input = ProfileInput {
        company: Some("   ".to_owned()),
        social: Social {
            twitter: Some(String::new()),
            ..Social::default()
        },
        ..minimal_input
    };
    let profile = Profile::create(
        UserId::random(),
        ProfileFields::try_from(input).expect("valid"),
        Utc::now(),
    );
    assert!(profile.company.is_none());
    assert!(profile.social.twitter.is_none());
}

#[rstest]
fn apply_overwrites_supplied_fields_and_keeps_the_rest(minimal_input: ProfileInput) {
    let created = ProfileInput {
        company: Some("Acme".to_owned()),
        bio: Some("hello".to_owned()),
        social: Social {
            twitter: Some("https://twitter.test/ada".to_owned()),
            ..Social::default()
        },
        ..minimal_input.clone()
    };
    let mut profile = Profile::create(
        UserId::random(),
        ProfileFields::try_from(created).expect("valid"),
        Utc::now(),
    );

    let update = ProfileInput {
        status: Some("Lead".to_owned()),
        skills: Some("rust".to_owned()),
        company: Some("Initech".to_owned()),
        social: Social {
            youtube: Some("https://youtube.test/ada".to_owned()),
            ..Social::default()
        },
        ..ProfileInput::default()
    };
    profile.apply(ProfileFields::try_from(update).expect("valid"));

    assert_eq!(profile.status, "Lead");
    assert_eq!(profile.skills, vec!["rust"]);
    assert_eq!(profile.company.as_deref(), Some("Initech"));
    assert_eq!(profile.bio.as_deref(), Some("hello"));
    assert_eq!(
        profile.social.twitter.as_deref(),
        Some("https://twitter.test/ada")
    );
    assert_eq!(
        profile.social.youtube.as_deref(),
        Some("https://youtube.test/ada")
    );
}

fn complete_experience() -> ExperienceInput {
    ExperienceInput {
        title: Some("Dev".into()),
        company: Some("Acme".into()),
        from: Some(date(2020, 1, 1)),
        ..ExperienceInput::default()
    }
}

fn complete_education() -> EducationInput {
    EducationInput {
        school: Some("MIT".into()),
        degree: Some("BSc".into()),
        field_of_study: Some("CS".into()),
        from: Some(date(2015, 9, 1)),
        ..EducationInput::default()
    }
}

#[rstest]
#[case(ExperienceInput { title: None, ..complete_experience() }, "title")]
#[case(ExperienceInput { company: None, ..complete_experience() }, "company")]
#[case(ExperienceInput { from: None, ..complete_experience() }, "from")]
fn experience_requires_title_company_and_from(
    #[case] input: ExperienceInput,
    #[case] field: &str,
) {
    let err = Experience::try_from(input).expect_err("missing field");
    assert_eq!(err.field(), field);
}

#[rstest]
#[case(EducationInput { school: None, ..complete_education() }, "school")]
#[case(EducationInput { degree: None, ..complete_education() }, "degree")]
#[case(EducationInput { field_of_study: None, ..complete_education() }, "fieldOfStudy")]
#[case(EducationInput { from: None, ..complete_education() }, "from")]
fn education_requires_school_degree_field_and_from(
    #[case] input: EducationInput,
    #[case] field: &str,
) {
    let err = Education::try_from(input).expect_err("missing field");
    assert_eq!(err.field(), field);
}

#[rstest]
fn experience_keeps_optional_details() {
    let experience = Experience::try_from(ExperienceInput {
        title: Some("Dev".into()),
        company: Some("Acme".into()),
        location: Some("Remote".into()),
        from: Some(date(2020, 1, 1)),
        to: None,
        current: true,
        description: Some("  ".into()),
    })
    .expect("valid experience");

    assert!(experience.current);
    assert_eq!(experience.location.as_deref(), Some("Remote"));
    assert!(experience.description.is_none());
}
