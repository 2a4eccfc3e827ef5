use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use chrono::NaiveDate;
use church_companion::config::{CensusConfig, FeatureFlags};
use church_companion::planning::footprint::{
    CensusClient, DemographicProvider, ProviderError, YouthEstimate, YouthFootprintEstimator,
    COMMUNITY_PROFILE_VARIABLES, YOUTH_AGE_VARIABLES,
};
use church_companion::planning::{
    BudgetTier, ChurchProfile, PlanRequest, PlanningError, PlanningSession,
};

#[derive(Default)]
struct FakeCensus {
    youth_rows: HashMap<&'static str, [&'static str; 6]>,
    profile_rows: HashMap<&'static str, [&'static str; 3]>,
    calls: AtomicUsize,
}

impl FakeCensus {
    fn tulsa() -> Self {
        let mut fake = Self::default();
        // 10-14: 600, 10-19 total: 1000
        fake.youth_rows
            .insert("74104", ["300", "120", "80", "300", "120", "80"]);
        // 10-14: 100, 10-19 total: 200
        fake.youth_rows
            .insert("74105", ["50", "25", "25", "50", "25", "25"]);
        fake.youth_rows
            .insert("74120", ["-666666666", "1", "1", "1", "1", "1"]);
        fake.youth_rows.insert("74199", ["0"; 6]);
        fake.youth_rows.insert("74188", ["18446744073709551615"; 6]);
        fake.profile_rows
            .insert("74104", ["23114", "31.4", "48210"]);
        fake
    }
}

impl DemographicProvider for FakeCensus {
    async fn fetch_row(
        &self,
        zip: &str,
        variables: &[&str],
    ) -> Result<Vec<String>, ProviderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let row: Option<Vec<&str>> = if variables == YOUTH_AGE_VARIABLES.as_slice() {
            self.youth_rows.get(zip).map(|row| row.to_vec())
        } else if variables == COMMUNITY_PROFILE_VARIABLES.as_slice() {
            self.profile_rows.get(zip).map(|row| row.to_vec())
        } else {
            None
        };

        row.map(|values| values.into_iter().map(str::to_string).collect())
            .ok_or_else(|| ProviderError::MissingRecord(zip.to_string()))
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).expect("valid date")
}

fn request(footprint_zips: &[&str]) -> PlanRequest {
    PlanRequest {
        profile: ChurchProfile {
            name: "Peniel Baptist Church".to_string(),
            mission: "To glorify God by making disciples of Jesus among families, youth, and the community."
                .to_string(),
            average_attendance: 120,
            youth_count: 25,
            volunteer_count: 25,
            budget_tier: BudgetTier::Medium,
        },
        primary_zip: "74104".to_string(),
        footprint_zips: footprint_zips.iter().map(|zip| zip.to_string()).collect(),
        event_size: 300,
    }
}

#[tokio::test]
async fn generate_composes_every_section() {
    let session = PlanningSession::new(FakeCensus::tulsa(), FeatureFlags::default());
    let outcome = session
        .generate(request(&["74104", "74105"]), today())
        .await
        .expect("plan generates");

    assert_eq!(outcome.church_name, "Peniel Baptist Church");
    assert_eq!(outcome.generated_on, today());
    assert_eq!(outcome.demographics.locale, "Tulsa");
    assert_eq!(outcome.cost.total, 12_540);
    assert_eq!(outcome.goals.volunteers_goal, 48);
    assert_eq!(outcome.intangible_outcomes.len(), 4);
    assert!(outcome.plan_text.contains("PENIEL BAPTIST CHURCH"));

    let footprint = outcome.footprint.expect("footprint enabled by default");
    assert_eq!(
        footprint.youth.totals,
        YouthEstimate {
            youth_13_to_19: 700 + 140,
            age_13: 120 + 20,
        }
    );
    assert!(!footprint.youth.is_degraded());
    let community = footprint.community.expect("community profile present");
    assert_eq!(community.population, 23114);
    assert!(footprint.marketing_plan.contains("~840"));
    assert!(footprint.marketing_plan.contains("population ~23114"));
    assert!(outcome.advisories.is_empty());
}

#[tokio::test]
async fn failed_zips_degrade_to_zero_with_advisory() {
    let session = PlanningSession::new(FakeCensus::tulsa(), FeatureFlags::default());
    let outcome = session
        .generate(request(&["74104", "74120", "99999"]), today())
        .await
        .expect("plan still generates");

    let footprint = outcome.footprint.expect("footprint section");
    assert_eq!(footprint.youth.totals.youth_13_to_19, 700);
    assert_eq!(footprint.youth.unavailable_zips, vec!["74120", "99999"]);
    assert_eq!(outcome.advisories.len(), 1);
    assert!(outcome.advisories[0].contains("2 of 3"));
    assert!(outcome.advisories[0].contains("understated"));
}

#[tokio::test]
async fn empty_footprint_is_zero_and_advised() {
    let session = PlanningSession::new(FakeCensus::tulsa(), FeatureFlags::default());
    let outcome = session
        .generate(request(&[]), today())
        .await
        .expect("plan generates");

    let footprint = outcome.footprint.expect("footprint section");
    assert_eq!(footprint.youth.totals, YouthEstimate::default());
    assert!(outcome.advisories[0].contains("No footprint ZIP codes"));
}

#[tokio::test]
async fn disabling_footprint_skips_provider_and_marketing() {
    let session = PlanningSession::new(
        FakeCensus::tulsa(),
        FeatureFlags {
            zip_footprint: false,
        },
    );
    let outcome = session
        .generate(request(&["74104", "74105"]), today())
        .await
        .expect("plan generates");

    assert!(outcome.footprint.is_none());
    assert!(outcome.advisories.is_empty());
    assert_eq!(outcome.cost.total, 12_540);
}

#[tokio::test]
async fn zero_event_size_is_rejected() {
    let session = PlanningSession::new(FakeCensus::tulsa(), FeatureFlags::default());
    let mut bad = request(&["74104"]);
    bad.event_size = 0;
    let err = session
        .generate(bad, today())
        .await
        .expect_err("zero-size event rejected");
    assert!(matches!(
        err,
        PlanningError::InvalidConfiguration {
            field: "event_size",
            ..
        }
    ));
}

#[tokio::test]
async fn estimate_many_is_elementwise_sum() {
    let estimator = YouthFootprintEstimator::new(FakeCensus::tulsa());
    let empty: [&str; 0] = [];
    assert_eq!(
        estimator.estimate_many(&empty).await.totals,
        YouthEstimate::default()
    );

    let a = estimator.estimate_one("74104").await;
    let b = estimator.estimate_one("74105").await;
    let many = estimator.estimate_many(&["74104", "74105"]).await;
    assert_eq!(many.totals, a + b);

    let repeated = estimator.estimate_many(&["74105", "74105"]).await;
    assert_eq!(repeated.totals, b + b);
    assert_eq!(estimator.estimate_one("00000").await, YouthEstimate::default());
}

#[tokio::test]
async fn whitespace_is_trimmed_before_lookup() {
    let estimator = YouthFootprintEstimator::new(FakeCensus::tulsa());
    assert_eq!(estimator.estimate_one(" 74105 ").await.youth_13_to_19, 140);
    assert_eq!(estimator.provider().calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_census_key_fails_open() {
    let client = CensusClient::new(&CensusConfig {
        api_key: None,
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_millis(100),
    })
    .expect("client builds");
    let session = PlanningSession::new(client, FeatureFlags::default());

    let outcome = session
        .generate(request(&["74104", "74105"]), today())
        .await
        .expect("plan generates without credential");

    let footprint = outcome.footprint.expect("footprint section");
    assert_eq!(footprint.youth.totals, YouthEstimate::default());
    assert!(footprint.community.is_none());
    assert!(outcome.advisories[0].contains("understated"));
}

#[tokio::test]
async fn oversized_census_counts_fall_back_to_zero() {
    let estimator = YouthFootprintEstimator::new(FakeCensus::tulsa());
    assert_eq!(estimator.estimate_one("74188").await, YouthEstimate::default());

    let many = estimator.estimate_many(&["74105", "74188"]).await;
    assert_eq!(many.totals.youth_13_to_19, 140);
    assert_eq!(many.unavailable_zips, vec!["74188"]);
}

#[tokio::test]
async fn zero_youth_footprint_is_advised() {
    let session = PlanningSession::new(FakeCensus::tulsa(), FeatureFlags::default());
    let outcome = session
        .generate(request(&["74199"]), today())
        .await
        .expect("plan generates");

    let footprint = outcome.footprint.expect("footprint section");
    assert_eq!(footprint.youth.totals, YouthEstimate::default());
    assert!(!footprint.youth.is_degraded());
    assert_eq!(outcome.advisories.len(), 1);
    assert!(outcome.advisories[0].contains("no youth ages 13-19"));
}
