mod census;

pub use census::CensusClient;

use serde::Serialize;
use std::future::Future;
use std::ops::Add;
use tracing::{debug, warn};

/// ACS age/sex brackets: male then female 10-14, 15-17, 18-19.
pub const YOUTH_AGE_VARIABLES: [&str; 6] = [
    "B01001_005E",
    "B01001_006E",
    "B01001_007E",
    "B01001_029E",
    "B01001_030E",
    "B01001_031E",
];

/// ACS total population, median age, median household income.
pub const COMMUNITY_PROFILE_VARIABLES: [&str; 3] = ["B01003_001E", "B01002_001E", "B19013_001E"];

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("no demographic provider credential configured")]
    MissingCredential,
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("provider returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),
    #[error("no record for ZIP {0}")]
    MissingRecord(String),
}

/// Keyed tabulated-data lookup. Returns one value per requested variable, in
/// request order.
pub trait DemographicProvider: Send + Sync {
    fn fetch_row(
        &self,
        zip: &str,
        variables: &[&str],
    ) -> impl Future<Output = Result<Vec<String>, ProviderError>> + Send;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct YouthEstimate {
    pub youth_13_to_19: u64,
    pub age_13: u64,
}

impl Add for YouthEstimate {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            youth_13_to_19: self.youth_13_to_19.saturating_add(rhs.youth_13_to_19),
            age_13: self.age_13.saturating_add(rhs.age_13),
        }
    }
}

impl YouthEstimate {
    /// 13-19 is taken as 7/10 of the 10-19 band and age 13 as 1/5 of the 10-14
    /// band, assuming people are spread evenly within each bracket. Counts too
    /// large to interpolate are rejected as malformed.
    fn from_brackets(brackets: &[u64; 6]) -> Result<Self, ProviderError> {
        let overflow = || ProviderError::MalformedResponse("bracket counts overflow".to_string());
        let ten_to_fourteen = brackets[0].checked_add(brackets[3]).ok_or_else(overflow)?;
        let ten_to_nineteen = brackets
            .iter()
            .try_fold(0_u64, |total, count| total.checked_add(*count))
            .ok_or_else(overflow)?;
        Ok(Self {
            youth_13_to_19: ten_to_nineteen.checked_mul(7).ok_or_else(overflow)? / 10,
            age_13: ten_to_fourteen / 5,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct YouthFootprintEstimate {
    pub totals: YouthEstimate,
    pub zips_queried: usize,
    /// ZIPs whose lookup failed and were counted as zero.
    pub unavailable_zips: Vec<String>,
}

impl YouthFootprintEstimate {
    pub fn is_degraded(&self) -> bool {
        !self.unavailable_zips.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CommunityProfile {
    pub population: u64,
    pub median_age: f64,
    pub median_household_income: u64,
}

#[derive(Debug, Clone)]
pub struct YouthFootprintEstimator<P> {
    provider: P,
}

impl<P: DemographicProvider> YouthFootprintEstimator<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Youth estimate for one ZIP; any provider failure counts as zero.
    pub async fn estimate_one(&self, zip: &str) -> YouthEstimate {
        self.try_estimate_one(zip).await.unwrap_or_default()
    }

    /// Sums per-ZIP estimates in order. Repeated ZIPs are counted each time.
    pub async fn estimate_many<S: AsRef<str>>(&self, zips: &[S]) -> YouthFootprintEstimate {
        let mut estimate = YouthFootprintEstimate {
            zips_queried: zips.len(),
            ..YouthFootprintEstimate::default()
        };

        for zip in zips {
            let zip = zip.as_ref();
            match self.try_estimate_one(zip).await {
                Ok(youth) => estimate.totals = estimate.totals + youth,
                Err(_) => estimate.unavailable_zips.push(zip.to_string()),
            }
        }

        estimate
    }

    /// Population, median age and median income for a ZIP, if the provider has them.
    pub async fn community_profile(&self, zip: &str) -> Option<CommunityProfile> {
        let zip = zip.trim();
        let result = self
            .provider
            .fetch_row(zip, &COMMUNITY_PROFILE_VARIABLES)
            .await
            .and_then(|row| parse_community_profile(zip, &row));

        match result {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(zip, error = %err, "community profile unavailable");
                None
            }
        }
    }

    async fn try_estimate_one(&self, zip: &str) -> Result<YouthEstimate, ProviderError> {
        let zip = zip.trim();
        let result = self
            .provider
            .fetch_row(zip, &YOUTH_AGE_VARIABLES)
            .await
            .and_then(|row| parse_youth_brackets(zip, &row))
            .and_then(|brackets| YouthEstimate::from_brackets(&brackets));

        match result {
            Ok(youth) => {
                debug!(
                    zip,
                    youth_13_to_19 = youth.youth_13_to_19,
                    age_13 = youth.age_13,
                    "youth estimate"
                );
                Ok(youth)
            }
            Err(err) => {
                warn!(zip, error = %err, "youth estimate unavailable; counting as zero");
                Err(err)
            }
        }
    }
}

fn parse_youth_brackets(zip: &str, row: &[String]) -> Result<[u64; 6], ProviderError> {
    expect_width(zip, row, YOUTH_AGE_VARIABLES.len())?;
    let mut brackets = [0_u64; 6];
    for (slot, raw) in brackets.iter_mut().zip(row) {
        *slot = parse_count(raw)?;
    }
    Ok(brackets)
}

fn parse_community_profile(zip: &str, row: &[String]) -> Result<CommunityProfile, ProviderError> {
    expect_width(zip, row, COMMUNITY_PROFILE_VARIABLES.len())?;
    let median_age = row[1]
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|age| age.is_finite() && *age >= 0.0)
        .ok_or_else(|| ProviderError::MalformedResponse(format!("median age '{}'", row[1])))?;

    Ok(CommunityProfile {
        population: parse_count(&row[0])?,
        median_age,
        median_household_income: parse_count(&row[2])?,
    })
}

fn expect_width(zip: &str, row: &[String], width: usize) -> Result<(), ProviderError> {
    if row.is_empty() {
        return Err(ProviderError::MissingRecord(zip.to_string()));
    }
    if row.len() < width {
        return Err(ProviderError::MalformedResponse(format!(
            "expected {width} values, got {}",
            row.len()
        )));
    }
    Ok(())
}

// Negative sentinels (e.g. -666666666 for suppressed cells) fail to parse as u64.
fn parse_count(raw: &str) -> Result<u64, ProviderError> {
    raw.trim()
        .parse::<u64>()
        .map_err(|_| ProviderError::MalformedResponse(format!("non-count value '{raw}'")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|value| value.to_string()).collect()
    }

    #[test]
    fn interpolates_youth_bands() {
        // 10-14: 250 + 250, 10-19 total: 1000
        let youth = YouthEstimate::from_brackets(&[250, 150, 100, 250, 150, 100])
            .expect("counts fit");
        assert_eq!(youth.youth_13_to_19, 700);
        assert_eq!(youth.age_13, 100);
    }

    #[test]
    fn interpolation_rounds_down() {
        let youth = YouthEstimate::from_brackets(&[3, 1, 1, 1, 1, 1]).expect("counts fit");
        assert_eq!(youth.youth_13_to_19, 5);
        assert_eq!(youth.age_13, 0);
    }

    #[test]
    fn oversized_counts_are_malformed() {
        assert!(matches!(
            YouthEstimate::from_brackets(&[u64::MAX; 6]),
            Err(ProviderError::MalformedResponse(_))
        ));
        // sum fits but x7 does not
        assert!(YouthEstimate::from_brackets(&[u64::MAX / 6, 0, 0, 0, 0, 0]).is_err());
    }

    #[test]
    fn totals_saturate_instead_of_wrapping() {
        let big = YouthEstimate {
            youth_13_to_19: u64::MAX - 1,
            age_13: 5,
        };
        let sum = big
            + YouthEstimate {
                youth_13_to_19: 10,
                age_13: 1,
            };
        assert_eq!(sum.youth_13_to_19, u64::MAX);
        assert_eq!(sum.age_13, 6);
    }

    #[test]
    fn rejects_suppressed_or_short_rows() {
        assert!(matches!(
            parse_youth_brackets("74104", &row(&["1", "2", "-666666666", "4", "5", "6"])),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_youth_brackets("74104", &row(&["1", "2"])),
            Err(ProviderError::MalformedResponse(_))
        ));
        assert!(matches!(
            parse_youth_brackets("74104", &[]),
            Err(ProviderError::MissingRecord(_))
        ));
    }

    #[test]
    fn parses_community_profile() {
        let profile = parse_community_profile("74104", &row(&["23114", "31.4", "48210"]))
            .expect("profile parses");
        assert_eq!(profile.population, 23114);
        assert_eq!(profile.median_age, 31.4);
        assert_eq!(profile.median_household_income, 48210);
    }
}
