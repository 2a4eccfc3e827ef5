use chrono::NaiveDate;
use church_companion::config::{CensusConfig, FeatureFlags};
use church_companion::error::AppError;
use church_companion::planning::footprint::CensusClient;
use church_companion::planning::{BudgetTier, PlanningSession};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::Deserialize;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use tracing::warn;

pub(crate) type CensusSession = PlanningSession<CensusClient>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) session: Arc<CensusSession>,
}

pub(crate) fn build_session(
    census: &CensusConfig,
    features: FeatureFlags,
) -> Result<CensusSession, AppError> {
    let client = CensusClient::new(census)?;
    if features.zip_footprint && !client.has_credential() {
        warn!("CENSUS_API_KEY not set; youth footprint estimates will report zero");
    }
    Ok(PlanningSession::new(client, features))
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_budget_tier(raw: &str) -> Result<BudgetTier, String> {
    raw.parse::<BudgetTier>().map_err(|err| err.to_string())
}

pub(crate) fn deserialize_optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<NaiveDate>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.map(|value| parse_date(&value).map_err(serde::de::Error::custom))
        .transpose()
}
