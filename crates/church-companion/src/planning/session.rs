use super::compose::{compose_marketing_plan, compose_ministry_plan, MarketingPlanInput};
use super::cost::{self, CostBreakdown};
use super::demographics::{classify, Demographics};
use super::domain::{ChurchProfile, EventPlan, PlanningError, ZipFootprint};
use super::footprint::{
    CommunityProfile, DemographicProvider, YouthFootprintEstimate, YouthFootprintEstimator,
};
use super::goals::{self, GoalTargets, INTANGIBLE_OUTCOMES};
use crate::config::FeatureFlags;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::info;

/// Everything the planning form submits on "generate".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanRequest {
    pub profile: ChurchProfile,
    pub primary_zip: String,
    #[serde(default)]
    pub footprint_zips: Vec<String>,
    pub event_size: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct FootprintSection {
    pub footprint: ZipFootprint,
    pub youth: YouthFootprintEstimate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub community: Option<CommunityProfile>,
    pub marketing_plan: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlanningOutcome {
    pub church_name: String,
    pub generated_on: NaiveDate,
    pub demographics: Demographics,
    pub plan_text: String,
    pub event: EventPlan,
    pub cost: CostBreakdown,
    pub goals: GoalTargets,
    pub intangible_outcomes: Vec<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footprint: Option<FootprintSection>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub advisories: Vec<String>,
}

/// One "generate" pass over the calculators and composers.
#[derive(Debug, Clone)]
pub struct PlanningSession<P> {
    estimator: YouthFootprintEstimator<P>,
    features: FeatureFlags,
}

impl<P: DemographicProvider> PlanningSession<P> {
    pub fn new(provider: P, features: FeatureFlags) -> Self {
        Self {
            estimator: YouthFootprintEstimator::new(provider),
            features,
        }
    }

    pub fn features(&self) -> FeatureFlags {
        self.features
    }

    pub async fn generate(
        &self,
        request: PlanRequest,
        today: NaiveDate,
    ) -> Result<PlanningOutcome, PlanningError> {
        let PlanRequest {
            profile,
            primary_zip,
            footprint_zips,
            event_size,
        } = request;

        let event = EventPlan::new(event_size, profile.budget_tier)?;
        let demographics = classify(&primary_zip);
        let goals = goals::scale(&profile, &event);
        let cost = cost::estimate(&event);
        let plan_text = compose_ministry_plan(&profile, &demographics, &goals);

        let mut advisories = Vec::new();
        let footprint = if self.features.zip_footprint {
            let footprint = ZipFootprint::from_entries(&primary_zip, footprint_zips);
            let section = self
                .footprint_section(&profile, footprint, &cost, &goals, &mut advisories)
                .await;
            Some(section)
        } else {
            None
        };

        info!(
            church = %profile.name,
            locale = demographics.locale,
            event_size,
            total_cost = cost.total,
            footprint = self.features.zip_footprint,
            advisories = advisories.len(),
            "generated ministry plan"
        );

        Ok(PlanningOutcome {
            church_name: profile.name,
            generated_on: today,
            demographics,
            plan_text,
            event,
            cost,
            goals,
            intangible_outcomes: INTANGIBLE_OUTCOMES.to_vec(),
            footprint,
            advisories,
        })
    }

    async fn footprint_section(
        &self,
        profile: &ChurchProfile,
        footprint: ZipFootprint,
        cost: &CostBreakdown,
        goals: &GoalTargets,
        advisories: &mut Vec<String>,
    ) -> FootprintSection {
        let youth = self.estimator.estimate_many(&footprint.zips).await;
        let community = if footprint.primary.is_empty() {
            None
        } else {
            self.estimator.community_profile(&footprint.primary).await
        };

        if footprint.is_empty() {
            advisories.push(
                "No footprint ZIP codes were provided, so youth population estimates are zero."
                    .to_string(),
            );
        } else if youth.is_degraded() {
            advisories.push(format!(
                "Census data was unavailable for {} of {} ZIP code(s) ({}); youth figures may be understated.",
                youth.unavailable_zips.len(),
                youth.zips_queried,
                youth.unavailable_zips.join(", ")
            ));
        } else if youth.totals.youth_13_to_19 == 0 {
            advisories.push(
                "Census data reported no youth ages 13-19 across the footprint; double-check the ZIP codes."
                    .to_string(),
            );
        }

        let marketing_plan = compose_marketing_plan(MarketingPlanInput {
            profile,
            footprint: &footprint,
            youth: &youth,
            community: community.as_ref(),
            cost,
            goals,
        });

        FootprintSection {
            footprint,
            youth,
            community,
            marketing_plan,
        }
    }
}
