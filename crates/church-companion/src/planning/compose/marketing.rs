use super::{wrap, WRAP_WIDTH};
use crate::planning::cost::{format_dollars, CostBreakdown, CostCategory};
use crate::planning::domain::{ChurchProfile, ZipFootprint};
use crate::planning::footprint::{CommunityProfile, YouthFootprintEstimate};
use crate::planning::goals::GoalTargets;
use std::fmt::Write as _;

#[derive(Debug, Clone, Copy)]
pub struct MarketingPlanInput<'a> {
    pub profile: &'a ChurchProfile,
    pub footprint: &'a ZipFootprint,
    pub youth: &'a YouthFootprintEstimate,
    pub community: Option<&'a CommunityProfile>,
    pub cost: &'a CostBreakdown,
    pub goals: &'a GoalTargets,
}

/// Epic Event marketing narrative built from the footprint and the cost model.
pub fn compose_marketing_plan(input: MarketingPlanInput<'_>) -> String {
    let MarketingPlanInput {
        profile,
        footprint,
        youth,
        community,
        cost,
        goals,
    } = input;

    let mut text = String::new();
    writeln!(
        text,
        "EPIC EVENT MARKETING PLAN FOR {}",
        profile.name.to_uppercase()
    )
    .expect("write title");
    text.push('\n');

    writeln!(text, "Audience Footprint:").expect("write footprint heading");
    if footprint.is_empty() {
        writeln!(
            text,
            "- ZIP codes: none provided (add the neighborhoods your church serves)"
        )
        .expect("write empty footprint");
    } else {
        writeln!(text, "- ZIP codes: {}", footprint.zips.join(", ")).expect("write zips");
    }
    writeln!(
        text,
        "- Estimated students ages 13-19 across the footprint: ~{}",
        youth.totals.youth_13_to_19
    )
    .expect("write youth");
    writeln!(
        text,
        "- Estimated 13-year-olds (incoming Project 13 cohort): ~{}",
        youth.totals.age_13
    )
    .expect("write age 13");
    if youth.is_degraded() {
        writeln!(
            text,
            "- Note: census data was unavailable for {}; these figures may be understated.",
            youth.unavailable_zips.join(", ")
        )
        .expect("write degraded note");
    }
    if let Some(community) = community {
        writeln!(
            text,
            "- Home ZIP {}: population ~{}, median age {:.1}, median household income {}",
            footprint.primary,
            community.population,
            community.median_age,
            format_dollars(community.median_household_income)
        )
        .expect("write community");
    }
    text.push('\n');

    writeln!(
        text,
        "Budget ({} tier, {} people):",
        cost.budget_tier, cost.event_size
    )
    .expect("write budget heading");
    for category in CostCategory::ordered() {
        writeln!(
            text,
            "- {}: {}",
            category.label(),
            format_dollars(cost.amount(category))
        )
        .expect("write category");
    }
    writeln!(
        text,
        "- Contingency (10%): {}",
        format_dollars(cost.contingency)
    )
    .expect("write contingency");
    writeln!(
        text,
        "- Estimated total: {} (about {} per person)",
        format_dollars(cost.total),
        format_dollars(cost.per_person())
    )
    .expect("write total");
    text.push('\n');

    writeln!(text, "Targets:").expect("write targets heading");
    writeln!(
        text,
        "- Guests from outside the church: ~{}",
        goals.event_guests_goal
    )
    .expect("write guests target");
    writeln!(
        text,
        "- Decisions / commitments to Christ: at least {}",
        goals.decisions_goal
    )
    .expect("write decisions target");
    text.push('\n');

    let marketing_budget = format_dollars(cost.marketing);
    let invite_goal = goals.event_guests_goal.saturating_mul(2);
    let phases = [
        (
            "Six Weeks Out - Prayer & Invitation Lists",
            format!(
                "Every small group and student leader prays for and names 3-5 friends. Aim for \
                 {invite_goal} personal invitations across the footprint. Lock the date, theme, \
                 and speakers so promotion can start."
            ),
        ),
        (
            "Three Weeks Out - Campaign Launch",
            format!(
                "Release the marketing budget ({marketing_budget}): short-form video for \
                 Instagram and TikTok, posters at schools and coffee shops in the footprint, \
                 and a text-to-RSVP number on every piece."
            ),
        ),
        (
            "Event Week - Personal Reminders",
            "Leaders text every RSVP two days out and the morning of. Staff the welcome team, \
             check-in table, and QR sign-up so every guest leaves contact info."
                .to_string(),
        ),
        (
            "72-Hour Follow-Up",
            "Within 24 hours send a warm text or call to every first-time guest; within 72 hours \
             invite them to a small group, youth night, or On-Ramp Group."
                .to_string(),
        ),
    ];

    writeln!(text, "Campaign Timeline:").expect("write timeline heading");
    for (title, body) in phases {
        writeln!(text, "{title}:\n{}", wrap(&body, WRAP_WIDTH)).expect("write phase");
        text.push('\n');
    }

    text
}
