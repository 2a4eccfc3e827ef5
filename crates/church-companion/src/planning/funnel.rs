//! Event funnel dashboard: turns the six hand-entered counters into stage
//! percentages and a 0-100 health score.

use super::domain::FunnelCounts;
use serde::Serialize;

/// "Good" range for a funnel stage, in percent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageBand {
    pub low_good: f64,
    pub high_good: f64,
}

impl StageBand {
    const fn new(low_good: f64, high_good: f64) -> Self {
        Self {
            low_good,
            high_good,
        }
    }

    /// Maps a stage percentage onto 0-100. Below the band scales 0..60, inside
    /// it 80..100, above it decays from 80 as the value overshoots.
    pub fn score(&self, value: f64) -> f64 {
        if value <= self.low_good {
            (value / self.low_good) * 60.0
        } else if value >= self.high_good {
            ((self.high_good / value) * 80.0).min(100.0)
        } else {
            80.0 + ((value - self.low_good) / (self.high_good - self.low_good)) * 20.0
        }
    }
}

pub const SHOW_UP_BAND: StageBand = StageBand::new(60.0, 85.0);
pub const FIRST_TIME_BAND: StageBand = StageBand::new(20.0, 40.0);
pub const DECISION_BAND: StageBand = StageBand::new(5.0, 15.0);
pub const FOLLOW_UP_BAND: StageBand = StageBand::new(40.0, 70.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthBand {
    Excellent,
    Healthy,
    NeedsImprovement,
}

impl HealthBand {
    pub const fn from_score(score: u8) -> Self {
        if score >= 85 {
            Self::Excellent
        } else if score >= 65 {
            Self::Healthy
        } else {
            Self::NeedsImprovement
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Healthy => "Healthy",
            Self::NeedsImprovement => "Needs Improvement",
        }
    }

    pub const fn advisory(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Your funnel is performing at a high level. Keep reinforcing the 72-Hour \
                 Follow-Up rhythm and celebrate the wins with your team."
            }
            Self::Healthy => {
                "Solid momentum. Look at the weakest stage below and give it one focused \
                 improvement before the next event."
            }
            Self::NeedsImprovement => {
                "Several stages are underperforming. Revisit invitations, the guest welcome, \
                 and how quickly new people are contacted after the event."
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FunnelHealthScore {
    pub rsvp_vs_goal_pct: f64,
    pub show_up_pct: f64,
    pub first_time_pct: f64,
    pub decision_pct: f64,
    pub follow_up_pct: f64,
    pub score: u8,
    pub band: HealthBand,
    pub label: &'static str,
    pub advisory: &'static str,
}

pub fn score(counts: &FunnelCounts) -> FunnelHealthScore {
    let rsvp_vs_goal_pct = percent(counts.actual_rsvps, counts.expected_rsvps);
    let show_up_pct = percent(counts.check_ins, counts.actual_rsvps);
    let first_time_pct = percent(counts.first_time_guests, counts.check_ins);
    let decision_pct = percent(counts.decisions, counts.check_ins);
    let follow_up_pct = percent(counts.follow_up_signups, counts.decisions);

    let bands = [
        SHOW_UP_BAND.score(show_up_pct),
        FIRST_TIME_BAND.score(first_time_pct),
        DECISION_BAND.score(decision_pct),
        FOLLOW_UP_BAND.score(follow_up_pct),
    ];
    let average = bands.iter().sum::<f64>() / bands.len() as f64;
    let score = average.floor().clamp(0.0, 100.0) as u8;
    let band = HealthBand::from_score(score);

    FunnelHealthScore {
        rsvp_vs_goal_pct,
        show_up_pct,
        first_time_pct,
        decision_pct,
        follow_up_pct,
        score,
        band,
        label: band.label(),
        advisory: band.advisory(),
    }
}

/// An empty stage reports 0% instead of dividing by zero.
fn percent(numerator: u32, denominator: u32) -> f64 {
    f64::from(numerator) * 100.0 / f64::from(denominator.max(1))
}
