use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::footprint::ProviderError;

/// Spending level for next-gen ministry and outreach.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetTier {
    Low,
    Medium,
    High,
}

impl BudgetTier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Low, Self::Medium, Self::High]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BudgetTier {
    type Err = PlanningError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(PlanningError::InvalidConfiguration {
                field: "budget_tier",
                value: raw.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChurchProfile {
    pub name: String,
    #[serde(default)]
    pub mission: String,
    pub average_attendance: u32,
    pub youth_count: u32,
    pub volunteer_count: u32,
    pub budget_tier: BudgetTier,
}

/// The single outreach gathering being budgeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EventPlan {
    size: u32,
    pub budget_tier: BudgetTier,
}

impl EventPlan {
    pub fn new(size: u32, budget_tier: BudgetTier) -> Result<Self, PlanningError> {
        if size == 0 {
            return Err(PlanningError::InvalidConfiguration {
                field: "event_size",
                value: size.to_string(),
            });
        }
        Ok(Self { size, budget_tier })
    }

    pub fn size(&self) -> u32 {
        self.size
    }
}

/// ZIP codes that make up a church's ministry catchment area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipFootprint {
    pub primary: String,
    pub zips: Vec<String>,
}

impl ZipFootprint {
    /// Builds a footprint from free-form text (commas, semicolons or whitespace),
    /// dropping repeats while keeping first-seen order.
    pub fn parse(primary: &str, raw: &str) -> Self {
        let entries = raw
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .map(str::to_string);
        Self::from_entries(primary, entries)
    }

    pub fn from_entries<I>(primary: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        let mut zips: Vec<String> = Vec::new();
        for entry in entries {
            let zip = entry.trim();
            if zip.is_empty() || zips.iter().any(|seen| seen == zip) {
                continue;
            }
            zips.push(zip.to_string());
        }

        Self {
            primary: primary.trim().to_string(),
            zips,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.zips.is_empty()
    }
}

/// Manually entered counters from the event funnel panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelCounts {
    #[serde(default)]
    pub expected_rsvps: u32,
    #[serde(default)]
    pub actual_rsvps: u32,
    #[serde(default)]
    pub check_ins: u32,
    #[serde(default)]
    pub first_time_guests: u32,
    #[serde(default)]
    pub decisions: u32,
    #[serde(default)]
    pub follow_up_signups: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum PlanningError {
    #[error("invalid value '{value}' for {field}")]
    InvalidConfiguration { field: &'static str, value: String },
    #[error("demographic provider unavailable: {0}")]
    ExternalProviderUnavailable(#[from] ProviderError),
}
