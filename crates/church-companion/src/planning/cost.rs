use super::domain::{BudgetTier, EventPlan};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Marketing,
    Food,
    Production,
    Guest,
    Swag,
    Security,
}

impl CostCategory {
    pub const fn ordered() -> [Self; 6] {
        [
            Self::Marketing,
            Self::Food,
            Self::Production,
            Self::Guest,
            Self::Swag,
            Self::Security,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Marketing => "Marketing & promotion",
            Self::Food => "Food & beverages",
            Self::Production => "Production & environment",
            Self::Guest => "Guest speakers & talent",
            Self::Swag => "Swag & giveaways",
            Self::Security => "Security & safety",
        }
    }

    /// Dollars per attendee.
    pub const fn rate(self, tier: BudgetTier) -> u64 {
        match (self, tier) {
            (Self::Marketing, BudgetTier::Low) => 2,
            (Self::Marketing, BudgetTier::Medium) => 5,
            (Self::Marketing, BudgetTier::High) => 8,
            (Self::Food, BudgetTier::Low) => 6,
            (Self::Food, BudgetTier::Medium) => 10,
            (Self::Food, BudgetTier::High) => 15,
            (Self::Production, BudgetTier::Low) => 5,
            (Self::Production, BudgetTier::Medium) => 12,
            (Self::Production, BudgetTier::High) => 20,
            (Self::Guest, BudgetTier::Low) => 2,
            (Self::Guest, BudgetTier::Medium) => 5,
            (Self::Guest, BudgetTier::High) => 10,
            (Self::Swag, BudgetTier::Low) => 1,
            (Self::Swag, BudgetTier::Medium) => 3,
            (Self::Swag, BudgetTier::High) => 6,
            (Self::Security, BudgetTier::Low) => 1,
            (Self::Security, BudgetTier::Medium) => 3,
            (Self::Security, BudgetTier::High) => 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CostBreakdown {
    pub event_size: u32,
    pub budget_tier: BudgetTier,
    pub marketing: u64,
    pub food: u64,
    pub production: u64,
    pub guest: u64,
    pub swag: u64,
    pub security: u64,
    pub subtotal: u64,
    pub contingency: u64,
    pub total: u64,
}

impl CostBreakdown {
    pub fn amount(&self, category: CostCategory) -> u64 {
        match category {
            CostCategory::Marketing => self.marketing,
            CostCategory::Food => self.food,
            CostCategory::Production => self.production,
            CostCategory::Guest => self.guest,
            CostCategory::Swag => self.swag,
            CostCategory::Security => self.security,
        }
    }

    pub fn per_person(&self) -> u64 {
        if self.event_size == 0 {
            0
        } else {
            self.total / u64::from(self.event_size)
        }
    }
}

/// Flat per-person cost model with a 10% contingency (rounded down).
pub fn estimate(event: &EventPlan) -> CostBreakdown {
    estimate_for(event.size(), event.budget_tier)
}

pub fn estimate_for(size: u32, tier: BudgetTier) -> CostBreakdown {
    let people = u64::from(size);
    let amount = |category: CostCategory| category.rate(tier) * people;

    let marketing = amount(CostCategory::Marketing);
    let food = amount(CostCategory::Food);
    let production = amount(CostCategory::Production);
    let guest = amount(CostCategory::Guest);
    let swag = amount(CostCategory::Swag);
    let security = amount(CostCategory::Security);

    let subtotal = marketing + food + production + guest + swag + security;
    let contingency = subtotal / 10;

    CostBreakdown {
        event_size: size,
        budget_tier: tier,
        marketing,
        food,
        production,
        guest,
        swag,
        security,
        subtotal,
        contingency,
        total: subtotal + contingency,
    }
}

/// Renders whole dollars with thousands separators, e.g. `$12,540`.
pub fn format_dollars(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${grouped}")
}
