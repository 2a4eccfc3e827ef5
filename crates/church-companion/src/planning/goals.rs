use super::domain::{ChurchProfile, EventPlan};
use serde::Serialize;

const MIN_SMALL_GROUPS: u32 = 3;
const MIN_YOUTH_LEADERS: u32 = 4;
const VOLUNTEER_HEADROOM: u32 = 10;
const MIN_DECISIONS: u32 = 5;

/// Qualitative outcomes leaders are asked to watch alongside the numbers.
pub const INTANGIBLE_OUTCOMES: [&str; 4] = [
    "Increased sense of belonging among youth and newcomers.",
    "Stronger intergenerational relationships and mentoring.",
    "Greater ownership of ministry among volunteers and youth.",
    "Stories of answered prayer, restored families, and transformed lives.",
];

/// End-of-year targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GoalTargets {
    pub attendance_goal: u32,
    pub small_groups_goal: u32,
    pub youth_leaders_goal: u32,
    pub volunteers_goal: u32,
    pub event_guests_goal: u32,
    pub decisions_goal: u32,
}

/// The attendance goal is 1.5x current attendance with halves rounded up
/// (123 -> 185), not banker's rounding.
pub fn scale(profile: &ChurchProfile, event: &EventPlan) -> GoalTargets {
    let attendance = profile.average_attendance;
    let event_size = event.size();

    GoalTargets {
        // x1.5 with the half rounded up
        attendance_goal: attendance.saturating_add(attendance.div_ceil(2)),
        small_groups_goal: (attendance / 40).max(MIN_SMALL_GROUPS),
        youth_leaders_goal: (profile.youth_count / 3).max(MIN_YOUTH_LEADERS),
        volunteers_goal: profile
            .volunteer_count
            .saturating_add(VOLUNTEER_HEADROOM)
            .max(attendance.saturating_mul(2) / 5),
        event_guests_goal: event_size / 2,
        decisions_goal: (event_size / 10).max(MIN_DECISIONS),
    }
}
