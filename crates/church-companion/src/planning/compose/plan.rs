use super::{wrap, WRAP_WIDTH};
use crate::planning::demographics::Demographics;
use crate::planning::domain::{BudgetTier, ChurchProfile};
use crate::planning::goals::GoalTargets;
use std::fmt::Write as _;

pub const MISSION_PLACEHOLDER: &str =
    "(Add your church mission / vision statement here to anchor the plan.)";

fn size_label(average_attendance: u32) -> &'static str {
    if average_attendance <= 150 {
        "smaller"
    } else {
        "medium-sized or larger"
    }
}

fn youth_label(youth_count: u32) -> &'static str {
    if youth_count <= 20 {
        "modest"
    } else {
        "strong"
    }
}

fn budget_narrative(tier: BudgetTier) -> &'static str {
    match tier {
        BudgetTier::Low => "a lean, highly relational approach with creative, low-cost strategies.",
        BudgetTier::Medium => {
            "balanced use of relational and program-based strategies with moderate event investment."
        }
        BudgetTier::High => {
            "larger events, more frequent gatherings, and robust resource investment for teams and tech."
        }
    }
}

/// Quarter-by-quarter implementation plan.
pub fn compose_ministry_plan(
    profile: &ChurchProfile,
    demographics: &Demographics,
    goals: &GoalTargets,
) -> String {
    let mission = if profile.mission.trim().is_empty() {
        MISSION_PLACEHOLDER.to_string()
    } else {
        wrap(&profile.mission, WRAP_WIDTH)
    };
    let locale = demographics.locale;

    let mut text = String::new();
    writeln!(
        text,
        "12-MONTH IMPLEMENTATION PLAN FOR {}",
        profile.name.to_uppercase()
    )
    .expect("write title");
    text.push('\n');

    writeln!(text, "Mission / DNA:\n{mission}").expect("write mission");
    text.push('\n');

    writeln!(text, "Local Context:").expect("write context heading");
    writeln!(text, "- Community: {locale}").expect("write community");
    writeln!(
        text,
        "- Snapshot: {}",
        wrap(demographics.summary, WRAP_WIDTH)
    )
    .expect("write snapshot");
    writeln!(
        text,
        "- Ministry implications: {}",
        wrap(demographics.ministry_implications, WRAP_WIDTH)
    )
    .expect("write implications");
    text.push('\n');

    writeln!(text, "Church Profile:").expect("write profile heading");
    writeln!(
        text,
        "- Average weekly attendance: ~{} ({} congregation)",
        profile.average_attendance,
        size_label(profile.average_attendance)
    )
    .expect("write attendance");
    writeln!(
        text,
        "- Estimated youth / next-gen: ~{} ({} base to build on)",
        profile.youth_count,
        youth_label(profile.youth_count)
    )
    .expect("write youth");
    writeln!(
        text,
        "- Volunteer capacity: ~{} active volunteers",
        profile.volunteer_count
    )
    .expect("write volunteers");
    writeln!(
        text,
        "- Budget level for next-gen & outreach: {} - this suggests {}",
        profile.budget_tier,
        budget_narrative(profile.budget_tier)
    )
    .expect("write budget");
    text.push('\n');

    writeln!(text, "MEASURABLE TARGETS (End of 12 Months):").expect("write targets heading");
    writeln!(
        text,
        "- Average weekly attendance: ~{}",
        goals.attendance_goal
    )
    .expect("write attendance goal");
    writeln!(text, "- Active small groups: {}", goals.small_groups_goal)
        .expect("write groups goal");
    writeln!(
        text,
        "- Youth / young adult leaders: {}",
        goals.youth_leaders_goal
    )
    .expect("write leaders goal");
    writeln!(text, "- Active volunteers: {}", goals.volunteers_goal)
        .expect("write volunteers goal");
    writeln!(
        text,
        "- Guests at the Epic Event from outside the church: ~{}",
        goals.event_guests_goal
    )
    .expect("write guests goal");
    writeln!(
        text,
        "- Decisions / commitments to Christ: at least {}",
        goals.decisions_goal
    )
    .expect("write decisions goal");
    text.push('\n');

    text.push_str(YEARLY_GOALS);
    text.push('\n');
    text.push_str(&quarter_one(locale));
    text.push('\n');
    text.push_str(QUARTER_TWO);
    text.push('\n');
    text.push_str(QUARTER_THREE);
    text.push('\n');
    text.push_str(QUARTER_FOUR);
    text.push('\n');
    text.push_str(CLOSING);

    text
}

const RULE: &str = "--------------------------------------------------";

const YEARLY_GOALS: &str = "\
YEARLY BIG-PICTURE GOALS (End of 12 Months):
- Strengthen a clear next-gen discipleship pipeline (ages 13-21).
- Grow a culture of warm relationships, mentoring, and \"sticky\" community.
- Host at least one Epic Event as a catalytic moment for outreach.
- Increase engagement in small groups and serving.
- Build a youth leadership pipeline including mentoring and ministry roles.
";

fn quarter_one(locale: &str) -> String {
    format!(
        "{RULE}
QUARTER 1 (Months 1-3): FOUNDATION & ASSESSMENT
{RULE}
Focus: Clarify who we are, who we are reaching, and what health looks like.

Month 1 - Listen & Clarify:
- Conduct a simple church-wide survey (paper or digital) to learn:
  - Spiritual growth needs
  - Interest in small groups
  - Skills and availability for serving
- Re-articulate the mission and vision from the platform and in small meetings.
- Preach/teach on God's heart for the next generation (Psalm 78, Mark 3, etc.).

Month 2 - Pilot Community Structures:
- Launch 1-2 pilot small groups (e.g., young adults, young families, mixed group).
- Identify 5-8 \"implementation champions\" (potential leaders) to form a core team.
- Begin informal youth hangouts (e.g., after church, simple mid-week connection).

Month 3 - Map the Community & Build Systems:
- Identify key neighborhoods and schools around the church in {locale}.
- Start a simple \"Next-Gen Dashboard\":
  - Youth present, visitors, follow-ups, new small group members.
- Hold a \"Vision Night\" for youth and parents to share the year plan.
"
    )
}

const QUARTER_TWO: &str = "\
--------------------------------------------------
QUARTER 2 (Months 4-6): SYSTEMS & DISCIPLESHIP PATHWAYS
--------------------------------------------------
Focus: Build clear pathways using Precision Discipleship and 72-Hour Follow-Up concepts.

Month 4 - Precision Discipleship Pathway:
- Define what a mature 21-year-old disciple looks like in your context:
  - Scripture engagement, prayer, community, serving, evangelism.
- Create simple milestones for ages 13-21 (first serving role, first Bible reading plan, first outreach).
- Communicate this pathway visually (poster, handout, slide).

Month 5 - Small Groups & Mentoring:
- Expand to 3-4 small groups, ensuring at least one group focuses on next-gen or young adults.
- Pair each youth with a caring adult or older peer as a mentor.
- Train mentors with 3-4 simple questions:
  - \"How are you really?\"
  - \"Where did you see God this week?\"
  - \"What is one step of obedience you sense God inviting you to take?\"
  - \"How can I pray for you?\"

Month 6 - Follow-Up & Engagement:
- Implement a 72-Hour Follow-Up for all new youth/visitors:
  - Within 24 hours: warm text or call.
  - Within 72 hours: invite to small group or next gathering.
- Begin planning the Epic Event for Quarter 3:
  - Define purpose: outreach, recommitment, on-ramp into groups.
  - Set prayer emphasis for the event.
";

const QUARTER_THREE: &str = "\
--------------------------------------------------
QUARTER 3 (Months 7-9): EPIC EVENT & MOMENTUM
--------------------------------------------------
Focus: Host a catalytic Epic Event and turn decisions into discipleship.

Month 7 - Pre-Event Incubation:
- Ask every small group to pray for and list 3-5 people to invite.
- Strengthen relational bridges:
  - Host one pre-event social (game night, BBQ, park hangout).
- Finalize Epic Event details (date, theme, speakers, worship, teams).

Month 8 - Epic Event:
- Execute the event with excellence and warmth:
  - Clear welcome, clear gospel presentation, clear next steps.
- Capture contact info for all guests (cards, QR code, or text sign-up).
- Same-day micro-follow-up:
  - Hand them next-steps info (small groups, youth nights, mentoring).

Month 9 - Post-Event Integration:
- Use the 72-Hour Follow-Up plan to contact every guest.
- Launch short-term \"On-Ramp Groups\" or classes for new people:
  - 4-6 weeks focused on basics: Who is Jesus? What is church? Why community?
- Invite engaged youth into a 12-week Youth Leadership Track:
  - Character, Scripture, prayer, serving, basic evangelism.
";

const QUARTER_FOUR: &str = "\
--------------------------------------------------
QUARTER 4 (Months 10-12): CONSOLIDATION & MULTIPLICATION
--------------------------------------------------
Focus: Solidify rhythms, multiply leaders, and prepare for the next year.

Month 10 - Evaluate & Celebrate:
- Gather leaders to review:
  - Attendance trends (Sundays, youth, small groups).
  - Stories of life change (testimonies, answered prayers).
  - Volunteer health and needs.
- Share stories from the platform to build faith and buy-in.

Month 11 - Leadership Pipeline:
- Continue or repeat the Youth Leadership Track for new students.
- Identify potential new small-group leaders and co-leaders.
- Offer training on:
  - Leading discussions
  - Caring for people
  - Empowering others to serve

Month 12 - Plan the Next 12 Months:
- Revisit mission, vision, and key metrics.
- Decide:
  - How many Epic Events next year?
  - Which small groups will continue or multiply?
  - What new outreach expressions to start (school partnerships, service projects)?
- Commission leaders publicly and pray for the next year's harvest.
";

const CLOSING: &str = "\
This plan is a flexible template. You can adjust details, but the flow remains:
FOUNDATION -> PATHWAYS -> EPIC CATALYST -> CONSOLIDATION & MULTIPLICATION.
";
