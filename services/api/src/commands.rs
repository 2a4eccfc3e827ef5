use crate::infra::{build_session, parse_budget_tier, parse_date};
use chrono::{Local, NaiveDate};
use church_companion::config::AppConfig;
use church_companion::error::AppError;
use church_companion::planning::cost::{format_dollars, CostCategory};
use church_companion::planning::export::{exporter_for, rsvp_csv_template, ExportFormat};
use church_companion::planning::funnel::{self, FunnelHealthScore};
use church_companion::planning::{
    BudgetTier, ChurchProfile, FunnelCounts, PlanRequest, PlanningOutcome, ZipFootprint,
};
use church_companion::telemetry;
use clap::{Args, ValueEnum};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

const DEFAULT_MISSION: &str =
    "To glorify God by making disciples of Jesus among families, youth, and the community.";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug)]
pub(crate) struct PlanArgs {
    /// Church name used in titles and export file names
    #[arg(long, default_value = "Peniel Baptist Church")]
    pub(crate) church_name: String,
    /// Mission / vision statement (blank inserts a placeholder)
    #[arg(long, default_value = DEFAULT_MISSION)]
    pub(crate) mission: String,
    /// Average weekly attendance
    #[arg(long, default_value_t = 120)]
    pub(crate) average_attendance: u32,
    /// Estimated youth / next-gen count (ages 13-25)
    #[arg(long, default_value_t = 25)]
    pub(crate) youth_count: u32,
    /// Active volunteers currently serving
    #[arg(long, default_value_t = 25)]
    pub(crate) volunteer_count: u32,
    /// Budget tier for next-gen and outreach: low, medium or high
    #[arg(long, value_parser = parse_budget_tier, default_value = "medium")]
    pub(crate) budget_tier: BudgetTier,
    /// Church ZIP code
    #[arg(long, default_value = "74104")]
    pub(crate) zip: String,
    /// Footprint ZIP codes separated by commas or spaces (defaults to the church ZIP)
    #[arg(long)]
    pub(crate) footprint_zips: Option<String>,
    /// Desired outreach event size in people
    #[arg(long, default_value_t = 300)]
    pub(crate) event_size: u32,
    /// Generation date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Skip the youth footprint and marketing plan regardless of configuration
    #[arg(long)]
    pub(crate) no_footprint: bool,
    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
    /// Directory to save the plan as .txt, .html and .docx documents
    #[arg(long)]
    pub(crate) output_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct FunnelArgs {
    /// Expected RSVPs (goal)
    #[arg(long, default_value_t = 0)]
    pub(crate) expected_rsvps: u32,
    /// Actual RSVPs received
    #[arg(long, default_value_t = 0)]
    pub(crate) actual_rsvps: u32,
    /// Event check-ins
    #[arg(long, default_value_t = 0)]
    pub(crate) check_ins: u32,
    /// First-time guests
    #[arg(long, default_value_t = 0)]
    pub(crate) first_time_guests: u32,
    /// Decisions / commitments
    #[arg(long, default_value_t = 0)]
    pub(crate) decisions: u32,
    /// Next-step or follow-up sign-ups
    #[arg(long, default_value_t = 0)]
    pub(crate) follow_up_signups: u32,
    /// Output rendering
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug, Default)]
pub(crate) struct RsvpTemplateArgs {
    /// Write the CSV to this path instead of stdout
    #[arg(long)]
    pub(crate) output: Option<PathBuf>,
}

pub(crate) async fn run_plan(args: PlanArgs) -> Result<(), AppError> {
    let PlanArgs {
        church_name,
        mission,
        average_attendance,
        youth_count,
        volunteer_count,
        budget_tier,
        zip,
        footprint_zips,
        event_size,
        today,
        no_footprint,
        format,
        output_dir,
    } = args;

    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    let mut features = config.features;
    if no_footprint {
        features.zip_footprint = false;
    }
    let session = build_session(&config.census, features)?;

    let footprint_zips = match footprint_zips {
        Some(raw) => ZipFootprint::parse(&zip, &raw).zips,
        None => vec![zip.clone()],
    };
    let request = PlanRequest {
        profile: ChurchProfile {
            name: church_name,
            mission,
            average_attendance,
            youth_count,
            volunteer_count,
            budget_tier,
        },
        primary_zip: zip,
        footprint_zips,
        event_size,
    };

    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let outcome = session.generate(request, today).await?;

    match format {
        OutputFormat::Text => print!("{}", render_plan(&outcome)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
    }

    if let Some(dir) = output_dir {
        for saved in save_plan_documents(&outcome, &dir)? {
            println!("Saved {}", saved.display());
        }
    }

    Ok(())
}

pub(crate) fn run_funnel(args: FunnelArgs) -> Result<(), AppError> {
    let counts = FunnelCounts {
        expected_rsvps: args.expected_rsvps,
        actual_rsvps: args.actual_rsvps,
        check_ins: args.check_ins,
        first_time_guests: args.first_time_guests,
        decisions: args.decisions,
        follow_up_signups: args.follow_up_signups,
    };
    let result = funnel::score(&counts);

    match args.format {
        OutputFormat::Text => print!("{}", render_funnel(&result)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&result)?),
    }
    Ok(())
}

pub(crate) fn run_rsvp_template(args: RsvpTemplateArgs) -> Result<(), AppError> {
    let template = rsvp_csv_template()?;
    match args.output {
        Some(path) => {
            fs::write(&path, template)?;
            println!("Saved {}", path.display());
        }
        None => print!("{template}"),
    }
    Ok(())
}

fn save_plan_documents(outcome: &PlanningOutcome, dir: &Path) -> Result<Vec<PathBuf>, AppError> {
    fs::create_dir_all(dir)?;
    let mut saved = Vec::new();
    for format in [ExportFormat::Text, ExportFormat::Html, ExportFormat::Docx] {
        let document = exporter_for(format).export(&outcome.plan_text, &outcome.church_name)?;
        let path = dir.join(&document.file_name);
        fs::write(&path, &document.bytes)?;
        info!(path = %path.display(), ?format, "exported plan document");
        saved.push(path);
    }
    Ok(saved)
}

fn render_plan(outcome: &PlanningOutcome) -> String {
    let mut out = String::new();
    out.push_str(outcome.plan_text.trim_end());
    out.push_str("\n\n");
    writeln!(out, "As of {}", outcome.generated_on.format("%B %-d, %Y")).expect("write date");

    let cost = &outcome.cost;
    writeln!(
        out,
        "\nEPIC EVENT BUDGET ({} people, {} budget)",
        cost.event_size,
        cost.budget_tier.label()
    )
    .expect("write budget heading");
    for category in CostCategory::ordered() {
        writeln!(
            out,
            "- {}: {}",
            category.label(),
            format_dollars(cost.amount(category))
        )
        .expect("write budget line");
    }
    writeln!(out, "- Contingency (10%): {}", format_dollars(cost.contingency))
        .expect("write contingency");
    writeln!(
        out,
        "- Total: {} (~{} per person)",
        format_dollars(cost.total),
        format_dollars(cost.per_person())
    )
    .expect("write total");

    let goals = &outcome.goals;
    out.push_str("\nMEASURABLE GOALS (12 MONTHS)\n");
    for (label, value) in [
        ("Average weekly attendance", goals.attendance_goal),
        ("Active small groups", goals.small_groups_goal),
        ("Youth leaders", goals.youth_leaders_goal),
        ("Active volunteers", goals.volunteers_goal),
        ("Epic Event guests", goals.event_guests_goal),
        ("Faith decisions", goals.decisions_goal),
    ] {
        writeln!(out, "- {label}: {value}").expect("write goal");
    }

    out.push_str("\nINTANGIBLE OUTCOMES TO WATCH\n");
    for outcome_text in &outcome.intangible_outcomes {
        writeln!(out, "- {outcome_text}").expect("write intangible");
    }

    if let Some(footprint) = &outcome.footprint {
        writeln!(
            out,
            "\nYOUTH FOOTPRINT: ~{} youth ages 13-19 (~{} age 13) across {} ZIP code(s)",
            footprint.youth.totals.youth_13_to_19,
            footprint.youth.totals.age_13,
            footprint.youth.zips_queried
        )
        .expect("write footprint");
        out.push('\n');
        out.push_str(footprint.marketing_plan.trim_end());
        out.push('\n');
    }

    if !outcome.advisories.is_empty() {
        out.push_str("\nADVISORIES\n");
        for advisory in &outcome.advisories {
            writeln!(out, "! {advisory}").expect("write advisory");
        }
    }

    out
}

fn render_funnel(result: &FunnelHealthScore) -> String {
    let mut out = String::new();
    writeln!(out, "Funnel health score: {}/100 ({})", result.score, result.label)
        .expect("write score");
    for (label, value) in [
        ("RSVPs vs goal", result.rsvp_vs_goal_pct),
        ("Show-up rate", result.show_up_pct),
        ("First-time guests", result.first_time_pct),
        ("Decision rate", result.decision_pct),
        ("Follow-up rate", result.follow_up_pct),
    ] {
        writeln!(out, "- {label}: {value:.1}%").expect("write stage");
    }
    writeln!(out, "{}", result.advisory).expect("write advisory");
    out
}
