use crate::commands::{
    run_funnel, run_plan, run_rsvp_template, FunnelArgs, PlanArgs, RsvpTemplateArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use church_companion::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Church Companion Planner",
    about = "Generate ministry plans, outreach budgets and funnel health scores",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate a 12-month plan, event budget, goals and marketing plan
    Plan(PlanArgs),
    /// Score the event funnel from the six dashboard counters
    Funnel(FunnelArgs),
    /// Print or save the blank RSVP / check-in CSV sheet
    RsvpTemplate(RsvpTemplateArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Plan(args) => run_plan(args).await,
        Command::Funnel(args) => run_funnel(args),
        Command::RsvpTemplate(args) => run_rsvp_template(args),
    }
}
