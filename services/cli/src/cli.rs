use crate::commands::{
    run_chat, run_compass, run_explain, run_intention, run_progress, run_radar, run_rank,
    run_report, run_stances, ChatArgs, IntentionArgs, RadarArgs, RankArgs, ReportArgs,
    StancesArgs,
};
use crate::infra::SessionArgs;
use clap::{Parser, Subcommand};
use vota_informado::config::AppConfig;
use vota_informado::error::AppError;
use vota_informado::telemetry;

#[derive(Parser, Debug)]
#[command(
    name = "vota",
    about = "Compare your answers with Spanish party positions from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rank every party by weighted affinity
    Rank(RankArgs),
    /// Place the user on the economic/social compass next to the parties
    Compass(SessionArgs),
    /// Per-topic affinity for up to four parties
    Radar(RadarArgs),
    /// Show questionnaire completion
    Progress(SessionArgs),
    /// Full results view: ranking, compass, radar and weights
    Report(ReportArgs),
    /// Browse party summaries by topic or by party
    Stances(StancesArgs),
    /// Ask the AI to explain the top of the ranking
    Explain(SessionArgs),
    /// Ask the AI how well the answers fit a party you intend to vote for
    Intention(IntentionArgs),
    /// Ask the AI assistant about party positions
    Chat(ChatArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;

    match cli.command {
        Command::Rank(args) => run_rank(args, &config),
        Command::Compass(args) => run_compass(args, &config),
        Command::Radar(args) => run_radar(args, &config),
        Command::Progress(args) => run_progress(args, &config),
        Command::Report(args) => run_report(args, &config),
        Command::Stances(args) => run_stances(args, &config),
        Command::Explain(args) => run_explain(args, &config),
        Command::Intention(args) => run_intention(args, &config),
        Command::Chat(args) => run_chat(args, &config),
    }
}
