use crate::infra::{build_generator, load_dataset, load_session, parse_date, parse_party};
use crate::infra::{Session, SessionArgs};
use chrono::{Local, NaiveDate};
use clap::Args;
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::warn;
use vota_informado::analysis::{AnalysisReply, AnalysisService, ChatSender, ChatSession};
use vota_informado::config::AppConfig;
use vota_informado::dataset::{Axis, Party};
use vota_informado::error::AppError;
use vota_informado::report::{
    stances_by_party, stances_by_topic, PartyProfile, ResultsReport, ResultsSummary, TopicStances,
};
use vota_informado::scoring::{
    compass_view, compute_affinity_breakdown, compute_topic_affinities, compute_user_position,
    CompassReference, RadarSelection, TopicAffinityRow, MAX_RADAR_PARTIES,
};
use vota_informado::session::SessionProgress;

const NO_ANSWERS_MESSAGE: &str =
    "No concrete answers yet: answer at least one question to see party affinity.";
const BUSY_MESSAGE: &str = "An analysis is already running; try again when it finishes.";
const EMPTY_QUESTION_MESSAGE: &str = "Nothing to ask: the question is empty.";

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
    /// Show how each topic contributes to every party's score
    #[arg(long)]
    pub(crate) breakdown: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RadarArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
    /// Party to compare (up to four); defaults to the best match
    #[arg(long = "party", value_parser = parse_party)]
    pub(crate) parties: Vec<Party>,
}

#[derive(Args, Debug)]
pub(crate) struct ReportArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
    /// Party to compare on the radar (up to four); defaults to the best match
    #[arg(long = "party", value_parser = parse_party)]
    pub(crate) parties: Vec<Party>,
    /// Report date (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Args, Debug)]
pub(crate) struct IntentionArgs {
    #[command(flatten)]
    pub(crate) session: SessionArgs,
    /// Party you intend to vote for
    #[arg(long, value_parser = parse_party)]
    pub(crate) party: Party,
}

#[derive(Args, Debug)]
pub(crate) struct ChatArgs {
    /// Political dataset JSON (defaults to VOTA_DATASET, then the bundled sample)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Question to ask; reads one question per line from stdin when omitted
    pub(crate) question: Option<String>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct StancesArgs {
    /// Political dataset JSON (defaults to VOTA_DATASET, then the bundled sample)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// Topic id whose party summaries to list; lists the topics when neither flag is given
    #[arg(long, conflicts_with = "party")]
    pub(crate) topic: Option<String>,
    /// Party whose summary in every topic to list
    #[arg(long, value_parser = parse_party)]
    pub(crate) party: Option<Party>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs, config: &AppConfig) -> Result<(), AppError> {
    let RankArgs { session, breakdown } = args;
    let Session {
        dataset,
        answers,
        weights,
    } = load_session(&session, config)?;

    if breakdown {
        let breakdown = if answers.concrete_count() == 0 {
            Vec::new()
        } else {
            compute_affinity_breakdown(&answers, &weights, &dataset)
        };
        if session.json {
            return print_json(&breakdown);
        }
        if breakdown.is_empty() {
            println!("{NO_ANSWERS_MESSAGE}");
            return Ok(());
        }
        println!("Affinity breakdown");
        for party in &breakdown {
            println!("\n{} {:.1}%", party.party, party.score);
            for component in &party.components {
                let title = dataset
                    .topic(&component.topic_id)
                    .map(|topic| topic.title.as_str())
                    .unwrap_or(component.topic_id.as_str());
                println!(
                    "  - {}: {:.1}% over {} question(s), weight {}",
                    title,
                    component.affinity * 100.0,
                    component.scored_questions,
                    component.effective_weight
                );
            }
        }
        return Ok(());
    }

    let report = ResultsReport::build(&answers, &weights, &dataset);
    let ranking = report.ranking_entries();
    if session.json {
        return print_json(&ranking);
    }
    if ranking.is_empty() {
        println!("{NO_ANSWERS_MESSAGE}");
        return Ok(());
    }

    println!("Party affinity");
    for entry in &ranking {
        println!(
            "{:>2}. {:<10} {:>5.1}%",
            entry.position, entry.party_label, entry.score
        );
    }
    Ok(())
}

pub(crate) fn run_compass(args: SessionArgs, config: &AppConfig) -> Result<(), AppError> {
    let Session {
        dataset, answers, ..
    } = load_session(&args, config)?;
    let markers = compass_view(&answers, &dataset, &CompassReference::standard());
    if args.json {
        return print_json(&markers);
    }

    let position = compute_user_position(&answers, &dataset);
    println!("Your position");
    for axis in [Axis::Economic, Axis::Social] {
        println!("- {}: {:+.2}", axis.label(), position.on(axis));
    }
    println!("\nCompass markers (economic, social)");
    for marker in &markers {
        println!(
            "- {:<10} ({:+.2}, {:+.2}) {}",
            marker.name.label(),
            marker.coords.economic,
            marker.coords.social,
            marker.color
        );
    }
    Ok(())
}

pub(crate) fn run_radar(args: RadarArgs, config: &AppConfig) -> Result<(), AppError> {
    let RadarArgs { session, parties } = args;
    let Session {
        dataset,
        answers,
        weights,
    } = load_session(&session, config)?;

    let report = ResultsReport::build(&answers, &weights, &dataset);
    let selection = report.radar_selection(&radar_selection(&parties));
    let rows = compute_topic_affinities(&answers, selection.parties(), &dataset);
    if session.json {
        return print_json(&rows);
    }
    if selection.parties().is_empty() {
        println!("{NO_ANSWERS_MESSAGE}");
        return Ok(());
    }

    render_radar(&rows, selection.parties());
    Ok(())
}

pub(crate) fn run_progress(args: SessionArgs, config: &AppConfig) -> Result<(), AppError> {
    let Session {
        dataset, answers, ..
    } = load_session(&args, config)?;
    let progress = SessionProgress::measure(&answers, &dataset);
    if args.json {
        return print_json(&progress);
    }
    render_progress(&progress);
    Ok(())
}

pub(crate) fn run_report(args: ReportArgs, config: &AppConfig) -> Result<(), AppError> {
    let ReportArgs {
        session,
        parties,
        today,
    } = args;
    let today = today.unwrap_or_else(|| Local::now().date_naive());
    let Session {
        dataset,
        answers,
        weights,
    } = load_session(&session, config)?;

    let summary = ResultsReport::build(&answers, &weights, &dataset).summary(
        &CompassReference::standard(),
        &radar_selection(&parties),
        today,
    );
    if session.json {
        return print_json(&summary);
    }
    render_summary(&summary);
    Ok(())
}

pub(crate) fn run_explain(args: SessionArgs, config: &AppConfig) -> Result<(), AppError> {
    let Session {
        dataset,
        answers,
        weights,
    } = load_session(&args, config)?;
    let report = ResultsReport::build(&answers, &weights, &dataset);
    if report.ranking().is_empty() {
        println!("{NO_ANSWERS_MESSAGE}");
        return Ok(());
    }

    let service = AnalysisService::new(build_generator(&config.gemini));
    let reply = service.explain_results(report.ranking(), &answers, &weights, &dataset);
    render_reply(reply.as_ref(), BUSY_MESSAGE, args.json)
}

pub(crate) fn run_intention(args: IntentionArgs, config: &AppConfig) -> Result<(), AppError> {
    let IntentionArgs { session, party } = args;
    let Session {
        dataset,
        answers,
        weights,
    } = load_session(&session, config)?;

    let service = AnalysisService::new(build_generator(&config.gemini));
    let reply = service.analyze_vote_intention(party, &answers, &weights, &dataset);
    render_reply(reply.as_ref(), BUSY_MESSAGE, session.json)
}

pub(crate) fn run_chat(args: ChatArgs, config: &AppConfig) -> Result<(), AppError> {
    let ChatArgs {
        dataset,
        question,
        json,
    } = args;
    let dataset = load_dataset(dataset, config)?;
    let service = AnalysisService::new(build_generator(&config.gemini));
    let mut chat = ChatSession::new(&dataset);

    if let Some(question) = question {
        let reply = chat.send(&service, &question);
        return render_reply(reply.as_ref(), unsent_reason(&question), json);
    }

    if let Some(greeting) = chat.messages().first().filter(|_| !json) {
        print_chat_message(greeting.sender, &greeting.text);
    }
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        if !json {
            print!("> ");
            stdout.flush()?;
        }
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if let Some(reply) = chat.send(&service, &line) {
            if !json {
                print_chat_message(ChatSender::Model, &reply.text);
            }
        }
    }

    if json {
        print_json(&chat.messages())?;
    }
    Ok(())
}

pub(crate) fn run_stances(args: StancesArgs, config: &AppConfig) -> Result<(), AppError> {
    let StancesArgs {
        dataset,
        topic,
        party,
        json,
    } = args;
    let dataset = load_dataset(dataset, config)?;

    match (topic, party) {
        (Some(topic_id), _) => {
            let view = stances_by_topic(&dataset, &topic_id)?;
            if json {
                return print_json(&view);
            }
            render_topic_stances(&view);
        }
        (None, Some(party)) => {
            let profile = stances_by_party(&dataset, party);
            if json {
                return print_json(&profile);
            }
            render_party_profile(&profile);
        }
        (None, None) => {
            println!("Pick a topic (--topic) or a party (--party). Topics:");
            for topic in &dataset.topics {
                println!("- {}: {}", topic.id, topic.title);
            }
        }
    }
    Ok(())
}

fn unsent_reason(question: &str) -> &'static str {
    if question.trim().is_empty() {
        EMPTY_QUESTION_MESSAGE
    } else {
        BUSY_MESSAGE
    }
}

fn radar_selection(parties: &[Party]) -> RadarSelection {
    let mut selection = RadarSelection::new();
    for &party in parties {
        if selection.contains(party) {
            continue;
        }
        if !selection.toggle(party) {
            warn!(
                party = %party,
                max = MAX_RADAR_PARTIES,
                "radar comparison is full, ignoring party"
            );
        }
    }
    selection
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<(), AppError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_chat_message(sender: ChatSender, text: &str) {
    let speaker = match sender {
        ChatSender::User => "You",
        ChatSender::Model => "Assistant",
    };
    println!("\n{speaker}:\n{text}\n");
}

/// `unsent` is printed when the request never reached the service.
fn render_reply(
    reply: Option<&AnalysisReply>,
    unsent: &str,
    json: bool,
) -> Result<(), AppError> {
    let Some(reply) = reply else {
        println!("{unsent}");
        return Ok(());
    };
    if json {
        return print_json(reply);
    }
    if !reply.is_generated() {
        warn!(kind = ?reply.kind, "showing fallback message");
    }
    println!("{}", reply.text);
    Ok(())
}

fn render_progress(progress: &SessionProgress) {
    println!(
        "Answered {}/{} questions ({} with a concrete stance)",
        progress.answered_questions, progress.total_questions, progress.scorable_questions
    );
    if progress.completion_met {
        println!("Every topic has enough answers to show results.");
    } else {
        println!("Answer at least two questions per topic to unlock the results view.");
    }
}

fn render_radar(rows: &[TopicAffinityRow], parties: &[Party]) {
    println!("Topic affinity");
    for row in rows {
        let scores = parties
            .iter()
            .map(|party| format!("{} {:.1}%", party, row.score(*party).unwrap_or(0.0)))
            .collect::<Vec<_>>()
            .join(" | ");
        println!("- {}: {}", row.topic, scores);
    }
}

fn render_topic_stances(view: &TopicStances) {
    println!("Party stances on {}", view.topic_title);
    if view.entries.is_empty() {
        println!("No party summaries for this topic.");
    }
    for entry in &view.entries {
        println!("\n{} ({})\n{}", entry.party_label, entry.color, entry.summary);
    }
}

fn render_party_profile(profile: &PartyProfile) {
    println!("{}", profile.heading);
    if profile.entries.is_empty() {
        println!("No topic summaries for this party.");
    }
    for entry in &profile.entries {
        println!("\n{}\n{}", entry.topic_title, entry.summary);
    }
}

fn render_summary(summary: &ResultsSummary) {
    println!("Results report ({})", summary.generated_on);
    render_progress(&summary.progress);

    println!("\nTopic importance");
    for weight in &summary.weights {
        println!(
            "- {}: {} ({})",
            weight.topic_title, weight.importance_label, weight.level
        );
    }

    if summary.ranking.is_empty() {
        println!("\n{NO_ANSWERS_MESSAGE}");
    } else {
        println!("\nParty affinity");
        for entry in &summary.ranking {
            println!(
                "{:>2}. {:<10} {:>5.1}%",
                entry.position, entry.party_label, entry.score
            );
        }
    }

    println!("\nCompass (economic, social)");
    for marker in &summary.compass {
        println!(
            "- {:<10} ({:+.2}, {:+.2})",
            marker.name.label(),
            marker.coords.economic,
            marker.coords.social
        );
    }

    if !summary.radar_parties.is_empty() {
        println!();
        render_radar(&summary.radar, &summary.radar_parties);
    }
}
