use chrono::NaiveDate;
use clap::Args;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::{info, warn};
use vota_informado::analysis::{GeminiClient, TextGenerator, UnconfiguredGenerator};
use vota_informado::config::{AppConfig, GeminiConfig};
use vota_informado::dataset::{Party, PoliticalDataset};
use vota_informado::error::AppError;
use vota_informado::session::{
    parse_weight_override, AnswerImporter, Importance, UserAnswers, UserWeights,
};

/// Options shared by every command that needs a questionnaire session.
#[derive(Args, Debug, Default)]
pub(crate) struct SessionArgs {
    /// Political dataset JSON (defaults to VOTA_DATASET, then the bundled sample)
    #[arg(long)]
    pub(crate) dataset: Option<PathBuf>,
    /// CSV with `question_id,answer` rows
    #[arg(long)]
    pub(crate) answers: Option<PathBuf>,
    /// Answer every question at random instead of reading a CSV
    #[arg(long, conflicts_with = "answers")]
    pub(crate) random: bool,
    /// Seed for --random, for repeatable answers
    #[arg(long, requires = "random")]
    pub(crate) seed: Option<u64>,
    /// Topic importance override as TOPIC=LEVEL (0-4); repeatable
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<WeightOverride>,
    /// Emit JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct WeightOverride {
    pub(crate) topic_id: String,
    pub(crate) importance: Importance,
}

/// Dataset plus the user's answers and weights for one invocation.
pub(crate) struct Session {
    pub(crate) dataset: PoliticalDataset,
    pub(crate) answers: UserAnswers,
    pub(crate) weights: UserWeights,
}

pub(crate) fn load_dataset(
    explicit: Option<PathBuf>,
    config: &AppConfig,
) -> Result<PoliticalDataset, AppError> {
    let dataset = match explicit.or_else(|| config.dataset_path.clone()) {
        Some(path) => {
            info!(path = %path.display(), "loading political dataset");
            PoliticalDataset::from_path(&path)?
        }
        None => PoliticalDataset::sample()?,
    };
    Ok(dataset)
}

pub(crate) fn load_session(args: &SessionArgs, config: &AppConfig) -> Result<Session, AppError> {
    let dataset = load_dataset(args.dataset.clone(), config)?;

    let answers = match &args.answers {
        Some(path) => AnswerImporter::new(&dataset).import_path(path)?,
        None if args.random => random_answers(&dataset, args.seed),
        None => UserAnswers::new(),
    };

    let mut weights = UserWeights::for_dataset(&dataset);
    for WeightOverride {
        topic_id,
        importance,
    } in &args.weights
    {
        if dataset.topic(topic_id).is_none() {
            warn!(topic_id = %topic_id, "ignoring weight for unknown topic");
            continue;
        }
        weights.set(topic_id.clone(), *importance);
    }

    info!(
        answered = answers.interacted_count(),
        concrete = answers.concrete_count(),
        "session loaded"
    );

    Ok(Session {
        dataset,
        answers,
        weights,
    })
}

fn random_answers(dataset: &PoliticalDataset, seed: Option<u64>) -> UserAnswers {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let answers = UserAnswers::random(dataset, &mut rng);
    info!(seed = ?seed, "filled answers at random");
    answers
}

/// Falls back to the unconfigured generator so analyses still answer with
/// their fixed messages.
pub(crate) fn build_generator(config: &GeminiConfig) -> Box<dyn TextGenerator> {
    match GeminiClient::from_config(config) {
        Ok(Some(client)) => {
            info!(model = client.model(), "text generation enabled");
            Box::new(client)
        }
        Ok(None) => {
            warn!("GEMINI_API_KEY not set; AI analyses are unavailable");
            Box::new(UnconfiguredGenerator)
        }
        Err(err) => {
            warn!(error = %err, "failed to build text generation client");
            Box::new(UnconfiguredGenerator)
        }
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

pub(crate) fn parse_party(raw: &str) -> Result<Party, String> {
    raw.parse::<Party>().map_err(|err| err.to_string())
}

fn parse_weight(raw: &str) -> Result<WeightOverride, String> {
    parse_weight_override(raw)
        .map(|(topic_id, importance)| WeightOverride {
            topic_id,
            importance,
        })
        .map_err(|err| err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use vota_informado::config::{AppEnvironment, TelemetryConfig};

    #[test]
    fn parses_party_labels_loosely() {
        assert_eq!(parse_party("eh-bildu"), Ok(Party::EhBildu));
        assert_eq!(parse_party("psoe"), Ok(Party::Psoe));
        assert!(parse_party("whigs").is_err());
    }

    #[test]
    fn parses_weight_flags() {
        let parsed = parse_weight("economia=4").expect("valid override");
        assert_eq!(parsed.topic_id, "economia");
        assert_eq!(parsed.importance.level(), 4);
        assert!(parse_weight("economia").is_err());
        assert!(parse_weight("economia=9").is_err());
    }

    #[test]
    fn seeded_random_answers_repeat() {
        let dataset = PoliticalDataset::sample().expect("bundled dataset is valid");
        let first = random_answers(&dataset, Some(42));
        assert_eq!(first, random_answers(&dataset, Some(42)));
        assert_eq!(first.interacted_count(), dataset.total_questions());
    }

    #[test]
    fn random_session_answers_every_question() {
        let args = SessionArgs {
            random: true,
            seed: Some(3),
            ..SessionArgs::default()
        };
        let config = AppConfig {
            environment: AppEnvironment::Test,
            telemetry: TelemetryConfig {
                log_level: "info".to_string(),
            },
            gemini: GeminiConfig {
                api_key: None,
                model: "gemini-test".to_string(),
                base_url: "http://localhost:1".to_string(),
            },
            dataset_path: None,
        };
        let session = load_session(&args, &config).expect("session loads");
        assert_eq!(
            session.answers.interacted_count(),
            session.dataset.total_questions()
        );
    }

    #[test]
    fn parses_iso_dates() {
        assert_eq!(
            parse_date("2026-10-18"),
            Ok(NaiveDate::from_ymd_opt(2026, 10, 18).expect("valid date"))
        );
        assert!(parse_date("18/10/2026").is_err());
    }
}
