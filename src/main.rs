use anyhow::{Context, Result};
use clap::Parser;
use lingotape::controllers::{BatchController, BatchOptions};
use lingotape::domain::audio::{AudioAssembler, SegmentFailurePolicy};
use lingotape::domain::plan::{PlanPattern, SegmentPlanBuilder};
use lingotape::domain::tts::TtsClient;
use lingotape::infrastructure::config::{Config, LogFormat};
use lingotape::infrastructure::input::{discover_phrase_files, PhraseColumns};
use lingotape::infrastructure::output::ClipWriter;
use lingotape::infrastructure::repositories::ElevenLabsTtsRepository;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "lingotape")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Generate bilingual listening clips from phrase tables")]
struct Args {
    /// Phrase files to process; defaults to every CSV in the input directory
    files: Vec<PathBuf>,

    #[arg(long, value_name = "DIR")]
    input_dir: Option<PathBuf>,

    #[arg(long, value_name = "DIR")]
    output_dir: Option<PathBuf>,

    /// What to do when one segment cannot be synthesized: skip or abort
    #[arg(long, value_name = "POLICY")]
    on_segment_failure: Option<SegmentFailurePolicy>,

    /// Segment layout: standard or extended
    #[arg(long, value_name = "PATTERN")]
    pattern: Option<PlanPattern>,

    /// Reuse synthesized audio for repeated text within a clip
    #[arg(long)]
    memoize: bool,

    /// Print plans and file names without calling the TTS provider
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.input_dir {
            config.input_dir = dir.clone();
        }
        if let Some(dir) = &self.output_dir {
            config.output_dir = dir.clone();
        }
        if let Some(policy) = self.on_segment_failure {
            config.on_segment_failure = policy;
        }
        if let Some(pattern) = self.pattern {
            config.plan_pattern = pattern;
        }
        if self.memoize {
            config.tts_cache_enabled = true;
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = Config::from_env().context("failed to load configuration")?;
    args.apply(&mut config);

    init_logging(&config);

    tracing::info!(
        model = %config.model_id,
        output_format = %config.output_format,
        max_attempts = config.max_attempts,
        memoize = config.tts_cache_enabled,
        "Starting lingotape"
    );

    let files = if args.files.is_empty() {
        discover_phrase_files(&config.input_dir)?
    } else {
        args.files.clone()
    };
    if files.is_empty() {
        tracing::warn!(input_dir = %config.input_dir.display(), "No phrase files found");
        return Ok(());
    }

    let tts_repo = Arc::new(ElevenLabsTtsRepository::new(
        config.api_url.clone(),
        config.api_key.clone(),
        config.request_timeout,
    )?);
    let tts_client = Arc::new(TtsClient::new(
        tts_repo,
        config.synthesis_settings(),
        config.retry_policy(),
    ));
    let assembler = Arc::new(AudioAssembler::new(
        tts_client.clone(),
        config.on_segment_failure,
        config.tts_cache_enabled,
    ));

    let controller = BatchController::new(
        SegmentPlanBuilder::new(config.plan_pattern),
        tts_client,
        assembler,
        config.voices(),
        ClipWriter::new(config.output_dir.clone()),
        BatchOptions {
            columns: PhraseColumns {
                source: config.source_column.clone(),
                target: config.target_column.clone(),
            },
            slug_words: config.slug_words,
            dry_run: args.dry_run,
        },
    );

    let summary = controller.run(&files).await?;

    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "Some phrases produced no clip");
    }

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "lingotape=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
