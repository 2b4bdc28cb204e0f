use lingotape::controllers::{BatchController, BatchOptions};
use lingotape::domain::audio::AudioAssembler;
use lingotape::domain::plan::SegmentPlanBuilder;
use lingotape::domain::tts::TtsClient;
use lingotape::infrastructure::config::Config;
use lingotape::infrastructure::input::PhraseColumns;
use lingotape::infrastructure::output::ClipWriter;
use lingotape::infrastructure::repositories::ElevenLabsTtsRepository;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;


pub use fixtures::{file_names, write_csv, write_phrase_csv, RecordingSleeper};
pub use mock_elevenlabs::{MockElevenLabs, SAMPLES_PER_CHAR};

pub const TEST_API_KEY: &str = "sk_test_lingotape";
pub const SOURCE_VOICE: &str = "voice-de";
pub const TARGET_VOICE: &str = "voice-ru";
pub const SAMPLE_RATE: u32 = 8000;

pub struct TestContext {
    pub server: MockElevenLabs,
    pub config: Config,
    pub sleeper: Arc<RecordingSleeper>,
    _workspace: TempDir,
}

impl TestContext {
    pub async fn new() -> Self {
        let server = MockElevenLabs::start(TEST_API_KEY).await;
        let workspace = TempDir::new().expect("Failed to create workspace");

        let input_dir = workspace.path().join("inputs");
        std::fs::create_dir_all(&input_dir).expect("Failed to create input dir");
        let output_dir = workspace.path().join("outputs");

        let vars: HashMap<&str, String> = HashMap::from([
            ("ELEVENLABS_API_KEY", TEST_API_KEY.to_string()),
            ("ELEVENLABS_API_URL", server.base_url().to_string()),
            ("ELEVENLABS_SOURCE_VOICE_ID", SOURCE_VOICE.to_string()),
            ("ELEVENLABS_TARGET_VOICE_ID", TARGET_VOICE.to_string()),
            ("TTS_OUTPUT_FORMAT", format!("pcm_{}", SAMPLE_RATE)),
            ("TTS_REQUEST_TIMEOUT_SECS", "5".to_string()),
            ("INPUT_DIR", input_dir.display().to_string()),
            ("OUTPUT_DIR", output_dir.display().to_string()),
        ]);
        let config = Config::from_lookup(|key| vars.get(key).cloned())
            .expect("Failed to build test config");

        Self {
            server,
            config,
            sleeper: Arc::new(RecordingSleeper::default()),
            _workspace: workspace,
        }
    }

    pub fn input_dir(&self) -> &Path {
        &self.config.input_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    pub fn write_phrases(&self, name: &str, rows: &[(&str, &str)]) -> PathBuf {
        write_phrase_csv(self.input_dir(), name, rows)
    }

    pub fn output_files(&self) -> Vec<String> {
        file_names(self.output_dir())
    }

    pub fn tts_client(&self) -> Arc<TtsClient> {
        let repo = ElevenLabsTtsRepository::new(
            self.config.api_url.clone(),
            self.config.api_key.clone(),
            self.config.request_timeout,
        )
        .expect("Failed to build repository");

        Arc::new(TtsClient::with_sleeper(
            Arc::new(repo),
            self.config.synthesis_settings(),
            self.config.retry_policy(),
            self.sleeper.clone(),
        ))
    }

    /// Controller wired from the current `config`, the way the binary does it
    pub fn controller(&self) -> BatchController {
        self.build_controller(false)
    }

    pub fn dry_run_controller(&self) -> BatchController {
        self.build_controller(true)
    }

    fn build_controller(&self, dry_run: bool) -> BatchController {
        let tts_client = self.tts_client();
        let assembler = Arc::new(AudioAssembler::new(
            tts_client.clone(),
            self.config.on_segment_failure,
            self.config.tts_cache_enabled,
        ));

        BatchController::new(
            SegmentPlanBuilder::new(self.config.plan_pattern),
            tts_client,
            assembler,
            self.config.voices(),
            ClipWriter::new(self.config.output_dir.clone()),
            BatchOptions {
                columns: PhraseColumns {
                    source: self.config.source_column.clone(),
                    target: self.config.target_column.clone(),
                },
                slug_words: self.config.slug_words,
                dry_run,
            },
        )
    }
}

/// Sample count and rate of a WAV file
pub fn wav_shape(path: &Path) -> (u32, u32) {
    let reader = hound::WavReader::open(path).expect("Failed to open wav");
    let spec = reader.spec();
    assert_eq!(spec.channels, 1);
    assert_eq!(spec.bits_per_sample, 16);
    (reader.len(), spec.sample_rate)
}

/// Samples the mock returns for `text`
pub fn speech_samples(text: &str) -> u32 {
    (text.chars().count() * SAMPLES_PER_CHAR) as u32
}

pub fn pause_samples(millis: u32) -> u32 {
    millis * SAMPLE_RATE / 1000
}
