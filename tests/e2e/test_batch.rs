use crate::e2e::helpers;

use helpers::{pause_samples, speech_samples, wav_shape, TestContext, SAMPLE_RATE};
use lingotape::domain::audio::SegmentFailurePolicy;
use lingotape::domain::plan::PlanPattern;
use lingotape::domain::tts::PLACEHOLDER_VOICE_ID;
use lingotape::error::AppError;
use pretty_assertions::assert_eq;
use std::time::Duration;

const STANDARD_PAUSES_MS: u32 = 1000 + 2000 + 2000;

#[tokio::test]
async fn it_should_generate_the_standard_clip_for_a_phrase() {
    let ctx = TestContext::new().await;
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.exported, vec![ctx.output_dir().join("001-guten_morgen.wav")]);
    assert_eq!(summary.failed, 0);
    assert_eq!(ctx.output_files(), vec!["001-guten_morgen.wav"]);

    assert_eq!(
        ctx.server.request_texts(),
        vec!["Guten Morgen", "Доброе утро", "Guten Morgen", "Guten Morgen"]
    );
    let voices: Vec<String> = ctx.server.requests().into_iter().map(|r| r.voice_id).collect();
    assert_eq!(voices, vec!["voice-de", "voice-ru", "voice-de", "voice-de"]);

    let (samples, rate) = wav_shape(&summary.exported[0]);
    assert_eq!(rate, SAMPLE_RATE);
    assert_eq!(
        samples,
        3 * speech_samples("Guten Morgen")
            + speech_samples("Доброе утро")
            + pause_samples(STANDARD_PAUSES_MS)
    );
    assert!(ctx.sleeper.delays().is_empty());
}

#[tokio::test]
async fn it_should_reuse_repeated_source_audio_when_memoizing() {
    let mut ctx = TestContext::new().await;
    ctx.config.tts_cache_enabled = true;
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.exported.len(), 1);
    assert_eq!(ctx.server.request_texts(), vec!["Guten Morgen", "Доброе утро"]);

    let (samples, _) = wav_shape(&summary.exported[0]);
    assert_eq!(
        samples,
        3 * speech_samples("Guten Morgen")
            + speech_samples("Доброе утро")
            + pause_samples(STANDARD_PAUSES_MS)
    );
}

#[tokio::test]
async fn it_should_not_share_memoized_audio_between_phrases() {
    let mut ctx = TestContext::new().await;
    ctx.config.tts_cache_enabled = true;
    let file = ctx.write_phrases(
        "greetings.csv",
        &[("Guten Morgen", "Доброе утро"), ("Guten Morgen", "Доброе утро")],
    );

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.exported.len(), 2);
    assert_eq!(ctx.server.requests().len(), 4);
}

#[tokio::test]
async fn it_should_abort_the_phrase_and_continue_the_batch_after_exhausted_retries() {
    let mut ctx = TestContext::new().await;
    ctx.config.on_segment_failure = SegmentFailurePolicy::Abort;
    ctx.server.fail_always("Привет мир");
    let file = ctx.write_phrases(
        "phrases.csv",
        &[("Hallo Welt", "Привет мир"), ("Danke", "Спасибо")],
    );

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert_eq!(ctx.output_files(), vec!["002-danke.wav"]);
    assert_eq!(ctx.server.requests_for("Привет мир"), 3);
    assert_eq!(ctx.server.requests_for("Hallo Welt"), 1);
    assert_eq!(
        ctx.sleeper.delays(),
        vec![Duration::from_secs(2), Duration::from_secs(4)]
    );
}

#[tokio::test]
async fn it_should_drop_the_failed_segment_under_the_skip_policy() {
    let ctx = TestContext::new().await;
    ctx.server.fail_always("Привет мир");
    let file = ctx.write_phrases("phrases.csv", &[("Hallo Welt", "Привет мир")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.failed, 0);
    assert_eq!(ctx.output_files(), vec!["001-hallo_welt.wav"]);
    assert_eq!(ctx.server.requests_for("Привет мир"), 3);
    assert_eq!(ctx.server.requests_for("Hallo Welt"), 3);

    let (samples, _) = wav_shape(&summary.exported[0]);
    assert_eq!(
        samples,
        3 * speech_samples("Hallo Welt") + pause_samples(STANDARD_PAUSES_MS)
    );
}

#[tokio::test]
async fn it_should_fail_the_phrase_when_no_speech_survives() {
    let ctx = TestContext::new().await;
    ctx.server.fail_always("Hallo Welt");
    ctx.server.fail_always("Привет мир");
    let file = ctx.write_phrases("phrases.csv", &[("Hallo Welt", "Привет мир")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.failed, 1);
    assert!(summary.exported.is_empty());
    assert!(ctx.output_files().is_empty());
}

#[tokio::test]
async fn it_should_recover_from_a_transient_failure() {
    let ctx = TestContext::new().await;
    ctx.server.fail_times("Guten Morgen", 1);
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(ctx.output_files(), vec!["001-guten_morgen.wav"]);
    assert_eq!(summary.failed, 0);
    assert_eq!(ctx.server.requests_for("Guten Morgen"), 4);
    assert_eq!(ctx.sleeper.delays(), vec![Duration::from_secs(2)]);
}

#[tokio::test]
async fn it_should_skip_incomplete_rows_without_synthesis() {
    let ctx = TestContext::new().await;
    let file = ctx.write_phrases(
        "phrases.csv",
        &[("", "Пусто"), ("Guten Morgen", "Доброе утро"), ("Tschüss", "  ")],
    );

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.skipped, 2);
    assert_eq!(ctx.output_files(), vec!["002-guten_morgen.wav"]);
    assert_eq!(ctx.server.requests_for("Пусто"), 0);
    assert_eq!(ctx.server.requests_for("Tschüss"), 0);
}

#[tokio::test]
async fn it_should_number_clips_across_files() {
    let ctx = TestContext::new().await;
    let first = ctx.write_phrases("a.csv", &[("Guten Morgen", "Доброе утро")]);
    let second = ctx.write_phrases("b.csv", &[("Gute Nacht!", "Спокойной ночи")]);

    ctx.controller().run(&[first, second]).await.unwrap();

    assert_eq!(
        ctx.output_files(),
        vec!["001-guten_morgen.wav", "002-gute_nacht.wav"]
    );
}

#[tokio::test]
async fn it_should_continue_past_an_unreadable_file() {
    let ctx = TestContext::new().await;
    let broken = helpers::write_csv(
        ctx.input_dir(),
        "broken.csv",
        ("de", "ru"),
        &[("Hallo", "Привет")],
    );
    let good = ctx.write_phrases("good.csv", &[("Danke", "Спасибо")]);
    let missing = ctx.input_dir().join("missing.csv");

    let summary = ctx.controller().run(&[broken, missing, good]).await.unwrap();

    assert_eq!(summary.unreadable_files, 2);
    assert_eq!(ctx.output_files(), vec!["001-danke.wav"]);
}

#[tokio::test]
async fn it_should_fail_fast_on_a_placeholder_voice() {
    let mut ctx = TestContext::new().await;
    ctx.config.source_voice_id = PLACEHOLDER_VOICE_ID.to_string();
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let result = ctx.controller().run(&[file]).await;

    assert!(matches!(result, Err(AppError::Configuration(_))));
    assert!(ctx.server.requests().is_empty());
    assert!(ctx.output_files().is_empty());
}

#[tokio::test]
async fn it_should_fail_fast_without_an_api_key() {
    let mut ctx = TestContext::new().await;
    ctx.config.api_key = String::new();
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let result = ctx.controller().run(&[file]).await;

    assert!(matches!(result, Err(AppError::Configuration(_))));
    assert!(ctx.server.requests().is_empty());
}

#[tokio::test]
async fn it_should_plan_without_synthesis_in_dry_run() {
    let mut ctx = TestContext::new().await;
    ctx.config.api_key = String::new();
    let file = ctx.write_phrases(
        "greetings.csv",
        &[("Guten Morgen", "Доброе утро"), ("Wie geht's dir heute, mein Freund?", "Как дела?")],
    );

    let summary = ctx.dry_run_controller().run(&[file]).await.unwrap();

    assert_eq!(
        summary.planned,
        vec![
            ctx.output_dir().join("001-guten_morgen.wav"),
            ctx.output_dir().join("002-wie_gehts_dir_heute_mein.wav"),
        ]
    );
    assert!(summary.exported.is_empty());
    assert!(ctx.server.requests().is_empty());
    assert!(!ctx.output_dir().exists());
}

#[tokio::test]
async fn it_should_build_the_extended_clip() {
    let mut ctx = TestContext::new().await;
    ctx.config.plan_pattern = PlanPattern::Extended;
    ctx.config.tts_cache_enabled = true;
    let file = ctx.write_phrases("greetings.csv", &[("Guten Morgen", "Доброе утро")]);

    let summary = ctx.controller().run(&[file]).await.unwrap();

    assert_eq!(summary.exported.len(), 1);
    assert_eq!(ctx.server.request_texts(), vec!["Guten Morgen", "Доброе утро"]);
}
