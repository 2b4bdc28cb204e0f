use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::{
    domain::{
        audio::{AssembledClip, AudioAssembler},
        phrase::{clip_file_name, slugify, PhraseError, PhrasePair, DEFAULT_SLUG_WORDS},
        plan::SegmentPlanBuilder,
        tts::{TtsClient, VoicePair},
    },
    error::{AppError, AppResult},
    infrastructure::{
        input::{read_phrase_file, PhraseColumns},
        output::ClipWriter,
    },
};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub columns: PhraseColumns,
    pub slug_words: usize,
    /// Log plans and file names without calling the TTS provider
    pub dry_run: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            columns: PhraseColumns::default(),
            slug_words: DEFAULT_SLUG_WORDS,
            dry_run: false,
        }
    }
}

/// What happened to one input row
#[derive(Debug)]
pub enum PhraseOutcome {
    Exported(PathBuf),
    /// Dry run: the file that would have been written
    Planned(PathBuf),
    Skipped(PhraseError),
    Failed(AppError),
}

#[derive(Debug, Default)]
pub struct BatchSummary {
    pub exported: Vec<PathBuf>,
    pub planned: Vec<PathBuf>,
    pub skipped: usize,
    pub failed: usize,
    pub unreadable_files: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: PhraseOutcome) {
        match outcome {
            PhraseOutcome::Exported(path) => self.exported.push(path),
            PhraseOutcome::Planned(path) => self.planned.push(path),
            PhraseOutcome::Skipped(_) => self.skipped += 1,
            PhraseOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Drives a batch: phrase files in, one clip per phrase out.
///
/// Phrases are processed strictly one after another. A failed phrase is
/// logged and counted; it never stops the batch.
pub struct BatchController {
    plan_builder: SegmentPlanBuilder,
    tts_client: Arc<TtsClient>,
    assembler: Arc<AudioAssembler>,
    voices: VoicePair,
    writer: ClipWriter,
    options: BatchOptions,
}

impl BatchController {
    pub fn new(
        plan_builder: SegmentPlanBuilder,
        tts_client: Arc<TtsClient>,
        assembler: Arc<AudioAssembler>,
        voices: VoicePair,
        writer: ClipWriter,
        options: BatchOptions,
    ) -> Self {
        Self {
            plan_builder,
            tts_client,
            assembler,
            voices,
            writer,
            options,
        }
    }

    /// Process every row of every file, numbering rows across the whole batch
    ///
    /// # Errors
    /// Only startup problems: unusable TTS configuration or an output
    /// directory that cannot be created
    pub async fn run(&self, files: &[PathBuf]) -> AppResult<BatchSummary> {
        if !self.options.dry_run {
            self.tts_client.check_configuration(&self.voices.source)?;
            self.tts_client.check_configuration(&self.voices.target)?;
            self.writer.ensure_output_dir()?;
        }

        tracing::info!(
            files = files.len(),
            pattern = %self.plan_builder.pattern(),
            policy = %self.assembler.failure_policy(),
            output_dir = %self.writer.output_dir().display(),
            dry_run = self.options.dry_run,
            "Starting batch"
        );

        let mut summary = BatchSummary::default();
        let mut sequence = 0;

        for file in files {
            let rows = match read_phrase_file(file, &self.options.columns) {
                Ok(rows) => rows,
                Err(e) => {
                    tracing::error!(file = %file.display(), error = %e, "Skipping unreadable phrase file");
                    summary.unreadable_files += 1;
                    continue;
                }
            };

            for row in rows {
                sequence += 1;
                let outcome = match row.pair {
                    Ok(pair) => self.process_phrase(sequence, &pair, file).await,
                    Err(reason) => {
                        tracing::warn!(
                            file = %file.display(),
                            row = row.row,
                            reason = %reason,
                            "Skipping incomplete phrase row"
                        );
                        PhraseOutcome::Skipped(reason)
                    }
                };
                summary.record(outcome);
            }
        }

        tracing::info!(
            exported = summary.exported.len(),
            planned = summary.planned.len(),
            skipped = summary.skipped,
            failed = summary.failed,
            unreadable_files = summary.unreadable_files,
            "Batch finished"
        );

        Ok(summary)
    }

    async fn process_phrase(&self, sequence: usize, pair: &PhrasePair, file: &Path) -> PhraseOutcome {
        let slug = slugify(pair.source_text(), self.options.slug_words);
        let plan = self
            .plan_builder
            .build(pair, &self.voices.source, &self.voices.target);

        if self.options.dry_run {
            let extension = self.assembler.export_format().file_extension();
            let file_name = clip_file_name(sequence, &slug, extension);
            tracing::info!(sequence, file_name = %file_name, plan = %plan, "Planned clip");
            return PhraseOutcome::Planned(self.writer.path_for(&file_name));
        }

        tracing::info!(
            sequence,
            source = %pair.source_text(),
            file = %file.display(),
            "Generating audio"
        );

        let assembled: AssembledClip = match self.assembler.assemble(&plan).await {
            Ok(assembled) => assembled,
            Err(e) => {
                tracing::error!(
                    sequence,
                    source = %pair.source_text(),
                    error = %e,
                    "Assembly failed, no file written"
                );
                return PhraseOutcome::Failed(e.into());
            }
        };

        let file_name = clip_file_name(sequence, &slug, assembled.clip.format.file_extension());
        match self.writer.write(&file_name, &assembled.clip) {
            Ok(path) => {
                tracing::info!(
                    sequence,
                    path = %path.display(),
                    duration_secs = assembled.duration.as_secs_f64(),
                    synthesis_calls = assembled.synthesis_calls,
                    failed_segments = assembled.failed_segments(),
                    "Saved clip"
                );
                PhraseOutcome::Exported(path)
            }
            Err(e) => {
                tracing::error!(sequence, file_name = %file_name, error = %e, "Failed to write clip");
                PhraseOutcome::Failed(e.into())
            }
        }
    }
}
