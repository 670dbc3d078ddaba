use crate::core::processor::ImageTransformer;
use crate::core::{FileJob, ImgToolError, JobStatus, Result, RunSummary, TransformConfig};
use crate::processors::{Compressor, Loader};
use crate::utils::{destination_path, expand_all, Interrupt};
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Runs one transform over every file matched by a set of patterns, sequentially.
///
/// Per-file failures are recorded in the [`RunSummary`]; only an empty match set fails the
/// whole run.
pub struct BatchRunner {
    config: TransformConfig,
    loader: Loader,
    compressor: Compressor,
    interrupt: Option<Interrupt>,
    show_progress: bool,
}

impl BatchRunner {
    pub fn new(config: TransformConfig) -> Self {
        Self {
            config,
            loader: Loader::new(),
            compressor: Compressor::default(),
            interrupt: None,
            show_progress: false,
        }
    }

    pub fn with_interrupt(mut self, interrupt: Interrupt) -> Self {
        self.interrupt = Some(interrupt);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn run<S: AsRef<str>>(&self, patterns: &[S], output_dir: &Path) -> Result<RunSummary> {
        let files = expand_all(patterns);
        if files.is_empty() {
            let joined: Vec<&str> = patterns.iter().map(|p| p.as_ref()).collect();
            return Err(ImgToolError::NoFilesMatched(joined.join(" ")));
        }
        self.run_files(files, output_dir)
    }

    /// Processes an already expanded file list.
    pub fn run_files(&self, files: Vec<PathBuf>, output_dir: &Path) -> Result<RunSummary> {
        if files.is_empty() {
            return Err(ImgToolError::NoFilesMatched("(empty file list)".to_string()));
        }

        let transformer = ImageTransformer::new(&self.config)?;
        let mut jobs = self.plan(files, output_dir);

        log::info!(
            "Processing {} file(s) into {}",
            jobs.len(),
            output_dir.display()
        );

        let pb = self.create_progress_bar(jobs.len());
        let mut summary = RunSummary::new(jobs.len());
        let mut claimed: HashMap<PathBuf, PathBuf> = HashMap::new();

        for job in jobs.iter_mut() {
            if self.interrupt.as_ref().is_some_and(Interrupt::is_triggered) {
                log::warn!("Interrupted, {} file(s) left unprocessed", summary.pending());
                summary.interrupted = true;
                break;
            }

            let name = display_name(&job.source_path);

            if let Some(first) = claimed.get(&job.destination_path) {
                let error = ImgToolError::DestinationConflict {
                    path: job.destination_path.clone(),
                    other: first.clone(),
                };
                log::warn!("{}", error);
                job.fail(&error);
                summary.record_failure(job.source_path.clone(), &error);
                pb.set_message(format!("FAIL {}", name));
                pb.inc(1);
                continue;
            }
            claimed.insert(job.destination_path.clone(), job.source_path.clone());

            match self.process_job(job, &transformer) {
                Ok(JobStatus::Skipped) => {
                    log::debug!("Skipped {}: destination exists", job.source_path.display());
                    job.status = JobStatus::Skipped;
                    summary.record_skip();
                    pb.set_message(format!("SKIP {}", name));
                }
                Ok(status) => {
                    job.status = status;
                    summary.record_success();
                    pb.set_message(format!("OK {}", name));
                }
                Err(error) => {
                    log::warn!("{}", error);
                    job.fail(&error);
                    summary.record_failure(job.source_path.clone(), &error);
                    pb.set_message(format!("FAIL {}", name));
                }
            }
            pb.inc(1);
        }

        pb.finish_and_clear();

        log::info!(
            "Batch finished: {} succeeded, {} skipped, {} failed of {}",
            summary.succeeded,
            summary.skipped,
            summary.failed,
            summary.total_matched
        );

        Ok(summary)
    }

    /// One pending job per file with its destination already derived.
    pub fn plan(&self, files: Vec<PathBuf>, output_dir: &Path) -> Vec<FileJob> {
        let force_png = self.config.produces_alpha();
        files
            .into_iter()
            .map(|source| {
                let destination = destination_path(
                    &source,
                    output_dir,
                    &self.config.filename_suffix,
                    force_png,
                );
                FileJob::new(source, destination)
            })
            .collect()
    }

    fn process_job(&self, job: &FileJob, transformer: &ImageTransformer) -> Result<JobStatus> {
        let destination = &job.destination_path;

        if destination.exists() && !self.config.overwrite {
            return Ok(JobStatus::Skipped);
        }

        if self.config.is_noop() {
            ensure_parent(destination)?;
            self.compressor.copy_original(&job.source_path, destination)?;
            return Ok(JobStatus::Success);
        }

        let image = self.loader.load(&job.source_path)?;
        let image = transformer.transform(image);

        ensure_parent(destination)?;
        self.compressor.save(&image, destination)?;

        Ok(JobStatus::Success)
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    }
}

fn ensure_parent(destination: &Path) -> Result<()> {
    match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => {
            std::fs::create_dir_all(parent).map_err(|e| ImgToolError::write(parent, e))
        }
        _ => Ok(()),
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
