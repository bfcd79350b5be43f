use crate::config::Config;
use crate::processor::{Diagnostic, FileReport};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Totals for one walk, built up file by file.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    pub scan_directory: PathBuf,
    pub output_directory: PathBuf,
    pub strategy: String,
    pub files_processed: usize,
    pub cards_found: usize,
    pub cards_written: usize,
    pub diagnostics: Vec<Diagnostic>,
    pub started_at: DateTime<Utc>,
    pub duration: Duration,
    #[serde(skip)]
    start_time: Instant,
}

impl RunReport {
    pub fn new(config: &Config) -> Self {
        Self {
            scan_directory: config.scan.directory.clone(),
            output_directory: config.scan.output_directory.clone(),
            strategy: config.strategy.clone(),
            files_processed: 0,
            cards_found: 0,
            cards_written: 0,
            diagnostics: Vec::new(),
            started_at: Utc::now(),
            duration: Duration::ZERO,
            start_time: Instant::now(),
        }
    }

    pub fn record_file(&mut self, file: FileReport) {
        self.files_processed += 1;
        self.cards_found += file.cards_found;
        self.cards_written += file.cards_written();
        self.diagnostics.extend(file.diagnostics);
    }

    pub fn record_diagnostic(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    pub fn finish(&mut self) {
        self.duration = self.start_time.elapsed();
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| !d.is_error()).count()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }
}
