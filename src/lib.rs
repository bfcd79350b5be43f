pub mod card;
pub mod cli;
pub mod config;
pub mod error;
pub mod processor;
pub mod scanner;
pub mod strategy;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, EnvFile, ScanConfig};
pub use error::{HashCardError, Result, UserFriendlyError};

// Core functionality re-exports
pub use card::{extract_cards, Card, CardExtractor, ExtractedCard};
pub use processor::{Diagnostic, FileProcessor, FileReport, RunReport, Severity};
pub use scanner::{DocumentScanner, FileFilter, MarkdownFile};
pub use strategy::{CardStrategy, MdJsonStrategy, StrategyRegistry};
pub use ui::{OutputFormatter, OutputMode, ProgressManager};

use tracing::{debug, error, info, warn};

/// Main library interface: one configured, validated extraction run.
pub struct HashCard {
    config: Config,
    registry: StrategyRegistry,
    output_formatter: OutputFormatter,
    progress_manager: ProgressManager,
}

impl HashCard {
    /// Validates `config` against `registry` before anything touches the disk.
    pub fn new(
        config: Config,
        registry: StrategyRegistry,
        output_mode: OutputMode,
        verbose: u8,
        quiet: bool,
    ) -> Result<Self> {
        config.validate(&registry)?;

        let output_formatter = OutputFormatter::new(output_mode, verbose, quiet);
        let progress_manager = ProgressManager::new(
            !quiet && output_mode == OutputMode::Human && console::Term::stderr().is_term(),
        );

        Ok(Self {
            config,
            registry,
            output_formatter,
            progress_manager,
        })
    }

    /// Create a HashCard instance from CLI arguments
    pub fn from_cli(cli_args: &Cli, registry: StrategyRegistry) -> Result<Self> {
        let config = cli_args.load_config()?;
        Self::new(
            config,
            registry,
            cli_args.output_mode(),
            cli_args.verbosity_level(),
            cli_args.quiet,
        )
    }

    /// Walk the scan directory and push every card through the strategy.
    ///
    /// Only an unknown strategy is returned as an error. Everything after that,
    /// a missing scan directory included, is collected in the report.
    pub fn run(&self) -> Result<RunReport> {
        let strategy = self.registry.resolve(&self.config.strategy)?;

        let scanner = DocumentScanner::new(&self.config.scan);

        info!(
            dir = %self.config.scan.directory.display(),
            out_dir = %self.config.scan.output_directory.display(),
            strategy = strategy.name(),
            "Scanning for cards"
        );

        let processor = FileProcessor::new(strategy, &self.config.scan.output_directory);
        let mut report = RunReport::new(&self.config);
        let spinner = self.progress_manager.create_scan_spinner();

        for entry in scanner.scan() {
            match entry {
                Ok(file) => {
                    spinner.set_message(file.relative_path.display().to_string());
                    debug!(path = %file.display_path(), "Processing markdown file");

                    let file_report = processor.process_file(&file.source_path);
                    spinner.inc(1);

                    self.progress_manager.suspend(&spinner, || {
                        for written in &file_report.written {
                            debug!(path = %written.display(), "Wrote card");
                        }
                        file_report.diagnostics.iter().for_each(log_diagnostic);
                    });
                    report.record_file(file_report);
                }
                Err(e) => {
                    let diagnostic = Diagnostic::Scan {
                        message: e.to_string(),
                    };
                    self.progress_manager
                        .suspend(&spinner, || log_diagnostic(&diagnostic));
                    report.record_diagnostic(diagnostic);
                }
            }
        }

        spinner.finish_and_clear();
        report.finish();

        if report.files_processed == 0 {
            self.output_formatter.warning(&format!(
                "No markdown files found in {}",
                self.config.scan.directory.display()
            ));
        }

        info!(
            files = report.files_processed,
            cards = report.cards_written,
            errors = report.error_count(),
            "Scan finished"
        );

        Ok(report)
    }

    /// Get output formatter reference
    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    /// Handle error with user-friendly output
    pub fn handle_error(&self, error: &HashCardError) {
        self.output_formatter.print_user_friendly_error(error);
    }
}

fn log_diagnostic(diagnostic: &Diagnostic) {
    match diagnostic.severity() {
        Severity::Warning => warn!("{}", diagnostic),
        Severity::Error => error!("{}", diagnostic),
    }
}

/// Get version information
pub fn version_info() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
