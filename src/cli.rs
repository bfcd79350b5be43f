use crate::config::{CliOverrides, Config};
use crate::error::Result;
use crate::ui::OutputMode;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hashcard")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Extract #card flashcards from markdown notes")]
#[command(
    long_about = "HashCard walks a directory of markdown notes, picks up every \
                  `#card <!--YYYY/MM/DD/id-->` marker and writes each card through \
                  the selected output strategy."
)]
#[command(after_help = "CONFIGURATION:\n  \
    Settings are read from a key=value file (.env by default) with the keys\n  \
    HASH_CARD_DIR, HASH_CARD_STRATEGY and HASH_CARD_OUT_DIR. File values win over flags.\n\n\
    EXAMPLES:\n  \
    hashcard\n  \
    hashcard --dir notes --out-dir cards\n  \
    hashcard --config deck.env --output-format json")]
pub struct Cli {
    /// Directory to scan for markdown files [default: .]
    #[arg(short, long, value_name = "DIR")]
    pub dir: Option<String>,

    /// Strategy used to write each card [default: md-json]
    #[arg(short, long, value_name = "NAME")]
    pub strategy: Option<String>,

    /// Output directory for processed cards [default: out]
    #[arg(short, long, value_name = "DIR")]
    pub out_dir: Option<String>,

    /// Key=value configuration file
    #[arg(short, long, help = "Path to key=value configuration file (default: .env if present)")]
    pub config: Option<PathBuf>,

    /// Output format for the run summary
    #[arg(long, value_enum, default_value_t = OutputFormat::Human)]
    pub output_format: OutputFormat,

    /// Verbose output level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (only errors are reported)
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print the registered strategies and exit
    #[arg(long)]
    pub list_strategies: bool,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable colored output
    Human,
    /// JSON formatted output
    Json,
    /// Plain text output
    Plain,
}

impl From<&OutputFormat> for OutputMode {
    fn from(format: &OutputFormat) -> Self {
        match format {
            OutputFormat::Human => OutputMode::Human,
            OutputFormat::Json => OutputMode::Json,
            OutputFormat::Plain => OutputMode::Plain,
        }
    }
}

impl Cli {
    pub fn output_mode(&self) -> OutputMode {
        OutputMode::from(&self.output_format)
    }

    /// Merged but unvalidated configuration; `HashCard::new` validates it.
    pub fn load_config(&self) -> Result<Config> {
        Config::load(self.config.as_ref(), &self.create_cli_overrides())
    }

    pub fn create_cli_overrides(&self) -> CliOverrides {
        CliOverrides::new()
            .with_directory(self.dir.as_ref().map(PathBuf::from))
            .with_strategy(self.strategy.clone())
            .with_output_directory(self.out_dir.as_ref().map(PathBuf::from))
    }

    pub fn verbosity_level(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose
        }
    }
}
