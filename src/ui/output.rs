use crate::error::{HashCardError, UserFriendlyError};
use crate::processor::RunReport;
use console::{style, Emoji, Term};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "✓ ");
static CROSS: Emoji = Emoji("❌ ", "✗ ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");

pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    /// Errors always reach stderr, even in quiet mode.
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => eprintln!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => eprintln!("WARNING: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &HashCardError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        eprintln!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        eprintln!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    eprintln!(
                        "{}",
                        serde_json::json!({
                            "type": "suggestion",
                            "message": suggestion
                        })
                    );
                }
                OutputMode::Plain => eprintln!("SUGGESTION: {}", suggestion),
            }
        }
    }

    pub fn print_strategies<'a, I>(&self, names: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();

        match self.mode {
            OutputMode::Json => println!("{}", serde_json::json!({ "strategies": names })),
            _ => {
                for name in names {
                    println!("{}", name);
                }
            }
        }
    }

    pub fn print_run_report(&self, report: &RunReport) {
        match self.mode {
            // JSON output is data, not chatter: print it even when quiet
            OutputMode::Json => {
                let json_output =
                    serde_json::to_string_pretty(report).unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Human if !self.quiet => self.print_human_report(report),
            OutputMode::Plain if !self.quiet => self.print_plain_report(report),
            _ => {}
        }
    }

    fn print_human_report(&self, report: &RunReport) {
        let headline = "Card extraction completed";
        if self.use_colors {
            println!("{}{}", CHECKMARK, style(headline).green().bold());
        } else {
            println!("✓ {}", headline);
        }

        println!("  Files processed: {}", self.highlight(report.files_processed));
        println!("  Cards found:     {}", self.highlight(report.cards_found));
        println!("  Cards written:   {}", self.highlight(report.cards_written));
        println!(
            "  Output:          {}",
            report.output_directory.display()
        );
        println!("  Time taken:      {}", format_duration(report.duration));

        if report.error_count() > 0 {
            let line = format!("  Errors:          {}", report.error_count());
            if self.use_colors {
                println!("{}", style(line).red());
            } else {
                println!("{}", line);
            }
        }

        if report.warning_count() > 0 {
            let line = format!("  Warnings:        {}", report.warning_count());
            if self.use_colors {
                println!("{}", style(line).yellow());
            } else {
                println!("{}", line);
            }
        }

        if self.verbose_level > 0 && !report.diagnostics.is_empty() {
            println!();
            println!("Issues encountered:");
            for diagnostic in &report.diagnostics {
                println!("  - {}", diagnostic);
            }
        }
    }

    fn print_plain_report(&self, report: &RunReport) {
        println!("COMPLETED: Card extraction");
        println!("Files processed: {}", report.files_processed);
        println!("Cards found: {}", report.cards_found);
        println!("Cards written: {}", report.cards_written);
        println!("Duration: {:?}", report.duration);
        if !report.diagnostics.is_empty() {
            println!("Errors: {}", report.error_count());
            println!("Warnings: {}", report.warning_count());
        }
    }

    fn highlight(&self, value: usize) -> String {
        if self.use_colors {
            style(value).cyan().bold().to_string()
        } else {
            value.to_string()
        }
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        let emoji = match msg_type {
            MessageType::Error => CROSS,
            MessageType::Warning => WARNING,
        };

        if self.use_colors {
            let styled = match msg_type {
                MessageType::Error => style(message).red().bold(),
                MessageType::Warning => style(message).yellow().bold(),
            };
            eprintln!("{}{}", emoji, styled);
        } else {
            let prefix = match msg_type {
                MessageType::Error => "✗",
                MessageType::Warning => "!",
            };
            eprintln!("{} {}", prefix, message);
        }
    }

    fn print_json_message(&self, level: &str, message: &str) {
        eprintln!(
            "{}",
            serde_json::json!({
                "type": "message",
                "level": level,
                "message": message,
                "timestamp": chrono::Utc::now().to_rfc3339()
            })
        );
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}

fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else if secs > 0 {
        format!("{}s", secs)
    } else {
        format!("{}ms", duration.as_millis())
    }
}
