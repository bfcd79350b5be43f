use crate::card::{extract_cards, ExtractWarning};
use crate::error::{HashCardError, Result};
use crate::processor::Diagnostic;
use crate::strategy::CardStrategy;
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of processing one markdown file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub cards_found: usize,
    pub written: Vec<PathBuf>,
    pub diagnostics: Vec<Diagnostic>,
}

impl FileReport {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            ..Self::default()
        }
    }

    pub fn cards_written(&self) -> usize {
        self.written.len()
    }
}

/// Runs extraction and the resolved strategy over single files.
///
/// Nothing is logged here; every problem ends up in the returned [`FileReport`].
pub struct FileProcessor<'a> {
    strategy: &'a dyn CardStrategy,
    output_root: &'a Path,
}

impl<'a> FileProcessor<'a> {
    pub fn new(strategy: &'a dyn CardStrategy, output_root: &'a Path) -> Self {
        Self {
            strategy,
            output_root,
        }
    }

    pub fn process_file(&self, path: &Path) -> FileReport {
        match read_markdown(path) {
            Ok(content) => self.process_content(path, &content),
            Err(e) => {
                let mut report = FileReport::new(path);
                report.diagnostics.push(Diagnostic::Read {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                });
                report
            }
        }
    }

    pub fn process_content(&self, path: &Path, content: &str) -> FileReport {
        let mut report = FileReport::new(path);

        for extracted in extract_cards(content) {
            report.cards_found += 1;

            let id = extracted.card.id.clone();
            let line = extracted.line_number;

            if let Some(ExtractWarning::MissingFront { .. }) = extracted.warning {
                report.diagnostics.push(Diagnostic::MissingFront {
                    path: path.to_path_buf(),
                    id: id.clone(),
                    line,
                });
            }

            match self.strategy.apply(extracted.card, self.output_root) {
                Ok(written) => report.written.push(written),
                Err(e) => report.diagnostics.push(Diagnostic::Strategy {
                    path: path.to_path_buf(),
                    id,
                    line,
                    message: e.to_string(),
                }),
            }
        }

        report
    }
}

/// Invalid UTF-8 is replaced rather than rejected.
fn read_markdown(path: &Path) -> Result<String> {
    let bytes = fs::read(path).map_err(|source| HashCardError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::card::Card;
    use crate::strategy::MdJsonStrategy;
    use tempfile::TempDir;

    struct FailingStrategy;

    impl CardStrategy for FailingStrategy {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn apply(&self, card: Card, _output_root: &Path) -> Result<PathBuf> {
            if card.id.ends_with("bad") {
                return Err(HashCardError::InvalidPath { path: card.id });
            }
            Ok(PathBuf::from(card.id))
        }
    }

    #[test]
    fn test_process_file_writes_every_card() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("deck.md");
        let out = temp_dir.path().join("out");
        fs::write(
            &input,
            "Hello\nFront of Card 1\n#card <!--2023/11/25/card1-->\nBack of Card 1\n---\n\
             Front of Card 2\n#card <!--2023/11/25/card2-->\nBack of Card 2",
        )
        .unwrap();

        let strategy = MdJsonStrategy::new();
        let report = FileProcessor::new(&strategy, &out).process_file(&input);

        assert_eq!(report.cards_found, 2);
        assert_eq!(report.cards_written(), 2);
        assert!(report.diagnostics.is_empty());
        assert!(out.join("2023/11/25/card1.md").is_file());
        assert!(out.join("2023/11/25/card2.md").is_file());
    }

    #[test]
    fn test_missing_front_still_writes() {
        let temp_dir = TempDir::new().unwrap();
        let strategy = MdJsonStrategy::new();
        let processor = FileProcessor::new(&strategy, temp_dir.path());

        let report = processor.process_content(
            Path::new("first.md"),
            "#card <!--2023/11/25/first-->\nanswer",
        );

        assert_eq!(report.cards_written(), 1);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic::MissingFront {
                path: PathBuf::from("first.md"),
                id: "2023/11/25/first".to_string(),
                line: 1,
            }]
        );
    }

    #[test]
    fn test_strategy_failure_does_not_stop_file() {
        let strategy = FailingStrategy;
        let processor = FileProcessor::new(&strategy, Path::new("out"));

        let report = processor.process_content(
            Path::new("deck.md"),
            "q1\n#card <!--2023/11/25/bad-->\n---\nq2\n#card <!--2023/11/25/good-->",
        );

        assert_eq!(report.cards_found, 2);
        assert_eq!(report.written, vec![PathBuf::from("2023/11/25/good")]);
        assert_eq!(report.diagnostics.len(), 1);
        match &report.diagnostics[0] {
            Diagnostic::Strategy { id, line, .. } => {
                assert_eq!(id, "2023/11/25/bad");
                assert_eq!(*line, 2);
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_file() {
        let temp_dir = TempDir::new().unwrap();
        let strategy = MdJsonStrategy::new();
        let processor = FileProcessor::new(&strategy, temp_dir.path());

        let missing = temp_dir.path().join("missing.md");
        let report = processor.process_file(&missing);

        assert_eq!(report.cards_found, 0);
        match &report.diagnostics[0] {
            Diagnostic::Read { path, message } => {
                assert_eq!(path, &missing);
                assert!(message.starts_with("Failed to read"));
                assert!(message.contains("missing.md"));
            }
            other => panic!("unexpected diagnostic: {:?}", other),
        }
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("latin1.md");
        let out = temp_dir.path().join("out");
        fs::write(&input, b"caf\xe9\n#card <!--2023/11/25/cafe-->\nok").unwrap();

        let strategy = MdJsonStrategy::new();
        let report = FileProcessor::new(&strategy, &out).process_file(&input);

        let card: Card =
            serde_json::from_str(&fs::read_to_string(&report.written[0]).unwrap()).unwrap();
        assert_eq!(card.front, "caf\u{FFFD}");
    }
}
