use crate::config::ScanConfig;
use std::path::{Component, Path, PathBuf};

pub struct FileFilter {
    extension: String,
    output_directory: PathBuf,
}

impl FileFilter {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            extension: "md".to_string(),
            output_directory: config.output_directory.clone(),
        }
    }

    /// Exact, case-sensitive `.md` extension check.
    pub fn is_markdown_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| ext == self.extension)
    }

    /// Generated output is never read back as input.
    pub fn should_traverse_directory(&self, path: &Path) -> bool {
        !same_path(path, &self.output_directory)
    }
}

/// Lexical equality with `.` components dropped, then canonical equality when
/// both paths exist on disk.
fn same_path(a: &Path, b: &Path) -> bool {
    if normalize(a) == normalize(b) {
        return true;
    }

    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}
