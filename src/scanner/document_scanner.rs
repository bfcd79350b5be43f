use crate::config::ScanConfig;
use crate::error::{HashCardError, Result};
use crate::scanner::file_filter::FileFilter;
use std::path::{Path, PathBuf};
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownFile {
    pub source_path: PathBuf,
    pub relative_path: PathBuf,
}

impl MarkdownFile {
    pub fn new(source_path: PathBuf, root: &Path) -> Self {
        let relative_path = source_path
            .strip_prefix(root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| source_path.clone());

        Self {
            source_path,
            relative_path,
        }
    }

    pub fn display_path(&self) -> String {
        self.source_path.display().to_string()
    }
}

pub struct DocumentScanner {
    filter: FileFilter,
    root: PathBuf,
}

impl DocumentScanner {
    pub fn new(config: &ScanConfig) -> Self {
        Self {
            filter: FileFilter::new(config),
            root: config.directory.clone(),
        }
    }

    /// Walks the tree lazily, yielding markdown files one at a time.
    ///
    /// Traversal errors, including a missing root, are yielded in place and the
    /// walk carries on. A root that is itself a markdown file is yielded as is.
    pub fn scan(&self) -> impl Iterator<Item = Result<MarkdownFile>> + '_ {
        WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| self.should_traverse(e))
            .filter_map(|entry| match entry {
                Ok(entry) => self.process_entry(&entry).map(Ok),
                Err(err) => Some(Err(HashCardError::from(err))),
            })
    }

    fn should_traverse(&self, entry: &DirEntry) -> bool {
        if entry.file_type().is_dir() {
            return self.filter.should_traverse_directory(entry.path());
        }
        true
    }

    fn process_entry(&self, entry: &DirEntry) -> Option<MarkdownFile> {
        if entry.file_type().is_dir() || !self.filter.is_markdown_file(entry.path()) {
            return None;
        }

        Some(MarkdownFile::new(entry.path().to_path_buf(), &self.root))
    }
}
