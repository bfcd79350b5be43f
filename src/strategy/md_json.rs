use crate::card::Card;
use crate::error::{HashCardError, Result};
use crate::strategy::CardStrategy;
use std::fs;
use std::path::{Path, PathBuf};

/// Writes each card as a JSON object to `<root>/<id>.md`.
pub struct MdJsonStrategy {
    suffix: &'static str,
}

impl MdJsonStrategy {
    pub const NAME: &'static str = "md-json";

    pub fn new() -> Self {
        Self { suffix: "md" }
    }

    /// `2023/11/25/card1` under `out` becomes `out/2023/11/25/card1.md`.
    pub fn output_path(&self, card: &Card, output_root: &Path) -> Result<PathBuf> {
        let mut path = output_root.to_path_buf();

        for segment in card.id_segments() {
            // Security: keep every artifact below the output root
            if segment.is_empty() || segment == "." || segment == ".." || segment.contains('\\') {
                return Err(HashCardError::InvalidPath {
                    path: format!("Card id cannot be used as a path: {}", card.id),
                });
            }
            path.push(segment);
        }

        let file_name = path
            .file_name()
            .map(|name| format!("{}.{}", name.to_string_lossy(), self.suffix))
            .ok_or_else(|| HashCardError::InvalidPath {
                path: card.id.clone(),
            })?;
        path.set_file_name(file_name);

        Ok(path)
    }
}

impl Default for MdJsonStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl CardStrategy for MdJsonStrategy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn apply(&self, card: Card, output_root: &Path) -> Result<PathBuf> {
        let json = serde_json::to_vec_pretty(&card).map_err(|source| HashCardError::Serialize {
            id: card.id.clone(),
            source,
        })?;

        let output_path = self.output_path(&card, output_root)?;

        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent).map_err(|source| HashCardError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&output_path, json).map_err(|source| HashCardError::Write {
            path: output_path.clone(),
            source,
        })?;

        Ok(output_path)
    }
}
