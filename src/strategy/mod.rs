pub mod md_json;

pub use md_json::MdJsonStrategy;

use crate::card::Card;
use crate::error::{HashCardError, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Turns one card into a persisted artifact below an output root.
pub trait CardStrategy {
    /// Name the strategy is registered under.
    fn name(&self) -> &'static str;

    /// Persist `card` below `output_root`, returning the artifact path.
    fn apply(&self, card: Card, output_root: &Path) -> Result<PathBuf>;
}

/// Name-to-strategy table, built once at startup and read-only afterwards.
pub struct StrategyRegistry {
    strategies: BTreeMap<&'static str, Box<dyn CardStrategy>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        Self {
            strategies: BTreeMap::new(),
        }
    }

    /// Registry with every strategy shipped in this crate.
    pub fn builtin() -> Self {
        Self::new().register(MdJsonStrategy::new())
    }

    pub fn register<S: CardStrategy + 'static>(mut self, strategy: S) -> Self {
        self.strategies.insert(strategy.name(), Box::new(strategy));
        self
    }

    pub fn resolve(&self, name: &str) -> Result<&dyn CardStrategy> {
        self.strategies
            .get(name)
            .map(|strategy| strategy.as_ref())
            .ok_or_else(|| HashCardError::UnknownStrategy {
                name: name.to_string(),
                available: self.names().map(str::to_string).collect(),
            })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.strategies.contains_key(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.strategies.keys().copied()
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct RecordingStrategy {
        seen: RefCell<Vec<String>>,
    }

    impl CardStrategy for RecordingStrategy {
        fn name(&self) -> &'static str {
            "recording"
        }

        fn apply(&self, card: Card, output_root: &Path) -> Result<PathBuf> {
            self.seen.borrow_mut().push(card.id.clone());
            Ok(output_root.join(card.id))
        }
    }

    #[test]
    fn test_builtin_registry() {
        let registry = StrategyRegistry::builtin();
        assert!(registry.contains("md-json"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["md-json"]);
        assert_eq!(registry.resolve("md-json").unwrap().name(), "md-json");
    }

    #[test]
    fn test_unknown_strategy() {
        let registry = StrategyRegistry::builtin();
        match registry.resolve("md-yaml") {
            Err(HashCardError::UnknownStrategy { name, available }) => {
                assert_eq!(name, "md-yaml");
                assert_eq!(available, vec!["md-json".to_string()]);
            }
            _ => panic!("expected UnknownStrategy"),
        }
    }

    #[test]
    fn test_register_custom_strategy() {
        let registry = StrategyRegistry::builtin().register(RecordingStrategy {
            seen: RefCell::new(Vec::new()),
        });

        assert_eq!(
            registry.names().collect::<Vec<_>>(),
            vec!["md-json", "recording"]
        );

        let strategy = registry.resolve("recording").unwrap();
        let path = strategy
            .apply(Card::new("2023/11/25/x", "f", "b"), Path::new("out"))
            .unwrap();
        assert_eq!(path, Path::new("out").join("2023/11/25/x"));
    }
}
