use crate::error::{HashCardError, Result};
use crate::strategy::{MdJsonStrategy, StrategyRegistry};
use std::path::{Path, PathBuf};

/// Key=value file read from the working directory when `--config` is not given.
pub const DEFAULT_ENV_FILE: &str = ".env";

const DIR_KEY: &str = "hash_card_dir";
const STRATEGY_KEY: &str = "hash_card_strategy";
const OUT_DIR_KEY: &str = "hash_card_out_dir";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub scan: ScanConfig,
    pub strategy: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    pub directory: PathBuf,
    pub output_directory: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scan: ScanConfig::default(),
            strategy: MdJsonStrategy::NAME.to_string(),
        }
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            output_directory: PathBuf::from("out"),
        }
    }
}

impl Config {
    /// Defaults, then explicit flags, then the key=value file. A key present in
    /// the file wins over the flag. An explicitly named file must exist; the
    /// default `.env` is optional.
    pub fn load<P: AsRef<Path>>(config_path: Option<P>, cli_args: &CliOverrides) -> Result<Self> {
        let mut config = Self::default();
        config.merge_with_cli_args(cli_args);

        let env_file = match config_path {
            Some(path) => Some(EnvFile::load(path)?),
            None if Path::new(DEFAULT_ENV_FILE).is_file() => Some(EnvFile::load(DEFAULT_ENV_FILE)?),
            None => None,
        };

        if let Some(env_file) = env_file {
            config.merge_env_file(&env_file);
        }

        Ok(config)
    }

    pub fn merge_env_file(&mut self, env_file: &EnvFile) {
        if let Some(ref dir) = env_file.dir {
            self.scan.directory = PathBuf::from(dir);
        }

        if let Some(ref strategy) = env_file.strategy {
            self.strategy = strategy.clone();
        }

        if let Some(ref out_dir) = env_file.out_dir {
            self.scan.output_directory = PathBuf::from(out_dir);
        }
    }

    pub fn merge_with_cli_args(&mut self, cli_args: &CliOverrides) {
        if let Some(ref directory) = cli_args.directory {
            self.scan.directory = directory.clone();
        }

        if let Some(ref strategy) = cli_args.strategy {
            self.strategy = strategy.clone();
        }

        if let Some(ref output_directory) = cli_args.output_directory {
            self.scan.output_directory = output_directory.clone();
        }
    }

    pub fn validate(&self, registry: &StrategyRegistry) -> Result<()> {
        if self.scan.directory.as_os_str().is_empty() {
            return Err(HashCardError::EmptyParameter {
                name: "dir".to_string(),
            });
        }

        if self.strategy.is_empty() {
            return Err(HashCardError::EmptyParameter {
                name: "strategy".to_string(),
            });
        }

        // resolve only for the error listing valid names
        registry.resolve(&self.strategy)?;

        if self.scan.output_directory.as_os_str().is_empty() {
            return Err(HashCardError::EmptyParameter {
                name: "out-dir".to_string(),
            });
        }

        Ok(())
    }
}

/// Parsed `HASH_CARD_*` assignments. Keys match case-insensitively, the last
/// assignment of a key wins, and values are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvFile {
    pub dir: Option<String>,
    pub strategy: Option<String>,
    pub out_dir: Option<String>,
}

impl EnvFile {
    pub fn parse(content: &str) -> Self {
        let mut env_file = Self::default();

        for line in content.lines() {
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };

            match key.to_lowercase().as_str() {
                DIR_KEY => env_file.dir = Some(value.to_string()),
                STRATEGY_KEY => env_file.strategy = Some(value.to_string()),
                OUT_DIR_KEY => env_file.out_dir = Some(value.to_string()),
                _ => {}
            }
        }

        env_file
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(HashCardError::Config {
                message: format!("Configuration file not found: {}", path.display()),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| HashCardError::Config {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;

        Ok(Self::parse(&content))
    }
}

#[derive(Debug, Default)]
pub struct CliOverrides {
    pub directory: Option<PathBuf>,
    pub strategy: Option<String>,
    pub output_directory: Option<PathBuf>,
}

impl CliOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_directory(mut self, directory: Option<PathBuf>) -> Self {
        self.directory = directory;
        self
    }

    pub fn with_strategy(mut self, strategy: Option<String>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_output_directory(mut self, output_directory: Option<PathBuf>) -> Self {
        self.output_directory = output_directory;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.scan.directory, PathBuf::from("."));
        assert_eq!(config.scan.output_directory, PathBuf::from("out"));
        assert_eq!(config.strategy, "md-json");
        assert!(config.validate(&StrategyRegistry::builtin()).is_ok());
    }

    #[test]
    fn test_env_file_parsing() {
        let env_file = EnvFile::parse(
            "HASH_CARD_DIR=notes\n\
             hash_card_strategy=md-json\n\
             Hash_Card_Out_Dir=cards=v2\n\
             UNRELATED=1\n\
             no assignment here\n\
             \n\
             # HASH_CARD_DIR=ignored",
        );

        assert_eq!(env_file.dir.as_deref(), Some("notes"));
        assert_eq!(env_file.strategy.as_deref(), Some("md-json"));
        // split on the first '=' only
        assert_eq!(env_file.out_dir.as_deref(), Some("cards=v2"));
    }

    #[test]
    fn test_env_file_last_assignment_wins() {
        let env_file = EnvFile::parse("HASH_CARD_DIR=first\r\nHASH_CARD_DIR=second\r\n");
        assert_eq!(env_file.dir.as_deref(), Some("second"));
    }

    #[test]
    fn test_env_file_keeps_empty_values() {
        let env_file = EnvFile::parse("HASH_CARD_OUT_DIR=");
        assert_eq!(env_file.out_dir.as_deref(), Some(""));

        let mut config = Config::default();
        config.merge_env_file(&env_file);
        assert!(matches!(
            config.validate(&StrategyRegistry::builtin()),
            Err(HashCardError::EmptyParameter { ref name }) if name == "out-dir"
        ));
    }

    #[test]
    fn test_explicit_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "HASH_CARD_DIR=vault").unwrap();
        writeln!(temp_file, "HASH_CARD_OUT_DIR=build/cards").unwrap();

        let config = Config::load(Some(temp_file.path()), &CliOverrides::new()).unwrap();
        assert_eq!(config.scan.directory, PathBuf::from("vault"));
        assert_eq!(config.scan.output_directory, PathBuf::from("build/cards"));
        assert_eq!(config.strategy, "md-json");
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let result = Config::load(Some("/definitely/not/here/.env"), &CliOverrides::new());
        assert!(matches!(result, Err(HashCardError::Config { .. })));
    }

    #[test]
    fn test_env_file_wins_over_cli_overrides() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "HASH_CARD_OUT_DIR=cards").unwrap();

        let overrides = CliOverrides::new()
            .with_directory(Some(PathBuf::from("notes")))
            .with_output_directory(Some(PathBuf::from("flagged")));
        let config = Config::load(Some(temp_file.path()), &overrides).unwrap();

        // keys absent from the file keep the flag value
        assert_eq!(config.scan.directory, PathBuf::from("notes"));
        assert_eq!(config.scan.output_directory, PathBuf::from("cards"));
    }

    #[test]
    fn test_cli_overrides_without_env_file() {
        let overrides = CliOverrides::new().with_strategy(Some("md-yaml".to_string()));
        let mut config = Config::default();
        config.merge_with_cli_args(&overrides);

        assert_eq!(config.strategy, "md-yaml");
        assert_eq!(config.scan.output_directory, PathBuf::from("out"));
    }

    #[test]
    fn test_validation_order() {
        let registry = StrategyRegistry::builtin();

        let mut config = Config::default();
        config.scan.directory = PathBuf::new();
        config.strategy = "nope".to_string();
        assert!(matches!(
            config.validate(&registry),
            Err(HashCardError::EmptyParameter { ref name }) if name == "dir"
        ));

        let mut config = Config::default();
        config.strategy = String::new();
        assert!(matches!(
            config.validate(&registry),
            Err(HashCardError::EmptyParameter { ref name }) if name == "strategy"
        ));

        let mut config = Config::default();
        config.strategy = "md-yaml".to_string();
        config.scan.output_directory = PathBuf::new();
        assert!(matches!(
            config.validate(&registry),
            Err(HashCardError::UnknownStrategy { .. })
        ));
    }
}
