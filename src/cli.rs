use clap::Parser;

use crate::config::{Config, ConfigError};
use crate::utils::{expand_path, Profile};

#[derive(Debug, Parser)]
#[command(name = "todo-card")]
#[command(about = "A single-card todo list for the terminal")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<String>,

    /// Use development mode (uses separate dev config/log directories)
    #[arg(long)]
    pub dev: bool,

    /// Override the configured log level (trace, debug, info, warn, error)
    #[arg(long, value_name = "LEVEL")]
    pub log_level: Option<String>,
}

impl Cli {
    pub fn profile(&self) -> Profile {
        if self.dev { Profile::Dev } else { Profile::Prod }
    }

    /// Load the config named by `--config`, or the profile's default file
    pub fn load_config(&self) -> Result<Config, ConfigError> {
        match &self.config {
            Some(path) => Config::load_from_path(&expand_path(path)),
            None => Config::load_with_profile(self.profile()),
        }
    }

    /// `--log-level` wins over the config file
    pub fn log_level<'a>(&'a self, config: &'a Config) -> &'a str {
        self.log_level.as_deref().unwrap_or(&config.log_level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::io::Write;

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults_to_prod_profile() {
        let cli = Cli::try_parse_from(["todo-card"]).unwrap();
        assert_eq!(cli.profile(), Profile::Prod);
        assert!(cli.config.is_none());
        assert!(cli.log_level.is_none());
    }

    #[test]
    fn parses_all_flags() {
        let cli = Cli::try_parse_from([
            "todo-card",
            "--dev",
            "-c",
            "/tmp/todo.toml",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.profile(), Profile::Dev);
        assert_eq!(cli.config.as_deref(), Some("/tmp/todo.toml"));
        assert_eq!(cli.log_level.as_deref(), Some("debug"));
    }

    #[test]
    fn rejects_unknown_arguments() {
        assert!(Cli::try_parse_from(["todo-card", "add", "milk"]).is_err());
    }

    #[test]
    fn log_level_flag_overrides_config() {
        let config = Config::default();
        let cli = Cli::try_parse_from(["todo-card"]).unwrap();
        assert_eq!(cli.log_level(&config), "info");
        let cli = Cli::try_parse_from(["todo-card", "--log-level", "warn"]).unwrap();
        assert_eq!(cli.log_level(&config), "warn");
    }

    #[test]
    fn explicit_config_path_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "card_width = 44").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let cli = Cli::try_parse_from(["todo-card", "--config", &path]).unwrap();
        let config = cli.load_config().unwrap();
        assert_eq!(config.card_width, 44);
    }

    #[test]
    fn missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let cli =
            Cli::try_parse_from(["todo-card", "--config", path.to_str().unwrap()]).unwrap();
        assert!(matches!(cli.load_config(), Err(ConfigError::ReadError(_))));
    }
}
