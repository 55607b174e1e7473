//! CLI command implementations

use anyhow::Result;
use clap::{ArgMatches, Command};

pub mod commands;

/// Main CLI application
pub struct CliApp;

impl CliApp {
    /// Create the CLI application
    pub fn app() -> Command {
        Command::new("dse-transform")
            .version(env!("CARGO_PKG_VERSION"))
            .about("Register and apply specification transformers for design-space exploration")
            .subcommand(commands::list::command())
            .subcommand(commands::catalog::command())
            .subcommand(commands::apply::command())
            .subcommand(commands::info::command())
    }

    /// Run the CLI application
    pub async fn run(matches: &ArgMatches) -> Result<()> {
        match matches.subcommand() {
            Some(("list", sub_matches)) => commands::list::run(sub_matches).await,
            Some(("catalog", sub_matches)) => commands::catalog::run(sub_matches).await,
            Some(("apply", sub_matches)) => commands::apply::run(sub_matches).await,
            Some(("info", sub_matches)) => commands::info::run(sub_matches).await,
            _ => {
                // No subcommand provided, show help
                let _ = Self::app().print_help();
                Ok(())
            }
        }
    }
}

/// Common CLI utilities
pub mod utils {
    use anyhow::{anyhow, Context, Result};
    use clap::{Arg, ArgMatches};
    use std::path::PathBuf;

    use crate::{AssembledConfiguration, Assembly, TransformConfig};

    /// Default configuration file names, searched in the working directory
    pub const DEFAULT_CONFIG_FILES: [&str; 3] = [
        ".dse-transform.yaml",
        ".dse-transform.yml",
        "dse-transform.yaml",
    ];

    /// The shared `--config` argument
    pub fn config_arg() -> Arg {
        Arg::new("config")
            .short('c')
            .long("config")
            .help("Configuration file path")
            .value_name("FILE")
    }

    /// Get configuration file path from arguments or use default
    pub fn get_config_path(matches: &ArgMatches) -> Result<PathBuf> {
        if let Some(config_path) = matches.get_one::<String>("config") {
            return Ok(PathBuf::from(config_path));
        }

        for name in DEFAULT_CONFIG_FILES {
            let path = PathBuf::from(name);
            if path.exists() {
                return Ok(path);
            }
        }

        let user_config = crate::utils::get_config_dir()?.join("config.yaml");
        if user_config.exists() {
            return Ok(user_config);
        }

        Err(anyhow!(
            "No configuration file found. Use --config to specify a file or create {}",
            DEFAULT_CONFIG_FILES[0]
        ))
    }

    /// Load configuration from file
    pub fn load_config(matches: &ArgMatches) -> Result<TransformConfig> {
        let config_path = get_config_path(matches)?;
        TransformConfig::from_file(&config_path)
    }

    /// Assemble a configuration with the built-in catalog
    pub fn assemble(config: TransformConfig) -> Result<AssembledConfiguration> {
        let mut assembly = Assembly::new();
        for module in config.into_modules() {
            assembly = assembly.install_boxed(module);
        }
        assembly
            .assemble()
            .context("Failed to assemble transformer configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_definition() {
        CliApp::app().debug_assert();

        let matches = CliApp::app().try_get_matches_from(["dse-transform"]).unwrap();
        assert!(matches.subcommand().is_none());

        let matches = CliApp::app()
            .try_get_matches_from(["dse-transform", "catalog"])
            .unwrap();
        assert_eq!(matches.subcommand_name(), Some("catalog"));
    }
}
