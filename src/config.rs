use clap::Parser;
use owo_colors::OwoColorize;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::simulator::memory::MEMORY_WORDS;

/// File read from the working directory for default options
pub const CONFIG_FILE: &str = "mipsim.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse {}: {0}", CONFIG_FILE.bright_yellow())]
    Toml(#[from] toml::de::Error),

    #[error("No file specified")]
    NoFile,

    #[error("'{}' must be a valid file", .0.bright_yellow())]
    NotAFile(String),
}

#[derive(Parser, Deserialize, Debug, Default)]
#[command(author, version, about)]
#[serde(default)]
pub struct OptionalConfig {
    /// Prints the registers and control signals after every instruction
    #[arg(short, long)]
    pub debug: bool,

    /// Size of the data memory, in words. Defaults to 2000
    #[arg(short, long)]
    pub memory_words: Option<usize>,

    /// Prints the token stream before running it
    #[arg(long)]
    pub print_tokens: bool,

    /// Disables colored output
    #[arg(long)]
    pub no_color: bool,

    /// The assembly file to execute
    pub file: Option<String>,
}

impl OptionalConfig {
    pub fn get_args() -> Self {
        Self::parse()
    }

    /// Reads the config file, if there's one. A missing file is the same as an empty one.
    pub fn get_toml() -> Result<Self, ConfigError> {
        match std::fs::read_to_string(CONFIG_FILE) {
            Ok(config) => Self::from_toml(&config),
            Err(_) => Ok(Self::default()),
        }
    }

    pub fn from_toml(config: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(config)?)
    }

    pub fn merge(self, rhs: Self) -> Self {
        Self {
            debug: self.debug || rhs.debug,
            memory_words: self.memory_words.or(rhs.memory_words),
            print_tokens: self.print_tokens || rhs.print_tokens,
            no_color: self.no_color || rhs.no_color,
            file: self.file.or(rhs.file),
        }
    }
}

#[derive(Debug, Default)]
pub struct Config {
    pub debug: bool,
    pub memory_words: usize,
    pub print_tokens: bool,
    pub no_color: bool,
    pub file: String,
}

impl TryFrom<OptionalConfig> for Config {
    type Error = ConfigError;

    fn try_from(config: OptionalConfig) -> Result<Self, ConfigError> {
        let file = config.file.ok_or(ConfigError::NoFile)?;
        if !Path::new(&file).is_file() {
            return Err(ConfigError::NotAFile(file));
        }

        Ok(Self {
            debug: config.debug,
            memory_words: config.memory_words.unwrap_or(MEMORY_WORDS),
            print_tokens: config.print_tokens,
            no_color: config.no_color,
            file,
        })
    }
}

impl Config {
    /// Command line arguments take precedence over the config file
    pub fn get() -> Result<Self, ConfigError> {
        OptionalConfig::get_args()
            .merge(OptionalConfig::get_toml()?)
            .try_into()
    }
}
