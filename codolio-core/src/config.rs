//! codolio-ics configuration.
//!
//! Values are layered: built-in defaults, then the TOML config file, then
//! `CODOLIO_ICS_*` environment variables. The CLI applies its flags on top.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_ENDPOINT, DEFAULT_GLOBAL_CALENDAR_NAME, DEFAULT_OUTPUT_DIR, DEFAULT_PLATFORMS,
    DEFAULT_PROD_ID,
};
use crate::error::{CodolioError, CodolioResult};
use crate::ics::DocumentOptions;

const ENV_PREFIX: &str = "CODOLIO_ICS";

/// Which documents a run writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OutputMode {
    /// Only `codolio_contests.ics`, with every platform.
    Global,
    /// One `<platform>_contests.ics` per configured platform.
    #[default]
    PerPlatform,
    /// Both of the above.
    Both,
}

impl OutputMode {
    pub fn includes_global(self) -> bool {
        matches!(self, OutputMode::Global | OutputMode::Both)
    }

    pub fn includes_platforms(self) -> bool {
        matches!(self, OutputMode::PerPlatform | OutputMode::Both)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "global" => Ok(OutputMode::Global),
            "per-platform" | "per_platform" | "platform" => Ok(OutputMode::PerPlatform),
            "both" => Ok(OutputMode::Both),
            other => Err(format!(
                "invalid mode '{other}' (expected global, per-platform or both)"
            )),
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OutputMode::Global => "global",
            OutputMode::PerPlatform => "per-platform",
            OutputMode::Both => "both",
        };
        f.write_str(s)
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_DIR)
}

fn default_platforms() -> Vec<String> {
    DEFAULT_PLATFORMS.iter().map(|p| p.to_string()).collect()
}

fn default_prod_id() -> String {
    DEFAULT_PROD_ID.to_string()
}

fn default_global_calendar_name() -> String {
    DEFAULT_GLOBAL_CALENDAR_NAME.to_string()
}

/// Configuration at ~/.config/codolio-ics/config.toml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodolioConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default)]
    pub mode: OutputMode,

    /// Platforms that get their own document, in write order.
    #[serde(default = "default_platforms")]
    pub platforms: Vec<String>,

    #[serde(default = "default_prod_id")]
    pub prod_id: String,

    #[serde(default = "default_global_calendar_name")]
    pub global_calendar_name: String,

    /// Suggested client refresh interval, e.g. "12h" or "1day".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_interval: Option<String>,
}

impl Default for CodolioConfig {
    fn default() -> Self {
        CodolioConfig {
            endpoint: default_endpoint(),
            output_dir: default_output_dir(),
            mode: OutputMode::default(),
            platforms: default_platforms(),
            prod_id: default_prod_id(),
            global_calendar_name: default_global_calendar_name(),
            refresh_interval: None,
        }
    }
}

impl CodolioConfig {
    pub fn config_path() -> CodolioResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| CodolioError::Config("Could not determine config directory".into()))?
            .join("codolio-ics");

        Ok(config_dir.join("config.toml"))
    }

    /// Load configuration from `path`, or from the default location when
    /// `None`. An explicit path must exist; the default one is optional.
    pub fn load(path: Option<&Path>) -> CodolioResult<Self> {
        match path {
            Some(path) => Self::load_from(path, true),
            None => Self::load_from(&Self::config_path()?, false),
        }
    }

    pub fn load_from(path: &Path, required: bool) -> CodolioResult<Self> {
        let config: CodolioConfig = Config::builder()
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .list_separator(",")
                    .with_list_parse_key("platforms"),
            )
            .build()
            .map_err(|e| CodolioError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| CodolioError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Check values that serde alone cannot.
    pub fn validate(&self) -> CodolioResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(CodolioError::Config("endpoint must not be empty".into()));
        }

        if self.mode.includes_platforms() && self.platforms.iter().all(|p| p.trim().is_empty()) {
            return Err(CodolioError::Config(format!(
                "mode '{}' needs at least one platform",
                self.mode
            )));
        }

        self.refresh_duration()?;
        Ok(())
    }

    /// Output directory with `~` expanded.
    pub fn output_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.output_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    pub fn refresh_duration(&self) -> CodolioResult<Option<Duration>> {
        self.refresh_interval
            .as_deref()
            .map(|s| {
                humantime::parse_duration(s).map_err(|e| {
                    CodolioError::Config(format!("invalid refresh_interval '{s}': {e}"))
                })
            })
            .transpose()
    }

    pub fn document_options(&self) -> CodolioResult<DocumentOptions> {
        Ok(DocumentOptions {
            prod_id: self.prod_id.clone(),
            refresh_interval: self.refresh_duration()?,
        })
    }

    pub fn to_toml(&self) -> CodolioResult<String> {
        toml::to_string_pretty(self).map_err(|e| CodolioError::Config(e.to_string()))
    }
}
