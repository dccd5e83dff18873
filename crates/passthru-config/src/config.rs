//! Top-level configuration and file loading.

use std::path::Path;

use serde::{Deserialize, Serialize};

use passthru_analytics::{PricingEngine, SpreadSolver};

use crate::cash_flow::CashFlowConfig;
use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
use crate::pricing::PricingConfig;
use crate::solver::SolverSettings;

/// Every convention the library exposes, grouped by section.
///
/// Missing sections and fields fall back to their defaults, so an empty
/// document is a valid configuration:
///
/// ```toml
/// [cash_flow]
/// pay_delay = "origination_offset"
///
/// [solver]
/// max_iterations = 200
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassthruConfig {
    /// Amortization conventions.
    #[serde(default)]
    pub cash_flow: CashFlowConfig,

    /// Pricing conventions.
    #[serde(default)]
    pub pricing: PricingConfig,

    /// Spread solver settings.
    #[serde(default)]
    pub solver: SolverSettings,
}

/// Recognized configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML document.
    Toml,
    /// JSON document.
    Json,
}

impl ConfigFormat {
    /// Picks a format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::UnsupportedFormat` for anything other than
    /// `toml` or `json`.
    pub fn from_path(path: &Path) -> ConfigResult<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match extension.as_str() {
            "toml" => Ok(Self::Toml),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::unsupported_format(extension)),
        }
    }
}

impl PassthruConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns a parse error or `ConfigError::Validation`.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate_or_err()?;
        Ok(config)
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// Returns a parse error or `ConfigError::Validation`.
    pub fn from_json_str(s: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate_or_err()?;
        Ok(config)
    }

    /// Reads a configuration file, choosing the format by extension.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Io` if the file cannot be read, plus any error
    /// from [`ConfigFormat::from_path`] or the parser.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        log::debug!("loading {:?} config from {}", format, path.display());

        match format {
            ConfigFormat::Toml => Self::from_toml_str(&content),
            ConfigFormat::Json => Self::from_json_str(&content),
        }
    }

    /// Serializes to TOML.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::TomlSerialization` if a value has no TOML form.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Serializes to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Serialization` on failure.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// A pricing engine using these conventions.
    #[must_use]
    pub fn pricing_engine(&self) -> PricingEngine {
        PricingEngine::with_conventions(self.pricing.conventions())
    }

    /// A spread solver using these conventions and settings.
    #[must_use]
    pub fn spread_solver(&self) -> SpreadSolver {
        SpreadSolver::new()
            .with_engine(self.pricing_engine())
            .with_config(self.solver.to_solver_config())
    }
}

impl Validate for PassthruConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sections = [
            ("cash_flow", self.cash_flow.validate()),
            ("pricing", self.pricing.validate()),
            ("solver", self.solver.validate()),
        ];

        sections
            .into_iter()
            .flat_map(|(section, errors)| {
                errors.into_iter().map(move |e| {
                    ValidationError::new(format!("{section}.{}", e.field), e.message)
                })
            })
            .collect()
    }
}
